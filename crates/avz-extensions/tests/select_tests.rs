mod common;

use avz_extensions::{ErrorKind, Resolver, Selection};
use avz_test_utils::install::TestInstall;
use common::{EXT_BASE, FakeExtractor, FakeRemote, ScriptedPrompter, session};
use pretty_assertions::assert_eq;

fn remote() -> FakeRemote {
    FakeRemote::new()
        .catalog(&["qrmd/flower", "qrmd/shovel"])
        .serve(format!("{EXT_BASE}/qrmd/shovel/version.txt"), "240101\n240201\n")
        .extension("qrmd/shovel", "240201", "shovel\nAvZ 2024_01_13\nflower 1.0\n")
        .extension("qrmd/flower", "1.0", "flower\nAvZ 2024_01_13\n")
}

#[tokio::test]
async fn test_select_and_install_forces_chosen_version() {
    let install = TestInstall::new()
        .with_core_version("240113")
        .with_extension("shovel", "old\n");
    let resolver = Resolver::new(remote(), FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[Some(1), Some(1)]);
    let mut session = session(&install);

    let selection = resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap();

    let report = selection.chosen().expect("selection should not be aborted");
    let names: Vec<String> = report.installed().iter().map(|id| id.full_name()).collect();
    assert_eq!(names, vec!["qrmd/shovel", "qrmd/flower"]);

    let seen = prompter.seen.lock().unwrap();
    assert_eq!(seen[0].1, vec!["qrmd/flower", "qrmd/shovel"]);
    assert_eq!(seen[1].1, vec!["240101", "240201"]);
}

#[tokio::test]
async fn test_catalog_reused_for_dependency_lookup() {
    let install = TestInstall::new().with_core_version("240113");
    let resolver = Resolver::new(remote(), FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[Some(1), Some(1)]);
    let mut session = session(&install);

    resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap();

    let catalog_fetches = resolver
        .fetcher()
        .requests()
        .iter()
        .filter(|url| url.ends_with("extension_list.txt"))
        .count();
    assert_eq!(catalog_fetches, 1);
}

#[tokio::test]
async fn test_cancel_extension_prompt() {
    let install = TestInstall::new();
    let resolver = Resolver::new(remote(), FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[None]);
    let mut session = session(&install);

    let selection = resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap();

    assert!(selection.is_aborted());
    assert_eq!(resolver.fetcher().requests().len(), 1, "only the catalog is fetched");
}

#[tokio::test]
async fn test_cancel_version_prompt() {
    let install = TestInstall::new();
    let resolver = Resolver::new(remote(), FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[Some(1), None]);
    let mut session = session(&install);

    let selection = resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap();

    assert!(matches!(selection, Selection::Aborted));
    assert!(resolver.fetcher().archive_requests().is_empty());
    install.assert_file_missing("inc/shovel");
}

#[tokio::test]
async fn test_catalog_download_failure_surfaces() {
    let install = TestInstall::new();
    let resolver = Resolver::new(FakeRemote::new(), FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[Some(0)]);
    let mut session = session(&install);

    let err = resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(prompter.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_version_list_is_not_found() {
    let install = TestInstall::new();
    let remote = FakeRemote::new()
        .catalog(&["qrmd/flower"])
        .serve(format!("{EXT_BASE}/qrmd/flower/version.txt"), "\n\n");
    let resolver = Resolver::new(remote, FakeExtractor::new());
    let prompter = ScriptedPrompter::new(&[Some(0)]);
    let mut session = session(&install);

    let err = resolver
        .select_and_install(&mut session, &prompter)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
