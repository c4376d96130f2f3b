//! Resolver scenarios over real HTTP against a local mirror.

mod support;

use std::collections::HashMap;

use avz_extensions::{ErrorKind, InstallEvent, RemoteLayout, RemoteSource, Resolver, Session};
use avz_fs::InstallationRoot;
use avz_test_utils::{archive, install::TestInstall};
use avz_tools::HttpFetcher;
use pretty_assertions::assert_eq;
use support::{Mirror, TextArchiveExtractor};

fn routes() -> HashMap<String, String> {
    let mut routes = HashMap::new();
    routes.insert(
        "/ext/extension_list.txt".to_string(),
        "qrmd/flower\nqrmd/shovel\nvector/seed\n".to_string(),
    );
    routes.insert(
        "/ext/qrmd/flower/release/240113.zip".to_string(),
        archive::pack(&[
            (
                "flower/information.txt",
                "flower: planting helpers\nAvZ 2024_01_13\nshovel 240101\nseed 1.2\n",
            ),
            ("flower/flower.h", "#pragma once\n"),
        ]),
    );
    routes.insert(
        "/ext/qrmd/shovel/release/240101.zip".to_string(),
        archive::extension("shovel", "shovel\nAvZ 2024_01_13\n"),
    );
    routes.insert(
        "/ext/vector/seed/release/1.2.zip".to_string(),
        archive::extension("seed", "seed\nAvZ 2023_12_01\n"),
    );
    routes
}

fn session(install: &TestInstall, mirror: &Mirror) -> Session {
    Session::new(InstallationRoot::at(install.root()), RemoteSource::Gitee)
        .with_remote(RemoteLayout::new(mirror.url("/ext"), mirror.url("/core")))
        .with_scratch_dir(install.temp_path().join("scratch"))
}

#[tokio::test]
async fn test_install_walks_dependency_tree_over_http() {
    let mirror = Mirror::start(routes()).await;
    let install = TestInstall::new().with_core_version("240113");
    let resolver = Resolver::new(HttpFetcher::new(), TextArchiveExtractor);
    let mut session = session(&install, &mirror);

    let report = resolver
        .install(&mut session, "qrmd/flower", "240113", false)
        .await
        .unwrap();

    let installed: Vec<String> = report.installed().iter().map(|id| id.full_name()).collect();
    assert_eq!(installed, vec!["qrmd/flower", "qrmd/shovel", "vector/seed"]);

    install.assert_file_exists("inc/flower/flower.h");
    install.assert_file_exists("inc/shovel/information.txt");
    install.assert_file_exists("inc/seed/information.txt");

    let warnings: Vec<&InstallEvent> = report.warnings().collect();
    assert_eq!(warnings.len(), 1, "only seed targets another core: {warnings:?}");
    assert!(matches!(
        warnings[0],
        InstallEvent::CompatibilityWarning { id, .. } if id.short_name() == "seed"
    ));

    let scratch: Vec<_> = std::fs::read_dir(install.temp_path().join("scratch"))
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(scratch, vec!["extension_list.txt"], "archives are removed after extraction");
}

#[tokio::test]
async fn test_missing_dependency_release_over_http() {
    let mut routes = routes();
    routes.remove("/ext/qrmd/shovel/release/240101.zip");
    let mirror = Mirror::start(routes).await;
    let install = TestInstall::new().with_core_version("240113");
    let resolver = Resolver::new(HttpFetcher::new(), TextArchiveExtractor);
    let mut session = session(&install, &mirror);

    let report = resolver
        .install(&mut session, "qrmd/flower", "240113", false)
        .await
        .unwrap();

    let failed: Vec<(String, ErrorKind)> = report
        .events()
        .iter()
        .filter_map(|e| match e {
            InstallEvent::DependencyFailed { name, error, .. } => Some((name.clone(), error.kind())),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![("qrmd/shovel".to_string(), ErrorKind::Network)]);
    install.assert_file_exists("inc/seed/information.txt");
    assert!(!install.temp_path().join("scratch/shovel-240101.zip").exists());
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let mirror = Mirror::start(routes()).await;
    let first = TestInstall::new().with_core_version("240113");
    let second = TestInstall::new().with_core_version("240113");
    let resolver = Resolver::new(HttpFetcher::new(), TextArchiveExtractor);

    let mut session_one = session(&first, &mirror);
    resolver
        .install(&mut session_one, "qrmd/shovel", "240101", false)
        .await
        .unwrap();

    let mut session_two = session(&second, &mirror);
    let report = resolver
        .install(&mut session_two, "qrmd/shovel", "240101", false)
        .await
        .unwrap();

    assert_eq!(report.installed().len(), 1);
    let archive_hits = mirror
        .hits()
        .iter()
        .filter(|p| p.ends_with("shovel/release/240101.zip"))
        .count();
    assert_eq!(archive_hits, 2);
}

#[tokio::test]
async fn test_reinstall_in_same_session_is_skipped() {
    let mirror = Mirror::start(routes()).await;
    let install = TestInstall::new().with_core_version("240113");
    let resolver = Resolver::new(HttpFetcher::new(), TextArchiveExtractor);
    let mut session = session(&install, &mirror);

    resolver
        .install(&mut session, "qrmd/shovel", "240101", false)
        .await
        .unwrap();
    let hits = mirror.hits().len();

    let report = resolver
        .install(&mut session, "qrmd/shovel", "240101", false)
        .await
        .unwrap();

    assert_eq!(mirror.hits().len(), hits);
    assert!(matches!(report.events(), [InstallEvent::AlreadyInstalled { .. }]));
}
