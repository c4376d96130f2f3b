//! Build scenarios that depend on installed extensions.

mod support;

use std::collections::HashMap;

use avz_build::BuildOrchestrator;
use avz_extensions::{RemoteLayout, RemoteSource, Resolver, Session};
use avz_fs::InstallationRoot;
use avz_test_utils::{archive, install::TestInstall};
use avz_tools::HttpFetcher;
use pretty_assertions::assert_eq;
use support::{IncludeCheckingToolchain, Mirror, TextArchiveExtractor};

#[tokio::test]
async fn test_build_recovers_after_missing_extension_is_installed() {
    let install = TestInstall::new()
        .with_core_version("240113")
        .with_source("main.cpp", "#include \"flower/flower.h\"\nint main() {}\n")
        .with_source("tools/timer.cpp", "int timer;\n");
    let root = InstallationRoot::at(install.root());
    let orchestrator = BuildOrchestrator::new(IncludeCheckingToolchain::default()).with_workers(Some(2));

    let first = orchestrator.build(&root, None).await.unwrap();
    assert_eq!(first.failed.len(), 1);
    assert!(first.failed[0].0.source.ends_with("main.cpp"));
    install.assert_file_exists("bin/libavz.a");

    let mut routes = HashMap::new();
    routes.insert(
        "/ext/qrmd/flower/release/240113.zip".to_string(),
        archive::pack(&[
            ("flower/information.txt", "flower\nAvZ 2024_01_13\n"),
            ("flower/flower.h", "#pragma once\n"),
        ]),
    );
    let mirror = Mirror::start(routes).await;
    let mut session = Session::new(root.clone(), RemoteSource::Gitee)
        .with_remote(RemoteLayout::new(mirror.url("/ext"), mirror.url("/core")))
        .with_scratch_dir(install.temp_path().join("scratch"));
    Resolver::new(HttpFetcher::new(), TextArchiveExtractor)
        .install(&mut session, "qrmd/flower", "240113", false)
        .await
        .unwrap();

    let second = orchestrator.build(&root, None).await.unwrap();
    assert!(!second.has_warnings());
    assert_eq!(second.compiled.len(), 2);

    let packed = orchestrator.runner().packed.lock().unwrap().clone();
    let obj_dir = root.obj_dir();
    let last: Vec<_> = packed
        .last()
        .unwrap()
        .iter()
        .map(|p| std::path::Path::new(p).strip_prefix(&obj_dir).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        last,
        vec![
            std::path::PathBuf::from("main.cpp.o"),
            std::path::Path::new("tools").join("timer.cpp.o"),
        ]
    );
    install.assert_file_missing("bin/obj/main.cpp.o");
}
