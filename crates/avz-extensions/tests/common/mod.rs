//! Fake remote and extractor shared by the extension tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use avz_extensions::{RemoteLayout, RemoteSource, Session};
use avz_fs::InstallationRoot;
use avz_test_utils::install::TestInstall;
use avz_tools::{Extractor, Fetcher, ProgressObserver};

pub const EXT_BASE: &str = "http://mirror.test/ext";
pub const CORE_BASE: &str = "http://mirror.test/core";

/// In-memory remote: URL to body, anything else is a 404.
#[derive(Default)]
pub struct FakeRemote {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Serve an extension archive containing `manifest`.
    pub fn extension(self, full_name: &str, version: &str, manifest: &str) -> Self {
        let short = full_name.rsplit('/').next().unwrap_or(full_name);
        self.serve(
            format!("{EXT_BASE}/{full_name}/release/{version}.zip"),
            avz_test_utils::archive::extension(short, manifest),
        )
    }

    pub fn catalog(self, entries: &[&str]) -> Self {
        self.serve(format!("{EXT_BASE}/extension_list.txt"), entries.join("\n"))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests for extension archives only.
    pub fn archive_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|url| url.ends_with(".zip"))
            .collect()
    }
}

#[async_trait]
impl Fetcher for FakeRemote {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&dyn ProgressObserver>,
    ) -> avz_tools::Result<()> {
        self.requests.lock().unwrap().push(url.to_string());
        let Some(body) = self.bodies.get(url) else {
            return Err(avz_tools::Error::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        };
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(dest, body).unwrap();
        if let Some(progress) = progress {
            progress.on_progress(1.0);
        }
        Ok(())
    }
}

/// Unpacks [`avz_test_utils::archive`] text and records each call.
#[derive(Default)]
pub struct FakeExtractor {
    calls: Mutex<Vec<(PathBuf, PathBuf, bool)>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, archive: &Path, dest: &Path, overwrite: bool) -> avz_tools::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((archive.to_path_buf(), dest.to_path_buf(), overwrite));
        avz_test_utils::archive::unpack(archive, dest, overwrite).map_err(|stderr| {
            avz_tools::Error::ToolFailed {
                program: "7z".to_string(),
                code: Some(2),
                stderr,
            }
        })
    }
}

/// Scripted answers for the selection prompts.
pub struct ScriptedPrompter {
    answers: Mutex<Vec<Option<usize>>>,
    pub seen: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Option<usize>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().copied().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl avz_extensions::Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> avz_extensions::Result<Option<usize>> {
        self.seen
            .lock()
            .unwrap()
            .push((prompt.to_string(), items.to_vec()));
        Ok(self.answers.lock().unwrap().pop().flatten())
    }
}

/// Session over `install` pointed at the fake mirror, with scratch files kept
/// inside the temp directory.
pub fn session(install: &TestInstall) -> Session {
    Session::new(InstallationRoot::at(install.root()), RemoteSource::Gitee)
        .with_remote(RemoteLayout::new(EXT_BASE, CORE_BASE))
        .with_scratch_dir(install.temp_path().join("scratch"))
}
