//! Mirrored remote repositories and their URL layout.

use serde::{Deserialize, Serialize};

use crate::identity::ExtensionId;

/// Which mirror to download from. All mirrors serve identical content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteSource {
    GitHub,
    GitLab,
    #[default]
    Gitee,
}

impl RemoteSource {
    pub const ALL: [RemoteSource; 3] = [Self::GitHub, Self::GitLab, Self::Gitee];

    /// Base URL of the extension repository on this mirror.
    pub fn extension_base(&self) -> &'static str {
        match self {
            Self::GitHub => "https://github.com/qrmd0/AvZLib/raw/main",
            Self::GitLab => "https://gitlab.com/avzlib/AvZLib/-/raw/main",
            Self::Gitee => "https://gitee.com/qrmd/AvZLib/raw/main",
        }
    }

    /// Base URL of the core library repository on this mirror.
    pub fn core_base(&self) -> &'static str {
        match self {
            Self::GitHub => "https://github.com/vector-wlc/AsmVsZombies/raw/master",
            Self::GitLab => "https://gitlab.com/vector-wlc/AsmVsZombies/-/raw/master",
            Self::Gitee => "https://gitee.com/vector-wlc/AsmVsZombies/raw/master",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Gitee => "gitee",
        }
    }
}

impl std::fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RemoteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown download source '{s}' (expected github, gitlab or gitee)"))
    }
}

/// URL layout of the extension and core repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLayout {
    extension_base: String,
    core_base: String,
}

impl RemoteLayout {
    pub fn new(extension_base: impl Into<String>, core_base: impl Into<String>) -> Self {
        Self {
            extension_base: extension_base.into().trim_end_matches('/').to_string(),
            core_base: core_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn for_source(source: RemoteSource) -> Self {
        Self::new(source.extension_base(), source.core_base())
    }

    /// `{repoBase}/extension_list.txt`
    pub fn extension_catalog_url(&self) -> String {
        format!("{}/extension_list.txt", self.extension_base)
    }

    /// `{repoBase}/{extensionFullName}/version.txt`
    pub fn extension_versions_url(&self, id: &ExtensionId) -> String {
        format!("{}/{}/version.txt", self.extension_base, id.full_name())
    }

    /// `{repoBase}/{extensionFullName}/release/{version}.zip`
    pub fn extension_archive_url(&self, id: &ExtensionId, version: &str) -> String {
        format!(
            "{}/{}/release/{}.zip",
            self.extension_base,
            id.full_name(),
            version
        )
    }

    /// `{coreBase}/release/version.txt`
    pub fn core_versions_url(&self) -> String {
        format!("{}/release/version.txt", self.core_base)
    }

    /// `{coreBase}/release/{version}`
    pub fn core_archive_url(&self, version: &str) -> String {
        format!("{}/release/{}", self.core_base, version)
    }
}
