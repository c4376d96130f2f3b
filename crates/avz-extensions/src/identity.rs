//! Qualified extension names.

use crate::error::{Error, Result};

/// An extension identity, `<namespace>/<name>`.
///
/// The namespace may be absent when a dependency name could not be matched
/// against the catalog; such identities are used as-is in remote URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId {
    namespace: Option<String>,
    name: String,
}

impl ExtensionId {
    /// Parse `namespace/name` or a bare `name`.
    pub fn parse(full_name: &str) -> Result<Self> {
        let full_name = full_name.trim();
        let invalid = |reason: &str| Error::InvalidIdentity {
            name: full_name.to_string(),
            reason: reason.to_string(),
        };

        if full_name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if full_name.chars().any(char::is_whitespace) {
            return Err(invalid("name contains whitespace"));
        }

        match full_name.split_once('/') {
            None => Ok(Self {
                namespace: None,
                name: full_name.to_string(),
            }),
            Some((namespace, name)) => {
                if namespace.is_empty() || name.is_empty() {
                    return Err(invalid("namespace and name must both be non-empty"));
                }
                if name.contains('/') {
                    return Err(invalid("expected exactly one '/' separator"));
                }
                Ok(Self {
                    namespace: Some(namespace.to_string()),
                    name: name.to_string(),
                })
            }
        }
    }

    /// The part after the namespace separator; names the install directory.
    pub fn short_name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl std::str::FromStr for ExtensionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
