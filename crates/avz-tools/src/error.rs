//! Error types for external tool and network operations

use std::path::PathBuf;

/// Errors raised by external collaborators
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be started at all
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("{program} failed (exit code {code:?}): {stderr}")]
    ToolFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The server answered with a non-2xx status
    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The transfer failed before or during the body
    #[error("Download of {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local file I/O failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from the network rather than a local tool.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Network { .. })
    }
}

/// Result type alias for external tool operations
pub type Result<T> = std::result::Result<T, Error>;
