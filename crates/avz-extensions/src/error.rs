use std::path::PathBuf;

/// Errors that can occur while resolving and installing extensions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Extension name is not of the form `<namespace>/<name>` or `<name>`.
    #[error("invalid extension name '{name}': {reason}")]
    InvalidIdentity { name: String, reason: String },

    /// A required file or directory is missing.
    #[error("{what} not found at {path}")]
    NotFound { what: String, path: PathBuf },

    /// A downloaded list contained no usable entries.
    #[error("the list downloaded from {url} is empty")]
    EmptyCatalog { url: String },

    /// Download failed (HTTP status or transport).
    #[error(transparent)]
    Network(avz_tools::Error),

    /// An external tool exited unsuccessfully or could not be started.
    #[error(transparent)]
    ExternalTool(avz_tools::Error),

    /// Local filesystem failure.
    #[error(transparent)]
    Fs(avz_fs::Error),

    /// Interactive prompt failed (not a cancellation).
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// Coarse error taxonomy used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Network,
    ExternalTool,
    InvalidInput,
    Io,
}

impl Error {
    pub fn not_found(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentity { .. } | Self::Prompt(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } | Self::EmptyCatalog { .. } => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::Network,
            Self::ExternalTool(_) => ErrorKind::ExternalTool,
            Self::Fs(e) if e.is_not_found() => ErrorKind::NotFound,
            Self::Fs(_) => ErrorKind::Io,
        }
    }
}

impl From<avz_tools::Error> for Error {
    fn from(err: avz_tools::Error) -> Self {
        if err.is_network() {
            Self::Network(err)
        } else {
            Self::ExternalTool(err)
        }
    }
}

impl From<avz_fs::Error> for Error {
    fn from(err: avz_fs::Error) -> Self {
        Self::Fs(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
