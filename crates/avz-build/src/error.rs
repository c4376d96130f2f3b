use std::path::PathBuf;

/// Errors that abort a whole build.
///
/// A unit that fails to compile is not an error; it is reported in the
/// [`BuildReport`](crate::BuildReport) and the build carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no source files found in {dir}")]
    NoSources { dir: PathBuf },

    #[error("failed to enumerate sources in {dir}: {source}")]
    Enumerate {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("every source unit failed to compile ({failed} failed), nothing to pack")]
    NothingCompiled { failed: usize },

    #[error("packaging failed: {0}")]
    Packaging(#[source] avz_tools::Error),

    #[error(transparent)]
    Fs(#[from] avz_fs::Error),

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
}

pub type Result<T> = std::result::Result<T, Error>;
