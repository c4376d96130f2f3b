//! External collaborators for the AvZ manager.
//!
//! Everything that leaves the process lives here: subprocess invocation
//! through [`ToolRunner`], archive extraction through [`Extractor`] and HTTP
//! downloads through [`Fetcher`]. Each seam is a trait so the resolver and
//! the build orchestrator can be driven by fakes in tests.

pub mod archive;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod runner;

pub use archive::{Extractor, SevenZip};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use progress::ProgressObserver;
pub use runner::{Invocation, ProcessRunner, ToolOutput, ToolRunner, run_checked};
