//! Build orchestration for AvZ script sources.
//!
//! Every `.cpp` file under `src/` is compiled to an object in `bin/obj/` by a
//! fixed number of workers, then the objects are packed into `bin/libavz.a`.
//! Compilers and archivers are external tools driven through
//! [`avz_tools::ToolRunner`] with structured argument vectors.

pub mod error;
pub mod orchestrator;
pub mod partition;
pub mod progress;
pub mod sources;
pub mod toolchain;

pub use error::{Error, Result};
pub use orchestrator::{BuildOrchestrator, BuildReport, UnitOutcome};
pub use partition::round_robin;
pub use progress::{BuildObserver, Progress, ProgressCounter};
pub use sources::{CompileUnit, enumerate_sources};
pub use toolchain::{CommandTemplate, Placeholders, Toolchain};
