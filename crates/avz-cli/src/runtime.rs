//! Async runtime for commands.
//!
//! Commands drive their futures on a current-thread runtime: compile
//! workers and downloads interleave at await points and never run in
//! parallel within the process.

use std::future::Future;

use crate::error::Result;

pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
