//! Structured subprocess execution
//!
//! Tools are always started with an explicit argument vector. Nothing goes
//! through a shell, so paths with spaces or quotes need no escaping.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// A single external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Program name for messages (`g++`, `7z.exe`).
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external tools.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the invocation to completion and capture its streams.
    ///
    /// A non-zero exit is not an error at this level; only a failure to
    /// start the program is.
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

#[async_trait]
impl<T: ToolRunner + ?Sized> ToolRunner for std::sync::Arc<T> {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        (**self).run(invocation).await
    }
}

/// [`ToolRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        tracing::debug!(command = %invocation, "Running external tool");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| Error::Spawn {
            program: invocation.display_name(),
            source,
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a tool and turn an unsuccessful exit into [`Error::ToolFailed`].
pub async fn run_checked<R>(runner: &R, invocation: &Invocation) -> Result<ToolOutput>
where
    R: ToolRunner + ?Sized,
{
    let output = runner.run(invocation).await?;
    if output.success() {
        return Ok(output);
    }

    let stderr = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };
    Err(Error::ToolFailed {
        program: invocation.display_name(),
        code: output.code,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder_and_display() {
        let inv = Invocation::new("/avz/MinGW/bin/g++")
            .args(["-c", "a.cpp"])
            .arg("-o")
            .arg("a.o");
        assert_eq!(inv.args, vec!["-c", "a.cpp", "-o", "a.o"]);
        assert_eq!(inv.display_name(), "g++");
        assert_eq!(inv.to_string(), "/avz/MinGW/bin/g++ -c a.cpp -o a.o");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_streams() {
        let inv = Invocation::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = ProcessRunner.run(&inv).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_checked_maps_failure() {
        let inv = Invocation::new("sh").args(["-c", "echo broken >&2; exit 1"]);
        let err = run_checked(&ProcessRunner, &inv).await.unwrap_err();
        assert!(
            matches!(err, Error::ToolFailed { ref program, code: Some(1), ref stderr } if program == "sh" && stderr == "broken"),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let inv = Invocation::new("nonexistent_tool_xyz_12345");
        let err = ProcessRunner.run(&inv).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
