//! Scripted compiler and archiver for orchestrator tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use avz_tools::{Invocation, ToolOutput, ToolRunner};

/// Pretends to be `g++` and `ar`.
///
/// Compiling writes the `-o` file unless the source matches a failing
/// pattern. Packing writes the output library. Every invocation is recorded.
#[derive(Default)]
pub struct FakeToolchain {
    failing_sources: Vec<String>,
    fail_pack: bool,
    stagger: bool,
    invocations: Mutex<Vec<Invocation>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources whose path contains `pattern` fail to compile.
    pub fn failing(mut self, pattern: &str) -> Self {
        self.failing_sources.push(pattern.to_string());
        self
    }

    pub fn failing_pack(mut self) -> Self {
        self.fail_pack = true;
        self
    }

    /// Give compiles different durations so workers finish out of order.
    pub fn staggered(mut self) -> Self {
        self.stagger = true;
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn compiles(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.display_name() == "g++")
            .collect()
    }

    pub fn packs(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.display_name() == "ar")
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn compile(&self, invocation: &Invocation) -> ToolOutput {
        let source = arg_after(invocation, "-c").unwrap_or_default();
        let object = arg_after(invocation, "-o").unwrap_or_default();

        if self.stagger {
            let millis = source.bytes().map(u64::from).sum::<u64>() % 7;
            tokio::time::sleep(Duration::from_millis(millis + 1)).await;
        } else {
            tokio::task::yield_now().await;
        }

        if self.failing_sources.iter().any(|p| source.contains(p.as_str())) {
            return ToolOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: format!("{source}: error: expected ';'"),
            };
        }
        std::fs::write(&object, "obj").unwrap();
        ok()
    }

    fn pack(&self, invocation: &Invocation) -> ToolOutput {
        if self.fail_pack {
            return ToolOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: "ar: cannot open output".to_string(),
            };
        }
        let output = &invocation.args[1];
        std::fs::write(output, "!<arch>\n").unwrap();
        ok()
    }
}

#[async_trait]
impl ToolRunner for FakeToolchain {
    async fn run(&self, invocation: &Invocation) -> avz_tools::Result<ToolOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let output = if invocation.display_name() == "ar" {
            self.pack(invocation)
        } else {
            self.compile(invocation).await
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(output)
    }
}

fn ok() -> ToolOutput {
    ToolOutput {
        code: Some(0),
        ..ToolOutput::default()
    }
}

fn arg_after(invocation: &Invocation, flag: &str) -> Option<String> {
    let position = invocation.args.iter().position(|a| a == flag)?;
    invocation.args.get(position + 1).cloned()
}
