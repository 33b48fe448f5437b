// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The orchestrator talks to a `ProcessBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake backend in tests while keeping
//! the production implementation here.
//!
//! - `RealProcessBackend` spawns the tool with `tokio::process::Command`,
//!   redirects stdout when the invocation asks for it, lets stderr through to
//!   the terminal, and waits for the exit status.
//! - Tests can provide their own `ProcessBackend` that, for example, records
//!   invocations and writes the files a real tool would have written.

use std::fs::File;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{DagvizError, Result};
use crate::exec::Invocation;
use crate::pipeline::StageOutcome;

/// Trait abstracting how external tools are run.
///
/// Implementations must not return before the tool has exited: the
/// orchestrator relies on this to keep the stages strictly ordered.
pub trait ProcessBackend: Send {
    /// Run one invocation to completion and report how it exited.
    ///
    /// `Err` is reserved for failures to run the tool at all (spawn errors,
    /// unwritable stdout target); a tool that ran and exited non-zero is
    /// `Ok(StageOutcome::Failed(_))`.
    fn run<'a>(
        &'a mut self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<StageOutcome>> + Send + 'a>>;
}

/// Real process backend used in production.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for RealProcessBackend {
    fn run<'a>(
        &'a mut self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<StageOutcome>> + Send + 'a>> {
        Box::pin(run_invocation(invocation))
    }
}

async fn run_invocation(invocation: &Invocation) -> Result<StageOutcome> {
    info!(
        stage = %invocation.stage,
        program = %invocation.program,
        args = ?invocation.args,
        "starting stage process"
    );

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    match invocation.stdout_to {
        Some(ref path) => {
            let file = File::create(path).with_context(|| {
                format!("creating {:?} for {} stage output", path, invocation.stage)
            })?;
            debug!(stage = %invocation.stage, path = ?path, "redirecting stdout");
            cmd.stdout(Stdio::from(file));
        }
        None => {
            cmd.stdout(Stdio::inherit());
        }
    }

    let mut child = cmd.spawn().map_err(|source| DagvizError::StageSpawn {
        stage: invocation.stage,
        program: invocation.program.clone(),
        source,
    })?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for {} stage process", invocation.stage))?;

    let outcome = StageOutcome::from_status(status);
    info!(
        stage = %invocation.stage,
        exit_code = status.code().unwrap_or(-1),
        success = status.success(),
        "stage process exited"
    );

    Ok(outcome)
}
