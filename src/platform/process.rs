//! Child processes launched by probes.
//!
//! Every child is bounded by the running probe's remaining budget and is
//! killed when that budget runs out, so a timed-out probe never leaves a
//! `system_profiler` or `powershell` process behind.

use log::debug;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::core::telemetry::probe::remaining_budget;
use crate::core::telemetry::DEFAULT_PROBE_TIMEOUT;
use crate::error::ProbeError;

/// Run `program` to completion and capture its output.
///
/// Must be called from a blocking context (a probe's `run()`), never from
/// async code.
pub fn output(program: &str, args: &[&str]) -> Result<Output, ProbeError> {
    let budget = remaining_budget().unwrap_or(DEFAULT_PROBE_TIMEOUT);
    output_within(program, args, budget)
}

/// Like [`output`], with an explicit budget.
pub fn output_within(program: &str, args: &[&str], budget: Duration) -> Result<Output, ProbeError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // A private runtime keeps the child's timer alive even after the
    // aggregator's runtime has been shut down in the background.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(wait_bounded(command, program, budget))
}

async fn wait_bounded(
    mut command: Command,
    program: &str,
    budget: Duration,
) -> Result<Output, ProbeError> {
    let child = command.spawn()?;
    match tokio::time::timeout(budget, child.wait_with_output()).await {
        Ok(output) => Ok(output?),
        Err(_) => {
            // dropping the future drops the child, which kills it
            debug!("Killed '{}' after {:?}", program, budget);
            Err(ProbeError::Timeout(budget))
        }
    }
}
