//! Synthetic load generation
//!
//! Drives I/O against the raw device path with an external benchmark
//! command (hdparm -t by default). The command runs purely for its side
//! effect on the kernel counters: both output streams are discarded and
//! its exit status is not inspected. Only a failure to spawn at all is
//! surfaced, and that is out of scope for graceful recovery.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::CheckConfig;
use crate::{BlockSmokeError, Result};

/// Invoke the load generator against the raw device path and wait for
/// it to finish
pub async fn generate_activity(config: &CheckConfig) -> Result<()> {
    let (program, args) = config.load_command.split_first().ok_or_else(|| {
        BlockSmokeError::ConfigError("Load command must not be empty".to_string())
    })?;

    let device_path = config.device_path();
    debug!(program = %program, device = %device_path.display(), "generating disk activity");

    let status = Command::new(program)
        .args(args)
        .arg(&device_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|err| {
            BlockSmokeError::LoadError(format!("failed to run {}: {}", program, err))
        })?;

    // A nonzero benchmark exit is not a check failure.
    if !status.success() {
        debug!(program = %program, code = ?status.code(), "load generator exited nonzero");
    }

    Ok(())
}

/// Fixed wall-clock wait for the kernel counters to catch up
pub async fn settle(config: &CheckConfig) {
    debug!(
        settle = %humantime::format_duration(config.settle),
        "waiting for counters to settle"
    );
    tokio::time::sleep(config.settle).await;
}
