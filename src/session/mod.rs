//! Check session
//!
//! Owns the linear run procedure: NVDIMM gate, the three inventory
//! checks, the stat presence guard, snapshot / load / resnapshot, and
//! the change assertions. Failures accumulate on the session; the first
//! nonzero return code is sticky and becomes the process exit status.

use std::path::Path;

use tracing::debug;

use crate::config::CheckConfig;
use crate::models::{CheckFailure, CheckReport};
use crate::stats::SnapshotPair;
use crate::{inventory, load, stats, Result, NVDIMM_MARKER};

/// State of one smoke-test run, alive for the duration of the process
#[derive(Debug)]
pub struct CheckSession {
    config: CheckConfig,
    status: i32,
    failures: Vec<CheckFailure>,
}

impl CheckSession {
    /// Create a session for the given configuration
    pub fn new(config: CheckConfig) -> Self {
        Self {
            config,
            status: 0,
            failures: Vec::new(),
        }
    }

    /// Whether the device under test is a persistent-memory device,
    /// which is gated out of testing entirely
    pub fn is_nvdimm(&self) -> bool {
        self.config.device.contains(NVDIMM_MARKER)
    }

    /// Failures recorded so far, in order. Still reachable after an
    /// aborted run so the caller can render them before exiting.
    pub fn failures(&self) -> &[CheckFailure] {
        &self.failures
    }

    /// Run the full check sequence and produce the report
    pub async fn run(&mut self) -> Result<CheckReport> {
        if self.is_nvdimm() {
            debug!(device = %self.config.device, "persistent-memory device, skipping");
            return Ok(CheckReport::skipped(self.config.device.clone()));
        }

        // Inventory checks are independent; none short-circuits the rest.
        let listed = inventory::device_in_partitions(&self.config);
        self.record_listing(listed, &self.config.partitions_path());
        let listed = inventory::device_in_diskstats(&self.config);
        self.record_listing(listed, &self.config.diskstats_path());
        let listed = inventory::device_in_sys_block(&self.config);
        self.record_listing(listed, &self.config.sys_block_path());

        self.collect_stats().await?;

        Ok(CheckReport::completed(
            self.config.device.clone(),
            std::mem::take(&mut self.failures),
            self.status,
        ))
    }

    /// Snapshot both counter sources, perturb them with the load
    /// generator, wait out the settle interval, resnapshot, and assert
    /// each pair moved
    async fn collect_stats(&mut self) -> Result<()> {
        if !stats::sys_stat_available(&self.config) {
            let message = format!(
                "stat is either empty or nonexistent in {}/{}/",
                self.config.sys_block_path().display(),
                self.config.device
            );
            self.record_failure(1, message, Vec::new());
        }

        let proc_before = stats::diskstats_snapshot(&self.config)?;
        let sys_before = stats::sys_stat_snapshot(&self.config)?;

        load::generate_activity(&self.config).await?;
        load::settle(&self.config).await;

        let proc_pair = SnapshotPair::new(proc_before, stats::diskstats_snapshot(&self.config)?);
        let sys_pair = SnapshotPair::new(sys_before, stats::sys_stat_snapshot(&self.config)?);

        if !proc_pair.changed() {
            let message = format!(
                "Stats in {} did not change",
                self.config.diskstats_path().display()
            );
            self.record_failure(1, message, vec![proc_pair.before, proc_pair.after]);
        }

        if !sys_pair.changed() {
            let message = format!(
                "Stats in {} did not change",
                self.config.sys_stat_path().display()
            );
            self.record_failure(1, message, vec![sys_pair.before, sys_pair.after]);
        }

        Ok(())
    }

    /// Record the result of one inventory check. "Not listed" is retval 1;
    /// an unreadable inventory is retval 2, mirroring grep's exit code for
    /// a missing file. Either way the run continues.
    fn record_listing(&mut self, listed: Result<bool>, path: &Path) {
        match listed {
            Ok(true) => {}
            Ok(false) => {
                let message = format!(
                    "Disk {} not found in {}",
                    self.config.device,
                    path.display()
                );
                self.record_failure(1, message, Vec::new());
            }
            Err(err) => {
                let message = format!("cannot check {}: {}", path.display(), err);
                self.record_failure(2, message, Vec::new());
            }
        }
    }

    /// Record a failure; only the first nonzero return code is retained
    /// as the final status. Payload bytes are kept exactly as captured.
    fn record_failure(&mut self, retval: i32, message: String, output: Vec<Vec<u8>>) {
        debug!(retval, message = %message, "check failed");
        if self.status == 0 {
            self.status = retval;
        }
        self.failures.push(CheckFailure {
            retval,
            message,
            output,
        });
    }
}
