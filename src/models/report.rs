//! Smoke-test report data models
//!
//! A run produces one `CheckReport`: the device, when the run started,
//! the ordered failures, and the outcome. The report also owns the
//! exact user-facing line formats so the console contract lives in one
//! place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded check failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFailure {
    /// Return code of the failed check; the first nonzero one becomes
    /// the process exit status
    pub retval: i32,
    /// Human-readable cause
    pub message: String,
    /// Optional diagnostic payload (e.g. the two identical snapshots),
    /// kept as the exact bytes captured
    pub output: Vec<Vec<u8>>,
}

impl CheckFailure {
    /// The stderr line for this failure
    pub fn error_line(&self) -> String {
        format!("ERROR: retval {}: {}", self.retval, self.message)
    }

    /// The stdout payload lines for this failure; the stored bytes are
    /// converted to text only here, at render time
    pub fn output_lines(&self) -> Vec<String> {
        self.output
            .iter()
            .map(|item| format!("output: {}", String::from_utf8_lossy(item)))
            .collect()
    }
}

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Every check passed
    Passed,
    /// Device was gated out as an NVDIMM; nothing ran
    Skipped,
    /// At least one check failed
    Failed,
}

/// Complete result of one smoke-test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Device the run targeted
    pub device: String,
    /// Timestamp when the run started
    pub started_at: DateTime<Utc>,
    /// Overall outcome
    pub outcome: CheckOutcome,
    /// Recorded failures, in the order they occurred
    pub failures: Vec<CheckFailure>,
    /// Sticky exit status: the first nonzero retval, else 0
    pub status: i32,
}

impl CheckReport {
    /// Report for a device skipped by the NVDIMM gate
    pub fn skipped(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            started_at: Utc::now(),
            outcome: CheckOutcome::Skipped,
            failures: Vec::new(),
            status: 0,
        }
    }

    /// Report for a completed run with the given failures and sticky status
    pub fn completed(device: impl Into<String>, failures: Vec<CheckFailure>, status: i32) -> Self {
        let outcome = if failures.is_empty() {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed
        };
        Self {
            device: device.into(),
            started_at: Utc::now(),
            outcome,
            failures,
            status,
        }
    }

    /// The single stdout summary line for a passed or skipped run
    pub fn summary_line(&self) -> Option<String> {
        match self.outcome {
            CheckOutcome::Passed => Some(format!(
                "PASS: Finished testing stats for {}",
                self.device
            )),
            CheckOutcome::Skipped => Some(format!(
                "Disk {} appears to be an NVDIMM, skipping",
                self.device
            )),
            CheckOutcome::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_failure() -> CheckFailure {
        CheckFailure {
            retval: 1,
            message: "Disk sda not found in /proc/partitions".to_string(),
            output: Vec::new(),
        }
    }

    #[test]
    fn test_error_line_format() {
        let failure = sample_failure();
        assert_eq!(
            failure.error_line(),
            "ERROR: retval 1: Disk sda not found in /proc/partitions"
        );
    }

    #[test]
    fn test_output_lines_format() {
        let failure = CheckFailure {
            retval: 1,
            message: "Stats in /proc/diskstats did not change".to_string(),
            output: vec![b"8 0 sda 100".to_vec(), b"8 0 sda 100".to_vec()],
        };
        assert_eq!(
            failure.output_lines(),
            vec!["output: 8 0 sda 100", "output: 8 0 sda 100"]
        );
    }

    #[test]
    fn test_output_lines_render_invalid_utf8_lossily() {
        let failure = CheckFailure {
            retval: 1,
            message: "Stats in /sys/block/sda/stat did not change".to_string(),
            output: vec![vec![0x38, 0x20, 0xff, 0x20, 0x30]],
        };
        // Stored bytes stay exact; only the rendered line is lossy.
        assert_eq!(failure.output[0], vec![0x38, 0x20, 0xff, 0x20, 0x30]);
        assert_eq!(failure.output_lines()[0], "output: 8 \u{fffd} 0");
    }

    #[test]
    fn test_pass_report() {
        let report = CheckReport::completed("sda", Vec::new(), 0);
        assert_eq!(report.outcome, CheckOutcome::Passed);
        assert_eq!(report.status, 0);
        assert_eq!(
            report.summary_line().unwrap(),
            "PASS: Finished testing stats for sda"
        );
        assert!(report.started_at <= Utc::now());
    }

    #[test]
    fn test_skipped_report() {
        let report = CheckReport::skipped("pmem0");
        assert_eq!(report.outcome, CheckOutcome::Skipped);
        assert_eq!(report.status, 0);
        assert_eq!(
            report.summary_line().unwrap(),
            "Disk pmem0 appears to be an NVDIMM, skipping"
        );
    }

    #[test]
    fn test_failed_report_has_no_summary() {
        let report = CheckReport::completed("sda", vec![sample_failure()], 1);
        assert_eq!(report.outcome, CheckOutcome::Failed);
        assert_eq!(report.status, 1);
        assert!(report.summary_line().is_none());
    }

    #[test]
    fn test_serde_serialization() {
        let report = CheckReport::completed("sda", vec![sample_failure()], 1);
        let json = serde_json::to_string(&report).expect("serialize");
        let back: CheckReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.device, "sda");
        assert_eq!(back.outcome, CheckOutcome::Failed);
        assert_eq!(back.failures.len(), 1);
        assert_eq!(back.started_at, report.started_at);
    }
}
