//! Configuration management module
//!
//! Holds the parameters of one smoke-test run: the device under test,
//! the filesystem roots the kernel tables are read from, the settle
//! interval, and the external load-generator command.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::{BlockSmokeError, Result, DEFAULT_DEVICE, DEFAULT_SETTLE_SECS};

/// Check configuration structure containing all run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Block device name under test (e.g. "sda")
    pub device: String,
    /// Root of the procfs mount, parameterized so tests can run
    /// against fixture trees
    pub proc_root: PathBuf,
    /// Root of the sysfs mount
    pub sys_root: PathBuf,
    /// Root of the device node directory
    pub dev_root: PathBuf,
    /// Fixed wait inserted after the load step so kernel counters
    /// can catch up
    pub settle: Duration,
    /// Load-generator command; the raw device path is appended at
    /// invocation time
    pub load_command: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            dev_root: PathBuf::from("/dev"),
            settle: Duration::from_secs(DEFAULT_SETTLE_SECS),
            load_command: vec!["hdparm".to_string(), "-t".to_string()],
        }
    }
}

impl CheckConfig {
    /// Create a configuration for the given device with default roots
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    /// Set the device name under test
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the procfs root
    pub fn with_proc_root(mut self, root: PathBuf) -> Self {
        self.proc_root = root;
        self
    }

    /// Set the sysfs root
    pub fn with_sys_root(mut self, root: PathBuf) -> Self {
        self.sys_root = root;
        self
    }

    /// Set the device node root
    pub fn with_dev_root(mut self, root: PathBuf) -> Self {
        self.dev_root = root;
        self
    }

    /// Set the settle interval
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Set the load-generator command
    pub fn with_load_command(mut self, command: Vec<String>) -> Self {
        self.load_command = command;
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.device.is_empty() {
            return Err(BlockSmokeError::ConfigError(
                "Device name must not be empty".to_string(),
            ));
        }

        if self.device.contains('/') || self.device.chars().any(char::is_whitespace) {
            return Err(BlockSmokeError::ConfigError(format!(
                "Device name must be a bare block device name, got: {}",
                self.device
            )));
        }

        if self.load_command.is_empty() {
            return Err(BlockSmokeError::ConfigError(
                "Load command must not be empty".to_string(),
            ));
        }

        if self.settle.is_zero() {
            return Err(BlockSmokeError::ConfigError(
                "Settle interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the system-wide partitions inventory
    pub fn partitions_path(&self) -> PathBuf {
        self.proc_root.join("partitions")
    }

    /// Path of the system-wide disk statistics table
    pub fn diskstats_path(&self) -> PathBuf {
        self.proc_root.join("diskstats")
    }

    /// Path of the per-block-device sysfs directory listing
    pub fn sys_block_path(&self) -> PathBuf {
        self.sys_root.join("block")
    }

    /// Path of the per-device sysfs stat file
    pub fn sys_stat_path(&self) -> PathBuf {
        self.sys_block_path().join(&self.device).join("stat")
    }

    /// Path of the raw device node handed to the load generator
    pub fn device_path(&self) -> PathBuf {
        self.dev_root.join(&self.device)
    }
}
