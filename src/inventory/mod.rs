//! Kernel inventory checks
//!
//! Confirms the device under test is visible in the three standard
//! kernel listings: `/proc/partitions`, `/proc/diskstats` and
//! `/sys/block`. Each check only answers "listed or not"; recording
//! failures and carrying on is the session's job.

use std::fs;

use crate::config::CheckConfig;
use crate::util::words::{contains_word, first_line_with_word};
use crate::Result;

/// Check whether the device is listed as a whole word in the
/// partitions inventory
pub fn device_in_partitions(config: &CheckConfig) -> Result<bool> {
    let text = fs::read_to_string(config.partitions_path())?;
    Ok(text.lines().any(|line| contains_word(line, &config.device)))
}

/// Check whether the device has a whole-word line in the system-wide
/// disk statistics table
pub fn device_in_diskstats(config: &CheckConfig) -> Result<bool> {
    let text = fs::read_to_string(config.diskstats_path())?;
    Ok(first_line_with_word(&text, &config.device).is_some())
}

/// Check whether an entry whose name contains the device exists under
/// the sysfs block directory (`ls /sys/block/*<dev>*` glob semantics)
pub fn device_in_sys_block(config: &CheckConfig) -> Result<bool> {
    let entries = fs::read_dir(config.sys_block_path())?;
    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().contains(&config.device) {
            return Ok(true);
        }
    }
    Ok(false)
}
