//! blocksmoke - Block Device Stats Smoke Test
//!
//! A diagnostic tool that confirms a block device's kernel-exposed
//! statistics (`/proc/diskstats`, `/sys/block/<disk>/stat`) update after
//! driving I/O with an external benchmark, and that the device appears
//! in the standard kernel inventories.

use std::fmt;

// Public re-exports
pub mod config;
pub mod inventory;
pub mod load;
pub mod models;
pub mod session;
pub mod stats;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BlockSmokeError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation error
    ConfigError(String),
    /// A counter source was missing or unreadable at capture time
    SnapshotError(String),
    /// The load-generator command could not be spawned
    LoadError(String),
}

impl fmt::Display for BlockSmokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSmokeError::IoError(err) => write!(f, "I/O error: {}", err),
            BlockSmokeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BlockSmokeError::SnapshotError(msg) => write!(f, "Snapshot error: {}", msg),
            BlockSmokeError::LoadError(msg) => write!(f, "Load generation error: {}", msg),
        }
    }
}

impl std::error::Error for BlockSmokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlockSmokeError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlockSmokeError {
    fn from(err: std::io::Error) -> Self {
        BlockSmokeError::IoError(err)
    }
}

/// Result type alias for blocksmoke operations
pub type Result<T> = std::result::Result<T, BlockSmokeError>;

// Common types and constants
pub const APP_NAME: &str = "blocksmoke";
pub const DEFAULT_DEVICE: &str = "sda";
pub const DEFAULT_SETTLE_SECS: u64 = 5;
pub const NVDIMM_MARKER: &str = "pmem";
