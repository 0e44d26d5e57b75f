//! Counter snapshot collection
//!
//! Captures immutable byte-sequence snapshots of the two counter
//! sources: the device's line in `/proc/diskstats` and the full
//! contents of `/sys/block/<disk>/stat`. Snapshots are compared
//! byte-for-byte; the fields are never parsed.

use std::fs;

use crate::config::CheckConfig;
use crate::util::words::first_line_with_word;
use crate::{BlockSmokeError, Result};

/// A before/after pair of snapshots from one counter source
#[derive(Debug, Clone)]
pub struct SnapshotPair {
    /// Snapshot taken before the load step
    pub before: Vec<u8>,
    /// Snapshot taken after the load step and the settle interval
    pub after: Vec<u8>,
}

impl SnapshotPair {
    /// Create a pair from its two captures
    pub fn new(before: Vec<u8>, after: Vec<u8>) -> Self {
        Self { before, after }
    }

    /// Whether the source moved between the two captures
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Capture the device's first whole-word matching line from the
/// system-wide disk statistics table
pub fn diskstats_snapshot(config: &CheckConfig) -> Result<Vec<u8>> {
    let path = config.diskstats_path();
    let text = fs::read_to_string(&path).map_err(|err| {
        BlockSmokeError::SnapshotError(format!("cannot read {}: {}", path.display(), err))
    })?;

    first_line_with_word(&text, &config.device)
        .map(|line| line.as_bytes().to_vec())
        .ok_or_else(|| {
            BlockSmokeError::SnapshotError(format!(
                "no line for {} in {}",
                config.device,
                path.display()
            ))
        })
}

/// Capture the full contents of the per-device sysfs stat file
pub fn sys_stat_snapshot(config: &CheckConfig) -> Result<Vec<u8>> {
    let path = config.sys_stat_path();
    fs::read(&path).map_err(|err| {
        BlockSmokeError::SnapshotError(format!("cannot read {}: {}", path.display(), err))
    })
}

/// Check that the per-device sysfs stat file exists and is non-empty
/// (a `test -s` style guard)
pub fn sys_stat_available(config: &CheckConfig) -> bool {
    fs::metadata(config.sys_stat_path())
        .map(|meta| meta.len() > 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const DISKSTATS: &str = "   8       0 sda 100 0 2000 30 0 0 0 0 0 40 30\n\
   8       1 sda1 90 0 1800 25 0 0 0 0 0 35 25\n\
 259       0 nvme0n1 7 0 56 1 0 0 0 0 0 2 1\n";

    fn fixture_config(dir: &Path, device: &str) -> CheckConfig {
        CheckConfig::new(device)
            .with_proc_root(dir.join("proc"))
            .with_sys_root(dir.join("sys"))
    }

    fn write_fixture(dir: &Path, device: &str, stat: &[u8]) {
        fs::create_dir_all(dir.join("proc")).unwrap();
        fs::write(dir.join("proc/diskstats"), DISKSTATS).unwrap();
        let block = dir.join("sys/block").join(device);
        fs::create_dir_all(&block).unwrap();
        fs::write(block.join("stat"), stat).unwrap();
    }

    #[test]
    fn test_diskstats_snapshot_first_match() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "sda", b"1 2 3\n");

        let config = fixture_config(tmp.path(), "sda");
        let snap = diskstats_snapshot(&config).unwrap();
        let line = String::from_utf8(snap).unwrap();
        assert!(line.contains("sda"));
        assert!(line.contains("2000"));
        assert!(!line.contains("sda1"));
    }

    #[test]
    fn test_diskstats_snapshot_missing_device() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "sda", b"1 2 3\n");

        let config = fixture_config(tmp.path(), "vdz");
        let err = diskstats_snapshot(&config).unwrap_err();
        assert!(matches!(err, BlockSmokeError::SnapshotError(_)));
    }

    #[test]
    fn test_sys_stat_snapshot_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let contents = b"  941  153 46060  320    0    0    0    0\n";
        write_fixture(tmp.path(), "sda", contents);

        let config = fixture_config(tmp.path(), "sda");
        assert_eq!(sys_stat_snapshot(&config).unwrap(), contents.to_vec());
    }

    #[test]
    fn test_sys_stat_snapshot_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = fixture_config(tmp.path(), "sda");
        assert!(sys_stat_snapshot(&config).is_err());
    }

    #[test]
    fn test_sys_stat_available() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "sda", b"1 2 3\n");

        assert!(sys_stat_available(&fixture_config(tmp.path(), "sda")));
        assert!(!sys_stat_available(&fixture_config(tmp.path(), "sdb")));

        write_fixture(tmp.path(), "sdc", b"");
        assert!(!sys_stat_available(&fixture_config(tmp.path(), "sdc")));
    }

    #[test]
    fn test_snapshot_pair_changed() {
        let same = SnapshotPair::new(b"abc".to_vec(), b"abc".to_vec());
        assert!(!same.changed());

        let moved = SnapshotPair::new(b"abc".to_vec(), b"abd".to_vec());
        assert!(moved.changed());
    }
}
