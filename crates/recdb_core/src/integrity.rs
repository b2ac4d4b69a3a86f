//! Read-only file integrity checks.
//!
//! A record file is healthy when its length is an exact multiple of its
//! record size. Anything else means an append was interrupted part-way.
//! A missing file is healthy: it holds zero records.

use crate::error::{CoreError, CoreResult};
use recdb_storage::{FileBackend, StorageBackend};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Shape of a record file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHealth {
    /// File inspected.
    pub path: PathBuf,
    /// Whether the file exists.
    pub exists: bool,
    /// File length in bytes (0 if missing).
    pub size: u64,
    /// Record size the file was checked against.
    pub record_size: usize,
    /// Number of complete slots.
    pub complete_records: u64,
    /// Bytes past the last complete slot.
    pub torn_bytes: u64,
}

impl FileHealth {
    /// Whether the file ends on a record boundary.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.torn_bytes == 0
    }
}

/// Inspects `path` against `record_size` without modifying it.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRecordSize`] for a zero record size, or an
/// error if the file's metadata cannot be read.
pub fn inspect(path: &Path, record_size: usize) -> CoreResult<FileHealth> {
    if record_size == 0 {
        return Err(CoreError::InvalidRecordSize { size: record_size });
    }

    let size = FileBackend::new(path).size()?;
    let rs = record_size as u64;
    let health = FileHealth {
        path: path.to_path_buf(),
        exists: path.exists(),
        size,
        record_size,
        complete_records: size / rs,
        torn_bytes: size % rs,
    };

    if !health.is_healthy() {
        warn!(
            path = %path.display(),
            size,
            record_size,
            "file size is not a multiple of the record size"
        );
    }

    Ok(health)
}

/// Returns whether `path` is a whole number of `record_size` records.
///
/// # Errors
///
/// See [`inspect`].
pub fn check(path: &Path, record_size: usize) -> CoreResult<bool> {
    Ok(inspect(path, record_size)?.is_healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_healthy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("none.dat");

        assert!(check(&path, 88).unwrap());
        let health = inspect(&path, 88).unwrap();
        assert!(!health.exists);
        assert_eq!(health.size, 0);
    }

    #[test]
    fn empty_file_is_healthy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.dat");
        fs::write(&path, b"").unwrap();
        assert!(check(&path, 22).unwrap());
    }

    #[test]
    fn aligned_file_is_healthy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.dat");
        fs::write(&path, vec![1u8; 22 * 3]).unwrap();

        let health = inspect(&path, 22).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.complete_records, 3);
    }

    #[test]
    fn torn_file_is_unhealthy_and_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("torn.dat");
        let bytes = vec![7u8; 88 * 2 + 40];
        fs::write(&path, &bytes).unwrap();

        assert!(!check(&path, 88).unwrap());
        let health = inspect(&path, 88).unwrap();
        assert_eq!(health.complete_records, 2);
        assert_eq!(health.torn_bytes, 40);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn zero_record_size_is_rejected() {
        let dir = tempdir().unwrap();
        let result = check(&dir.path().join("x.dat"), 0);
        assert!(matches!(result, Err(CoreError::InvalidRecordSize { size: 0 })));
    }
}
