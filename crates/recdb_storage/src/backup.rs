//! Backup-then-rewrite primitive.
//!
//! Both repair (trim) and schema migration replace a file's contents with a
//! transformed copy of its old bytes. They share one protocol:
//!
//! 1. Derive `<source><suffix>` as the backup path.
//! 2. If no backup exists yet, rename `source` to it. An existing backup is
//!    never overwritten, so the bytes from the first rewrite survive any
//!    later attempt.
//! 3. Stream the backup through a transform into `target`, created from
//!    scratch.
//!
//! Backups are never deleted automatically.

use crate::error::StorageError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a guarded rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome<T> {
    /// Path of the backup the target was rebuilt from.
    pub backup: PathBuf,
    /// Whether this call created the backup (false if it already existed).
    pub backup_created: bool,
    /// Value returned by the transform.
    pub value: T,
}

/// Returns `path` with `suffix` appended to its file name.
///
/// ```
/// use recdb_storage::backup_path;
/// use std::path::Path;
///
/// assert_eq!(backup_path(Path::new("data/students.dat"), ".bak"),
///            Path::new("data/students.dat.bak"));
/// ```
#[must_use]
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Backs up `source` (once) and rebuilds `target` from the backup.
///
/// `transform` receives a buffered reader over the backup and a buffered
/// writer over a freshly truncated `target`. `source` and `target` may be
/// the same path.
///
/// The transform's error type only needs to absorb [`StorageError`], so
/// callers can surface their own decoding errors through it.
///
/// # Errors
///
/// Returns an error if the rename, open, transform or flush fails. If
/// `source` does not exist and there is no backup either, the rename fails
/// with `NotFound`.
pub fn guarded_rewrite<T, E, F>(
    source: &Path,
    suffix: &str,
    target: &Path,
    transform: F,
) -> Result<RewriteOutcome<T>, E>
where
    F: FnOnce(&mut dyn Read, &mut dyn Write) -> Result<T, E>,
    E: From<StorageError>,
{
    let backup = backup_path(source, suffix);
    let backup_created = if backup.exists() {
        false
    } else {
        fs::rename(source, &backup).map_err(StorageError::from)?;
        info!(source = %source.display(), backup = %backup.display(), "created backup");
        true
    };

    let mut reader = BufReader::new(File::open(&backup).map_err(StorageError::from)?);
    let mut writer = BufWriter::new(File::create(target).map_err(StorageError::from)?);

    let value = transform(&mut reader as &mut dyn Read, &mut writer as &mut dyn Write)?;

    let file = writer
        .into_inner()
        .map_err(|e| StorageError::from(e.into_error()))?;
    file.sync_all().map_err(StorageError::from)?;

    Ok(RewriteOutcome {
        backup,
        backup_created,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageResult;
    use std::io;
    use tempfile::tempdir;

    fn copy_upper(reader: &mut dyn Read, writer: &mut dyn Write) -> StorageResult<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        data.make_ascii_uppercase();
        writer.write_all(&data)?;
        Ok(data.len())
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("students.dat"), ".bak_migrate"),
            PathBuf::from("students.dat.bak_migrate")
        );
    }

    #[test]
    fn rewrite_in_place_creates_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.dat");
        fs::write(&path, b"abc").unwrap();

        let outcome = guarded_rewrite(&path, ".bak", &path, copy_upper).unwrap();

        assert!(outcome.backup_created);
        assert_eq!(outcome.value, 3);
        assert_eq!(fs::read(&path).unwrap(), b"ABC");
        assert_eq!(fs::read(&outcome.backup).unwrap(), b"abc");
    }

    #[test]
    fn existing_backup_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.dat");
        let bak = backup_path(&path, ".bak");
        fs::write(&bak, b"first").unwrap();
        fs::write(&path, b"second").unwrap();

        let outcome = guarded_rewrite(&path, ".bak", &path, copy_upper).unwrap();

        assert!(!outcome.backup_created);
        assert_eq!(fs::read(&bak).unwrap(), b"first");
        assert_eq!(fs::read(&path).unwrap(), b"FIRST");
    }

    #[test]
    fn rewrite_to_separate_target_replaces_its_content() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("old.dat");
        let target = dir.path().join("new.dat");
        fs::write(&source, b"xy").unwrap();
        fs::write(&target, b"stale stale stale").unwrap();

        guarded_rewrite(&source, ".bak_migrate", &target, copy_upper).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), b"XY");
    }

    #[test]
    fn missing_source_without_backup_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.dat");

        let err = guarded_rewrite(&path, ".bak", &path, copy_upper).unwrap_err();
        match err {
            crate::StorageError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }
}
