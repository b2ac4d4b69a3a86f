//! Truncation repair for torn record files.
//!
//! Repair never edits a file in place. The torn file is renamed to
//! `<name>.bak` (only if that backup does not already exist) and the
//! active file is rebuilt from the backup's record-aligned prefix. The
//! backup keeps the full untrimmed bytes and is never deleted.

use crate::error::{CoreError, CoreResult};
use recdb_storage::{guarded_rewrite, FileBackend, StorageBackend};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix of the backup written before trimming.
pub const TRIM_BACKUP_SUFFIX: &str = ".bak";

/// What [`trim`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    /// The file was missing or already aligned; nothing was touched.
    Clean {
        /// File length in bytes.
        size: u64,
    },
    /// The file was rebuilt without its torn tail.
    Trimmed {
        /// Bytes in the rebuilt active file.
        kept: u64,
        /// Bytes dropped from the active file.
        removed: u64,
        /// Backup holding the untrimmed bytes.
        backup: PathBuf,
        /// Whether this call created the backup.
        backup_created: bool,
    },
}

impl TrimOutcome {
    /// Whether the file was rewritten.
    #[must_use]
    pub fn was_trimmed(&self) -> bool {
        matches!(self, TrimOutcome::Trimmed { .. })
    }
}

/// Cuts `path` back to its last complete `record_size` boundary.
///
/// If an earlier trim already left a backup, that backup is reused as the
/// source and left untouched, so repeated calls converge on the same
/// active-file bytes.
///
/// # Errors
///
/// Returns an error for a zero record size or if any file operation fails.
pub fn trim(path: &Path, record_size: usize) -> CoreResult<TrimOutcome> {
    if record_size == 0 {
        return Err(CoreError::InvalidRecordSize { size: record_size });
    }

    let size = FileBackend::new(path).size()?;
    let rs = record_size as u64;
    let keep = size / rs * rs;
    if keep == size {
        return Ok(TrimOutcome::Clean { size });
    }

    let outcome = guarded_rewrite(
        path,
        TRIM_BACKUP_SUFFIX,
        path,
        |reader, writer| -> CoreResult<u64> {
            let mut prefix = Vec::with_capacity(keep as usize);
            reader.take(keep).read_to_end(&mut prefix)?;
            prefix.truncate(prefix.len() / record_size * record_size);
            writer.write_all(&prefix)?;
            Ok(prefix.len() as u64)
        },
    )?;

    let kept = outcome.value;
    info!(
        path = %path.display(),
        kept,
        removed = size - kept,
        backup = %outcome.backup.display(),
        "trimmed torn tail"
    );

    Ok(TrimOutcome::Trimmed {
        kept,
        removed: size - kept,
        backup: outcome.backup,
        backup_created: outcome.backup_created,
    })
}
