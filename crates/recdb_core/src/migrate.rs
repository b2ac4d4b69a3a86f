//! One-shot schema migration for fixed layouts.
//!
//! A migration extends a layout by one trailing field. The source file is
//! renamed to `<name>.bak_migrate` (once), then streamed in old-layout
//! chunks; each complete record is re-encoded under the new layout with a
//! caller-supplied default for the added field and written to the target,
//! which is rebuilt from scratch.
//!
//! A trailing partial record in the source ends the migration quietly:
//! records already written stay valid.
//!
//! Two guards keep a misdirected run from losing data. A source whose size
//! fits the new record size but not the old one is refused as already
//! migrated. A re-run with an existing backup only rebuilds the target if
//! the target still holds what the backup migrates to (or a prefix of it,
//! left by an interrupted run); otherwise it fails with
//! [`CoreError::MigrationConflict`].

use crate::entity::{LegacyStudent, Student};
use crate::error::{CoreError, CoreResult};
use recdb_codec::{Layout, Value};
use recdb_storage::{backup_path, guarded_rewrite};
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Suffix of the backup written before migrating.
pub const MIGRATE_BACKUP_SUFFIX: &str = ".bak_migrate";

/// Summary of a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MigrationReport {
    /// Number of records written under the new layout.
    pub migrated: usize,
    /// Bytes of a trailing partial record that were not migrated.
    pub dropped_tail_bytes: usize,
    /// Backup the records were read from; `None` if there was no source.
    pub backup: Option<PathBuf>,
    /// Whether this run created the backup.
    pub backup_created: bool,
}

/// Reads until `buf` is full or the reader is exhausted.
fn read_chunk(reader: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Re-encodes every complete old-layout record from `reader` into `writer`.
///
/// Returns the number of records written and the length of a trailing
/// partial record.
fn convert(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    old_layout: &Layout,
    new_layout: &Layout,
    default: &Value,
) -> CoreResult<(usize, usize)> {
    let old_size = old_layout.record_size();
    let mut chunk = vec![0u8; old_size];
    let mut migrated = 0;
    loop {
        let n = read_chunk(reader, &mut chunk)?;
        if n == 0 {
            return Ok((migrated, 0));
        }
        if n < old_size {
            return Ok((migrated, n));
        }
        let mut row = old_layout.decode_row(&chunk)?;
        row.push(default.clone());
        writer.write_all(&new_layout.encode_row(&row)?)?;
        migrated += 1;
    }
}

/// Whether `target` holds what migrating `backup` produces, or a prefix
/// of it.
fn target_matches_backup(
    backup: &Path,
    target: &Path,
    old_layout: &Layout,
    new_layout: &Layout,
    default: &Value,
) -> CoreResult<bool> {
    let mut reader = BufReader::new(File::open(backup)?);
    let mut expected = Vec::new();
    convert(&mut reader, &mut expected, old_layout, new_layout, default)?;
    let current = fs::read(target)?;
    Ok(expected.starts_with(&current))
}

/// Migrates `old_path` (in `old_layout`) into `new_path` (in `new_layout`).
///
/// `new_layout` must be `old_layout` plus exactly one trailing field, and
/// `default` must fit that field. With neither `old_path` nor its backup
/// present this is a no-op. If a backup from an earlier run exists, it is
/// the source and is left as is.
///
/// # Errors
///
/// Returns [`CoreError::LayoutMismatch`] before touching any file if the
/// layouts or default do not line up, or if `old_path` is sized like a
/// new-layout file. Returns [`CoreError::MigrationConflict`] if a backup
/// exists and `new_path` was modified after the earlier run. Propagates
/// I/O failures.
pub fn migrate(
    old_path: &Path,
    old_layout: &Layout,
    new_path: &Path,
    new_layout: &Layout,
    default: &Value,
) -> CoreResult<MigrationReport> {
    let added = new_layout.added_field_over(old_layout).ok_or_else(|| {
        CoreError::layout_mismatch("new layout must extend the old layout by one trailing field")
    })?;
    if !added.kind.accepts(default) {
        return Err(CoreError::layout_mismatch(format!(
            "default {default:?} does not fit field '{}'",
            added.name
        )));
    }

    let backup = backup_path(old_path, MIGRATE_BACKUP_SUFFIX);
    if backup.exists() {
        if new_path.exists()
            && !target_matches_backup(&backup, new_path, old_layout, new_layout, default)?
        {
            warn!(
                target = %new_path.display(),
                backup = %backup.display(),
                "target changed since the last migration"
            );
            return Err(CoreError::MigrationConflict {
                target: new_path.to_path_buf(),
                backup,
            });
        }
    } else if old_path.exists() {
        let len = fs::metadata(old_path)?.len();
        let old_size = old_layout.record_size() as u64;
        let new_size = new_layout.record_size() as u64;
        if len % old_size != 0 && len % new_size == 0 {
            return Err(CoreError::layout_mismatch(format!(
                "{} holds {len} bytes, a whole number of {new_size}-byte records \
                 but not of {old_size}-byte ones; it looks migrated already",
                old_path.display()
            )));
        }
    } else {
        info!(path = %old_path.display(), "nothing to migrate");
        return Ok(MigrationReport::default());
    }

    let outcome = guarded_rewrite(old_path, MIGRATE_BACKUP_SUFFIX, new_path, |reader, writer| {
        convert(reader, writer, old_layout, new_layout, default)
    })?;

    let (migrated, dropped_tail_bytes) = outcome.value;
    if dropped_tail_bytes > 0 {
        warn!(
            backup = %outcome.backup.display(),
            bytes = dropped_tail_bytes,
            "stopped at incomplete record"
        );
    }
    info!(
        migrated,
        target = %new_path.display(),
        backup = %outcome.backup.display(),
        "migrated records"
    );

    Ok(MigrationReport {
        migrated,
        dropped_tail_bytes,
        backup: Some(outcome.backup),
        backup_created: outcome.backup_created,
    })
}

/// Migrates a legacy (id, name, year) student file to the current layout.
///
/// # Errors
///
/// See [`migrate`].
pub fn migrate_legacy_students(
    old_path: &Path,
    new_path: &Path,
    default_major: &str,
) -> CoreResult<MigrationReport> {
    migrate(
        old_path,
        &LegacyStudent::layout(),
        new_path,
        &Student::layout(),
        &Value::text(default_major),
    )
}
