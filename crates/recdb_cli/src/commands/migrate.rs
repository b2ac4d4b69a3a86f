//! Migrate command implementation.

use recdb_core::{Store, StoreConfig};
use std::path::Path;
use tracing::info;

/// Runs the migrate command.
///
/// Migrates `from` (or the configured legacy file) into the students file.
pub fn run(
    config: StoreConfig,
    from: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;
    let source = from.map_or_else(|| store.config().legacy_students_path(), Path::to_path_buf);
    info!(
        source = %source.display(),
        major = %store.config().default_major,
        "migrating students"
    );

    let report = store.migrate_students_from(&source)?;

    let Some(backup) = report.backup else {
        println!("Nothing to migrate: {} not found", source.display());
        return Ok(());
    };

    println!(
        "✓ Migrated {} records to {}",
        report.migrated,
        store.config().students_path().display()
    );
    if report.dropped_tail_bytes > 0 {
        println!(
            "  Dropped {} trailing bytes of an incomplete record",
            report.dropped_tail_bytes
        );
    }
    let note = if report.backup_created { "created" } else { "reused" };
    println!("  Backup {note}: {}", backup.display());
    Ok(())
}
