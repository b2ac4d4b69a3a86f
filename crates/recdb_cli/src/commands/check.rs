//! Check command implementation.

use super::CliError;
use recdb_core::{FileHealth, Store, StoreConfig, TRIM_BACKUP_SUFFIX};
use recdb_storage::backup_path;

/// Runs the check command.
///
/// Fails if any file has a torn tail.
pub fn run(config: StoreConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;
    let health = store.check_all()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        _ => {
            println!("Checking record files in {}", store.config().data_dir.display());
            println!();
            for file in &health {
                print_health(file);
            }
            println!();
        }
    }

    let unhealthy = health.iter().filter(|h| !h.is_healthy()).count();
    if unhealthy == 0 {
        if format != "json" {
            println!("✓ All files aligned");
        }
        Ok(())
    } else {
        Err(CliError::Unhealthy { count: unhealthy }.into())
    }
}

fn print_health(health: &FileHealth) {
    let name = health
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !health.exists {
        println!("  {name}: missing (0 records)");
        return;
    }

    let mark = if health.is_healthy() { "✓" } else { "✗" };
    println!(
        "  {mark} {name}: {} bytes, {} records of {} bytes",
        health.size, health.complete_records, health.record_size
    );
    if !health.is_healthy() {
        println!("      {} trailing bytes from an interrupted write", health.torn_bytes);
    }

    let backup = backup_path(&health.path, TRIM_BACKUP_SUFFIX);
    if backup.exists() {
        println!("      backup present: {}", backup.display());
    }
}
