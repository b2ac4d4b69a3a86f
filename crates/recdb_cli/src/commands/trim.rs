//! Trim command implementation.

use recdb_core::{Store, StoreConfig, TrimOutcome};

/// Runs the trim command.
pub fn run(config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;
    let health = store.check_all()?;
    let outcomes = store.repair_all()?;

    for (file, outcome) in health.iter().zip(&outcomes) {
        match outcome {
            TrimOutcome::Clean { size } => {
                println!("  {}: aligned ({size} bytes)", file.path.display());
            }
            TrimOutcome::Trimmed {
                kept,
                removed,
                backup,
                backup_created,
            } => {
                println!(
                    "  {}: kept {kept} bytes, removed {removed}",
                    file.path.display()
                );
                let note = if *backup_created { "created" } else { "reused" };
                println!("      backup {note}: {}", backup.display());
            }
        }
    }

    let trimmed = outcomes.iter().filter(|o| o.was_trimmed()).count();
    println!();
    println!("✓ Trimmed {trimmed} file(s)");
    Ok(())
}
