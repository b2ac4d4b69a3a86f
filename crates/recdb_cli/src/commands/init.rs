//! Init command implementation.

use recdb_core::{Store, StoreConfig};

/// Runs the init command.
pub fn run(config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open(config)?;
    store.seed_sample()?;

    let summary = store.summary()?;
    println!("✓ Sample data written to {}", store.config().data_dir.display());
    println!("  Students:    {}", summary.students.live);
    println!("  Courses:     {}", summary.courses.live);
    println!("  Enrollments: {}", summary.enrollments.live);
    Ok(())
}
