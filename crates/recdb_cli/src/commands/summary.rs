//! Summary command implementation.

use recdb_core::{FileCounts, Store, StoreConfig};

/// Runs the summary command.
pub fn run(config: StoreConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;
    let summary = store.summary()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!(
                "Students={}, Courses={}, Enrollments={}",
                summary.students.slots, summary.courses.slots, summary.enrollments.slots
            );
            print_counts("Students", summary.students);
            print_counts("Courses", summary.courses);
            print_counts("Enrollments", summary.enrollments);
        }
    }

    Ok(())
}

fn print_counts(label: &str, counts: FileCounts) {
    println!(
        "  {label:<12} {} live, {} deleted",
        counts.live,
        counts.slots - counts.live
    );
}
