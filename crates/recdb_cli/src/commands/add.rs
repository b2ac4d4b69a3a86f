//! Add command implementation.

use super::describe;
use clap::Subcommand;
use recdb_codec::Record;
use recdb_core::{Course, Enrollment, RecordFile, Store, StoreConfig, Student};
use tracing::warn;

/// A record to append.
#[derive(Debug, Subcommand)]
pub enum NewRecord {
    /// Append a student
    Student {
        /// Student ID
        id: u32,
        /// Full name (truncated to 50 bytes)
        name: String,
        /// Year of study
        year: u32,
        /// Major (truncated to 30 bytes)
        major: String,
    },
    /// Append a course
    Course {
        /// Course ID
        id: u32,
        /// Course name (truncated to 50 bytes)
        name: String,
        /// Credits
        credit: u32,
    },
    /// Append an enrollment
    Enrollment {
        /// Enrollment ID
        id: u32,
        /// Enrolled student
        student_id: u32,
        /// Course enrolled in
        course_id: u32,
        /// Grade (truncated to 10 bytes; `W` marks a withdrawal)
        grade: String,
    },
}

/// Runs the add command.
pub fn run(config: StoreConfig, record: NewRecord) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open(config)?;

    let slot = match record {
        NewRecord::Student {
            id,
            name,
            year,
            major,
        } => append(
            store.students_mut(),
            &Student::new(id, name, year, major),
        )?,
        NewRecord::Course { id, name, credit } => {
            append(store.courses_mut(), &Course::new(id, name, credit))?
        }
        NewRecord::Enrollment {
            id,
            student_id,
            course_id,
            grade,
        } => append(
            store.enrollments_mut(),
            &Enrollment::new(id, student_id, course_id, grade),
        )?,
    };

    println!("✓ Added at slot {slot}");
    Ok(())
}

/// Appends `record`, warning if its key is already live.
fn append<R: Record>(
    file: &mut RecordFile<R>,
    record: &R,
) -> Result<u64, Box<dyn std::error::Error>> {
    let key = record.primary_key();
    if key == 0 {
        warn!("key 0 marks a deleted slot; the record will not be visible");
    } else if let Some((slot, existing)) = file.find_by_key(key)? {
        warn!(
            key,
            slot,
            "key already in use; updates and deletes will hit the earlier record"
        );
        println!("Existing: [{slot}] {}", describe(&existing));
    }
    Ok(file.append(record)?)
}
