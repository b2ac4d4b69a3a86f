//! Update command implementation.
//!
//! Unspecified fields keep their current values. The replacement is
//! written over the first live record with the given key.

use super::{describe, CliError, Entity};
use clap::Subcommand;
use recdb_codec::Record;
use recdb_core::{RecordFile, Store, StoreConfig};

/// Replacement values for an existing record.
#[derive(Debug, Subcommand)]
pub enum RecordUpdate {
    /// Update a student
    Student {
        /// ID of the student to update
        key: u32,
        /// New student ID
        #[arg(long)]
        id: Option<u32>,
        /// New full name
        #[arg(long)]
        name: Option<String>,
        /// New year of study
        #[arg(long)]
        year: Option<u32>,
        /// New major
        #[arg(long)]
        major: Option<String>,
    },
    /// Update a course
    Course {
        /// ID of the course to update
        key: u32,
        /// New course ID
        #[arg(long)]
        id: Option<u32>,
        /// New course name
        #[arg(long)]
        name: Option<String>,
        /// New credits
        #[arg(long)]
        credit: Option<u32>,
    },
    /// Update an enrollment
    Enrollment {
        /// ID of the enrollment to update
        key: u32,
        /// New enrollment ID
        #[arg(long)]
        id: Option<u32>,
        /// New student ID
        #[arg(long)]
        student_id: Option<u32>,
        /// New course ID
        #[arg(long)]
        course_id: Option<u32>,
        /// New grade
        #[arg(long)]
        grade: Option<String>,
    },
}

/// Runs the update command.
pub fn run(config: StoreConfig, update: RecordUpdate) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open(config)?;

    match update {
        RecordUpdate::Student {
            key,
            id,
            name,
            year,
            major,
        } => apply(store.students_mut(), Entity::Student, key, |s| {
            s.id = id.unwrap_or(s.id);
            s.year = year.unwrap_or(s.year);
            if let Some(name) = name {
                s.name = name;
            }
            if let Some(major) = major {
                s.major = major;
            }
        }),
        RecordUpdate::Course {
            key,
            id,
            name,
            credit,
        } => apply(store.courses_mut(), Entity::Course, key, |c| {
            c.id = id.unwrap_or(c.id);
            c.credit = credit.unwrap_or(c.credit);
            if let Some(name) = name {
                c.name = name;
            }
        }),
        RecordUpdate::Enrollment {
            key,
            id,
            student_id,
            course_id,
            grade,
        } => apply(store.enrollments_mut(), Entity::Enrollment, key, |e| {
            e.id = id.unwrap_or(e.id);
            e.student_id = student_id.unwrap_or(e.student_id);
            e.course_id = course_id.unwrap_or(e.course_id);
            if let Some(grade) = grade {
                e.grade = grade;
            }
        }),
    }
}

fn apply<R: Record>(
    file: &mut RecordFile<R>,
    entity: Entity,
    key: u32,
    edit: impl FnOnce(&mut R),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut record) = file
        .find_by_key(key)?
        .ok_or(CliError::NotFound { entity, key })?;
    println!("Found:   {}", describe(&record));

    edit(&mut record);
    if !file.overwrite_by_key(0, key, &record)? {
        return Err(CliError::NotFound { entity, key }.into());
    }

    println!("Updated: {}", describe(&record));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recdb_testkit::TestStore;

    #[test]
    fn unspecified_fields_are_kept() {
        let store = TestStore::sample();
        let update = RecordUpdate::Student {
            key: 1003,
            id: None,
            name: None,
            year: Some(4),
            major: None,
        };

        run(store.config().clone(), update).unwrap();

        let (slot, s) = store.students().find_by_key(1003).unwrap().unwrap();
        assert_eq!(slot, 2);
        assert_eq!(s.year, 4);
        assert_eq!(s.name, "Janpen Rungruang");
        assert_eq!(s.major, "Computer Science");
    }

    #[test]
    fn missing_key_is_an_error() {
        let store = TestStore::sample();
        let update = RecordUpdate::Course {
            key: 9999,
            id: None,
            name: Some("x".into()),
            credit: None,
        };
        assert!(run(store.config().clone(), update).is_err());
    }
}
