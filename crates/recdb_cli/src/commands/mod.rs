//! CLI command implementations.

pub mod add;
pub mod check;
pub mod delete;
pub mod init;
pub mod migrate;
pub mod report;
pub mod summary;
pub mod trim;
pub mod update;
pub mod view;

pub use add::NewRecord;
pub use update::RecordUpdate;

use clap::ValueEnum;
use recdb_codec::Record;
use std::fmt;
use thiserror::Error;

/// Record type selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    /// Students file.
    Student,
    /// Courses file.
    Course,
    /// Enrollments file.
    Enrollment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Student => "Student",
            Entity::Course => "Course",
            Entity::Enrollment => "Enrollment",
        };
        f.write_str(name)
    }
}

/// Failures reported by CLI commands on top of store errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// No live record has the key.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Record type searched.
        entity: Entity,
        /// Key searched for.
        key: u32,
    },

    /// A filter named a field the record does not have.
    #[error("unknown field '{field}' (expected one of: {expected})")]
    UnknownField {
        /// Field requested.
        field: String,
        /// Valid field names.
        expected: String,
    },

    /// One or more files do not end on a record boundary.
    #[error("{count} file(s) failed the integrity check; run `recdb trim` to repair")]
    Unhealthy {
        /// Number of unhealthy files.
        count: usize,
    },
}

/// Renders a record as `Name=value | ...`.
pub(crate) fn describe<R: Record>(record: &R) -> String {
    R::FIELD_NAMES
        .iter()
        .zip(record.values())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use recdb_core::{Enrollment, Student};

    #[test]
    fn describe_lists_every_field() {
        assert_eq!(
            describe(&Student::new(1001, "Somchai Dee", 1, "Computer Science")),
            "ID=1001 | Name=Somchai Dee | Year=1 | Major=Computer Science"
        );
        assert_eq!(
            describe(&Enrollment::new(30001, 1001, 2001, "A")),
            "EID=30001 | StuID=1001 | CourseID=2001 | Grade=A"
        );
    }

    #[test]
    fn not_found_message() {
        let err = CliError::NotFound {
            entity: Entity::Course,
            key: 9,
        };
        assert_eq!(err.to_string(), "Course 9 not found");
    }
}
