//! Store configuration.

use std::path::{Path, PathBuf};

/// Default name of the students file.
pub const STUDENTS_FILE: &str = "students.dat";
/// Default name of the courses file.
pub const COURSES_FILE: &str = "courses.dat";
/// Default name of the enrollments file.
pub const ENROLLMENTS_FILE: &str = "enrollments.dat";
/// Default name of a students file still in the legacy layout.
pub const LEGACY_STUDENTS_FILE: &str = "students_v1.dat";
/// Default name of the rendered report.
pub const REPORT_FILE: &str = "report.txt";
/// Major assigned to students migrated from the legacy layout.
pub const DEFAULT_MAJOR: &str = "Undeclared";

/// Configuration for opening a store.
///
/// All paths are resolved against `data_dir`. Nothing here is global: each
/// [`crate::Store`] carries its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the record files.
    pub data_dir: PathBuf,

    /// File name of the students file.
    pub students_file: String,

    /// File name of the courses file.
    pub courses_file: String,

    /// File name of the enrollments file.
    pub enrollments_file: String,

    /// File name of a students file in the legacy (id, name, year) layout.
    pub legacy_students_file: String,

    /// File name of the rendered report.
    pub report_file: String,

    /// Major given to students when migrating from the legacy layout.
    pub default_major: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            students_file: STUDENTS_FILE.to_string(),
            courses_file: COURSES_FILE.to_string(),
            enrollments_file: ENROLLMENTS_FILE.to_string(),
            legacy_students_file: LEGACY_STUDENTS_FILE.to_string(),
            report_file: REPORT_FILE.to_string(),
            default_major: DEFAULT_MAJOR.to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default file names in `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Sets the students file name.
    #[must_use]
    pub fn students_file(mut self, name: impl Into<String>) -> Self {
        self.students_file = name.into();
        self
    }

    /// Sets the legacy students file name.
    #[must_use]
    pub fn legacy_students_file(mut self, name: impl Into<String>) -> Self {
        self.legacy_students_file = name.into();
        self
    }

    /// Sets the report file name.
    #[must_use]
    pub fn report_file(mut self, name: impl Into<String>) -> Self {
        self.report_file = name.into();
        self
    }

    /// Sets the default major used by legacy migration.
    #[must_use]
    pub fn default_major(mut self, major: impl Into<String>) -> Self {
        self.default_major = major.into();
        self
    }

    /// Full path of the students file.
    #[must_use]
    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(&self.students_file)
    }

    /// Full path of the courses file.
    #[must_use]
    pub fn courses_path(&self) -> PathBuf {
        self.data_dir.join(&self.courses_file)
    }

    /// Full path of the enrollments file.
    #[must_use]
    pub fn enrollments_path(&self) -> PathBuf {
        self.data_dir.join(&self.enrollments_file)
    }

    /// Full path of the legacy students file.
    #[must_use]
    pub fn legacy_students_path(&self) -> PathBuf {
        self.data_dir.join(&self.legacy_students_file)
    }

    /// Full path of the report.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.report_file)
    }
}
