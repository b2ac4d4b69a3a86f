//! The three-file academic records store.

use crate::config::StoreConfig;
use crate::entity::{Course, Enrollment, Student};
use crate::error::CoreResult;
use crate::file::RecordFile;
use crate::integrity::{inspect, FileHealth};
use crate::migrate::{migrate_legacy_students, MigrationReport};
use crate::repair::{trim, TrimOutcome};
use crate::sample;
use recdb_codec::Record;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Slot counts for one record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FileCounts {
    /// Complete slots, deleted ones included.
    pub slots: usize,
    /// Slots holding a live record.
    pub live: usize,
}

/// Slot counts for every file in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreSummary {
    /// Students file.
    pub students: FileCounts,
    /// Courses file.
    pub courses: FileCounts,
    /// Enrollments file.
    pub enrollments: FileCounts,
}

/// Students, courses and enrollments files under one data directory.
///
/// # Example
///
/// ```rust,no_run
/// use recdb_core::{Store, StoreConfig, Student};
///
/// let mut store = Store::open(StoreConfig::new("./data"))?;
/// store.students_mut().append(&Student::new(1001, "Somchai Dee", 1, "CS"))?;
/// for health in store.check_all()? {
///     println!("{}: {}", health.path.display(), health.is_healthy());
/// }
/// # Ok::<(), recdb_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    students: RecordFile<Student>,
    courses: RecordFile<Course>,
    enrollments: RecordFile<Enrollment>,
}

impl Store {
    /// Opens the store described by `config`, creating its data directory
    /// if needed. Record files themselves are created on first append.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: StoreConfig) -> CoreResult<Self> {
        fs::create_dir_all(&config.data_dir)?;
        info!(data_dir = %config.data_dir.display(), "opened store");
        Ok(Self {
            students: RecordFile::open(&config.students_path()),
            courses: RecordFile::open(&config.courses_path()),
            enrollments: RecordFile::open(&config.enrollments_path()),
            config,
        })
    }

    /// The configuration this store was opened with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The students file.
    #[must_use]
    pub fn students(&self) -> &RecordFile<Student> {
        &self.students
    }

    /// The students file, for writing.
    pub fn students_mut(&mut self) -> &mut RecordFile<Student> {
        &mut self.students
    }

    /// The courses file.
    #[must_use]
    pub fn courses(&self) -> &RecordFile<Course> {
        &self.courses
    }

    /// The courses file, for writing.
    pub fn courses_mut(&mut self) -> &mut RecordFile<Course> {
        &mut self.courses
    }

    /// The enrollments file.
    #[must_use]
    pub fn enrollments(&self) -> &RecordFile<Enrollment> {
        &self.enrollments
    }

    /// The enrollments file, for writing.
    pub fn enrollments_mut(&mut self) -> &mut RecordFile<Enrollment> {
        &mut self.enrollments
    }

    /// Health of the students, courses and enrollments files, in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file's metadata cannot be read.
    pub fn check_all(&self) -> CoreResult<Vec<FileHealth>> {
        Ok(vec![
            inspect(&self.config.students_path(), Student::SIZE)?,
            inspect(&self.config.courses_path(), Course::SIZE)?,
            inspect(&self.config.enrollments_path(), Enrollment::SIZE)?,
        ])
    }

    /// Trims every file, in the same order as [`Store::check_all`].
    ///
    /// Healthy files come back as [`TrimOutcome::Clean`] untouched.
    ///
    /// # Errors
    ///
    /// Returns the first repair failure.
    pub fn repair_all(&self) -> CoreResult<Vec<TrimOutcome>> {
        let outcomes = vec![
            trim(&self.config.students_path(), Student::SIZE)?,
            trim(&self.config.courses_path(), Course::SIZE)?,
            trim(&self.config.enrollments_path(), Enrollment::SIZE)?,
        ];
        let trimmed = outcomes.iter().filter(|o| o.was_trimmed()).count();
        info!(trimmed, "repair finished");
        Ok(outcomes)
    }

    /// Migrates the configured legacy students file into the students
    /// file, filling in the configured default major.
    ///
    /// # Errors
    ///
    /// See [`crate::migrate::migrate`].
    pub fn migrate_students(&self) -> CoreResult<MigrationReport> {
        self.migrate_students_from(&self.config.legacy_students_path())
    }

    /// Migrates a legacy students file at `legacy_path` into the students
    /// file.
    ///
    /// # Errors
    ///
    /// See [`crate::migrate::migrate`].
    pub fn migrate_students_from(&self, legacy_path: &Path) -> CoreResult<MigrationReport> {
        migrate_legacy_students(
            legacy_path,
            &self.config.students_path(),
            &self.config.default_major,
        )
    }

    /// Slot counts for every file.
    ///
    /// # Errors
    ///
    /// Returns an error if a scan fails.
    pub fn summary(&self) -> CoreResult<StoreSummary> {
        fn counts<R: Record>(file: &RecordFile<R>) -> CoreResult<FileCounts> {
            let scan = file.scan()?;
            Ok(FileCounts {
                slots: scan.len(),
                live: scan.live().count(),
            })
        }

        Ok(StoreSummary {
            students: counts(&self.students)?,
            courses: counts(&self.courses)?,
            enrollments: counts(&self.enrollments)?,
        })
    }

    /// Replaces all three files with the sample dataset.
    ///
    /// Existing contents are discarded without a backup.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn seed_sample(&mut self) -> CoreResult<()> {
        fn write_all<R: Record>(path: &Path, records: &[R]) -> CoreResult<()> {
            let bytes: Vec<u8> = records.iter().flat_map(Record::encode).collect();
            fs::write(path, bytes)?;
            Ok(())
        }

        warn!(data_dir = %self.config.data_dir.display(), "overwriting store with sample data");
        write_all(&self.config.students_path(), &sample::students())?;
        write_all(&self.config.courses_path(), &sample::courses())?;
        write_all(&self.config.enrollments_path(), &sample::enrollments())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::LegacyStudent;
    use crate::error::CoreError;
    use std::fs::OpenOptions;
    use std::io::Write;
    use tempfile::tempdir;

    fn open_in(dir: &Path) -> Store {
        Store::open(StoreConfig::new(dir.join("data"))).unwrap()
    }

    #[test]
    fn open_creates_data_dir_but_no_files() {
        let dir = tempdir().unwrap();
        let store = open_in(dir.path());

        assert!(store.config().data_dir.is_dir());
        assert!(!store.config().students_path().exists());
        assert!(store.check_all().unwrap().iter().all(FileHealth::is_healthy));
    }

    #[test]
    fn seed_sample_replaces_contents() {
        let dir = tempdir().unwrap();
        let mut store = open_in(dir.path());
        store
            .students_mut()
            .append(&Student::new(9, "extra", 1, "x"))
            .unwrap();

        store.seed_sample().unwrap();
        let summary = store.summary().unwrap();

        assert_eq!(summary.students, FileCounts { slots: 5, live: 5 });
        assert_eq!(summary.courses, FileCounts { slots: 4, live: 4 });
        assert_eq!(summary.enrollments, FileCounts { slots: 6, live: 6 });
    }

    #[test]
    fn summary_counts_deleted_slots() {
        let dir = tempdir().unwrap();
        let mut store = open_in(dir.path());
        store.seed_sample().unwrap();
        assert!(store.enrollments_mut().delete_by_key(30003).unwrap());

        let summary = store.summary().unwrap();
        assert_eq!(summary.enrollments, FileCounts { slots: 6, live: 5 });
    }

    #[test]
    fn repair_all_trims_only_unhealthy_files() {
        let dir = tempdir().unwrap();
        let mut store = open_in(dir.path());
        store.seed_sample().unwrap();
        let mut f = OpenOptions::new()
            .append(true)
            .open(store.config().courses_path())
            .unwrap();
        f.write_all(&[7; 10]).unwrap();
        drop(f);

        let health = store.check_all().unwrap();
        assert_eq!(
            health.iter().map(FileHealth::is_healthy).collect::<Vec<_>>(),
            vec![true, false, true]
        );

        let outcomes = store.repair_all().unwrap();
        assert_eq!(
            outcomes.iter().map(TrimOutcome::was_trimmed).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert!(store.check_all().unwrap().iter().all(FileHealth::is_healthy));
        assert_eq!(store.courses().count_live().unwrap(), 4);
    }

    #[test]
    fn migrate_students_uses_default_major() {
        let dir = tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path()).default_major("General")).unwrap();
        let legacy: Vec<u8> = [
            LegacyStudent::new(1, "a", 1),
            LegacyStudent::new(2, "b", 2),
        ]
        .iter()
        .flat_map(Record::encode)
        .collect();
        fs::write(store.config().legacy_students_path(), legacy).unwrap();

        let report = store.migrate_students().unwrap();

        assert_eq!(report.migrated, 2);
        let students = store.students().scan().unwrap().into_live();
        assert_eq!(students.len(), 2);
        assert!(students.iter().all(|(_, s)| s.major == "General"));
    }

    #[test]
    fn migrate_students_leaves_current_students_alone() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(StoreConfig::new(dir.path())).unwrap();
        store.seed_sample().unwrap();
        let before = fs::read(store.config().students_path()).unwrap();

        let report = store.migrate_students().unwrap();
        assert_eq!(report, MigrationReport::default());

        let students_path = store.config().students_path();
        let err = store.migrate_students_from(&students_path).unwrap_err();
        assert!(matches!(err, CoreError::LayoutMismatch { .. }));
        assert_eq!(fs::read(&students_path).unwrap(), before);
    }
}
