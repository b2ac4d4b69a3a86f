//! Test fixtures and store helpers.
//!
//! Provides temporary stores that clean up after themselves and helpers
//! for laying raw record bytes on disk.

use recdb_codec::Record;
use recdb_core::{Store, StoreConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A store in a temporary directory, removed on drop.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestStore {
    /// Creates an empty store.
    pub fn empty() -> Self {
        Self::with_config(|config| config)
    }

    /// Creates a store seeded with the sample dataset.
    pub fn sample() -> Self {
        let mut test_store = Self::empty();
        test_store
            .store
            .seed_sample()
            .expect("Failed to seed sample data");
        test_store
    }

    /// Creates an empty store after letting `configure` adjust the
    /// configuration. The data directory is always the temporary one.
    pub fn with_config(configure: impl FnOnce(StoreConfig) -> StoreConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut config = configure(StoreConfig::default());
        config.data_dir = temp_dir.path().to_path_buf();
        let store = Store::open(config).expect("Failed to open store");
        Self { store, temp_dir }
    }

    /// The temporary data directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Runs a test against a temporary store holding the sample dataset.
///
/// # Example
///
/// ```rust,ignore
/// use recdb_testkit::with_sample_store;
///
/// #[test]
/// fn my_test() {
///     with_sample_store(|store| {
///         assert!(store.check_all().unwrap().iter().all(|h| h.is_healthy()));
///     });
/// }
/// ```
pub fn with_sample_store<F, T>(f: F) -> T
where
    F: FnOnce(&mut Store) -> T,
{
    let mut test_store = TestStore::sample();
    f(&mut test_store.store)
}

/// Encodes `records` back to back.
pub fn encode_all<R: Record>(records: &[R]) -> Vec<u8> {
    records.iter().flat_map(Record::encode).collect()
}

/// Replaces the file at `path` with `records`.
pub fn write_records<R: Record>(path: &Path, records: &[R]) {
    fs::write(path, encode_all(records)).expect("Failed to write records");
}

/// Length of the file at `path`, or 0 if it does not exist.
pub fn file_len(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
