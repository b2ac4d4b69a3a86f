//! Torn-write simulation.
//!
//! An append interrupted part-way leaves fewer than one record's worth of
//! bytes at the end of a file. These helpers reproduce that state so
//! integrity, scan, trim and migration tests can exercise it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recdb_testkit::crash::{append_torn, CrashPoint};
//!
//! append_torn(&path, &student, CrashPoint::Midway);
//! assert!(!recdb_core::check(&path, Student::SIZE).unwrap());
//! ```

use recdb_codec::Record;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Where an interrupted append stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashPoint {
    /// After the first byte.
    FirstByte,
    /// Halfway through the record.
    Midway,
    /// One byte short of a complete record.
    LastByte,
    /// After exactly this many bytes.
    After(usize),
}

impl CrashPoint {
    /// Bytes written before the crash for a record of `record_size`.
    ///
    /// Always at least 1 and less than `record_size`.
    pub fn bytes_written(self, record_size: usize) -> usize {
        let n = match self {
            CrashPoint::FirstByte => 1,
            CrashPoint::Midway => record_size / 2,
            CrashPoint::LastByte => record_size.saturating_sub(1),
            CrashPoint::After(n) => n,
        };
        n.clamp(1, record_size.saturating_sub(1).max(1))
    }
}

/// Appends a prefix of `record`'s encoding to `path`, as an append that
/// crashed at `at` would. Returns the number of bytes written.
pub fn append_torn<R: Record>(path: &Path, record: &R, at: CrashPoint) -> usize {
    let bytes = record.encode();
    let n = at.bytes_written(bytes.len());
    append_raw(path, &bytes[..n]);
    n
}

/// Appends arbitrary bytes to `path`, creating it if needed.
pub fn append_raw(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("Failed to open file for append");
    file.write_all(bytes).expect("Failed to append bytes");
}
