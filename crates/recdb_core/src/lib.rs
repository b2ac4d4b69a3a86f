//! # RecDB Core
//!
//! Fixed-length record store for academic records.
//!
//! This crate provides:
//! - Record files of back-to-back fixed-size slots ([`RecordFile`])
//! - Student, course and enrollment records ([`entity`])
//! - Read-only integrity checks ([`integrity`])
//! - Torn-tail repair by trimming ([`repair`])
//! - One-field schema migration ([`migrate`])
//! - A three-file [`Store`] configured by [`StoreConfig`]
//!
//! All integers are little-endian `u32`; text fields are UTF-8,
//! zero-padded and silently truncated to their width.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
pub mod entity;
mod error;
mod file;
pub mod integrity;
pub mod migrate;
pub mod repair;
pub mod sample;
mod store;

pub use config::{
    StoreConfig, COURSES_FILE, DEFAULT_MAJOR, ENROLLMENTS_FILE, LEGACY_STUDENTS_FILE, REPORT_FILE,
    STUDENTS_FILE,
};
pub use entity::{Course, Enrollment, LegacyStudent, Student};
pub use error::{CoreError, CoreResult};
pub use file::{RecordFile, Scan, TornTail};
pub use integrity::{check, inspect, FileHealth};
pub use migrate::{migrate, migrate_legacy_students, MigrationReport, MIGRATE_BACKUP_SUFFIX};
pub use recdb_codec::Record;
pub use repair::{trim, TrimOutcome, TRIM_BACKUP_SUFFIX};
pub use store::{FileCounts, Store, StoreSummary};
