//! # RecDB Testkit
//!
//! Test utilities for RecDB.
//!
//! This crate provides:
//! - Temporary stores and record-file fixtures
//! - Property-based generators for every record type
//! - Torn-write simulation for integrity and repair tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recdb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_store() {
//!     with_sample_store(|store| {
//!         assert_eq!(store.students().count_live().unwrap(), 5);
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod crash;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::crash::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use crash::*;
pub use fixtures::*;
pub use generators::*;
