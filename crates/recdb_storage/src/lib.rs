//! # RecDB Storage
//!
//! Storage backend trait and file primitives for RecDB.
//!
//! Storage backends are **opaque byte stores** - they do not know about
//! record sizes, keys or layouts. RecDB's core owns all interpretation.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, append, overwrite in place)
//! - The file backend holds no open handle between calls: each operation
//!   opens the file, does one pass, and closes it
//! - A missing file reads as empty
//! - No locking: a single process is assumed to own the files
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! The [`backup`] module provides the backup-then-rewrite primitive used
//! by repair and migration.
//!
//! ## Example
//!
//! ```rust
//! use recdb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"hello world").unwrap();
//! backend.write_at(offset, b"HELLO").unwrap();
//! assert_eq!(backend.read_all().unwrap(), b"HELLO world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backup;

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use backup::{backup_path, guarded_rewrite, RewriteOutcome};
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
