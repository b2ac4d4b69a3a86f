//! Error types for RecDB core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in RecDB core operations.
///
/// Torn records and missing keys are not errors: scans report a torn tail
/// and key lookups return `false` or `None`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] recdb_storage::StorageError),

    /// Record codec error.
    #[error("codec error: {0}")]
    Codec(#[from] recdb_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record size of zero was supplied.
    #[error("invalid record size: {size}")]
    InvalidRecordSize {
        /// The size supplied.
        size: usize,
    },

    /// An append was refused because the file ends with a partial record.
    #[error("incomplete {len}-byte record at offset {offset}; run `recdb trim` first")]
    TornFile {
        /// Byte offset where the partial record starts.
        offset: u64,
        /// Number of bytes in the partial record.
        len: usize,
    },

    /// A migration target was modified after an earlier run made its backup.
    #[error(
        "{} changed since it was migrated from {}; remove the backup to migrate again",
        target.display(),
        backup.display()
    )]
    MigrationConflict {
        /// The migration target.
        target: PathBuf,
        /// The backup taken by the earlier run.
        backup: PathBuf,
    },

    /// Old and new layouts (or the default value) do not describe a
    /// one-field extension.
    #[error("layout mismatch: {message}")]
    LayoutMismatch {
        /// Description of the mismatch.
        message: String,
    },
}

impl CoreError {
    /// Creates a layout mismatch error.
    pub fn layout_mismatch(message: impl Into<String>) -> Self {
        Self::LayoutMismatch {
            message: message.into(),
        }
    }
}
