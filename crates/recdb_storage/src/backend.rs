//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for RecDB.
///
/// Storage backends are **opaque byte stores**. RecDB owns all format
/// interpretation - backends do not understand records or slots.
///
/// # Invariants
///
/// - `append` writes at the current end and returns that offset
/// - `write_at` replaces existing bytes and never changes the size
/// - `read_at` returns exactly the bytes previously written at that offset
/// - A backend with nothing stored (or a missing file) has size 0
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read would extend beyond the current size
    /// or an I/O error occurs.
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Reads the entire contents.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn read_all(&self) -> StorageResult<Vec<u8>>;

    /// Appends data to the end of the storage.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Overwrites `data.len()` existing bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is not entirely inside the current
    /// size, or an I/O error occurs.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// This is the offset where the next `append` will write.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;
}
