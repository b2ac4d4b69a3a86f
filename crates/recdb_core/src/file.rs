//! Fixed-slot record files.
//!
//! A record file is a flat run of back-to-back `R::SIZE` byte slots with no
//! header and no index. Slot `i` lives at byte offset `i * R::SIZE`.
//!
//! - Records are appended at end-of-file; freed slots are never reused
//! - Updates overwrite a record at its existing offset
//! - Deletes overwrite the slot with zeros (soft delete)
//! - Every key-based operation is a linear scan
//!
//! A trailing run shorter than one slot is a torn write. Scanning stops
//! there and reports it instead of decoding garbage.

use crate::error::{CoreError, CoreResult};
use recdb_codec::Record;
use recdb_storage::{FileBackend, StorageBackend, StorageError};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, warn};

/// A trailing partial record found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TornTail {
    /// Byte offset where the partial record starts.
    pub offset: u64,
    /// Number of bytes present.
    pub len: usize,
    /// Number of bytes a complete record needs.
    pub expected: usize,
}

impl fmt::Display for TornTail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "incomplete record at offset {} ({} bytes, expected {})",
            self.offset, self.len, self.expected
        )
    }
}

/// The result of scanning a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<R> {
    /// Every complete slot in file order, deleted slots included.
    pub records: Vec<(u64, R)>,
    /// Set when the file ends with a partial record.
    pub torn_tail: Option<TornTail>,
}

impl<R: Record> Scan<R> {
    /// Live records (nonzero primary key) with their slot indexes.
    pub fn live(&self) -> impl Iterator<Item = &(u64, R)> + '_ {
        self.records.iter().filter(|(_, r)| r.is_live())
    }

    /// Consumes the scan, keeping only live records.
    #[must_use]
    pub fn into_live(self) -> Vec<(u64, R)> {
        self.records.into_iter().filter(|(_, r)| r.is_live()).collect()
    }

    /// Whether the file ended on a record boundary.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.torn_tail.is_none()
    }

    /// Number of complete slots, live or deleted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no complete slot was read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A file of fixed-size `R` records.
///
/// # Example
///
/// ```rust,ignore
/// use recdb_core::{RecordFile, Student};
///
/// let mut students = RecordFile::<Student>::open(Path::new("students.dat"));
/// students.append(&Student::new(1001, "Somchai Dee", 1, "Computer Science"))?;
/// for (slot, s) in students.scan()?.live() {
///     println!("[{slot}] {}", s.name);
/// }
/// ```
pub struct RecordFile<R> {
    backend: Box<dyn StorageBackend>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> fmt::Debug for RecordFile<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFile")
            .field("record_size", &R::SIZE)
            .finish_non_exhaustive()
    }
}

impl<R: Record> RecordFile<R> {
    /// Creates a record file backed by the file at `path`.
    ///
    /// Nothing is opened until an operation runs; a missing file is an
    /// empty record file.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        Self::with_backend(Box::new(FileBackend::new(path)))
    }

    /// Creates a record file over an arbitrary backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    /// Byte offset of `slot`, or `None` if it does not fit in a `u64`.
    #[must_use]
    pub fn slot_offset(slot: u64) -> Option<u64> {
        slot.checked_mul(R::SIZE as u64)
    }

    fn write_slot(&mut self, slot: u64, data: &[u8]) -> CoreResult<()> {
        let Some(offset) = Self::slot_offset(slot) else {
            return Err(StorageError::WritePastEnd {
                offset: u64::MAX,
                len: data.len(),
                size: self.backend.size()?,
            }
            .into());
        };
        self.backend.write_at(offset, data)?;
        Ok(())
    }

    /// Appends a record at end-of-file and returns its slot index.
    ///
    /// Nothing is written if the file ends with a partial record: the new
    /// record would land off the slot grid. Trim the file first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TornFile`] for a torn file, or an error if the
    /// write fails.
    pub fn append(&mut self, record: &R) -> CoreResult<u64> {
        let size = self.backend.size()?;
        let partial = size % R::SIZE as u64;
        if partial != 0 {
            warn!(
                size,
                record_size = R::SIZE,
                "refusing to append after an incomplete record"
            );
            return Err(CoreError::TornFile {
                offset: size - partial,
                len: partial as usize,
            });
        }

        let offset = self.backend.append(&record.encode())?;
        let slot = offset / R::SIZE as u64;
        debug!(slot, key = record.primary_key(), "appended record");
        Ok(slot)
    }

    /// Reads every complete slot from offset 0.
    ///
    /// A trailing partial record stops the scan: it is reported in
    /// [`Scan::torn_tail`] and logged, and everything before it is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the read itself fails.
    pub fn scan(&self) -> CoreResult<Scan<R>> {
        let data = self.backend.read_all()?;
        let mut chunks = data.chunks_exact(R::SIZE);

        let mut records = Vec::with_capacity(data.len() / R::SIZE);
        for (slot, chunk) in chunks.by_ref().enumerate() {
            records.push((slot as u64, R::decode(chunk)?));
        }

        let remainder = chunks.remainder();
        let torn_tail = if remainder.is_empty() {
            None
        } else {
            let tail = TornTail {
                offset: (data.len() - remainder.len()) as u64,
                len: remainder.len(),
                expected: R::SIZE,
            };
            warn!(%tail, "ignoring incomplete record");
            Some(tail)
        };

        Ok(Scan { records, torn_tail })
    }

    /// Overwrites the first live record whose field `field_index` equals
    /// `key` when both are rendered as strings.
    ///
    /// The replacement is written in one pass at the matched slot's offset.
    /// Returns `false` if nothing matched. The new record's own key is not
    /// checked against other records.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn overwrite_by_key(
        &mut self,
        field_index: usize,
        key: impl fmt::Display,
        new_record: &R,
    ) -> CoreResult<bool> {
        let key = key.to_string();
        let found = self
            .scan()?
            .into_live()
            .into_iter()
            .find(|(_, r)| r.field_text(field_index).as_deref() == Some(key.as_str()));

        let Some((slot, _)) = found else {
            debug!(field_index, %key, "no record to overwrite");
            return Ok(false);
        };

        self.write_slot(slot, &new_record.encode())?;
        debug!(slot, %key, "overwrote record");
        Ok(true)
    }

    /// Zeroes `slot`, soft-deleting whatever it holds.
    ///
    /// The slot's liveness is not checked; locate it with
    /// [`RecordFile::scan`] first.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is past the end of the file or the
    /// write fails.
    pub fn zero_out(&mut self, slot: u64) -> CoreResult<()> {
        self.write_slot(slot, &vec![0u8; R::SIZE])?;
        debug!(slot, "zeroed slot");
        Ok(())
    }

    /// First live record with primary key `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn find_by_key(&self, key: u32) -> CoreResult<Option<(u64, R)>> {
        Ok(self
            .scan()?
            .into_live()
            .into_iter()
            .find(|(_, r)| r.primary_key() == key))
    }

    /// Soft-deletes the first live record with primary key `key`.
    ///
    /// Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan or write fails.
    pub fn delete_by_key(&mut self, key: u32) -> CoreResult<bool> {
        match self.find_by_key(key)? {
            Some((slot, _)) => {
                self.zero_out(slot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Live records whose field `field_index` contains `needle`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn filter(&self, field_index: usize, needle: &str) -> CoreResult<Vec<(u64, R)>> {
        let needle = needle.to_lowercase();
        Ok(self
            .scan()?
            .into_live()
            .into_iter()
            .filter(|(_, r)| {
                r.field_text(field_index)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Number of live records.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn count_live(&self) -> CoreResult<usize> {
        Ok(self.scan()?.live().count())
    }
}
