//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
///
/// Overlong text is not an error: it is truncated to the field width.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A buffer handed to a decoder is not exactly one record wide.
    #[error("record length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// The fixed record size.
        expected: usize,
        /// The length of the buffer supplied.
        actual: usize,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A row of values does not match the layout it is encoded with.
    #[error("row does not match layout: {message}")]
    RowShape {
        /// Description of the mismatch.
        message: String,
    },
}

impl CodecError {
    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create a row shape error.
    pub fn row_shape(message: impl Into<String>) -> Self {
        Self::RowShape {
            message: message.into(),
        }
    }
}
