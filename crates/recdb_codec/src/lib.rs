//! # RecDB Codec
//!
//! Fixed-width binary record encoding for RecDB.
//!
//! Every record type has a byte-exact layout:
//! - Integers are `u32`, little-endian
//! - Text is UTF-8, truncated to the field width, right-padded with zeros
//! - Text decoding stops at the first zero byte
//! - No headers, no padding, no checksums
//!
//! Truncation is silent: encoding never fails because a value is too long.
//!
//! ## Usage
//!
//! ```
//! use recdb_codec::{FieldSpec, Layout, Value};
//!
//! let layout = Layout::new(vec![FieldSpec::u32("id"), FieldSpec::text("grade", 10)]);
//! let bytes = layout.encode_row(&[Value::U32(7), Value::text("A")]).unwrap();
//! assert_eq!(bytes.len(), 14);
//! assert_eq!(layout.decode_row(&bytes).unwrap()[1], Value::text("A"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod layout;
mod value;

pub use decoder::{read_fixed_text, FixedDecoder};
pub use encoder::{put_fixed_text, FixedEncoder};
pub use error::{CodecError, CodecResult};
pub use layout::{FieldKind, FieldSpec, Layout};
pub use value::Value;

/// A typed fixed-size record.
///
/// Implementors declare their byte width and primary key explicitly.
/// `decode(encode(r)) == r` must hold whenever every text field of `r`
/// fits its declared width.
pub trait Record: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Field labels, in encoding order. The first is the primary key.
    const FIELD_NAMES: &'static [&'static str];

    /// The primary key (first field).
    fn primary_key(&self) -> u32;

    /// Encodes this record to exactly [`Record::SIZE`] bytes.
    fn encode(&self) -> Vec<u8>;

    /// Decodes a record from exactly [`Record::SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] for any other length.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;

    /// The record's fields as dynamic values, in encoding order.
    fn values(&self) -> Vec<Value>;

    /// A record is live when its primary key is nonzero.
    fn is_live(&self) -> bool {
        self.primary_key() != 0
    }

    /// String-normalized value of field `index`.
    fn field_text(&self, index: usize) -> Option<String> {
        self.values().get(index).map(ToString::to_string)
    }
}
