//! Layout descriptors for fixed-width records.
//!
//! A [`Layout`] is an ordered list of fields, each either a little-endian
//! `u32` or a zero-padded text field of a declared byte width. The record
//! size is the sum of the field widths; there is no header or padding.

use crate::decoder::FixedDecoder;
use crate::encoder::FixedEncoder;
use crate::error::{CodecError, CodecResult};
use crate::value::Value;

/// The kind and width of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned 32-bit integer (4 bytes).
    U32,
    /// UTF-8 text, truncated and zero-padded to `width` bytes.
    Text {
        /// Width in bytes.
        width: usize,
    },
}

impl FieldKind {
    /// Encoded width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U32 => 4,
            FieldKind::Text { width } => width,
        }
    }

    /// Whether `value` can be stored in a field of this kind.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldKind::U32, Value::U32(_)) | (FieldKind::Text { .. }, Value::Text(_))
        )
    }
}

/// A named field in a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, used as a display label.
    pub name: &'static str,
    /// Field kind.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A `u32` field.
    #[must_use]
    pub const fn u32(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::U32,
        }
    }

    /// A text field of `width` bytes.
    #[must_use]
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Text { width },
        }
    }
}

/// An ordered, fixed-width record layout.
///
/// The first field is the primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<FieldSpec>,
}

impl Layout {
    /// Creates a layout from its fields.
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Total encoded size of one record.
    #[must_use]
    pub fn record_size(&self) -> usize {
        self.fields.iter().map(|f| f.kind.width()).sum()
    }

    /// Returns a copy of this layout with `field` appended.
    #[must_use]
    pub fn extended(&self, field: FieldSpec) -> Self {
        let mut fields = self.fields.clone();
        fields.push(field);
        Self { fields }
    }

    /// If `self` is `base` plus exactly one trailing field, returns that field.
    #[must_use]
    pub fn added_field_over(&self, base: &Layout) -> Option<&FieldSpec> {
        match self.fields.split_last() {
            Some((last, prefix)) if prefix == base.fields.as_slice() => Some(last),
            _ => None,
        }
    }

    /// Encodes a row of values.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::RowShape`] if the number or kinds of values do
    /// not match the layout.
    pub fn encode_row(&self, row: &[Value]) -> CodecResult<Vec<u8>> {
        if row.len() != self.fields.len() {
            return Err(CodecError::row_shape(format!(
                "expected {} values, got {}",
                self.fields.len(),
                row.len()
            )));
        }

        let mut enc = FixedEncoder::with_capacity(self.record_size());
        for (field, value) in self.fields.iter().zip(row) {
            match (field.kind, value) {
                (FieldKind::U32, Value::U32(n)) => {
                    enc.put_u32(*n);
                }
                (FieldKind::Text { width }, Value::Text(s)) => {
                    enc.put_text(s, width);
                }
                _ => {
                    return Err(CodecError::row_shape(format!(
                        "field '{}' cannot hold {value:?}",
                        field.name
                    )))
                }
            }
        }
        Ok(enc.into_bytes())
    }

    /// Decodes one record into a row of values.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] if `bytes` is not exactly
    /// [`Layout::record_size`] long.
    pub fn decode_row(&self, bytes: &[u8]) -> CodecResult<Vec<Value>> {
        let mut dec = FixedDecoder::exact(bytes, self.record_size())?;
        self.fields
            .iter()
            .map(|field| match field.kind {
                FieldKind::U32 => dec.u32().map(Value::U32),
                FieldKind::Text { width } => dec.text(width).map(Value::Text),
            })
            .collect()
    }
}
