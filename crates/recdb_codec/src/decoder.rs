//! Fixed-width record decoder.

use crate::error::{CodecError, CodecResult};

/// Reads a zero-terminated text field.
///
/// Decoding stops at the first zero byte. Invalid UTF-8 (for example a
/// character split by truncation) is replaced rather than rejected.
pub fn read_fixed_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// A positional decoder for fixed-width records.
pub struct FixedDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FixedDecoder<'a> {
    /// Create a new decoder for the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a decoder after checking that `data` is exactly `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] if the length differs.
    pub fn exact(data: &'a [u8], size: usize) -> CodecResult<Self> {
        if data.len() != size {
            return Err(CodecError::length_mismatch(size, data.len()));
        }
        Ok(Self::new(data))
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read a little-endian `u32`.
    pub fn u32(&mut self) -> CodecResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a text field of `width` bytes.
    pub fn text(&mut self, width: usize) -> CodecResult<String> {
        let bytes = self.read_bytes(width)?;
        Ok(read_fixed_text(bytes))
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_stops_at_first_zero() {
        assert_eq!(read_fixed_text(b"ab\0cd"), "ab");
    }

    #[test]
    fn text_without_terminator_uses_whole_field() {
        assert_eq!(read_fixed_text(b"abcd"), "abcd");
    }

    #[test]
    fn all_zero_text_is_empty() {
        assert_eq!(read_fixed_text(&[0; 10]), "");
    }

    #[test]
    fn split_character_is_replaced() {
        let mut bytes = "ส".as_bytes().to_vec();
        bytes.push("ม".as_bytes()[0]);
        assert_eq!(read_fixed_text(&bytes), "ส\u{FFFD}");
    }

    #[test]
    fn reads_fields_in_order() {
        let data = [1, 0, 0, 0, b'x', 0, 0, 2, 0, 0, 0];
        let mut dec = FixedDecoder::new(&data);
        assert_eq!(dec.u32().unwrap(), 1);
        assert_eq!(dec.text(3).unwrap(), "x");
        assert_eq!(dec.u32().unwrap(), 2);
        assert!(dec.is_empty());
    }

    #[test]
    fn read_past_end_fails() {
        let mut dec = FixedDecoder::new(&[1, 2]);
        assert_eq!(dec.u32(), Err(CodecError::UnexpectedEof));
    }

    #[test]
    fn exact_rejects_wrong_length() {
        let result = FixedDecoder::exact(&[0; 5], 4);
        assert!(matches!(
            result,
            Err(CodecError::LengthMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }
}
