//! Fixed-width record encoder.

/// Writes `text` into `buf` as exactly `width` bytes.
///
/// The UTF-8 bytes are cut at `width` (which may split a multi-byte
/// character) and right-padded with zero bytes.
pub fn put_fixed_text(buf: &mut Vec<u8>, text: &str, width: usize) {
    let bytes = text.as_bytes();
    let take = bytes.len().min(width);
    buf.extend_from_slice(&bytes[..take]);
    buf.resize(buf.len() + (width - take), 0);
}

/// A positional encoder for fixed-width records.
///
/// Fields are appended in declaration order. Integers are packed
/// little-endian, text is truncated then zero-padded.
///
/// # Example
///
/// ```
/// use recdb_codec::FixedEncoder;
///
/// let mut enc = FixedEncoder::with_capacity(8);
/// enc.put_u32(7).put_text("ab", 4);
/// assert_eq!(enc.into_bytes(), vec![7, 0, 0, 0, b'a', b'b', 0, 0]);
/// ```
#[derive(Debug, Default)]
pub struct FixedEncoder {
    buffer: Vec<u8>,
}

impl FixedEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Append a little-endian `u32`.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a text field of exactly `width` bytes.
    pub fn put_text(&mut self, text: &str, width: usize) -> &mut Self {
        put_fixed_text(&mut self.buffer, text, width);
        self
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
