//! Student records, current and legacy.

use recdb_codec::{
    CodecResult, FieldSpec, FixedDecoder, FixedEncoder, Layout, Record, Value,
};
use serde::Serialize;

/// Width of a student's name field.
pub const NAME_WIDTH: usize = 50;
/// Width of a student's major field.
pub const MAJOR_WIDTH: usize = 30;

/// A student record (88 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Student ID (primary key).
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Year of study.
    pub year: u32,
    /// Major.
    pub major: String,
}

impl Student {
    /// Creates a student record.
    pub fn new(id: u32, name: impl Into<String>, year: u32, major: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            year,
            major: major.into(),
        }
    }

    /// The on-disk layout.
    #[must_use]
    pub fn layout() -> Layout {
        LegacyStudent::layout().extended(FieldSpec::text("major", MAJOR_WIDTH))
    }
}

impl Record for Student {
    const SIZE: usize = 4 + NAME_WIDTH + 4 + MAJOR_WIDTH;
    const FIELD_NAMES: &'static [&'static str] = &["ID", "Name", "Year", "Major"];

    fn primary_key(&self) -> u32 {
        self.id
    }

    fn encode(&self) -> Vec<u8> {
        let mut enc = FixedEncoder::with_capacity(Self::SIZE);
        enc.put_u32(self.id)
            .put_text(&self.name, NAME_WIDTH)
            .put_u32(self.year)
            .put_text(&self.major, MAJOR_WIDTH);
        enc.into_bytes()
    }

    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut dec = FixedDecoder::exact(bytes, Self::SIZE)?;
        Ok(Self {
            id: dec.u32()?,
            name: dec.text(NAME_WIDTH)?,
            year: dec.u32()?,
            major: dec.text(MAJOR_WIDTH)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::U32(self.id),
            Value::text(self.name.as_str()),
            Value::U32(self.year),
            Value::text(self.major.as_str()),
        ]
    }
}

/// A student record in the pre-major layout (58 bytes).
///
/// Only read by schema migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyStudent {
    /// Student ID (primary key).
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Year of study.
    pub year: u32,
}

impl LegacyStudent {
    /// Creates a legacy student record.
    pub fn new(id: u32, name: impl Into<String>, year: u32) -> Self {
        Self {
            id,
            name: name.into(),
            year,
        }
    }

    /// The on-disk layout.
    #[must_use]
    pub fn layout() -> Layout {
        Layout::new(vec![
            FieldSpec::u32("id"),
            FieldSpec::text("name", NAME_WIDTH),
            FieldSpec::u32("year"),
        ])
    }

    /// Upgrades to the current layout with the given major.
    #[must_use]
    pub fn with_major(self, major: impl Into<String>) -> Student {
        Student {
            id: self.id,
            name: self.name,
            year: self.year,
            major: major.into(),
        }
    }
}

impl Record for LegacyStudent {
    const SIZE: usize = 4 + NAME_WIDTH + 4;
    const FIELD_NAMES: &'static [&'static str] = &["ID", "Name", "Year"];

    fn primary_key(&self) -> u32 {
        self.id
    }

    fn encode(&self) -> Vec<u8> {
        let mut enc = FixedEncoder::with_capacity(Self::SIZE);
        enc.put_u32(self.id)
            .put_text(&self.name, NAME_WIDTH)
            .put_u32(self.year);
        enc.into_bytes()
    }

    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut dec = FixedDecoder::exact(bytes, Self::SIZE)?;
        Ok(Self {
            id: dec.u32()?,
            name: dec.text(NAME_WIDTH)?,
            year: dec.u32()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::U32(self.id),
            Value::text(self.name.as_str()),
            Value::U32(self.year),
        ]
    }
}
