//! Course and enrollment records.

use recdb_codec::{
    CodecResult, FieldSpec, FixedDecoder, FixedEncoder, Layout, Record, Value,
};
use serde::Serialize;

/// Width of a course name field.
pub const COURSE_NAME_WIDTH: usize = 50;
/// Width of an enrollment grade field.
pub const GRADE_WIDTH: usize = 10;

/// A course record (58 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    /// Course ID (primary key).
    pub id: u32,
    /// Course name.
    pub name: String,
    /// Credit units.
    pub credit: u32,
}

impl Course {
    /// Creates a course record.
    pub fn new(id: u32, name: impl Into<String>, credit: u32) -> Self {
        Self {
            id,
            name: name.into(),
            credit,
        }
    }

    /// The on-disk layout.
    #[must_use]
    pub fn layout() -> Layout {
        Layout::new(vec![
            FieldSpec::u32("id"),
            FieldSpec::text("name", COURSE_NAME_WIDTH),
            FieldSpec::u32("credit"),
        ])
    }
}

impl Record for Course {
    const SIZE: usize = 4 + COURSE_NAME_WIDTH + 4;
    const FIELD_NAMES: &'static [&'static str] = &["ID", "Name", "Credit"];

    fn primary_key(&self) -> u32 {
        self.id
    }

    fn encode(&self) -> Vec<u8> {
        let mut enc = FixedEncoder::with_capacity(Self::SIZE);
        enc.put_u32(self.id)
            .put_text(&self.name, COURSE_NAME_WIDTH)
            .put_u32(self.credit);
        enc.into_bytes()
    }

    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut dec = FixedDecoder::exact(bytes, Self::SIZE)?;
        Ok(Self {
            id: dec.u32()?,
            name: dec.text(COURSE_NAME_WIDTH)?,
            credit: dec.u32()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::U32(self.id),
            Value::text(self.name.as_str()),
            Value::U32(self.credit),
        ]
    }
}

/// An enrollment record (22 bytes).
///
/// `student_id` and `course_id` are plain values; nothing checks that the
/// referenced records exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    /// Enrollment ID (primary key).
    pub id: u32,
    /// Referenced student ID.
    pub student_id: u32,
    /// Referenced course ID.
    pub course_id: u32,
    /// Grade text, `W` for a withdrawn (dropped) enrollment.
    pub grade: String,
}

impl Enrollment {
    /// Creates an enrollment record.
    pub fn new(id: u32, student_id: u32, course_id: u32, grade: impl Into<String>) -> Self {
        Self {
            id,
            student_id,
            course_id,
            grade: grade.into(),
        }
    }

    /// The on-disk layout.
    #[must_use]
    pub fn layout() -> Layout {
        Layout::new(vec![
            FieldSpec::u32("id"),
            FieldSpec::u32("student_id"),
            FieldSpec::u32("course_id"),
            FieldSpec::text("grade", GRADE_WIDTH),
        ])
    }
}

impl Record for Enrollment {
    const SIZE: usize = 4 + 4 + 4 + GRADE_WIDTH;
    const FIELD_NAMES: &'static [&'static str] = &["EID", "StuID", "CourseID", "Grade"];

    fn primary_key(&self) -> u32 {
        self.id
    }

    fn encode(&self) -> Vec<u8> {
        let mut enc = FixedEncoder::with_capacity(Self::SIZE);
        enc.put_u32(self.id)
            .put_u32(self.student_id)
            .put_u32(self.course_id)
            .put_text(&self.grade, GRADE_WIDTH);
        enc.into_bytes()
    }

    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut dec = FixedDecoder::exact(bytes, Self::SIZE)?;
        Ok(Self {
            id: dec.u32()?,
            student_id: dec.u32()?,
            course_id: dec.u32()?,
            grade: dec.text(GRADE_WIDTH)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::U32(self.id),
            Value::U32(self.student_id),
            Value::U32(self.course_id),
            Value::text(self.grade.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_layouts() {
        assert_eq!(Course::SIZE, 58);
        assert_eq!(Course::layout().record_size(), Course::SIZE);
        assert_eq!(Enrollment::SIZE, 22);
        assert_eq!(Enrollment::layout().record_size(), Enrollment::SIZE);
    }

    #[test]
    fn course_roundtrip() {
        let c = Course::new(2001, "Computer Programming (Python)", 3);
        let bytes = c.encode();
        assert_eq!(Course::layout().encode_row(&c.values()).unwrap(), bytes);
        assert_eq!(Course::decode(&bytes).unwrap(), c);
    }

    #[test]
    fn enrollment_byte_layout() {
        let e = Enrollment::new(30002, 1001, 2002, "B+");
        let bytes = e.encode();

        assert_eq!(&bytes[0..4], &30002u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1001u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2002u32.to_le_bytes());
        assert_eq!(&bytes[12..14], b"B+");
        assert!(bytes[14..].iter().all(|&b| b == 0));
        assert_eq!(Enrollment::decode(&bytes).unwrap(), e);
    }

    #[test]
    fn overlong_grade_is_truncated_to_width() {
        let e = Enrollment::new(1, 1, 1, "Incomplete-Pending");
        assert_eq!(e.encode().len(), Enrollment::SIZE);
        assert_eq!(Enrollment::decode(&e.encode()).unwrap().grade, "Incomplete");
    }
}
