//! Property-based test generators using proptest.
//!
//! Text strategies come in two flavours: values that fit their field and
//! survive an encode/decode roundtrip unchanged, and overlong values that
//! exercise truncation.

use proptest::prelude::*;
use recdb_core::entity::{COURSE_NAME_WIDTH, GRADE_WIDTH, MAJOR_WIDTH, NAME_WIDTH};
use recdb_core::{Course, Enrollment, LegacyStudent, Student};

/// Strategy for live primary keys (never zero).
pub fn key_strategy() -> impl Strategy<Value = u32> {
    1..=u32::MAX
}

/// Strategy for text that fits in `width` bytes and contains no NUL.
pub fn fitting_text_strategy(width: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[A-Za-z0-9 .()+-]{{0,{width}}}"))
        .expect("Invalid regex")
}

/// Strategy for text longer than `width` bytes, including multi-byte
/// characters.
pub fn overlong_text_strategy(width: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[a-zé ก-ฮ]{{{},{}}}", width + 1, width * 2))
        .expect("Invalid regex")
        .prop_filter("Text must exceed the field width", move |s| s.len() > width)
}

/// Strategy for students whose text fits.
pub fn student_strategy() -> impl Strategy<Value = Student> {
    (
        key_strategy(),
        fitting_text_strategy(NAME_WIDTH),
        any::<u32>(),
        fitting_text_strategy(MAJOR_WIDTH),
    )
        .prop_map(|(id, name, year, major)| Student::new(id, name, year, major))
}

/// Strategy for students with overlong name and major.
pub fn overlong_student_strategy() -> impl Strategy<Value = Student> {
    (
        key_strategy(),
        overlong_text_strategy(NAME_WIDTH),
        any::<u32>(),
        overlong_text_strategy(MAJOR_WIDTH),
    )
        .prop_map(|(id, name, year, major)| Student::new(id, name, year, major))
}

/// Strategy for legacy students whose name fits.
pub fn legacy_student_strategy() -> impl Strategy<Value = LegacyStudent> {
    (key_strategy(), fitting_text_strategy(NAME_WIDTH), any::<u32>())
        .prop_map(|(id, name, year)| LegacyStudent::new(id, name, year))
}

/// Strategy for courses whose name fits.
pub fn course_strategy() -> impl Strategy<Value = Course> {
    (
        key_strategy(),
        fitting_text_strategy(COURSE_NAME_WIDTH),
        any::<u32>(),
    )
        .prop_map(|(id, name, credit)| Course::new(id, name, credit))
}

/// Strategy for enrollments whose grade fits.
pub fn enrollment_strategy() -> impl Strategy<Value = Enrollment> {
    (
        key_strategy(),
        any::<u32>(),
        any::<u32>(),
        fitting_text_strategy(GRADE_WIDTH),
    )
        .prop_map(|(id, student_id, course_id, grade)| {
            Enrollment::new(id, student_id, course_id, grade)
        })
}

/// An operation against a students file.
///
/// Keys are drawn from a small range so that operations collide.
#[derive(Debug, Clone)]
pub enum StudentOperation {
    /// Append a student.
    Append(Student),
    /// Overwrite the first live student with this id.
    Overwrite {
        /// Id to match.
        key: u32,
        /// Replacement record.
        student: Student,
    },
    /// Soft-delete the first live student with this id.
    Delete {
        /// Id to match.
        key: u32,
    },
}

fn small_key_student_strategy() -> impl Strategy<Value = Student> {
    (1u32..16, student_strategy()).prop_map(|(id, mut student)| {
        student.id = id;
        student
    })
}

/// Strategy for generating student file operations.
pub fn student_operation_strategy() -> impl Strategy<Value = StudentOperation> {
    prop_oneof![
        3 => small_key_student_strategy().prop_map(StudentOperation::Append),
        2 => (1u32..16, small_key_student_strategy())
            .prop_map(|(key, student)| StudentOperation::Overwrite { key, student }),
        1 => (1u32..16).prop_map(|key| StudentOperation::Delete { key }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StudentOperation>> {
    prop::collection::vec(student_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recdb_codec::Record;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn fitting_text_fits(text in fitting_text_strategy(10)) {
            prop_assert!(text.len() <= 10);
            prop_assert!(!text.contains('\0'));
        }

        #[test]
        fn overlong_text_is_overlong(text in overlong_text_strategy(10)) {
            prop_assert!(text.len() > 10);
        }

        #[test]
        fn generated_students_are_live(student in student_strategy()) {
            prop_assert!(student.is_live());
        }

        #[test]
        fn operation_keys_are_small(ops in operation_sequence_strategy(1, 20)) {
            for op in ops {
                let key = match op {
                    StudentOperation::Append(s) => s.id,
                    StudentOperation::Overwrite { key, .. }
                    | StudentOperation::Delete { key } => key,
                };
                prop_assert!((1..16).contains(&key));
            }
        }
    }
}
