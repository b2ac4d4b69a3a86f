//! Entity records and their fixed layouts.
//!
//! | Entity | Layout | Size |
//! |---|---|---|
//! | [`Student`] | id u32, name 50, year u32, major 30 | 88 |
//! | [`Course`] | id u32, name 50, credit u32 | 58 |
//! | [`Enrollment`] | id u32, student_id u32, course_id u32, grade 10 | 22 |
//! | [`LegacyStudent`] | id u32, name 50, year u32 | 58 |

mod academic;
mod student;

pub use academic::{Course, Enrollment, COURSE_NAME_WIDTH, GRADE_WIDTH};
pub use student::{LegacyStudent, Student, MAJOR_WIDTH, NAME_WIDTH};
