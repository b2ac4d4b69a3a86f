//! Sample dataset used to seed a fresh store.

use crate::entity::{Course, Enrollment, Student};

/// Five students across three majors.
#[must_use]
pub fn students() -> Vec<Student> {
    vec![
        Student::new(1001, "Somchai Dee", 1, "Computer Science"),
        Student::new(1002, "Anong Sookjai", 2, "Information Technology"),
        Student::new(1003, "Janpen Rungruang", 3, "Computer Science"),
        Student::new(1004, "Krit Prompong", 1, "Software Engineering"),
        Student::new(1005, "Suda Chaiyasit", 4, "Information Technology"),
    ]
}

/// Four three-credit courses.
#[must_use]
pub fn courses() -> Vec<Course> {
    vec![
        Course::new(2001, "Computer Programming (Python)", 3),
        Course::new(2002, "Data Structures", 3),
        Course::new(2003, "Database Systems", 3),
        Course::new(2004, "Operating Systems", 3),
    ]
}

/// Six enrollments, one of them withdrawn (`W`).
#[must_use]
pub fn enrollments() -> Vec<Enrollment> {
    vec![
        Enrollment::new(30001, 1001, 2001, "A"),
        Enrollment::new(30002, 1001, 2002, "B+"),
        Enrollment::new(30003, 1002, 2003, "C"),
        Enrollment::new(30004, 1003, 2001, "W"),
        Enrollment::new(30005, 1004, 2002, "A"),
        Enrollment::new(30006, 1005, 2004, "B"),
    ]
}
