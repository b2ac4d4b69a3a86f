//! Plain-text enrollment report.
//!
//! Joins live enrollments with their student and course, sorted by
//! student id, followed by headline counts, grade counts and students per
//! major. Enrollments graded `W` count as dropped.

use recdb_core::{Course, Enrollment, Student};
use std::collections::HashMap;

const TITLE: &str = "Registration System – Summary Report (Sample)";
const BORDER: &str = "+----------+--------------------+------------------------+------+----------+-------------------------------+--------+-------+----------+";
const HEADER: &str = "| StudentID| Full Name          | Major                  | Year | CourseID | Course Name                   | Credit | Grade | Status   |";
const WITHDRAWN_GRADE: &str = "W";

/// Live records to report on.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    /// Live students.
    pub students: Vec<Student>,
    /// Live courses.
    pub courses: Vec<Course>,
    /// Live enrollments.
    pub enrollments: Vec<Enrollment>,
    /// Timestamp printed in the header.
    pub generated_at: String,
}

/// Records keyed by id; a repeated id replaces the earlier record but
/// keeps its position.
struct Keyed<'a, T> {
    order: Vec<&'a T>,
    index: HashMap<u32, usize>,
}

impl<'a, T> Keyed<'a, T> {
    fn new(items: &'a [T], key: impl Fn(&T) -> u32) -> Self {
        let mut keyed = Self {
            order: Vec::with_capacity(items.len()),
            index: HashMap::with_capacity(items.len()),
        };
        for item in items {
            match keyed.index.get(&key(item)) {
                Some(&i) => keyed.order[i] = item,
                None => {
                    keyed.index.insert(key(item), keyed.order.len());
                    keyed.order.push(item);
                }
            }
        }
        keyed
    }

    fn get(&self, key: u32) -> Option<&'a T> {
        self.index.get(&key).map(|&i| self.order[i])
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Adds one to `key`'s count, keeping keys in first-seen order.
fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

/// Renders the report. Lines are joined with `\n` with no trailing newline.
pub fn render(input: &ReportInput) -> String {
    let students = Keyed::new(&input.students, |s| s.id);
    let courses = Keyed::new(&input.courses, |c| c.id);

    let mut enrollments: Vec<&Enrollment> = input.enrollments.iter().collect();
    enrollments.sort_by_key(|e| e.student_id);

    let mut lines = vec![
        TITLE.to_string(),
        format!("Generated At : {}", input.generated_at),
        format!("App Version  : {}", env!("CARGO_PKG_VERSION")),
        "Endianness   : Little-Endian".to_string(),
        "Encoding     : UTF-8 (fixed-length)".to_string(),
        String::new(),
        BORDER.to_string(),
        HEADER.to_string(),
        BORDER.to_string(),
    ];

    let mut last_student = None;
    let (mut active, mut dropped) = (0usize, 0usize);
    let mut grades = Vec::new();

    for e in &enrollments {
        let dropped_course = e.grade == WITHDRAWN_GRADE;
        let status = if dropped_course { "Dropped" } else { "Active" };
        if dropped_course {
            dropped += 1;
        } else {
            active += 1;
            bump(&mut grades, &e.grade);
        }

        let (sid, name, major, year) = match students.get(e.student_id) {
            _ if last_student == Some(e.student_id) => Default::default(),
            Some(s) => (s.id.to_string(), s.name.as_str(), s.major.as_str(), s.year.to_string()),
            None => Default::default(),
        };
        let (cid, cname, credit) = courses
            .get(e.course_id)
            .map(|c| (c.id.to_string(), c.name.as_str(), c.credit.to_string()))
            .unwrap_or_default();

        lines.push(format!(
            "| {sid:<8} | {name:<18} | {major:<22} | {year:<4} | {cid:<8} | {cname:<29} | {credit:<6} | {:<5} | {status:<8} |",
            e.grade
        ));
        last_student = Some(e.student_id);
    }

    lines.push(BORDER.to_string());
    lines.push(String::new());

    lines.push("Summary (Active only)".to_string());
    lines.push(format!("- Total Students    : {}", students.len()));
    lines.push(format!("- Total Courses     : {}", courses.len()));
    lines.push(format!("- Total Enrollments : {}", enrollments.len()));
    lines.push(format!("- Dropped Records   : {dropped}"));
    lines.push(format!("- Active Records    : {active}"));
    lines.push(String::new());

    lines.push("Statistics (Grade, Active only)".to_string());
    for (grade, count) in &grades {
        lines.push(format!("- {grade} count : {count}"));
    }
    lines.push(String::new());

    let mut majors = Vec::new();
    for s in &students.order {
        bump(&mut majors, &s.major);
    }
    lines.push("Students by Major (Active only)".to_string());
    for (major, count) in &majors {
        lines.push(format!("- {major} : {count}"));
    }

    lines.join("\n")
}
