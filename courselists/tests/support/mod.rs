#![allow(dead_code)]

use courselists::{Course, CourseKind, Day, Term, TimeBlock};

/// Fall-term block.
pub fn block(day: Day, start: u16, end: u16) -> TimeBlock {
    TimeBlock::new(day, Term::Fall, start, end)
}

pub fn course(
    crn: u32,
    subject: &str,
    section: &str,
    kind: CourseKind,
    schedule: Vec<TimeBlock>,
) -> Course {
    Course::new(crn, subject, section, kind, "Staff", schedule)
}

pub fn lecture(crn: u32, subject: &str, section: &str, schedule: Vec<TimeBlock>) -> Course {
    course(crn, subject, section, CourseKind::Lecture, schedule)
}

pub fn tutorial(crn: u32, subject: &str, section: &str, schedule: Vec<TimeBlock>) -> Course {
    course(crn, subject, section, CourseKind::Tutorial, schedule)
}

pub fn laboratory(crn: u32, subject: &str, section: &str, schedule: Vec<TimeBlock>) -> Course {
    course(crn, subject, section, CourseKind::Laboratory, schedule)
}

/// COMP1405 section A: lecture 100 (Mon/Wed 8:35-9:55), tutorials 101 (Tue)
/// and 102 (Thu), laboratory 103 (Fri). Nothing conflicts.
pub fn comp1405_section_a() -> Vec<Course> {
    vec![
        lecture(
            100,
            "COMP1405",
            "A",
            vec![block(Day::Monday, 835, 955), block(Day::Wednesday, 835, 955)],
        ),
        tutorial(101, "COMP1405", "A1", vec![block(Day::Tuesday, 1135, 1225)]),
        tutorial(102, "COMP1405", "A2", vec![block(Day::Thursday, 1135, 1225)]),
        laboratory(103, "COMP1405", "AL1", vec![block(Day::Friday, 1435, 1625)]),
    ]
}

/// `subjects` (at most four) subjects, each with lecture A and tutorials
/// A1 to A10, every course in its own weekday hour. Nothing conflicts, so
/// there are `10^subjects` selections.
pub fn wide_catalog(subjects: usize) -> Vec<Course> {
    const SUBJECTS: [&str; 4] = ["COMP1405", "MATH1104", "PHYS1007", "CHEM1001"];

    let mut courses = Vec::new();
    for (s, subject) in SUBJECTS.iter().take(subjects).enumerate() {
        for t in 0..=10usize {
            let index = s * 11 + t;
            let hour = 8 + (index / 5) as u16;
            let schedule = vec![block(Day::ALL[index % 5], hour * 100, hour * 100 + 50)];
            let crn = 1000 + index as u32;
            if t == 0 {
                courses.push(lecture(crn, subject, "A", schedule));
            } else {
                courses.push(tutorial(crn, subject, &format!("A{}", t), schedule));
            }
        }
    }
    courses
}

/// Selections as sorted lists of raw registration numbers.
pub fn crn_lists(selections: &[courselists::Selection]) -> Vec<Vec<u32>> {
    selections
        .iter()
        .map(|s| s.crns().into_iter().map(|crn| crn.value()).collect())
        .collect()
}

/// Offline catalog with two COMP1405 lecture sections, a wildcard tutorial
/// and one MATH1104 lecture, all in the Fall term, plus a Winter lecture.
pub const CATALOG_JSON: &str = r#"{
  "courses": [
    { "crn": 200, "subject": "COMP1405", "section": "A", "type": "Lecture",
      "instructor": "Ada Lovelace", "term": "Fall",
      "meetings": [{ "days": ["Mon", "Wed"], "start": "08:35", "end": "09:55" }] },
    { "crn": 201, "subject": "COMP1405", "section": "A1", "type": "Tutorial",
      "instructor": "TA", "term": "Fall",
      "meetings": [{ "days": ["Tue"], "start": "11:35", "end": "12:25" }] },
    { "crn": 210, "subject": "COMP1405", "section": "B", "type": "Lecture",
      "instructor": "Alan Turing", "term": "Fall",
      "meetings": [{ "days": ["Tue", "Thu"], "start": "13:05", "end": "14:25" }] },
    { "crn": 211, "subject": "COMP1405", "section": "B1", "type": "Tutorial",
      "instructor": "TA", "term": "Fall",
      "meetings": [{ "days": ["Fri"], "start": "09:35", "end": "10:25" }] },
    { "crn": 220, "subject": "COMP1405", "section": "A", "type": "Lecture",
      "instructor": "Ada Lovelace", "term": "Winter",
      "meetings": [{ "days": ["Mon"], "start": "08:35", "end": "09:55" }] },
    { "crn": 300, "subject": "MATH1104", "section": "A", "type": "Lecture",
      "instructor": "Emmy Noether", "term": "Fall",
      "meetings": [{ "days": ["Mon", "Wed"], "start": "10:05", "end": "11:25" }] }
  ]
}"#;
