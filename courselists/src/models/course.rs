//! Catalog offerings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::time::TimeBlock;
use crate::error::CatalogError;

/// Unique number of one offering in the registrar's catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationNumber(pub u32);

impl RegistrationNumber {
    pub fn new(value: u32) -> Self {
        RegistrationNumber(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegistrationNumber {
    fn from(value: u32) -> Self {
        RegistrationNumber(value)
    }
}

impl From<RegistrationNumber> for u32 {
    fn from(crn: RegistrationNumber) -> Self {
        crn.0
    }
}

/// Component type of an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CourseKind {
    Lecture,
    Tutorial,
    Laboratory,
}

impl CourseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseKind::Lecture => "Lecture",
            CourseKind::Tutorial => "Tutorial",
            CourseKind::Laboratory => "Laboratory",
        }
    }
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lecture" | "lec" => Ok(CourseKind::Lecture),
            "tutorial" | "tut" => Ok(CourseKind::Tutorial),
            "laboratory" | "lab" => Ok(CourseKind::Laboratory),
            _ => Err(CatalogError::InvalidCourseKind(s.to_string())),
        }
    }
}

/// Composite identity of an offering: subject, section and component type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseKey {
    pub subject: String,
    pub section: String,
    pub kind: CourseKind,
}

impl CourseKey {
    pub fn new(subject: impl Into<String>, section: impl Into<String>, kind: CourseKind) -> Self {
        Self {
            subject: subject.into(),
            section: section.into(),
            kind,
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.section, self.kind)
    }
}

/// One catalog offering of a lecture, tutorial or laboratory.
///
/// A course is identified either by its registration number or by its
/// [`CourseKey`]; see [`Course::same_offering`]. The rank is the only
/// mutable attribute and starts at [`Course::DEFAULT_RANK`].
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    crn: RegistrationNumber,
    subject: String,
    section: String,
    #[serde(rename = "type")]
    kind: CourseKind,
    instructor: String,
    schedule: Vec<TimeBlock>,
    rank: i32,
}

impl Course {
    /// Neutral rank for offerings the user has not ranked yet.
    pub const DEFAULT_RANK: i32 = 0;

    /// Create a course. Repeated blocks in `schedule` are collapsed; the first
    /// occurrence keeps its position.
    pub fn new(
        crn: impl Into<RegistrationNumber>,
        subject: impl Into<String>,
        section: impl Into<String>,
        kind: CourseKind,
        instructor: impl Into<String>,
        schedule: impl IntoIterator<Item = TimeBlock>,
    ) -> Self {
        let mut blocks: Vec<TimeBlock> = Vec::new();
        for block in schedule {
            if !blocks.contains(&block) {
                blocks.push(block);
            }
        }
        Self {
            crn: crn.into(),
            subject: subject.into(),
            section: section.into(),
            kind,
            instructor: instructor.into(),
            schedule: blocks,
            rank: Self::DEFAULT_RANK,
        }
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    pub fn crn(&self) -> RegistrationNumber {
        self.crn
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn kind(&self) -> CourseKind {
        self.kind
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn schedule(&self) -> &[TimeBlock] {
        &self.schedule
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn set_rank(&mut self, rank: i32) {
        self.rank = rank;
    }

    pub fn is_lecture(&self) -> bool {
        self.kind == CourseKind::Lecture
    }

    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.subject.clone(), self.section.clone(), self.kind)
    }

    /// True if this course carries the given composite key.
    pub fn matches_key(&self, subject: &str, section: &str, kind: CourseKind) -> bool {
        self.subject == subject && self.section == section && self.kind == kind
    }

    /// Two records describe the same offering if their registration numbers
    /// match or their composite keys match.
    pub fn same_offering(&self, other: &Course) -> bool {
        self.crn == other.crn || self.matches_key(&other.subject, &other.section, other.kind)
    }

    /// True if any block of `self` conflicts with any block of `other`.
    pub fn conflicts_with(&self, other: &Course) -> bool {
        self.schedule
            .iter()
            .any(|mine| other.schedule.iter().any(|theirs| mine.conflicts(theirs)))
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} Instructor: {}",
            self.crn, self.subject, self.section, self.kind, self.instructor
        )?;
        for block in &self.schedule {
            write!(f, "\n{}", block)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::{Day, Term};

    fn lecture(crn: u32, section: &str) -> Course {
        Course::new(
            crn,
            "COMP1405",
            section,
            CourseKind::Lecture,
            "Ada Lovelace",
            vec![TimeBlock::new(Day::Monday, Term::Fall, 935, 1055)],
        )
    }

    #[test]
    fn test_registration_number_is_a_bare_integer() {
        let crn = RegistrationNumber::from(31245);
        assert_eq!(crn.to_string(), "31245");
        assert_eq!(u32::from(crn), 31245);
        assert_eq!(serde_json::to_string(&crn).unwrap(), "31245");
        assert_eq!(
            serde_json::from_str::<RegistrationNumber>("42").unwrap(),
            RegistrationNumber(42)
        );
    }

    #[test]
    fn test_duplicate_blocks_collapse() {
        let block = TimeBlock::new(Day::Monday, Term::Fall, 935, 1055);
        let other = TimeBlock::new(Day::Wednesday, Term::Fall, 935, 1055);
        let course = Course::new(
            10001u32,
            "COMP1405",
            "A",
            CourseKind::Lecture,
            "Ada Lovelace",
            vec![block, other, block],
        );
        assert_eq!(course.schedule(), &[block, other]);
    }

    #[test]
    fn test_default_rank_is_neutral() {
        assert_eq!(lecture(10001, "A").rank(), Course::DEFAULT_RANK);
        assert_eq!(lecture(10001, "A").with_rank(7).rank(), 7);
    }

    #[test]
    fn test_same_offering_by_crn() {
        let a = lecture(10001, "A");
        let b = lecture(10001, "B");
        assert!(a.same_offering(&b));
    }

    #[test]
    fn test_same_offering_by_key() {
        let a = lecture(10001, "A");
        let b = lecture(20002, "A");
        assert!(a.same_offering(&b));
    }

    #[test]
    fn test_different_offerings() {
        let a = lecture(10001, "A");
        let b = lecture(20002, "B");
        assert!(!a.same_offering(&b));
    }

    #[test]
    fn test_conflicts_with() {
        let a = lecture(10001, "A");
        let b = Course::new(
            10002u32,
            "MATH1104",
            "A",
            CourseKind::Lecture,
            "Emmy Noether",
            vec![TimeBlock::new(Day::Monday, Term::Fall, 1055, 1200)],
        );
        let c = Course::new(
            10003u32,
            "MATH1104",
            "B",
            CourseKind::Lecture,
            "Emmy Noether",
            vec![TimeBlock::new(Day::Tuesday, Term::Fall, 935, 1055)],
        );
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_display() {
        let course = lecture(10001, "A");
        assert_eq!(
            course.to_string(),
            "10001 COMP1405 A Lecture Instructor: Ada Lovelace\nMonday 9:35-10:55"
        );
    }

    #[test]
    fn test_course_kind_from_str() {
        assert_eq!("Lab".parse::<CourseKind>().unwrap(), CourseKind::Laboratory);
        assert_eq!("tutorial".parse::<CourseKind>().unwrap(), CourseKind::Tutorial);
        assert!("Seminar".parse::<CourseKind>().is_err());
    }
}
