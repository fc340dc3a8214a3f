//! Offline course source backed by a JSON catalog.
//!
//! ```json
//! {
//!   "courses": [
//!     {
//!       "crn": 31245,
//!       "subject": "COMP1405",
//!       "section": "A",
//!       "type": "Lecture",
//!       "instructor": "Ada Lovelace",
//!       "term": "Fall",
//!       "meetings": [{ "days": ["Mon", "Wed"], "start": "08:35", "end": "09:55" }]
//!     }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::{classifier::section_prefix_classifier, Classifier, CourseSource};
use crate::error::CatalogError;
use crate::models::{parse_clock, Course, CourseKind, Day, Term, TimeBlock};

/// Custom deserializer that accepts either string or integer for registration numbers
fn deserialize_crn<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
        StringOrInt::Int(i) => Ok(i),
    }
}

/// Raw JSON structure for the whole catalog
#[derive(Debug, Clone, Deserialize)]
struct RawCatalog {
    courses: Vec<RawCourse>,
}

/// Raw JSON structure for one offering
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCourse {
    #[serde(deserialize_with = "deserialize_crn")]
    crn: i64,
    subject: String,
    section: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    instructor: String,
    term: String,
    #[serde(default)]
    meetings: Vec<RawMeeting>,
}

/// Raw JSON structure for a weekly meeting pattern
#[derive(Debug, Clone, Deserialize)]
struct RawMeeting {
    days: Vec<String>,
    start: String,
    end: String,
}

impl RawCourse {
    fn term(&self) -> std::result::Result<Term, CatalogError> {
        self.term.parse()
    }

    fn is_offering_of(&self, code: &str) -> bool {
        normalize_code(&self.subject) == code
    }

    /// Build the course, failing on the first field that cannot be read.
    pub(crate) fn to_course(&self) -> std::result::Result<Course, CatalogError> {
        let crn = u32::try_from(self.crn)
            .ok()
            .filter(|crn| *crn > 0)
            .ok_or_else(|| {
                CatalogError::InvalidRecord(format!(
                    "registration number {} out of range",
                    self.crn
                ))
            })?;
        let kind: CourseKind = self.kind.parse()?;
        let term = self.term()?;

        let mut schedule = Vec::new();
        for meeting in &self.meetings {
            let start = parse_clock(&meeting.start)?;
            let end = parse_clock(&meeting.end)?;
            for day in &meeting.days {
                let day: Day = day.parse()?;
                schedule.push(TimeBlock::try_new(day, term, start, end)?);
            }
        }

        Ok(Course::new(
            crn,
            self.subject.trim(),
            self.section.trim(),
            kind,
            self.instructor.trim(),
            schedule,
        ))
    }
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Parse a catalog document, reporting the JSON path of any decoding error.
fn parse_catalog(json: &str) -> Result<Vec<RawCourse>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    let catalog: RawCatalog = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| anyhow::anyhow!("{} at {}", e.inner(), e.path()))
        .context("Failed to parse course catalog")?;
    Ok(catalog.courses)
}

/// Course source reading a JSON catalog held in memory.
///
/// Uses the section-prefix classifier unless another one is supplied with
/// [`JsonCatalogSource::with_classifier`].
#[derive(Clone)]
pub struct JsonCatalogSource {
    records: Vec<RawCourse>,
    classifier: Classifier,
}

impl std::fmt::Debug for JsonCatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCatalogSource")
            .field("records", &self.records.len())
            .finish()
    }
}

impl JsonCatalogSource {
    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load catalog file {}", path.display()))
    }

    /// Load a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records = parse_catalog(json)?;
        debug!("Loaded course catalog with {} records", records.len());
        Ok(Self {
            records,
            classifier: section_prefix_classifier(),
        })
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Number of records in the catalog, readable or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Offerings of `subject` + `number` in `term`. Records that cannot be
    /// read are skipped with a warning.
    pub fn offerings(&self, subject: &str, number: &str, term: Term) -> Vec<Course> {
        let code = normalize_code(&format!("{}{}", subject, number));
        self.records
            .iter()
            .filter(|record| record.is_offering_of(&code))
            .filter(|record| match record.term() {
                Ok(record_term) => record_term == term,
                Err(e) => {
                    warn!("Skipping catalog record {}: {}", record.crn, e);
                    false
                }
            })
            .filter_map(|record| match record.to_course() {
                Ok(course) => Some(course),
                Err(e) => {
                    warn!(
                        "Skipping malformed catalog record {} ({} {}): {}",
                        record.crn, record.subject, record.section, e
                    );
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl CourseSource for JsonCatalogSource {
    async fn fetch(&self, subject: &str, number: &str, term: Term) -> Result<Vec<Course>> {
        Ok(self.offerings(subject, number, term))
    }

    fn classifier(&self) -> Classifier {
        self.classifier.clone()
    }
}
