//! Error types for courselists

use thiserror::Error;

/// Result type for courselists operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by the catalog core and its configuration layer.
///
/// Lookups never produce an error: a missing course is an absent value.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration file missing, unreadable or inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A clock value that is not a valid 24-hour `HHMM` time
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// A weekday name that could not be recognised
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    /// A term name other than Fall, Winter or Summer
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    /// A component type other than Lecture, Tutorial or Laboratory
    #[error("Invalid course type: {0}")]
    InvalidCourseKind(String),

    /// A catalog record that cannot be turned into a course
    #[error("Invalid course record: {0}")]
    InvalidRecord(String),

    /// A ranking strategy name that is not recognised
    #[error("Unknown ranking strategy: {0}")]
    UnknownStrategy(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
