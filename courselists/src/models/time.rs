//! Weekly meeting times.
//!
//! Times are 24-hour clock integers: `935` is 9:35 and `1335` is 13:35.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Day of the week a block meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = CatalogError;

    /// Accepts full names and the usual abbreviations (`Mon`, `Tue`, `Thu`, ...),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Day::Monday),
            "tue" | "tues" | "tuesday" => Ok(Day::Tuesday),
            "wed" | "wednesday" => Ok(Day::Wednesday),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Day::Thursday),
            "fri" | "friday" => Ok(Day::Friday),
            "sat" | "saturday" => Ok(Day::Saturday),
            "sun" | "sunday" => Ok(Day::Sunday),
            _ => Err(CatalogError::InvalidDay(s.to_string())),
        }
    }
}

/// Academic term a block belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Term {
    #[default]
    Fall,
    Winter,
    Summer,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Fall => "Fall",
            Term::Winter => "Winter",
            Term::Summer => "Summer",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fall" => Ok(Term::Fall),
            "winter" => Ok(Term::Winter),
            "summer" => Ok(Term::Summer),
            _ => Err(CatalogError::InvalidTerm(s.to_string())),
        }
    }
}

/// Returns true if `value` reads as a 24-hour `HHMM` clock time.
pub fn is_valid_clock(value: u16) -> bool {
    value / 100 < 24 && value % 100 < 60
}

/// Parse an `"HH:MM"` (or `"HHMM"`) string into a 24-hour clock integer.
///
/// # Arguments
/// * `text` - Clock text such as `"09:35"` or `"1335"`
///
/// # Returns
/// * `Ok(935)` for `"09:35"`
/// * `Err(CatalogError::InvalidTime)` if the text is not a valid time of day
pub fn parse_clock(text: &str) -> Result<u16, CatalogError> {
    let digits: String = text.trim().chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CatalogError::InvalidTime(text.to_string()));
    }
    let value: u16 = digits
        .parse()
        .map_err(|_| CatalogError::InvalidTime(text.to_string()))?;
    if !is_valid_clock(value) {
        return Err(CatalogError::InvalidTime(text.to_string()));
    }
    Ok(value)
}

/// One weekly meeting: a day, a term and a closed clock interval.
///
/// Immutable once built. Equality is exact field equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBlock {
    day: Day,
    term: Term,
    start: u16,
    end: u16,
}

impl TimeBlock {
    /// Build a block without checking the clock values.
    pub fn new(day: Day, term: Term, start: u16, end: u16) -> Self {
        Self {
            day,
            term,
            start,
            end,
        }
    }

    /// Build a block, rejecting invalid clock values and intervals that end
    /// before they start.
    pub fn try_new(day: Day, term: Term, start: u16, end: u16) -> Result<Self, CatalogError> {
        if !is_valid_clock(start) {
            return Err(CatalogError::InvalidTime(start.to_string()));
        }
        if !is_valid_clock(end) {
            return Err(CatalogError::InvalidTime(end.to_string()));
        }
        if end < start {
            return Err(CatalogError::InvalidTime(format!(
                "block ends at {} before it starts at {}",
                end, start
            )));
        }
        Ok(Self::new(day, term, start, end))
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn term(&self) -> Term {
        self.term
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Two blocks conflict when they share day and term and their closed
    /// intervals touch. A block ending at 10:00 conflicts with one starting
    /// at 10:00.
    pub fn conflicts(&self, other: &TimeBlock) -> bool {
        self.day == other.day
            && self.term == other.term
            && self.start <= other.end
            && self.end >= other.start
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{:02}-{}:{:02}",
            self.day,
            self.start / 100,
            self.start % 100,
            self.end / 100,
            self.end % 100
        )
    }
}
