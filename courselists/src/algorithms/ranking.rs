//! Orderings over finished selections.
//!
//! Both orderings read each member's current rank, so a selection list must
//! be re-sorted whenever a rank changes.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use super::combinations::Selection;
use crate::error::CatalogError;

/// Added to the variance so uniform selections do not divide by zero.
pub const VARIANCE_OFFSET: f64 = 0.1;

/// Trait for orderings that can rank selections
pub trait SelectionComparator: Send + Sync {
    /// `Ordering::Less` means `a` is preferred and sorts first.
    fn compare(&self, a: &Selection, b: &Selection) -> Ordering;
}

/// Highest total rank first. Equal totals keep their incoming order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxComparator;

impl SelectionComparator for MaxComparator {
    fn compare(&self, a: &Selection, b: &Selection) -> Ordering {
        b.rank_sum().cmp(&a.rank_sum())
    }
}

/// Highest `sum / (variance + 0.1)` first, favouring selections whose ranks
/// are both high and even. Equal scores fall back to the smaller sum of
/// registration numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxMinComparator;

impl SelectionComparator for MaxMinComparator {
    fn compare(&self, a: &Selection, b: &Selection) -> Ordering {
        MaxMinKey::of(a).cmp(&MaxMinKey::of(b))
    }
}

/// Precomputed [`MaxMinComparator`] ordering for one selection, so a sort
/// scores each selection once.
#[derive(Debug, Clone, Copy)]
struct MaxMinKey {
    score: f64,
    crn_sum: u64,
}

impl MaxMinKey {
    fn of(selection: &Selection) -> Self {
        Self {
            score: max_min_score(selection),
            crn_sum: selection.crn_sum(),
        }
    }
}

impl Ord for MaxMinKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.crn_sum.cmp(&other.crn_sum))
    }
}

impl PartialOrd for MaxMinKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MaxMinKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MaxMinKey {}

fn variance_from_sums(n: usize, sum: f64, sum_sq: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

/// Population variance `E[r^2] - E[r]^2`; zero for an empty slice.
pub fn population_variance(ranks: &[i32]) -> f64 {
    let (sum, sum_sq) = ranks.iter().fold((0.0, 0.0), |(sum, sum_sq), &r| {
        let r = f64::from(r);
        (sum + r, sum_sq + r * r)
    });
    variance_from_sums(ranks.len(), sum, sum_sq)
}

/// Score used by [`MaxMinComparator`]: `sum / (variance + 0.1)` over the
/// member ranks, in one pass.
pub fn max_min_score(selection: &Selection) -> f64 {
    let (n, sum, sum_sq) = selection
        .courses()
        .fold((0usize, 0.0, 0.0), |(n, sum, sum_sq), course| {
            let r = f64::from(course.rank());
            (n + 1, sum + r, sum_sq + r * r)
        });
    sum / (variance_from_sums(n, sum, sum_sq) + VARIANCE_OFFSET)
}

/// Which ordering the choice store applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingStrategy {
    Max,
    #[default]
    MaxMin,
}

impl RankingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingStrategy::Max => "max",
            RankingStrategy::MaxMin => "maxmin",
        }
    }

    pub fn comparator(&self) -> &'static dyn SelectionComparator {
        match self {
            RankingStrategy::Max => &MaxComparator,
            RankingStrategy::MaxMin => &MaxMinComparator,
        }
    }

    pub fn compare(&self, a: &Selection, b: &Selection) -> Ordering {
        self.comparator().compare(a, b)
    }

    /// Stable sort, best selection first. Each selection is scored once.
    pub fn sort(&self, selections: &mut [Selection]) {
        match self {
            RankingStrategy::Max => selections.sort_by_cached_key(|s| Reverse(s.rank_sum())),
            RankingStrategy::MaxMin => selections.sort_by_cached_key(MaxMinKey::of),
        }
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingStrategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(*c, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "max" => Ok(RankingStrategy::Max),
            "maxmin" => Ok(RankingStrategy::MaxMin),
            _ => Err(CatalogError::UnknownStrategy(s.to_string())),
        }
    }
}
