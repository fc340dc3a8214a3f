//! Selection algorithms.
//!
//! This module derives every conflict-free selection from the course hierarchy
//! and orders selections by the ranks users assign.
//!
//! # Components
//!
//! - [`combinations`]: recursive enumeration with early conflict pruning
//! - [`ranking`]: the `Max` and `MaxMin` orderings
//!
//! # Example
//!
//! ```ignore
//! use courselists::algorithms::{make_all_choices, RankingStrategy};
//!
//! let mut choices = make_all_choices(&tree);
//! RankingStrategy::MaxMin.sort(&mut choices);
//! ```

pub mod combinations;
pub mod ranking;

pub use combinations::{cross_merge, make_all_choices, make_choices, Selection};
pub use ranking::{
    max_min_score, population_variance, MaxComparator, MaxMinComparator, RankingStrategy,
    SelectionComparator,
};
