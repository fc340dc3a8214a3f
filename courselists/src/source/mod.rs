//! Course sources: where courses come from and how they nest.
//!
//! A source yields complete [`Course`] records for one subject, number and
//! term, and supplies the [`Classifier`] deciding which course belongs under
//! which. Network scraping of registration sites is left to implementors;
//! [`JsonCatalogSource`] reads an offline catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{Course, Term};

pub mod classifier;
pub mod json_source;


pub use classifier::{section_prefix_classifier, section_prefix_subordinate};
pub use json_source::JsonCatalogSource;

/// `classifier(candidate, node)` is true when `candidate` belongs directly
/// under `node` in the hierarchy.
pub type Classifier = Arc<dyn Fn(&Course, &Course) -> bool + Send + Sync>;

/// Provider of catalog offerings.
///
/// Implementations must return only complete records: a record that cannot
/// be read in full is dropped, never returned half-filled.
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch every offering of `subject` + `number` (e.g. `COMP` + `1405`) in `term`.
    async fn fetch(&self, subject: &str, number: &str, term: Term) -> anyhow::Result<Vec<Course>>;

    /// Subordination rules matching this source's section conventions.
    fn classifier(&self) -> Classifier;
}
