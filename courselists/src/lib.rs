//! courselists - conflict-free course combinations ranked by preference
//!
//! Courses from a catalog source are arranged into a hierarchy of subjects,
//! lectures and the tutorial/laboratory alternatives that go with each
//! lecture. Every conflict-free pick of one course per category is derived
//! from that hierarchy and ordered by the ranks a user assigns.
//!
//! # Example
//!
//! ```no_run
//! use courselists::{Catalog, JsonCatalogSource, Term};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = JsonCatalogSource::from_file("catalog.json")?;
//!     let mut catalog = Catalog::for_source(&source);
//!
//!     let report = catalog.import(&source, "COMP", "1405", Term::Fall).await;
//!     println!("Attached {} courses", report.attached.len());
//!
//!     for selection in catalog.choices() {
//!         println!("{}\n", selection);
//!     }
//!     Ok(())
//! }
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod source;
pub mod tree;

pub use algorithms::{RankingStrategy, Selection};
pub use config::{CatalogConfig, RecomputePolicy};
pub use error::{CatalogError, Result};
pub use models::{Course, CourseKey, CourseKind, Day, RegistrationNumber, Term, TimeBlock};
pub use services::{Catalog, ChoiceJob, ChoiceResult, ChoiceStore};
pub use source::{section_prefix_classifier, Classifier, CourseSource, JsonCatalogSource};
pub use tree::{HierarchyTree, InsertReport, Placement};
