//! Catalog session services: the owned [`Catalog`] context, its ordered
//! [`ChoiceStore`] and background recomputation.

pub mod catalog;
pub mod choice_store;
pub mod jobs;

pub use catalog::{Catalog, FETCH_FAILED};
pub use choice_store::ChoiceStore;
pub use jobs::{spawn_choice_job, spawn_choice_job_with_deadline, ChoiceJob, ChoiceResult};
