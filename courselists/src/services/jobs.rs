//! Background recomputation of the choice store.
//!
//! Enumeration is CPU-bound and can take a long time on large catalogs, so it
//! runs on tokio's blocking pool against an owned copy of the tree. The
//! finished store is handed back to the owning [`Catalog`](super::Catalog),
//! which keeps it only if nothing changed in the meantime.

use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;

use super::choice_store::ChoiceStore;
use crate::algorithms::RankingStrategy;
use crate::tree::HierarchyTree;

/// Everything needed to rebuild the store away from the catalog.
#[derive(Debug, Clone)]
pub struct ChoiceJob {
    tree: HierarchyTree,
    strategy: RankingStrategy,
    generation: u64,
}

/// A store built by a [`ChoiceJob`], tagged with the catalog generation it
/// was built from.
#[derive(Debug, Clone)]
pub struct ChoiceResult {
    pub generation: u64,
    pub store: ChoiceStore,
}

impl ChoiceJob {
    pub fn new(tree: HierarchyTree, strategy: RankingStrategy, generation: u64) -> Self {
        Self {
            tree,
            strategy,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn strategy(&self) -> RankingStrategy {
        self.strategy
    }

    /// Build the store on the current thread.
    pub fn run(self) -> ChoiceResult {
        debug!(
            "Running choice job for generation {} ({} courses)",
            self.generation,
            self.tree.len()
        );
        ChoiceResult {
            generation: self.generation,
            store: ChoiceStore::build(&self.tree, self.strategy),
        }
    }
}

/// Run `job` on the blocking pool and wait for it.
///
/// # Returns
/// * `Ok(ChoiceResult)` once enumeration finishes
/// * `Err` if the worker panicked or was cancelled
pub async fn spawn_choice_job(job: ChoiceJob) -> Result<ChoiceResult> {
    let generation = job.generation();
    tokio::task::spawn_blocking(move || job.run())
        .await
        .with_context(|| format!("Choice job for generation {} did not finish", generation))
}

/// Like [`spawn_choice_job`], but give up waiting after `deadline`.
///
/// The enumeration itself cannot be interrupted; past the deadline its result
/// is dropped when it eventually completes.
///
/// # Returns
/// * `Ok(Some(result))` if the job finished in time
/// * `Ok(None)` if the deadline passed first
pub async fn spawn_choice_job_with_deadline(
    job: ChoiceJob,
    deadline: Duration,
) -> Result<Option<ChoiceResult>> {
    let generation = job.generation();
    match tokio::time::timeout(deadline, spawn_choice_job(job)).await {
        Ok(result) => result.map(Some),
        Err(_) => {
            debug!(
                "Choice job for generation {} missed its {:?} deadline",
                generation, deadline
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseKind, Day, Term, TimeBlock};

    fn no_components(_: &Course, _: &Course) -> bool {
        false
    }

    fn tree_with_two_lectures() -> HierarchyTree {
        let mut tree = HierarchyTree::new();
        for (crn, day) in [(1u32, Day::Monday), (2, Day::Tuesday)] {
            tree.add(
                Course::new(
                    crn,
                    "COMP1405",
                    format!("S{}", crn),
                    CourseKind::Lecture,
                    "Staff",
                    vec![TimeBlock::new(day, Term::Fall, 900, 1000)],
                ),
                &no_components,
            );
        }
        tree
    }

    #[test]
    fn test_run_builds_store() {
        let job = ChoiceJob::new(tree_with_two_lectures(), RankingStrategy::Max, 7);
        assert_eq!(job.strategy(), RankingStrategy::Max);

        let result = job.run();
        assert_eq!(result.generation, 7);
        assert_eq!(result.store.len(), 2);
        assert_eq!(result.store.strategy(), RankingStrategy::Max);
    }

    #[tokio::test]
    async fn test_spawn_choice_job() {
        let job = ChoiceJob::new(tree_with_two_lectures(), RankingStrategy::MaxMin, 3);
        let result = spawn_choice_job(job).await.unwrap();
        assert_eq!(result.generation, 3);
        assert_eq!(result.store.len(), 2);
    }

    #[tokio::test]
    async fn test_generous_deadline_returns_result() {
        let job = ChoiceJob::new(tree_with_two_lectures(), RankingStrategy::MaxMin, 1);
        let result = spawn_choice_job_with_deadline(job, Duration::from_secs(30))
            .await
            .unwrap();
        assert!(result.is_some());
    }
}
