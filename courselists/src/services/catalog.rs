//! The catalog session: one hierarchy, its classifier and its choices.
//!
//! Every operation a presentation layer needs goes through [`Catalog`]. A
//! catalog owns all of its state, so independent catalogs can live on
//! separate threads without coordinating. A single catalog is not
//! synchronized; callers serialize access to it.

use log::{debug, info, warn};
use std::fmt;

use super::choice_store::ChoiceStore;
use super::jobs::{ChoiceJob, ChoiceResult};
use crate::algorithms::{RankingStrategy, Selection};
use crate::config::{CatalogConfig, RecomputePolicy};
use crate::error::Result;
use crate::models::{Course, CourseKind, RegistrationNumber, Term};
use crate::source::{Classifier, CourseSource};
use crate::tree::{HierarchyTree, InsertReport, Placement};

/// Prefix of the report warning left by an import whose fetch failed.
pub const FETCH_FAILED: &str = "fetch_failed";

pub struct Catalog {
    tree: HierarchyTree,
    classifier: Classifier,
    store: ChoiceStore,
    policy: RecomputePolicy,
    term: Term,
    generation: u64,
    stale: bool,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("courses", &self.tree.len())
            .field("choices", &self.store.len())
            .field("strategy", &self.store.strategy())
            .field("policy", &self.policy)
            .field("generation", &self.generation)
            .field("stale", &self.stale)
            .finish()
    }
}

impl Catalog {
    /// Empty catalog using `classifier`, MaxMin ordering and eager recomputation.
    pub fn new(classifier: Classifier) -> Self {
        Self {
            tree: HierarchyTree::new(),
            classifier,
            store: ChoiceStore::new(RankingStrategy::default()),
            policy: RecomputePolicy::default(),
            term: Term::default(),
            generation: 0,
            stale: false,
        }
    }

    /// Empty catalog routing courses with the rules of `source`.
    pub fn for_source<S: CourseSource + ?Sized>(source: &S) -> Self {
        Self::new(source.classifier())
    }

    /// Empty catalog with the strategy, term and policy from `config`.
    pub fn with_config(config: &CatalogConfig, classifier: Classifier) -> Result<Self> {
        let mut catalog = Self::new(classifier);
        catalog.store.set_strategy(config.ranking_strategy()?);
        catalog.policy = config.recompute_policy()?;
        catalog.term = config.term()?;
        Ok(catalog)
    }

    pub fn tree(&self) -> &HierarchyTree {
        &self.tree
    }

    pub fn policy(&self) -> RecomputePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RecomputePolicy) {
        self.policy = policy;
        if policy == RecomputePolicy::Eager && self.stale {
            self.rebuild();
        }
    }

    /// Term used by [`Catalog::import_default_term`].
    pub fn term(&self) -> Term {
        self.term
    }

    pub fn set_term(&mut self, term: Term) {
        self.term = term;
    }

    /// Bumped on every change that invalidates the choices.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the stored choices do not reflect the latest change.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ==================== Courses ====================

    pub fn add_course(&mut self, course: Course) -> Placement {
        let placement = self.tree.add(course, &*self.classifier);
        if placement.is_attached() {
            self.changed();
        }
        placement
    }

    /// Insert a batch, Lectures first.
    pub fn add_courses(&mut self, courses: impl IntoIterator<Item = Course>) -> InsertReport {
        let report = self.tree.add_all(courses, &*self.classifier);
        if !report.attached.is_empty() {
            self.changed();
        }
        report
    }

    /// Remove the course and everything placed under it.
    pub fn remove_course(&mut self, crn: RegistrationNumber) -> Option<Course> {
        let removed = self.tree.remove(crn);
        if removed.is_some() {
            self.changed();
        }
        removed
    }

    pub fn remove_course_by_key(
        &mut self,
        subject: &str,
        section: &str,
        kind: CourseKind,
    ) -> Option<Course> {
        let removed = self.tree.remove_by_key(subject, section, kind);
        if removed.is_some() {
            self.changed();
        }
        removed
    }

    /// Set the rank of a placed course.
    ///
    /// # Returns
    /// The previous rank, or `None` if no course has this registration number.
    pub fn set_rank(&mut self, crn: RegistrationNumber, rank: i32) -> Option<i32> {
        let course = self.tree.get_mut(crn)?;
        let previous = course.rank();
        course.set_rank(rank);
        debug!("Rank of {} changed from {} to {}", crn, previous, rank);
        self.changed();
        Some(previous)
    }

    pub fn get_course(&self, crn: RegistrationNumber) -> Option<&Course> {
        self.tree.get(crn)
    }

    pub fn get_course_by_key(
        &self,
        subject: &str,
        section: &str,
        kind: CourseKind,
    ) -> Option<&Course> {
        self.tree.get_by_key(subject, section, kind)
    }

    /// Every placed course, depth-first.
    pub fn list_all(&self) -> Vec<&Course> {
        self.tree.get_all()
    }

    /// Drop every course.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.changed();
    }

    // ==================== Ranking ====================

    pub fn ranking_strategy(&self) -> RankingStrategy {
        self.store.strategy()
    }

    pub fn set_ranking_strategy(&mut self, strategy: RankingStrategy) {
        self.store.set_strategy(strategy);
        self.changed();
    }

    /// Replace the subordination rules. Courses already placed were routed by
    /// the old rules, so the tree is cleared.
    pub fn set_classifier(&mut self, classifier: Classifier) {
        self.classifier = classifier;
        if !self.tree.is_empty() {
            info!("Classifier replaced; clearing {} courses", self.tree.len());
        }
        self.tree.clear();
        self.changed();
    }

    // ==================== Choices ====================

    /// Rebuild the store from the tree now, whatever the policy.
    pub fn make_choices(&mut self) -> &[Selection] {
        self.rebuild();
        self.store.choices()
    }

    /// Every selection, best first. Under the lazy policy a stale store is
    /// rebuilt before it is returned.
    pub fn choices(&mut self) -> &[Selection] {
        if self.stale {
            self.rebuild();
        }
        self.store.choices()
    }

    /// The store as last built, without rebuilding. May be stale; see
    /// [`Catalog::is_stale`].
    pub fn store(&self) -> &ChoiceStore {
        &self.store
    }

    /// Owned copy of everything needed to rebuild the store elsewhere.
    pub fn snapshot(&self) -> ChoiceJob {
        ChoiceJob::new(self.tree.clone(), self.store.strategy(), self.generation)
    }

    /// Adopt a store built by a [`ChoiceJob`].
    ///
    /// # Returns
    /// `true` if the result was installed; `false` if the catalog changed
    /// after the snapshot was taken and the result was discarded.
    pub fn install(&mut self, result: ChoiceResult) -> bool {
        if result.generation != self.generation {
            debug!(
                "Discarding stale choices from generation {} (catalog is at {})",
                result.generation, self.generation
            );
            return false;
        }
        self.store = result.store;
        self.stale = false;
        true
    }

    // ==================== Import ====================

    /// Fetch the offerings of `subject` + `number` in `term` and insert them.
    ///
    /// A failed fetch inserts nothing; the report then carries a warning
    /// starting with [`FETCH_FAILED`].
    pub async fn import<S: CourseSource + ?Sized>(
        &mut self,
        source: &S,
        subject: &str,
        number: &str,
        term: Term,
    ) -> InsertReport {
        match source.fetch(subject, number, term).await {
            Ok(courses) => {
                info!(
                    "Fetched {} offerings of {}{} for {}",
                    courses.len(),
                    subject,
                    number,
                    term
                );
                self.add_courses(courses)
            }
            Err(e) => {
                warn!("Failed to fetch {}{} for {}: {:#}", subject, number, term, e);
                InsertReport {
                    warnings: vec![format!(
                        "{}: {}{} {}: {:#}",
                        FETCH_FAILED, subject, number, term, e
                    )],
                    ..InsertReport::default()
                }
            }
        }
    }

    /// [`Catalog::import`] in the catalog's configured term.
    pub async fn import_default_term<S: CourseSource + ?Sized>(
        &mut self,
        source: &S,
        subject: &str,
        number: &str,
    ) -> InsertReport {
        let term = self.term;
        self.import(source, subject, number, term).await
    }

    fn changed(&mut self) {
        self.generation += 1;
        match self.policy {
            RecomputePolicy::Eager => self.rebuild(),
            RecomputePolicy::Lazy => self.stale = true,
        }
    }

    fn rebuild(&mut self) {
        self.store.rebuild(&self.tree);
        self.stale = false;
    }
}
