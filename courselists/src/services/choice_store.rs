//! Ordered store of every selection over the current hierarchy.

use log::info;
use serde::Serialize;
use std::collections::HashSet;

use crate::algorithms::{make_all_choices, RankingStrategy, Selection};
use crate::models::RegistrationNumber;
use crate::tree::HierarchyTree;

/// Selections ordered best-first under the active [`RankingStrategy`].
///
/// The store is only ever replaced wholesale by [`ChoiceStore::rebuild`]; it
/// is never patched after a single course or rank changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChoiceStore {
    strategy: RankingStrategy,
    choices: Vec<Selection>,
}

impl ChoiceStore {
    pub fn new(strategy: RankingStrategy) -> Self {
        Self {
            strategy,
            choices: Vec::new(),
        }
    }

    /// Derive and order every selection over `tree`.
    pub fn build(tree: &HierarchyTree, strategy: RankingStrategy) -> Self {
        let mut store = Self::new(strategy);
        store.rebuild(tree);
        store
    }

    /// Replace the contents with every selection over `tree`, ordered by the
    /// active strategy. Equal selections (same registration numbers) are kept
    /// once, at their first position.
    pub fn rebuild(&mut self, tree: &HierarchyTree) {
        *self = Self::from_selections(make_all_choices(tree), self.strategy);
        info!(
            "Built {} choices over {} courses, ordered by {}",
            self.choices.len(),
            tree.len(),
            self.strategy
        );
    }

    /// Order `selections` by `strategy`, keeping the first of any that share
    /// the same registration numbers.
    pub fn from_selections(
        selections: impl IntoIterator<Item = Selection>,
        strategy: RankingStrategy,
    ) -> Self {
        let mut seen: HashSet<Vec<RegistrationNumber>> = HashSet::new();
        let mut choices: Vec<Selection> = selections
            .into_iter()
            .filter(|selection| seen.insert(selection.crns()))
            .collect();
        strategy.sort(&mut choices);
        Self { strategy, choices }
    }

    pub fn strategy(&self) -> RankingStrategy {
        self.strategy
    }

    /// Switch the ordering. The caller rebuilds afterwards.
    pub fn set_strategy(&mut self, strategy: RankingStrategy) {
        self.strategy = strategy;
    }

    pub fn choices(&self) -> &[Selection] {
        &self.choices
    }

    pub fn best(&self) -> Option<&Selection> {
        self.choices.first()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn into_choices(self) -> Vec<Selection> {
        self.choices
    }
}
