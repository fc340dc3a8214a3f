//! Section-prefix subordination rules.
//!
//! A Tutorial or Laboratory belongs under the Lecture of the same subject
//! whose section starts with the same letter (`B2` under `B`). A Tutorial
//! section starting with `T`, or a Laboratory section starting with `L`, is a
//! wildcard and fits any Lecture of its subject.

use std::sync::Arc;

use super::Classifier;
use crate::models::{Course, CourseKind};

/// Leading section letter of a Tutorial that fits any Lecture.
pub const TUTORIAL_WILDCARD: char = 'T';
/// Leading section letter of a Laboratory that fits any Lecture.
pub const LABORATORY_WILDCARD: char = 'L';

/// True if `candidate` belongs directly under `node`.
pub fn section_prefix_subordinate(candidate: &Course, node: &Course) -> bool {
    if candidate.subject() != node.subject() || !node.is_lecture() {
        return false;
    }
    let (Some(lead), Some(node_lead)) = (
        candidate.section().chars().next(),
        node.section().chars().next(),
    ) else {
        return false;
    };

    match candidate.kind() {
        CourseKind::Tutorial => lead == node_lead || lead == TUTORIAL_WILDCARD,
        CourseKind::Laboratory => lead == node_lead || lead == LABORATORY_WILDCARD,
        CourseKind::Lecture => false,
    }
}

/// [`section_prefix_subordinate`] packaged for injection into a catalog.
pub fn section_prefix_classifier() -> Classifier {
    Arc::new(section_prefix_subordinate)
}
