//! Conflict-free selections over the course hierarchy.
//!
//! A selection picks exactly one course from every category reachable through
//! the courses it contains. Selections are built bottom-up: each category
//! contributes the union of its children's selections, and that union is
//! cross-merged into the running set. Pairs that conflict are dropped at the
//! merge that first brings them together, so no conflicting combination is
//! ever extended further.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Course, RegistrationNumber};
use crate::tree::{HierarchyTree, NodeRef};

/// One candidate timetable: a set of courses ordered by registration number.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    courses: BTreeMap<RegistrationNumber, Course>,
}

impl Selection {
    pub fn single(course: Course) -> Self {
        let mut courses = BTreeMap::new();
        courses.insert(course.crn(), course);
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in ascending registration-number order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    pub fn crns(&self) -> Vec<RegistrationNumber> {
        self.courses.keys().copied().collect()
    }

    pub fn contains(&self, crn: RegistrationNumber) -> bool {
        self.courses.contains_key(&crn)
    }

    pub fn ranks(&self) -> Vec<i32> {
        self.courses.values().map(Course::rank).collect()
    }

    pub fn rank_sum(&self) -> i64 {
        self.courses.values().map(|c| i64::from(c.rank())).sum()
    }

    /// Sum of member registration numbers, used to break ranking ties.
    pub fn crn_sum(&self) -> u64 {
        self.courses.keys().map(|crn| u64::from(crn.value())).sum()
    }

    /// True if any course here has a block that conflicts with any block of
    /// any course in `other`.
    pub fn conflicts_with(&self, other: &Selection) -> bool {
        self.courses
            .values()
            .any(|mine| other.courses.values().any(|theirs| mine.conflicts_with(theirs)))
    }

    /// Union of the two selections.
    pub fn merged(&self, other: &Selection) -> Selection {
        let mut courses = self.courses.clone();
        for (crn, course) in &other.courses {
            courses.entry(*crn).or_insert_with(|| course.clone());
        }
        Selection { courses }
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.courses.keys().eq(other.courses.keys())
    }
}

impl Eq for Selection {}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, course) in self.courses.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", course)?;
        }
        Ok(())
    }
}

/// Every conflict-free selection over the subtree at `node`.
///
/// A course node seeds the running set with itself; the root seeds it with
/// the empty selection. Each category below the node must then be satisfied
/// by exactly one of its children: a category with no surviving alternative
/// leaves no selections at all. Empty selections are never returned.
///
/// # Arguments
/// * `node` - Subtree to enumerate, usually [`HierarchyTree::root`]
///
/// # Returns
/// Selections in the order they were merged; each is ordered internally by
/// registration number.
pub fn make_choices(node: NodeRef<'_>) -> Vec<Selection> {
    let mut running = match node.course() {
        Some(course) => vec![Selection::single(course.clone())],
        None => vec![Selection::default()],
    };

    for category in node.categories() {
        let alternatives: Vec<Selection> = category
            .courses()
            .flat_map(|child| make_choices(NodeRef::Course(child)))
            .collect();
        running = cross_merge(&running, &alternatives);
        if running.is_empty() {
            break;
        }
    }

    running.retain(|selection| !selection.is_empty());
    running
}

/// Shorthand for [`make_choices`] at the root of `tree`.
pub fn make_all_choices(tree: &HierarchyTree) -> Vec<Selection> {
    make_choices(tree.root())
}

/// Pair every selection on the left with every selection on the right,
/// keeping the union of each pair that does not conflict.
pub fn cross_merge(left: &[Selection], right: &[Selection]) -> Vec<Selection> {
    let mut merged = Vec::with_capacity(left.len().saturating_mul(right.len()));
    for a in left {
        for b in right {
            if !a.conflicts_with(b) {
                merged.push(a.merged(b));
            }
        }
    }
    merged
}
