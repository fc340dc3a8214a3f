//! The course hierarchy.
//!
//! The root holds one [`Category`] per subject, each listing that subject's
//! Lectures. A Lecture may in turn hold categories keyed by component type
//! ("Tutorial", "Laboratory") listing the alternatives that go with it.
//! The root is not a course; callers address it through [`NodeRef::Root`].

use log::{debug, warn};
use serde::Serialize;
use std::collections::btree_map::Values;
use std::collections::BTreeMap;

use super::category::{Category, CourseNode};
use crate::models::{Course, CourseKey, CourseKind, RegistrationNumber};

/// Where an insertion attempt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Lecture placed in the root category for its subject.
    Root { subject: String },
    /// Component placed in the category `category` below course `parent`.
    Under {
        parent: RegistrationNumber,
        category: String,
    },
    /// The classifier accepted the course nowhere; it was not attached.
    Unroutable,
    /// An offering with the same registration number or key is already in the tree.
    Duplicate,
}

impl Placement {
    pub fn is_attached(&self) -> bool {
        matches!(self, Placement::Root { .. } | Placement::Under { .. })
    }
}

/// A course that was handed to the tree but not attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCourse {
    pub crn: RegistrationNumber,
    pub key: CourseKey,
}

impl SkippedCourse {
    fn of(course: &Course) -> Self {
        Self {
            crn: course.crn(),
            key: course.key(),
        }
    }
}

/// Outcome of inserting one or more courses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InsertReport {
    pub attached: Vec<RegistrationNumber>,
    pub unroutable: Vec<SkippedCourse>,
    pub duplicates: Vec<SkippedCourse>,
    pub warnings: Vec<String>,
}

impl InsertReport {
    /// True when every course was attached and nothing needs the caller's attention.
    pub fn is_clean(&self) -> bool {
        self.unroutable.is_empty() && self.duplicates.is_empty() && self.warnings.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: InsertReport) {
        self.attached.extend(other.attached);
        self.unroutable.extend(other.unroutable);
        self.duplicates.extend(other.duplicates);
        self.warnings.extend(other.warnings);
    }

    fn record(&mut self, course: SkippedCourse, placement: &Placement) {
        match placement {
            Placement::Root { .. } | Placement::Under { .. } => self.attached.push(course.crn),
            Placement::Unroutable => self.unroutable.push(course),
            Placement::Duplicate => self.duplicates.push(course),
        }
    }
}

/// Read-only view of a position in the tree: the root, or a placed course.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a HierarchyTree),
    Course(&'a CourseNode),
}

impl<'a> NodeRef<'a> {
    /// The course at this position; `None` for the root.
    pub fn course(&self) -> Option<&'a Course> {
        match *self {
            NodeRef::Root(_) => None,
            NodeRef::Course(node) => Some(node.course()),
        }
    }

    pub fn categories(&self) -> Values<'a, String, Category> {
        match *self {
            NodeRef::Root(tree) => tree.categories.values(),
            NodeRef::Course(node) => node.categories(),
        }
    }

    pub fn has_categories(&self) -> bool {
        match *self {
            NodeRef::Root(tree) => !tree.categories.is_empty(),
            NodeRef::Course(node) => node.has_categories(),
        }
    }
}

/// Owns every placed course. Each course is reachable by exactly one path.
#[derive(Debug, Clone, Default)]
pub struct HierarchyTree {
    categories: BTreeMap<String, Category>,
}

impl HierarchyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Root(self)
    }

    pub fn root_categories(&self) -> Values<'_, String, Category> {
        self.categories.values()
    }

    pub fn category(&self, subject: &str) -> Option<&Category> {
        self.categories.get(subject)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of placed courses.
    pub fn len(&self) -> usize {
        fn count(categories: &BTreeMap<String, Category>) -> usize {
            categories
                .values()
                .flat_map(|category| category.courses())
                .map(|node| 1 + count(&node.categories))
                .sum()
        }
        count(&self.categories)
    }

    /// Drop every course; the tree is empty afterwards.
    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Insert one course.
    ///
    /// Lectures go into the root category for their subject. Any other course
    /// is offered depth-first to every placed course, and lands in the
    /// category named after its type below the first course `subordinate`
    /// accepts it under.
    ///
    /// # Arguments
    /// * `course` - Course to place
    /// * `subordinate` - `subordinate(candidate, node)` is true when `candidate`
    ///   belongs directly under `node`
    ///
    /// # Returns
    /// Where the course was placed, or why it was not.
    pub fn add(
        &mut self,
        course: Course,
        subordinate: &dyn Fn(&Course, &Course) -> bool,
    ) -> Placement {
        if self.contains_course(&course) {
            warn!(
                "Skipping duplicate course {} ({}): already in the hierarchy",
                course.crn(),
                course.key()
            );
            return Placement::Duplicate;
        }

        if course.is_lecture() {
            let subject = course.subject().to_string();
            debug!("Placing lecture {} under subject {}", course.crn(), subject);
            self.categories
                .entry(subject.clone())
                .or_insert_with(|| Category::new(subject.clone()))
                .insert(CourseNode::new(course));
            return Placement::Root { subject };
        }

        let mut pending = course;
        for category in self.categories.values_mut() {
            for node in category.courses_mut() {
                match attach(node, pending, subordinate) {
                    Ok(placement) => return placement,
                    Err(course) => pending = course,
                }
            }
        }

        warn!(
            "Course {} ({}) matched no parent in the hierarchy and was not attached",
            pending.crn(),
            pending.key()
        );
        Placement::Unroutable
    }

    /// Insert a batch. Every Lecture is inserted before any other course so
    /// that parents exist before their components look for them; input order
    /// is kept within each group.
    pub fn add_all(
        &mut self,
        courses: impl IntoIterator<Item = Course>,
        subordinate: &dyn Fn(&Course, &Course) -> bool,
    ) -> InsertReport {
        let (lectures, components): (Vec<Course>, Vec<Course>) =
            courses.into_iter().partition(Course::is_lecture);

        let mut report = InsertReport::default();
        for course in lectures.into_iter().chain(components) {
            let identity = SkippedCourse::of(&course);
            let placement = self.add(course, subordinate);
            report.record(identity, &placement);
        }
        report
    }

    pub fn get(&self, crn: RegistrationNumber) -> Option<&Course> {
        find(&self.categories, &|course| course.crn() == crn).map(CourseNode::course)
    }

    pub fn get_by_key(&self, subject: &str, section: &str, kind: CourseKind) -> Option<&Course> {
        find(&self.categories, &|course| course.matches_key(subject, section, kind))
            .map(CourseNode::course)
    }

    /// Placed node for `crn`, with its categories.
    pub fn node(&self, crn: RegistrationNumber) -> Option<&CourseNode> {
        find(&self.categories, &|course| course.crn() == crn)
    }

    pub(crate) fn get_mut(&mut self, crn: RegistrationNumber) -> Option<&mut Course> {
        find_mut(&mut self.categories, &|course| course.crn() == crn).map(CourseNode::course_mut)
    }

    pub fn contains(&self, crn: RegistrationNumber) -> bool {
        self.get(crn).is_some()
    }

    pub fn contains_key(&self, subject: &str, section: &str, kind: CourseKind) -> bool {
        self.get_by_key(subject, section, kind).is_some()
    }

    /// True if any placed course is the same offering as `course`.
    pub fn contains_course(&self, course: &Course) -> bool {
        find(&self.categories, &|placed| placed.same_offering(course)).is_some()
    }

    /// Remove the course with this registration number, along with anything
    /// placed below it. A category left without children is removed too.
    ///
    /// # Returns
    /// The removed course, or `None` if no course matched.
    pub fn remove(&mut self, crn: RegistrationNumber) -> Option<Course> {
        remove_matching(&mut self.categories, &|course| course.crn() == crn)
            .map(CourseNode::into_course)
    }

    /// Remove by composite key; see [`HierarchyTree::remove`].
    pub fn remove_by_key(
        &mut self,
        subject: &str,
        section: &str,
        kind: CourseKind,
    ) -> Option<Course> {
        remove_matching(&mut self.categories, &|course| {
            course.matches_key(subject, section, kind)
        })
        .map(CourseNode::into_course)
    }

    /// Every placed course in depth-first order. Lectures that have
    /// components are listed too, ahead of their components.
    pub fn get_all(&self) -> Vec<&Course> {
        fn walk<'a>(categories: &'a BTreeMap<String, Category>, acc: &mut Vec<&'a Course>) {
            for category in categories.values() {
                for node in category.courses() {
                    acc.push(node.course());
                    walk(&node.categories, acc);
                }
            }
        }

        let mut courses = Vec::new();
        walk(&self.categories, &mut courses);
        courses
    }
}

fn attach(
    node: &mut CourseNode,
    course: Course,
    subordinate: &dyn Fn(&Course, &Course) -> bool,
) -> Result<Placement, Course> {
    if subordinate(&course, node.course()) {
        let parent = node.course().crn();
        let key = course.kind().as_str().to_string();
        debug!("Placing {} {} under {}", course.kind(), course.crn(), parent);
        node.categories
            .entry(key.clone())
            .or_insert_with(|| Category::new(key.clone()))
            .insert(CourseNode::new(course));
        return Ok(Placement::Under {
            parent,
            category: key,
        });
    }

    let mut pending = course;
    for category in node.categories.values_mut() {
        for child in category.courses_mut() {
            match attach(child, pending, subordinate) {
                Ok(placement) => return Ok(placement),
                Err(course) => pending = course,
            }
        }
    }
    Err(pending)
}

fn find<'a>(
    categories: &'a BTreeMap<String, Category>,
    matches: &dyn Fn(&Course) -> bool,
) -> Option<&'a CourseNode> {
    for category in categories.values() {
        for node in category.courses() {
            if matches(node.course()) {
                return Some(node);
            }
            if let Some(found) = find(&node.categories, matches) {
                return Some(found);
            }
        }
    }
    None
}

fn find_mut<'a>(
    categories: &'a mut BTreeMap<String, Category>,
    matches: &dyn Fn(&Course) -> bool,
) -> Option<&'a mut CourseNode> {
    for category in categories.values_mut() {
        for node in category.courses_mut() {
            if matches(node.course()) {
                return Some(node);
            }
            if let Some(found) = find_mut(&mut node.categories, matches) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_matching(
    categories: &mut BTreeMap<String, Category>,
    matches: &dyn Fn(&Course) -> bool,
) -> Option<CourseNode> {
    let hit = categories.iter().find_map(|(key, category)| {
        category
            .courses()
            .find(|node| matches(node.course()))
            .map(|node| (key.clone(), node.course().crn()))
    });

    if let Some((key, crn)) = hit {
        let category = categories.get_mut(&key)?;
        let removed = category.remove(crn);
        if category.is_empty() {
            debug!("Dropping empty category {}", key);
            categories.remove(&key);
        }
        return removed;
    }

    for category in categories.values_mut() {
        for node in category.courses_mut() {
            if let Some(removed) = remove_matching(&mut node.categories, matches) {
                return Some(removed);
            }
        }
    }
    None
}
