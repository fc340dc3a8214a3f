//! Grouping nodes of the course hierarchy.

use std::collections::btree_map::{Values, ValuesMut};
use std::collections::BTreeMap;

use crate::models::{Course, RegistrationNumber};

/// Alternatives that share a parent: Lectures of one subject under the root,
/// or the Tutorials (or Laboratories) of one Lecture.
///
/// Children are kept ordered by registration number. A category is never left
/// empty inside a tree.
#[derive(Debug, Clone)]
pub struct Category {
    key: String,
    courses: BTreeMap<RegistrationNumber, CourseNode>,
}

impl Category {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            courses: BTreeMap::new(),
        }
    }

    /// Subject code for root categories, component type below a Lecture.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> Values<'_, RegistrationNumber, CourseNode> {
        self.courses.values()
    }

    pub(crate) fn courses_mut(&mut self) -> ValuesMut<'_, RegistrationNumber, CourseNode> {
        self.courses.values_mut()
    }

    pub fn get(&self, crn: RegistrationNumber) -> Option<&CourseNode> {
        self.courses.get(&crn)
    }

    pub(crate) fn insert(&mut self, node: CourseNode) {
        self.courses.insert(node.course.crn(), node);
    }

    pub(crate) fn remove(&mut self, crn: RegistrationNumber) -> Option<CourseNode> {
        self.courses.remove(&crn)
    }
}

/// A course placed in the hierarchy, together with the categories of
/// alternatives that hang below it.
#[derive(Debug, Clone)]
pub struct CourseNode {
    course: Course,
    pub(crate) categories: BTreeMap<String, Category>,
}

impl CourseNode {
    pub fn new(course: Course) -> Self {
        Self {
            course,
            categories: BTreeMap::new(),
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub(crate) fn course_mut(&mut self) -> &mut Course {
        &mut self.course
    }

    pub fn into_course(self) -> Course {
        self.course
    }

    pub fn categories(&self) -> Values<'_, String, Category> {
        self.categories.values()
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }
}
