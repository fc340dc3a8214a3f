//! Course hierarchy: subjects, lectures and the alternatives below them.
//!
//! - [`category`]: grouping nodes of sibling alternatives
//! - [`hierarchy`]: the tree itself, with insertion, lookup and removal

pub mod category;
pub mod hierarchy;


pub use category::{Category, CourseNode};
pub use hierarchy::{HierarchyTree, InsertReport, NodeRef, Placement, SkippedCourse};
