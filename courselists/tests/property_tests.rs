//! Property-based tests for conflicts and enumeration.

mod support;

use courselists::{section_prefix_classifier, Catalog, Course, Day, Term, TimeBlock};
use proptest::prelude::*;
use support::{laboratory, lecture, tutorial};

const SUBJECTS: [&str; 3] = ["COMP1405", "MATH1104", "PHYS1007"];
const TERMS: [Term; 3] = [Term::Fall, Term::Winter, Term::Summer];

fn arb_block() -> impl Strategy<Value = TimeBlock> {
    (0usize..7, 0usize..3, 0u16..22, 0u16..60, 1u16..4).prop_map(
        |(day, term, hour, minute, hours)| {
            let start = hour * 100 + minute;
            let end = (hour + hours).min(23) * 100 + minute;
            TimeBlock::new(Day::ALL[day], TERMS[term], start, end)
        },
    )
}

/// One weekday hour slot in the Fall term.
fn arb_slot() -> impl Strategy<Value = (usize, u16)> {
    (0usize..5, 8u16..18)
}

fn slot_block((day, hour): (usize, u16)) -> TimeBlock {
    TimeBlock::new(Day::ALL[day], Term::Fall, hour * 100, hour * 100 + 50)
}

/// Per subject, per lecture: the lecture slot, its tutorial slots and its lab slots.
type CatalogShape = Vec<Vec<((usize, u16), Vec<(usize, u16)>, Vec<(usize, u16)>)>>;

fn arb_catalog() -> impl Strategy<Value = CatalogShape> {
    let lecture = (
        arb_slot(),
        prop::collection::vec(arb_slot(), 0..3),
        prop::collection::vec(arb_slot(), 0..2),
    );
    prop::collection::vec(prop::collection::vec(lecture, 1..3), 1..4)
}

fn build_courses(shape: &CatalogShape) -> Vec<Course> {
    let mut courses = Vec::new();
    let mut crn = 1u32;
    for (subject, lectures) in SUBJECTS.iter().zip(shape) {
        for (index, (slot, tutorials, labs)) in lectures.iter().enumerate() {
            let letter = (b'A' + index as u8) as char;
            courses.push(lecture(crn, subject, &letter.to_string(), vec![slot_block(*slot)]));
            crn += 1;
            for (n, slot) in tutorials.iter().enumerate() {
                let section = format!("{}{}", letter, n + 1);
                courses.push(tutorial(crn, subject, &section, vec![slot_block(*slot)]));
                crn += 1;
            }
            for (n, slot) in labs.iter().enumerate() {
                let section = format!("{}L{}", letter, n + 1);
                courses.push(laboratory(crn, subject, &section, vec![slot_block(*slot)]));
                crn += 1;
            }
        }
    }
    courses
}

proptest! {
    #[test]
    fn prop_conflict_is_symmetric(a in arb_block(), b in arb_block()) {
        prop_assert_eq!(a.conflicts(&b), b.conflicts(&a));
    }

    #[test]
    fn prop_block_conflicts_with_itself(a in arb_block()) {
        prop_assert!(a.conflicts(&a));
    }

    #[test]
    fn prop_different_day_or_term_never_conflicts(a in arb_block(), b in arb_block()) {
        if a.day() != b.day() || a.term() != b.term() {
            prop_assert!(!a.conflicts(&b));
        }
    }

    #[test]
    fn prop_overlapping_intervals_conflict(a in arb_block(), b in arb_block()) {
        let same_slot = TimeBlock::new(a.day(), a.term(), b.start(), b.end());
        let overlaps = a.start() <= b.end() && a.end() >= b.start();
        prop_assert_eq!(a.conflicts(&same_slot), overlaps);
    }

    #[test]
    fn prop_selections_are_conflict_free_and_complete(shape in arb_catalog()) {
        let mut catalog = Catalog::new(section_prefix_classifier());
        let report = catalog.add_courses(build_courses(&shape));
        prop_assert!(report.is_clean());

        let tree = catalog.tree().clone();
        for selection in catalog.choices() {
            let members: Vec<&Course> = selection.courses().collect();

            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    prop_assert!(!a.conflicts_with(b));
                }
            }

            // One lecture per subject.
            for category in tree.root_categories() {
                let picked = category
                    .courses()
                    .filter(|n| selection.contains(n.course().crn()))
                    .count();
                prop_assert_eq!(picked, 1);
            }

            // One component per category of every chosen lecture.
            for course in &members {
                let Some(node) = tree.node(course.crn()) else {
                    return Err(TestCaseError::fail("selected course missing from tree"));
                };
                for category in node.categories() {
                    let picked = category
                        .courses()
                        .filter(|n| selection.contains(n.course().crn()))
                        .count();
                    prop_assert_eq!(picked, 1);
                }
            }
        }
    }

    #[test]
    fn prop_choices_are_unique(shape in arb_catalog()) {
        let mut catalog = Catalog::new(section_prefix_classifier());
        catalog.add_courses(build_courses(&shape));

        let choices = catalog.choices();
        for (i, a) in choices.iter().enumerate() {
            for b in &choices[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }
}
