//! Property-based tests over generated families
//!
//! Each case builds three parents and a population of children, each with
//! an optional parent and a name drawn from a small set, then checks the
//! laws that tie the query, comparator and mutator together.

use crate::test_utils::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

const NAMES: [&str; 3] = ["ann", "bob", "cy"];

/// (parent index, name index) per child
fn population() -> impl Strategy<Value = Vec<(Option<usize>, usize)>> {
    prop::collection::vec((prop::option::of(0..3usize), 0..NAMES.len()), 1..10)
}

fn build(population: &[(Option<usize>, usize)]) -> (Fixture, Vec<Document>) {
    let fixture = Fixture::new();
    let parents: Vec<Document> = (0..3).map(|_| fixture.parent()).collect();
    let children = population
        .iter()
        .map(|(parent, name)| {
            let mut doc = Document::new("ReferencedChild").with("name", NAMES[*name]);
            if let Some(index) = parent {
                doc.set("parent_id", parents[*index].id());
            }
            fixture.create(doc)
        })
        .collect();
    (fixture, children)
}

fn scope() -> SiblingOptions {
    scoped(["name", "parent"])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_siblings_exclude_only_self(pop in population(), pick in any::<prop::sample::Index>()) {
        let (fixture, children) = build(&pop);
        let subject = pick.get(&children);

        let with_self = fixture.find_siblings_and_self(subject, &scope());
        let without = fixture.find_siblings(subject, &scope());

        prop_assert!(with_self.contains(&subject.id()));
        prop_assert!(!without.contains(&subject.id()));
        let expected: Vec<RecordId> = with_self.into_iter().filter(|id| *id != subject.id()).collect();
        prop_assert_eq!(without, expected);
    }

    #[test]
    fn test_siblings_and_self_match_comparator(pop in population(), pick in any::<prop::sample::Index>()) {
        let (fixture, children) = build(&pop);
        let subject = pick.get(&children);

        let found: BTreeSet<RecordId> = fixture
            .find_siblings_and_self(subject, &scope())
            .into_iter()
            .collect();
        let compared: BTreeSet<RecordId> = children
            .iter()
            .filter(|other| fixture.is_sibling(subject, other, &scope()))
            .map(|other| other.id())
            .collect();
        prop_assert_eq!(found, compared);
    }

    #[test]
    fn test_comparator_is_symmetric(
        pop in population(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
        clear_parent in any::<bool>(),
    ) {
        let (fixture, children) = build(&pop);
        let first = a.get(&children);
        let second = b.get(&children);

        let mut forward = scope();
        let mut backward = scope();
        if clear_parent {
            forward = forward.scope_value("parent", Value::Null);
            backward = backward.other_scope_value("parent", Value::Null);
        }
        prop_assert_eq!(
            fixture.is_sibling(first, second, &forward),
            fixture.is_sibling(second, first, &backward)
        );
    }

    #[test]
    fn test_become_sibling_establishes_siblingship(
        pop in population(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (fixture, children) = build(&pop);
        let mut record = a.get(&children).clone();
        let other = b.get(&children);

        prop_assert!(fixture.siblings().become_sibling(&mut record, other, &scope()).unwrap());
        prop_assert!(fixture.is_sibling(&record, other, &scope()));
        prop_assert_eq!(fixture.reload(&record), record.clone());
        prop_assert!(fixture.find_siblings_and_self(other, &scope()).contains(&record.id()));
    }

    #[test]
    fn test_become_sibling_is_idempotent(
        pop in population(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (fixture, children) = build(&pop);
        let mut record = a.get(&children).clone();
        let other = b.get(&children);

        fixture.siblings().become_sibling(&mut record, other, &scope()).unwrap();
        let once = record.clone();
        prop_assert!(fixture.siblings().become_sibling(&mut record, other, &scope()).unwrap());
        prop_assert_eq!(record, once);
    }
}
