//! is_sibling across scopes, overrides and base types

use crate::test_utils::*;

fn scope() -> SiblingOptions {
    scoped(["parent", "super_parent"])
}

/// subject(parent, super_parent) plus one record per fallback level
struct Family {
    fixture: Fixture,
    super_parent: Document,
    parent: Document,
    subject: Document,
    main_sibling: Document,
    fallback_sibling: Document,
    ultimate_sibling: Document,
}

impl Family {
    fn new(subject_parent: bool, subject_super_parent: bool) -> Self {
        let fixture = Fixture::new();
        let super_parent = fixture.super_parent();
        let parent = fixture.parent();
        let subject = fixture.child(
            subject_parent.then_some(&parent),
            subject_super_parent.then_some(&super_parent),
        );
        let main_sibling = fixture.child(Some(&parent), Some(&super_parent));
        let fallback_sibling = fixture.child(None, Some(&super_parent));
        let ultimate_sibling = fixture.child(None, None);
        Family {
            fixture,
            super_parent,
            parent,
            subject,
            main_sibling,
            fallback_sibling,
            ultimate_sibling,
        }
    }

    fn is_sibling(&self, other: &Document, options: &SiblingOptions) -> bool {
        self.fixture.is_sibling(&self.subject, other, options)
    }
}

// =============================================================================
// Live values
// =============================================================================

#[test]
fn test_main_scope_document() {
    let family = Family::new(true, true);
    assert!(family.is_sibling(&family.main_sibling, &scope()));
    assert!(!family.is_sibling(&family.fallback_sibling, &scope()));
    assert!(!family.is_sibling(&family.ultimate_sibling, &scope()));
}

#[test]
fn test_fallback_scope_document() {
    let family = Family::new(false, true);
    assert!(family.is_sibling(&family.fallback_sibling, &scope()));
    assert!(!family.is_sibling(&family.main_sibling, &scope()));
    assert!(!family.is_sibling(&family.ultimate_sibling, &scope()));
}

#[test]
fn test_neither_scope_document() {
    let family = Family::new(false, false);
    assert!(family.is_sibling(&family.ultimate_sibling, &scope()));
    assert!(!family.is_sibling(&family.main_sibling, &scope()));
    assert!(!family.is_sibling(&family.fallback_sibling, &scope()));
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn test_one_scope_value() {
    let family = Family::new(true, true);
    let old_parent = family.fixture.parent();
    let old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&family.super_parent));

    let options = scope().scope_value("parent", old_parent.record_ref());
    assert!(family.is_sibling(&old_main_sibling, &options));
    assert!(!family.is_sibling(&family.main_sibling, &options));
    assert!(!family.is_sibling(&family.fallback_sibling, &options));
    assert!(!family.is_sibling(&family.ultimate_sibling, &options));
}

#[test]
fn test_multiple_scope_values_with_null_main() {
    let family = Family::new(true, true);
    let old_parent = family.fixture.parent();
    let old_super_parent = family.fixture.super_parent();
    let old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&old_super_parent));
    let old_fallback_sibling = family.fixture.child(None, Some(&old_super_parent));

    let options = scope()
        .scope_value("parent", Value::Null)
        .scope_value("super_parent", old_super_parent.record_ref());
    assert!(family.is_sibling(&old_fallback_sibling, &options));
    assert!(!family.is_sibling(&old_main_sibling, &options));
    assert!(!family.is_sibling(&family.main_sibling, &options));
    assert!(!family.is_sibling(&family.fallback_sibling, &options));
    assert!(!family.is_sibling(&family.ultimate_sibling, &options));
}

#[test]
fn test_other_scope_values() {
    let family = Family::new(true, true);
    let old_parent = family.fixture.parent();
    let old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&family.super_parent));

    let options = scope().other_scope_value("parent", family.parent.record_ref());
    assert!(family.is_sibling(&old_main_sibling, &options));
}

#[test]
fn test_other_scope_values_with_null_main() {
    let mut family = Family::new(true, true);
    family.subject.set("parent_id", Value::Null);
    family.fixture.store.save(&family.subject).unwrap();
    let old_super_parent = family.fixture.super_parent();
    let old_fallback_sibling = family.fixture.child(None, Some(&old_super_parent));

    let options = scope()
        .other_scope_value("parent", Value::Null)
        .other_scope_value("super_parent", family.super_parent.record_ref());
    assert!(family.is_sibling(&old_fallback_sibling, &options));
}

// =============================================================================
// Scope forms and base types
// =============================================================================

#[test]
fn test_single_scope() {
    let fixture = Fixture::new();
    let parent = fixture.parent();
    let other_parent = fixture.parent();
    let subject = fixture.child(Some(&parent), None);
    let sibling = fixture.child(Some(&parent), None);
    let non_sibling = fixture.child(Some(&other_parent), None);

    assert!(fixture.is_sibling(&subject, &sibling, &scoped("parent")));
    assert!(!fixture.is_sibling(&subject, &non_sibling, &scoped("parent")));
}

#[test]
fn test_no_scope_compares_base_type_only() {
    let fixture = Fixture::new();
    let subject = fixture.child(None, None);
    let sibling = fixture.child(None, None);
    let parent = fixture.parent();

    assert!(fixture.is_sibling(&subject, &sibling, &SiblingOptions::new()));
    assert!(!fixture.is_sibling(&subject, &parent, &SiblingOptions::new()));
}

#[test]
fn test_polymorphic_values_compare_by_reference() {
    let fixture = Fixture::new();
    let parent = fixture.parent();
    let mut first = fixture.child(None, None);
    fixture.link(&parent, "referenced_polymorphic_children1", &mut first);
    let mut second = fixture.child(None, None);
    fixture.link(&parent, "referenced_polymorphic_children2", &mut second);

    // Same parent record: the comparator ignores which collection linked them
    assert!(fixture.is_sibling(&first, &second, &scoped("polymorphic_parent")));
}
