//! Multi-key scopes: root priority and fallback
//!
//! Scope `[parent, super_parent]`: `super_parent` is declared last and has
//! the higher priority for the root. `parent` then narrows by `parent_id`.

use crate::test_utils::*;

/// Records shared by every test in this module
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
    fn new() -> Self {
        let fixture = Fixture::new();
        let super_parent = fixture.super_parent();
        let parent = fixture.parent();
        let subject = fixture.child(None, None);
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

    /// Give the subject both parents and save it
    fn attach_subject(&mut self) {
        self.subject.set("parent_id", self.parent.id());
        self.subject.set("super_parent_id", self.super_parent.id());
        self.fixture.store.save(&self.subject).unwrap();
    }

    fn siblings(&self, options: SiblingOptions) -> Vec<RecordId> {
        self.fixture.find_siblings(&self.subject, &options)
    }
}

fn scope() -> SiblingOptions {
    scoped(["parent", "super_parent"])
}

// =============================================================================
// Live values
// =============================================================================

#[test]
fn test_main_scope_document_narrows_to_main_sibling() {
    let mut family = Family::new();
    family.attach_subject();
    assert_eq!(family.siblings(scope()), vec![family.main_sibling.id()]);
}

#[test]
fn test_fallback_scope_document_without_main() {
    let mut family = Family::new();
    family.subject.set("super_parent_id", family.super_parent.id());
    family.fixture.store.save(&family.subject).unwrap();

    assert_eq!(family.siblings(scope()), vec![family.fallback_sibling.id()]);
}

#[test]
fn test_neither_scope_document_is_ultimate_fallback() {
    let family = Family::new();
    assert_eq!(family.siblings(scope()), vec![family.ultimate_sibling.id()]);
}

#[test]
fn test_lower_priority_root_when_higher_is_absent() {
    let mut family = Family::new();
    family.subject.set("parent_id", family.parent.id());
    family.fixture.store.save(&family.subject).unwrap();
    let parent_only = family.fixture.child(Some(&family.parent), None);

    // Root is parent.referenced_children; super_parent_id must be null
    assert_eq!(family.siblings(scope()), vec![parent_only.id()]);
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn test_one_scope_value() {
    let mut family = Family::new();
    family.attach_subject();
    let old_parent = family.fixture.parent();
    let old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&family.super_parent));

    let options = scope().scope_value("parent", old_parent.record_ref());
    assert_eq!(family.siblings(options), vec![old_main_sibling.id()]);
}

#[test]
fn test_multiple_scope_values_with_null_main() {
    let mut family = Family::new();
    family.attach_subject();
    let old_parent = family.fixture.parent();
    let old_super_parent = family.fixture.super_parent();
    let _old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&old_super_parent));
    let old_fallback_sibling = family.fixture.child(None, Some(&old_super_parent));

    let options = scope()
        .scope_value("parent", Value::Null)
        .scope_value("super_parent", old_super_parent.record_ref());
    assert_eq!(family.siblings(options), vec![old_fallback_sibling.id()]);
}

#[test]
fn test_multiple_scope_values_with_present_main() {
    let mut family = Family::new();
    family.attach_subject();
    let old_parent = family.fixture.parent();
    let old_super_parent = family.fixture.super_parent();
    let old_main_sibling = family
        .fixture
        .child(Some(&old_parent), Some(&old_super_parent));
    let _old_fallback_sibling = family.fixture.child(None, Some(&old_super_parent));

    let options = scope()
        .scope_value("parent", old_parent.record_ref())
        .scope_value("super_parent", old_super_parent.record_ref());
    assert_eq!(family.siblings(options), vec![old_main_sibling.id()]);
}

#[test]
fn test_siblings_and_self_includes_subject() {
    let mut family = Family::new();
    family.attach_subject();
    let found = family.fixture.find_siblings_and_self(&family.subject, &scope());
    assert_eq!(
        sorted(found),
        sorted(vec![family.subject.id(), family.main_sibling.id()])
    );
}

#[test]
fn test_siblings_never_contain_other_base_types() {
    let family = Family::new();
    let everyone = family.fixture.find_siblings(&family.subject, &scoped(ScopeSpec::empty()));
    assert_eq!(
        everyone,
        vec![
            family.main_sibling.id(),
            family.fallback_sibling.id(),
            family.ultimate_sibling.id()
        ]
    );
}
