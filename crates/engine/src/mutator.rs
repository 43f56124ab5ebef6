//! SiblingMutator: make a record a sibling of another and persist it
//!
//! For each scope key the other record's effective value is carried over:
//! - a present relation value with an owning inverse is linked: the record
//!   is added to that inverse on the related record(s)
//! - anything else is overwritten on the record itself
//!
//! The inverse is resolved from the other record, which is already linked.
//! Every key is read and every overwrite staged before the first link, so
//! a bad key leaves both the record and the store untouched.
//! A persistence failure is returned to the caller, never retried.

use crate::comparator::SiblingComparator;
use crate::inspector::RelationInspector;
use siblings_core::{
    assign_scope_value, classify, effective_value, Document, DocumentStore, Result, ScopeKey,
    ScopeSpec, ScopeValues,
};
use tracing::{debug, info, warn};

/// Copies or links scope values from one record to another
pub struct SiblingMutator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    inspector: RelationInspector<'a, S>,
    comparator: SiblingComparator<'a, S>,
}

impl<'a, S: DocumentStore + ?Sized> SiblingMutator<'a, S> {
    /// Create a mutator over a store
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            inspector: RelationInspector::new(store),
            comparator: SiblingComparator::new(store),
        }
    }

    /// Make `record` a sibling of `other` within `scope`, then save it
    ///
    /// Returns true without mutating if the records are already siblings,
    /// false if their base types differ.
    ///
    /// # Errors
    ///
    /// The store's error if saving fails; `UnknownScopeKey`,
    /// `UnsupportedAssignment` or `InvalidOperation` for keys that cannot be
    /// carried over, in which case nothing is linked or saved.
    pub fn become_sibling(
        &self,
        record: &mut Document,
        other: &Document,
        scope: &ScopeSpec,
        other_scope_values: &ScopeValues,
    ) -> Result<bool> {
        if self
            .comparator
            .is_sibling(record, other, scope, &ScopeValues::new(), other_scope_values)?
        {
            return Ok(true);
        }

        let schema = self.store.schema();
        if schema.base_type(record.type_name())? != schema.base_type(other.type_name())? {
            return Ok(false);
        }

        // Plan every key before the first side effect reaches the store
        let mut links = Vec::new();
        let mut assigns = Vec::new();
        for key in scope {
            let value = effective_value(self.store, other, key, other_scope_values)?;

            if let ScopeKey::Relation(_) = classify(schema, record.type_name(), key)? {
                if value.is_present() {
                    if let Some(inverse) = self.inspector.inverse_relation(other, key, &value)? {
                        if inverse.is_owning() {
                            links.push((inverse, value.record_refs()));
                            continue;
                        }
                    }
                    debug!(
                        target: "siblings::mutate",
                        record = %record.record_ref(),
                        key = %key,
                        "No inverse to link through, overwriting relation"
                    );
                }
            }
            assigns.push((key, value));
        }

        let mut staged = record.clone();
        for (key, value) in assigns {
            assign_scope_value(schema, &mut staged, key, value)?;
        }
        for (inverse, owners) in links {
            for owner in owners {
                self.store.link(&owner, inverse, &mut staged)?;
            }
        }
        *record = staged;

        if let Err(e) = self.store.save(record) {
            warn!(
                target: "siblings::mutate",
                record = %record.record_ref(),
                error = %e,
                "Failed to persist record"
            );
            return Err(e);
        }

        info!(
            target: "siblings::mutate",
            record = %record.record_ref(),
            other = %other.record_ref(),
            "Record became sibling"
        );
        Ok(true)
    }
}
