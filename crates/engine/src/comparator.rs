//! SiblingComparator: pairwise scope value comparison
//!
//! No query is built. Two records are siblings when they share a base type
//! and every scope key has equal effective values on both sides, compared
//! in storage form (a reference equals the id it stores).

use siblings_core::{effective_value, Document, DocumentStore, Result, ScopeSpec, ScopeValues};
use tracing::debug;

/// Decides siblingship without touching the store's records
pub struct SiblingComparator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> SiblingComparator<'a, S> {
    /// Create a comparator over a store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// True if `record` and `other` share a base type and all scope values
    ///
    /// An empty scope holds for any two records of the same base type.
    ///
    /// # Errors
    ///
    /// `UnknownType` for unregistered record types, `UnknownScopeKey` for a
    /// key that does not exist on either record's type.
    pub fn is_sibling(
        &self,
        record: &Document,
        other: &Document,
        scope: &ScopeSpec,
        scope_values: &ScopeValues,
        other_scope_values: &ScopeValues,
    ) -> Result<bool> {
        let schema = self.store.schema();
        if schema.base_type(record.type_name())? != schema.base_type(other.type_name())? {
            return Ok(false);
        }

        // Read every key on both sides before comparing any of them
        let mut pairs = Vec::with_capacity(scope.len());
        for key in scope {
            let value = effective_value(self.store, record, key, scope_values)?;
            let other_value = effective_value(self.store, other, key, other_scope_values)?;
            pairs.push((key, value, other_value));
        }

        for (key, value, other_value) in pairs {
            if value.into_storage_form() != other_value.into_storage_form() {
                debug!(
                    target: "siblings::compare",
                    record = %record.record_ref(),
                    other = %other.record_ref(),
                    key = %key,
                    "Scope values differ"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
