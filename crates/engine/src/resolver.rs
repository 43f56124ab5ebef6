//! ScopeResolver: scope declarations → criteria
//!
//! Scope keys are scanned in reverse declared order. The first relation key
//! (i.e. the highest-priority one) with a present value and a resolvable
//! owning inverse becomes the root: the store's query scope for "records
//! linked through the inverse to the related value". Scanning stops there.
//!
//! Every other key, scanned or not, becomes a detail filter: an equality on
//! its storage key (`parent_id` for a relation `parent`), applied in
//! declared order. With no root the criteria stays "all records of the base
//! type".

use crate::inspector::RelationInspector;
use siblings_core::{
    classify, effective_value, Criteria, Document, DocumentStore, Result, ScopeKey, ScopeSpec,
    ScopeValues, TypeName,
};
use tracing::debug;

/// Builds sibling criteria for a record
pub struct ScopeResolver<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    inspector: RelationInspector<'a, S>,
}

impl<'a, S: DocumentStore + ?Sized> ScopeResolver<'a, S> {
    /// Create a resolver over a store
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            inspector: RelationInspector::new(store),
        }
    }

    /// Criteria selecting every record of `base_type` that shares the scope
    /// values of `record` (the record itself included)
    ///
    /// # Errors
    ///
    /// `UnknownScopeKey` if a key is neither a relation nor an attribute of
    /// the record's type.
    pub fn resolve(
        &self,
        record: &Document,
        base_type: &TypeName,
        scope: &ScopeSpec,
        scope_values: &ScopeValues,
    ) -> Result<Criteria> {
        let schema = self.store.schema();

        let mut values = Vec::with_capacity(scope.len());
        for key in scope {
            values.push(effective_value(self.store, record, key, scope_values)?);
        }

        let mut criteria = Criteria::all(base_type.clone());
        let mut root_index = None;

        for (index, key) in scope.iter().enumerate().rev() {
            let value = &values[index];
            if !value.is_present() {
                continue;
            }
            if self.inspector.relation(record, key)?.is_none() {
                continue;
            }
            match self.inspector.inverse_relation(record, key, value)? {
                Some(inverse) if inverse.is_owning() => {
                    debug!(
                        target: "siblings::resolve",
                        record = %record.record_ref(),
                        key = %key,
                        inverse = %inverse.name,
                        "Root criteria from relation"
                    );
                    criteria = self.store.query_scope(base_type, value.record_refs(), inverse);
                    root_index = Some(index);
                    break;
                }
                _ => debug!(
                    target: "siblings::resolve",
                    record = %record.record_ref(),
                    key = %key,
                    "Relation cannot root the criteria, using it as a detail filter"
                ),
            }
        }

        for (index, (key, value)) in scope.iter().zip(values).enumerate() {
            if Some(index) == root_index {
                continue;
            }
            let filter_key = match classify(schema, record.type_name(), key)? {
                ScopeKey::Relation(relation) => relation.key.clone(),
                ScopeKey::Attribute => key.clone(),
            };
            criteria = criteria.where_eq(filter_key, value.into_storage_form());
        }

        Ok(criteria)
    }
}
