//! Siblings: the public sibling operations
//!
//! ## Usage
//!
//! ```ignore
//! let siblings = Siblings::new(&store);
//!
//! // Lazy criteria, re-evaluated on every execution
//! let criteria = siblings.siblings(&child, &SiblingOptions::new().scope("parent"))?;
//!
//! // Executed
//! let found = siblings.find_siblings(&child, &SiblingOptions::new().scope("parent"))?;
//!
//! siblings.is_sibling(&child, &other, &SiblingOptions::new().scope("parent"))?;
//! siblings.become_sibling(&mut child, &other, &SiblingOptions::new().scope("parent"))?;
//! ```

use crate::comparator::SiblingComparator;
use crate::mutator::SiblingMutator;
use crate::options::SiblingOptions;
use crate::resolver::ScopeResolver;
use siblings_core::{Criteria, Document, DocumentStore, Result, ScopeSpec};

/// Sibling operations over a store
pub struct Siblings<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> Siblings<'a, S> {
    /// Create the facade over a store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Scope to use for `record`: explicit, else the type's default, else empty
    pub fn effective_scope(&self, record: &Document, options: &SiblingOptions) -> Result<ScopeSpec> {
        if let Some(scope) = &options.scope {
            return Ok(scope.clone());
        }
        Ok(self
            .store
            .schema()
            .default_sibling_scope(record.type_name())?
            .cloned()
            .unwrap_or_default())
    }

    /// Criteria for the record's siblings and the record itself
    pub fn siblings_and_self(&self, record: &Document, options: &SiblingOptions) -> Result<Criteria> {
        let scope = self.effective_scope(record, options)?;
        let base_type = self.store.schema().base_type(record.type_name())?;
        ScopeResolver::new(self.store).resolve(record, &base_type, &scope, &options.scope_values)
    }

    /// Criteria for the record's siblings, excluding the record
    pub fn siblings(&self, record: &Document, options: &SiblingOptions) -> Result<Criteria> {
        Ok(self.siblings_and_self(record, options)?.excludes(record.id()))
    }

    /// Execute [`Siblings::siblings`]
    pub fn find_siblings(&self, record: &Document, options: &SiblingOptions) -> Result<Vec<Document>> {
        self.store.execute(&self.siblings(record, options)?)
    }

    /// Execute [`Siblings::siblings_and_self`]
    pub fn find_siblings_and_self(&self, record: &Document, options: &SiblingOptions) -> Result<Vec<Document>> {
        self.store.execute(&self.siblings_and_self(record, options)?)
    }

    /// Is `record` a sibling of `other`?
    pub fn is_sibling(&self, record: &Document, other: &Document, options: &SiblingOptions) -> Result<bool> {
        let scope = self.effective_scope(record, options)?;
        SiblingComparator::new(self.store).is_sibling(
            record,
            other,
            &scope,
            &options.scope_values,
            &options.other_scope_values,
        )
    }

    /// Make `record` a sibling of `other` and persist it
    ///
    /// The record's own overrides are ignored; only `other_scope_values`
    /// applies.
    pub fn become_sibling(&self, record: &mut Document, other: &Document, options: &SiblingOptions) -> Result<bool> {
        let scope = self.effective_scope(record, options)?;
        SiblingMutator::new(self.store).become_sibling(record, other, &scope, &options.other_scope_values)
    }
}
