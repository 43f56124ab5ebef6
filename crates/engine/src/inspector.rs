//! RelationInspector: which relation on the related record points back
//!
//! Given a record, one of its relations and the value found at the far end,
//! the inspector finds the inverse relation on the related type. Candidates
//! are classified first and then resolved per variant:
//!
//! | Candidates | Resolution |
//! |------------|------------|
//! | `None` | no inverse |
//! | `Single` | that candidate |
//! | `Polymorphic` | the candidate named by the record's discriminator field |
//! | `AmbiguousCollection` | the first candidate whose members include the record |
//!
//! The inspector only reads. It never mutates either side.

use siblings_core::{
    Document, DocumentStore, RelationMetadata, Result, SchemaRegistry, TypeName, Value,
};
use tracing::debug;

/// Candidate inverses of a relation, classified
#[derive(Debug, Clone, PartialEq)]
pub enum InverseCandidates<'a> {
    /// Nothing on the related type can point back
    None,
    /// Exactly one relation points back
    Single(&'a RelationMetadata),
    /// Several relations fill the same polymorphic interface
    Polymorphic(Vec<&'a RelationMetadata>),
    /// Several structurally identical relations point back
    AmbiguousCollection(Vec<&'a RelationMetadata>),
}

/// Finds inverse relations through a store's schema
pub struct RelationInspector<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> RelationInspector<'a, S> {
    /// Create an inspector over a store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn schema(&self) -> &'a SchemaRegistry {
        let store: &'a S = self.store;
        store.schema()
    }

    /// Relation `name` on the record's type, if the key names one
    pub fn relation(&self, record: &Document, name: &str) -> Result<Option<&'a RelationMetadata>> {
        self.schema().reflect(record.type_name(), name)
    }

    /// True if `candidate` on the related type can point back through `relation`
    fn pairs_with(&self, base_type: &TypeName, relation: &RelationMetadata, candidate: &RelationMetadata) -> bool {
        if candidate.is_owning() == relation.is_owning() {
            return false;
        }

        let targets_record = if candidate.targets.is_empty() {
            candidate.polymorphic && relation.as_name.as_deref() == Some(candidate.name.as_str())
        } else {
            candidate.targets.iter().any(|target| {
                self.schema()
                    .base_type(target)
                    .map(|base| &base == base_type)
                    .unwrap_or(false)
            })
        };
        if !targets_record {
            return false;
        }

        if let Some(inverse) = &relation.inverse_of {
            return &candidate.name == inverse;
        }
        if let Some(inverse) = &candidate.inverse_of {
            return inverse == &relation.name;
        }
        if relation.polymorphic {
            return candidate.as_name.as_deref() == Some(relation.name.as_str());
        }
        if let Some(interface) = &relation.as_name {
            return candidate.polymorphic && &candidate.name == interface;
        }
        candidate.as_name.is_none() && !candidate.polymorphic
    }

    /// Classify the relations on the related value's type(s) that point back
    pub fn candidates(
        &self,
        record: &Document,
        relation: &RelationMetadata,
        related: &Value,
    ) -> Result<InverseCandidates<'a>> {
        let schema = self.schema();
        let base_type = schema.base_type(record.type_name())?;

        let mut related_types: Vec<TypeName> = Vec::new();
        for reference in related.record_refs() {
            if !related_types.contains(&reference.type_name) {
                related_types.push(reference.type_name);
            }
        }

        let mut found: Vec<&'a RelationMetadata> = Vec::new();
        for related_type in &related_types {
            for candidate in schema.relations(related_type)? {
                if self.pairs_with(&base_type, relation, candidate) && !found.contains(&candidate) {
                    found.push(candidate);
                }
            }
        }

        Ok(match found.len() {
            0 => InverseCandidates::None,
            1 => InverseCandidates::Single(found[0]),
            _ if relation.polymorphic => InverseCandidates::Polymorphic(found),
            _ => InverseCandidates::AmbiguousCollection(found),
        })
    }

    /// Inverse of relation `relation_name` on `record`, given its related value
    ///
    /// Returns None when the value is absent, the key is not a relation, or
    /// no candidate can be singled out.
    pub fn inverse_relation(
        &self,
        record: &Document,
        relation_name: &str,
        related: &Value,
    ) -> Result<Option<&'a RelationMetadata>> {
        if !related.is_present() {
            return Ok(None);
        }
        let Some(relation) = self.relation(record, relation_name)? else {
            return Ok(None);
        };

        let inverse = match self.candidates(record, relation, related)? {
            InverseCandidates::None => None,
            InverseCandidates::Single(candidate) => Some(candidate),
            InverseCandidates::Polymorphic(candidates) => {
                let linked_through = relation
                    .inverse_of_field
                    .as_deref()
                    .map(|field| record.field(field))
                    .unwrap_or(Value::Null);
                candidates
                    .into_iter()
                    .find(|candidate| linked_through.as_str() == Some(candidate.name.as_str()))
            }
            InverseCandidates::AmbiguousCollection(candidates) => {
                self.find_containing(record, related, candidates)?
            }
        };

        match inverse {
            Some(found) => debug!(
                target: "siblings::inspect",
                record = %record.record_ref(),
                relation = %relation_name,
                inverse = %found.name,
                "Resolved inverse relation"
            ),
            None => debug!(
                target: "siblings::inspect",
                record = %record.record_ref(),
                relation = %relation_name,
                "No inverse relation"
            ),
        }
        Ok(inverse)
    }

    /// First candidate whose current members on any related record include `record`
    fn find_containing(
        &self,
        record: &Document,
        related: &Value,
        candidates: Vec<&'a RelationMetadata>,
    ) -> Result<Option<&'a RelationMetadata>> {
        let owners = related.record_refs();
        for candidate in candidates {
            for owner in &owners {
                let members = self.store.related(owner, candidate)?;
                if members.iter().any(|member| member.id == record.id()) {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }
}
