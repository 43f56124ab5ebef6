//! Query criteria
//!
//! A `Criteria` is a lazy description of a record set, never a result set.
//! The store evaluates it afresh each time it is executed.
//!
//! Structure:
//! - base type: only records whose base type matches are candidates
//! - root: all records of the base type, or the records linked to one or
//!   more owners through an owning relation
//! - filters: ordered exact-match conditions on stored fields
//! - exclusions: record ids removed from the result

use crate::document::Document;
use crate::types::{RecordId, RecordRef, TypeName};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Candidate pool of a criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CriteriaRoot {
    /// Every record of the base type
    All,
    /// Records collected by `relation` on any of `owners`
    Linked {
        /// Records owning the relation
        owners: Vec<RecordRef>,
        /// Name of the relation on the owners' type
        relation: String,
    },
}

/// Exact-match condition on a stored field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Field name (`id` matches the record id)
    pub key: String,
    /// Required value in storage form
    pub value: Value,
}

impl FieldFilter {
    /// Check the filter against a document
    pub fn matches(&self, doc: &Document) -> bool {
        doc.field(&self.key) == self.value
    }
}

/// Composable query description over one base type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    base_type: TypeName,
    root: CriteriaRoot,
    filters: Vec<FieldFilter>,
    exclusions: Vec<RecordId>,
}

impl Criteria {
    /// All records of `base_type`
    pub fn all(base_type: impl Into<TypeName>) -> Self {
        Criteria {
            base_type: base_type.into(),
            root: CriteriaRoot::All,
            filters: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Records of `base_type` collected by `relation` on any of `owners`
    pub fn linked(base_type: impl Into<TypeName>, owners: Vec<RecordRef>, relation: impl Into<String>) -> Self {
        Criteria {
            base_type: base_type.into(),
            root: CriteriaRoot::Linked {
                owners,
                relation: relation.into(),
            },
            filters: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Narrow by field equality
    pub fn where_eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Exclude a record by identity
    pub fn excludes(mut self, id: RecordId) -> Self {
        if !self.exclusions.contains(&id) {
            self.exclusions.push(id);
        }
        self
    }

    /// Base type
    pub fn base_type(&self) -> &TypeName {
        &self.base_type
    }

    /// Candidate pool
    pub fn root(&self) -> &CriteriaRoot {
        &self.root
    }

    /// Filters in application order
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Excluded ids
    pub fn exclusions(&self) -> &[RecordId] {
        &self.exclusions
    }

    /// Check filters and exclusions against a candidate
    ///
    /// Root membership and base type are the store's concern.
    pub fn admits(&self, doc: &Document) -> bool {
        !self.exclusions.contains(&doc.id()) && self.filters.iter().all(|f| f.matches(doc))
    }
}
