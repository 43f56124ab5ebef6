//! Core types and traits for sibling scoping
//!
//! This crate defines the foundational types used throughout the system:
//! - RecordId, TypeName, RecordRef: record identity
//! - Value: attribute and relation values
//! - Document: a stored record
//! - RelationMetadata: relation declarations (kind, targets, keys, inverses)
//! - SchemaRegistry: the static type table relations are reflected from
//! - ScopeSpec / ScopeValues: scope declarations and overrides
//! - Criteria: lazy, composable query descriptions
//! - DocumentStore: the persistence collaborator trait
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod criteria;
pub mod document;
pub mod error;
pub mod relation;
pub mod schema;
pub mod scope;
pub mod traits;
pub mod types;
pub mod value;

// Re-export commonly used types and traits
pub use access::{
    assign_relation, assign_scope_value, classify, effective_value, read_relation,
    read_scope_value, ScopeKey,
};
pub use criteria::{Criteria, CriteriaRoot, FieldFilter};
pub use document::{Document, ID_FIELD};
pub use error::{Error, Result};
pub use relation::{Cardinality, RelationKind, RelationMetadata};
pub use schema::{SchemaRegistry, TypeSchema};
pub use scope::{ScopeSpec, ScopeValues};
pub use traits::DocumentStore;
pub use types::{RecordId, RecordRef, TypeName};
pub use value::Value;
