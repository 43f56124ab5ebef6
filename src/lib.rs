//! Siblings - sibling scoping for document records
//!
//! Finds the records that share configurable scope values with a given
//! record. Each scope key is either a relation (records linked to the same
//! parent) or a plain attribute.
//!
//! # Quick Start
//!
//! ```ignore
//! use siblings::{Document, MemoryStore, RelationMetadata, SchemaRegistry, SiblingOptions, Siblings, TypeSchema};
//!
//! let mut schema = SchemaRegistry::new();
//! schema.register(
//!     TypeSchema::document("Parent")
//!         .relation(RelationMetadata::has_many("children", "Child").inverse_of("parent")),
//! );
//! schema.register(
//!     TypeSchema::document("Child")
//!         .relation(RelationMetadata::belongs_to("parent", "Parent").inverse_of("children")),
//! );
//! let store = MemoryStore::new(schema);
//!
//! let siblings = Siblings::new(&store);
//! let found = siblings.find_siblings(&child, &SiblingOptions::new().scope("parent"))?;
//! ```
//!
//! # Architecture
//!
//! - `siblings-core`: records, values, relation metadata, schema, criteria
//!   and the `DocumentStore` trait
//! - `siblings-storage`: `MemoryStore`, the in-memory reference store
//! - `siblings-engine`: scope resolution, comparison, mutation and config

pub use siblings_core::*;
pub use siblings_engine::*;
pub use siblings_storage::*;
