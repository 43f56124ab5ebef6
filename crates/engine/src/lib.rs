//! Sibling engine
//!
//! This crate implements sibling scoping on top of a `DocumentStore`:
//! - RelationInspector: inverse relation lookup and disambiguation
//! - ScopeResolver: scope declarations → root criteria + detail filters
//! - SiblingComparator: pairwise scope value comparison
//! - SiblingMutator: copy or link scope values, then persist
//! - Siblings: siblings / siblings_and_self / is_sibling / become_sibling
//! - SiblingsConfig: per-type default scopes from `siblings.toml`
//!
//! The engine owns no records. Every operation borrows the store for the
//! duration of the call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparator;
pub mod config;
pub mod inspector;
pub mod mutator;
pub mod options;
pub mod query;
pub mod resolver;

pub use comparator::SiblingComparator;
pub use config::{SiblingsConfig, CONFIG_FILE_NAME};
pub use inspector::{InverseCandidates, RelationInspector};
pub use mutator::SiblingMutator;
pub use options::SiblingOptions;
pub use query::Siblings;
pub use resolver::ScopeResolver;
