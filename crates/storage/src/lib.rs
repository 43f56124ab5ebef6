//! Storage layer for sibling scoping
//!
//! This crate provides the reference persistence collaborator:
//! - MemoryStore: in-memory DocumentStore with insertion ordering
//! - TypeIndex: base type → record sequences secondary index
//!
//! Thread-safe through `parking_lot::RwLock`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod memory;

pub use index::TypeIndex;
pub use memory::MemoryStore;
