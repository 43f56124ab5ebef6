//! Secondary index for base-type scans
//!
//! - TypeIndex: Maps base TypeName → ordered set of insertion sequences, so
//!   "all records of a base type" is O(type size) and comes out in insertion
//!   order.

use siblings_core::TypeName;
use std::collections::{BTreeSet, HashMap};

/// Secondary index: base TypeName → record sequences
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<TypeName, BTreeSet<u64>>,
}

impl TypeIndex {
    /// Create a new empty TypeIndex
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Add a record sequence under its base type
    pub fn insert(&mut self, base_type: TypeName, sequence: u64) {
        self.index.entry(base_type).or_default().insert(sequence);
    }

    /// Remove a record sequence from its base type
    ///
    /// If the set becomes empty, removes the base type entry entirely.
    pub fn remove(&mut self, base_type: &TypeName, sequence: u64) {
        if let Some(sequences) = self.index.get_mut(base_type) {
            sequences.remove(&sequence);
            if sequences.is_empty() {
                self.index.remove(base_type);
            }
        }
    }

    /// Get all sequences for a base type, in insertion order
    pub fn get(&self, base_type: &TypeName) -> Option<&BTreeSet<u64>> {
        self.index.get(base_type)
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the number of base types in the index
    pub fn len(&self) -> usize {
        self.index.len()
    }
}
