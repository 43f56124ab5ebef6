//! Error types for sibling scoping
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absent values and unresolvable inverses are not errors; they are
//! ordinary outcomes reported as `None` or `false`.

use crate::types::{RecordRef, TypeName};
use std::io;
use thiserror::Error;

/// Result type alias for sibling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sibling scoping
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record type is not registered in the schema
    #[error("Unknown record type: {0}")]
    UnknownType(TypeName),

    /// Scope key names neither a relation nor an attribute of the type
    #[error("Unknown scope key '{key}' for type {type_name}")]
    UnknownScopeKey {
        /// Type the key was looked up on
        type_name: TypeName,
        /// The offending scope key
        key: String,
    },

    /// Scope key cannot be overwritten with a value (e.g. a collection relation)
    #[error("Cannot assign scope key '{key}' on type {type_name}")]
    UnsupportedAssignment {
        /// Type the assignment was attempted on
        type_name: TypeName,
        /// The scope key
        key: String,
    },

    /// Referenced record does not exist in the store
    #[error("Record not found: {0}")]
    RecordNotFound(RecordRef),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Persisting a record failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration could not be parsed or applied
    #[error("Configuration error: {0}")]
    Config(String),
}
