//! Value types for scope comparison
//!
//! This module defines:
//! - Value: Unified enum for attribute values and relation values
//!
//! ## Value Model
//!
//! - Null, Bool, Int, Float, String, Array: plain attribute values
//! - Id: a stored record id (the storage form of a reference, e.g. `parent_id`)
//! - Ref: a single relation read as a typed reference
//! - RefList: a collection relation read as an ordered list of references
//!
//! ### Type Rules
//!
//! - No implicit type coercions: `Int(1) != Float(1.0)`, `Ref(r) != Id(r.id)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - A value is *present* unless it is `Null` or an empty `RefList`

use crate::types::{RecordId, RecordRef};
use serde::{Deserialize, Serialize};

/// Value of a scope key, read off a record or supplied as an override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value (unset attribute or unlinked relation)
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Stored record id
    Id(RecordId),
    /// Single related record
    Ref(RecordRef),
    /// Collection of related records
    RefList(Vec<RecordRef>),
    /// Array of values
    Array(Vec<Value>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Id(a), Value::Id(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::RefList(a), Value::RefList(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Id(_) => "Id",
            Value::Ref(_) => "Ref",
            Value::RefList(_) => "RefList",
            Value::Array(_) => "Array",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check whether the value counts as present for relation traversal
    ///
    /// `Null` and an empty collection are absent; everything else is present.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::RefList(refs) => !refs.is_empty(),
            _ => true,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as RecordId if this is an Id value
    pub fn as_id(&self) -> Option<RecordId> {
        match self {
            Value::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as &RecordRef if this is a Ref value
    pub fn as_record_ref(&self) -> Option<&RecordRef> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// All references carried by this value, in order
    ///
    /// `Ref` yields one reference, `RefList` yields its elements, anything
    /// else yields none.
    pub fn record_refs(&self) -> Vec<RecordRef> {
        match self {
            Value::Ref(r) => vec![r.clone()],
            Value::RefList(refs) => refs.clone(),
            _ => Vec::new(),
        }
    }

    /// Convert a relation value into the form stored under the relation's key
    ///
    /// References become ids, collections become arrays of ids; other values
    /// are returned unchanged.
    pub fn into_storage_form(self) -> Value {
        match self {
            Value::Ref(r) => Value::Id(r.id),
            Value::RefList(refs) => Value::Array(refs.into_iter().map(|r| Value::Id(r.id)).collect()),
            other => other,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::Id(id)
    }
}

impl From<RecordRef> for Value {
    fn from(r: RecordRef) -> Self {
        Value::Ref(r)
    }
}

impl From<Option<RecordRef>> for Value {
    fn from(r: Option<RecordRef>) -> Self {
        r.map(Value::Ref).unwrap_or(Value::Null)
    }
}

impl From<Vec<RecordRef>> for Value {
    fn from(refs: Vec<RecordRef>) -> Self {
        Value::RefList(refs)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
