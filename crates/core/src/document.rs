//! Document: a stored record
//!
//! A document has an id, a record type and a map of named fields. Relations
//! are not stored as embedded objects; a single relation stores the related
//! record's id under its key field (e.g. `parent_id`), so documents never
//! point at each other directly.

use crate::types::{RecordId, RecordRef, TypeName};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the implicit identity attribute
pub const ID_FIELD: &str = "id";

/// A record owned by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: RecordId,
    type_name: TypeName,
    fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document of the given type with a fresh id
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self::with_id(type_name, RecordId::new())
    }

    /// Create an empty document with a known id
    pub fn with_id(type_name: impl Into<TypeName>, id: RecordId) -> Self {
        Document {
            id,
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Record id
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Concrete record type
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Typed reference to this document
    pub fn record_ref(&self) -> RecordRef {
        RecordRef::new(self.type_name.clone(), self.id)
    }

    /// Stored value of a field, if one was ever written
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Current value of a field
    ///
    /// `id` reads the document id; unset fields read as `Null`.
    pub fn field(&self, key: &str) -> Value {
        if key == ID_FIELD {
            return Value::Id(self.id);
        }
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Overwrite a field
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// All stored fields
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}
