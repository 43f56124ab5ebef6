//! Scope key access: classify, read and overwrite scope values on a record
//!
//! A scope key resolves to a relation if the record's type declares one of
//! that name, otherwise to an attribute. A key that is neither is a
//! configuration error and fails fast.

use crate::document::{Document, ID_FIELD};
use crate::error::{Error, Result};
use crate::relation::RelationMetadata;
use crate::schema::SchemaRegistry;
use crate::scope::ScopeValues;
use crate::traits::DocumentStore;
use crate::types::{RecordRef, TypeName};
use crate::value::Value;

/// What a scope key names on a record type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeKey<'a> {
    /// A declared relation (takes precedence over a same-named attribute)
    Relation(&'a RelationMetadata),
    /// A readable attribute
    Attribute,
}

/// Classify `key` on `type_name`
///
/// # Errors
///
/// `UnknownScopeKey` if the key is neither a relation nor an attribute.
pub fn classify<'a>(schema: &'a SchemaRegistry, type_name: &TypeName, key: &str) -> Result<ScopeKey<'a>> {
    if let Some(relation) = schema.reflect(type_name, key)? {
        return Ok(ScopeKey::Relation(relation));
    }
    if schema.has_attribute(type_name, key)? {
        return Ok(ScopeKey::Attribute);
    }
    Err(Error::UnknownScopeKey {
        type_name: type_name.clone(),
        key: key.to_string(),
    })
}

/// Read the live value of a relation
///
/// Referencing relations read as `Ref` (or `Null` when unlinked), owning
/// relations go through the store: `RefList` for collections, `Ref`/`Null`
/// for single owning relations.
pub fn read_relation<S: DocumentStore + ?Sized>(
    store: &S,
    record: &Document,
    relation: &RelationMetadata,
) -> Result<Value> {
    if relation.is_owning() {
        let refs = store.related(&record.record_ref(), relation)?;
        return Ok(if relation.is_collection() {
            Value::RefList(refs)
        } else {
            refs.into_iter().next().into()
        });
    }

    match record.field(&relation.key) {
        Value::Null => Ok(Value::Null),
        Value::Id(id) => {
            let target = if relation.polymorphic {
                relation
                    .type_key
                    .as_deref()
                    .and_then(|key| record.field(key).as_str().map(TypeName::from))
            } else {
                relation.targets.first().cloned()
            };
            Ok(target
                .map(|t| Value::Ref(RecordRef::new(t, id)))
                .unwrap_or(Value::Null))
        }
        other => Err(Error::InvalidOperation(format!(
            "relation key '{}' on {} holds {} instead of an id",
            relation.key,
            record.record_ref(),
            other.type_name()
        ))),
    }
}

/// Read the live value of any scope key
///
/// # Errors
///
/// `UnknownScopeKey` if the key does not exist on the record's type.
pub fn read_scope_value<S: DocumentStore + ?Sized>(store: &S, record: &Document, key: &str) -> Result<Value> {
    match classify(store.schema(), record.type_name(), key)? {
        ScopeKey::Relation(relation) => read_relation(store, record, relation),
        ScopeKey::Attribute => Ok(record.field(key)),
    }
}

/// Override for `key` if one is given, otherwise the live value
///
/// The key is validated even when overridden.
pub fn effective_value<S: DocumentStore + ?Sized>(
    store: &S,
    record: &Document,
    key: &str,
    overrides: &ScopeValues,
) -> Result<Value> {
    match overrides.get(key) {
        Some(value) => {
            classify(store.schema(), record.type_name(), key)?;
            Ok(value.clone())
        }
        None => read_scope_value(store, record, key),
    }
}

/// Overwrite a referencing relation with a reference or null
///
/// # Errors
///
/// `UnsupportedAssignment` for owning relations and for values that are not
/// a reference, an id (non-polymorphic only) or null.
pub fn assign_relation(record: &mut Document, relation: &RelationMetadata, value: Value) -> Result<()> {
    let type_name = record.type_name().clone();
    let unsupported = || Error::UnsupportedAssignment {
        type_name: type_name.clone(),
        key: relation.name.clone(),
    };
    if relation.is_owning() {
        return Err(unsupported());
    }

    match value {
        Value::Ref(target) => {
            record.set(relation.key.clone(), Value::Id(target.id));
            if let Some(type_key) = &relation.type_key {
                record.set(type_key.clone(), Value::String(target.type_name.to_string()));
            }
            if let Some(field) = &relation.inverse_of_field {
                record.set(field.clone(), Value::Null);
            }
        }
        Value::Id(id) if !relation.polymorphic => {
            record.set(relation.key.clone(), Value::Id(id));
        }
        Value::Null => {
            for key in relation.storage_keys() {
                record.set(key, Value::Null);
            }
        }
        _ => return Err(unsupported()),
    }
    Ok(())
}

/// Overwrite the value of any scope key on `record`
///
/// # Errors
///
/// `UnknownScopeKey` for unknown keys, `InvalidOperation` for `id`, and
/// `UnsupportedAssignment` as for [`assign_relation`].
pub fn assign_scope_value(schema: &SchemaRegistry, record: &mut Document, key: &str, value: Value) -> Result<()> {
    match classify(schema, record.type_name(), key)? {
        ScopeKey::Relation(relation) => assign_relation(record, relation, value),
        ScopeKey::Attribute if key == ID_FIELD => Err(Error::InvalidOperation(format!(
            "cannot overwrite the id of {}",
            record.record_ref()
        ))),
        ScopeKey::Attribute => {
            record.set(key, value);
            Ok(())
        }
    }
}
