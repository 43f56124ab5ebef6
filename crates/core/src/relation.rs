//! Relation metadata
//!
//! Describes one relation declared on a record type. Metadata is immutable
//! once registered and is looked up by (type, name) through the schema
//! registry.
//!
//! ## Storage conventions
//!
//! | Kind | Side | Key | Extra keys |
//! |------|------|-----|------------|
//! | BelongsTo / EmbeddedIn | referencing | `<name>_id` | polymorphic: `<name>_type`, `<name>_field` |
//! | HasOne / HasMany / EmbedsOne / EmbedsMany | owning | `id` | none |
//!
//! The referencing side stores the owner's id. The owning side stores
//! nothing; its members are the records whose back-reference points at it.
//! For polymorphic relations `<name>_field` records which of the owner's
//! relations the record was linked through.

use crate::types::TypeName;
use serde::{Deserialize, Serialize};

/// Kind of a declared relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Referenced single parent
    BelongsTo,
    /// Referenced single child
    HasOne,
    /// Referenced child collection
    HasMany,
    /// Embedded child's parent
    EmbeddedIn,
    /// Embedded single child
    EmbedsOne,
    /// Embedded child collection
    EmbedsMany,
}

/// Whether a relation holds one record or many
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most one related record
    Single,
    /// Any number of related records
    Collection,
}

impl RelationKind {
    /// Cardinality implied by the kind
    pub const fn cardinality(&self) -> Cardinality {
        match self {
            RelationKind::HasMany | RelationKind::EmbedsMany => Cardinality::Collection,
            _ => Cardinality::Single,
        }
    }

    /// True for the side that does not store a key (has/embeds)
    pub const fn is_owning(&self) -> bool {
        matches!(
            self,
            RelationKind::HasOne
                | RelationKind::HasMany
                | RelationKind::EmbedsOne
                | RelationKind::EmbedsMany
        )
    }

    /// True for embedded relations
    pub const fn is_embedded(&self) -> bool {
        matches!(
            self,
            RelationKind::EmbeddedIn | RelationKind::EmbedsOne | RelationKind::EmbedsMany
        )
    }
}

/// Metadata for one relation on a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMetadata {
    /// Relation name (also the scope key)
    pub name: String,
    /// Relation kind
    pub kind: RelationKind,
    /// Target types; empty for a polymorphic referencing relation
    pub targets: Vec<TypeName>,
    /// Storage key used for equality filters
    pub key: String,
    /// Whether the target type is only known at runtime
    pub polymorphic: bool,
    /// Field holding the target type of a polymorphic reference
    pub type_key: Option<String>,
    /// Field holding the name of the inverse relation the record was linked through
    pub inverse_of_field: Option<String>,
    /// Explicitly declared inverse relation name
    pub inverse_of: Option<String>,
    /// Polymorphic interface an owning relation fills (the target's relation name)
    pub as_name: Option<String>,
    /// Field on the target storing the owner id, when no back-reference is declared
    pub foreign_key: Option<String>,
}

impl RelationMetadata {
    fn referencing(name: &str, kind: RelationKind, target: Option<TypeName>) -> Self {
        let polymorphic = target.is_none();
        RelationMetadata {
            name: name.to_string(),
            kind,
            targets: target.into_iter().collect(),
            key: format!("{}_id", name),
            polymorphic,
            type_key: polymorphic.then(|| format!("{}_type", name)),
            inverse_of_field: polymorphic.then(|| format!("{}_field", name)),
            inverse_of: None,
            as_name: None,
            foreign_key: None,
        }
    }

    fn owning(name: &str, kind: RelationKind, target: TypeName) -> Self {
        RelationMetadata {
            name: name.to_string(),
            kind,
            targets: vec![target],
            key: crate::document::ID_FIELD.to_string(),
            polymorphic: false,
            type_key: None,
            inverse_of_field: None,
            inverse_of: None,
            as_name: None,
            foreign_key: None,
        }
    }

    /// Referenced parent of a known type
    pub fn belongs_to(name: &str, target: impl Into<TypeName>) -> Self {
        Self::referencing(name, RelationKind::BelongsTo, Some(target.into()))
    }

    /// Referenced parent whose type is stored alongside the id
    pub fn belongs_to_polymorphic(name: &str) -> Self {
        Self::referencing(name, RelationKind::BelongsTo, None)
    }

    /// Embedded child's parent of a known type
    pub fn embedded_in(name: &str, target: impl Into<TypeName>) -> Self {
        Self::referencing(name, RelationKind::EmbeddedIn, Some(target.into()))
    }

    /// Embedded child's parent whose type is stored alongside the id
    pub fn embedded_in_polymorphic(name: &str) -> Self {
        Self::referencing(name, RelationKind::EmbeddedIn, None)
    }

    /// Referenced child
    pub fn has_one(name: &str, target: impl Into<TypeName>) -> Self {
        Self::owning(name, RelationKind::HasOne, target.into())
    }

    /// Referenced child collection
    pub fn has_many(name: &str, target: impl Into<TypeName>) -> Self {
        Self::owning(name, RelationKind::HasMany, target.into())
    }

    /// Embedded single child
    pub fn embeds_one(name: &str, target: impl Into<TypeName>) -> Self {
        Self::owning(name, RelationKind::EmbedsOne, target.into())
    }

    /// Embedded child collection
    pub fn embeds_many(name: &str, target: impl Into<TypeName>) -> Self {
        Self::owning(name, RelationKind::EmbedsMany, target.into())
    }

    /// Declare the inverse relation explicitly
    pub fn inverse_of(mut self, inverse: &str) -> Self {
        self.inverse_of = Some(inverse.to_string());
        self
    }

    /// Declare the polymorphic interface this owning relation fills
    pub fn as_interface(mut self, interface: &str) -> Self {
        self.as_name = Some(interface.to_string());
        self
    }

    /// Declare the field on the target that stores the owner id
    pub fn foreign_key(mut self, field: &str) -> Self {
        self.foreign_key = Some(field.to_string());
        self
    }

    /// Cardinality implied by the kind
    pub fn cardinality(&self) -> Cardinality {
        self.kind.cardinality()
    }

    /// True if the relation holds a collection
    pub fn is_collection(&self) -> bool {
        self.cardinality() == Cardinality::Collection
    }

    /// True for the side that does not store a key
    pub fn is_owning(&self) -> bool {
        self.kind.is_owning()
    }

    /// Fields this relation stores on the declaring record
    pub fn storage_keys(&self) -> Vec<&str> {
        if self.is_owning() {
            return Vec::new();
        }
        let mut keys = vec![self.key.as_str()];
        keys.extend(self.type_key.as_deref());
        keys.extend(self.inverse_of_field.as_deref());
        keys
    }
}
