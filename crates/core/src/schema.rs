//! Schema registry: record types, their attributes and relations
//!
//! The registry is a static table built at registration time. Every lookup
//! the sibling engine needs goes through it:
//!
//! - `reflect(type, name)`: relation metadata, inherited from ancestors
//! - `base_type(type)`: topmost ancestor that is itself a document type
//! - `has_attribute(type, name)`: declared fields, relation storage keys and `id`
//! - `default_sibling_scope(type)`: per-type default scope, inherited
//!
//! ## Usage
//!
//! ```
//! use siblings_core::{RelationMetadata, SchemaRegistry, TypeSchema};
//!
//! let mut schema = SchemaRegistry::new();
//! schema.register(
//!     TypeSchema::document("Parent")
//!         .relation(RelationMetadata::has_many("children", "Child").inverse_of("parent")),
//! );
//! schema.register(
//!     TypeSchema::document("Child")
//!         .field("name")
//!         .relation(RelationMetadata::belongs_to("parent", "Parent").inverse_of("children")),
//! );
//!
//! assert!(schema.reflect(&"Child".into(), "parent").unwrap().is_some());
//! assert!(schema.has_attribute(&"Child".into(), "parent_id").unwrap());
//! ```

use crate::document::ID_FIELD;
use crate::error::{Error, Result};
use crate::relation::RelationMetadata;
use crate::scope::ScopeSpec;
use crate::types::TypeName;
use std::collections::{BTreeSet, HashMap};

/// Declaration of one record type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
    name: TypeName,
    superclass: Option<TypeName>,
    document: bool,
    fields: BTreeSet<String>,
    relations: Vec<RelationMetadata>,
    default_sibling_scope: Option<ScopeSpec>,
}

impl TypeSchema {
    /// A root document type
    pub fn document(name: impl Into<TypeName>) -> Self {
        TypeSchema {
            name: name.into(),
            superclass: None,
            document: true,
            fields: BTreeSet::new(),
            relations: Vec::new(),
            default_sibling_scope: None,
        }
    }

    /// A document type inheriting from `superclass`
    pub fn subtype(name: impl Into<TypeName>, superclass: impl Into<TypeName>) -> Self {
        let mut schema = Self::document(name);
        schema.superclass = Some(superclass.into());
        schema
    }

    /// A non-document ancestor; base type resolution stops below it
    pub fn plain(name: impl Into<TypeName>) -> Self {
        let mut schema = Self::document(name);
        schema.document = false;
        schema
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: impl Into<TypeName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Declare an attribute
    pub fn field(mut self, name: &str) -> Self {
        self.fields.insert(name.to_string());
        self
    }

    /// Declare a relation
    ///
    /// A relation with the same name replaces the earlier declaration.
    pub fn relation(mut self, relation: RelationMetadata) -> Self {
        self.relations.retain(|r| r.name != relation.name);
        self.relations.push(relation);
        self
    }

    /// Set the default sibling scope
    pub fn default_sibling_scope(mut self, scope: impl Into<ScopeSpec>) -> Self {
        self.default_sibling_scope = Some(scope.into());
        self
    }

    /// Type name
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Declared superclass
    pub fn superclass(&self) -> Option<&TypeName> {
        self.superclass.as_ref()
    }

    /// True for document types
    pub fn is_document(&self) -> bool {
        self.document
    }

    /// Relations declared directly on this type, in declaration order
    pub fn relations(&self) -> &[RelationMetadata] {
        &self.relations
    }

    /// Attributes declared directly on this type
    pub fn fields(&self) -> &BTreeSet<String> {
        &self.fields
    }
}

/// Registry of record types
///
/// Maintains the type table used for relation reflection, attribute
/// validation, base type resolution and default scopes.
pub struct SchemaRegistry {
    types: HashMap<TypeName, TypeSchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        SchemaRegistry {
            types: HashMap::new(),
        }
    }

    /// Register a type, replacing any previous declaration of the same name
    pub fn register(&mut self, schema: TypeSchema) {
        self.types.insert(schema.name.clone(), schema);
    }

    /// Get a type declaration
    pub fn get(&self, type_name: &TypeName) -> Option<&TypeSchema> {
        self.types.get(type_name)
    }

    /// Get a type declaration or fail with `UnknownType`
    pub fn type_schema(&self, type_name: &TypeName) -> Result<&TypeSchema> {
        self.types
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.clone()))
    }

    /// Check if a type is registered
    pub fn is_registered(&self, type_name: &TypeName) -> bool {
        self.types.contains_key(type_name)
    }

    /// Unregister a type
    pub fn unregister(&mut self, type_name: &TypeName) -> Option<TypeSchema> {
        self.types.remove(type_name)
    }

    /// Get all registered type names, sorted
    pub fn type_names(&self) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The type and its registered ancestors, nearest first
    ///
    /// Unregistered ancestors end the chain. Fails on unknown `type_name`
    /// or an inheritance cycle.
    pub fn ancestry(&self, type_name: &TypeName) -> Result<Vec<&TypeSchema>> {
        let mut current = self.type_schema(type_name)?;
        let mut chain = vec![current];
        while let Some(parent) = current.superclass.as_ref() {
            let Some(schema) = self.types.get(parent) else {
                break;
            };
            if chain.iter().any(|s| s.name == schema.name) {
                return Err(Error::InvalidOperation(format!(
                    "inheritance cycle through type {}",
                    schema.name
                )));
            }
            chain.push(schema);
            current = schema;
        }
        Ok(chain)
    }

    /// Topmost ancestor that is itself a document type
    pub fn base_type(&self, type_name: &TypeName) -> Result<TypeName> {
        let mut base = type_name;
        for schema in self.ancestry(type_name)?.into_iter().skip(1) {
            if !schema.document {
                break;
            }
            base = &schema.name;
        }
        Ok(base.clone())
    }

    /// Relation metadata for `name` on `type_name`, including inherited relations
    pub fn reflect(&self, type_name: &TypeName, name: &str) -> Result<Option<&RelationMetadata>> {
        Ok(self
            .ancestry(type_name)?
            .into_iter()
            .find_map(|schema| schema.relations.iter().find(|r| r.name == name)))
    }

    /// All relations visible on `type_name`, own declarations first
    ///
    /// An inherited relation shadowed by a nearer declaration is skipped.
    pub fn relations(&self, type_name: &TypeName) -> Result<Vec<&RelationMetadata>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for schema in self.ancestry(type_name)? {
            for relation in &schema.relations {
                if seen.insert(relation.name.as_str()) {
                    out.push(relation);
                }
            }
        }
        Ok(out)
    }

    /// True if `name` is a readable attribute of `type_name`
    ///
    /// Attributes are `id`, declared fields and the storage keys of
    /// referencing relations.
    pub fn has_attribute(&self, type_name: &TypeName, name: &str) -> Result<bool> {
        if name == ID_FIELD {
            return Ok(true);
        }
        Ok(self.ancestry(type_name)?.into_iter().any(|schema| {
            schema.fields.contains(name)
                || schema
                    .relations
                    .iter()
                    .any(|r| r.storage_keys().contains(&name))
        }))
    }

    /// The referencing relation on `record_type` that an owning relation collects through
    ///
    /// Found via the owning relation's `as_name` (polymorphic) or its
    /// explicit `inverse_of`.
    pub fn back_reference(
        &self,
        record_type: &TypeName,
        owning: &RelationMetadata,
    ) -> Result<Option<&RelationMetadata>> {
        let name = match owning.as_name.as_deref().or(owning.inverse_of.as_deref()) {
            Some(name) => name,
            None => return Ok(None),
        };
        Ok(self
            .reflect(record_type, name)?
            .filter(|relation| !relation.is_owning()))
    }

    /// Default sibling scope for a type, inherited from ancestors
    pub fn default_sibling_scope(&self, type_name: &TypeName) -> Result<Option<&ScopeSpec>> {
        Ok(self
            .ancestry(type_name)?
            .into_iter()
            .find_map(|schema| schema.default_sibling_scope.as_ref()))
    }

    /// Set the default sibling scope of a type
    pub fn set_default_sibling_scope(
        &mut self,
        type_name: &TypeName,
        scope: impl Into<ScopeSpec>,
    ) -> Result<()> {
        let schema = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.clone()))?;
        schema.default_sibling_scope = Some(scope.into());
        Ok(())
    }

    /// Reset the default sibling scope of a type to unset
    ///
    /// Returns the previous scope.
    pub fn reset_default_sibling_scope(&mut self, type_name: &TypeName) -> Result<Option<ScopeSpec>> {
        let schema = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.clone()))?;
        Ok(schema.default_sibling_scope.take())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("type_count", &self.types.len())
            .field("type_names", &self.type_names())
            .finish()
    }
}
