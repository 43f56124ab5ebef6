//! MemoryStore: in-memory document store with insertion ordering
//!
//! This module implements the DocumentStore trait using:
//! - `BTreeMap<u64, Document>` keyed by insertion sequence, so scans come out
//!   in insertion order
//! - `FxHashMap<RecordId, u64>` for id lookup
//! - `TypeIndex` for base-type scans
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing sequence numbers
//!
//! # Relation traversal
//!
//! Owning relations (has/embeds) store nothing on the owner. Their members
//! are the records of the target type whose back-reference points at the
//! owner:
//!
//! - the relation's back reference (`as_name` or `inverse_of`) on the
//!   member type, matching the key, the type key (polymorphic) and the
//!   discriminator (polymorphic, unset or equal to the relation name)
//! - otherwise the relation's `foreign_key` field

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use siblings_core::{
    read_relation, Criteria, CriteriaRoot, Document, DocumentStore, Error, RecordId, RecordRef,
    RelationMetadata, Result, SchemaRegistry, TypeName, Value,
};

use crate::index::TypeIndex;

/// Record table guarded by a single lock
#[derive(Debug, Default)]
struct Inner {
    /// Main data: insertion sequence → document
    records: BTreeMap<u64, Document>,
    /// Id → insertion sequence
    ids: FxHashMap<RecordId, u64>,
    /// Secondary index: base type → sequences
    type_index: TypeIndex,
}

impl Inner {
    fn get(&self, id: &RecordId) -> Option<&Document> {
        self.ids.get(id).and_then(|seq| self.records.get(seq))
    }

    /// Documents of a base type, in insertion order
    fn scan_base_type<'a>(&'a self, base_type: &TypeName) -> impl Iterator<Item = &'a Document> + 'a {
        let sequences: Vec<u64> = self
            .type_index
            .get(base_type)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        sequences.into_iter().filter_map(move |seq| self.records.get(&seq))
    }
}

/// How a member record points back at the owner of an owning relation
enum BackLink<'a> {
    /// Through a declared referencing relation
    Relation(&'a RelationMetadata),
    /// Through a plain foreign key field
    ForeignKey(&'a str),
}

/// In-memory document store
///
/// Implements the DocumentStore trait. Thread-safe through
/// `parking_lot::RwLock` and `AtomicU64`; every read evaluates against the
/// current contents.
#[derive(Debug)]
pub struct MemoryStore {
    schema: SchemaRegistry,
    inner: RwLock<Inner>,
    /// Next insertion sequence
    sequence: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store over a schema
    pub fn new(schema: SchemaRegistry) -> Self {
        Self {
            schema,
            inner: RwLock::new(Inner::default()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Mutable access to the schema (default scope lifecycle, late registration)
    pub fn schema_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.schema
    }

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// `UnknownType` if the record type is not registered, `InvalidOperation`
    /// if a record with the same id already exists.
    pub fn create(&self, record: Document) -> Result<RecordRef> {
        let base_type = self.schema.base_type(record.type_name())?;
        let mut inner = self.inner.write();
        if inner.ids.contains_key(&record.id()) {
            return Err(Error::InvalidOperation(format!(
                "record {} already exists",
                record.record_ref()
            )));
        }
        let reference = record.record_ref();
        self.insert_new(&mut inner, base_type, record);
        debug!(target: "siblings::store", record = %reference, "Created record");
        Ok(reference)
    }

    /// Get a record by id
    pub fn get(&self, id: &RecordId) -> Option<Document> {
        self.inner.read().get(id).cloned()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// All records, in insertion order
    pub fn all(&self) -> Vec<Document> {
        self.inner.read().records.values().cloned().collect()
    }

    /// Delete a record by id
    ///
    /// Returns true if a record was removed.
    pub fn delete(&self, id: &RecordId) -> Result<bool> {
        let mut inner = self.inner.write();
        let Some(seq) = inner.ids.remove(id) else {
            return Ok(false);
        };
        if let Some(record) = inner.records.remove(&seq) {
            let base_type = self.schema.base_type(record.type_name())?;
            inner.type_index.remove(&base_type, seq);
            debug!(target: "siblings::store", record = %record.record_ref(), "Deleted record");
        }
        Ok(true)
    }

    fn insert_new(&self, inner: &mut Inner, base_type: TypeName, record: Document) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        inner.ids.insert(record.id(), seq);
        inner.type_index.insert(base_type, seq);
        inner.records.insert(seq, record);
    }

    /// Resolve how members of `member_type` point back through `owning`
    fn back_link<'a>(&'a self, member_type: &TypeName, owning: &'a RelationMetadata) -> Result<BackLink<'a>> {
        if let Some(back) = self.schema.back_reference(member_type, owning)? {
            return Ok(BackLink::Relation(back));
        }
        if let Some(key) = owning.foreign_key.as_deref() {
            return Ok(BackLink::ForeignKey(key));
        }
        Err(Error::InvalidOperation(format!(
            "relation '{}' has no back reference on {}",
            owning.name, member_type
        )))
    }

    /// True if `record` is collected by `owning` on `owner`
    fn is_member(&self, record: &Document, owner: &RecordRef, owning: &RelationMetadata) -> Result<bool> {
        let owner_id = Value::Id(owner.id);
        match self.back_link(record.type_name(), owning)? {
            BackLink::ForeignKey(key) => Ok(record.field(key) == owner_id),
            BackLink::Relation(back) => {
                if record.field(&back.key) != owner_id {
                    return Ok(false);
                }
                if let Some(type_key) = &back.type_key {
                    if record.field(type_key) != Value::from(owner.type_name.as_str()) {
                        return Ok(false);
                    }
                }
                if let Some(field) = &back.inverse_of_field {
                    let linked_through = record.field(field);
                    if !linked_through.is_null() && linked_through != Value::from(owning.name.as_str()) {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Base types the members of an owning relation may have
    fn target_base_types(&self, owning: &RelationMetadata) -> Result<BTreeSet<TypeName>> {
        owning
            .targets
            .iter()
            .map(|target| self.schema.base_type(target))
            .collect()
    }

    fn members(&self, inner: &Inner, owner: &RecordRef, owning: &RelationMetadata) -> Result<Vec<RecordRef>> {
        let mut sequences = BTreeSet::new();
        for base_type in self.target_base_types(owning)? {
            if let Some(set) = inner.type_index.get(&base_type) {
                sequences.extend(set.iter().copied());
            }
        }

        let mut out = Vec::new();
        for seq in sequences {
            if let Some(record) = inner.records.get(&seq) {
                if self.is_member(record, owner, owning)? {
                    out.push(record.record_ref());
                }
            }
        }
        Ok(out)
    }

    /// Owning relation `name` declared on the owner's type
    fn owning_relation(&self, owner: &RecordRef, name: &str) -> Result<&RelationMetadata> {
        match self.schema.reflect(&owner.type_name, name)? {
            Some(relation) if relation.is_owning() => Ok(relation),
            _ => Err(Error::InvalidOperation(format!(
                "'{}' is not an owning relation of {}",
                name, owner.type_name
            ))),
        }
    }

    fn in_root(&self, record: &Document, root: &CriteriaRoot) -> Result<bool> {
        match root {
            CriteriaRoot::All => Ok(true),
            CriteriaRoot::Linked { owners, relation } => {
                for owner in owners {
                    let owning = self.owning_relation(owner, relation)?;
                    if self.is_member(record, owner, owning)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    fn fetch(&self, reference: &RecordRef) -> Result<Option<Document>> {
        Ok(self.get(&reference.id))
    }

    fn related(&self, owner: &RecordRef, relation: &RelationMetadata) -> Result<Vec<RecordRef>> {
        let inner = self.inner.read();
        if relation.is_owning() {
            // Members point at the owner; the owner record itself is not needed
            return self.members(&inner, owner, relation);
        }
        let Some(record) = inner.get(&owner.id) else {
            return Err(Error::RecordNotFound(owner.clone()));
        };
        Ok(read_relation(self, record, relation)?.record_refs())
    }

    fn link(&self, owner: &RecordRef, relation: &RelationMetadata, record: &mut Document) -> Result<()> {
        if !relation.is_owning() {
            return Err(Error::InvalidOperation(format!(
                "cannot link into referencing relation '{}'",
                relation.name
            )));
        }

        // A single owning relation holds at most one member: detach the previous one
        if !relation.is_collection() {
            let mut inner = self.inner.write();
            let previous = self.members(&inner, owner, relation)?;
            for member in previous.into_iter().filter(|m| m.id != record.id()) {
                let link = self.back_link(&member.type_name, relation)?;
                if let Some(seq) = inner.ids.get(&member.id).copied() {
                    if let Some(doc) = inner.records.get_mut(&seq) {
                        match link {
                            BackLink::Relation(back) => {
                                for key in back.storage_keys() {
                                    doc.set(key, Value::Null);
                                }
                            }
                            BackLink::ForeignKey(key) => doc.set(key, Value::Null),
                        }
                        debug!(target: "siblings::store", record = %member, relation = %relation.name, "Detached previous member");
                    }
                }
            }
        }

        match self.back_link(record.type_name(), relation)? {
            BackLink::Relation(back) => {
                record.set(back.key.clone(), Value::Id(owner.id));
                if let Some(type_key) = &back.type_key {
                    record.set(type_key.clone(), Value::from(owner.type_name.as_str()));
                }
                if let Some(field) = &back.inverse_of_field {
                    record.set(field.clone(), Value::from(relation.name.as_str()));
                }
            }
            BackLink::ForeignKey(key) => record.set(key, Value::Id(owner.id)),
        }
        debug!(target: "siblings::store", owner = %owner, relation = %relation.name, record = %record.record_ref(), "Linked record");
        Ok(())
    }

    fn save(&self, record: &Document) -> Result<()> {
        let base_type = self.schema.base_type(record.type_name())?;
        let mut inner = self.inner.write();
        match inner.ids.get(&record.id()).copied() {
            Some(seq) => {
                inner.records.insert(seq, record.clone());
            }
            None => self.insert_new(&mut inner, base_type, record.clone()),
        }
        debug!(target: "siblings::store", record = %record.record_ref(), "Saved record");
        Ok(())
    }

    fn execute(&self, criteria: &Criteria) -> Result<Vec<Document>> {
        let inner = self.inner.read();
        let mut out = Vec::new();
        for record in inner.scan_base_type(criteria.base_type()) {
            if criteria.admits(record) && self.in_root(record, criteria.root())? {
                out.push(record.clone());
            }
        }
        debug!(target: "siblings::store", base_type = %criteria.base_type(), matched = out.len(), "Executed criteria");
        Ok(out)
    }
}
