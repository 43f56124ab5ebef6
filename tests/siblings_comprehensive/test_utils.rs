//! Test utilities for the siblings comprehensive tests
//!
//! Provides the shared record model and helpers for creating, linking and
//! reloading records.
//!
//! ## Model
//!
//! - `SuperParent` has many `children` and one `polymorphic_child`
//! - `Parent` has many `referenced_children`, two polymorphic collections
//!   filling `polymorphic_parent`, embedded children and polymorphic
//!   embedded children
//! - `ReferencedChild` belongs to a `super_parent`, a `parent` and a
//!   polymorphic `polymorphic_parent`
//! - `Team` has two structurally identical collections of `Player`

#![allow(dead_code)]

pub use siblings::{
    Document, DocumentStore, Error, MemoryStore, RecordId, RelationMetadata, SchemaRegistry,
    ScopeSpec, ScopeValues, SiblingOptions, Siblings, TypeSchema, Value,
};

// =============================================================================
// Schema
// =============================================================================

/// Register the shared record model
pub fn schema() -> SchemaRegistry {
    let mut schema = SchemaRegistry::new();

    schema.register(
        TypeSchema::document("SuperParent")
            .relation(RelationMetadata::has_many("children", "ReferencedChild").inverse_of("super_parent"))
            .relation(
                RelationMetadata::has_one("polymorphic_child", "ReferencedChild")
                    .as_interface("polymorphic_parent"),
            ),
    );

    schema.register(
        TypeSchema::document("Parent")
            .relation(
                RelationMetadata::has_many("referenced_children", "ReferencedChild").inverse_of("parent"),
            )
            .relation(
                RelationMetadata::has_many("referenced_polymorphic_children1", "ReferencedChild")
                    .as_interface("polymorphic_parent"),
            )
            .relation(
                RelationMetadata::has_many("referenced_polymorphic_children2", "ReferencedChild")
                    .as_interface("polymorphic_parent"),
            )
            .relation(
                RelationMetadata::embeds_many("embedded_children", "EmbeddedChild").inverse_of("parent"),
            )
            .relation(
                RelationMetadata::embeds_many("embedded_polymorphic_children", "PolymorphicEmbeddedChild")
                    .as_interface("parent"),
            ),
    );

    schema.register(
        TypeSchema::document("ReferencedChild")
            .field("name")
            .relation(RelationMetadata::belongs_to("super_parent", "SuperParent").inverse_of("children"))
            .relation(RelationMetadata::belongs_to("parent", "Parent").inverse_of("referenced_children"))
            .relation(RelationMetadata::belongs_to_polymorphic("polymorphic_parent")),
    );
    schema.register(TypeSchema::subtype("AdoptedChild", "ReferencedChild"));

    schema.register(
        TypeSchema::document("EmbeddedChild")
            .relation(RelationMetadata::embedded_in("parent", "Parent").inverse_of("embedded_children")),
    );
    schema.register(
        TypeSchema::document("PolymorphicEmbeddedChild")
            .relation(RelationMetadata::embedded_in_polymorphic("parent")),
    );

    schema.register(
        TypeSchema::document("Team")
            .relation(RelationMetadata::has_many("players", "Player").foreign_key("team_id"))
            .relation(RelationMetadata::has_many("reserves", "Player").foreign_key("reserve_team_id")),
    );
    schema.register(
        TypeSchema::document("Player")
            .field("name")
            .field("position")
            .relation(RelationMetadata::belongs_to("team", "Team"))
            .relation(RelationMetadata::belongs_to("reserve_team", "Team")),
    );

    schema
}

// =============================================================================
// Fixture
// =============================================================================

/// A store over the shared model
pub struct Fixture {
    pub store: MemoryStore,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        Fixture {
            store: MemoryStore::new(schema()),
        }
    }

    pub fn siblings(&self) -> Siblings<'_, MemoryStore> {
        Siblings::new(&self.store)
    }

    /// Persist a new record and return it
    pub fn create(&self, doc: Document) -> Document {
        self.store.create(doc.clone()).expect("Failed to create record");
        doc
    }

    pub fn parent(&self) -> Document {
        self.create(Document::new("Parent"))
    }

    pub fn super_parent(&self) -> Document {
        self.create(Document::new("SuperParent"))
    }

    /// Create a referenced child assigned to the given parents
    pub fn child(&self, parent: Option<&Document>, super_parent: Option<&Document>) -> Document {
        let mut doc = Document::new("ReferencedChild");
        if let Some(parent) = parent {
            doc.set("parent_id", parent.id());
        }
        if let Some(super_parent) = super_parent {
            doc.set("super_parent_id", super_parent.id());
        }
        self.create(doc)
    }

    /// Link `record` into `relation` on `owner` and save it
    pub fn link(&self, owner: &Document, relation: &str, record: &mut Document) {
        let metadata = self
            .store
            .schema()
            .reflect(owner.type_name(), relation)
            .unwrap()
            .expect("relation not declared")
            .clone();
        self.store.link(&owner.record_ref(), &metadata, record).unwrap();
        self.store.save(record).unwrap();
    }

    /// Re-read a record from the store
    pub fn reload(&self, doc: &Document) -> Document {
        self.store.get(&doc.id()).expect("record vanished")
    }

    pub fn find_siblings(&self, record: &Document, options: &SiblingOptions) -> Vec<RecordId> {
        ids(&self.siblings().find_siblings(record, options).unwrap())
    }

    pub fn find_siblings_and_self(&self, record: &Document, options: &SiblingOptions) -> Vec<RecordId> {
        ids(&self.siblings().find_siblings_and_self(record, options).unwrap())
    }

    pub fn is_sibling(&self, record: &Document, other: &Document, options: &SiblingOptions) -> bool {
        self.siblings().is_sibling(record, other, options).unwrap()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Ids in result order
pub fn ids(docs: &[Document]) -> Vec<RecordId> {
    docs.iter().map(|d| d.id()).collect()
}

/// Ids, sorted, for order-insensitive comparison
pub fn sorted(mut ids: Vec<RecordId>) -> Vec<RecordId> {
    ids.sort();
    ids
}

/// Route engine logs to the test writer
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Options with an explicit scope
pub fn scoped(scope: impl Into<ScopeSpec>) -> SiblingOptions {
    SiblingOptions::new().scope(scope)
}
