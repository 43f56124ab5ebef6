//! Persistence collaborator trait
//!
//! The sibling engine never stores or executes anything itself. It reads
//! relation metadata from the schema, composes `Criteria`, and hands both
//! reads and writes to a `DocumentStore`.

use crate::criteria::Criteria;
use crate::document::Document;
use crate::error::Result;
use crate::relation::RelationMetadata;
use crate::schema::SchemaRegistry;
use crate::types::{RecordRef, TypeName};

/// Store abstraction the sibling engine runs against
///
/// Implementations own the records; the engine only borrows them for the
/// duration of a call.
pub trait DocumentStore {
    /// Schema the store was built with
    fn schema(&self) -> &SchemaRegistry;

    /// Load a record by reference
    ///
    /// Returns None if no such record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn fetch(&self, reference: &RecordRef) -> Result<Option<Document>>;

    /// References reachable from `owner` through `relation`
    ///
    /// For a referencing relation this is at most the one referenced record;
    /// for an owning relation it is every record linked to `owner`, in store
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if `owner` does not exist or the relation cannot be
    /// traversed.
    fn related(&self, owner: &RecordRef, relation: &RelationMetadata) -> Result<Vec<RecordRef>>;

    /// Add `record` to the owning `relation` of `owner`
    ///
    /// Writes the back-reference on `record`; the caller persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if `relation` is not an owning relation or no
    /// back-reference can be determined.
    fn link(&self, owner: &RecordRef, relation: &RelationMetadata, record: &mut Document) -> Result<()>;

    /// Persist a record (insert or replace)
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&self, record: &Document) -> Result<()>;

    /// Evaluate a criteria into the matching records
    ///
    /// Every call re-evaluates against the current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn execute(&self, criteria: &Criteria) -> Result<Vec<Document>>;

    /// Root criteria for "records of `base_type` linked as `relation` to `owners`"
    fn query_scope(
        &self,
        base_type: &TypeName,
        owners: Vec<RecordRef>,
        relation: &RelationMetadata,
    ) -> Criteria {
        Criteria::linked(base_type.clone(), owners, relation.name.clone())
    }
}
