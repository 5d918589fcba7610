use async_trait::async_trait;
use serde_json::Value;

use crate::{DocumentId, Filter, StoreError};

/// Untyped document store: named collections of JSON documents keyed by id.
///
/// Writes are whole-document; the last write to an id wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching the filter, in id order.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Value>, StoreError>;

    async fn insert(&self, collection: &str, id: DocumentId, doc: Value)
        -> Result<(), StoreError>;

    /// Replace an existing document. Returns `false` when the id is unknown.
    async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        doc: Value,
    ) -> Result<bool, StoreError>;

    /// Remove a document. Returns `false` when the id is unknown.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Flush and release resources.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
