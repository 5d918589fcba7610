use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{DocumentId, DocumentStore, Filter, StoreError};

/// A type persisted as one document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> DocumentId;
}

/// Typed view over one collection of the store.
pub struct Collection<T> {
    store: Option<Arc<dyn DocumentStore>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub(crate) fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn store(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        self.store.as_ref().ok_or(StoreError::Unavailable)
    }

    fn decode(doc: Value) -> Result<T, StoreError> {
        serde_json::from_value(doc).map_err(|source| StoreError::Decode {
            collection: T::COLLECTION,
            source,
        })
    }

    fn encode(item: &T) -> Result<Value, StoreError> {
        serde_json::to_value(item).map_err(StoreError::Encode)
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        self.store()?
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        self.find(&Filter::All).await
    }

    pub async fn get(&self, id: DocumentId) -> Result<Option<T>, StoreError> {
        self.store()?
            .get(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Fetch the documents for a set of ids; unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[DocumentId]) -> Result<Vec<T>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find(&Filter::any_of("_id", ids.iter().copied())).await
    }

    pub async fn insert(&self, item: &T) -> Result<(), StoreError> {
        let doc = Self::encode(item)?;
        self.store()?.insert(T::COLLECTION, item.id(), doc).await
    }

    /// Replace the stored document with the same id. Returns `false` if absent.
    pub async fn replace(&self, item: &T) -> Result<bool, StoreError> {
        let doc = Self::encode(item)?;
        self.store()?.replace(T::COLLECTION, item.id(), doc).await
    }

    pub async fn delete(&self, id: DocumentId) -> Result<bool, StoreError> {
        self.store()?.delete(T::COLLECTION, id).await
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        self.store()?.count(T::COLLECTION, filter).await
    }
}
