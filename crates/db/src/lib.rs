//! Document store client factory and typed collections.
//!
//! The store holds named collections of JSON documents keyed by
//! [`DocumentId`]. Handlers talk to it through [`Collection`], and the
//! process-wide [`Database`] handle is created once at startup.

use std::sync::Arc;

mod collection;
mod error;
mod filter;
mod id;
mod memory;
mod sqlite;
mod store;

pub use collection::{Collection, Document};
pub use error::StoreError;
pub use filter::Filter;
pub use id::DocumentId;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::DocumentStore;

/// Cloneable handle to the document store.
///
/// A handle whose connection attempt failed stays usable: every operation
/// on it fails with [`StoreError::Unavailable`].
#[derive(Clone)]
pub struct Database {
    store: Option<Arc<dyn DocumentStore>>,
}

impl Database {
    /// Connect to the store named by a connection string.
    ///
    /// `memory://` gives a process-local store. `sqlite://<path>` and
    /// `file://<path>` open a SQLite database file.
    pub async fn try_connect(url: &str) -> Result<Self, StoreError> {
        let store: Arc<dyn DocumentStore> = if url.starts_with("memory://") {
            Arc::new(MemoryStore::new())
        } else if let Some(path) = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("file://"))
        {
            Arc::new(SqliteStore::open(path).await?)
        } else {
            return Err(StoreError::UnsupportedUrl(url.to_string()));
        };
        Ok(Self::from_store(store))
    }

    /// Connect, logging instead of failing when the store cannot be reached.
    pub async fn connect(url: &str) -> Self {
        match Self::try_connect(url).await {
            Ok(db) => {
                tracing::info!(target: "shelf-db", %url, "document store connected");
                db
            }
            Err(err) => {
                tracing::error!(
                    target: "shelf-db",
                    %url,
                    error = %err,
                    "document store connection failed; serving without a store"
                );
                Self::disconnected()
            }
        }
    }

    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Fresh process-local store.
    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    pub fn disconnected() -> Self {
        Self { store: None }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn collection<T: Document>(&self) -> Collection<T> {
        Collection::new(self.store.clone())
    }

    /// Flush and release the store. Errors are logged.
    pub async fn close(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.close().await {
            Ok(()) => tracing::info!(target: "shelf-db", "document store closed"),
            Err(err) => {
                tracing::error!(target: "shelf-db", error = %err, "failed to close document store")
            }
        }
    }
}
