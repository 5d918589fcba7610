//! SQLite-backed document store.
//!
//! Every document is one row of the `documents` table, keyed by collection
//! and id, with the JSON body stored as text. Each write is a single
//! statement, so a failed write leaves the table as it was.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::{DocumentId, DocumentStore, Filter, StoreError};

const MAX_CONNECTIONS: u32 = 5;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database file at `path`, creating it and its parent
    /// directory when missing, and apply pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(target: "shelf-db", path = %path.display(), "opened sqlite document store");
        Ok(Self { pool })
    }

    async fn bodies(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT body FROM documents WHERE collection = ? ORDER BY id ASC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|body| parse_body(collection, body)).collect()
    }
}

fn parse_body(collection: &str, body: &str) -> Result<Value, StoreError> {
    serde_json::from_str(body).map_err(|source| StoreError::Corrupt {
        collection: collection.to_string(),
        source,
    })
}

fn to_body(doc: &Value) -> Result<String, StoreError> {
    serde_json::to_string(doc).map_err(StoreError::Encode)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    // Filters are evaluated on the decoded rows of the collection.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let mut docs = self.bodies(collection).await?;
        docs.retain(|doc| filter.matches(doc));
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, String>(
            "SELECT body FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(collection)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        body.map(|body| parse_body(collection, &body)).transpose()
    }

    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        doc: Value,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id.to_string())
            .bind(to_body(&doc)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        doc: Value,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(to_body(&doc)?)
            .bind(collection)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        if !matches!(filter, Filter::All) {
            return Ok(self.find(collection, filter).await?.len() as u64);
        }
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE collection = ?",
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}
