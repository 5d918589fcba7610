//! Error type for document store operations.

use thiserror::Error;

/// Failures raised by the document store and its typed collections.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store is not connected")]
    Unavailable,

    #[error(
        "unsupported connection string '{0}'; expected memory://, sqlite://<path> or file://<path>"
    )]
    UnsupportedUrl(String),

    #[error("document in collection '{collection}' could not be decoded: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("document could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("stored body in collection '{collection}' is not valid JSON: {source}")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("document store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
