pub mod forms;
pub mod models;
mod routes;
mod views;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use shelf_db::{Collection, Database};
use shelf_kernel::{InitCtx, Module};

use models::{Author, Book, BookInstance, Genre};

/// Shared state for every catalog handler.
#[derive(Clone)]
pub struct CatalogState {
    db: Database,
}

impl CatalogState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn authors(&self) -> Collection<Author> {
        self.db.collection()
    }

    pub fn books(&self) -> Collection<Book> {
        self.db.collection()
    }

    pub fn genres(&self) -> Collection<Genre> {
        self.db.collection()
    }

    pub fn instances(&self) -> Collection<BookInstance> {
        self.db.collection()
    }
}

/// Books, authors, genres and copies, served as HTML under `/catalog`.
pub struct CatalogModule {
    state: CatalogState,
}

impl CatalogModule {
    pub fn new(db: Database) -> Self {
        Self {
            state: CatalogState::new(db),
        }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn mount_path(&self) -> &'static str {
        "/catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            store_connected = self.state.db.is_connected(),
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// Create a new instance of the catalog module
pub fn create_module(db: Database) -> Arc<dyn Module> {
    Arc::new(CatalogModule::new(db))
}
