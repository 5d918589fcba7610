use std::sync::Arc;

use async_trait::async_trait;
use axum::{response::Response, routing::get, Router};
use shelf_http::response::found;
use shelf_kernel::Module;

/// Site root; sends visitors on to the catalog.
pub struct IndexModule;

impl IndexModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for IndexModule {
    fn name(&self) -> &'static str {
        "index"
    }

    fn mount_path(&self) -> &'static str {
        "/"
    }

    fn routes(&self) -> Router {
        Router::new().route("/", get(redirect_to_catalog))
    }
}

async fn redirect_to_catalog() -> Response {
    found("/catalog")
}

/// Create a new instance of the index module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(IndexModule::new())
}
