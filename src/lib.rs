//! Shelf library catalog.
//!
//! Server-rendered pages for browsing and editing books, authors, genres and
//! book copies, assembled from modules on the Shelf framework crates.

pub mod modules;
pub mod utils;
pub mod validation;

use axum::Router;
use shelf_db::Database;
use shelf_kernel::{ModuleRegistry, Settings};

/// Registry holding every module of the application.
pub fn build_registry(db: &Database) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db);
    registry
}

/// Full HTTP application: every module mounted behind the global middleware.
pub fn build_app(settings: &Settings, db: &Database) -> Router {
    shelf_http::build_router(&build_registry(db), settings)
}
