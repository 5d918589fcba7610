pub mod catalog;
pub mod index;
pub mod users;

use shelf_db::Database;
use shelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    registry.register(index::create_module());
    registry.register(catalog::create_module(db.clone()));
    registry.register(users::create_module());
}
