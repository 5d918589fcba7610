mod authors;
mod books;
mod genres;
mod home;
mod instances;

use axum::{routing::get, Router};
use shelf_db::DocumentId;
use shelf_http::AppError;

use super::CatalogState;

pub(super) fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(home::index))
        // authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_get).post(authors::create_post))
        .route("/author/{id}", get(authors::detail))
        .route("/author/{id}/update", get(authors::update_get).post(authors::update_post))
        .route("/author/{id}/delete", get(authors::delete_get).post(authors::delete_post))
        // books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_get).post(books::create_post))
        .route("/book/{id}", get(books::detail))
        .route("/book/{id}/update", get(books::update_get).post(books::update_post))
        .route("/book/{id}/delete", get(books::delete_get).post(books::delete_post))
        // genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_get).post(genres::create_post))
        .route("/genre/{id}", get(genres::detail))
        .route("/genre/{id}/update", get(genres::update_get).post(genres::update_post))
        .route("/genre/{id}/delete", get(genres::delete_get).post(genres::delete_post))
        // copies
        .route("/bookinstances", get(instances::list))
        .route(
            "/bookinstance/create",
            get(instances::create_get).post(instances::create_post),
        )
        .route("/bookinstance/{id}", get(instances::detail))
        .route(
            "/bookinstance/{id}/update",
            get(instances::update_get).post(instances::update_post),
        )
        .route(
            "/bookinstance/{id}/delete",
            get(instances::delete_get).post(instances::delete_post),
        )
        .with_state(state)
}

/// Parse a path id; a malformed id is reported like a missing record.
fn parse_id(raw: &str, entity: &str) -> Result<DocumentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("{entity} not found")))
}
