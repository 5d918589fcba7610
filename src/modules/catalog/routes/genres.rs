use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use shelf_db::{DocumentId, Filter};
use shelf_http::{render, response::found, AppError, AppResult, Form};

use super::parse_id;
use crate::modules::catalog::forms::GenreForm;
use crate::modules::catalog::models::Book;
use crate::modules::catalog::{views, CatalogState};
use crate::validation::FormInput;

const LIST_URL: &str = "/catalog/genres";

fn not_found() -> AppError {
    AppError::not_found("Genre not found")
}

async fn books_in(state: &CatalogState, id: DocumentId) -> AppResult<Vec<Book>> {
    let mut books = state.books().find(&Filter::contains("genre", id)).await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(books)
}

pub(super) async fn list(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    let mut genres = state.genres().all().await?;
    genres.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(render(views::genres::list(&genres)))
}

pub(super) async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let genre = state.genres().get(id).await?.ok_or_else(not_found)?;
    let books = books_in(&state, id).await?;
    Ok(render(views::genres::detail(&genre, &books)))
}

pub(super) async fn create_get() -> Html<String> {
    render(views::genres::form("Create Genre", &GenreForm::default(), &[]))
}

/// A name matching an existing genre, ignoring case, redirects to that genre.
pub(super) async fn create_post(
    State(state): State<CatalogState>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let genre = match GenreForm::submit(&input, DocumentId::new()) {
        Ok(genre) => genre,
        Err(rejected) => {
            let page = views::genres::form("Create Genre", &rejected.form, &rejected.errors);
            return Ok(render(page).into_response());
        }
    };

    let same_name = Filter::EqIgnoreCase("name", genre.name.clone());
    if let Some(existing) = state.genres().find(&same_name).await?.into_iter().next() {
        tracing::debug!(genre_id = %existing.id, "genre already exists");
        return Ok(found(existing.url()));
    }

    state.genres().insert(&genre).await?;
    tracing::info!(genre_id = %genre.id, "genre created");
    Ok(found(genre.url()))
}

pub(super) async fn update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let genre = state.genres().get(id).await?.ok_or_else(not_found)?;
    let form = GenreForm::from_genre(&genre);
    Ok(render(views::genres::form("Update Genre", &form, &[])))
}

pub(super) async fn update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    state.genres().get(id).await?.ok_or_else(not_found)?;

    let genre = match GenreForm::submit(&input, id) {
        Ok(genre) => genre,
        Err(rejected) => {
            let page = views::genres::form("Update Genre", &rejected.form, &rejected.errors);
            return Ok(render(page).into_response());
        }
    };
    if !state.genres().replace(&genre).await? {
        return Err(not_found());
    }
    tracing::info!(genre_id = %id, "genre updated");
    Ok(found(genre.url()))
}

pub(super) async fn delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };
    let Some(genre) = state.genres().get(id).await? else {
        return Ok(found(LIST_URL));
    };
    let books = books_in(&state, id).await?;
    Ok(render(views::genres::delete(&genre, &books)).into_response())
}

/// Refuses while any book is still tagged with the genre.
pub(super) async fn delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };

    let books = books_in(&state, id).await?;
    if !books.is_empty() {
        if let Some(genre) = state.genres().get(id).await? {
            tracing::info!(genre_id = %id, books = books.len(), "genre delete refused");
            return Ok(render(views::genres::delete(&genre, &books)).into_response());
        }
    }

    if state.genres().delete(id).await? {
        tracing::info!(genre_id = %id, "genre deleted");
    }
    Ok(found(LIST_URL))
}
