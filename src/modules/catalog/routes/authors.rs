use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use shelf_db::{DocumentId, Filter};
use shelf_http::{render, response::found, AppError, AppResult, Form};

use super::parse_id;
use crate::modules::catalog::forms::AuthorForm;
use crate::modules::catalog::models::Book;
use crate::modules::catalog::{views, CatalogState};
use crate::validation::FormInput;

const LIST_URL: &str = "/catalog/authors";

fn not_found() -> AppError {
    AppError::not_found("Author not found")
}

async fn books_by(state: &CatalogState, id: DocumentId) -> AppResult<Vec<Book>> {
    let mut books = state.books().find(&Filter::eq("author", id)).await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(books)
}

pub(super) async fn list(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    let mut authors = state.authors().all().await?;
    authors.sort_by(|a, b| {
        a.family_name
            .cmp(&b.family_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    Ok(render(views::authors::list(&authors)))
}

pub(super) async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let author = state.authors().get(id).await?.ok_or_else(not_found)?;
    let books = books_by(&state, id).await?;
    Ok(render(views::authors::detail(&author, &books)))
}

pub(super) async fn create_get() -> Html<String> {
    render(views::authors::form("Create Author", &AuthorForm::default(), &[]))
}

pub(super) async fn create_post(
    State(state): State<CatalogState>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let author = match AuthorForm::submit(&input, DocumentId::new()) {
        Ok(author) => author,
        Err(rejected) => {
            let page = views::authors::form("Create Author", &rejected.form, &rejected.errors);
            return Ok(render(page).into_response());
        }
    };
    state.authors().insert(&author).await?;
    tracing::info!(author_id = %author.id, "author created");
    Ok(found(author.url()))
}

pub(super) async fn update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let author = state.authors().get(id).await?.ok_or_else(not_found)?;
    let form = AuthorForm::from_author(&author);
    Ok(render(views::authors::form("Update Author", &form, &[])))
}

pub(super) async fn update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    state.authors().get(id).await?.ok_or_else(not_found)?;

    let author = match AuthorForm::submit(&input, id) {
        Ok(author) => author,
        Err(rejected) => {
            let page = views::authors::form("Update Author", &rejected.form, &rejected.errors);
            return Ok(render(page).into_response());
        }
    };
    if !state.authors().replace(&author).await? {
        return Err(not_found());
    }
    tracing::info!(author_id = %id, "author updated");
    Ok(found(author.url()))
}

pub(super) async fn delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };
    let Some(author) = state.authors().get(id).await? else {
        return Ok(found(LIST_URL));
    };
    let books = books_by(&state, id).await?;
    Ok(render(views::authors::delete(&author, &books)).into_response())
}

/// Refuses while any book still names the author.
pub(super) async fn delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };

    let books = books_by(&state, id).await?;
    if !books.is_empty() {
        if let Some(author) = state.authors().get(id).await? {
            tracing::info!(author_id = %id, books = books.len(), "author delete refused");
            return Ok(render(views::authors::delete(&author, &books)).into_response());
        }
    }

    if state.authors().delete(id).await? {
        tracing::info!(author_id = %id, "author deleted");
    }
    Ok(found(LIST_URL))
}
