use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use shelf_db::DocumentId;
use shelf_http::{render, response::found, AppError, AppResult, Form};

use super::parse_id;
use crate::modules::catalog::forms::BookInstanceForm;
use crate::modules::catalog::models::Book;
use crate::modules::catalog::{views, CatalogState};
use crate::validation::{FieldError, FormInput};

const LIST_URL: &str = "/catalog/bookinstances";

fn not_found() -> AppError {
    AppError::not_found("Book copy not found")
}

async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookInstanceForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut books = state.books().all().await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(render(views::instances::form(title, form, &books, errors)))
}

pub(super) async fn list(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    let copies = state.instances().all().await?;

    let mut book_ids: Vec<DocumentId> = copies.iter().map(|copy| copy.book).collect();
    book_ids.sort();
    book_ids.dedup();
    let books: HashMap<DocumentId, Book> = state
        .books()
        .find_by_ids(&book_ids)
        .await?
        .into_iter()
        .map(|book| (book.id, book))
        .collect();

    let mut rows: Vec<_> = copies
        .into_iter()
        .map(|copy| {
            let book = books.get(&copy.book).cloned();
            (copy, book)
        })
        .collect();
    rows.sort_by(|(a, a_book), (b, b_book)| {
        let a_title = a_book.as_ref().map(|book| book.title.as_str());
        let b_title = b_book.as_ref().map(|book| book.title.as_str());
        a_title.cmp(&b_title).then_with(|| a.imprint.cmp(&b.imprint))
    });

    Ok(render(views::instances::list(&rows)))
}

pub(super) async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let copy = state.instances().get(id).await?.ok_or_else(not_found)?;
    let book = state.books().get(copy.book).await?;
    Ok(render(views::instances::detail(&copy, book.as_ref())))
}

pub(super) async fn create_get(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    render_form(&state, "Create BookInstance", &BookInstanceForm::default(), &[]).await
}

pub(super) async fn create_post(
    State(state): State<CatalogState>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let copy = match BookInstanceForm::submit(&input, DocumentId::new()) {
        Ok(copy) => copy,
        Err(rejected) => {
            let title = "Create BookInstance";
            return Ok(render_form(&state, title, &rejected.form, &rejected.errors)
                .await?
                .into_response());
        }
    };
    state.instances().insert(&copy).await?;
    tracing::info!(instance_id = %copy.id, book_id = %copy.book, "book copy created");
    Ok(found(copy.url()))
}

pub(super) async fn update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let copy = state.instances().get(id).await?.ok_or_else(not_found)?;
    let form = BookInstanceForm::from_instance(&copy);
    render_form(&state, "Update BookInstance", &form, &[]).await
}

pub(super) async fn update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    state.instances().get(id).await?.ok_or_else(not_found)?;

    let copy = match BookInstanceForm::submit(&input, id) {
        Ok(copy) => copy,
        Err(rejected) => {
            let title = "Update BookInstance";
            return Ok(render_form(&state, title, &rejected.form, &rejected.errors)
                .await?
                .into_response());
        }
    };
    if !state.instances().replace(&copy).await? {
        return Err(not_found());
    }
    tracing::info!(instance_id = %id, "book copy updated");
    Ok(found(copy.url()))
}

pub(super) async fn delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };
    let Some(copy) = state.instances().get(id).await? else {
        return Ok(found(LIST_URL));
    };
    let book = state.books().get(copy.book).await?;
    Ok(render(views::instances::delete(&copy, book.as_ref())).into_response())
}

/// Copies have no dependents; deleting one that is already gone still
/// redirects to the list.
pub(super) async fn delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };
    if state.instances().delete(id).await? {
        tracing::info!(instance_id = %id, "book copy deleted");
    }
    Ok(found(LIST_URL))
}
