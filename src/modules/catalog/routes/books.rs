use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use shelf_db::{DocumentId, Filter};
use shelf_http::{render, response::found, AppError, AppResult, Form};

use super::parse_id;
use crate::modules::catalog::forms::BookForm;
use crate::modules::catalog::models::{Author, Book, BookInstance, Genre};
use crate::modules::catalog::{views, CatalogState};
use crate::validation::{FieldError, FormInput};

const LIST_URL: &str = "/catalog/books";

fn not_found() -> AppError {
    AppError::not_found("Book not found")
}

/// Authors and genres offered by the book form, sorted for display.
async fn choices(state: &CatalogState) -> AppResult<(Vec<Author>, Vec<Genre>)> {
    let (author_docs, genre_docs) = (state.authors(), state.genres());
    let (mut authors, mut genres) = tokio::try_join!(author_docs.all(), genre_docs.all())?;
    authors.sort_by(|a, b| {
        a.family_name
            .cmp(&b.family_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    genres.sort_by(|a, b| a.name.cmp(&b.name));
    Ok((authors, genres))
}

async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let (authors, genres) = choices(state).await?;
    Ok(render(views::books::form(title, form, &authors, &genres, errors)))
}

/// A book with everything its detail and delete pages show.
struct Joined {
    book: Book,
    author: Option<Author>,
    genres: Vec<Genre>,
    copies: Vec<BookInstance>,
}

async fn load(state: &CatalogState, id: DocumentId) -> AppResult<Option<Joined>> {
    let Some(book) = state.books().get(id).await? else {
        return Ok(None);
    };
    let (author_docs, genre_docs, copy_docs) = (state.authors(), state.genres(), state.instances());
    let of_book = Filter::eq("book", id);
    let (author, mut genres, copies) = tokio::try_join!(
        author_docs.get(book.author),
        genre_docs.find_by_ids(&book.genre),
        copy_docs.find(&of_book),
    )?;
    genres.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Some(Joined {
        book,
        author,
        genres,
        copies,
    }))
}

pub(super) async fn list(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    let mut books = state.books().all().await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));

    let mut author_ids: Vec<DocumentId> = books.iter().map(|book| book.author).collect();
    author_ids.sort();
    author_ids.dedup();
    let authors: HashMap<DocumentId, Author> = state
        .authors()
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|author| (author.id, author))
        .collect();

    Ok(render(views::books::list(&books, &authors)))
}

pub(super) async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let joined = load(&state, id).await?.ok_or_else(not_found)?;
    Ok(render(views::books::detail(
        &joined.book,
        joined.author.as_ref(),
        &joined.genres,
        &joined.copies,
    )))
}

pub(super) async fn create_get(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Book", &BookForm::default(), &[]).await
}

pub(super) async fn create_post(
    State(state): State<CatalogState>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let book = match BookForm::submit(&input, DocumentId::new()) {
        Ok(book) => book,
        Err(rejected) => {
            return Ok(render_form(&state, "Create Book", &rejected.form, &rejected.errors)
                .await?
                .into_response());
        }
    };
    state.books().insert(&book).await?;
    tracing::info!(book_id = %book.id, author_id = %book.author, "book created");
    Ok(found(book.url()))
}

pub(super) async fn update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let book = state.books().get(id).await?.ok_or_else(not_found)?;
    render_form(&state, "Update Book", &BookForm::from_book(&book), &[]).await
}

pub(super) async fn update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(input): Form<FormInput>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    state.books().get(id).await?.ok_or_else(not_found)?;

    let book = match BookForm::submit(&input, id) {
        Ok(book) => book,
        Err(rejected) => {
            return Ok(render_form(&state, "Update Book", &rejected.form, &rejected.errors)
                .await?
                .into_response());
        }
    };
    if !state.books().replace(&book).await? {
        return Err(not_found());
    }
    tracing::info!(book_id = %id, "book updated");
    Ok(found(book.url()))
}

pub(super) async fn delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };
    let Some(joined) = load(&state, id).await? else {
        return Ok(found(LIST_URL));
    };
    Ok(render(views::books::delete(
        &joined.book,
        joined.author.as_ref(),
        &joined.genres,
        &joined.copies,
    ))
    .into_response())
}

/// Refuses while any copy of the book remains.
pub(super) async fn delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<DocumentId>() else {
        return Ok(found(LIST_URL));
    };

    if let Some(joined) = load(&state, id).await? {
        if !joined.copies.is_empty() {
            tracing::info!(book_id = %id, copies = joined.copies.len(), "book delete refused");
            return Ok(render(views::books::delete(
                &joined.book,
                joined.author.as_ref(),
                &joined.genres,
                &joined.copies,
            ))
            .into_response());
        }
    }

    if state.books().delete(id).await? {
        tracing::info!(book_id = %id, "book deleted");
    }
    Ok(found(LIST_URL))
}
