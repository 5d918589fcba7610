use axum::{extract::State, response::Html};
use shelf_db::Filter;
use shelf_http::{render, AppResult};

use crate::modules::catalog::models::BookStatus;
use crate::modules::catalog::views::{self, home::Counts};
use crate::modules::catalog::CatalogState;

pub(super) async fn index(State(state): State<CatalogState>) -> AppResult<Html<String>> {
    let all = Filter::All;
    let available = Filter::eq("status", BookStatus::Available.as_str());
    let (book_docs, copy_docs, author_docs, genre_docs) =
        (state.books(), state.instances(), state.authors(), state.genres());

    let (books, copies, available_copies, authors, genres) = tokio::try_join!(
        book_docs.count(&all),
        copy_docs.count(&all),
        copy_docs.count(&available),
        author_docs.count(&all),
        genre_docs.count(&all),
    )?;

    let counts = Counts {
        books,
        copies,
        available_copies,
        authors,
        genres,
    };
    Ok(render(views::home::index(&counts)))
}
