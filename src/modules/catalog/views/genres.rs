use maud::{html, Markup};
use shelf_http::layout::page;

use super::{error_list, record_actions, stored, titled};
use crate::modules::catalog::forms::GenreForm;
use crate::modules::catalog::models::{Book, Genre};
use crate::validation::FieldError;

pub fn list(genres: &[Genre]) -> Markup {
    page(
        "Genre List",
        html! {
            h1 { "Genre List" }
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                }
            }
        },
    )
}

fn book_list(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(genre: &Genre, books: &[Book]) -> Markup {
    page(
        titled("Genre: ", &genre.name),
        html! {
            h1 { "Genre: " (stored(&genre.name)) }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    (book_list(books))
                }
            }
            (record_actions(&genre.url(), "genre"))
        },
    )
}

pub fn form(title: &str, form: &GenreForm, errors: &[FieldError]) -> Markup {
    page(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input.form-control type="text" id="name" name="name"
                        placeholder="Fantasy, Poetry etc." required value=(stored(&form.name));
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; while `books` is non-empty the genre cannot be deleted.
pub fn delete(genre: &Genre, books: &[Book]) -> Markup {
    page(
        titled("Delete Genre: ", &genre.name),
        html! {
            h1 { "Delete Genre: " (stored(&genre.name)) }
            @if books.is_empty() {
                p { "Do you really want to delete this Genre?" }
                form method="POST" {
                    input type="hidden" name="genreid" value=(genre.id.to_string());
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    (book_list(books))
                }
            }
        },
    )
}
