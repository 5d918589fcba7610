use std::collections::HashMap;

use maud::{html, Markup};
use shelf_db::DocumentId;
use shelf_http::layout::page;

use super::{error_list, record_actions, status_badge, stored, titled};
use crate::modules::catalog::forms::BookForm;
use crate::modules::catalog::models::{Author, Book, BookInstance, BookStatus, Genre};
use crate::validation::FieldError;

pub fn list(books: &[Book], authors: &HashMap<DocumentId, Author>) -> Markup {
    page(
        "Book List",
        html! {
            h1 { "Book List" }
            @if books.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for book in books {
                        li {
                            a href=(book.url()) { (stored(&book.title)) }
                            @if let Some(author) = authors.get(&book.author) {
                                " (" (stored(&author.name())) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

fn copy_entries(copies: &[BookInstance]) -> Markup {
    html! {
        @for copy in copies {
            hr;
            p { (status_badge(copy.status)) }
            p { strong { "Imprint: " } (stored(&copy.imprint)) }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back: " } (copy.due_back_formatted()) }
            }
            p { strong { "Id: " } a href=(copy.url()) { (copy.id.to_string()) } }
        }
    }
}

fn summary(book: &Book, author: Option<&Author>, genres: &[Genre]) -> Markup {
    html! {
        p {
            strong { "Author: " }
            @if let Some(author) = author {
                a href=(author.url()) { (stored(&author.name())) }
            }
        }
        p { strong { "Summary: " } (stored(&book.summary)) }
        p { strong { "ISBN: " } (stored(&book.isbn)) }
        p {
            strong { "Genre: " }
            @for (index, genre) in genres.iter().enumerate() {
                @if index > 0 { ", " }
                a href=(genre.url()) { (stored(&genre.name)) }
            }
        }
    }
}

pub fn detail(
    book: &Book,
    author: Option<&Author>,
    genres: &[Genre],
    copies: &[BookInstance],
) -> Markup {
    page(
        titled("Title: ", &book.title),
        html! {
            h1 { "Title: " (stored(&book.title)) }
            (summary(book, author, genres))
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Copies" }
                @if copies.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    (copy_entries(copies))
                }
            }
            (record_actions(&book.url(), "book"))
        },
    )
}

pub fn form(
    title: &str,
    form: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[FieldError],
) -> Markup {
    page(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="title" { "Title:" }
                    input.form-control type="text" id="title" name="title"
                        placeholder="Name of book" required value=(stored(&form.title));
                }
                div.form-group {
                    label for="author" { "Author:" }
                    select.form-control id="author" name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in authors {
                            @let id = author.id.to_string();
                            option value=(id) selected[form.author == id] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div.form-group {
                    label for="summary" { "Summary:" }
                    textarea.form-control id="summary" name="summary"
                        placeholder="Summary" required { (stored(&form.summary)) }
                }
                div.form-group {
                    label for="isbn" { "ISBN:" }
                    input.form-control type="text" id="isbn" name="isbn"
                        placeholder="ISBN13" required value=(stored(&form.isbn));
                }
                div.form-group {
                    label { "Genre:" }
                    div {
                        @for genre in genres {
                            @let id = genre.id.to_string();
                            div style="display: inline; padding-right:10px;" {
                                input.checkbox-input type="checkbox" name="genre" id=(id)
                                    value=(id) checked[form.has_genre(genre)];
                                label for=(id) { " " (stored(&genre.name)) }
                            }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; while `copies` is non-empty the book cannot be deleted.
pub fn delete(
    book: &Book,
    author: Option<&Author>,
    genres: &[Genre],
    copies: &[BookInstance],
) -> Markup {
    page(
        titled("Delete Book: ", &book.title),
        html! {
            h1 { "Delete Book: " (stored(&book.title)) }
            (summary(book, author, genres))
            @if copies.is_empty() {
                p { "Do you really want to delete this Book?" }
                form method="POST" {
                    input type="hidden" name="bookid" value=(book.id.to_string());
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Copies" }
                    (copy_entries(copies))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Author, Genre, Book) {
        let author = Author {
            id: DocumentId::new(),
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let genre = Genre {
            id: DocumentId::new(),
            name: "Romance".to_string(),
        };
        let book = Book {
            id: DocumentId::new(),
            title: "Emma".to_string(),
            author: author.id,
            summary: "Matchmaking.".to_string(),
            isbn: "9780141439587".to_string(),
            genre: vec![genre.id],
        };
        (author, genre, book)
    }

    #[test]
    fn list_joins_author_names() {
        let (author, _, book) = fixtures();
        let authors = HashMap::from([(author.id, author)]);
        let html = list(&[book], &authors).into_string();
        assert!(html.contains("Emma</a> (Austen, Jane)"));
    }

    #[test]
    fn form_preselects_author_and_genres() {
        let (author, genre, book) = fixtures();
        let state = BookForm::from_book(&book);
        let html = form("Update Book", &state, &[author], &[genre], &[]).into_string();
        assert!(html.contains("selected"));
        assert!(html.contains("checked"));
        assert!(html.contains("Matchmaking.</textarea>"));
    }

    #[test]
    fn copies_show_due_date_unless_available() {
        let (_, _, book) = fixtures();
        let copy = BookInstance {
            id: DocumentId::new(),
            book: book.id,
            imprint: "Penguin".to_string(),
            status: BookStatus::Loaned,
            due_back: Some(time::macros::date!(2024 - 05 - 01)),
        };
        let html = detail(&book, None, &[], &[copy]).into_string();
        assert!(html.contains("Due back: </strong>May 1, 2024"));
    }
}
