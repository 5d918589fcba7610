use maud::{html, Markup};
use shelf_http::layout::page;

use super::{error_list, record_actions, stored, titled};
use crate::modules::catalog::forms::AuthorForm;
use crate::modules::catalog::models::{Author, Book};
use crate::validation::FieldError;

pub fn list(authors: &[Author]) -> Markup {
    page(
        "Author List",
        html! {
            h1 { "Author List" }
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul {
                    @for author in authors {
                        li {
                            a href=(author.url()) { (stored(&author.name())) }
                            " (" (author.lifespan()) ")"
                        }
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

pub fn detail(author: &Author, books: &[Book]) -> Markup {
    let name = author.name();
    page(
        titled("Author: ", &name),
        html! {
            h1 { "Author: " (stored(&name)) }
            p { (author.lifespan()) }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if books.is_empty() {
                    p { "This author has no books." }
                } @else {
                    (book_list(books))
                }
            }
            (record_actions(&author.url(), "author"))
        },
    )
}

pub fn form(title: &str, form: &AuthorForm, errors: &[FieldError]) -> Markup {
    page(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="first_name" { "First Name:" }
                    input.form-control type="text" id="first_name" name="first_name"
                        placeholder="First name" required value=(stored(&form.first_name));
                    label for="family_name" { "Family Name:" }
                    input.form-control type="text" id="family_name" name="family_name"
                        placeholder="Family name" required value=(stored(&form.family_name));
                }
                div.form-group {
                    label for="date_of_birth" { "Date of birth:" }
                    input.form-control type="date" id="date_of_birth" name="date_of_birth"
                        value=(stored(&form.date_of_birth));
                }
                div.form-group {
                    label for="date_of_death" { "Date of death:" }
                    input.form-control type="date" id="date_of_death" name="date_of_death"
                        value=(stored(&form.date_of_death));
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; while `books` is non-empty the author cannot be deleted.
pub fn delete(author: &Author, books: &[Book]) -> Markup {
    let name = author.name();
    page(
        titled("Delete Author: ", &name),
        html! {
            h1 { "Delete Author: " (stored(&name)) }
            p { (author.lifespan()) }
            @if books.is_empty() {
                p { "Do you really want to delete this Author?" }
                form method="POST" {
                    input type="hidden" name="authorid" value=(author.id.to_string());
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this author." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    (book_list(books))
                }
            }
        },
    )
}
