use maud::{html, Markup};
use shelf_http::layout::page;

use super::{error_list, record_actions, status_badge, stored};
use crate::modules::catalog::forms::BookInstanceForm;
use crate::modules::catalog::models::{Book, BookInstance, BookStatus};
use crate::validation::FieldError;

pub fn list(copies: &[(BookInstance, Option<Book>)]) -> Markup {
    page(
        "Book Instance List",
        html! {
            h1 { "Book Instance List" }
            @if copies.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for (copy, book) in copies {
                        li {
                            a href=(copy.url()) {
                                @if let Some(book) = book {
                                    (stored(&book.title)) " : "
                                }
                                (stored(&copy.imprint))
                            }
                            " - " (status_badge(copy.status))
                            @if copy.status != BookStatus::Available {
                                span { " (Due: " (copy.due_back_formatted()) ")" }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn summary(copy: &BookInstance, book: Option<&Book>) -> Markup {
    html! {
        p {
            strong { "Title: " }
            @if let Some(book) = book {
                a href=(book.url()) { (stored(&book.title)) }
            }
        }
        p { strong { "Imprint: " } (stored(&copy.imprint)) }
        p { strong { "Status: " } (status_badge(copy.status)) }
        @if copy.status != BookStatus::Available {
            p { strong { "Due back: " } (copy.due_back_formatted()) }
        }
    }
}

pub fn detail(copy: &BookInstance, book: Option<&Book>) -> Markup {
    let id = copy.id.to_string();
    page(
        format!("Copy: {id}"),
        html! {
            h1 { "ID: " (id) }
            (summary(copy, book))
            (record_actions(&copy.url(), "BookInstance"))
        },
    )
}

pub fn form(
    title: &str,
    form: &BookInstanceForm,
    books: &[Book],
    errors: &[FieldError],
) -> Markup {
    page(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="book" { "Book:" }
                    select.form-control id="book" name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in books {
                            @let id = book.id.to_string();
                            option value=(id) selected[form.book == id] { (stored(&book.title)) }
                        }
                    }
                }
                div.form-group {
                    label for="imprint" { "Imprint:" }
                    input.form-control type="text" id="imprint" name="imprint"
                        placeholder="Publisher and date information" required
                        value=(stored(&form.imprint));
                }
                div.form-group {
                    label for="due_back" { "Date when book available:" }
                    input.form-control type="date" id="due_back" name="due_back"
                        value=(stored(&form.due_back));
                }
                div.form-group {
                    label for="status" { "Status:" }
                    select.form-control id="status" name="status" required {
                        @for status in BookStatus::ALL {
                            option value=(status.as_str()) selected[form.status == status.as_str()] {
                                (status.as_str())
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

pub fn delete(copy: &BookInstance, book: Option<&Book>) -> Markup {
    let id = copy.id.to_string();
    page(
        "Delete BookInstance",
        html! {
            h1 { "Delete BookInstance" }
            p { "Do you really want to delete this BookInstance?" }
            div style="margin-left:20px" {
                p { strong { "ID: " } (id) }
                (summary(copy, book))
            }
            form method="POST" {
                input type="hidden" name="bookinstanceid" value=(id);
                button.btn.btn-primary type="submit" { "Delete" }
            }
        },
    )
}
