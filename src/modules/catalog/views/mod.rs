//! HTML for the catalog pages.
//!
//! Text read from the store was escaped when it was submitted, so it goes
//! through [`stored`] instead of being escaped a second time.

pub(super) mod authors;
pub(super) mod books;
pub(super) mod genres;
pub(super) mod home;
pub(super) mod instances;

use maud::{html, Markup, PreEscaped};

use super::models::BookStatus;
use crate::validation::FieldError;

pub(super) fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Stored text inside a fixed prefix, for page titles.
pub(super) fn titled(prefix: &str, text: &str) -> Markup {
    html! { (prefix) (stored(text)) }
}

pub(super) fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li { (error.message) }
                }
            }
        }
    }
}

pub(super) fn status_badge(status: BookStatus) -> Markup {
    let class = match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    };
    html! { span class=(class) { (status.as_str()) } }
}

/// Update and delete links under a detail page.
pub(super) fn record_actions(url: &str, noun: &str) -> Markup {
    html! {
        hr;
        p { a href=(format!("{url}/delete")) { "Delete " (noun) } }
        p { a href=(format!("{url}/update")) { "Update " (noun) } }
    }
}
