//! Catalog documents and their derived display values.

mod author;
mod book;
mod genre;
mod instance;

pub use author::Author;
pub use book::Book;
pub use genre::Genre;
pub use instance::{BookInstance, BookStatus};

use time::macros::format_description;
use time::Date;

// Dates are stored as plain calendar dates.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// `May 1, 2024`, or empty when unset.
fn medium_date(date: Option<Date>) -> String {
    date.and_then(|date| {
        date.format(format_description!(
            "[month repr:short] [day padding:none], [year]"
        ))
        .ok()
    })
    .unwrap_or_default()
}

/// `2024-05-01`, or empty when unset.
fn iso_date_string(date: Option<Date>) -> String {
    date.and_then(|date| date.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_default()
}
