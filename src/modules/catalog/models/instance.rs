use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shelf_db::{Document, DocumentId};
use time::Date;

use super::{iso_date, iso_date_string, medium_date};

/// Circulation state of one physical copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    Maintenance,
    Available,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Maintenance,
        BookStatus::Available,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub const NAMES: &'static [&'static str] = &["Maintenance", "Available", "Loaned", "Reserved"];

    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Available => "Available",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book status '{s}'"))
    }
}

/// A physical copy of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub book: DocumentId,
    pub imprint: String,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub due_back: Option<Date>,
}

impl Document for BookInstance {
    const COLLECTION: &'static str = "bookinstances";

    fn id(&self) -> DocumentId {
        self.id
    }
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        medium_date(self.due_back)
    }

    pub fn due_back_iso(&self) -> String {
        iso_date_string(self.due_back)
    }
}
