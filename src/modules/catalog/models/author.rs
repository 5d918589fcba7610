use serde::{Deserialize, Serialize};
use shelf_db::{Document, DocumentId};
use time::Date;

use super::{iso_date, iso_date_string, medium_date};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub first_name: String,
    pub family_name: String,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<Date>,
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Author {
    /// `"family_name, first_name"`; empty unless both parts are present.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn dob_formatted(&self) -> String {
        medium_date(self.date_of_birth)
    }

    pub fn dod_formatted(&self) -> String {
        medium_date(self.date_of_death)
    }

    pub fn lifespan(&self) -> String {
        format!("{} - {}", self.dob_formatted(), self.dod_formatted())
    }

    pub fn dob_iso(&self) -> String {
        iso_date_string(self.date_of_birth)
    }

    pub fn dod_iso(&self) -> String {
        iso_date_string(self.date_of_death)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn austen() -> Author {
        Author {
            id: DocumentId::new(),
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: Some(date!(1775 - 12 - 16)),
            date_of_death: Some(date!(1817 - 07 - 18)),
        }
    }

    #[test]
    fn name_is_family_then_first() {
        assert_eq!(austen().name(), "Austen, Jane");

        let mut nameless = austen();
        nameless.first_name.clear();
        assert_eq!(nameless.name(), "");
    }

    #[test]
    fn lifespan_uses_medium_dates() {
        assert_eq!(austen().lifespan(), "Dec 16, 1775 - Jul 18, 1817");

        let mut living = austen();
        living.date_of_death = None;
        assert_eq!(living.lifespan(), "Dec 16, 1775 - ");
        assert_eq!(living.dod_iso(), "");
        assert_eq!(living.dob_iso(), "1775-12-16");
    }

    #[test]
    fn url_points_at_detail_page() {
        let author = austen();
        assert_eq!(author.url(), format!("/catalog/author/{}", author.id));
    }

    #[test]
    fn stored_document_uses_calendar_dates() {
        let author = austen();
        let doc = serde_json::to_value(&author).unwrap();
        assert_eq!(doc["date_of_birth"], "1775-12-16");
        assert_eq!(doc["_id"], serde_json::Value::from(author.id));

        let mut living = author.clone();
        living.date_of_death = None;
        let doc = serde_json::to_value(&living).unwrap();
        assert!(doc.get("date_of_death").is_none());
        assert_eq!(serde_json::from_value::<Author>(doc).unwrap(), living);
    }
}
