use serde::{Deserialize, Serialize};
use shelf_db::{Document, DocumentId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub author: DocumentId,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<DocumentId>,
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}
