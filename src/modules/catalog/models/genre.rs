use serde::{Deserialize, Serialize};
use shelf_db::{Document, DocumentId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
}

impl Document for Genre {
    const COLLECTION: &'static str = "genres";

    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}
