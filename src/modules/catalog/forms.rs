//! Submitted form state for each entity: the rules a submission must pass,
//! the (sanitized) values echoed back on re-render, and the stored document a
//! valid submission produces.

use shelf_db::DocumentId;

use super::models::{Author, Book, BookInstance, BookStatus, Genre};
use crate::validation::{self, Check, FieldError, FieldRules, FormInput};

const AUTHOR_RULES: &[FieldRules] = &[
    FieldRules {
        field: "first_name",
        optional: false,
        checks: &[
            (Check::NonEmpty, "First name must be specified."),
            (Check::MaxLength(100), "First name must be at most 100 characters."),
            (Check::Alphanumeric, "First name has non-alphanumeric characters."),
        ],
    },
    FieldRules {
        field: "family_name",
        optional: false,
        checks: &[
            (Check::NonEmpty, "Family name must be specified."),
            (Check::MaxLength(100), "Family name must be at most 100 characters."),
            (Check::Alphanumeric, "Family name has non-alphanumeric characters."),
        ],
    },
    FieldRules {
        field: "date_of_birth",
        optional: true,
        checks: &[(Check::IsoDate, "Invalid date of birth")],
    },
    FieldRules {
        field: "date_of_death",
        optional: true,
        checks: &[(Check::IsoDate, "Invalid date of death")],
    },
];

const BOOK_RULES: &[FieldRules] = &[
    FieldRules {
        field: "title",
        optional: false,
        checks: &[(Check::NonEmpty, "Title must not be empty.")],
    },
    FieldRules {
        field: "author",
        optional: false,
        checks: &[
            (Check::NonEmpty, "Author must not be empty."),
            (Check::Identifier, "Author must not be empty."),
        ],
    },
    FieldRules {
        field: "summary",
        optional: false,
        checks: &[(Check::NonEmpty, "Summary must not be empty.")],
    },
    FieldRules {
        field: "isbn",
        optional: false,
        checks: &[(Check::NonEmpty, "ISBN must not be empty")],
    },
];

const GENRE_RULES: &[FieldRules] = &[FieldRules {
    field: "name",
    optional: false,
    checks: &[
        (Check::MinLength(3), "Genre name must contain at least 3 characters"),
        (Check::MaxLength(100), "Genre name must be at most 100 characters"),
    ],
}];

const INSTANCE_RULES: &[FieldRules] = &[
    FieldRules {
        field: "book",
        optional: false,
        checks: &[
            (Check::NonEmpty, "Book must be specified"),
            (Check::Identifier, "Book must be specified"),
        ],
    },
    FieldRules {
        field: "imprint",
        optional: false,
        checks: &[(Check::NonEmpty, "Imprint must be specified")],
    },
    FieldRules {
        field: "status",
        optional: false,
        checks: &[(Check::OneOf(BookStatus::NAMES), "Invalid status")],
    },
    FieldRules {
        field: "due_back",
        optional: true,
        checks: &[(Check::IsoDate, "Invalid Date")],
    },
];

/// A submission that failed validation, ready to be re-rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorForm {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn submit(input: &FormInput, id: DocumentId) -> Result<Author, Rejected<Self>> {
        let sanitized = validation::validate(input, AUTHOR_RULES);
        let form = Self {
            first_name: sanitized.value("first_name"),
            family_name: sanitized.value("family_name"),
            date_of_birth: sanitized.value("date_of_birth"),
            date_of_death: sanitized.value("date_of_death"),
        };
        if !sanitized.is_valid() {
            return Err(Rejected {
                form,
                errors: sanitized.errors,
            });
        }
        Ok(Author {
            id,
            date_of_birth: validation::parse_date(&form.date_of_birth),
            date_of_death: validation::parse_date(&form.date_of_death),
            first_name: form.first_name,
            family_name: form.family_name,
        })
    }

    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.dob_iso(),
            date_of_death: author.dod_iso(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookForm {
    /// The author id only parses when its rule passed, so a missing id
    /// always comes with an error to show.
    pub fn submit(input: &FormInput, id: DocumentId) -> Result<Book, Rejected<Self>> {
        let sanitized = validation::validate(input, BOOK_RULES);
        let form = Self {
            title: sanitized.value("title"),
            author: sanitized.value("author"),
            summary: sanitized.value("summary"),
            isbn: sanitized.value("isbn"),
            genre: validation::identifiers(input, "genre"),
        };
        match form.author.parse() {
            Ok(author) if sanitized.is_valid() => Ok(Book {
                id,
                author,
                genre: form.genre.iter().filter_map(|genre| genre.parse().ok()).collect(),
                title: form.title,
                summary: form.summary,
                isbn: form.isbn,
            }),
            _ => Err(Rejected {
                form,
                errors: sanitized.errors,
            }),
        }
    }

    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn has_genre(&self, genre: &Genre) -> bool {
        let id = genre.id.to_string();
        self.genre.iter().any(|selected| *selected == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreForm {
    pub name: String,
}

impl GenreForm {
    pub fn submit(input: &FormInput, id: DocumentId) -> Result<Genre, Rejected<Self>> {
        let sanitized = validation::validate(input, GENRE_RULES);
        let name = sanitized.value("name");
        if !sanitized.is_valid() {
            return Err(Rejected {
                form: Self { name },
                errors: sanitized.errors,
            });
        }
        Ok(Genre { id, name })
    }

    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceForm {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl Default for BookInstanceForm {
    fn default() -> Self {
        Self {
            book: String::new(),
            imprint: String::new(),
            status: BookStatus::default().to_string(),
            due_back: String::new(),
        }
    }
}

impl BookInstanceForm {
    /// Book id and status only parse when their rules passed.
    pub fn submit(input: &FormInput, id: DocumentId) -> Result<BookInstance, Rejected<Self>> {
        let sanitized = validation::validate(input, INSTANCE_RULES);
        let form = Self {
            book: sanitized.value("book"),
            imprint: sanitized.value("imprint"),
            status: sanitized.value("status"),
            due_back: sanitized.value("due_back"),
        };
        match (form.book.parse(), form.status.parse()) {
            (Ok(book), Ok(status)) if sanitized.is_valid() => Ok(BookInstance {
                id,
                book,
                status,
                due_back: validation::parse_date(&form.due_back),
                imprint: form.imprint,
            }),
            _ => Err(Rejected {
                form,
                errors: sanitized.errors,
            }),
        }
    }

    pub fn from_instance(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance.due_back_iso(),
        }
    }
}
