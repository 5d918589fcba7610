use maud::{html, Markup};
use shelf_http::layout::page;

/// Record counts shown on the catalog home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub books: u64,
    pub copies: u64,
    pub available_copies: u64,
    pub authors: u64,
    pub genres: u64,
}

pub fn index(counts: &Counts) -> Markup {
    page(
        "Local Library Home",
        html! {
            h1 { "Local Library Home" }
            p {
                "Welcome to " em { "LocalLibrary" }
                ", a very basic website for browsing and managing a library catalog."
            }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books:" } " " (counts.books) }
                li { strong { "Copies:" } " " (counts.copies) }
                li { strong { "Copies available:" } " " (counts.available_copies) }
                li { strong { "Authors:" } " " (counts.authors) }
                li { strong { "Genres:" } " " (counts.genres) }
            }
        },
    )
}
