//! Shared page chrome for every HTML response.

use maud::{html, Markup, Render, DOCTYPE};

const SIDEBAR: &[(&str, &str)] = &[
    ("Home", "/catalog"),
    ("All books", "/catalog/books"),
    ("All authors", "/catalog/authors"),
    ("All genres", "/catalog/genres"),
    ("All book-instances", "/catalog/bookinstances"),
    ("Create new author", "/catalog/author/create"),
    ("Create new genre", "/catalog/genre/create"),
    ("Create new book", "/catalog/book/create"),
    ("Create new book instance (copy)", "/catalog/bookinstance/create"),
];

/// Wrap page content in the document shell and sidebar.
///
/// Plain strings are escaped; pass `PreEscaped` for text that already is.
pub fn page(title: impl Render, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet"
                    href="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";
                link rel="stylesheet" href="/stylesheets/style.css";
            }
            body {
                div.container-fluid {
                    div.row {
                        div.col-sm-2 {
                            ul.sidebar-nav {
                                @for (label, href) in SIDEBAR {
                                    li { a href=(href) { (label) } }
                                    @if *label == "All book-instances" {
                                        li { hr; }
                                    }
                                }
                            }
                        }
                        div.col-sm-10 {
                            (content)
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_escapes_title_and_keeps_content() {
        let markup = page("<Catalog>", html! { p { "body text" } }).into_string();
        assert!(markup.starts_with("<!DOCTYPE html>"));
        assert!(markup.contains("<title>&lt;Catalog&gt;</title>"));
        assert!(markup.contains("<p>body text</p>"));
        assert!(markup.contains(r#"href="/catalog/books""#));
    }
}
