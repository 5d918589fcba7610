#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use shelf_db::Database;
use shelf_kernel::settings::{Environment, Settings};
use tower::ServiceExt;

/// Settings for driving the app in tests; the limiter is out of the way.
pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.server.rate_limit.max_requests = 10_000;
    settings
}

pub fn app(db: &Database) -> Router {
    shelf_app::build_app(&settings(), db)
}

pub fn app_in(environment: Environment, db: &Database) -> Router {
    let mut settings = settings();
    settings.environment = environment;
    shelf_app::build_app(&settings, db)
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_body(app: &Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Location of a `302 Found` response.
pub fn redirect_target(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::FOUND);
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

/// Create an author through the form and return its detail URL.
pub async fn create_author(app: &Router, first: &str, family: &str) -> String {
    let response = post_form(
        app,
        "/catalog/author/create",
        &[
            ("first_name", first),
            ("family_name", family),
            ("date_of_birth", ""),
            ("date_of_death", ""),
        ],
    )
    .await;
    redirect_target(&response)
}

pub async fn create_genre(app: &Router, name: &str) -> String {
    let response = post_form(app, "/catalog/genre/create", &[("name", name)]).await;
    redirect_target(&response)
}

pub async fn create_book(app: &Router, title: &str, author_url: &str, genres: &[&str]) -> String {
    let author = id_of(author_url);
    let mut fields = vec![
        ("title", title),
        ("author", author),
        ("summary", "A summary."),
        ("isbn", "9780000000000"),
    ];
    for genre in genres {
        fields.push(("genre", id_of(genre)));
    }
    let response = post_form(app, "/catalog/book/create", &fields).await;
    redirect_target(&response)
}

pub async fn create_copy(app: &Router, book_url: &str, status: &str, due_back: &str) -> String {
    let response = post_form(
        app,
        "/catalog/bookinstance/create",
        &[
            ("book", id_of(book_url)),
            ("imprint", "Penguin, 2003"),
            ("status", status),
            ("due_back", due_back),
        ],
    )
    .await;
    redirect_target(&response)
}

/// Trailing id segment of a detail URL.
pub fn id_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}
