mod common;

use axum::http::{header, StatusCode};
use shelf_db::Database;
use shelf_kernel::settings::Environment;

use common::{app, app_in, body_text, get, post_body, post_form, redirect_target, settings};

#[tokio::test]
async fn root_redirects_to_catalog() {
    let app = app(&Database::memory());
    let response = get(&app, "/").await;
    assert_eq!(redirect_target(&response), "/catalog");
}

#[tokio::test]
async fn users_placeholder_and_health_check() {
    let app = app(&Database::memory());
    assert_eq!(
        body_text(get(&app, "/users").await).await,
        "respond with a resource"
    );
    assert_eq!(body_text(get(&app, "/healthz").await).await, "ok");
}

#[tokio::test]
async fn unknown_route_renders_html_not_found() {
    let app = app(&Database::memory());
    let response = get(&app, "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = body_text(response).await;
    assert!(page.contains("<h1>Not Found</h1>"));
    assert!(page.contains("<h2>404</h2>"));
}

#[tokio::test]
async fn unrouted_method_renders_html_not_found() {
    let app = app(&Database::memory());
    let response = post_form(&app, "/catalog/authors", &[("first_name", "Jane")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = body_text(response).await;
    assert!(page.contains("<h1>Not Found</h1>"));
    assert!(page.contains("<h2>404</h2>"));
}

#[tokio::test]
async fn non_form_body_renders_bad_request_page() {
    let app = app(&Database::memory());
    let response = post_body(
        &app,
        "/catalog/author/create",
        "application/json",
        r#"{"first_name":"Jane","family_name":"Austen"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = body_text(response).await;
    assert!(page.contains("<h2>400</h2>"));
    assert!(page.contains("Reference: "));

    let list = body_text(get(&app, "/catalog/authors").await).await;
    assert!(!list.contains("Austen"));
}

#[tokio::test]
async fn static_files_are_served() {
    let app = app(&Database::memory());
    let response = get(&app, "/stylesheets/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(".sidebar-nav"));
}

#[tokio::test]
async fn responses_carry_security_and_request_headers() {
    let app = app(&Database::memory());
    let response = get(&app, "/catalog").await;
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert!(headers[header::CONTENT_SECURITY_POLICY]
        .to_str()
        .unwrap()
        .contains("script-src 'self' code.jquery.com cdn.jsdelivr.net"));
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers["x-ratelimit-limit"], "10000");
}

#[tokio::test]
async fn excess_requests_are_rate_limited() {
    let mut settings = settings();
    settings.server.rate_limit.max_requests = 2;
    let app = shelf_app::build_app(&settings, &Database::memory());

    assert_eq!(get(&app, "/users").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/users").await.status(), StatusCode::OK);

    let response = get(&app, "/users").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    assert!(body_text(response)
        .await
        .contains("Too many requests, please try again later."));
}

#[tokio::test]
async fn store_failure_shows_detail_only_in_development() {
    let db = Database::disconnected();

    let response = get(&app_in(Environment::Development, &db), "/catalog/authors").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let page = body_text(response).await;
    assert!(page.contains("document store is not connected"));
    assert!(page.contains("<pre>"));

    let response = get(&app_in(Environment::Production, &db), "/catalog/authors").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_text(response).await.contains("<pre>"));
}

#[tokio::test]
async fn sqlite_store_keeps_records_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", dir.path().join("data").join("shelf.db").display());

    let db = Database::try_connect(&url).await.unwrap();
    let author = common::create_author(&app(&db), "Jane", "Austen").await;
    db.close().await;

    let reopened = Database::try_connect(&url).await.unwrap();
    let page = body_text(get(&app(&reopened), &author).await).await;
    assert!(page.contains("Austen, Jane"));
}
