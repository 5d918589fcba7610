//! Renders every [`ErrorReport`]-carrying response as the generic error page.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use maud::{html, Markup};

use crate::error::{AppError, ErrorReport};
use crate::layout;

/// Error page configuration shared with the middleware.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPages {
    pub show_detail: bool,
}

/// Middleware replacing error bodies with the HTML error page.
pub async fn render_error_pages(
    State(pages): State<ErrorPages>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    let markup = error_page(parts.status, &report, pages.show_detail);
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Response::from_parts(parts, Body::from(markup.into_string()))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::not_found("Not Found")
}

fn error_page(status: StatusCode, report: &ErrorReport, show_detail: bool) -> Markup {
    layout::page(
        "Error",
        html! {
            h1 { (report.message) }
            h2 { (status.as_u16()) }
            @if show_detail {
                pre { (report.detail) }
            }
            p.text-muted { "Reference: " (report.error_id.to_string()) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, response::IntoResponse, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(show_detail: bool) -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/boom",
                get(|| async {
                    AppError::Internal(anyhow::anyhow!("disk on fire").context("saving author"))
                        .into_response()
                }),
            )
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(
                ErrorPages { show_detail },
                render_error_pages,
            ))
    }

    async fn body(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let response = app(true).oneshot(request("/ok")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, "fine");
    }

    #[tokio::test]
    async fn unmatched_route_renders_404_page() {
        let response = app(false).oneshot(request("/nowhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let html = body(response).await;
        assert!(html.contains("<h1>Not Found</h1>"));
        assert!(html.contains("<h2>404</h2>"));
    }

    #[tokio::test]
    async fn detail_only_shown_when_enabled() {
        let response = app(true).oneshot(request("/boom")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body(response).await;
        assert!(html.contains("<h1>saving author</h1>"));
        assert!(html.contains("disk on fire"));

        let response = app(false).oneshot(request("/boom")).await.unwrap();
        let html = body(response).await;
        assert!(html.contains("<h1>saving author</h1>"));
        assert!(!html.contains("disk on fire"));
    }
}
