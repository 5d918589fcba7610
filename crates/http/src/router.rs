//! Router builder for the Shelf HTTP server

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue},
    middleware, Router,
};
use tower_http::{
    compression::CompressionLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use shelf_kernel::settings::RateLimitSettings;

use crate::error_page::{self, ErrorPages};
use crate::rate_limit::{self, FixedWindowLimiter};
use crate::MakeRequestUuidV7;

/// Script origins the pages may load from, besides our own.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; base-uri 'self'; \
    font-src 'self' https: data:; form-action 'self'; frame-ancestors 'self'; \
    img-src 'self' data:; object-src 'none'; \
    script-src 'self' code.jquery.com cdn.jsdelivr.net; script-src-attr 'none'; \
    style-src 'self' https: 'unsafe-inline'; upgrade-insecure-requests";

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under its path; `/` merges into the root.
    pub fn mount_module(mut self, path: &str, module_router: Router) -> Self {
        self.router = if path == "/" {
            self.router.merge(module_router)
        } else {
            self.router.nest(path, module_router)
        };
        self
    }

    /// Answer a known path requested with an unrouted method with the 404
    /// page. Applies to the routes added so far.
    pub fn with_method_fallback(mut self) -> Self {
        self.router = self.router.method_not_allowed_fallback(error_page::not_found);
        self
    }

    /// Serve files from `dir` for any path no route matched, and the 404
    /// page when the file does not exist either
    pub fn with_static_files(mut self, dir: impl AsRef<Path>) -> Self {
        let files = ServeDir::new(dir).fallback(error_page::not_found.into_service());
        self.router = self.router.fallback_service(files);
        self
    }

    /// Add per-caller rate limiting
    pub fn with_rate_limit(mut self, settings: &RateLimitSettings) -> Self {
        let limiter = Arc::new(FixedWindowLimiter::new(
            settings.max_requests,
            Duration::from_secs(settings.window_secs),
        ));
        self.router = self.router.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::limit_requests,
        ));
        self
    }

    /// Render error responses as the HTML error page
    pub fn with_error_pages(mut self, show_detail: bool) -> Self {
        self.router = self.router.layer(middleware::from_fn_with_state(
            ErrorPages { show_detail },
            error_page::render_error_pages,
        ));
        self
    }

    /// Add baseline security response headers
    pub fn with_security_headers(mut self) -> Self {
        self.router = self
            .router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ));
        self
    }

    /// Add gzip response compression
    pub fn with_compression(mut self) -> Self {
        self.router = self.router.layer(CompressionLayer::new());
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn request(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_module_mounting() {
        let module_router = Router::new().route("/", get(|| async { "module" }));
        let root_router = Router::new().route("/", get(|| async { "root" }));

        let router = RouterBuilder::new()
            .mount_module("/", root_router)
            .mount_module("/things", module_router)
            .build();

        let response = router.clone().oneshot(request("/things")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = router.oneshot(request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_chain() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_rate_limit(&RateLimitSettings {
                max_requests: 1,
                window_secs: 60,
            })
            .with_error_pages(false)
            .with_security_headers()
            .with_compression()
            .with_tracing()
            .with_request_id()
            .build();

        let response = router.clone().oneshot(request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert!(response.headers()[header::CONTENT_SECURITY_POLICY]
            .to_str()
            .unwrap()
            .contains("script-src 'self' code.jquery.com cdn.jsdelivr.net"));

        let response = router.oneshot(request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_unrouted_method_gets_404_page() {
        let module_router = Router::new().route("/things", get(|| async { "things" }));
        let router = RouterBuilder::new()
            .mount_module("/catalog", module_router)
            .with_method_fallback()
            .with_error_pages(false)
            .build();

        let request = Request::builder()
            .method("POST")
            .uri("/catalog/things")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_static_files_fall_back_to_404() {
        let dir = std::env::temp_dir().join(format!("shelf-static-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("robots.txt"), "User-agent: *").unwrap();

        let router = RouterBuilder::new()
            .with_static_files(&dir)
            .with_error_pages(false)
            .build();

        let response = router.clone().oneshot(request("/robots.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(request("/missing.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");

        std::fs::remove_dir_all(&dir).ok();
    }
}
