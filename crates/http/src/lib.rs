//! HTTP server facade for Shelf: Axum router assembly, middleware, error
//! pages, and the server loop.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, response::Html, routing::get, Router};
use maud::Markup;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use shelf_kernel::settings::Settings;
use shelf_kernel::ModuleRegistry;

pub mod error;
pub mod error_page;
pub mod form;
pub mod layout;
pub mod rate_limit;
pub mod response;
pub mod router;

pub use error::{AppError, AppResult};
pub use form::Form;
use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
/// Returns once a shutdown signal has been received and in-flight requests
/// have drained.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, settings);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted and the global
/// middleware stack applied
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            module.mount_path()
        );
        router_builder = router_builder.mount_module(module.mount_path(), module.routes());
    }

    router_builder
        .with_method_fallback()
        .with_static_files(&settings.server.static_dir)
        .with_rate_limit(&settings.server.rate_limit)
        .with_error_pages(settings.environment.shows_error_detail())
        .with_security_headers()
        .with_compression()
        .with_tracing()
        .with_request_id()
        .build()
}

/// Render a maud document as an HTML response.
pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Request ID generator for tracing
#[derive(Clone)]
pub(crate) struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}
