use anyhow::Context;
use shelf_db::Database;
use shelf_kernel::{InitCtx, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load Shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "shelf-app bootstrap starting"
    );

    let db = Database::connect(&settings.database.url).await;
    let registry = shelf_app::build_registry(&db);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!(modules = registry.module_count(), "shelf-app bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings).await;

    if let Err(err) = registry.stop_modules().await {
        tracing::error!(error = ?err, "failed to stop modules");
    }
    db.close().await;

    served
}
