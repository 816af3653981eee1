//! # DraftForge API Server
//!
//! Entry point for the DraftForge document-authoring backend.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/draftforge cargo run -p draftforge-api
//! ```

use draftforge_api::{
    app::{build_router, AppState},
    config::Config,
    generate::GeminiGenerator,
};
use draftforge_shared::db::{migrations::run_migrations, pool};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftforge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "DraftForge API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    std::fs::create_dir_all(&config.export.dir)?;

    let generator = Arc::new(GeminiGenerator::new(&config.ai));

    let bind_address = config.bind_address();
    let state = AppState::new(db, config, generator);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
