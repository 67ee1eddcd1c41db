//! EcoImpact API server: loads settings from the environment, prepares the store, serves HTTP.

use ecoimpact_api::{app, ensure_database_exists, ensure_tables, AppConfig, AppState, Database};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ecoimpact_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.db.create_database {
        ensure_database_exists(&config.db.url).await?;
    }
    let db = Database::connect(&config.db).await?;
    if config.db.create_tables {
        ensure_tables(&db).await?;
    }

    let router = app(AppState::new(db.clone()), config.server.body_limit_bytes);
    let listener = TcpListener::bind(config.server.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
