use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use business_stats_api::app::{app, AppState};
use business_stats_api::auth::TokenValidator;
use business_stats_api::config::AppConfig;
use business_stats_api::database::{DatabaseManager, PgStatsRepository, StatsRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET_KEY
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Business Stats API in {:?} mode", config.environment);

    let database_url = config.database_url()?;
    if let Some(redacted) = config.redacted_database_url() {
        tracing::info!("Using database {}", redacted);
    }
    let pool = DatabaseManager::connect_lazy(&config.database, database_url)?;
    let repository: Arc<dyn StatsRepository> = Arc::new(PgStatsRepository::new(pool.clone(), &config.database));

    if config.security.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET_KEY is not set; every protected route will reject its credential");
    }
    let validator = TokenValidator::new(config.security.jwt_secret.as_deref());

    let state = AppState::new(repository, validator);
    let router = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Business Stats API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
