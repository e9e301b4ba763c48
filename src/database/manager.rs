use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors surfaced by the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Query failed: {0}")]
    StorageQueryFailed(String),

    #[error("Invalid database configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Configuration(cause) = &err {
            return DatabaseError::InvalidConfiguration(cause.to_string());
        }
        if is_connectivity_error(&err) {
            DatabaseError::StorageUnavailable(err.to_string())
        } else {
            DatabaseError::StorageQueryFailed(err.to_string())
        }
    }
}

/// Failures reaching the server, as opposed to the server rejecting a query
fn is_connectivity_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        // SQLSTATE class 08 (connection exception) and 57P (operator intervention)
        sqlx::Error::Database(db) => db
            .code()
            .map_or(false, |code| code.starts_with("08") || code.starts_with("57P")),
        _ => false,
    }
}

/// Builds the connection pool shared by all request handlers
pub struct DatabaseManager;

impl DatabaseManager {
    /// Creates a lazily connecting pool: an unreachable database surfaces as
    /// `StorageUnavailable` per request instead of aborting start-up.
    pub fn connect_lazy(config: &DatabaseConfig, database_url: &str) -> Result<PgPool, DatabaseError> {
        let statement_timeout_ms = config.statement_timeout_ms;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if statement_timeout_ms > 0 {
                        let statement = format!("SET statement_timeout = {}", statement_timeout_ms);
                        sqlx::query(&statement).execute(conn).await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy(database_url)?;

        info!(
            "Database pool configured (max_connections={}, acquire_timeout={}s, statement_timeout={}ms)",
            config.max_connections, config.connection_timeout, statement_timeout_ms
        );
        Ok(pool)
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
