//! Database module - MySQL implementations using SQLx

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use sf_core::errors::{DomainError, DomainResult};
use sf_shared::DatabaseConfig;

pub mod mysql;

/// Open a MySQL connection pool from the database configuration.
pub async fn create_pool(config: &DatabaseConfig) -> DomainResult<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::unavailable(format!("failed to connect to MySQL: {e}")))?;

    info!(
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(pool)
}
