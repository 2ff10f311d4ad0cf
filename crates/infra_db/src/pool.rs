//! Connection pool construction
//!
//! One pool per process, built from a [`DatabaseConfig`]. File databases are
//! created on first connect and switched to WAL so desk reads never block
//! billing writes; the schema itself arrives separately through the embedded
//! migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::DatabaseError;

/// The SQLite pool handed to every repository.
pub type DatabasePool = SqlitePool;

/// Pool settings; the builder covers the knobs the server exposes.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("sqlite://backoffice.db")
    }
}

/// Opens the pool described by `config`.
///
/// The database file is created if missing and runs in WAL mode, and writers
/// wait out short lock contention instead of failing. Foreign-key
/// enforcement stays at the driver default; the schema carries none.
///
/// # Errors
///
/// `DatabaseError::ConnectionFailed` when the URL does not parse or the
/// database cannot be opened.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// [`create_pool`] with default settings.
pub async fn create_pool_from_url(url: &str) -> Result<DatabasePool, DatabaseError> {
    create_pool(DatabaseConfig::new(url)).await
}
