//! Database Test Utilities
//!
//! Provides in-memory SQLite databases with the schema applied, plus small
//! helpers shared by repository and end-to-end tests.
//!
//! Every database lives on a single pooled connection: `sqlite::memory:`
//! gives each connection its own database, so the pool is pinned to one
//! connection and idle reaping is disabled to keep the data alive for the
//! whole test.

use once_cell::sync::Lazy;
use sqlx::sqlite::SqlitePoolOptions;

use infra_db::DatabasePool;

/// Opens a fresh in-memory database with migrations applied
///
/// # Panics
///
/// Panics if the pool cannot be opened or migrations fail; tests cannot
/// proceed without a schema.
pub async fn memory_pool() -> DatabasePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    infra_db::MIGRATOR
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// A fresh test database with the schema applied
pub struct TestDatabase {
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Creates a new isolated test database
    pub async fn new() -> Self {
        Self {
            pool: memory_pool().await,
        }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Clears all data from the database while preserving the schema
    ///
    /// Useful for resetting state between steps of a scenario test
    pub async fn clear_data(&self) -> Result<(), sqlx::Error> {
        for table in ["billings", "fund_ledger", "students"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    // Opt in with TEST_LOG=1; quiet by default so failures stay readable.
    if std::env::var("TEST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .init();
    }
});

/// Installs the test tracing subscriber once per test binary
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}

/// Helper macro for running database tests
///
/// The body is a closure receiving the pool:
///
/// ```ignore
/// db_test!(inserts_a_row, |pool| async move {
///     sqlx::query("...").execute(&pool).await.unwrap();
/// });
/// ```
#[macro_export]
macro_rules! db_test {
    ($name:ident, $body:expr) => {
        #[tokio::test]
        async fn $name() {
            $crate::database::init_test_tracing();
            let db = $crate::database::TestDatabase::new().await;
            let body = $body;
            body(db.pool().clone()).await;
        }
    };
}

/// Helper trait for test assertions on database results
pub trait DatabaseTestAssertions {
    /// Asserts that a specific number of rows were affected
    fn assert_rows_affected(&self, expected: u64);
}

impl DatabaseTestAssertions for sqlx::sqlite::SqliteQueryResult {
    fn assert_rows_affected(&self, expected: u64) {
        assert_eq!(
            self.rows_affected(),
            expected,
            "Expected {} rows affected, got {}",
            expected,
            self.rows_affected()
        );
    }
}
