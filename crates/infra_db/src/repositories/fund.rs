//! SQLite fund store
//!
//! Implements the `FundStore` port over the single-row `fund_ledger` table.
//! The ledger is created lazily on the first read; credits ride the billing
//! insert transaction in the billing store, never this repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_fund::{FundLedger, FundStore};

use crate::error::DatabaseError;
use crate::repositories::paise_to_money;

/// SQLite-backed implementation of the FundStore port
#[derive(Debug, Clone)]
pub struct SqliteFundStore {
    pool: SqlitePool,
}

impl SqliteFundStore {
    /// Creates a new repository over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DomainPort for SqliteFundStore {}

#[async_trait]
impl HealthCheckable for SqliteFundStore {
    /// Checks database connectivity with a trivial query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "sqlite-fund-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "sqlite-fund-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl FundStore for SqliteFundStore {
    #[instrument(skip(self))]
    async fn get_or_create(&self) -> Result<FundLedger, PortError> {
        debug!("Reading fund ledger");

        // OR IGNORE makes concurrent first reads converge on one row.
        sqlx::query("INSERT OR IGNORE INTO fund_ledger (ledger_id, total_paise, updated_at) VALUES (1, 0, ?)")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        let (total_paise, updated_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT total_paise, updated_at FROM fund_ledger WHERE ledger_id = 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(FundLedger {
            total: paise_to_money(total_paise),
            updated_at,
        })
    }
}
