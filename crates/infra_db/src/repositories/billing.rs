//! SQLite billing store
//!
//! Implements the `BillingStore` port over the `billings` table. The insert
//! credits the fund ledger in the same transaction, so a durable record and
//! its ledger contribution commit or roll back together.
//!
//! `billings.student_id` carries no foreign key: records outlive deleted
//! students, and the listing join simply omits them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, BillingId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_billing::{BillSummary, BillingRecord, BillingStore, NewBillingRecord, PaymentStats};
use domain_student::RollNo;

use crate::error::DatabaseError;
use crate::repositories::money_to_paise;

/// SQLite-backed implementation of the BillingStore port
#[derive(Debug, Clone)]
pub struct SqliteBillingStore {
    pool: SqlitePool,
}

impl SqliteBillingStore {
    /// Creates a new repository over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Database row for a billing listing, joined with the student
#[derive(Debug, Clone, FromRow)]
struct BillSummaryRow {
    billing_id: String,
    student_name: String,
    roll_no: String,
    payment_mode: String,
    food_coupon: bool,
    artifact_url: Option<String>,
    created_at: DateTime<Utc>,
}

fn row_to_summary(row: BillSummaryRow) -> Result<BillSummary, DatabaseError> {
    let id = Uuid::parse_str(&row.billing_id)
        .map_err(|e| DatabaseError::bad_column("billing_id", e))?;
    let mode = row
        .payment_mode
        .parse()
        .map_err(|e| DatabaseError::bad_column("payment_mode", e))?;

    Ok(BillSummary {
        id: BillingId::from(id),
        student_name: row.student_name,
        roll_no: RollNo::new(row.roll_no),
        mode,
        food_coupon: row.food_coupon,
        artifact_url: row.artifact_url,
        payment_date: row.created_at,
    })
}

impl DomainPort for SqliteBillingStore {}

#[async_trait]
impl HealthCheckable for SqliteBillingStore {
    /// Checks database connectivity with a trivial query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "sqlite-billing-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "sqlite-billing-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl BillingStore for SqliteBillingStore {
    #[instrument(skip(self, input), fields(student_id = %input.student_id, mode = %input.mode))]
    async fn insert(&self, input: NewBillingRecord) -> Result<BillingRecord, PortError> {
        debug!("Inserting billing record");

        let record = BillingRecord::new(input);
        let amount_paise = money_to_paise(&record.amount)?;

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        sqlx::query(
            "INSERT INTO billings \
             (billing_id, student_id, payment_mode, transaction_id, screenshot_path, \
              food_coupon, amount_paise, phone, email, artifact_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.as_uuid().to_string())
        .bind(record.student_id.as_uuid().to_string())
        .bind(record.mode.as_str())
        .bind(&record.transaction_id)
        .bind(&record.screenshot_path)
        .bind(record.food_coupon)
        .bind(amount_paise)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(&record.artifact_url)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        sqlx::query(
            "INSERT INTO fund_ledger (ledger_id, total_paise, updated_at) \
             VALUES (1, ?, ?) \
             ON CONFLICT(ledger_id) DO UPDATE SET \
                 total_paise = total_paise + excluded.total_paise, \
                 updated_at = excluded.updated_at",
        )
        .bind(amount_paise)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(billing_id = %record.id, "Billing record committed");
        Ok(record)
    }

    #[instrument(skip(self), fields(billing_id = %id))]
    async fn attach_artifact(&self, id: BillingId, url: &str) -> Result<(), PortError> {
        debug!("Attaching receipt artifact");

        let result = sqlx::query("UPDATE billings SET artifact_url = ? WHERE billing_id = ?")
            .bind(url)
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("BillingRecord", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn payment_stats(&self) -> Result<PaymentStats, PortError> {
        let (total_online, total_cash, total_food_coupons) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                "SELECT \
                 COALESCE(SUM(CASE WHEN payment_mode = 'Online' THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN payment_mode = 'Cash' THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN food_coupon = 1 THEN 1 ELSE 0 END), 0) \
                 FROM billings",
            )
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(PaymentStats {
            total_online,
            total_cash,
            total_food_coupons,
        })
    }

    #[instrument(skip(self))]
    async fn list_with_students(&self) -> Result<Vec<BillSummary>, PortError> {
        debug!("Listing billing records with students");

        let rows = sqlx::query_as::<_, BillSummaryRow>(
            "SELECT b.billing_id, s.name AS student_name, s.roll_no, b.payment_mode, \
                    b.food_coupon, b.artifact_url, b.created_at \
             FROM billings b \
             INNER JOIN students s ON s.student_id = b.student_id \
             ORDER BY b.created_at DESC, b.billing_id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| row_to_summary(row).map_err(PortError::from))
            .collect()
    }
}
