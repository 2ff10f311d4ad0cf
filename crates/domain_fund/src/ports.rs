//! Fund Domain Ports
//!
//! This module defines the port interface for reading the fund ledger.
//!
//! Credits never flow through this port: they ride inside the billing
//! store's insert transaction, which keeps the running total and the
//! billing records atomically consistent. The fund port only exposes the
//! read path, creating the ledger lazily at zero on first access.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, Money, PortError};

use crate::ledger::FundLedger;

/// Port for reading the fund ledger
#[async_trait]
pub trait FundStore: DomainPort + HealthCheckable {
    /// Returns the ledger, creating it at zero on the first read
    ///
    /// Idempotent under concurrent first reads: exactly one ledger row
    /// ever exists.
    async fn get_or_create(&self) -> Result<FundLedger, PortError>;
}

/// Extension trait for FundStore with convenience methods
#[async_trait]
pub trait FundStoreExt: FundStore {
    /// Returns just the running total
    async fn total(&self) -> Result<Money, PortError> {
        Ok(self.get_or_create().await?.total)
    }
}

// Blanket implementation for all FundStore implementors
impl<T: FundStore + ?Sized> FundStoreExt for T {}

/// Mock implementation of FundStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of FundStore
    #[derive(Debug, Default)]
    pub struct MockFundStore {
        ledger: Arc<RwLock<Option<FundLedger>>>,
    }

    impl MockFundStore {
        /// Creates a mock store with no ledger yet
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock store seeded with an existing total
        pub fn with_total(total: Money) -> Self {
            Self {
                ledger: Arc::new(RwLock::new(Some(FundLedger::with_total(total)))),
            }
        }

        /// Credits the mock ledger directly, creating it if absent
        pub async fn credit(&self, amount: Money) {
            let mut guard = self.ledger.write().await;
            let ledger = guard.get_or_insert_with(FundLedger::empty);
            ledger
                .credit(amount)
                .expect("mock credit must be a valid amount");
        }
    }

    impl DomainPort for MockFundStore {}

    #[async_trait]
    impl HealthCheckable for MockFundStore {
        async fn health_check(&self) -> core_kernel::HealthCheckResult {
            core_kernel::HealthCheckResult {
                adapter_id: "mock-fund-store".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl FundStore for MockFundStore {
        async fn get_or_create(&self) -> Result<FundLedger, PortError> {
            let mut guard = self.ledger.write().await;
            let ledger = guard.get_or_insert_with(FundLedger::empty);
            Ok(ledger.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockFundStore;
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_first_read_creates_zero_ledger() {
        let store = MockFundStore::new();
        let ledger = store.get_or_create().await.unwrap();
        assert!(ledger.total.is_zero());
    }

    #[tokio::test]
    async fn test_repeated_reads_return_same_ledger() {
        let store = MockFundStore::new();
        store.credit(Money::new(dec!(150), Currency::INR)).await;

        let first = store.get_or_create().await.unwrap();
        let second = store.get_or_create().await.unwrap();
        assert_eq!(first.total, second.total);
    }

    #[tokio::test]
    async fn test_total_convenience_reads_total() {
        let store = MockFundStore::with_total(Money::new(dec!(450), Currency::INR));
        let total = store.total().await.unwrap();
        assert_eq!(total, Money::new(dec!(450), Currency::INR));
    }
}
