//! Billing Domain Ports
//!
//! This module defines the four collaborator interfaces the billing
//! orchestration depends on:
//!
//! - **`BillingStore`**: persists billing records and the fund ledger
//! - **`ReceiptRenderer`**: renders a receipt artifact to a local file
//! - **`ArtifactStore`**: uploads the artifact and returns its public URL
//! - **`ReceiptNotifier`**: delivers the receipt link to the student
//!
//! All failures are reported uniformly as `PortError`. Concrete adapters live
//! in `crate::adapters`; in-memory mocks with failure-injection switches are
//! available under `cfg(any(test, feature = "mock"))`.

use async_trait::async_trait;

use core_kernel::{BillingId, DomainPort, HealthCheckable, PortError};

use crate::receipt::{ReceiptData, RenderedReceipt};
use crate::record::{BillSummary, BillingRecord, NewBillingRecord, PaymentStats};

/// Port for persisting billing records
#[async_trait]
pub trait BillingStore: DomainPort + HealthCheckable {
    /// Inserts a billing record and credits the fund ledger by its amount
    ///
    /// Both writes happen in one storage transaction: when this method
    /// returns Ok, the record is durable and the ledger already reflects it.
    ///
    /// # Arguments
    ///
    /// * `input` - The record to insert; its artifact reference starts empty
    async fn insert(&self, input: NewBillingRecord) -> Result<BillingRecord, PortError>;

    /// Attaches the uploaded artifact reference to a record
    ///
    /// This is the record's second and final write.
    ///
    /// # Arguments
    ///
    /// * `id` - The billing record identifier
    /// * `url` - The public artifact reference
    ///
    /// # Returns
    ///
    /// `PortError::NotFound` if the identifier is unknown
    async fn attach_artifact(&self, id: BillingId, url: &str) -> Result<(), PortError>;

    /// Returns counts of records by payment mode and food coupon
    async fn payment_stats(&self) -> Result<PaymentStats, PortError>;

    /// Returns every record joined with its student, newest first
    async fn list_with_students(&self) -> Result<Vec<BillSummary>, PortError>;
}

/// Port for rendering receipt artifacts
#[async_trait]
pub trait ReceiptRenderer: DomainPort + HealthCheckable {
    /// Renders a receipt to a local temp file
    ///
    /// The returned path is owned by the caller, who removes it after the
    /// upload attempt. Adapters impose their own bounded timeout; a timeout
    /// surfaces like any other render failure.
    async fn render(&self, data: &ReceiptData) -> Result<RenderedReceipt, PortError>;
}

/// Port for storing rendered artifacts publicly
#[async_trait]
pub trait ArtifactStore: DomainPort + HealthCheckable {
    /// Uploads a rendered receipt and returns its public URL
    ///
    /// The local file is left in place; the caller guarantees its removal
    /// whether the upload succeeds or fails.
    async fn upload(&self, receipt: &RenderedReceipt) -> Result<String, PortError>;
}

/// Port for delivering receipts to students
#[async_trait]
pub trait ReceiptNotifier: DomainPort + HealthCheckable {
    /// Sends the receipt link to the given address
    ///
    /// Fire-and-forget from the orchestrator's perspective: a failure is
    /// reported to the caller but never retried here.
    async fn send(&self, email: &str, artifact_url: &str) -> Result<(), PortError>;
}

/// Mock implementations of the billing ports for testing
///
/// Every mock records its calls and exposes a `set_failing` switch so tests
/// can drive the partial-failure paths of the orchestration.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use core_kernel::{AdapterHealth, Currency, HealthCheckResult, Money, StudentId};
    use domain_student::{RollNo, Student};

    fn healthy(adapter_id: &str) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("Mock adapter always healthy".to_string()),
            checked_at: Utc::now(),
        }
    }

    /// In-memory mock implementation of BillingStore
    ///
    /// Mirrors the real adapter's transactional contract: a successful insert
    /// also credits the internal ledger total.
    #[derive(Debug)]
    pub struct MockBillingStore {
        records: Arc<RwLock<HashMap<BillingId, BillingRecord>>>,
        students: Arc<RwLock<HashMap<StudentId, (String, RollNo)>>>,
        ledger_total: Arc<RwLock<Money>>,
        fail_inserts: Arc<AtomicBool>,
        fail_attach: Arc<AtomicBool>,
    }

    impl Default for MockBillingStore {
        fn default() -> Self {
            Self {
                records: Arc::new(RwLock::new(HashMap::new())),
                students: Arc::new(RwLock::new(HashMap::new())),
                ledger_total: Arc::new(RwLock::new(Money::zero(Currency::INR))),
                fail_inserts: Arc::new(AtomicBool::new(false)),
                fail_attach: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl MockBillingStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a student for the list join
        pub async fn register_student(&self, student: &Student) {
            self.students.write().await.insert(
                student.id,
                (student.name.clone(), student.roll_no.clone()),
            );
        }

        /// Makes subsequent inserts fail
        pub fn set_failing_inserts(&self, failing: bool) {
            self.fail_inserts.store(failing, Ordering::Relaxed);
        }

        /// Makes subsequent artifact attaches fail
        pub fn set_failing_attach(&self, failing: bool) {
            self.fail_attach.store(failing, Ordering::Relaxed);
        }

        /// Returns the stored record, if any
        pub async fn get(&self, id: BillingId) -> Option<BillingRecord> {
            self.records.read().await.get(&id).cloned()
        }

        /// Returns the number of stored records
        pub async fn len(&self) -> usize {
            self.records.read().await.len()
        }

        /// Returns true if no records are stored
        pub async fn is_empty(&self) -> bool {
            self.records.read().await.is_empty()
        }

        /// Returns the internal ledger total
        pub async fn ledger_total(&self) -> Money {
            *self.ledger_total.read().await
        }
    }

    impl DomainPort for MockBillingStore {}

    #[async_trait]
    impl HealthCheckable for MockBillingStore {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-billing-store")
        }
    }

    #[async_trait]
    impl BillingStore for MockBillingStore {
        async fn insert(&self, input: NewBillingRecord) -> Result<BillingRecord, PortError> {
            if self.fail_inserts.load(Ordering::Relaxed) {
                return Err(PortError::connection("Simulated insert failure"));
            }

            let mut records = self.records.write().await;
            let mut total = self.ledger_total.write().await;

            let record = BillingRecord::new(input);
            *total = total
                .checked_add(&record.amount)
                .map_err(|e| PortError::internal(e.to_string()))?;
            records.insert(record.id, record.clone());
            Ok(record)
        }

        async fn attach_artifact(&self, id: BillingId, url: &str) -> Result<(), PortError> {
            if self.fail_attach.load(Ordering::Relaxed) {
                return Err(PortError::connection("Simulated attach failure"));
            }

            let mut records = self.records.write().await;
            let record = records
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("BillingRecord", id))?;
            record.attach_artifact(url);
            Ok(())
        }

        async fn payment_stats(&self) -> Result<PaymentStats, PortError> {
            let records = self.records.read().await;
            let mut stats = PaymentStats::default();
            for record in records.values() {
                match record.mode {
                    crate::record::PaymentMode::Online => stats.total_online += 1,
                    crate::record::PaymentMode::Cash => stats.total_cash += 1,
                }
                if record.food_coupon {
                    stats.total_food_coupons += 1;
                }
            }
            Ok(stats)
        }

        async fn list_with_students(&self) -> Result<Vec<BillSummary>, PortError> {
            let records = self.records.read().await;
            let students = self.students.read().await;

            let mut summaries: Vec<BillSummary> = records
                .values()
                .filter_map(|record| {
                    let (name, roll_no) = students.get(&record.student_id)?;
                    Some(BillSummary {
                        id: record.id,
                        student_name: name.clone(),
                        roll_no: roll_no.clone(),
                        mode: record.mode,
                        food_coupon: record.food_coupon,
                        artifact_url: record.artifact_url.clone(),
                        payment_date: record.created_at,
                    })
                })
                .collect();
            summaries.sort_by(|a, b| {
                b.payment_date
                    .cmp(&a.payment_date)
                    .then_with(|| b.id.as_uuid().cmp(&a.id.as_uuid()))
            });
            Ok(summaries)
        }
    }

    /// Mock renderer writing plain-text receipts to the system temp dir
    ///
    /// The written file carries the student name, roll number, and amount so
    /// artifact-content assertions hold against it too.
    #[derive(Debug)]
    pub struct MockReceiptRenderer {
        dir: PathBuf,
        rendered: Arc<RwLock<Vec<ReceiptData>>>,
        paths: Arc<RwLock<Vec<PathBuf>>>,
        fail: Arc<AtomicBool>,
    }

    impl Default for MockReceiptRenderer {
        fn default() -> Self {
            Self {
                dir: std::env::temp_dir(),
                rendered: Arc::new(RwLock::new(Vec::new())),
                paths: Arc::new(RwLock::new(Vec::new())),
                fail: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl MockReceiptRenderer {
        /// Creates a new mock renderer
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes subsequent renders fail
        pub fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::Relaxed);
        }

        /// Returns how many receipts were rendered
        pub async fn render_count(&self) -> usize {
            self.rendered.read().await.len()
        }

        /// Returns every path this renderer has written
        ///
        /// Cleanup tests check these no longer exist after billing.
        pub async fn written_paths(&self) -> Vec<PathBuf> {
            self.paths.read().await.clone()
        }
    }

    impl DomainPort for MockReceiptRenderer {}

    #[async_trait]
    impl HealthCheckable for MockReceiptRenderer {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-receipt-renderer")
        }
    }

    #[async_trait]
    impl ReceiptRenderer for MockReceiptRenderer {
        async fn render(&self, data: &ReceiptData) -> Result<RenderedReceipt, PortError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(PortError::internal("Simulated render failure"));
            }

            // Unique path per call; parallel tests may render the same roll.
            let path = self.dir.join(format!("receipt-{}.txt", Uuid::new_v4()));
            let contents = format!(
                "RECEIPT\nName: {}\nRoll No: {}\nAmount: {}\n",
                data.student_name,
                data.roll_no,
                data.amount_label()
            );
            tokio::fs::write(&path, contents)
                .await
                .map_err(|e| PortError::internal(format!("Temp write failed: {}", e)))?;

            self.rendered.write().await.push(data.clone());
            self.paths.write().await.push(path.clone());
            Ok(RenderedReceipt {
                path,
                object_name: format!("{}.txt", data.object_stem()),
            })
        }
    }

    /// Mock artifact store returning deterministic URLs
    #[derive(Debug, Default)]
    pub struct MockArtifactStore {
        uploads: Arc<RwLock<Vec<String>>>,
        fail: Arc<AtomicBool>,
    }

    impl MockArtifactStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes subsequent uploads fail
        pub fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::Relaxed);
        }

        /// Returns the object names uploaded so far
        pub async fn uploaded(&self) -> Vec<String> {
            self.uploads.read().await.clone()
        }
    }

    impl DomainPort for MockArtifactStore {}

    #[async_trait]
    impl HealthCheckable for MockArtifactStore {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-artifact-store")
        }
    }

    #[async_trait]
    impl ArtifactStore for MockArtifactStore {
        async fn upload(&self, receipt: &RenderedReceipt) -> Result<String, PortError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-artifact-store".to_string(),
                });
            }

            // Read the file like a real store would; a missing temp artifact
            // is a caller bug worth surfacing.
            tokio::fs::read(&receipt.path)
                .await
                .map_err(|e| PortError::internal(format!("Artifact read failed: {}", e)))?;

            self.uploads.write().await.push(receipt.object_name.clone());
            Ok(format!("https://files.test/{}", receipt.object_name))
        }
    }

    /// Mock notifier recording every send
    #[derive(Debug, Default)]
    pub struct MockReceiptNotifier {
        sent: Arc<RwLock<Vec<(String, String)>>>,
        fail: Arc<AtomicBool>,
    }

    impl MockReceiptNotifier {
        /// Creates a new mock notifier
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes subsequent sends fail
        pub fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::Relaxed);
        }

        /// Returns the (email, artifact_url) pairs sent so far
        pub async fn sent(&self) -> Vec<(String, String)> {
            self.sent.read().await.clone()
        }
    }

    impl DomainPort for MockReceiptNotifier {}

    #[async_trait]
    impl HealthCheckable for MockReceiptNotifier {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-receipt-notifier")
        }
    }

    #[async_trait]
    impl ReceiptNotifier for MockReceiptNotifier {
        async fn send(&self, email: &str, artifact_url: &str) -> Result<(), PortError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(PortError::connection("Simulated notify failure"));
            }
            self.sent
                .write()
                .await
                .push((email.to_string(), artifact_url.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use crate::record::PaymentMode;
    use crate::tariff;
    use core_kernel::{Currency, Money, StudentId};
    use domain_student::{NewStudent, RollNo, Section, Student, Year};
    use rust_decimal_macros::dec;

    fn new_record(student_id: StudentId, mode: PaymentMode, food_coupon: bool) -> NewBillingRecord {
        NewBillingRecord {
            student_id,
            mode,
            transaction_id: None,
            screenshot_path: None,
            food_coupon,
            amount: tariff::registration_fee(food_coupon),
            phone: "9876543210".to_string(),
            email: "student@example.com".to_string(),
        }
    }

    fn student(roll: &str, name: &str) -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new(roll),
            name: name.to_string(),
            year: Year::Third,
            section: Section::B,
        })
    }

    #[tokio::test]
    async fn test_insert_credits_ledger() {
        let store = MockBillingStore::new();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Cash, false))
            .await
            .unwrap();

        assert_eq!(
            store.ledger_total().await,
            Money::new(dec!(150), Currency::INR)
        );
    }

    #[tokio::test]
    async fn test_insert_sequence_accumulates_ledger() {
        let store = MockBillingStore::new();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Cash, false))
            .await
            .unwrap();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Online, true))
            .await
            .unwrap();

        assert_eq!(
            store.ledger_total().await,
            Money::new(dec!(450), Currency::INR)
        );
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_ledger_unchanged() {
        let store = MockBillingStore::new();
        store.set_failing_inserts(true);

        let result = store
            .insert(new_record(StudentId::new(), PaymentMode::Cash, false))
            .await;

        assert!(result.is_err());
        assert!(store.is_empty().await);
        assert!(store.ledger_total().await.is_zero());
    }

    #[tokio::test]
    async fn test_attach_artifact_updates_record() {
        let store = MockBillingStore::new();
        let record = store
            .insert(new_record(StudentId::new(), PaymentMode::Online, false))
            .await
            .unwrap();

        store
            .attach_artifact(record.id, "https://files.test/bill.pdf")
            .await
            .unwrap();

        let stored = store.get(record.id).await.unwrap();
        assert_eq!(
            stored.artifact_url.as_deref(),
            Some("https://files.test/bill.pdf")
        );
    }

    #[tokio::test]
    async fn test_attach_artifact_unknown_id_not_found() {
        let store = MockBillingStore::new();
        let result = store
            .attach_artifact(core_kernel::BillingId::new(), "https://files.test/x.pdf")
            .await;
        assert!(matches!(result, Err(PortError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_payment_stats_counts_modes_and_coupons() {
        let store = MockBillingStore::new();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Online, true))
            .await
            .unwrap();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Online, false))
            .await
            .unwrap();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Cash, false))
            .await
            .unwrap();

        let stats = store.payment_stats().await.unwrap();
        assert_eq!(stats.total_online, 2);
        assert_eq!(stats.total_cash, 1);
        assert_eq!(stats.total_food_coupons, 1);
    }

    #[tokio::test]
    async fn test_list_with_students_newest_first() {
        let store = MockBillingStore::new();
        let first = student("CS101", "Asha Verma");
        let second = student("CS102", "Rohan Gupta");
        store.register_student(&first).await;
        store.register_student(&second).await;

        store
            .insert(new_record(first.id, PaymentMode::Cash, false))
            .await
            .unwrap();
        store
            .insert(new_record(second.id, PaymentMode::Online, true))
            .await
            .unwrap();

        let bills = store.list_with_students().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].roll_no, RollNo::new("CS102"));
        assert_eq!(bills[1].roll_no, RollNo::new("CS101"));
    }

    #[tokio::test]
    async fn test_list_skips_records_without_student() {
        let store = MockBillingStore::new();
        store
            .insert(new_record(StudentId::new(), PaymentMode::Cash, false))
            .await
            .unwrap();

        let bills = store.list_with_students().await.unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn test_renderer_writes_artifact_with_receipt_fields() {
        let renderer = MockReceiptRenderer::new();
        let owner = student("CS101", "Asha Verma");
        let record = crate::record::BillingRecord::new(new_record(
            owner.id,
            PaymentMode::Cash,
            false,
        ));
        let data = crate::receipt::ReceiptData::from_parts(&record, &owner);

        let rendered = renderer.render(&data).await.unwrap();
        let contents = tokio::fs::read_to_string(&rendered.path).await.unwrap();

        assert!(contents.contains("Asha Verma"));
        assert!(contents.contains("CS101"));
        assert!(contents.contains("150.00"));
        assert_eq!(renderer.render_count().await, 1);

        tokio::fs::remove_file(&rendered.path).await.unwrap();
    }

    #[tokio::test]
    async fn test_renderer_failure_injection() {
        let renderer = MockReceiptRenderer::new();
        renderer.set_failing(true);

        let owner = student("CS101", "Asha Verma");
        let record =
            crate::record::BillingRecord::new(new_record(owner.id, PaymentMode::Cash, false));
        let data = crate::receipt::ReceiptData::from_parts(&record, &owner);

        assert!(renderer.render(&data).await.is_err());
        assert_eq!(renderer.render_count().await, 0);
    }

    #[tokio::test]
    async fn test_upload_returns_url_and_records_object() {
        let renderer = MockReceiptRenderer::new();
        let artifacts = MockArtifactStore::new();

        let owner = student("CS101", "Asha Verma");
        let record =
            crate::record::BillingRecord::new(new_record(owner.id, PaymentMode::Cash, false));
        let data = crate::receipt::ReceiptData::from_parts(&record, &owner);
        let rendered = renderer.render(&data).await.unwrap();

        let url = artifacts.upload(&rendered).await.unwrap();
        assert!(url.starts_with("https://files.test/bill-CS101-"));
        assert_eq!(artifacts.uploaded().await.len(), 1);

        tokio::fs::remove_file(&rendered.path).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_missing_file_fails() {
        let artifacts = MockArtifactStore::new();
        let rendered = RenderedReceipt {
            path: std::env::temp_dir().join("does-not-exist-4821.txt"),
            object_name: "bill-CS101-0.txt".to_string(),
        };

        assert!(artifacts.upload(&rendered).await.is_err());
        assert!(artifacts.uploaded().await.is_empty());
    }

    #[tokio::test]
    async fn test_notifier_records_sends() {
        let notifier = MockReceiptNotifier::new();
        notifier
            .send("asha@example.com", "https://files.test/bill.pdf")
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "asha@example.com");
    }

    #[tokio::test]
    async fn test_notifier_failure_injection() {
        let notifier = MockReceiptNotifier::new();
        notifier.set_failing(true);

        let result = notifier
            .send("asha@example.com", "https://files.test/bill.pdf")
            .await;
        assert!(result.is_err());
        assert!(notifier.sent().await.is_empty());
    }
}
