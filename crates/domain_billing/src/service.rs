//! Billing orchestration
//!
//! `BillingService` drives one registration payment end to end: resolve the
//! student, derive the amount, persist the record (which also credits the
//! fund ledger), render the receipt, upload it, and email the link.
//!
//! The steps are strictly sequential. The billing insert is the durability
//! point: once it commits, the billing event has happened regardless of what
//! fails afterwards. Rendering and upload failures surface as errors while
//! leaving the persisted record intact; a notification failure is only a
//! warning on the outcome.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use core_kernel::{BillingId, Money};
use domain_student::{RollNo, StudentDirectory};

use crate::error::BillingError;
use crate::ports::{ArtifactStore, BillingStore, ReceiptNotifier, ReceiptRenderer};
use crate::receipt::ReceiptData;
use crate::record::{BillSummary, NewBillingRecord, PaymentMode, PaymentStats};
use crate::tariff;

/// Input for billing one student
///
/// Phone and email are carried verbatim; a transaction id is optional even
/// for online payments.
#[derive(Debug, Clone)]
pub struct BillRequest {
    /// Roll number of the student to bill
    pub roll_no: RollNo,
    /// How the fee was paid
    pub mode: PaymentMode,
    /// Transaction id, if one was reported
    pub transaction_id: Option<String>,
    /// Server-local path of the uploaded payment screenshot, if any
    pub screenshot_path: Option<String>,
    /// Whether a food coupon was bought
    pub food_coupon: bool,
    /// Contact phone
    pub phone: String,
    /// Contact email the receipt is sent to
    pub email: String,
}

/// Whether the receipt email was handed to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The notifier accepted the message
    Delivered,
    /// The notifier failed; billing itself still succeeded
    Failed(String),
}

impl NotificationStatus {
    /// Returns true if the notification was delivered
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationStatus::Delivered)
    }

    /// Returns the warning text for a failed notification
    pub fn warning(&self) -> Option<&str> {
        match self {
            NotificationStatus::Delivered => None,
            NotificationStatus::Failed(reason) => Some(reason),
        }
    }
}

/// Result of a completed billing
#[derive(Debug, Clone)]
pub struct BillingOutcome {
    /// Identifier of the persisted record
    pub billing_id: BillingId,
    /// Amount charged
    pub amount: Money,
    /// Public reference of the uploaded receipt
    pub artifact_url: String,
    /// Delivery status of the receipt email
    pub notification: NotificationStatus,
}

/// Orchestrates the billing sequence over its five collaborators
pub struct BillingService {
    students: Arc<dyn StudentDirectory>,
    store: Arc<dyn BillingStore>,
    renderer: Arc<dyn ReceiptRenderer>,
    artifacts: Arc<dyn ArtifactStore>,
    notifier: Arc<dyn ReceiptNotifier>,
}

impl BillingService {
    /// Creates a new billing service
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        store: Arc<dyn BillingStore>,
        renderer: Arc<dyn ReceiptRenderer>,
        artifacts: Arc<dyn ArtifactStore>,
        notifier: Arc<dyn ReceiptNotifier>,
    ) -> Self {
        Self {
            students,
            store,
            renderer,
            artifacts,
            notifier,
        }
    }

    /// Bills a student and delivers the receipt
    ///
    /// # Errors
    ///
    /// - `StudentNotFound` before any side effect
    /// - `StorageFailure` if the insert or artifact attach fails
    /// - `RenderFailure` / `UploadFailure` after the record is durable; the
    ///   record stays persisted with an empty artifact reference
    ///
    /// A notification failure is not an error; it is returned as a warning on
    /// the outcome.
    #[instrument(skip(self, request), fields(roll_no = %request.roll_no))]
    pub async fn bill_student(&self, request: BillRequest) -> Result<BillingOutcome, BillingError> {
        info!(
            mode = %request.mode,
            food_coupon = request.food_coupon,
            "Billing request received"
        );

        let student = self
            .students
            .find_by_roll(&request.roll_no)
            .await
            .map_err(BillingError::StorageFailure)?
            .ok_or_else(|| {
                warn!("Billing requested for unknown roll number");
                BillingError::student_not_found(request.roll_no.as_str())
            })?;

        let amount = tariff::registration_fee(request.food_coupon);

        let record = self
            .store
            .insert(NewBillingRecord {
                student_id: student.id,
                mode: request.mode,
                transaction_id: request.transaction_id,
                screenshot_path: request.screenshot_path,
                food_coupon: request.food_coupon,
                amount,
                phone: request.phone,
                email: request.email,
            })
            .await
            .map_err(|e| {
                error!(amount = %amount, error = %e, "Billing insert failed");
                BillingError::StorageFailure(e)
            })?;
        info!(billing_id = %record.id, amount = %record.amount, "Billing record persisted");

        let data = ReceiptData::from_parts(&record, &student);
        let rendered = self.renderer.render(&data).await.map_err(|e| {
            error!(
                billing_id = %record.id,
                amount = %record.amount,
                error = %e,
                "Receipt rendering failed"
            );
            BillingError::RenderFailure(e)
        })?;

        // The temp artifact goes away whether the upload worked or not.
        let upload_result = self.artifacts.upload(&rendered).await;
        remove_temp_artifact(&rendered.path).await;
        let artifact_url = upload_result.map_err(|e| {
            error!(
                billing_id = %record.id,
                amount = %record.amount,
                error = %e,
                "Artifact upload failed"
            );
            BillingError::UploadFailure(e)
        })?;

        self.store
            .attach_artifact(record.id, &artifact_url)
            .await
            .map_err(|e| {
                error!(
                    billing_id = %record.id,
                    amount = %record.amount,
                    error = %e,
                    "Artifact attach failed"
                );
                BillingError::StorageFailure(e)
            })?;

        let notification = match self.notifier.send(&record.email, &artifact_url).await {
            Ok(()) => NotificationStatus::Delivered,
            Err(e) => {
                warn!(
                    billing_id = %record.id,
                    amount = %record.amount,
                    error = %e,
                    "Receipt notification failed"
                );
                NotificationStatus::Failed(e.to_string())
            }
        };

        Ok(BillingOutcome {
            billing_id: record.id,
            amount: record.amount,
            artifact_url,
            notification,
        })
    }

    /// Returns counts of records by payment mode and food coupon
    pub async fn payment_stats(&self) -> Result<PaymentStats, BillingError> {
        self.store
            .payment_stats()
            .await
            .map_err(BillingError::StorageFailure)
    }

    /// Returns every billing record joined with its student, newest first
    pub async fn all_bills(&self) -> Result<Vec<BillSummary>, BillingError> {
        self.store
            .list_with_students()
            .await
            .map_err(BillingError::StorageFailure)
    }
}

async fn remove_temp_artifact(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Temp artifact removal failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{
        MockArtifactStore, MockBillingStore, MockReceiptNotifier, MockReceiptRenderer,
    };
    use core_kernel::Currency;
    use domain_student::{MockStudentDirectory, NewStudent, Section, Student, Year};
    use rust_decimal_macros::dec;

    struct Harness {
        students: Arc<MockStudentDirectory>,
        store: Arc<MockBillingStore>,
        renderer: Arc<MockReceiptRenderer>,
        artifacts: Arc<MockArtifactStore>,
        notifier: Arc<MockReceiptNotifier>,
        service: BillingService,
    }

    async fn harness_with(students: Vec<Student>) -> Harness {
        let store = Arc::new(MockBillingStore::new());
        for student in &students {
            store.register_student(student).await;
        }
        let students = Arc::new(MockStudentDirectory::with_students(students).await);
        let renderer = Arc::new(MockReceiptRenderer::new());
        let artifacts = Arc::new(MockArtifactStore::new());
        let notifier = Arc::new(MockReceiptNotifier::new());

        let service = BillingService::new(
            students.clone(),
            store.clone(),
            renderer.clone(),
            artifacts.clone(),
            notifier.clone(),
        );

        Harness {
            students,
            store,
            renderer,
            artifacts,
            notifier,
            service,
        }
    }

    fn student(roll: &str, name: &str) -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new(roll),
            name: name.to_string(),
            year: Year::Second,
            section: Section::A,
        })
    }

    fn request(roll: &str, mode: PaymentMode, food_coupon: bool) -> BillRequest {
        BillRequest {
            roll_no: RollNo::new(roll),
            mode,
            transaction_id: None,
            screenshot_path: None,
            food_coupon,
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cash_billing_without_coupon_charges_150() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;

        let outcome = h
            .service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();

        assert_eq!(outcome.amount, Money::new(dec!(150), Currency::INR));
        assert!(outcome.notification.is_delivered());
        assert!(outcome.artifact_url.starts_with("https://files.test/"));

        let stored = h.store.get(outcome.billing_id).await.unwrap();
        assert_eq!(stored.artifact_url.as_deref(), Some(outcome.artifact_url.as_str()));
        assert_eq!(h.store.ledger_total().await, Money::new(dec!(150), Currency::INR));
    }

    #[tokio::test]
    async fn test_coupon_billing_charges_300() {
        let h = harness_with(vec![student("CS102", "Rohan Gupta")]).await;

        let outcome = h
            .service
            .bill_student(request("CS102", PaymentMode::Online, true))
            .await
            .unwrap();

        assert_eq!(outcome.amount, Money::new(dec!(300), Currency::INR));
    }

    #[tokio::test]
    async fn test_unknown_roll_aborts_with_zero_side_effects() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;

        let result = h
            .service
            .bill_student(request("ZZZ999", PaymentMode::Cash, false))
            .await;

        assert!(matches!(result, Err(BillingError::StudentNotFound { .. })));
        assert!(h.store.is_empty().await);
        assert!(h.store.ledger_total().await.is_zero());
        assert_eq!(h.renderer.render_count().await, 0);
        assert!(h.notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_two_billings_accumulate_450_in_either_order() {
        let h = harness_with(vec![
            student("CS101", "Asha Verma"),
            student("CS102", "Rohan Gupta"),
        ])
        .await;

        h.service
            .bill_student(request("CS102", PaymentMode::Online, true))
            .await
            .unwrap();
        h.service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();

        assert_eq!(h.store.ledger_total().await, Money::new(dec!(450), Currency::INR));
    }

    #[tokio::test]
    async fn test_render_failure_keeps_record_and_ledger() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;
        h.renderer.set_failing(true);

        let result = h
            .service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await;

        assert!(matches!(result, Err(BillingError::RenderFailure(_))));
        assert_eq!(h.store.len().await, 1);
        assert_eq!(h.store.ledger_total().await, Money::new(dec!(150), Currency::INR));

        let bills = h.store.list_with_students().await.unwrap();
        assert_eq!(bills[0].artifact_url, None);
        assert!(h.notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_removes_temp_artifact() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;
        h.artifacts.set_failing(true);

        let result = h
            .service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await;

        assert!(matches!(result, Err(BillingError::UploadFailure(_))));
        let paths = h.renderer.written_paths().await;
        assert_eq!(paths.len(), 1);
        assert!(!paths[0].exists());

        let bills = h.store.list_with_students().await.unwrap();
        assert_eq!(bills[0].artifact_url, None);
    }

    #[tokio::test]
    async fn test_upload_success_removes_temp_artifact() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;

        h.service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();

        let paths = h.renderer.written_paths().await;
        assert_eq!(paths.len(), 1);
        assert!(!paths[0].exists());
    }

    #[tokio::test]
    async fn test_attach_failure_surfaces_as_storage_failure() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;
        h.store.set_failing_attach(true);

        let result = h
            .service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await;

        assert!(matches!(result, Err(BillingError::StorageFailure(_))));
        // The record itself is already durable.
        assert_eq!(h.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_notify_failure_is_a_soft_warning() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;
        h.notifier.set_failing(true);

        let outcome = h
            .service
            .bill_student(request("CS101", PaymentMode::Online, false))
            .await
            .unwrap();

        assert!(!outcome.notification.is_delivered());
        assert!(outcome.notification.warning().is_some());

        let stored = h.store.get(outcome.billing_id).await.unwrap();
        assert!(stored.has_artifact());
        assert_eq!(h.store.ledger_total().await, Money::new(dec!(150), Currency::INR));
    }

    #[tokio::test]
    async fn test_notification_carries_email_and_artifact_url() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;

        let outcome = h
            .service
            .bill_student(request("CS101", PaymentMode::Online, false))
            .await
            .unwrap();

        let sent = h.notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "asha@example.com");
        assert_eq!(sent[0].1, outcome.artifact_url);
    }

    #[tokio::test]
    async fn test_insert_failure_renders_nothing() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;
        h.store.set_failing_inserts(true);

        let result = h
            .service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await;

        assert!(matches!(result, Err(BillingError::StorageFailure(_))));
        assert_eq!(h.renderer.render_count().await, 0);
    }

    #[tokio::test]
    async fn test_all_bills_newest_first() {
        let h = harness_with(vec![
            student("CS101", "Asha Verma"),
            student("CS102", "Rohan Gupta"),
        ])
        .await;

        h.service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();
        h.service
            .bill_student(request("CS102", PaymentMode::Online, true))
            .await
            .unwrap();

        let bills = h.service.all_bills().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].roll_no, RollNo::new("CS102"));
        assert_eq!(bills[1].roll_no, RollNo::new("CS101"));
    }

    #[tokio::test]
    async fn test_payment_stats_tally() {
        let h = harness_with(vec![
            student("CS101", "Asha Verma"),
            student("CS102", "Rohan Gupta"),
            student("CS103", "Meera Iyer"),
        ])
        .await;

        h.service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();
        h.service
            .bill_student(request("CS102", PaymentMode::Online, true))
            .await
            .unwrap();
        h.service
            .bill_student(request("CS103", PaymentMode::Online, false))
            .await
            .unwrap();

        let stats = h.service.payment_stats().await.unwrap();
        assert_eq!(stats.total_online + stats.total_cash, 3);
        assert_eq!(stats.total_online, 2);
        assert_eq!(stats.total_cash, 1);
        assert!(stats.total_food_coupons <= 3);
        assert_eq!(stats.total_food_coupons, 1);
    }

    #[tokio::test]
    async fn test_billing_does_not_touch_paid_flag() {
        let h = harness_with(vec![student("CS101", "Asha Verma")]).await;

        h.service
            .bill_student(request("CS101", PaymentMode::Cash, false))
            .await
            .unwrap();

        let student = h
            .students
            .find_by_roll(&RollNo::new("CS101"))
            .await
            .unwrap()
            .unwrap();
        assert!(!student.has_paid);
    }
}
