//! Billing Domain - Registration Payment Processing
//!
//! This crate turns a payment received at the registration desk into a
//! durable billing record, a receipt artifact, and a confirmation email.
//! It owns the payment tariff, the receipt contents, and the orchestration
//! that ties storage, rendering, upload, and notification together.
//!
//! # Billing Sequence
//!
//! `BillingService::bill_student` runs a fixed sequence:
//!
//! 1. Resolve the student by roll number
//! 2. Derive the fee from the tariff (never from client input)
//! 3. Persist the billing record and credit the fund ledger atomically
//! 4. Render the receipt to a temp file
//! 5. Upload it to the artifact store
//! 6. Remove the temp file
//! 7. Attach the public artifact reference to the record
//! 8. Email the link to the student
//!
//! Failures after step 3 never undo the persisted record: money already
//! changed hands, so the record and the ledger credit stay. Only the email
//! step is soft; its failure degrades the outcome instead of failing it.
//!
//! # Example
//!
//! ```rust
//! use domain_billing::record::{BillingRecord, NewBillingRecord, PaymentMode};
//! use domain_billing::tariff;
//! use core_kernel::StudentId;
//!
//! let amount = tariff::registration_fee(true);
//! let record = BillingRecord::new(NewBillingRecord {
//!     student_id: StudentId::new(),
//!     mode: PaymentMode::Online,
//!     transaction_id: Some("UPI-2209".to_string()),
//!     screenshot_path: None,
//!     food_coupon: true,
//!     amount,
//!     phone: "9876543210".to_string(),
//!     email: "asha@example.com".to_string(),
//! });
//!
//! assert!(!record.has_artifact());
//! assert_eq!(record.amount, tariff::registration_fee(true));
//! ```

pub mod record;
pub mod tariff;
pub mod receipt;
pub mod service;
pub mod ports;
pub mod adapters;
pub mod error;

pub use record::{BillSummary, BillingRecord, NewBillingRecord, PaymentMode, PaymentStats};
pub use receipt::{ReceiptData, RenderedReceipt};
pub use service::{BillRequest, BillingOutcome, BillingService, NotificationStatus};
pub use ports::{ArtifactStore, BillingStore, ReceiptNotifier, ReceiptRenderer};
pub use error::BillingError;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{
    MockArtifactStore, MockBillingStore, MockReceiptNotifier, MockReceiptRenderer,
};
