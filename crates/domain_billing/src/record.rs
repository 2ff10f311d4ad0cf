//! Billing records
//!
//! This module defines the persistent billing event: one record per completed
//! registration payment. A record is inserted once and mutated exactly once
//! afterward, to attach the uploaded receipt artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BillingId, Money, StudentId};
use domain_student::RollNo;

use crate::error::BillingError;

/// How the registration fee was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Cash handed over at the registration desk
    Cash,
    /// UPI or bank transfer, usually with a transaction id
    Online,
}

impl PaymentMode {
    /// Returns the wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Online => "Online",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Cash" => Ok(PaymentMode::Cash),
            "Online" => Ok(PaymentMode::Online),
            other => Err(BillingError::invalid(format!(
                "Unknown payment mode '{}', expected Cash or Online",
                other
            ))),
        }
    }
}

/// Input for inserting a billing record
///
/// The amount is always derived from the tariff by the caller, never taken
/// from client input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBillingRecord {
    /// The student being billed
    pub student_id: StudentId,
    /// Payment mode
    pub mode: PaymentMode,
    /// Transaction id for online payments; not required
    pub transaction_id: Option<String>,
    /// Server-local path of the uploaded payment screenshot, if any
    pub screenshot_path: Option<String>,
    /// Whether a food coupon was bought
    pub food_coupon: bool,
    /// Amount charged
    pub amount: Money,
    /// Contact phone, taken verbatim
    pub phone: String,
    /// Contact email, taken verbatim
    pub email: String,
}

/// A committed billing event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Unique identifier
    pub id: BillingId,
    /// The student this record bills
    pub student_id: StudentId,
    /// Payment mode
    pub mode: PaymentMode,
    /// Transaction id for online payments
    pub transaction_id: Option<String>,
    /// Server-local path of the uploaded payment screenshot
    pub screenshot_path: Option<String>,
    /// Whether a food coupon was bought
    pub food_coupon: bool,
    /// Amount charged
    pub amount: Money,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Public reference of the uploaded receipt; empty until attached
    pub artifact_url: Option<String>,
    /// When the payment was recorded
    pub created_at: DateTime<Utc>,
}

impl BillingRecord {
    /// Creates a new record from insert input
    ///
    /// The artifact reference starts empty; it is attached after the receipt
    /// has been rendered and uploaded.
    pub fn new(input: NewBillingRecord) -> Self {
        Self {
            id: BillingId::new_v7(),
            student_id: input.student_id,
            mode: input.mode,
            transaction_id: input.transaction_id,
            screenshot_path: input.screenshot_path,
            food_coupon: input.food_coupon,
            amount: input.amount,
            phone: input.phone,
            email: input.email,
            artifact_url: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the uploaded artifact reference
    pub fn attach_artifact(&mut self, url: impl Into<String>) {
        self.artifact_url = Some(url.into());
    }

    /// Returns true if a receipt artifact has been attached
    pub fn has_artifact(&self) -> bool {
        self.artifact_url.is_some()
    }
}

/// Counts of billing records by payment kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStats {
    /// Records paid online
    pub total_online: i64,
    /// Records paid in cash
    pub total_cash: i64,
    /// Records with a food coupon
    pub total_food_coupons: i64,
}

/// A billing record joined with its student, for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Billing record id
    pub id: BillingId,
    /// Student name at the time of the query
    pub student_name: String,
    /// Student roll number
    pub roll_no: RollNo,
    /// Payment mode
    pub mode: PaymentMode,
    /// Whether a food coupon was bought
    pub food_coupon: bool,
    /// Public receipt reference, if one was attached
    pub artifact_url: Option<String>,
    /// When the payment was recorded
    pub payment_date: DateTime<Utc>,
}
