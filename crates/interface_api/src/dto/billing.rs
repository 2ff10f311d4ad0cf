//! Billing DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use domain_billing::{BillSummary, NotificationStatus, PaymentMode, PaymentStats};

/// Billing outcome envelope
///
/// The warning appears only when the receipt email could not be handed to
/// the gateway; billing itself already succeeded at that point.
#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl BillResponse {
    /// Builds the response from the notification outcome
    pub fn from_notification(notification: &NotificationStatus) -> Self {
        match notification.warning() {
            None => Self {
                message: "Billing successful, email sent 🎉".to_string(),
                warning: None,
            },
            Some(reason) => Self {
                message: "Billing successful".to_string(),
                warning: Some(reason.to_string()),
            },
        }
    }
}

/// Counts of billing records by payment kind
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsResponse {
    pub total_online: i64,
    pub total_cash: i64,
    pub total_food_coupons: i64,
}

impl From<PaymentStats> for PaymentStatsResponse {
    fn from(stats: PaymentStats) -> Self {
        Self {
            total_online: stats.total_online,
            total_cash: stats.total_cash,
            total_food_coupons: stats.total_food_coupons,
        }
    }
}

/// One row of the bill listing
///
/// `billFileName` is the empty string while no receipt artifact is attached,
/// matching the frontend's expectations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummaryResponse {
    pub id: String,
    pub student_name: String,
    pub roll_no: String,
    pub payment_mode: PaymentMode,
    pub food_coupon: bool,
    pub bill_file_name: String,
    pub payment_date: DateTime<Utc>,
}

impl From<BillSummary> for BillSummaryResponse {
    fn from(summary: BillSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            student_name: summary.student_name,
            roll_no: summary.roll_no.as_str().to_string(),
            payment_mode: summary.mode,
            food_coupon: summary.food_coupon,
            bill_file_name: summary.artifact_url.unwrap_or_default(),
            payment_date: summary.payment_date,
        }
    }
}
