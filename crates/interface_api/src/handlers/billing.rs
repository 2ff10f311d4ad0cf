//! Billing handlers
//!
//! The bill endpoint accepts the registration desk's multipart form. Text
//! fields arrive camelCased; the screenshot part is written to local disk
//! before the billing sequence runs, so the stored path survives even when a
//! later step fails.

use std::path::Path as StdPath;

use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::instrument;

use domain_billing::{BillRequest, PaymentMode};
use domain_student::RollNo;

use crate::dto::billing::*;
use crate::error::ApiError;
use crate::AppState;

/// Bills a student and delivers the receipt
#[instrument(skip(state, multipart))]
pub async fn bill_student(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<BillResponse>), ApiError> {
    let form = collect_bill_form(multipart, &state.config.uploads.screenshot_dir).await?;

    let (Some(roll_no), Some(mode), Some(phone), Some(email), Some(screenshot_path)) = (
        form.roll_no,
        form.mode,
        form.phone,
        form.email,
        form.screenshot_path,
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };

    let outcome = state
        .billing
        .bill_student(BillRequest {
            roll_no: RollNo::new(roll_no),
            mode,
            transaction_id: form.transaction_id,
            screenshot_path: Some(screenshot_path),
            food_coupon: form.food_coupon,
            phone,
            email,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BillResponse::from_notification(&outcome.notification)),
    ))
}

/// Payment-mode and food-coupon tallies
#[instrument(skip(state))]
pub async fn payment_stats(
    State(state): State<AppState>,
) -> Result<Json<PaymentStatsResponse>, ApiError> {
    let stats = state.billing.payment_stats().await?;
    Ok(Json(stats.into()))
}

/// Every billing record joined with its student, newest first
#[instrument(skip(state))]
pub async fn all_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillSummaryResponse>>, ApiError> {
    let bills = state.billing.all_bills().await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

#[derive(Default)]
struct BillForm {
    roll_no: Option<String>,
    mode: Option<PaymentMode>,
    transaction_id: Option<String>,
    food_coupon: bool,
    phone: Option<String>,
    email: Option<String>,
    screenshot_path: Option<String>,
}

async fn collect_bill_form(
    mut multipart: Multipart,
    screenshot_dir: &StdPath,
) -> Result<BillForm, ApiError> {
    let mut form = BillForm::default();

    while let Some(field) = multipart.next_field().await? {
        // text()/bytes() consume the field, so the name is copied out first.
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "studentRollNo" => form.roll_no = non_blank(field.text().await?),
            "paymentMode" => {
                let raw = field.text().await?;
                let mode = raw
                    .parse::<PaymentMode>()
                    .map_err(|_| ApiError::BadRequest(format!("Unknown payment mode '{raw}'")))?;
                form.mode = Some(mode);
            }
            "transactionId" => form.transaction_id = non_blank(field.text().await?),
            "foodCoupon" => form.food_coupon = field.text().await? == "true",
            "phone" => form.phone = non_blank(field.text().await?),
            "email" => form.email = non_blank(field.text().await?),
            "screenshot" => {
                form.screenshot_path = Some(persist_screenshot(field, screenshot_dir).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Writes the uploaded screenshot under the configured directory
///
/// The stored name carries the upload timestamp so repeat uploads of the same
/// file never collide.
async fn persist_screenshot(field: Field<'_>, dir: &StdPath) -> Result<String, ApiError> {
    // Strip any client-supplied directory components.
    let original = field
        .file_name()
        .and_then(|raw| StdPath::new(raw).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());

    let bytes = field.bytes().await?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store screenshot: {e}")))?;

    let path = dir.join(format!("{}-{}", Utc::now().timestamp_millis(), original));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store screenshot: {e}")))?;

    Ok(path.to_string_lossy().into_owned())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
