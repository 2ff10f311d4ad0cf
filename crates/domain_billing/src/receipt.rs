//! Receipt rendering inputs
//!
//! `ReceiptData` is the flattened view a renderer needs, assembled from a
//! billing record and its student. Renderers never see domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use core_kernel::Money;
use domain_student::{RollNo, Section, Student, Year};

use crate::record::{BillingRecord, PaymentMode};

/// Everything a receipt shows, in display-ready form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    /// Student name
    pub student_name: String,
    /// Student roll number
    pub roll_no: RollNo,
    /// Student year
    pub year: Year,
    /// Student section
    pub section: Section,
    /// Payment mode
    pub mode: PaymentMode,
    /// Transaction id, or `N/A` when none was supplied
    pub transaction_id: String,
    /// Amount charged
    pub amount: Money,
    /// Whether a food coupon was bought
    pub food_coupon: bool,
    /// When the payment was recorded
    pub payment_date: DateTime<Utc>,
}

impl ReceiptData {
    /// Assembles receipt data from a record and its student
    pub fn from_parts(record: &BillingRecord, student: &Student) -> Self {
        let transaction_id = record
            .transaction_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or("N/A")
            .to_string();

        Self {
            student_name: student.name.clone(),
            roll_no: student.roll_no.clone(),
            year: student.year,
            section: student.section,
            mode: record.mode,
            transaction_id,
            amount: record.amount,
            food_coupon: record.food_coupon,
            payment_date: record.created_at,
        }
    }

    /// Display label for the food-coupon line
    pub fn food_coupon_label(&self) -> &'static str {
        if self.food_coupon {
            "Yes"
        } else {
            "No"
        }
    }

    /// Display form of the amount, `150.00 /-` style
    pub fn amount_label(&self) -> String {
        format!("{:.2} /-", self.amount.amount())
    }

    /// Display form of the payment date
    pub fn date_label(&self) -> String {
        self.payment_date.format("%d/%m/%Y").to_string()
    }

    /// Suggested object-name stem for the rendered artifact
    ///
    /// Renderers append their own extension. The stem is stable for a given
    /// record, so re-rendering overwrites rather than duplicates.
    pub fn object_stem(&self) -> String {
        format!(
            "bill-{}-{}",
            self.roll_no,
            self.payment_date.timestamp_millis()
        )
    }
}

/// A rendered receipt waiting to be uploaded
///
/// The path points at a local temp file owned by the caller; the caller
/// removes it once the upload attempt finishes, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReceipt {
    /// Local path of the rendered artifact
    pub path: PathBuf,
    /// Object name to store the artifact under
    pub object_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewBillingRecord;
    use core_kernel::Currency;
    use domain_student::NewStudent;
    use rust_decimal_macros::dec;

    fn sample_student() -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        })
    }

    fn sample_record(student: &Student, transaction_id: Option<&str>) -> BillingRecord {
        BillingRecord::new(NewBillingRecord {
            student_id: student.id,
            mode: PaymentMode::Online,
            transaction_id: transaction_id.map(str::to_string),
            screenshot_path: None,
            food_coupon: true,
            amount: Money::new(dec!(300), Currency::INR),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        })
    }

    #[test]
    fn test_from_parts_copies_fields() {
        let student = sample_student();
        let record = sample_record(&student, Some("TXN123"));
        let data = ReceiptData::from_parts(&record, &student);

        assert_eq!(data.student_name, "Asha Verma");
        assert_eq!(data.roll_no.as_str(), "CS101");
        assert_eq!(data.year, Year::Second);
        assert_eq!(data.section, Section::A);
        assert_eq!(data.transaction_id, "TXN123");
        assert_eq!(data.amount, Money::new(dec!(300), Currency::INR));
        assert_eq!(data.food_coupon_label(), "Yes");
    }

    #[test]
    fn test_missing_transaction_id_shows_na() {
        let student = sample_student();
        let record = sample_record(&student, None);
        let data = ReceiptData::from_parts(&record, &student);

        assert_eq!(data.transaction_id, "N/A");
    }

    #[test]
    fn test_blank_transaction_id_shows_na() {
        let student = sample_student();
        let record = sample_record(&student, Some("   "));
        let data = ReceiptData::from_parts(&record, &student);

        assert_eq!(data.transaction_id, "N/A");
    }

    #[test]
    fn test_amount_label_has_two_decimals() {
        let student = sample_student();
        let record = sample_record(&student, None);
        let data = ReceiptData::from_parts(&record, &student);

        assert_eq!(data.amount_label(), "300.00 /-");
    }

    #[test]
    fn test_object_stem_carries_roll_number() {
        let student = sample_student();
        let record = sample_record(&student, None);
        let data = ReceiptData::from_parts(&record, &student);

        assert!(data.object_stem().starts_with("bill-CS101-"));
    }

    #[test]
    fn test_object_stem_is_stable() {
        let student = sample_student();
        let record = sample_record(&student, None);
        let data = ReceiptData::from_parts(&record, &student);

        assert_eq!(data.object_stem(), data.object_stem());
    }
}
