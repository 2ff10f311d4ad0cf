//! Test Data Builders
//!
//! Builder patterns for constructing domain entities with sensible defaults.
//! Tests specify only the fields they care about; everything else falls back
//! to the fixture values.

use core_kernel::{Money, StudentId};
use domain_billing::record::{BillingRecord, NewBillingRecord, PaymentMode};
use domain_billing::service::BillRequest;
use domain_billing::tariff;
use domain_student::{NewStudent, RollNo, Section, Student, Year};

use crate::fixtures::StringFixtures;

/// Builder for students
#[derive(Debug, Clone)]
pub struct TestStudentBuilder {
    roll_no: String,
    name: String,
    year: Year,
    section: Section,
    paid: bool,
}

impl Default for TestStudentBuilder {
    fn default() -> Self {
        Self {
            roll_no: StringFixtures::roll_no(),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
            paid: false,
        }
    }
}

impl TestStudentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roll_no(mut self, roll_no: impl Into<String>) -> Self {
        self.roll_no = roll_no.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_year(mut self, year: Year) -> Self {
        self.year = year;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    /// Marks the built student as having paid the registration fee
    pub fn paid(mut self) -> Self {
        self.paid = true;
        self
    }

    pub fn build(self) -> Student {
        let mut student = Student::new(NewStudent {
            roll_no: RollNo::new(self.roll_no),
            name: self.name,
            year: self.year,
            section: self.section,
        });
        if self.paid {
            student.mark_paid();
        }
        student
    }
}

/// Builder for committed billing records
///
/// The amount defaults to the tariff for the chosen coupon flag, matching
/// how the billing service derives it.
#[derive(Debug, Clone)]
pub struct TestBillingRecordBuilder {
    student_id: StudentId,
    mode: PaymentMode,
    transaction_id: Option<String>,
    screenshot_path: Option<String>,
    food_coupon: bool,
    amount: Option<Money>,
    artifact_url: Option<String>,
    phone: String,
    email: String,
}

impl Default for TestBillingRecordBuilder {
    fn default() -> Self {
        Self {
            student_id: StudentId::new_v7(),
            mode: PaymentMode::Cash,
            transaction_id: None,
            screenshot_path: None,
            food_coupon: false,
            amount: None,
            artifact_url: None,
            phone: StringFixtures::phone(),
            email: StringFixtures::email(),
        }
    }
}

impl TestBillingRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_student(mut self, student_id: StudentId) -> Self {
        self.student_id = student_id;
        self
    }

    /// Online payment carrying the fixture transaction reference
    pub fn online(mut self) -> Self {
        self.mode = PaymentMode::Online;
        self.transaction_id = Some(StringFixtures::transaction_id());
        self
    }

    pub fn cash(mut self) -> Self {
        self.mode = PaymentMode::Cash;
        self.transaction_id = None;
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_food_coupon(mut self) -> Self {
        self.food_coupon = true;
        self
    }

    /// Overrides the tariff-derived amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_artifact_url(mut self, url: impl Into<String>) -> Self {
        self.artifact_url = Some(url.into());
        self
    }

    pub fn build(self) -> BillingRecord {
        let amount = self
            .amount
            .unwrap_or_else(|| tariff::registration_fee(self.food_coupon));
        let mut record = BillingRecord::new(NewBillingRecord {
            student_id: self.student_id,
            mode: self.mode,
            transaction_id: self.transaction_id,
            screenshot_path: self.screenshot_path,
            food_coupon: self.food_coupon,
            amount,
            phone: self.phone,
            email: self.email,
        });
        if let Some(url) = self.artifact_url {
            record.attach_artifact(url);
        }
        record
    }
}

/// Builder for desk payment requests
#[derive(Debug, Clone)]
pub struct TestBillRequestBuilder {
    roll_no: String,
    mode: PaymentMode,
    transaction_id: Option<String>,
    screenshot_path: Option<String>,
    food_coupon: bool,
    phone: String,
    email: String,
}

impl Default for TestBillRequestBuilder {
    fn default() -> Self {
        Self {
            roll_no: StringFixtures::roll_no(),
            mode: PaymentMode::Cash,
            transaction_id: None,
            screenshot_path: None,
            food_coupon: false,
            phone: StringFixtures::phone(),
            email: StringFixtures::email(),
        }
    }
}

impl TestBillRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roll_no(mut self, roll_no: impl Into<String>) -> Self {
        self.roll_no = roll_no.into();
        self
    }

    pub fn online(mut self) -> Self {
        self.mode = PaymentMode::Online;
        self.transaction_id = Some(StringFixtures::transaction_id());
        self
    }

    pub fn with_food_coupon(mut self) -> Self {
        self.food_coupon = true;
        self
    }

    pub fn with_screenshot(mut self, path: impl Into<String>) -> Self {
        self.screenshot_path = Some(path.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn build(self) -> BillRequest {
        BillRequest {
            roll_no: RollNo::new(self.roll_no),
            mode: self.mode,
            transaction_id: self.transaction_id,
            screenshot_path: self.screenshot_path,
            food_coupon: self.food_coupon,
            phone: self.phone,
            email: self.email,
        }
    }
}
