//! Integration Tests for the Registration Back Office
//!
//! These tests verify cross-domain workflows and end-to-end scenarios
//! that involve multiple crates working together.

use core_kernel::{BillingId, Currency, Money, StudentId};
use rust_decimal_macros::dec;

mod registration_to_billing_workflow {
    use super::*;
    use domain_billing::record::{BillingRecord, NewBillingRecord, PaymentMode};
    use domain_billing::receipt::ReceiptData;
    use domain_billing::tariff;
    use domain_student::{NewStudent, RollNo, Section, Student, Year};

    fn registered_student() -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        })
    }

    /// Tests that a registration turns into a billing record at the tariff
    /// amount, with the receipt reflecting both sides
    #[test]
    fn test_student_payment_produces_record_and_receipt() {
        let mut student = registered_student();

        let amount = tariff::registration_fee(true);
        let mut record = BillingRecord::new(NewBillingRecord {
            student_id: student.id,
            mode: PaymentMode::Online,
            transaction_id: Some("UPI-2209".to_string()),
            screenshot_path: Some("/tmp/uploads/shot.png".to_string()),
            food_coupon: true,
            amount,
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        });
        student.mark_paid();

        assert!(student.has_paid);
        assert_eq!(record.amount, Money::new(dec!(300), Currency::INR));
        assert!(!record.has_artifact());

        record.attach_artifact("https://files.example.com/bill-CS101.pdf");
        assert!(record.has_artifact());

        let receipt = ReceiptData::from_parts(&record, &student);
        assert_eq!(receipt.student_name, "Asha Verma");
        assert_eq!(receipt.roll_no.as_str(), "CS101");
        assert_eq!(receipt.transaction_id, "UPI-2209");
        assert_eq!(receipt.amount_label(), "300.00 /-");
        assert_eq!(receipt.food_coupon_label(), "Yes");
    }

    /// Tests that a cash payment without a coupon is billed at the base fee
    #[test]
    fn test_cash_payment_without_coupon_uses_base_fee() {
        let student = registered_student();

        let record = BillingRecord::new(NewBillingRecord {
            student_id: student.id,
            mode: PaymentMode::Cash,
            transaction_id: None,
            screenshot_path: None,
            food_coupon: false,
            amount: tariff::registration_fee(false),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        });

        assert_eq!(record.amount, Money::new(dec!(150), Currency::INR));

        let receipt = ReceiptData::from_parts(&record, &student);
        assert_eq!(receipt.transaction_id, "N/A");
        assert_eq!(receipt.food_coupon_label(), "No");
    }

    /// Tests that the receipt object name is derived from the billed student
    #[test]
    fn test_receipt_object_stem_follows_roll_number() {
        let student = registered_student();
        let record = BillingRecord::new(NewBillingRecord {
            student_id: student.id,
            mode: PaymentMode::Cash,
            transaction_id: None,
            screenshot_path: None,
            food_coupon: false,
            amount: tariff::registration_fee(false),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        });

        let receipt = ReceiptData::from_parts(&record, &student);
        assert!(receipt.object_stem().starts_with("bill-CS101-"));
        assert_eq!(receipt.object_stem(), receipt.object_stem());
    }
}

mod fund_accumulation_workflow {
    use super::*;
    use domain_billing::tariff;
    use domain_fund::{FundError, FundLedger};

    /// Tests that the ledger accumulates one credit per billed payment
    #[test]
    fn test_ledger_accumulates_tariff_credits() {
        let mut ledger = FundLedger::empty();

        ledger.credit(tariff::registration_fee(false)).unwrap();
        ledger.credit(tariff::registration_fee(true)).unwrap();

        assert_eq!(ledger.total, Money::new(dec!(450), Currency::INR));
    }

    /// Tests that the ledger refuses to go backwards
    #[test]
    fn test_ledger_rejects_negative_credit() {
        let mut ledger = FundLedger::with_total(Money::new(dec!(300), Currency::INR));
        let result = ledger.credit(Money::new(dec!(-150), Currency::INR));

        assert!(matches!(result, Err(FundError::NegativeCredit(_))));
        assert_eq!(ledger.total, Money::new(dec!(300), Currency::INR));
    }

    /// Tests that foreign-currency credits are refused rather than coerced
    #[test]
    fn test_ledger_rejects_foreign_currency() {
        let mut ledger = FundLedger::empty();
        let result = ledger.credit(Money::new(dec!(10), Currency::USD));

        assert!(result.is_err());
        assert!(ledger.total.is_zero());
    }
}

// ============================================================================
// Money and Currency Tests
// ============================================================================

mod money_operations {
    use super::*;

    #[test]
    fn test_money_addition_same_currency() {
        let a = Money::new(dec!(150), Currency::INR);
        let b = Money::new(dec!(300), Currency::INR);

        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum, Money::new(dec!(450), Currency::INR));
    }

    #[test]
    fn test_money_addition_currency_mismatch_fails() {
        let inr = Money::new(dec!(150), Currency::INR);
        let usd = Money::new(dec!(150), Currency::USD);

        assert!(inr.checked_add(&usd).is_err());
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(dec!(300), Currency::INR);
        let b = Money::new(dec!(150), Currency::INR);

        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff, Money::new(dec!(150), Currency::INR));
    }

    #[test]
    fn test_money_minor_unit_round_trip() {
        let money = Money::from_minor(30_000, Currency::INR);

        assert_eq!(money.amount(), dec!(300));
        assert_eq!(money.minor_units().unwrap(), 30_000);
    }

    #[test]
    fn test_money_sign_predicates() {
        assert!(Money::new(dec!(150), Currency::INR).is_positive());
        assert!(Money::zero(Currency::INR).is_zero());
        assert!(Money::new(dec!(-1), Currency::INR).is_negative());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::INR.symbol(), "₹");
        assert_eq!(Currency::USD.symbol(), "$");
        assert_eq!(Currency::EUR.symbol(), "€");
    }
}

// ============================================================================
// Identifier Tests
// ============================================================================

mod identifier_operations {
    use super::*;

    #[test]
    fn test_student_id_display_prefix() {
        let id = StudentId::new();
        assert!(id.to_string().starts_with("STU-"));
    }

    #[test]
    fn test_billing_id_display_prefix() {
        let id = BillingId::new();
        assert!(id.to_string().starts_with("BIL-"));
    }

    #[test]
    fn test_id_display_round_trip() {
        let original = StudentId::new();
        let parsed: StudentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = BillingId::new();
        let b = BillingId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = BillingId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = BillingId::new_v7();

        assert!(first.as_uuid() < second.as_uuid());
    }
}

// ============================================================================
// Student Directory Tests
// ============================================================================

mod student_lifecycle {
    use domain_student::{NewStudent, RollNo, Section, Student, Year};

    #[test]
    fn test_new_student_starts_unpaid() {
        let student = Student::new(NewStudent {
            roll_no: RollNo::new("EC215"),
            name: "Meera Pillai".to_string(),
            year: Year::Third,
            section: Section::B,
        });

        assert!(!student.has_paid);
        assert_eq!(student.created_at, student.updated_at);
    }

    #[test]
    fn test_mark_paid_flips_flag_and_touches() {
        let mut student = Student::new(NewStudent {
            roll_no: RollNo::new("EC215"),
            name: "Meera Pillai".to_string(),
            year: Year::Third,
            section: Section::B,
        });

        student.mark_paid();

        assert!(student.has_paid);
        assert!(student.updated_at >= student.created_at);
    }

    #[test]
    fn test_roll_numbers_trim_on_every_path() {
        assert_eq!(RollNo::new("  CS101  ").as_str(), "CS101");
        assert_eq!(RollNo::from(" CS101"), RollNo::new("CS101 "));
    }

    #[test]
    fn test_year_and_section_wire_spellings() {
        assert_eq!("3rd".parse::<Year>().unwrap(), Year::Third);
        assert_eq!("B".parse::<Section>().unwrap(), Section::B);
        assert!("5th".parse::<Year>().is_err());
        assert!("D".parse::<Section>().is_err());
    }
}
