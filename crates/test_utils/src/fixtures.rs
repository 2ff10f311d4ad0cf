//! Test Fixtures
//!
//! Deterministic values for tests: fixed amounts, a small student roster,
//! and stable identifiers. Fixtures never touch the clock or the random
//! number generator, so assertions against them are repeatable.

use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{BillingId, Currency, Money, StudentId};
use domain_student::{NewStudent, RollNo, Section, Student, Year};

/// Common monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The base registration fee
    pub fn inr_150() -> Money {
        Money::new(dec!(150), Currency::INR)
    }

    /// Registration fee with a food coupon
    pub fn inr_300() -> Money {
        Money::new(dec!(300), Currency::INR)
    }

    /// One of each tariff, summed
    pub fn inr_450() -> Money {
        Money::new(dec!(450), Currency::INR)
    }

    /// Zero rupees
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A foreign-currency amount, for mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100), Currency::USD)
    }
}

/// A small, well-known student roster
pub struct StudentFixtures;

impl StudentFixtures {
    /// Second-year student, roll CS101, unpaid
    pub fn asha() -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new("CS101"),
            name: "Asha Verma".to_string(),
            year: Year::Second,
            section: Section::A,
        })
    }

    /// Second-year student, roll CS102, unpaid
    pub fn rohan() -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new("CS102"),
            name: "Rohan Iyer".to_string(),
            year: Year::Second,
            section: Section::B,
        })
    }

    /// Third-year student, roll CS103, unpaid
    pub fn meera() -> Student {
        Student::new(NewStudent {
            roll_no: RollNo::new("CS103"),
            name: "Meera Pillai".to_string(),
            year: Year::Third,
            section: Section::A,
        })
    }

    /// All three fixture students
    pub fn roster() -> Vec<Student> {
        vec![Self::asha(), Self::rohan(), Self::meera()]
    }

    /// Registration input with the given roll number and name
    pub fn new_student(roll_no: &str, name: &str) -> NewStudent {
        NewStudent {
            roll_no: RollNo::new(roll_no),
            name: name.to_string(),
            year: Year::First,
            section: Section::A,
        }
    }
}

/// Stable identifiers for repeatable assertions
pub struct IdFixtures;

impl IdFixtures {
    /// A fixed student id
    pub fn student_id() -> StudentId {
        StudentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// A second, distinct student id
    pub fn other_student_id() -> StudentId {
        StudentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// A fixed billing id
    pub fn billing_id() -> BillingId {
        BillingId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}

/// Common string values
pub struct StringFixtures;

impl StringFixtures {
    /// A valid roll number
    pub fn roll_no() -> String {
        "CS101".to_string()
    }

    /// A contact email
    pub fn email() -> String {
        "asha.verma@example.com".to_string()
    }

    /// A ten-digit contact phone
    pub fn phone() -> String {
        "9876543210".to_string()
    }

    /// A UPI transaction reference
    pub fn transaction_id() -> String {
        "UPI-7001".to_string()
    }

    /// A public receipt location
    pub fn artifact_url() -> String {
        "https://files.example.com/receipts/bill-CS101.pdf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixtures_match_the_tariff() {
        assert_eq!(MoneyFixtures::inr_150().minor_units().unwrap(), 15_000);
        assert_eq!(MoneyFixtures::inr_300().minor_units().unwrap(), 30_000);
        assert!(MoneyFixtures::inr_zero().is_zero());
    }

    #[test]
    fn test_money_fixtures_sum() {
        let sum = MoneyFixtures::inr_150()
            .checked_add(&MoneyFixtures::inr_300())
            .unwrap();
        assert_eq!(sum, MoneyFixtures::inr_450());
    }

    #[test]
    fn test_usd_fixture_uses_a_different_currency() {
        assert_ne!(
            MoneyFixtures::usd_100().currency(),
            MoneyFixtures::inr_150().currency()
        );
    }

    #[test]
    fn test_roster_roll_numbers_are_unique() {
        let roster = StudentFixtures::roster();
        assert_eq!(roster.len(), 3);

        let mut rolls: Vec<_> = roster.iter().map(|s| s.roll_no.as_str()).collect();
        rolls.sort_unstable();
        rolls.dedup();
        assert_eq!(rolls.len(), 3);
    }

    #[test]
    fn test_fixture_students_start_unpaid() {
        for student in StudentFixtures::roster() {
            assert!(!student.has_paid);
        }
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::student_id(), IdFixtures::student_id());
        assert_ne!(IdFixtures::student_id(), IdFixtures::other_student_id());
    }

    #[test]
    fn test_phone_fixture_is_ten_digits() {
        let phone = StringFixtures::phone();
        assert_eq!(phone.len(), 10);
        assert!(phone.chars().all(|c| c.is_ascii_digit()));
    }
}
