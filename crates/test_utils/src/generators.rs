//! Property-Based Test Generators
//!
//! Proptest strategies for generating random domain values that maintain
//! invariants, plus a few `fake`-backed helpers for one-off realistic data
//! where a full property test is overkill.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use uuid::Uuid;

use core_kernel::{BillingId, Currency, Money, StudentId};
use domain_billing::record::PaymentMode;
use domain_student::{NewStudent, RollNo, Section, Year};

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
    ]
}

/// Strategy for non-negative amounts in minor units, capped at one crore rupees
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    0..=1_000_000_000_i64
}

/// Strategy for Money in any supported currency
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (amount_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Strategy for strictly positive rupee amounts
pub fn positive_inr_strategy() -> impl Strategy<Value = Money> {
    (1..=1_000_000_000_i64).prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for roll numbers shaped like the university's (two letters,
/// three digits)
pub fn roll_no_strategy() -> impl Strategy<Value = RollNo> {
    "[A-Z]{2}[0-9]{3}".prop_map(RollNo::new)
}

/// Strategy for years of study
pub fn year_strategy() -> impl Strategy<Value = Year> {
    prop_oneof![
        Just(Year::First),
        Just(Year::Second),
        Just(Year::Third),
        Just(Year::Fourth),
    ]
}

/// Strategy for class sections
pub fn section_strategy() -> impl Strategy<Value = Section> {
    prop_oneof![Just(Section::A), Just(Section::B), Just(Section::C)]
}

/// Strategy for payment modes
pub fn payment_mode_strategy() -> impl Strategy<Value = PaymentMode> {
    prop_oneof![Just(PaymentMode::Cash), Just(PaymentMode::Online)]
}

/// Strategy for complete registration inputs
pub fn new_student_strategy() -> impl Strategy<Value = NewStudent> {
    (
        roll_no_strategy(),
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,10}",
        year_strategy(),
        section_strategy(),
    )
        .prop_map(|(roll_no, name, year, section)| NewStudent {
            roll_no,
            name,
            year,
            section,
        })
}

/// Strategy for student ids
pub fn student_id_strategy() -> impl Strategy<Value = StudentId> {
    any::<[u8; 16]>().prop_map(|bytes| StudentId::from_uuid(Uuid::from_bytes(bytes)))
}

/// Strategy for billing ids
pub fn billing_id_strategy() -> impl Strategy<Value = BillingId> {
    any::<[u8; 16]>().prop_map(|bytes| BillingId::from_uuid(Uuid::from_bytes(bytes)))
}

/// Strategy for plausible email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}\\.[a-z]{3,10}@[a-z]{3,8}\\.(com|in|org)"
}

/// Strategy for ten-digit Indian mobile numbers
pub fn phone_strategy() -> impl Strategy<Value = String> {
    "[6-9][0-9]{9}"
}

/// A realistic random full name
pub fn random_name() -> String {
    Name().fake()
}

/// A realistic random email address
pub fn random_email() -> String {
    SafeEmail().fake()
}

/// A random roll number in the university shape
pub fn random_roll_no() -> RollNo {
    let suffix: u32 = (100u32..999).fake();
    RollNo::new(format!("CS{suffix}"))
}
