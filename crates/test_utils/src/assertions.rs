//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;

/// Asserts that two Money values are equal within a tolerance
///
/// Panics if the currencies differ or the amounts diverge by more than
/// `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: {:?} vs {:?}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by {} (tolerance {}): actual {}, expected {}",
        diff,
        tolerance,
        actual.amount(),
        expected.amount()
    );
}

/// Asserts that a Money value is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive amount, got {} {}",
        money.amount(),
        money.currency().code()
    );
}

/// Asserts that a Money value is exactly zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero amount, got {} {}",
        money.amount(),
        money.currency().code()
    );
}

/// Asserts that a Money value is strictly negative
pub fn assert_money_negative(money: &Money) {
    assert!(
        money.is_negative(),
        "Expected negative amount, got {} {}",
        money.amount(),
        money.currency().code()
    );
}

/// Asserts that a list of Money values sums to the expected total
///
/// Panics if any currency differs from the expected total's currency.
pub fn assert_money_sum_equals(monies: &[Money], expected: &Money) {
    let mut sum = Money::zero(expected.currency());
    for money in monies {
        sum = sum
            .checked_add(money)
            .unwrap_or_else(|e| panic!("Failed to sum amounts: {}", e));
    }

    assert_eq!(
        sum, *expected,
        "Sum of {} amounts is {} {}, expected {} {}",
        monies.len(),
        sum.amount(),
        sum.currency().code(),
        expected.amount(),
        expected.currency().code()
    );
}

/// Asserts that a Decimal lies within an inclusive range
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Value {} outside range [{}, {}]",
        value,
        min,
        max
    );
}

/// Asserts that two Decimals are equal within a tolerance
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by {} (tolerance {}): actual {}, expected {}",
        diff,
        tolerance,
        actual,
        expected
    );
}

/// Asserts that a Result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Asserts that a Result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
}

/// Asserts that a Result is Err matching the given pattern
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => assert!(
                matches!(e, $pattern),
                "Error did not match expected variant: {:?}",
                e
            ),
        }
    };
}
