//! Registration tariff
//!
//! The fee schedule is fixed: a flat registration fee, doubled when a food
//! coupon is included. No other amount is ever derived.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};

/// Registration fee without a food coupon, in INR
pub const BASE_FEE: Decimal = dec!(150);

/// Registration fee with a food coupon, in INR
pub const FEE_WITH_COUPON: Decimal = dec!(300);

/// Returns the amount to charge for a registration
///
/// # Arguments
///
/// * `food_coupon` - Whether the registration includes a food coupon
pub fn registration_fee(food_coupon: bool) -> Money {
    if food_coupon {
        Money::new(FEE_WITH_COUPON, Currency::INR)
    } else {
        Money::new(BASE_FEE, Currency::INR)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fee_is_one_of_exactly_two_amounts(food_coupon: bool) {
            let fee = registration_fee(food_coupon);
            let expected = if food_coupon { dec!(300) } else { dec!(150) };

            prop_assert_eq!(fee, Money::new(expected, Currency::INR));
            prop_assert!(fee.is_positive());
        }
    }
}
