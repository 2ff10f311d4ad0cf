//! Repository implementations of the storage ports
//!
//! Each repository wraps the shared pool and implements one domain port
//! directly: rows in, domain types out. Conversions between stored and
//! domain representations live beside the repository that owns them.

pub mod billing;
pub mod fund;
pub mod student;

pub use billing::SqliteBillingStore;
pub use fund::SqliteFundStore;
pub use student::SqliteStudentDirectory;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};

use crate::error::DatabaseError;

/// Converts money to stored minor units (paise)
pub(crate) fn money_to_paise(money: &Money) -> Result<i64, DatabaseError> {
    money
        .amount()
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.round().to_i64())
        .ok_or_else(|| {
            DatabaseError::bad_column("amount_paise", format!("Amount out of range: {}", money))
        })
}

/// Converts stored minor units (paise) back to money
pub(crate) fn paise_to_money(paise: i64) -> Money {
    Money::new(Decimal::new(paise, 2), Currency::INR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_round_trips_through_paise() {
        let money = Money::new(dec!(300), Currency::INR);
        let paise = money_to_paise(&money).unwrap();

        assert_eq!(paise, 30000);
        assert_eq!(paise_to_money(paise), money);
    }

    #[test]
    fn test_fractional_amounts_keep_two_decimals() {
        let money = Money::new(dec!(150.50), Currency::INR);
        let paise = money_to_paise(&money).unwrap();

        assert_eq!(paise, 15050);
        assert_eq!(paise_to_money(paise).amount(), dec!(150.50));
    }

    #[test]
    fn test_zero_is_zero() {
        assert_eq!(money_to_paise(&Money::zero(Currency::INR)).unwrap(), 0);
        assert!(paise_to_money(0).is_zero());
    }
}
