//! Fund ledger definition
//!
//! This module defines the FundLedger entity: a single running total of all
//! collected billing amounts. At most one ledger exists; it is created lazily
//! at zero on first read and only ever credited, never decremented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::error::FundError;

/// The running total of collected funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundLedger {
    /// Sum of all committed billing amounts
    pub total: Money,
    /// When the ledger was last credited
    pub updated_at: DateTime<Utc>,
}

impl FundLedger {
    /// Creates an empty ledger at zero
    pub fn empty() -> Self {
        Self {
            total: Money::zero(Currency::INR),
            updated_at: Utc::now(),
        }
    }

    /// Creates a ledger carrying an existing total
    pub fn with_total(total: Money) -> Self {
        Self {
            total,
            updated_at: Utc::now(),
        }
    }

    /// Credits the ledger by a non-negative amount
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to add, in the ledger's currency
    ///
    /// # Errors
    ///
    /// Returns `FundError::NegativeCredit` for negative amounts; the ledger
    /// is never decremented.
    pub fn credit(&mut self, amount: Money) -> Result<(), FundError> {
        if amount.is_negative() {
            return Err(FundError::NegativeCredit(amount.to_string()));
        }
        self.total = self.total.checked_add(&amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Default for FundLedger {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_ledger_is_zero() {
        let ledger = FundLedger::empty();
        assert!(ledger.total.is_zero());
        assert_eq!(ledger.total.currency(), Currency::INR);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = FundLedger::empty();
        ledger.credit(Money::new(dec!(150), Currency::INR)).unwrap();
        ledger.credit(Money::new(dec!(300), Currency::INR)).unwrap();

        assert_eq!(ledger.total, Money::new(dec!(450), Currency::INR));
    }

    #[test]
    fn test_credit_rejects_negative() {
        let mut ledger = FundLedger::empty();
        let result = ledger.credit(Money::new(dec!(-1), Currency::INR));

        assert!(matches!(result, Err(FundError::NegativeCredit(_))));
        assert!(ledger.total.is_zero());
    }

    #[test]
    fn test_credit_rejects_currency_mismatch() {
        let mut ledger = FundLedger::empty();
        let result = ledger.credit(Money::new(dec!(10), Currency::USD));

        assert!(matches!(result, Err(FundError::Money(_))));
    }

    #[test]
    fn test_credit_zero_is_allowed() {
        let mut ledger = FundLedger::with_total(Money::new(dec!(150), Currency::INR));
        ledger.credit(Money::zero(Currency::INR)).unwrap();

        assert_eq!(ledger.total, Money::new(dec!(150), Currency::INR));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ledger_total_equals_sum_of_credits(
            credits in prop::collection::vec(0i64..100_000i64, 0..50)
        ) {
            let mut ledger = FundLedger::empty();
            let mut expected = 0i64;

            for minor in &credits {
                ledger.credit(Money::from_minor(*minor, Currency::INR)).unwrap();
                expected += minor;
            }

            prop_assert_eq!(ledger.total, Money::from_minor(expected, Currency::INR));
        }
    }
}
