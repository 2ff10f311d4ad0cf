//! Currency-tagged amounts
//!
//! Fees move through the office as [`Money`]: a `rust_decimal` value tagged
//! with its currency, so a USD amount cannot slip into the INR fund ledger
//! unnoticed. Storage and the wire carry integer minor units (paise for
//! INR), so the conversions in both directions live here as well.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What can go wrong inside money arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    /// The amount does not fit the target representation (e.g. paise in i64).
    #[error("Overflow during calculation")]
    Overflow,
}

/// ISO 4217 currencies the office accepts. Registration fees post in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
}

impl Currency {
    /// Decimal places of the minor unit (paise, cents).
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::INR | Currency::USD | Currency::EUR => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in a single currency.
///
/// Amounts are kept at four decimal places, two beyond any supported minor
/// unit, and only collapse to paise at the storage boundary via
/// [`Money::minor_units`]. Cross-currency arithmetic is refused rather than
/// converted; the office has no exchange-rate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Builds an amount from stored minor units, `15000` paise -> `150.00`.
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(
            Decimal::new(minor_units, currency.decimal_places()),
            currency,
        )
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The amount as integer minor units, rounding half to even.
    ///
    /// This is the storage form; the billing table keeps paise.
    pub fn minor_units(&self) -> Result<i64, MoneyError> {
        let scale = Decimal::new(10_i64.pow(self.currency.decimal_places()), 0);
        (self.amount * scale)
            .round()
            .to_i64()
            .ok_or(MoneyError::Overflow)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative()
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ))
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places() as usize;
        write!(f, "{} {:.dp$}", self.currency.symbol(), self.amount)
    }
}
