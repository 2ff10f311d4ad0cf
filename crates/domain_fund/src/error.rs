//! Fund domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// What the ledger refuses.
#[derive(Debug, Error)]
pub enum FundError {
    /// The fund only grows; a negative credit is a caller bug.
    #[error("Credit amount must not be negative: {0}")]
    NegativeCredit(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
