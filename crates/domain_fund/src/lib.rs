//! Fund Ledger Domain
//!
//! This crate tracks the running total of collected billing amounts.
//!
//! # Key Concepts
//!
//! - **FundLedger**: the single running total; lazily created at zero on
//!   first read
//! - **FundStore**: the read-side port; credits never flow through it
//!
//! Credits ride inside the billing store's insert transaction, which keeps
//! the total and the billing records atomically consistent. The ledger is
//! never decremented.

pub mod ledger;
pub mod error;
pub mod ports;

pub use ledger::FundLedger;
pub use error::FundError;
pub use ports::{FundStore, FundStoreExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockFundStore;
