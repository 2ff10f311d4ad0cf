//! Shared kernel for the registration back office
//!
//! Everything the domain crates have in common lives here: currency-tagged
//! [`Money`], the typed identifiers, and the port toolkit (failure taxonomy,
//! health checks, circuit-breaker settings) that the storage and collaborator
//! adapters build on. Nothing in this crate knows about students, bills, or
//! HTTP; it only gives the domains a shared vocabulary.

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{BillingId, StudentId};
pub use money::{Currency, Money, MoneyError};
pub use ports::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    PortError,
};
