//! Port toolkit shared by the domain crates
//!
//! Domains reach the outside world through async port traits: the student
//! directory, billing store, and fund ledger are backed by SQLite
//! repositories, the receipt pipeline by renderer, blob-store, and mail
//! adapters. Every port fails with a [`PortError`], so a caller handles a
//! duplicate roll number and a mail-gateway outage through one taxonomy.
//!
//! Adapters that hold external connections also implement
//! [`HealthCheckable`], and the remote ones take a [`CircuitBreakerConfig`]
//! so a gateway that keeps failing is fast-failed instead of hammered.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker for domain ports.
///
/// Keeps every port trait object `Send + Sync + 'static`, which is what the
/// shared application state requires of its collaborator handles.
pub trait DomainPort: Send + Sync + 'static {}

/// The failure currency of every port.
///
/// Storage adapters mostly produce `NotFound`, `Conflict`, and `Connection`;
/// the remote receipt collaborators add `Timeout`, `Unauthorized`,
/// `RateLimited`, and `ServiceUnavailable` on top.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The write collides with existing data, e.g. a duplicate roll number.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// The gateway rejected our credentials.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// The entity does not exist; `id` is whatever identifies it to a human
    /// (a roll number reads better in logs than a UUID).
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// A connection failure with no underlying error worth keeping.
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether retrying the same call later could plausibly succeed.
    ///
    /// Exactly the remote-failure kinds: connection loss, timeout, rate
    /// limiting, and gateway unavailability. Conflicts and missing entities
    /// are stable answers, not transient ones.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Health of a single adapter, as reported by its probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Operational but impaired, e.g. the blob store answered slowly.
    Degraded,
    Unhealthy,
    Unknown,
}

/// One probe result, timestamped so stale reports are recognizable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Implemented by adapters the readiness probe can interrogate.
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Circuit breaker tuning for remote adapters.
///
/// After `failure_threshold` consecutive failures the circuit opens and
/// calls fast-fail; after `reset_timeout_secs` it half-opens, and
/// `success_threshold` consecutive successes close it again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub reset_timeout_secs: u64,
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout_secs: 30,
            success_threshold: 3,
        }
    }
}
