//! HTTP mail notifier
//!
//! Delivers the receipt link through a transactional-mail HTTP gateway:
//! one JSON POST per receipt, authenticated with an API key header. A
//! circuit breaker fast-fails sends once the gateway has errored repeatedly,
//! half-opening again after a reset timeout.
//!
//! # Error Handling
//!
//! Gateway responses are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Other -> `PortError::Internal`

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    PortError,
};

use crate::adapters::{EVENT_DATES, EVENT_DEPARTMENT, EVENT_EDITION, EVENT_NAME, EVENT_VENUE};
use crate::ports::ReceiptNotifier;

/// Configuration for the HTTP mail notifier
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Gateway endpoint the message is POSTed to
    pub gateway_url: String,
    /// API key sent in the `X-Api-Key` header
    pub api_key: String,
    /// From address
    pub from: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Circuit breaker configuration; `None` disables the breaker
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            gateway_url: String::new(),
            api_key: String::new(),
            from: format!("{} Billing <billing@example.com>", EVENT_NAME),
            timeout_secs: 10,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    last_failure_time: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            last_failure_time: RwLock::new(None),
        }
    }

    async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        // Check if timeout has elapsed
        let last_failure = self.last_failure_time.read().await;
        if let Some(time) = *last_failure {
            if time.elapsed() > Duration::from_secs(self.config.reset_timeout_secs) {
                // Half-open state: allow one request through
                return true;
            }
        }

        false
    }

    fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        let success = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if success >= self.config.success_threshold as u64 {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.config.failure_threshold as u64 {
            self.is_open.store(true, Ordering::Relaxed);
            *self.last_failure_time.write().await = Some(Instant::now());
        }
    }
}

/// The gateway message body
#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    html: String,
}

/// Sends receipt emails through an HTTP mail gateway
#[derive(Debug)]
pub struct HttpMailNotifier {
    config: MailConfig,
    client: reqwest::Client,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl HttpMailNotifier {
    /// Creates a new notifier with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the HTTP client cannot be built.
    pub fn new(config: MailConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::internal(format!("Mail client build failed: {}", e)))?;

        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Ok(Self {
            config,
            client,
            circuit_breaker,
        })
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        if let Some(ref cb) = self.circuit_breaker {
            !cb.is_available().await
        } else {
            false
        }
    }

    async fn note_success(&self) {
        if let Some(ref cb) = self.circuit_breaker {
            cb.record_success();
        }
    }

    async fn note_failure(&self) {
        if let Some(ref cb) = self.circuit_breaker {
            cb.record_failure().await;
        }
    }
}

/// Builds the confirmation email body around the artifact link
fn build_email_html(artifact_url: &str) -> String {
    format!(
        "<div style=\"font-family: 'Segoe UI', sans-serif; color: #333; padding: 20px;\">\n\
         <h2 style=\"color: #E91E63;\">{edition} - Registration Confirmed</h2>\n\
         <p>Hello!</p>\n\
         <p>Thank you for registering for the <strong>{name}</strong> fest organized by the\n\
         <strong>{department}</strong>.</p>\n\
         <p><strong>Dates:</strong> {dates}</p>\n\
         <p><strong>Venue:</strong> {venue}</p>\n\
         <p style=\"margin-top: 20px;\"><a href=\"{url}\" target=\"_blank\">Click here to view/download your bill</a></p>\n\
         <p style=\"color: #888; font-size: 14px; margin-top: 30px;\">Regards,<br /><strong>{edition} Team</strong></p>\n\
         </div>",
        edition = EVENT_EDITION,
        name = EVENT_NAME,
        department = EVENT_DEPARTMENT,
        dates = EVENT_DATES,
        venue = EVENT_VENUE,
        url = artifact_url,
    )
}

fn map_gateway_status(status: StatusCode) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("Mail gateway rejected credentials: {}", status),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: 60,
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("Mail gateway returned {}", s),
        },
        s => PortError::internal(format!("Mail gateway returned {}", s)),
    }
}

impl DomainPort for HttpMailNotifier {}

#[async_trait]
impl HealthCheckable for HttpMailNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "http-mail-notifier".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: start.elapsed().as_millis() as u64,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        HealthCheckResult {
            adapter_id: "http-mail-notifier".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: start.elapsed().as_millis() as u64,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ReceiptNotifier for HttpMailNotifier {
    async fn send(&self, email: &str, artifact_url: &str) -> Result<(), PortError> {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available().await {
                return Err(PortError::ServiceUnavailable {
                    service: "Circuit breaker is open".to_string(),
                });
            }
        }

        let message = MailMessage {
            from: &self.config.from,
            to: email,
            subject: format!("Your Bill for {}", EVENT_EDITION),
            html: build_email_html(artifact_url),
        };

        let response = self
            .client
            .post(&self.config.gateway_url)
            .header("X-Api-Key", &self.config.api_key)
            .json(&message)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                self.note_success().await;
                Ok(())
            }
            Ok(resp) => {
                self.note_failure().await;
                Err(map_gateway_status(resp.status()))
            }
            Err(e) if e.is_timeout() => {
                self.note_failure().await;
                Err(PortError::Timeout {
                    operation: "send_receipt_email".to_string(),
                    duration_ms: self.config.timeout_secs * 1000,
                })
            }
            Err(e) => {
                self.note_failure().await;
                Err(PortError::connection(format!("Mail gateway unreachable: {}", e)))
            }
        }
    }
}
