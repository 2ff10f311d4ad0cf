//! HTTP API Layer
//!
//! This crate provides the REST API for the registration back office using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Tracing, request ids, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{config::ApiConfig, create_router, AppState};
//!
//! let state = AppState::from_config(pool, ApiConfig::default())?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_billing::adapters::{
    HtmlReceiptRenderer, HtmlRendererConfig, HttpMailNotifier, LocalArtifactStore,
    LocalArtifactStoreConfig, MailConfig, PdfReceiptRenderer, PdfRendererConfig, S3ArtifactStore,
    S3ArtifactStoreConfig,
};
use domain_billing::{ArtifactStore, BillingService, BillingStore, ReceiptNotifier, ReceiptRenderer};
use domain_fund::FundStore;
use domain_student::StudentDirectory;
use infra_db::{DatabasePool, SqliteBillingStore, SqliteFundStore, SqliteStudentDirectory};

use crate::config::{ApiConfig, ArtifactStoreKind, CorsConfig, ReceiptFormat};
use crate::handlers::{billing, fund, health, student};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DatabasePool,
    pub config: ApiConfig,
    pub billing: Arc<BillingService>,
    pub students: Arc<dyn StudentDirectory>,
    pub fund: Arc<dyn FundStore>,
}

impl AppState {
    /// Builds the state from configuration, wiring the billing collaborators
    ///
    /// Repositories run against the given pool; the renderer, artifact store,
    /// and notifier are chosen by the `receipt`, `artifacts`, and `mail`
    /// config sections.
    pub fn from_config(pool: DatabasePool, config: ApiConfig) -> Result<Self, PortError> {
        let students: Arc<dyn StudentDirectory> =
            Arc::new(SqliteStudentDirectory::new(pool.clone()));
        let store: Arc<dyn BillingStore> = Arc::new(SqliteBillingStore::new(pool.clone()));
        let fund: Arc<dyn FundStore> = Arc::new(SqliteFundStore::new(pool.clone()));

        let renderer: Arc<dyn ReceiptRenderer> = match config.receipt.format {
            ReceiptFormat::Pdf => Arc::new(PdfReceiptRenderer::new(PdfRendererConfig {
                temp_dir: config.receipt.temp_dir.clone(),
                timeout_secs: config.receipt.timeout_secs,
            })),
            ReceiptFormat::Html => Arc::new(HtmlReceiptRenderer::new(HtmlRendererConfig {
                temp_dir: config.receipt.temp_dir.clone(),
                timeout_secs: config.receipt.timeout_secs,
            })),
        };

        let artifacts: Arc<dyn ArtifactStore> = match config.artifacts.kind {
            ArtifactStoreKind::S3 => Arc::new(S3ArtifactStore::new(S3ArtifactStoreConfig {
                endpoint: config.artifacts.s3.endpoint.clone(),
                region: config.artifacts.s3.region.clone(),
                bucket: config.artifacts.s3.bucket.clone(),
                access_key: config.artifacts.s3.access_key.clone(),
                secret_key: config.artifacts.s3.secret_key.clone(),
                public_base_url: config.artifacts.s3.public_base_url.clone(),
                key_prefix: config.artifacts.s3.key_prefix.clone(),
                timeout_secs: config.artifacts.s3.timeout_secs,
            })?),
            ArtifactStoreKind::Local => {
                Arc::new(LocalArtifactStore::new(LocalArtifactStoreConfig {
                    public_dir: config.artifacts.local.public_dir.clone(),
                    base_url: config.artifacts.local.base_url.clone(),
                }))
            }
        };

        let notifier: Arc<dyn ReceiptNotifier> = if config.mail.enabled {
            Arc::new(HttpMailNotifier::new(MailConfig {
                gateway_url: config.mail.gateway_url.clone(),
                api_key: config.mail.api_key.clone(),
                from: config.mail.from.clone(),
                timeout_secs: config.mail.timeout_secs,
                circuit_breaker: Some(CircuitBreakerConfig {
                    failure_threshold: config.mail.failure_threshold,
                    reset_timeout_secs: config.mail.reset_timeout_secs,
                    success_threshold: config.mail.success_threshold,
                }),
            })?)
        } else {
            Arc::new(DisabledNotifier)
        };

        let billing = Arc::new(BillingService::new(
            students.clone(),
            store,
            renderer,
            artifacts,
            notifier,
        ));

        Ok(Self {
            pool,
            config,
            billing,
            students,
            fund,
        })
    }
}

/// Stands in for the mail notifier when delivery is disabled in config
///
/// Billing outcomes report the notification as delivered; the receipt link
/// is only logged.
struct DisabledNotifier;

impl DomainPort for DisabledNotifier {}

#[async_trait]
impl HealthCheckable for DisabledNotifier {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "disabled-mail-notifier".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("Mail delivery disabled by configuration".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ReceiptNotifier for DisabledNotifier {
    async fn send(&self, email: &str, artifact_url: &str) -> Result<(), PortError> {
        debug!(email, artifact_url, "Mail disabled, receipt link not sent");
        Ok(())
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Operational routes, outside the audited /api surface
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Student routes
    let student_routes = Router::new()
        .route("/manual", post(student::add_manual))
        .route("/bulk", post(student::bulk_insert))
        .route("/stats", get(student::stats))
        .route("/roll/:roll_no", get(student::get_by_roll))
        .route("/mark-paid/:roll_no", put(student::mark_paid))
        .route("/:id", put(student::update_student))
        .route("/:id", delete(student::delete_student));

    // Billing routes
    let billing_routes = Router::new()
        .route("/bill", post(billing::bill_student))
        .route("/stats", get(billing::payment_stats))
        .route("/all", get(billing::all_bills))
        // Phone screenshots routinely exceed the 2 MB default body cap.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    // Fund routes
    let fund_routes = Router::new().route("/", get(fund::total_fund));

    let api_routes = Router::new()
        .nest("/students", student_routes)
        .nest("/billings", billing_routes)
        .nest("/fund", fund_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

    // Request ids are set outermost-but-one so the trace span sees them and
    // the propagate layer copies them onto responses.
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&state.config.cors))
        .with_state(state)
}

/// Builds the CORS layer from configuration
///
/// A configured origin that fails to parse falls back to permissive rather
/// than refusing to start.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match &config.allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => cors.allow_origin(value),
            Err(_) => {
                warn!(origin = %origin, "Invalid CORS origin, falling back to permissive");
                cors.allow_origin(Any)
            }
        },
        None => cors.allow_origin(Any),
    }
}
