//! Local filesystem artifact store
//!
//! Development and test stand-in for the S3 store: copies the artifact into
//! a directory the HTTP server serves statically and returns its URL path.
//! The temp file itself is left for the caller to remove.

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::ports::ArtifactStore;
use crate::receipt::RenderedReceipt;

/// Configuration for the local artifact store
#[derive(Debug, Clone)]
pub struct LocalArtifactStoreConfig {
    /// Directory served statically by the HTTP server
    pub public_dir: PathBuf,
    /// URL path the directory is mounted under
    pub base_url: String,
}

impl Default for LocalArtifactStoreConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public/bills"),
            base_url: "/bills".to_string(),
        }
    }
}

/// Stores artifacts in a locally served directory
#[derive(Debug)]
pub struct LocalArtifactStore {
    config: LocalArtifactStoreConfig,
}

impl LocalArtifactStore {
    /// Creates a new local store with the given configuration
    pub fn new(config: LocalArtifactStoreConfig) -> Self {
        Self { config }
    }
}

impl DomainPort for LocalArtifactStore {}

#[async_trait]
impl HealthCheckable for LocalArtifactStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let (status, message) = match tokio::fs::create_dir_all(&self.config.public_dir).await {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (
                AdapterHealth::Unhealthy,
                Some(format!("Public dir unavailable: {}", e)),
            ),
        };

        HealthCheckResult {
            adapter_id: "local-artifact-store".to_string(),
            status,
            latency_ms: start.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn upload(&self, receipt: &RenderedReceipt) -> Result<String, PortError> {
        tokio::fs::create_dir_all(&self.config.public_dir)
            .await
            .map_err(|e| PortError::internal(format!("Public dir create failed: {}", e)))?;

        let target = self.config.public_dir.join(&receipt.object_name);
        tokio::fs::copy(&receipt.path, &target)
            .await
            .map_err(|e| PortError::internal(format!("Artifact copy failed: {}", e)))?;

        Ok(format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            receipt.object_name
        ))
    }
}
