//! S3 artifact store
//!
//! Uploads rendered receipts to any S3-compatible endpoint (AWS, MinIO) and
//! returns the public URL they are reachable under. Uses a custom region
//! with path-style addressing so MinIO-style endpoints work unchanged.

use async_trait::async_trait;
use chrono::Utc;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use std::time::{Duration, Instant};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::adapters::content_type_for;
use crate::ports::ArtifactStore;
use crate::receipt::RenderedReceipt;

/// Configuration for the S3 artifact store
#[derive(Debug, Clone)]
pub struct S3ArtifactStoreConfig {
    /// Endpoint URL, e.g. `http://localhost:9000` for MinIO
    pub endpoint: String,
    /// Region name; arbitrary for custom endpoints
    pub region: String,
    /// Bucket the artifacts live in
    pub bucket: String,
    /// Access key id
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
    /// Base URL artifacts are publicly reachable under
    pub public_base_url: String,
    /// Key prefix artifacts are stored beneath
    pub key_prefix: String,
    /// Upload timeout in seconds
    pub timeout_secs: u64,
}

impl Default for S3ArtifactStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            region: "us-east-1".to_string(),
            bucket: "receipts".to_string(),
            access_key: String::new(),
            secret_key: String::new(),
            public_base_url: "http://localhost:9000/receipts".to_string(),
            key_prefix: "phase-shift-bills".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Stores artifacts in an S3-compatible bucket
#[derive(Debug)]
pub struct S3ArtifactStore {
    bucket: Bucket,
    config: S3ArtifactStoreConfig,
}

impl S3ArtifactStore {
    /// Creates a new S3 store with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the credentials or bucket handle
    /// cannot be constructed. No network call happens here.
    pub fn new(config: S3ArtifactStoreConfig) -> Result<Self, PortError> {
        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| PortError::internal(format!("S3 credentials invalid: {}", e)))?;

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| PortError::internal(format!("S3 bucket handle failed: {}", e)))?
            .with_path_style();

        Ok(Self { bucket, config })
    }

    fn object_key(&self, object_name: &str) -> String {
        let prefix = self.config.key_prefix.trim_matches('/');
        if prefix.is_empty() {
            object_name.to_string()
        } else {
            format!("{}/{}", prefix, object_name)
        }
    }
}

impl DomainPort for S3ArtifactStore {}

#[async_trait]
impl HealthCheckable for S3ArtifactStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let (status, message) = match self.bucket.head_object(".health-probe").await {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (
                AdapterHealth::Degraded,
                Some(format!("S3 probe failed: {}", e)),
            ),
        };

        HealthCheckResult {
            adapter_id: "s3-artifact-store".to_string(),
            status,
            latency_ms: start.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn upload(&self, receipt: &RenderedReceipt) -> Result<String, PortError> {
        let bytes = tokio::fs::read(&receipt.path)
            .await
            .map_err(|e| PortError::internal(format!("Artifact read failed: {}", e)))?;

        let key = self.object_key(&receipt.object_name);
        let content_type = content_type_for(&receipt.object_name);

        let put = self
            .bucket
            .put_object_with_content_type(&key, &bytes, content_type);
        let response = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), put)
            .await
            .map_err(|_| PortError::Timeout {
                operation: "artifact upload".to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            })?
            .map_err(|e| PortError::connection(format!("S3 put failed: {}", e)))?;

        if response.status_code() != 200 {
            return Err(PortError::ServiceUnavailable {
                service: format!("S3 returned status {}", response.status_code()),
            });
        }

        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key
        ))
    }
}
