//! API configuration
//!
//! Loaded from the environment with the `API` prefix and `__` as the nesting
//! separator, e.g. `API__SERVER__PORT=5000` or `API__MAIL__ENABLED=true`.
//! Every section has local-development defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level API configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub cors: CorsConfig,
    pub uploads: UploadsConfig,
    pub receipt: ReceiptConfig,
    pub artifacts: ArtifactsConfig,
    pub mail: MailSettings,
    pub log: LogConfig,
}

/// HTTP server binding
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://backoffice.db".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

/// CORS policy; `None` allows any origin
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origin: Option<String>,
}

/// Where uploaded payment screenshots land
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub screenshot_dir: PathBuf,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: PathBuf::from("uploads/screenshots"),
        }
    }
}

/// Receipt artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFormat {
    Pdf,
    Html,
}

/// Receipt rendering settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub format: ReceiptFormat,
    pub temp_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            format: ReceiptFormat::Pdf,
            temp_dir: std::env::temp_dir(),
            timeout_secs: 10,
        }
    }
}

/// Which artifact store backs receipt publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStoreKind {
    S3,
    Local,
}

/// Artifact store selection plus per-backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub kind: ArtifactStoreKind,
    pub s3: S3Settings,
    pub local: LocalStoreSettings,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            kind: ArtifactStoreKind::Local,
            s3: S3Settings::default(),
            local: LocalStoreSettings::default(),
        }
    }
}

/// S3-compatible artifact store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub public_base_url: String,
    pub key_prefix: String,
    pub timeout_secs: u64,
}

impl Default for S3Settings {
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

/// Local artifact store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalStoreSettings {
    pub public_dir: PathBuf,
    pub base_url: String,
}

impl Default for LocalStoreSettings {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public/bills"),
            base_url: "/bills".to_string(),
        }
    }
}

/// Mail gateway settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub enabled: bool,
    pub gateway_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout_secs: u64,
    pub failure_threshold: u32,
    pub reset_timeout_secs: u64,
    pub success_threshold: u32,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            gateway_url: String::new(),
            api_key: String::new(),
            from: "Phase Shift Billing <billing@example.com>".to_string(),
            timeout_secs: 10,
            failure_threshold: 5,
            reset_timeout_secs: 30,
            success_threshold: 3,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
