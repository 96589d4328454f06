/// Configuration management for PDF Vault
use crate::error::{VaultError, VaultResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub retention: RetentionConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    /// Externally reachable base URL used for download links
    pub public_url: Option<String>,
    /// Upload body cap in bytes; `None` leaves uploads unbounded
    pub max_upload_bytes: Option<usize>,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `{id}.pdf` blobs
    pub content_directory: PathBuf,
}

/// Retention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub max_age_days: i64,
    /// Period of the background sweep; `None` means sweeps only run on `POST /cleanup`
    pub cleanup_interval_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives come from `RUST_LOG`; this only selects the output shape
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                hostname: "0.0.0.0".to_string(),
                port: 5000,
                public_url: None,
                max_upload_bytes: None,
            },
            storage: StorageConfig {
                content_directory: PathBuf::from("./pdf_storage"),
            },
            retention: RetentionConfig {
                max_age_days: 7,
                cleanup_interval_secs: None,
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> VaultResult<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let hostname =
            env::var("PDF_VAULT_HOSTNAME").unwrap_or(defaults.service.hostname);
        let port = match env::var("PDF_VAULT_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| VaultError::Config("Invalid port number".to_string()))?,
            Err(_) => defaults.service.port,
        };
        let public_url = env::var("PDF_VAULT_PUBLIC_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        let max_upload_bytes = match env::var("PDF_VAULT_MAX_UPLOAD_BYTES") {
            Ok(limit) => Some(limit.parse().map_err(|_| {
                VaultError::Config("Invalid PDF_VAULT_MAX_UPLOAD_BYTES".to_string())
            })?),
            Err(_) => None,
        };

        let content_directory = env::var("PDF_VAULT_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.content_directory);

        let max_age_days = match env::var("PDF_VAULT_RETENTION_DAYS") {
            Ok(days) => days
                .parse()
                .map_err(|_| VaultError::Config("Invalid PDF_VAULT_RETENTION_DAYS".to_string()))?,
            Err(_) => defaults.retention.max_age_days,
        };
        let cleanup_interval_secs = match env::var("PDF_VAULT_CLEANUP_INTERVAL_SECS") {
            Ok(secs) => Some(secs.parse().map_err(|_| {
                VaultError::Config("Invalid PDF_VAULT_CLEANUP_INTERVAL_SECS".to_string())
            })?),
            Err(_) => None,
        };

        let format = match env::var("PDF_VAULT_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                public_url,
                max_upload_bytes,
            },
            storage: StorageConfig { content_directory },
            retention: RetentionConfig {
                max_age_days,
                cleanup_interval_secs,
            },
            logging: LoggingConfig { format },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> VaultResult<()> {
        if self.service.hostname.is_empty() {
            return Err(VaultError::Config("Hostname cannot be empty".to_string()));
        }

        if self.retention.max_age_days <= 0 {
            return Err(VaultError::Config(
                "Retention must be at least one day".to_string(),
            ));
        }

        if self.retention.cleanup_interval_secs == Some(0) {
            return Err(VaultError::Config(
                "Cleanup interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Retention window as a chrono duration
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention.max_age_days)
    }

    /// Base URL derived from the bind address
    pub fn service_url(&self) -> String {
        format!("http://{}:{}", self.service.hostname, self.service.port)
    }
}
