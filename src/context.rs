/// Application context and dependency injection
use crate::{
    blob_store::{BlobBackendType, BlobStore, BlobStoreConfig},
    config::ServerConfig,
    error::VaultResult,
    files::FileManager,
    registry::MetadataRegistry,
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub blob_store: Arc<BlobStore>,
    pub registry: Arc<MetadataRegistry>,
    pub file_manager: Arc<FileManager>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> VaultResult<Self> {
        // Validate configuration
        config.validate()?;

        // Initialize blob store (creates the content directory)
        let blob_store_config = BlobStoreConfig {
            backend: BlobBackendType::Disk {
                location: config.storage.content_directory.clone(),
            },
        };
        let blob_store = Arc::new(BlobStore::new(blob_store_config).await?);

        // Metadata lives only as long as the process
        let registry = Arc::new(MetadataRegistry::new());

        let file_manager = Arc::new(FileManager::new(
            Arc::clone(&blob_store),
            Arc::clone(&registry),
            config.max_age(),
        ));

        tracing::info!(
            "Storing PDFs in {:?} (retention {} days)",
            config.storage.content_directory,
            config.retention.max_age_days
        );

        Ok(Self {
            config: Arc::new(config),
            blob_store,
            registry,
            file_manager,
        })
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        self.config.service_url()
    }

    /// Base URL for download links.
    ///
    /// Prefers the configured public URL, then the request's `Host` header.
    /// The scheme for a `Host`-derived URL comes from `X-Forwarded-Proto`
    /// when a proxy sets it to `http` or `https`, else `http`.
    pub fn public_base_url(&self, host: Option<&str>, forwarded_proto: Option<&str>) -> String {
        if let Some(url) = &self.config.service.public_url {
            return url.clone();
        }

        // Chained proxies append; the first entry is the client-facing hop
        let https = forwarded_proto
            .and_then(|p| p.split(',').next())
            .is_some_and(|p| p.trim().eq_ignore_ascii_case("https"));
        let scheme = if https { "https" } else { "http" };

        match host {
            Some(host) if !host.is_empty() => format!("{}://{}", scheme, host),
            _ => self.service_url(),
        }
    }
}
