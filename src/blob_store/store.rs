/// Blob Store Manager
///
/// Generates stored names and delegates the byte-level work to a backend
use crate::{
    blob_store::{
        disk::DiskBlobBackend,
        models::{parse_stored_name, stored_name_for},
        BlobBackend, BlobBackendType, StoredBlob,
    },
    error::{VaultError, VaultResult},
};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Blob store configuration
#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    pub backend: BlobBackendType,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            backend: BlobBackendType::Disk {
                location: PathBuf::from("./pdf_storage"),
            },
        }
    }
}

/// Main blob store manager
#[derive(Clone)]
pub struct BlobStore {
    backend: Arc<dyn BlobBackend>,
}

impl BlobStore {
    /// Create a new blob store, initializing the backend
    pub async fn new(config: BlobStoreConfig) -> VaultResult<Self> {
        let backend: Arc<dyn BlobBackend> = match config.backend {
            BlobBackendType::Disk { location } => Arc::new(DiskBlobBackend::open(location).await?),
        };

        Ok(Self { backend })
    }

    /// Persist `data` under a freshly generated name
    pub async fn put(&self, data: &[u8]) -> VaultResult<StoredBlob> {
        let id = Uuid::new_v4();
        let stored_name = stored_name_for(&id);

        self.backend.put(&stored_name, data).await?;

        Ok(StoredBlob {
            id,
            location: self.backend.location(&stored_name),
            stored_name,
            size: data.len() as u64,
        })
    }

    /// Read the full contents of a blob.
    ///
    /// Fails with `BlobMissing` when the backend has no such blob.
    pub async fn get(&self, stored_name: &str) -> VaultResult<Vec<u8>> {
        Self::validate_name(stored_name)?;

        self.backend
            .get(stored_name)
            .await?
            .ok_or_else(|| VaultError::BlobMissing(format!("Blob not found: {}", stored_name)))
    }

    /// Delete a blob; missing blobs are ignored
    pub async fn delete(&self, stored_name: &str) -> VaultResult<()> {
        Self::validate_name(stored_name)?;
        self.backend.delete(stored_name).await
    }

    pub async fn exists(&self, stored_name: &str) -> VaultResult<bool> {
        Self::validate_name(stored_name)?;
        self.backend.exists(stored_name).await
    }

    /// Verify the backing medium is reachable
    pub async fn check(&self) -> VaultResult<()> {
        self.backend.check().await
    }

    fn validate_name(stored_name: &str) -> VaultResult<()> {
        match parse_stored_name(stored_name) {
            Some(_) => Ok(()),
            None => Err(VaultError::NotFound(format!(
                "Invalid stored name: {}",
                stored_name
            ))),
        }
    }
}
