/// Blob Storage System
///
/// Holds the raw PDF bytes. Blobs are addressed by a server-generated stored
/// name (`{id}.pdf`) so client-supplied filenames never reach the filesystem.

pub mod disk;
pub mod models;
pub mod store;

pub use models::StoredBlob;
pub use store::{BlobStore, BlobStoreConfig};

use crate::error::VaultResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// Blob storage backend trait
///
/// Implementations handle the actual storage and retrieval of blob data.
/// Names passed in have already been validated by [`BlobStore`].
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Store a new blob; fails if the name is already taken
    async fn put(&self, name: &str, data: &[u8]) -> VaultResult<()>;

    /// Retrieve a blob by name, `None` if it does not exist
    async fn get(&self, name: &str) -> VaultResult<Option<Vec<u8>>>;

    /// Delete a blob by name. Deleting a missing blob succeeds.
    async fn delete(&self, name: &str) -> VaultResult<()>;

    /// Check if a blob exists
    async fn exists(&self, name: &str) -> VaultResult<bool>;

    /// Resolved location of a blob, for internal bookkeeping only
    fn location(&self, name: &str) -> String;

    /// Verify the backing medium is reachable
    async fn check(&self) -> VaultResult<()>;
}

/// Backend types for blob storage
#[derive(Debug, Clone)]
pub enum BlobBackendType {
    /// Store blobs as flat files in a local directory
    Disk { location: PathBuf },
}
