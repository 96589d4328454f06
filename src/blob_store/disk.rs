/// Disk-based blob storage backend
use crate::{
    blob_store::BlobBackend,
    error::{VaultError, VaultResult},
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};

/// Disk storage backend
///
/// Stores every blob directly under the content directory as `{name}`.
#[derive(Clone)]
pub struct DiskBlobBackend {
    base_path: PathBuf,
}

impl DiskBlobBackend {
    /// Open the backend, creating the content directory if it is absent
    pub async fn open(base_path: PathBuf) -> VaultResult<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            VaultError::StorageWrite(format!(
                "Failed to create content directory {:?}: {}",
                base_path, e
            ))
        })?;

        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn get_blob_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

/// Write `data` through `writer`, removing the partial file at `path` on failure
async fn write_or_discard<W>(mut writer: W, path: &Path, data: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let result = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if result.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!("Failed to discard partial blob {:?}: {}", path, e);
        }
    }

    result
}

#[async_trait]
impl BlobBackend for DiskBlobBackend {
    async fn put(&self, name: &str, data: &[u8]) -> VaultResult<()> {
        let blob_path = self.get_blob_path(name);

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&blob_path)
            .await
            .map_err(|e| {
                VaultError::StorageWrite(format!("Failed to create blob {}: {}", name, e))
            })?;

        write_or_discard(file, &blob_path, data).await.map_err(|e| {
            VaultError::StorageWrite(format!("Failed to write blob {}: {}", name, e))
        })?;

        tracing::debug!("Saved blob to {:?}", blob_path);
        Ok(())
    }

    async fn get(&self, name: &str) -> VaultResult<Option<Vec<u8>>> {
        let blob_path = self.get_blob_path(name);

        match fs::read(&blob_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::StorageRead(format!(
                "Failed to read blob {}: {}",
                name, e
            ))),
        }
    }

    async fn delete(&self, name: &str) -> VaultResult<()> {
        let blob_path = self.get_blob_path(name);

        match fs::remove_file(&blob_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::StorageWrite(format!(
                "Failed to delete blob {}: {}",
                name, e
            ))),
        }
    }

    async fn exists(&self, name: &str) -> VaultResult<bool> {
        let blob_path = self.get_blob_path(name);
        Ok(fs::try_exists(&blob_path).await?)
    }

    fn location(&self, name: &str) -> String {
        self.get_blob_path(name).to_string_lossy().into_owned()
    }

    async fn check(&self) -> VaultResult<()> {
        let metadata = fs::metadata(&self.base_path).await.map_err(|e| {
            VaultError::StorageRead(format!(
                "Content directory {:?} unavailable: {}",
                self.base_path, e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(VaultError::StorageRead(format!(
                "Content path {:?} is not a directory",
                self.base_path
            )));
        }

        Ok(())
    }
}
