/// File manager: ties the blob store, hasher, registry and sweeper together
use crate::{
    blob_store::BlobStore,
    error::{VaultError, VaultResult},
    integrity, metrics,
    registry::{FileInfo, FileRecord, MetadataRegistry},
    retention::RetentionSweeper,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// A blob read back for download, with its updated record
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub record: FileRecord,
    pub data: Vec<u8>,
}

/// File manager service
pub struct FileManager {
    blob_store: Arc<BlobStore>,
    registry: Arc<MetadataRegistry>,
    sweeper: RetentionSweeper,
    max_age: Duration,
}

impl FileManager {
    /// Create a new file manager
    pub fn new(
        blob_store: Arc<BlobStore>,
        registry: Arc<MetadataRegistry>,
        max_age: Duration,
    ) -> Self {
        let sweeper = RetentionSweeper::new(Arc::clone(&blob_store), Arc::clone(&registry));

        Self {
            blob_store,
            registry,
            sweeper,
            max_age,
        }
    }

    /// Store decoded PDF bytes and register them.
    ///
    /// Blob write and registry insert are two separate steps. If the insert
    /// fails the blob is left on disk unreferenced.
    pub async fn upload(&self, data: &[u8], filename: String) -> VaultResult<FileRecord> {
        let blob = self.blob_store.put(data).await.map_err(|e| {
            metrics::record_error("storage_write", "upload");
            e
        })?;

        let content_hash = integrity::digest(data);
        let record = FileRecord::new(&blob, filename, content_hash, Utc::now());

        if let Err(e) = self.registry.insert(record.clone()).await {
            tracing::error!(
                file_id = %record.id,
                "Blob {} written but not registered: {}",
                record.stored_filename,
                e
            );
            metrics::record_error("registry_insert", "upload");
            return Err(e);
        }

        metrics::record_upload(record.size_bytes);
        metrics::set_files_stored(self.registry.len().await);

        tracing::info!(
            file_id = %record.id,
            size = record.size_bytes,
            "Stored {}",
            record.original_filename
        );

        Ok(record)
    }

    /// Read a stored file and count the download.
    ///
    /// A failed lookup or read leaves the record untouched.
    pub async fn download(&self, id: &Uuid) -> VaultResult<DownloadedFile> {
        let record = self.registry.get(id).await.map_err(|e| {
            metrics::record_download("not_found");
            e
        })?;

        let data = match self.blob_store.get(&record.stored_filename).await {
            Ok(data) => data,
            Err(VaultError::BlobMissing(_)) => {
                tracing::warn!(
                    file_id = %id,
                    "Record present but blob {} is missing",
                    record.stored_filename
                );
                metrics::record_download("blob_missing");
                return Err(VaultError::BlobMissing("File not found on disk".to_string()));
            }
            Err(e) => {
                metrics::record_error("storage_read", "download");
                return Err(e);
            }
        };

        let record = self
            .registry
            .update(id, |r| r.record_download(Utc::now()))
            .await?;

        metrics::record_download("ok");
        tracing::debug!(file_id = %id, count = record.download_count, "Served download");

        Ok(DownloadedFile { record, data })
    }

    /// Redacted metadata for one file
    pub async fn info(&self, id: &Uuid) -> VaultResult<FileInfo> {
        Ok(self.registry.get(id).await?.to_info())
    }

    /// Redacted metadata for every file, oldest upload first
    pub async fn list(&self) -> Vec<FileInfo> {
        let mut records = self.registry.list_all().await;
        records.sort_by_key(|record| record.upload_time);
        records.iter().map(FileRecord::to_info).collect()
    }

    /// Expire files older than the retention window
    pub async fn cleanup(&self, trigger: &str) -> VaultResult<u64> {
        self.cleanup_at(Utc::now(), trigger).await
    }

    /// Expire files relative to an explicit `now`
    pub async fn cleanup_at(&self, now: DateTime<Utc>, trigger: &str) -> VaultResult<u64> {
        let start = Instant::now();
        let removed = self.sweeper.sweep(now, self.max_age).await?;

        metrics::record_sweep(trigger, removed, start.elapsed().as_secs_f64());
        metrics::set_files_stored(self.registry.len().await);

        Ok(removed)
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}
