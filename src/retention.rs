/// Retention sweeper
///
/// Removes records, and their blobs, once they are older than the retention
/// window.
use crate::{
    blob_store::BlobStore,
    error::VaultResult,
    registry::MetadataRegistry,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct RetentionSweeper {
    blob_store: Arc<BlobStore>,
    registry: Arc<MetadataRegistry>,
}

impl RetentionSweeper {
    pub fn new(blob_store: Arc<BlobStore>, registry: Arc<MetadataRegistry>) -> Self {
        Self {
            blob_store,
            registry,
        }
    }

    /// Delete every record uploaded strictly before `now - max_age`.
    ///
    /// Blob first, then record. A record whose blob cannot be deleted is kept
    /// so the next sweep retries it. Returns the number of records removed.
    pub async fn sweep(&self, now: DateTime<Utc>, max_age: Duration) -> VaultResult<u64> {
        let cutoff = now - max_age;
        let expired = self.registry.list_older_than(cutoff).await;

        let mut deleted_count = 0;

        for record in expired {
            if let Err(e) = self.blob_store.delete(&record.stored_filename).await {
                tracing::warn!(
                    file_id = %record.id,
                    "Failed to delete expired blob {}: {}",
                    record.stored_filename,
                    e
                );
                continue;
            }

            if self.registry.remove(&record.id).await.is_some() {
                tracing::info!(
                    file_id = %record.id,
                    uploaded = %record.upload_time,
                    "Expired file {}",
                    record.original_filename
                );
                deleted_count += 1;
            }
        }

        if deleted_count > 0 {
            tracing::info!("Retention sweep removed {} files", deleted_count);
        }

        Ok(deleted_count)
    }
}
