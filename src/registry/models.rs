/// File metadata models
use crate::blob_store::StoredBlob;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one stored PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: Uuid,
    /// Client-supplied display name (untrusted)
    pub original_filename: String,
    /// `{id}.pdf`
    pub stored_filename: String,
    /// Resolved blob location; never leaves the process
    pub storage_path: String,
    pub upload_time: DateTime<Utc>,
    pub size_bytes: u64,
    pub content_hash: String,
    pub download_count: u64,
    pub last_download_time: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl FileRecord {
    /// Build the record for a blob that has just been written
    pub fn new(
        blob: &StoredBlob,
        original_filename: impl Into<String>,
        content_hash: impl Into<String>,
        upload_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: blob.id,
            original_filename: original_filename.into(),
            stored_filename: blob.stored_name.clone(),
            storage_path: blob.location.clone(),
            upload_time,
            size_bytes: blob.size,
            content_hash: content_hash.into(),
            download_count: 0,
            last_download_time: None,
            is_active: true,
        }
    }

    /// Count a download made at `at`.
    ///
    /// The timestamp never moves backwards even if the clock does.
    pub fn record_download(&mut self, at: DateTime<Utc>) {
        self.download_count += 1;
        self.last_download_time = Some(match self.last_download_time {
            Some(previous) if previous > at => previous,
            _ => at,
        });
    }

    /// True when the record was uploaded strictly before `cutoff`
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.upload_time < cutoff
    }

    /// Externally visible view with the storage path removed
    pub fn to_info(&self) -> FileInfo {
        FileInfo {
            file_id: self.id,
            original_filename: self.original_filename.clone(),
            stored_filename: self.stored_filename.clone(),
            upload_time: self.upload_time,
            file_size: self.size_bytes,
            file_hash: self.content_hash.clone(),
            download_count: self.download_count,
            last_download: self.last_download_time,
            is_active: self.is_active,
        }
    }
}

/// Record as returned by `/info` and `/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: Uuid,
    pub original_filename: String,
    pub stored_filename: String,
    pub upload_time: DateTime<Utc>,
    pub file_size: u64,
    pub file_hash: String,
    pub download_count: u64,
    pub last_download: Option<DateTime<Utc>>,
    pub is_active: bool,
}
