/// In-memory metadata registry
///
/// The single source of truth for which files exist. Nothing here is
/// persisted: a restart forgets every record while blobs stay on disk.

pub mod models;

pub use models::{FileInfo, FileRecord};

use crate::error::{VaultError, VaultResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Registry of file records keyed by id
///
/// All operations go through one lock, so each call observes and leaves a
/// consistent map.
#[derive(Default)]
pub struct MetadataRegistry {
    records: Mutex<HashMap<Uuid, FileRecord>>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new record; an existing id is rejected
    pub async fn insert(&self, record: FileRecord) -> VaultResult<()> {
        let mut records = self.records.lock().await;

        if records.contains_key(&record.id) {
            return Err(VaultError::DuplicateId(record.id.to_string()));
        }

        records.insert(record.id, record);
        Ok(())
    }

    /// Look up a record
    pub async fn get(&self, id: &Uuid) -> VaultResult<FileRecord> {
        self.records
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| VaultError::NotFound("File not found".to_string()))
    }

    /// Apply `mutator` to a record while holding the lock, returning the result
    pub async fn update<F>(&self, id: &Uuid, mutator: F) -> VaultResult<FileRecord>
    where
        F: FnOnce(&mut FileRecord),
    {
        let mut records = self.records.lock().await;

        let record = records
            .get_mut(id)
            .ok_or_else(|| VaultError::NotFound("File not found".to_string()))?;
        mutator(record);

        Ok(record.clone())
    }

    /// Remove a record if present
    pub async fn remove(&self, id: &Uuid) -> Option<FileRecord> {
        self.records.lock().await.remove(id)
    }

    /// Snapshot of every record, in no particular order
    pub async fn list_all(&self) -> Vec<FileRecord> {
        self.records.lock().await.values().cloned().collect()
    }

    /// Records uploaded strictly before `cutoff`
    pub async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Vec<FileRecord> {
        self.records
            .lock()
            .await
            .values()
            .filter(|record| record.is_older_than(cutoff))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
