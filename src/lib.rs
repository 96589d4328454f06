/// PDF Vault - PDF blob storage service
///
/// Clients upload base64-encoded PDFs, receive an id and download URL, and
/// can later download, inspect, list or expire the stored files.

pub mod api;
pub mod blob_store;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod integrity;
pub mod jobs;
pub mod metrics;
pub mod registry;
pub mod retention;
pub mod server;
