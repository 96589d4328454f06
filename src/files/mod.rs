/// Stored PDF management
///
/// Upload, download, inspection and expiry of stored files, plus the request
/// and response shapes used by the HTTP layer.

mod manager;

pub use manager::{DownloadedFile, FileManager};

use crate::{
    error::{VaultError, VaultResult},
    registry::FileInfo,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix browsers put in front of base64 PDFs produced via `FileReader`
pub const DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Display name used when the client does not send one
pub const DEFAULT_FILENAME: &str = "relatorio_visita.pdf";

/// Upload request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Base64 PDF, optionally prefixed with [`DATA_URL_PREFIX`]
    pub data: Option<String>,
    pub filename: Option<String>,
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub id: Uuid,
    pub file_id: Uuid,
    pub download_url: String,
    pub filename: String,
    pub file_size: u64,
}

/// Info response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub success: bool,
    pub file_info: FileInfo,
}

/// List response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub files: Vec<FileInfo>,
    pub total_files: usize,
}

/// Cleanup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub deleted_files: u64,
}

/// Decode an upload payload into raw bytes.
///
/// Strips the data-URL prefix and ASCII whitespace, then requires strict
/// standard base64 with padding.
pub fn decode_payload(data: &str) -> VaultResult<Vec<u8>> {
    let encoded = data.strip_prefix(DATA_URL_PREFIX).unwrap_or(data);
    let cleaned: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(cleaned)
        .map_err(|_| VaultError::InvalidInput("Invalid base64 data".to_string()))
}

/// Display filename for an upload.
///
/// A supplied name is kept verbatim; [`DEFAULT_FILENAME`] only fills in an
/// absent or null one.
pub fn resolve_filename(filename: Option<String>) -> String {
    filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}
