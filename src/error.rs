/// Unified error types for PDF Vault
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum VaultError {
    /// Malformed or missing upload payload
    #[error("{0}")]
    InvalidInput(String),

    /// Upload body exceeds the configured cap
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Unknown file id
    #[error("{0}")]
    NotFound(String),

    /// Record exists but its blob is gone from the backing store
    #[error("{0}")]
    BlobMissing(String),

    /// Registry already holds a record with this id
    #[error("Duplicate file id: {0}")]
    DuplicateId(String),

    /// Blob write failures (disk full, permission denied, ...)
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Blob read failures other than "not found"
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VaultError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            VaultError::NotFound(_) | VaultError::BlobMissing(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Convert VaultError to HTTP response
impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
