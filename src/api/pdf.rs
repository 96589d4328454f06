/// PDF upload, download and management endpoints
use crate::{
    context::AppContext,
    error::{VaultError, VaultResult},
    files::{
        decode_payload, resolve_filename, CleanupResponse, InfoResponse, ListResponse,
        UploadRequest, UploadResponse,
    },
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Build PDF routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/upload", post(upload_pdf))
        .route("/download/:file_id", get(download_pdf))
        .route("/info/:file_id", get(get_pdf_info))
        .route("/list", get(list_pdfs))
        .route("/cleanup", post(cleanup_old_files))
}

/// Store a base64-encoded PDF
///
/// Body: `{"data": "<base64>", "filename": "optional.pdf"}`
async fn upload_pdf(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> VaultResult<Json<UploadResponse>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(VaultError::PayloadTooLarge("PDF exceeds upload limit".to_string()));
        }
        Err(rejection) => {
            tracing::debug!("Rejected upload body: {}", rejection);
            return Err(VaultError::InvalidInput("PDF data is required".to_string()));
        }
    };

    let data = request
        .data
        .ok_or_else(|| VaultError::InvalidInput("PDF data is required".to_string()))?;
    let bytes = decode_payload(&data)?;
    let filename = resolve_filename(request.filename);

    let record = ctx.file_manager.upload(&bytes, filename).await?;

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let forwarded_proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok());
    let download_url = format!(
        "{}/download/{}",
        ctx.public_base_url(host, forwarded_proto),
        record.id
    );

    Ok(Json(UploadResponse {
        success: true,
        id: record.id,
        file_id: record.id,
        download_url,
        filename: record.original_filename,
        file_size: record.size_bytes,
    }))
}

/// Serve a stored PDF as an attachment
async fn download_pdf(
    State(ctx): State<AppContext>,
    Path(file_id): Path<String>,
) -> VaultResult<Response> {
    let id = parse_file_id(&file_id)?;
    let file = ctx.file_manager.download(&id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, file.data.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&file.record.original_filename),
        )
        .body(Body::from(file.data))
        .map_err(|e| VaultError::Internal(format!("Failed to build download response: {}", e)))
}

/// Metadata for one stored PDF
async fn get_pdf_info(
    State(ctx): State<AppContext>,
    Path(file_id): Path<String>,
) -> VaultResult<Json<InfoResponse>> {
    let id = parse_file_id(&file_id)?;
    let file_info = ctx.file_manager.info(&id).await?;

    Ok(Json(InfoResponse {
        success: true,
        file_info,
    }))
}

/// Metadata for every stored PDF (operational/debug view, not paginated)
async fn list_pdfs(State(ctx): State<AppContext>) -> VaultResult<Json<ListResponse>> {
    let files = ctx.file_manager.list().await;

    Ok(Json(ListResponse {
        success: true,
        total_files: files.len(),
        files,
    }))
}

/// Expire files past the retention window
async fn cleanup_old_files(State(ctx): State<AppContext>) -> VaultResult<Json<CleanupResponse>> {
    let deleted_files = ctx.file_manager.cleanup("manual").await?;

    Ok(Json(CleanupResponse {
        success: true,
        deleted_files,
    }))
}

/// Ids that do not parse can never have been issued
fn parse_file_id(file_id: &str) -> VaultResult<Uuid> {
    Uuid::parse_str(file_id).map_err(|_| VaultError::NotFound("File not found".to_string()))
}

/// Build an `attachment` Content-Disposition for an untrusted filename.
///
/// The quoted `filename` is a printable-ASCII fallback; non-ASCII names are
/// also sent percent-encoded in `filename*` (RFC 5987).
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}
