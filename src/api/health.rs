/// Health and metrics endpoints
use crate::{context::AppContext, metrics};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

/// Health status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "healthy" or "unhealthy"
    pub status: String,
    pub version: String,
    pub total_files: usize,
    pub storage_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build health check routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
}

/// Reports 503 when the content directory is unreachable
pub async fn health_check(State(ctx): State<AppContext>) -> (StatusCode, Json<HealthStatus>) {
    let total_files = ctx.registry.len().await;
    let storage = ctx.blob_store.check().await;

    let (status_code, status, error) = match storage {
        Ok(()) => (StatusCode::OK, "healthy", None),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed: blob storage unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", Some(e.to_string()))
        }
    };

    (
        status_code,
        Json(HealthStatus {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_files,
            storage_available: error.is_none(),
            error,
        }),
    )
}

/// Prometheus text exposition
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::render_metrics(),
    )
}
