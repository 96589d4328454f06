/// Metrics and telemetry for PDF Vault
///
/// Prometheus-compatible counters for uploads, downloads and retention sweeps.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // ========== Storage Metrics ==========

    /// Successful uploads
    pub static ref UPLOADS_TOTAL: IntCounter = register_int_counter!(
        "pdf_uploads_total",
        "Total number of stored PDF uploads"
    )
    .unwrap();

    /// Bytes accepted by uploads
    pub static ref UPLOAD_BYTES_TOTAL: IntCounter = register_int_counter!(
        "pdf_upload_bytes_total",
        "Total number of decoded bytes stored by uploads"
    )
    .unwrap();

    /// Download attempts by outcome
    pub static ref DOWNLOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "pdf_downloads_total",
        "Total number of download attempts",
        &["outcome"]
    )
    .unwrap();

    /// Records currently held by the registry
    pub static ref FILES_STORED: IntGauge = register_int_gauge!(
        "pdf_files_stored",
        "Number of records in the metadata registry"
    )
    .unwrap();

    // ========== Retention Metrics ==========

    /// Records removed by the sweeper
    pub static ref FILES_EXPIRED_TOTAL: IntCounter = register_int_counter!(
        "pdf_files_expired_total",
        "Total number of records removed by retention sweeps"
    )
    .unwrap();

    /// Sweep durations by trigger
    pub static ref SWEEP_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "pdf_sweep_duration_seconds",
        "Retention sweep latencies in seconds",
        &["trigger"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .unwrap();

    // ========== Error Metrics ==========

    /// Errors by error type
    pub static ref ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "pdf_errors_total",
        "Total number of failed operations",
        &["error_type", "operation"]
    )
    .unwrap();
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Record a stored upload
pub fn record_upload(size: u64) {
    UPLOADS_TOTAL.inc();
    UPLOAD_BYTES_TOTAL.inc_by(size);
}

/// Record a download attempt
pub fn record_download(outcome: &str) {
    DOWNLOADS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record a completed sweep
pub fn record_sweep(trigger: &str, removed: u64, duration: f64) {
    FILES_EXPIRED_TOTAL.inc_by(removed);
    SWEEP_DURATION_SECONDS
        .with_label_values(&[trigger])
        .observe(duration);
}

/// Track the registry size
pub fn set_files_stored(count: usize) {
    FILES_STORED.set(count as i64);
}

/// Record an error
pub fn record_error(error_type: &str, operation: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, operation])
        .inc();
}
