/// HTTP API tests
///
/// Drive the full router in-process with `tower::ServiceExt::oneshot`.
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use pdf_vault::{config::ServerConfig, context::AppContext, server::build_router};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    dir: TempDir,
    ctx: AppContext,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    async fn with_config(tweak: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.storage.content_directory = dir.path().join("pdf_storage");
        tweak(&mut config);

        let ctx = AppContext::new(config).await.unwrap();
        let router = build_router(ctx.clone());

        Self { dir, ctx, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn upload(&self, body: Value) -> (StatusCode, Value) {
        self.send_json(
            Request::post("/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "pdf.test")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn cleanup(&self) -> (StatusCode, Value) {
        self.send_json(Request::post("/cleanup").body(Body::empty()).unwrap())
            .await
    }

    fn blob_count(&self) -> usize {
        std::fs::read_dir(self.dir.path().join("pdf_storage"))
            .unwrap()
            .count()
    }

    fn content_dir(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }
}

fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

fn id_of(body: &Value) -> Uuid {
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_upload_then_download_hello() {
    let app = TestApp::new().await;

    let (status, body) = app
        .upload(json!({ "data": encode(b"hello"), "filename": "a.pdf" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["file_size"], 5);
    assert_eq!(body["filename"], "a.pdf");
    assert_eq!(body["id"], body["file_id"]);

    let id = id_of(&body);
    assert_eq!(
        body["download_url"],
        format!("http://pdf.test/download/{}", id)
    );

    let (status, headers, bytes) = app.get(&format!("/download/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"hello");
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("a.pdf"));
}

#[tokio::test]
async fn test_round_trip_is_byte_exact() {
    let app = TestApp::new().await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();

    let (status, body) = app.upload(json!({ "data": encode(&payload) })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, bytes) = app.get(&format!("/download/{}", id_of(&body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, payload);
}

#[tokio::test]
async fn test_data_url_prefix_and_default_filename() {
    let app = TestApp::new().await;

    let data = format!("data:application/pdf;base64,{}", encode(b"%PDF-1.4"));
    let (status, body) = app.upload(json!({ "data": data })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_size"], 8);
    assert_eq!(body["filename"], "relatorio_visita.pdf");
}

#[tokio::test]
async fn test_supplied_filename_is_stored_verbatim() {
    let app = TestApp::new().await;

    let (_, body) = app
        .upload(json!({ "data": encode(b"x"), "filename": " padded.pdf " }))
        .await;
    assert_eq!(body["filename"], " padded.pdf ");

    let (_, body) = app
        .upload(json!({ "data": encode(b"x"), "filename": null }))
        .await;
    assert_eq!(body["filename"], "relatorio_visita.pdf");

    let (_, body) = app
        .upload(json!({ "data": encode(b"x"), "filename": "" }))
        .await;
    assert_eq!(body["filename"], "");
}

#[tokio::test]
async fn test_upload_storage_failure_is_server_error() {
    let app = TestApp::new().await;
    std::fs::remove_dir_all(app.dir.path().join("pdf_storage")).unwrap();

    let (status, body) = app.upload(json!({ "data": encode(b"%PDF") })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(app.ctx.registry.is_empty().await);

    let (_, list) = app.get_json("/list").await;
    assert_eq!(list["total_files"], 0);
}

#[tokio::test]
async fn test_download_url_follows_forwarded_proto() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_json(
            Request::post("/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::HOST, "pdf.test")
                .header("x-forwarded-proto", "https")
                .body(Body::from(json!({ "data": encode(b"x") }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["download_url"],
        format!("https://pdf.test/download/{}", id_of(&body))
    );
}

#[tokio::test]
async fn test_identical_uploads_get_distinct_ids() {
    let app = TestApp::new().await;

    let (_, first) = app.upload(json!({ "data": encode(b"same") })).await;
    let (_, second) = app.upload(json!({ "data": encode(b"same") })).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(app.blob_count(), 2);
}

#[tokio::test]
async fn test_invalid_base64_creates_nothing() {
    let app = TestApp::new().await;

    let (status, body) = app.upload(json!({ "data": "not-base64!!" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid base64 data");
    assert_eq!(app.blob_count(), 0);

    let (_, list) = app.get_json("/list").await;
    assert_eq!(list["total_files"], 0);
}

#[tokio::test]
async fn test_missing_data_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.upload(json!({ "filename": "a.pdf" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "PDF data is required");

    let (status, _) = app
        .send_json(
            Request::post("/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let (status, body) = app.get_json(&format!("/info/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found");

    let (status, _, _) = app.get(&format!("/download/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app.get("/download/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_counter_and_timestamp() {
    let app = TestApp::new().await;
    let (_, body) = app.upload(json!({ "data": encode(b"%PDF") })).await;
    let id = id_of(&body);

    let (_, info) = app.get_json(&format!("/info/{}", id)).await;
    assert_eq!(info["file_info"]["download_count"], 0);
    assert_eq!(info["file_info"]["last_download"], Value::Null);

    for _ in 0..3 {
        let (status, _, _) = app.get(&format!("/download/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let record = app.ctx.registry.get(&id).await.unwrap();
    let (_, info) = app.get_json(&format!("/info/{}", id)).await;
    assert_eq!(info["file_info"]["download_count"], 3);
    assert_eq!(
        info["file_info"]["last_download"],
        serde_json::to_value(record.last_download_time).unwrap()
    );
}

#[tokio::test]
async fn test_info_and_list_redact_storage_path() {
    let app = TestApp::new().await;
    let (_, body) = app
        .upload(json!({ "data": encode(b"%PDF"), "filename": "r.pdf" }))
        .await;
    let id = id_of(&body);

    let (status, info) = app.get_json(&format!("/info/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["success"], true);
    assert_eq!(info["file_info"]["original_filename"], "r.pdf");
    assert_eq!(info["file_info"]["stored_filename"], format!("{}.pdf", id));
    assert_eq!(info["file_info"]["file_hash"].as_str().unwrap().len(), 64);
    assert!(info["file_info"].get("storage_path").is_none());
    assert!(info["file_info"].get("file_path").is_none());
    assert!(!info.to_string().contains(&app.content_dir()));

    let (status, list) = app.get_json("/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total_files"], 1);
    assert_eq!(list["files"][0]["file_id"], id.to_string());
    assert!(!list.to_string().contains(&app.content_dir()));
}

#[tokio::test]
async fn test_cleanup_expires_only_old_files() {
    let app = TestApp::new().await;

    let (_, old) = app.upload(json!({ "data": encode(b"old") })).await;
    let (_, fresh) = app.upload(json!({ "data": encode(b"new") })).await;
    let old_id = id_of(&old);
    let fresh_id = id_of(&fresh);

    let now = Utc::now();
    app.ctx
        .registry
        .update(&old_id, |r| r.upload_time = now - Duration::days(8))
        .await
        .unwrap();
    app.ctx
        .registry
        .update(&fresh_id, |r| r.upload_time = now - Duration::days(6))
        .await
        .unwrap();

    let (status, body) = app.cleanup().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted_files"], 1);

    assert_eq!(app.blob_count(), 1);
    let (_, list) = app.get_json("/list").await;
    assert_eq!(list["total_files"], 1);
    assert_eq!(list["files"][0]["file_id"], fresh_id.to_string());

    let (status, _, _) = app.get(&format!("/download/{}", old_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get_json(&format!("/info/{}", old_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.cleanup().await;
    assert_eq!(body["deleted_files"], 0);
}

#[tokio::test]
async fn test_blob_missing_on_disk_is_not_found() {
    let app = TestApp::new().await;
    let (_, body) = app.upload(json!({ "data": encode(b"%PDF") })).await;
    let id = id_of(&body);

    std::fs::remove_file(
        app.dir
            .path()
            .join("pdf_storage")
            .join(format!("{}.pdf", id)),
    )
    .unwrap();

    let (status, body) = app.send_json(
        Request::get(format!("/download/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found on disk");

    let (_, info) = app.get_json(&format!("/info/{}", id)).await;
    assert_eq!(info["file_info"]["download_count"], 0);
}

#[tokio::test]
async fn test_public_url_overrides_host() {
    let app = TestApp::with_config(|config| {
        config.service.public_url = Some("https://files.example.com".to_string());
    })
    .await;

    let (_, body) = app.upload(json!({ "data": encode(b"x") })).await;
    assert_eq!(
        body["download_url"],
        format!("https://files.example.com/download/{}", id_of(&body))
    );
}

#[tokio::test]
async fn test_configured_upload_limit() {
    let app = TestApp::with_config(|config| {
        config.service.max_upload_bytes = Some(1024);
    })
    .await;

    let (status, _) = app
        .upload(json!({ "data": encode(&vec![0u8; 4096]) }))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_health_and_fallback() {
    let app = TestApp::new().await;

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_available"], true);

    let (status, body) = app.get_json("/no/such/endpoint").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");

    let (status, _, body) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("pdf_uploads_total"));
}

#[tokio::test]
async fn test_fallback_passes_through_layers() {
    let app = TestApp::new().await;

    let (status, headers, _) = app
        .send(
            Request::get("/no/such/endpoint")
                .header(header::ORIGIN, "https://client.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
