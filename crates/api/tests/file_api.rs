//! HTTP-level integration tests for blob upload and download.
//!
//! Tests cover the multipart upload flow, byte-exact round-tripping
//! through the BYTEA store, and the download headers.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, multipart_body, post_multipart};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: upload then download round-trips bytes and metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_download_round_trip(pool: PgPool) {
    // Include non-UTF8 bytes to prove the store is binary-safe.
    let payload: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xFF, 0xFE, 0x0A];

    let app = common::build_test_app(pool.clone());
    let body = multipart_body(
        &[("file", "syllabus.pdf", "application/pdf", &payload)],
        &[],
    );
    let response = post_multipart(app, "/api/v1/upload", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "syllabus.pdf");
    let file_id = json["fileId"].as_i64().expect("fileId should be a number");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/file/{file_id}")).await;

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing Content-Type header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, "application/pdf");

    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("Missing Content-Disposition header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"syllabus.pdf\"");

    let downloaded = body_bytes(response).await;
    assert_eq!(downloaded, payload, "stored bytes must round-trip exactly");
}

// ---------------------------------------------------------------------------
// Test: a multipart body without a `file` field is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_file_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = multipart_body(&[], &[("comment", "no file here")]);
    let response = post_multipart(app, "/api/v1/upload", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file uploaded.");
}

// ---------------------------------------------------------------------------
// Test: fields other than `file` are ignored, the file still lands
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_ignores_extra_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = multipart_body(
        &[("file", "notes.txt", "text/plain", b"some notes")],
        &[("description", "ignored metadata")],
    );
    let response = post_multipart(app, "/api/v1/upload", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "notes.txt");
}

// ---------------------------------------------------------------------------
// Test: downloading an unknown id returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn download_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/file/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "File not found");
}
