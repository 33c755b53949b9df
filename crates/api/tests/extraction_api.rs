//! Integration tests for the syllabus extraction endpoint.
//!
//! The test app is built without a model client, so these cover the
//! upload validation paths and the unconfigured-model error; the model
//! round-trip itself is exercised in the docgen crate.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

const EXTRACT_URI: &str = "/api/v1/extract-syllabus";

// ---------------------------------------------------------------------------
// Test: the `file` field is mandatory
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_requires_a_file_field(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = common::multipart_body(&[], &[("note", "no file here")]);
    let response = common::post_multipart(app, EXTRACT_URI, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: uploads without an extension are rejected before any model call
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_rejects_missing_extension(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = common::multipart_body(
        &[("file", "README", "application/octet-stream", b"some text")],
        &[],
    );
    let response = common::post_multipart(app, EXTRACT_URI, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "File extension not found");
}

// ---------------------------------------------------------------------------
// Test: only txt, docx and pdf uploads are accepted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_rejects_unsupported_file_types(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = common::multipart_body(&[("file", "diagram.png", "image/png", b"\x89PNG")], &[]);
    let response = common::post_multipart(app, EXTRACT_URI, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "Unsupported file type: .png");
}

// ---------------------------------------------------------------------------
// Test: without a configured model the endpoint fails closed, and the
// missing key is not leaked to the client
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_without_model_reports_internal_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = common::multipart_body(
        &[("file", "notes.txt", "text/plain", b"Unit 1: introduction")],
        &[],
    );
    let response = common::post_multipart(app, EXTRACT_URI, body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("GEMINI"));
}
