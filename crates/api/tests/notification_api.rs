//! HTTP-level integration tests for the notification log endpoints.
//!
//! Tests cover the newest-first listing order and the mark-read flow.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use sqlx::PgPool;
use syllabase_api::auth::password::hash_password;
use syllabase_db::models::user::{CreateUser, User};
use syllabase_db::repositories::{NotificationRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a user directly in the database.
async fn seed_user(pool: &PgPool, email: &str) -> User {
    let hashed = hash_password("seed_password_123!").expect("hashing should succeed");
    let input = CreateUser {
        name: email.split('@').next().unwrap().to_string(),
        email: email.to_string(),
        password_hash: hashed,
        roles: vec!["faculty".to_string()],
        department: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Listing tests
// ---------------------------------------------------------------------------

/// GET /notifications/{userId} returns that user's log, newest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_notifications_newest_first(pool: PgPool) {
    let user = seed_user(&pool, "fac@test.com").await;
    let other = seed_user(&pool, "other@test.com").await;
    NotificationRepo::create(&pool, user.id, "first message")
        .await
        .expect("create should succeed");
    NotificationRepo::create(&pool, user.id, "second message")
        .await
        .expect("create should succeed");
    NotificationRepo::create(&pool, other.id, "not yours")
        .await
        .expect("create should succeed");

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/notifications/{}", user.id);
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let notifications = json.as_array().expect("response body should be an array");
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["message"], "second message");
    assert_eq!(notifications[1]["message"], "first message");
    assert_eq!(notifications[0]["read"], false);
    assert!(notifications[0]["timestamp"].is_string());
}

/// A user with no notifications gets an empty array, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_notifications_empty(pool: PgPool) {
    let user = seed_user(&pool, "quiet@test.com").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/notifications/{}", user.id);
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Mark-read tests
// ---------------------------------------------------------------------------

/// PUT /notifications/{id}/mark-read flips the read flag.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read_flips_flag(pool: PgPool) {
    let user = seed_user(&pool, "fac@test.com").await;
    let notification = NotificationRepo::create(&pool, user.id, "please read me")
        .await
        .expect("create should succeed");
    assert!(!notification.is_read);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{}/mark-read", notification.id);
    let response = put_json(app, &uri, serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["read"], true);
    assert_eq!(json["id"], notification.id);

    let listed = NotificationRepo::list_for_user(&pool, user.id)
        .await
        .expect("listing should succeed");
    assert!(listed[0].is_read, "flag must persist");
}

/// Marking an already-read notification again is harmless.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read_is_idempotent(pool: PgPool) {
    let user = seed_user(&pool, "fac@test.com").await;
    let notification = NotificationRepo::create(&pool, user.id, "read twice")
        .await
        .expect("create should succeed");

    let uri = format!("/api/v1/notifications/{}/mark-read", notification.id);
    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = put_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["read"], true);
}

/// Marking an unknown notification returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read_unknown_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/notifications/9999/mark-read",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Notification not found");
}
