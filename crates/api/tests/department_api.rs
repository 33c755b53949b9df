//! HTTP-level integration tests for department management endpoints.
//!
//! Tests cover creation with the unique-name check, the HOD back-write
//! onto user rows, the resolved listing, partial updates, and HOD
//! reassignment.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use sqlx::PgPool;
use syllabase_api::auth::password::hash_password;
use syllabase_db::models::user::{CreateUser, User};
use syllabase_db::repositories::{DepartmentRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a user directly in the database.
async fn seed_user(pool: &PgPool, email: &str, roles: &[&str]) -> User {
    let hashed = hash_password("seed_password_123!").expect("hashing should succeed");
    let input = CreateUser {
        name: email.split('@').next().unwrap().to_string(),
        email: email.to_string(),
        password_hash: hashed,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        department: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Creation tests
// ---------------------------------------------------------------------------

/// POST /create-department creates the department and back-writes the
/// department name onto the HOD's user row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_department_with_hod(pool: PgPool) {
    let hod = seed_user(&pool, "hod@test.com", &["hod"]).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Computer Science", "hodId": hod.id });
    let response = post_json(app, "/api/v1/create-department", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Department created successfully");
    assert_eq!(json["department"]["name"], "Computer Science");
    assert_eq!(json["department"]["hod"], hod.id);

    // The HOD's user row now carries the department name.
    let updated_hod = UserRepo::find_by_id(&pool, hod.id).await.unwrap().unwrap();
    assert_eq!(updated_hod.department.as_deref(), Some("Computer Science"));
}

/// A department can be created without an HOD.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_department_without_hod(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Mathematics" });
    let response = post_json(app, "/api/v1/create-department", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["department"]["hod"].is_null());
}

/// A missing or blank name is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_department_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "   " });
    let response = post_json(app, "/api/v1/create-department", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Department name is required");
}

/// Duplicate department names are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_department_rejects_duplicate(pool: PgPool) {
    DepartmentRepo::create(&pool, "Physics", None)
        .await
        .expect("seed should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Physics" });
    let response = post_json(app, "/api/v1/create-department", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Department already exists");
}

// ---------------------------------------------------------------------------
// Listing tests
// ---------------------------------------------------------------------------

/// GET /departments resolves HOD names, with "Not Assigned" for vacancies.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_departments_resolves_hod_names(pool: PgPool) {
    let hod = seed_user(&pool, "head@test.com", &["hod"]).await;
    DepartmentRepo::create(&pool, "CSE", Some(hod.id))
        .await
        .expect("seed should succeed");
    DepartmentRepo::create(&pool, "ECE", None)
        .await
        .expect("seed should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/departments").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let departments = json.as_array().expect("response body should be an array");
    assert_eq!(departments.len(), 2);

    let cse = departments.iter().find(|d| d["name"] == "CSE").unwrap();
    assert_eq!(cse["hodName"], "head");

    let ece = departments.iter().find(|d| d["name"] == "ECE").unwrap();
    assert_eq!(ece["hodName"], "Not Assigned");
}

// ---------------------------------------------------------------------------
// Update tests
// ---------------------------------------------------------------------------

/// PUT /departments/{id} renames; absent fields keep current values.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_department_renames(pool: PgPool) {
    let hod = seed_user(&pool, "hod@test.com", &["hod"]).await;
    let department = DepartmentRepo::create(&pool, "CS", Some(hod.id))
        .await
        .expect("seed should succeed");

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/departments/{}", department.id);
    let body = serde_json::json!({ "name": "Computer Science" });
    let response = put_json(app, &uri, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Updated successfully");
    assert_eq!(json["data"]["name"], "Computer Science");
    assert_eq!(json["data"]["hod"], hod.id, "absent hod field must keep the current one");
}

/// Updating an unknown department returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_department_unknown_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Ghost" });
    let response = put_json(app, "/api/v1/departments/9999", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Department not found");
}

// ---------------------------------------------------------------------------
// HOD reassignment tests
// ---------------------------------------------------------------------------

/// PUT /change-hod swaps the HOD and back-writes the department name.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_hod(pool: PgPool) {
    let old_hod = seed_user(&pool, "old@test.com", &["hod"]).await;
    let new_hod = seed_user(&pool, "new@test.com", &["hod"]).await;
    let department = DepartmentRepo::create(&pool, "CSE", Some(old_hod.id))
        .await
        .expect("seed should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "departmentId": department.id, "newHodId": new_hod.id
    });
    let response = put_json(app, "/api/v1/change-hod", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "HOD updated successfully");

    let updated = DepartmentRepo::find_by_id(&pool, department.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.hod_id, Some(new_hod.id));

    let updated_new_hod = UserRepo::find_by_id(&pool, new_hod.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated_new_hod.department.as_deref(), Some("CSE"));
}

/// change-hod requires both ids.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_hod_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "departmentId": 1 });
    let response = put_json(app, "/api/v1/change-hod", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required fields");
}

/// change-hod on an unknown department returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_hod_unknown_department(pool: PgPool) {
    let hod = seed_user(&pool, "hod@test.com", &["hod"]).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "departmentId": 9999, "newHodId": hod.id });
    let response = put_json(app, "/api/v1/change-hod", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
