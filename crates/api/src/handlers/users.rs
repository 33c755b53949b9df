//! User provisioning and lookup handlers.
//!
//! The three `assign-*` endpoints share one upsert shape: an unknown
//! email gets a fresh account carrying the role; a known email gets the
//! role appended to its existing account (a no-op when already held, so
//! repeated submissions are safe). Only the response wording differs
//! per role, and the department field is only meaningful for HODs.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use syllabase_core::roles::{ROLE_FACULTY, ROLE_HOD, ROLE_SUBJECT_EXPERT};
use syllabase_db::models::user::{CreateUser, HodSummary, UserResponse, UserSummary};
use syllabase_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireHod, RequireSuperuser};
use crate::state::AppState;

/// Request body shared by the `assign-*` endpoints.
#[derive(Debug, Deserialize)]
pub struct AssignUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub department: Option<String>,
}

/// Response body shared by the `assign-*` endpoints.
#[derive(Debug, Serialize)]
pub struct AssignUserResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Query string for `GET /by-role`.
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    #[serde(default)]
    pub role: Option<String>,
}

/// Response wording per role; the upsert flow is otherwise identical.
struct RoleMessages {
    already: &'static str,
    added: &'static str,
    created: &'static str,
}

const FACULTY_MESSAGES: RoleMessages = RoleMessages {
    already: "User already has faculty role",
    added: "Faculty role added to existing user",
    created: "Faculty created",
};

const HOD_MESSAGES: RoleMessages = RoleMessages {
    already: "User already has HOD role",
    added: "HOD role added to existing user",
    created: "HOD created successfully",
};

const EXPERT_MESSAGES: RoleMessages = RoleMessages {
    already: "User already has subject-expert role",
    added: "Expert role added to existing user",
    created: "Expert created",
};

/// POST /api/v1/assign-faculty (HOD only)
pub async fn assign_faculty(
    State(state): State<AppState>,
    RequireHod(_actor): RequireHod,
    Json(mut input): Json<AssignUserRequest>,
) -> AppResult<(StatusCode, Json<AssignUserResponse>)> {
    input.department = None;
    assign_role(&state, input, ROLE_FACULTY, &FACULTY_MESSAGES).await
}

/// POST /api/v1/assign-hod (superuser only)
pub async fn assign_hod(
    State(state): State<AppState>,
    RequireSuperuser(_actor): RequireSuperuser,
    Json(input): Json<AssignUserRequest>,
) -> AppResult<(StatusCode, Json<AssignUserResponse>)> {
    assign_role(&state, input, ROLE_HOD, &HOD_MESSAGES).await
}

/// POST /api/v1/assign-expert
pub async fn assign_expert(
    State(state): State<AppState>,
    Json(mut input): Json<AssignUserRequest>,
) -> AppResult<(StatusCode, Json<AssignUserResponse>)> {
    input.department = None;
    assign_role(&state, input, ROLE_SUBJECT_EXPERT, &EXPERT_MESSAGES).await
}

/// GET /api/v1/by-role?role=<role>
///
/// Name/email summaries of every user holding the role. Used by the
/// assignment pickers on the HOD dashboard.
pub async fn list_by_role(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let role = query
        .role
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::BadRequest("Role query parameter is required".into()))?;
    let users = UserRepo::list_by_role(&state.pool, &role).await?;
    Ok(Json(users))
}

/// GET /api/v1/hods
pub async fn list_hods(State(state): State<AppState>) -> AppResult<Json<Vec<HodSummary>>> {
    let hods = UserRepo::list_hods(&state.pool).await?;
    Ok(Json(hods))
}

// ---- private helpers ----

/// Create-or-extend a user account with the given role.
async fn assign_role(
    state: &AppState,
    input: AssignUserRequest,
    role: &str,
    messages: &RoleMessages,
) -> AppResult<(StatusCode, Json<AssignUserResponse>)> {
    if let Some(existing) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if existing.has_role(role) {
            return Ok((
                StatusCode::OK,
                Json(AssignUserResponse {
                    message: messages.already.into(),
                    user: existing.into(),
                }),
            ));
        }
        let updated = UserRepo::add_role(&state.pool, existing.id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        tracing::info!(user_id = updated.id, role, "Role added to existing user");
        return Ok((
            StatusCode::OK,
            Json(AssignUserResponse {
                message: messages.added.into(),
                user: updated.into(),
            }),
        ));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            roles: vec![role.to_string()],
            department: input.department,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, role, "User account created");

    Ok((
        StatusCode::CREATED,
        Json(AssignUserResponse {
            message: messages.created.into(),
            user: user.into(),
        }),
    ))
}
