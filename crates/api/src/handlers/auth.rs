//! Login handler.
//!
//! Login is role-scoped: the client states which dashboard it wants to
//! enter, and a correct credential for an account that does not hold
//! that role is rejected with 403. The three failure modes (unknown
//! email, wrong password, missing role) are deliberately
//! distinguishable: 404, 401, 403.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use syllabase_core::error::CoreError;
use syllabase_db::models::user::UserResponse;
use syllabase_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// The role whose dashboard the client wants to enter.
    pub role: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/v1/login
///
/// Authenticate with email + password for a specific role.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    if !user.has_role(&input.role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Access denied for selected role: {}",
            input.role
        ))));
    }

    let token = generate_token(
        user.id,
        &user.roles,
        user.department.as_deref(),
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %input.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}
