//! Role-based access control extractors.
//!
//! Thin wrappers over [`AuthUser`] that reject requests lacking a
//! required role. Users hold a set of roles, so the check is set
//! membership, not equality; adding `faculty` to an HOD account must
//! not cost it HOD access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use syllabase_core::error::CoreError;
use syllabase_core::roles::{ROLE_HOD, ROLE_SUPERUSER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: &str,
    denial: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.has_role(role) {
        return Err(AppError::Core(CoreError::Forbidden(denial.to_string())));
    }
    Ok(user)
}

/// Requires the `superuser` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn superuser_only(RequireSuperuser(user): RequireSuperuser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_role(parts, state, ROLE_SUPERUSER, "Superuser role required").await?;
        Ok(RequireSuperuser(user))
    }
}

/// Requires the `hod` role. Rejects with 403 Forbidden otherwise.
pub struct RequireHod(pub AuthUser);

impl FromRequestParts<AppState> for RequireHod {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_role(parts, state, ROLE_HOD, "HOD role required").await?;
        Ok(RequireHod(user))
    }
}
