//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub department: Option<String>,
    pub assigned_subject_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Whether the account holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub department: Option<String>,
    pub assigned_subject_ids: Vec<DbId>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            roles: user.roles,
            department: user.department,
            assigned_subject_ids: user.assigned_subject_ids,
        }
    }
}

/// Insert payload for a new user. The password is already hashed by the
/// time it reaches the repository.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub department: Option<String>,
}

/// Name/email summary for staff pickers (`GET /by-role`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// HOD listing entry (`GET /hods`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HodSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}
