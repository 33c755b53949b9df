//! Repository for the `users` table.

use sqlx::PgPool;
use syllabase_core::types::DbId;

use crate::models::user::{CreateUser, HodSummary, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, roles, department, \
                       assigned_subject_ids, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, roles, department)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.roles)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List name/email summaries of every user holding the given role.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email FROM users WHERE $1 = ANY(roles) ORDER BY name",
        )
        .bind(role)
        .fetch_all(pool)
        .await
    }

    /// List every HOD-role user with their department.
    pub async fn list_hods(pool: &PgPool) -> Result<Vec<HodSummary>, sqlx::Error> {
        sqlx::query_as::<_, HodSummary>(
            "SELECT id, name, email, department FROM users
             WHERE 'hod' = ANY(roles) ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Append a role to a user's role set if not already present.
    ///
    /// Returns the updated row; the update is a no-op when the user
    /// already holds the role.
    pub async fn add_role(pool: &PgPool, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET roles = CASE
                WHEN $2 = ANY(roles) THEN roles
                ELSE array_append(roles, $2)
             END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a user's department (denormalized from the department
    /// record; see `DepartmentRepo`).
    pub async fn set_department(
        pool: &PgPool,
        id: DbId,
        department: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET department = $2 WHERE id = $1")
            .bind(id)
            .bind(department)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a subject assignment on the user row (set semantics:
    /// adding an id that is already present is a no-op).
    pub async fn add_assigned_subject(
        pool: &PgPool,
        user_id: DbId,
        subject_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET assigned_subject_ids = array_append(assigned_subject_ids, $2)
             WHERE id = $1 AND NOT (assigned_subject_ids @> ARRAY[$2]::bigint[])",
        )
        .bind(user_id)
        .bind(subject_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop a subject assignment from the user row.
    pub async fn remove_assigned_subject(
        pool: &PgPool,
        user_id: DbId,
        subject_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET assigned_subject_ids = array_remove(assigned_subject_ids, $2)
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(subject_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
