//! Repository for the `departments` table.

use sqlx::PgPool;
use syllabase_core::types::DbId;

use crate::models::department::{Department, DepartmentWithHod};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, hod_id, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        hod_id: Option<DbId>,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (name, hod_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .bind(hod_id)
            .fetch_one(pool)
            .await
    }

    /// Find a department by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a department by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE name = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all departments, oldest first. Used by the regulation
    /// fan-out, which snapshots name and HOD per department.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY id");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// List all departments with the HOD's name resolved.
    pub async fn list_with_hod(pool: &PgPool) -> Result<Vec<DepartmentWithHod>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentWithHod>(
            "SELECT d.id, d.name, COALESCE(u.name, 'Not Assigned') AS hod_name
             FROM departments d
             LEFT JOIN users u ON u.id = d.hod_id
             ORDER BY d.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Overwrite name and HOD. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        hod_id: Option<DbId>,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET
                name = COALESCE($2, name),
                hod_id = COALESCE($3, hod_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(name)
            .bind(hod_id)
            .fetch_optional(pool)
            .await
    }

    /// Reassign the department's HOD.
    ///
    /// Returns the updated row, or `None` if the department does not
    /// exist.
    pub async fn set_hod(
        pool: &PgPool,
        id: DbId,
        hod_id: DbId,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET hod_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(hod_id)
            .fetch_optional(pool)
            .await
    }
}
