//! Repository for the `regulations` table.

use sqlx::PgPool;
use syllabase_core::regulation::{INITIAL_VERSION, STATUS_SUBMITTED};
use syllabase_core::types::DbId;

use crate::models::department::Department;
use crate::models::regulation::{Regulation, RegulationWithHod};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, regulation_code, department_name, hod_id, curriculum_file_id, \
                       status, version, last_updated, created_at, updated_at";

/// Provides CRUD operations for regulation entries.
pub struct RegulationRepo;

impl RegulationRepo {
    /// Whether any entry exists for the given regulation code.
    pub async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM regulations WHERE regulation_code = $1)",
        )
        .bind(code)
        .fetch_one(pool)
        .await
    }

    /// Fan a new regulation code out across the given departments: one
    /// `Pending` entry per department, snapshotting its name and HOD.
    ///
    /// All entries are created in a single transaction so a duplicate
    /// code cannot leave a partial fan-out behind.
    pub async fn create_for_departments(
        pool: &PgPool,
        code: &str,
        departments: &[Department],
    ) -> Result<Vec<Regulation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO regulations (regulation_code, department_name, hod_id, version)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut entries = Vec::with_capacity(departments.len());
        for dept in departments {
            let entry = sqlx::query_as::<_, Regulation>(&insert_query)
                .bind(code)
                .bind(&dept.name)
                .bind(dept.hod_id)
                .bind(INITIAL_VERSION)
                .fetch_one(&mut *tx)
                .await?;
            entries.push(entry);
        }

        tx.commit().await?;
        Ok(entries)
    }

    /// List every entry joined with its snapshot HOD's name, grouped
    /// client-side by regulation code.
    pub async fn list_with_hod(pool: &PgPool) -> Result<Vec<RegulationWithHod>, sqlx::Error> {
        sqlx::query_as::<_, RegulationWithHod>(
            "SELECT r.id, r.regulation_code, r.department_name, u.name AS hod_name,
                    r.curriculum_file_id, r.status, r.last_updated
             FROM regulations r
             LEFT JOIN users u ON u.id = r.hod_id
             ORDER BY r.regulation_code, r.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Attach a curriculum file to the entry matching the code and
    /// department snapshot, moving it to `Submitted`.
    ///
    /// Returns `None` when no entry matches.
    pub async fn set_curriculum(
        pool: &PgPool,
        code: &str,
        department: &str,
        file_id: DbId,
    ) -> Result<Option<Regulation>, sqlx::Error> {
        let query = format!(
            "UPDATE regulations
             SET curriculum_file_id = $3, status = $4, last_updated = NOW()
             WHERE regulation_code = $1 AND department_name = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Regulation>(&query)
            .bind(code)
            .bind(department)
            .bind(file_id)
            .bind(STATUS_SUBMITTED)
            .fetch_optional(pool)
            .await
    }
}
