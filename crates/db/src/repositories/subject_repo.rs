//! Repository for the `subjects` table.

use sqlx::PgPool;
use syllabase_core::types::DbId;

use crate::models::subject::{
    CreateSubject, ExpertSubject, FacultySubject, Subject, SubjectSummary,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, title, created_by, assigned_faculty, assigned_expert, \
                       syllabus_file_id, status, feedback, last_updated, created_at, updated_at";

/// Prefixed column list for JOIN queries.
const JOINED_COLUMNS: &str =
    "s.id, s.code, s.title, s.created_by, s.assigned_faculty, s.assigned_expert, \
     s.syllabus_file_id, s.status, s.feedback, s.last_updated";

/// Provides CRUD operations for subjects and their lifecycle fields.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject in `Draft` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (code, title, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.code)
            .bind(&input.title)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a subject by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subject by its unique course code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE code = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all subjects, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY id");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }

    /// List subjects created by the given user, oldest first.
    pub async fn list_by_creator(pool: &PgPool, creator: DbId) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE created_by = $1 ORDER BY id");
        sqlx::query_as::<_, Subject>(&query)
            .bind(creator)
            .fetch_all(pool)
            .await
    }

    /// Minimal id/code/title/file listing for the curriculum builder.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<SubjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, SubjectSummary>(
            "SELECT id, code, title, syllabus_file_id FROM subjects ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// List subjects assigned to a faculty member, each enriched with
    /// the assigned expert's name and email.
    pub async fn list_for_faculty(
        pool: &PgPool,
        faculty_id: DbId,
    ) -> Result<Vec<FacultySubject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, e.name AS expert_name, e.email AS expert_email
             FROM subjects s
             LEFT JOIN users e ON e.id = s.assigned_expert
             WHERE s.assigned_faculty = $1
             ORDER BY s.id"
        );
        sqlx::query_as::<_, FacultySubject>(&query)
            .bind(faculty_id)
            .fetch_all(pool)
            .await
    }

    /// List subjects assigned to an expert, each enriched with the
    /// assigned faculty's name (`"N/A"` when unassigned).
    pub async fn list_for_expert(
        pool: &PgPool,
        expert_id: DbId,
    ) -> Result<Vec<ExpertSubject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, COALESCE(f.name, 'N/A') AS faculty_name
             FROM subjects s
             LEFT JOIN users f ON f.id = s.assigned_faculty
             WHERE s.assigned_expert = $1
             ORDER BY s.id"
        );
        sqlx::query_as::<_, ExpertSubject>(&query)
            .bind(expert_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the assignment columns. Callers resolve the final
    /// values first; this writes them verbatim.
    pub async fn update_assignments(
        pool: &PgPool,
        id: DbId,
        assigned_faculty: Option<DbId>,
        assigned_expert: Option<DbId>,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET assigned_faculty = $2, assigned_expert = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(assigned_faculty)
            .bind(assigned_expert)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite code, title and both assignment columns in one
    /// statement (the edit-subject form submits all four).
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        code: &str,
        title: &str,
        assigned_faculty: Option<DbId>,
        assigned_expert: Option<DbId>,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET code = $2, title = $3, assigned_faculty = $4, assigned_expert = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(code)
            .bind(title)
            .bind(assigned_faculty)
            .bind(assigned_expert)
            .fetch_optional(pool)
            .await
    }

    /// Link an uploaded syllabus file and move the subject to the given
    /// status, stamping `last_updated`.
    pub async fn link_file(
        pool: &PgPool,
        id: DbId,
        file_id: DbId,
        status: &str,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET syllabus_file_id = $2, status = $3, last_updated = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(file_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Record a review outcome: new status plus feedback text (empty on
    /// approval), stamping `last_updated`.
    pub async fn set_review_outcome(
        pool: &PgPool,
        id: DbId,
        status: &str,
        feedback: &str,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET status = $2, feedback = $3, last_updated = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(status)
            .bind(feedback)
            .fetch_optional(pool)
            .await
    }
}
