//! Regulation entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// A row from the `regulations` table.
///
/// `department_name` and `hod_id` are snapshots taken when the code was
/// fanned out; later department renames or HOD changes do not touch
/// existing rows.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Regulation {
    pub id: DbId,
    pub regulation_code: String,
    #[serde(rename = "department")]
    pub department_name: String,
    pub hod_id: Option<DbId>,
    #[serde(rename = "curriculumUrl")]
    pub curriculum_file_id: Option<DbId>,
    pub status: String,
    pub version: i32,
    pub last_updated: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Regulation row joined with the snapshot HOD's name, used by the
/// grouped tracking listing (`GET /regulations`).
#[derive(Debug, Clone, FromRow)]
pub struct RegulationWithHod {
    pub id: DbId,
    pub regulation_code: String,
    pub department_name: String,
    pub hod_name: Option<String>,
    pub curriculum_file_id: Option<DbId>,
    pub status: String,
    pub last_updated: Option<Timestamp>,
}
