//! Subject entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// A row from the `subjects` table.
///
/// `syllabus_file_id` is an opaque reference into the `uploads` blob
/// table; it serializes as `syllabusUrl` for historical reasons (the
/// frontend builds the download link from it).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub created_by: DbId,
    pub assigned_faculty: Option<DbId>,
    pub assigned_expert: Option<DbId>,
    #[serde(rename = "syllabusUrl")]
    pub syllabus_file_id: Option<DbId>,
    pub status: String,
    pub feedback: String,
    pub last_updated: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new subject (`POST /add-subject`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubject {
    pub code: String,
    pub title: String,
    pub created_by: DbId,
}

/// Minimal listing entry for the curriculum builder (`GET /subjects`).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: DbId,
    pub code: String,
    pub title: String,
    #[serde(rename = "syllabusUrl")]
    pub syllabus_file_id: Option<DbId>,
}

/// Subject enriched with the assigned expert's contact details, as
/// shown on the faculty dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySubject {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub created_by: DbId,
    pub assigned_faculty: Option<DbId>,
    pub assigned_expert: Option<DbId>,
    #[serde(rename = "syllabusUrl")]
    pub syllabus_file_id: Option<DbId>,
    pub status: String,
    pub feedback: String,
    pub last_updated: Option<Timestamp>,
    pub expert_name: Option<String>,
    pub expert_email: Option<String>,
}

/// Subject enriched with the assigned faculty's name, as shown on the
/// expert dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertSubject {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub created_by: DbId,
    pub assigned_faculty: Option<DbId>,
    pub assigned_expert: Option<DbId>,
    #[serde(rename = "syllabusUrl")]
    pub syllabus_file_id: Option<DbId>,
    pub status: String,
    pub feedback: String,
    pub last_updated: Option<Timestamp>,
    pub faculty_name: String,
}
