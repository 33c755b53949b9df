//! Department entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "hod")]
    pub hod_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing entry with the HOD's name resolved (`GET /departments`).
/// `hod_name` is `"Not Assigned"` when the department has no HOD.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentWithHod {
    pub id: DbId,
    pub name: String,
    pub hod_name: String,
}
