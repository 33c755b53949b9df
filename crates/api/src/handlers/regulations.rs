//! Regulation (curriculum batch) handlers.
//!
//! A regulation code fans out into one tracking entry per department
//! at creation time, snapshotting each department's name and HOD.
//! HODs then attach their curriculum document to their own entry, and
//! the grouped listing shows per-department progress under each code.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use syllabase_core::types::{DbId, Timestamp};
use syllabase_db::models::regulation::Regulation;
use syllabase_db::repositories::{DepartmentRepo, RegulationRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /create-regulation`.
#[derive(Debug, Deserialize)]
pub struct CreateRegulationRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Request body for `PUT /upload-curriculum`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCurriculumRequest {
    #[serde(default)]
    pub regulation_code: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub file_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct RegulationCreatedResponse {
    pub message: &'static str,
    pub data: Vec<Regulation>,
}

#[derive(Debug, Serialize)]
pub struct CurriculumUploadedResponse {
    pub message: &'static str,
    pub regulation: Regulation,
}

/// One entry in the grouped tracking listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationGroupEntry {
    pub department: String,
    pub hod: String,
    pub curriculum_url: Option<DbId>,
    pub status: String,
    pub last_updated: Option<Timestamp>,
}

/// POST /api/v1/create-regulation
///
/// Fan a new regulation code out across every existing department.
/// Duplicate codes are rejected before any entry is written.
pub async fn create_regulation(
    State(state): State<AppState>,
    Json(input): Json<CreateRegulationRequest>,
) -> AppResult<Json<RegulationCreatedResponse>> {
    let code = input
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Code is required".into()))?;

    if RegulationRepo::code_exists(&state.pool, code).await? {
        return Err(AppError::BadRequest("Regulation already exists".into()));
    }

    let departments = DepartmentRepo::list(&state.pool).await?;
    let entries = RegulationRepo::create_for_departments(&state.pool, code, &departments).await?;
    tracing::info!(code, entries = entries.len(), "Regulation fanned out");

    Ok(Json(RegulationCreatedResponse {
        message: "Regulation created",
        data: entries,
    }))
}

/// GET /api/v1/regulations
///
/// Entries grouped by regulation code. A vacant snapshot HOD renders
/// as `"Not Assigned"`.
pub async fn list_regulations(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, Vec<RegulationGroupEntry>>>> {
    let rows = RegulationRepo::list_with_hod(&state.pool).await?;

    let mut grouped: BTreeMap<String, Vec<RegulationGroupEntry>> = BTreeMap::new();
    for row in rows {
        let entry = RegulationGroupEntry {
            department: row.department_name,
            hod: row.hod_name.unwrap_or_else(|| "Not Assigned".to_string()),
            curriculum_url: row.curriculum_file_id,
            status: row.status,
            last_updated: row.last_updated,
        };
        grouped.entry(row.regulation_code).or_default().push(entry);
    }

    Ok(Json(grouped))
}

/// PUT /api/v1/upload-curriculum
///
/// Attach a curriculum file to the entry matching the code/department
/// pair, moving it to `Submitted`.
pub async fn upload_curriculum(
    State(state): State<AppState>,
    Json(input): Json<UploadCurriculumRequest>,
) -> AppResult<Json<CurriculumUploadedResponse>> {
    let (code, department, file_id) = match (
        input.regulation_code.as_deref(),
        input.department.as_deref(),
        input.file_id,
    ) {
        (Some(code), Some(department), Some(file_id)) => (code, department, file_id),
        _ => {
            return Err(AppError::BadRequest(
                "Missing regulation or department or file".into(),
            ))
        }
    };

    let regulation = RegulationRepo::set_curriculum(&state.pool, code, department, file_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Regulation entry not found".into()))?;
    tracing::info!(code, department, file_id, "Curriculum attached to regulation entry");

    Ok(Json(CurriculumUploadedResponse {
        message: "Curriculum uploaded and regulation updated",
        regulation,
    }))
}
