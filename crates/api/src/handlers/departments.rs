//! Department management handlers.
//!
//! Department names are unique and denormalized onto user rows: when a
//! department gains an HOD (at creation or via change-hod), the user's
//! `department` column is back-written so their JWT claims and listing
//! entries carry the current department name.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use syllabase_core::types::DbId;
use syllabase_db::models::department::{Department, DepartmentWithHod};
use syllabase_db::repositories::{DepartmentRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /create-department`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hod_id: Option<DbId>,
}

/// Request body for `PUT /departments/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hod: Option<DbId>,
}

/// Request body for `PUT /change-hod`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeHodRequest {
    #[serde(default)]
    pub department_id: Option<DbId>,
    #[serde(default)]
    pub new_hod_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentCreatedResponse {
    pub message: &'static str,
    pub department: Department,
}

#[derive(Debug, Serialize)]
pub struct DepartmentUpdatedResponse {
    pub message: &'static str,
    pub data: Department,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/v1/create-department
pub async fn create_department(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentCreatedResponse>)> {
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Department name is required".into()))?;

    if DepartmentRepo::find_by_name(&state.pool, name)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Department already exists".into()));
    }

    let department = DepartmentRepo::create(&state.pool, name, input.hod_id).await?;

    if let Some(hod_id) = input.hod_id {
        UserRepo::set_department(&state.pool, hod_id, &department.name).await?;
    }
    tracing::info!(department_id = department.id, name = %department.name, "Department created");

    Ok((
        StatusCode::CREATED,
        Json(DepartmentCreatedResponse {
            message: "Department created successfully",
            department,
        }),
    ))
}

/// GET /api/v1/departments
///
/// All departments with the HOD's name resolved (`"Not Assigned"` when
/// vacant).
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentWithHod>>> {
    let departments = DepartmentRepo::list_with_hod(&state.pool).await?;
    Ok(Json(departments))
}

/// PUT /api/v1/departments/{id}
///
/// Rename and/or reassign the HOD. Absent fields keep their current
/// values.
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartmentRequest>,
) -> AppResult<Json<DepartmentUpdatedResponse>> {
    let updated = DepartmentRepo::update(&state.pool, id, input.name.as_deref(), input.hod)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".into()))?;

    Ok(Json(DepartmentUpdatedResponse {
        message: "Updated successfully",
        data: updated,
    }))
}

/// PUT /api/v1/change-hod
///
/// Reassign a department's HOD, back-writing the department name onto
/// the new HOD's user row.
pub async fn change_hod(
    State(state): State<AppState>,
    Json(input): Json<ChangeHodRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (department_id, new_hod_id) = match (input.department_id, input.new_hod_id) {
        (Some(department_id), Some(new_hod_id)) => (department_id, new_hod_id),
        _ => return Err(AppError::BadRequest("Missing required fields".into())),
    };

    let department = DepartmentRepo::set_hod(&state.pool, department_id, new_hod_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".into()))?;

    UserRepo::set_department(&state.pool, new_hod_id, &department.name).await?;
    tracing::info!(department_id, new_hod_id, "Department HOD changed");

    Ok(Json(MessageResponse {
        message: "HOD updated successfully",
    }))
}
