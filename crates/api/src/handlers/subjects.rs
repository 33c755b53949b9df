//! Subject CRUD and assignment handlers.
//!
//! Assignment changes fan out side effects: the affected user's
//! `assigned_subject_ids` set is updated and a notification is pushed.
//! Both assignment endpoints treat an absent field as "leave unchanged"
//! and skip all side effects when the incoming value matches the
//! current one, so resubmitting the same form is harmless.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use syllabase_core::types::DbId;
use syllabase_db::models::subject::{
    CreateSubject, ExpertSubject, FacultySubject, Subject, SubjectSummary,
};
use syllabase_db::repositories::{SubjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `{message, subject}` wrapper returned by the mutating subject and
/// lifecycle endpoints.
#[derive(Debug, Serialize)]
pub struct SubjectEnvelope {
    pub message: &'static str,
    pub subject: Subject,
}

/// Query string for `GET /get-subjects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectsQuery {
    #[serde(default)]
    pub created_by: Option<DbId>,
}

/// Request body for `PUT /update-fac-exp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentsRequest {
    pub subject_id: DbId,
    #[serde(default)]
    pub assigned_faculty: Option<DbId>,
    #[serde(default)]
    pub assigned_expert: Option<DbId>,
}

/// Request body for `PUT /edit-subjects/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSubjectRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub assigned_faculty: Option<DbId>,
    #[serde(default)]
    pub assigned_expert: Option<DbId>,
}

/// POST /api/v1/add-subject
pub async fn add_subject(
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<SubjectEnvelope>)> {
    if input.code.trim().is_empty() || input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Missing fields".into()));
    }

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(subject_id = subject.id, code = %subject.code, "Subject created");

    Ok((
        StatusCode::CREATED,
        Json(SubjectEnvelope {
            message: "Subject created",
            subject,
        }),
    ))
}

/// GET /api/v1/get-subjects?createdBy=<id>
///
/// Full subject rows, optionally filtered to one creator (the HOD
/// dashboard passes its own id).
pub async fn get_subjects(
    State(state): State<AppState>,
    Query(query): Query<SubjectsQuery>,
) -> AppResult<Json<Vec<Subject>>> {
    let subjects = match query.created_by {
        Some(creator) => SubjectRepo::list_by_creator(&state.pool, creator).await?,
        None => SubjectRepo::list(&state.pool).await?,
    };
    Ok(Json(subjects))
}

/// GET /api/v1/subjects
///
/// Minimal listing for the curriculum builder's source picker.
pub async fn list_subject_summaries(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SubjectSummary>>> {
    let subjects = SubjectRepo::list_summaries(&state.pool).await?;
    Ok(Json(subjects))
}

/// GET /api/v1/faculty-subjects/{facultyId}
pub async fn list_faculty_subjects(
    State(state): State<AppState>,
    Path(faculty_id): Path<DbId>,
) -> AppResult<Json<Vec<FacultySubject>>> {
    let subjects = SubjectRepo::list_for_faculty(&state.pool, faculty_id).await?;
    Ok(Json(subjects))
}

/// GET /api/v1/expert-subjects/{expertId}
pub async fn list_expert_subjects(
    State(state): State<AppState>,
    Path(expert_id): Path<DbId>,
) -> AppResult<Json<Vec<ExpertSubject>>> {
    let subjects = SubjectRepo::list_for_expert(&state.pool, expert_id).await?;
    Ok(Json(subjects))
}

/// PUT /api/v1/update-fac-exp
///
/// Assign a faculty and/or expert to a subject. Each newly assigned
/// user is notified and gains the subject in their assignment set.
pub async fn update_assignments(
    State(state): State<AppState>,
    Json(input): Json<UpdateAssignmentsRequest>,
) -> AppResult<Json<SubjectEnvelope>> {
    let subject = SubjectRepo::find_by_id(&state.pool, input.subject_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;

    let mut assigned_faculty = subject.assigned_faculty;
    if let Some(new_faculty) = input.assigned_faculty {
        if subject.assigned_faculty != Some(new_faculty) {
            state
                .notifier
                .notify(
                    new_faculty,
                    &format!(
                        r#"You have been assigned as a faculty to the subject "{}""#,
                        subject.title
                    ),
                )
                .await?;
            UserRepo::add_assigned_subject(&state.pool, new_faculty, subject.id).await?;
            assigned_faculty = Some(new_faculty);
        }
    }

    let mut assigned_expert = subject.assigned_expert;
    if let Some(new_expert) = input.assigned_expert {
        if subject.assigned_expert != Some(new_expert) {
            state
                .notifier
                .notify(
                    new_expert,
                    &format!(
                        r#"You have been added as a subject expert for "{}""#,
                        subject.title
                    ),
                )
                .await?;
            UserRepo::add_assigned_subject(&state.pool, new_expert, subject.id).await?;
            assigned_expert = Some(new_expert);
        }
    }

    let updated =
        SubjectRepo::update_assignments(&state.pool, subject.id, assigned_faculty, assigned_expert)
            .await?
            .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;

    Ok(Json(SubjectEnvelope {
        message: "Assignments updated",
        subject: updated,
    }))
}

/// PUT /api/v1/edit-subjects/{id}
///
/// Full subject edit: code, title and both assignments. A replaced
/// assignee is notified of removal and loses the subject from their
/// assignment set; the incoming one is notified with the new title.
/// Empty code/title fields keep the current values.
pub async fn edit_subject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EditSubjectRequest>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;

    let effective_code = input
        .code
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(&subject.code);
    let effective_title = input
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&subject.title);

    let mut assigned_faculty = subject.assigned_faculty;
    if let Some(new_faculty) = input.assigned_faculty {
        if subject.assigned_faculty != Some(new_faculty) {
            if let Some(old_faculty) = subject.assigned_faculty {
                state
                    .notifier
                    .notify(
                        old_faculty,
                        &format!(
                            r#"You have been removed from the subject "{}""#,
                            subject.title
                        ),
                    )
                    .await?;
                UserRepo::remove_assigned_subject(&state.pool, old_faculty, subject.id).await?;
            }
            state
                .notifier
                .notify(
                    new_faculty,
                    &format!(
                        r#"You have been assigned as a faculty to the subject "{effective_title}""#
                    ),
                )
                .await?;
            UserRepo::add_assigned_subject(&state.pool, new_faculty, subject.id).await?;
            assigned_faculty = Some(new_faculty);
        }
    }

    let mut assigned_expert = subject.assigned_expert;
    if let Some(new_expert) = input.assigned_expert {
        if subject.assigned_expert != Some(new_expert) {
            if let Some(old_expert) = subject.assigned_expert {
                state
                    .notifier
                    .notify(
                        old_expert,
                        &format!(
                            r#"You have been removed as a subject expert from "{}""#,
                            subject.title
                        ),
                    )
                    .await?;
                UserRepo::remove_assigned_subject(&state.pool, old_expert, subject.id).await?;
            }
            state
                .notifier
                .notify(
                    new_expert,
                    &format!(
                        r#"You have been added as a subject expert for "{effective_title}""#
                    ),
                )
                .await?;
            UserRepo::add_assigned_subject(&state.pool, new_expert, subject.id).await?;
            assigned_expert = Some(new_expert);
        }
    }

    let updated = SubjectRepo::update_details(
        &state.pool,
        subject.id,
        effective_code,
        effective_title,
        assigned_faculty,
        assigned_expert,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;

    Ok(Json(updated))
}
