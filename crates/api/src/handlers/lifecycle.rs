//! Syllabus review lifecycle handlers.
//!
//! Every handler here follows the same shape: load the subject, check
//! the requested move against the transition table, then write the new
//! status. The check happens before any row is touched, so an illegal
//! move (409) leaves the record exactly as it was.
//!
//! Notification rules are asymmetric on purpose: a faculty upload to
//! the expert stage is silent, while submission to the HOD, approval
//! and rejection each push a notification to the party who acts next.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use syllabase_core::lifecycle::SubjectStatus;
use syllabase_core::types::DbId;
use syllabase_db::models::subject::Subject;
use syllabase_db::repositories::SubjectRepo;
use syllabase_db::DbPool;

use super::subjects::SubjectEnvelope;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `PUT /faculty-upload` and `PUT /send-to-hod`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFileRequest {
    pub subject_id: DbId,
    pub file_id: DbId,
}

/// Request body for `PUT /subject/{id}/feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

/// PUT /api/v1/faculty-upload
///
/// Link an uploaded syllabus file and move the subject to
/// `Sent to Expert`. Creates no notification.
pub async fn faculty_upload(
    State(state): State<AppState>,
    Json(input): Json<LinkFileRequest>,
) -> AppResult<Json<SubjectEnvelope>> {
    let subject = load_subject(&state.pool, input.subject_id).await?;
    let current: SubjectStatus = subject.status.parse()?;
    current.ensure_transition(SubjectStatus::SentToExpert)?;

    let updated = SubjectRepo::link_file(
        &state.pool,
        subject.id,
        input.file_id,
        SubjectStatus::SentToExpert.as_str(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;
    tracing::info!(subject_id = updated.id, status = %updated.status, "Syllabus sent to expert");

    Ok(Json(SubjectEnvelope {
        message: "File linked",
        subject: updated,
    }))
}

/// PUT /api/v1/send-to-hod
///
/// Link the (possibly revised) syllabus file and move the subject to
/// `Sent to HOD`, notifying the subject's creator that a syllabus
/// awaits approval.
pub async fn send_to_hod(
    State(state): State<AppState>,
    Json(input): Json<LinkFileRequest>,
) -> AppResult<Json<SubjectEnvelope>> {
    let subject = load_subject(&state.pool, input.subject_id).await?;
    let current: SubjectStatus = subject.status.parse()?;
    current.ensure_transition(SubjectStatus::SentToHod)?;

    let updated = SubjectRepo::link_file(
        &state.pool,
        subject.id,
        input.file_id,
        SubjectStatus::SentToHod.as_str(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;
    tracing::info!(subject_id = updated.id, status = %updated.status, "Syllabus sent to HOD");

    state
        .notifier
        .notify(
            updated.created_by,
            &format!(
                r#"Syllabus for "{}" has been submitted for your approval."#,
                updated.title
            ),
        )
        .await?;

    Ok(Json(SubjectEnvelope {
        message: "File linked",
        subject: updated,
    }))
}

/// PUT /api/v1/subject/{id}/approve
///
/// Final HOD approval: status `Approved`, feedback cleared, assigned
/// faculty notified. `Approved` is terminal.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubjectEnvelope>> {
    let subject = load_subject(&state.pool, id).await?;
    let current: SubjectStatus = subject.status.parse()?;
    current.ensure_transition(SubjectStatus::Approved)?;

    let updated = SubjectRepo::set_review_outcome(
        &state.pool,
        subject.id,
        SubjectStatus::Approved.as_str(),
        "",
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;
    tracing::info!(subject_id = updated.id, "Syllabus approved");

    match updated.assigned_faculty {
        Some(faculty_id) => {
            state
                .notifier
                .notify(
                    faculty_id,
                    &format!(r#"Your syllabus for "{}" has been approved."#, updated.title),
                )
                .await?;
        }
        None => {
            tracing::warn!(
                subject_id = updated.id,
                "Subject has no assigned faculty, skipping approval notification"
            );
        }
    }

    Ok(Json(SubjectEnvelope {
        message: "Syllabus approved",
        subject: updated,
    }))
}

/// PUT /api/v1/subject/{id}/feedback
///
/// Rejection with feedback: status `Rejected`, feedback text stored,
/// assigned faculty notified with the feedback inline.
pub async fn reject_with_feedback(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<Json<SubjectEnvelope>> {
    let subject = load_subject(&state.pool, id).await?;
    let current: SubjectStatus = subject.status.parse()?;
    current.ensure_transition(SubjectStatus::Rejected)?;

    let updated = SubjectRepo::set_review_outcome(
        &state.pool,
        subject.id,
        SubjectStatus::Rejected.as_str(),
        &input.feedback,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Subject not found".into()))?;
    tracing::info!(subject_id = updated.id, "Syllabus rejected");

    match updated.assigned_faculty {
        Some(faculty_id) => {
            state
                .notifier
                .notify(
                    faculty_id,
                    &format!(
                        r#"Your syllabus for "{}" was rejected. Feedback: {}"#,
                        updated.title, input.feedback
                    ),
                )
                .await?;
        }
        None => {
            tracing::warn!(
                subject_id = updated.id,
                "Subject has no assigned faculty, skipping rejection notification"
            );
        }
    }

    Ok(Json(SubjectEnvelope {
        message: "Feedback sent",
        subject: updated,
    }))
}

// ---- private helpers ----

async fn load_subject(pool: &DbPool, id: DbId) -> AppResult<Subject> {
    SubjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found".into()))
}
