//! Notification log handlers.
//!
//! The log is the durable side of the notification path: rows are
//! written before any WebSocket push, so a user who was offline still
//! sees everything on their next fetch.

use axum::extract::{Path, State};
use axum::Json;
use syllabase_core::types::DbId;
use syllabase_db::models::notification::Notification;
use syllabase_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/notifications/{userId}
///
/// A user's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(notifications))
}

/// PUT /api/v1/notifications/{id}/mark-read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".into()))?;
    Ok(Json(notification))
}
