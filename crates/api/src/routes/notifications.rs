//! Route definitions for the notification log.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes. The path parameter is a user id on the listing
/// route and a notification id on mark-read; both use `{id}` so the
/// segment matches one pattern.
///
/// ```text
/// GET /notifications/{id}            -> list_notifications (id = user)
/// PUT /notifications/{id}/mark-read  -> mark_read (id = notification)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications/{id}", get(notifications::list_notifications))
        .route(
            "/notifications/{id}/mark-read",
            put(notifications::mark_read),
        )
}
