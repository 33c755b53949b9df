//! Route definitions for the syllabus review lifecycle.

use axum::routing::put;
use axum::Router;

use crate::handlers::lifecycle;
use crate::state::AppState;

/// Lifecycle transition routes.
///
/// ```text
/// PUT /faculty-upload         -> faculty_upload (-> Sent to Expert)
/// PUT /send-to-hod            -> send_to_hod (-> Sent to HOD)
/// PUT /subject/{id}/approve   -> approve (-> Approved)
/// PUT /subject/{id}/feedback  -> reject_with_feedback (-> Rejected)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/faculty-upload", put(lifecycle::faculty_upload))
        .route("/send-to-hod", put(lifecycle::send_to_hod))
        .route("/subject/{id}/approve", put(lifecycle::approve))
        .route("/subject/{id}/feedback", put(lifecycle::reject_with_feedback))
}
