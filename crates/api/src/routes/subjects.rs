//! Route definitions for subject CRUD and assignment.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::subjects;
use crate::state::AppState;

/// Subject routes.
///
/// ```text
/// POST /add-subject                    -> add_subject
/// GET  /get-subjects                   -> get_subjects (?createdBy=)
/// GET  /subjects                       -> list_subject_summaries
/// GET  /faculty-subjects/{faculty_id}  -> list_faculty_subjects
/// GET  /expert-subjects/{expert_id}    -> list_expert_subjects
/// PUT  /update-fac-exp                 -> update_assignments
/// PUT  /edit-subjects/{id}             -> edit_subject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-subject", post(subjects::add_subject))
        .route("/get-subjects", get(subjects::get_subjects))
        .route("/subjects", get(subjects::list_subject_summaries))
        .route(
            "/faculty-subjects/{faculty_id}",
            get(subjects::list_faculty_subjects),
        )
        .route(
            "/expert-subjects/{expert_id}",
            get(subjects::list_expert_subjects),
        )
        .route("/update-fac-exp", put(subjects::update_assignments))
        .route("/edit-subjects/{id}", put(subjects::edit_subject))
}
