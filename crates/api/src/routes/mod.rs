pub mod auth;
pub mod curriculum;
pub mod departments;
pub mod extraction;
pub mod files;
pub mod health;
pub mod lifecycle;
pub mod notifications;
pub mod regulations;
pub mod subjects;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// The surface is deliberately flat: every operation the frontend calls
/// lives one segment under `/api/v1`, on the paths it has always used.
///
/// Route hierarchy:
///
/// ```text
/// /ws                             WebSocket (join + pushed notifications)
///
/// /login                          role-scoped login (POST)
///
/// /assign-hod                     create-or-extend HOD account (POST, superuser)
/// /assign-faculty                 create-or-extend faculty account (POST, HOD)
/// /assign-expert                  create-or-extend expert account (POST)
/// /by-role                        users holding a role (GET ?role=)
/// /hods                           all HODs with departments (GET)
///
/// /add-subject                    create subject in Draft (POST)
/// /get-subjects                   full subject rows (GET ?createdBy=)
/// /subjects                       minimal listing for the curriculum builder (GET)
/// /faculty-subjects/{faculty_id}  subjects assigned to a faculty (GET)
/// /expert-subjects/{expert_id}    subjects assigned to an expert (GET)
/// /update-fac-exp                 assign faculty/expert (PUT)
/// /edit-subjects/{id}             edit code/title/assignments (PUT)
///
/// /faculty-upload                 link file, status -> Sent to Expert (PUT)
/// /send-to-hod                    link file, status -> Sent to HOD (PUT)
/// /subject/{id}/approve           status -> Approved (PUT)
/// /subject/{id}/feedback          status -> Rejected with feedback (PUT)
///
/// /notifications/{id}             a user's log, newest first (GET)
/// /notifications/{id}/mark-read   flip read flag (PUT)
///
/// /upload                         store blob (POST multipart)
/// /file/{id}                      download blob (GET)
///
/// /create-department              create department (POST)
/// /departments                    departments with HOD names (GET)
/// /departments/{id}               rename / reassign HOD (PUT)
/// /change-hod                     reassign HOD + back-write user row (PUT)
///
/// /create-regulation              fan regulation code out per department (POST)
/// /regulations                    entries grouped by code (GET)
/// /upload-curriculum              attach curriculum file to an entry (PUT)
///
/// /curriculum/merge-docs          merged curriculum DOCX (POST multipart)
/// /extract-syllabus               model-extracted syllabus draft (POST multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint (notification push).
        .route("/ws", get(ws::ws_handler))
        // Role-scoped login.
        .merge(auth::router())
        // Account provisioning and staff lookups.
        .merge(users::router())
        // Subject CRUD and assignment.
        .merge(subjects::router())
        // Syllabus review lifecycle.
        .merge(lifecycle::router())
        // Durable notification log.
        .merge(notifications::router())
        // Blob store (upload/download).
        .merge(files::router())
        // Department management.
        .merge(departments::router())
        // Regulation tracking.
        .merge(regulations::router())
        // Final curriculum assembly.
        .merge(curriculum::router())
        // Model-backed syllabus extraction.
        .merge(extraction::router())
}
