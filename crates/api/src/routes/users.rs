//! Route definitions for account provisioning and staff lookups.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User provisioning and lookup routes.
///
/// ```text
/// POST /assign-hod      -> assign_hod (superuser only)
/// POST /assign-faculty  -> assign_faculty (HOD only)
/// POST /assign-expert   -> assign_expert
/// GET  /by-role         -> list_by_role (?role=)
/// GET  /hods            -> list_hods
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assign-hod", post(users::assign_hod))
        .route("/assign-faculty", post(users::assign_faculty))
        .route("/assign-expert", post(users::assign_expert))
        .route("/by-role", get(users::list_by_role))
        .route("/hods", get(users::list_hods))
}
