//! Route definitions for department management.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Department routes.
///
/// ```text
/// POST /create-department  -> create_department
/// GET  /departments        -> list_departments
/// PUT  /departments/{id}   -> update_department
/// PUT  /change-hod         -> change_hod
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-department", post(departments::create_department))
        .route("/departments", get(departments::list_departments))
        .route("/departments/{id}", put(departments::update_department))
        .route("/change-hod", put(departments::change_hod))
}
