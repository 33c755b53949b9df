//! Route definitions for regulation tracking.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::regulations;
use crate::state::AppState;

/// Regulation routes.
///
/// ```text
/// POST /create-regulation  -> create_regulation (fan-out per department)
/// GET  /regulations        -> list_regulations (grouped by code)
/// PUT  /upload-curriculum  -> upload_curriculum
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-regulation", post(regulations::create_regulation))
        .route("/regulations", get(regulations::list_regulations))
        .route("/upload-curriculum", put(regulations::upload_curriculum))
}
