//! Route definitions for curriculum assembly.

use axum::routing::post;
use axum::Router;

use crate::handlers::curriculum;
use crate::state::AppState;

/// Curriculum routes.
///
/// ```text
/// POST /curriculum/merge-docs  -> merge_docs (multipart, returns DOCX)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/curriculum/merge-docs", post(curriculum::merge_docs))
}
