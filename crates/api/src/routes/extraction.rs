//! Route definitions for syllabus extraction.

use axum::routing::post;
use axum::Router;

use crate::handlers::extraction;
use crate::state::AppState;

/// Extraction routes.
///
/// ```text
/// POST /extract-syllabus  -> extract_syllabus (multipart, field "file")
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/extract-syllabus", post(extraction::extract_syllabus))
}
