//! Route definitions for the blob store.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// File routes.
///
/// ```text
/// POST /upload     -> upload_file (multipart, field "file")
/// GET  /file/{id}  -> download_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(files::upload_file))
        .route("/file/{id}", get(files::download_file))
}
