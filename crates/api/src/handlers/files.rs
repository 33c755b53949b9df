//! Blob upload and download handlers.
//!
//! Files live in the `uploads` table as BYTEA rows; the API hands out
//! opaque ids that subject and regulation records reference. Blobs are
//! immutable: replacing a syllabus uploads a new blob and repoints the
//! record.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use syllabase_core::types::DbId;
use syllabase_db::models::upload::FileMeta;
use syllabase_db::repositories::FileRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body for `POST /upload`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: DbId,
    pub filename: String,
}

/// POST /api/v1/upload (multipart, field `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut stored: Option<FileMeta> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        stored = Some(FileRepo::create(&state.pool, &filename, &content_type, &data).await?);
    }

    let meta = stored.ok_or_else(|| AppError::BadRequest("No file uploaded.".into()))?;
    tracing::info!(
        file_id = meta.id,
        filename = %meta.filename,
        size_bytes = meta.size_bytes,
        "File stored"
    );

    Ok(Json(UploadResponse {
        file_id: meta.id,
        filename: meta.filename,
    }))
}

/// GET /api/v1/file/{id}
///
/// Stream the blob back with its stored content type and an attachment
/// disposition carrying the original filename.
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let file = FileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type),
        (
            header::CONTENT_DISPOSITION,
            format!(r#"attachment; filename="{}""#, file.filename),
        ),
    ];
    Ok((headers, file.data).into_response())
}
