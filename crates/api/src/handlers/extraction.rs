//! Syllabus extraction handler.
//!
//! Converts an uploaded syllabus (txt, docx or pdf) to plain text,
//! sends it to the generative model with a fixed prompt, and returns
//! the first JSON object found in the reply. The result is a draft for
//! the faculty editor, not a stored record; nothing is persisted here.

use axum::extract::{Multipart, State};
use axum::Json;
use syllabase_docgen::model::{extract_json_object, syllabus_prompt};
use syllabase_docgen::text::{read_file_as_text, ExtractError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/extract-syllabus (multipart, field `file`)
pub async fn extract_syllabus(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = upload.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let raw_text = read_file_as_text(&filename, &data).map_err(|e| match e {
        ExtractError::MissingExtension | ExtractError::UnsupportedType(_) => {
            AppError::BadRequest(e.to_string())
        }
        other => AppError::InternalError(format!("Failed to read file: {other}")),
    })?;

    let client = state
        .model_client
        .as_ref()
        .ok_or_else(|| AppError::InternalError("GEMINI_API_KEY is not configured".into()))?;

    let reply = client
        .generate_content(&syllabus_prompt(&raw_text))
        .await
        .map_err(|e| AppError::InternalError(format!("Model request failed: {e}")))?;

    let parsed = extract_json_object(&reply)
        .map_err(|e| AppError::InternalError(format!("Model reply was not valid JSON: {e}")))?;
    tracing::info!(filename = %filename, chars = raw_text.len(), "Syllabus extracted");

    Ok(Json(parsed))
}
