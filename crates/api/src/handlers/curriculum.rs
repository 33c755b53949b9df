//! Final curriculum assembly handler.
//!
//! Takes the HOD's cover template, an optional electives grid, and an
//! ordered list of stored syllabus blob ids, and returns one combined
//! DOCX. The electives grid is rendered server-side into appendix
//! tables; each member lands after a page break. Appended members that
//! turn out not to be DOCX are skipped and counted rather than failing
//! the whole merge.

use axum::extract::{Multipart, State};
use axum::http::header::{self, HeaderName};
use axum::response::{IntoResponse, Response};
use syllabase_core::types::DbId;
use syllabase_db::repositories::FileRepo;
use syllabase_docgen::docx::{self, DocxError, DOCX_CONTENT_TYPE};
use syllabase_docgen::tables::{build_appendix_docx, AppendixData};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Count of appended members skipped for not being DOCX, surfaced so
/// the frontend can warn without failing the download.
const SKIPPED_HEADER: HeaderName = HeaderName::from_static("x-skipped-non-docx");

/// POST /api/v1/curriculum/merge-docs
///
/// Multipart fields: `template` (DOCX file), `electives` (JSON grid,
/// optional), `syllabusUrls` (JSON array of stored file ids).
pub async fn merge_docs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut template: Option<Vec<u8>> = None;
    let mut electives_json: Option<String> = None;
    let mut syllabus_urls_json: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("template") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read template: {e}")))?;
                template = Some(bytes.to_vec());
            }
            Some("electives") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read electives: {e}")))?;
                electives_json = Some(text);
            }
            Some("syllabusUrls") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read syllabusUrls: {e}"))
                })?;
                syllabus_urls_json = Some(text);
            }
            _ => {}
        }
    }

    let (template, syllabus_urls_json) = match (template, syllabus_urls_json) {
        (Some(template), Some(urls)) => (template, urls),
        _ => return Err(AppError::BadRequest("Required files missing.".into())),
    };

    let syllabus_ids: Vec<DbId> = serde_json::from_str(&syllabus_urls_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid syllabusUrls payload: {e}")))?;

    let mut appends: Vec<Vec<u8>> = Vec::new();

    if let Some(raw) = electives_json {
        let data: AppendixData = serde_json::from_str(&raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid electives payload: {e}")))?;
        if !data.is_empty() {
            let appendix = build_appendix_docx(&data)
                .map_err(|e| AppError::InternalError(format!("Appendix build failed: {e}")))?;
            appends.push(appendix);
        }
    }

    for id in &syllabus_ids {
        let file = FileRepo::find_by_id(&state.pool, *id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File {id} not found")))?;
        appends.push(file.data);
    }

    let outcome = docx::merge_documents(&template, &appends).map_err(|e| match e {
        DocxError::NotDocx => AppError::BadRequest("Template must be a DOCX document".into()),
        other => AppError::InternalError(format!("Merge failed: {other}")),
    })?;

    if outcome.skipped > 0 {
        tracing::warn!(
            skipped = outcome.skipped,
            "Skipped non-DOCX members during curriculum merge"
        );
    }
    tracing::info!(
        members = appends.len(),
        bytes = outcome.bytes.len(),
        "Curriculum merged"
    );

    let headers = [
        (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=FinalCurriculum.docx".to_string(),
        ),
        (SKIPPED_HEADER, outcome.skipped.to_string()),
    ];
    Ok((headers, outcome.bytes).into_response())
}
