//! Stored file (blob) models.

use serde::Serialize;
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// Full stored file row, payload included. Only fetched when the bytes
/// are actually needed (downloads, merges).
#[derive(Debug, Clone, FromRow)]
pub struct StoredFile {
    pub id: DbId,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// Stored file metadata without the payload.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub id: DbId,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}
