//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use syllabase_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// The wire names match what the frontend renders: the read flag
/// serializes as `read` and the creation time as `timestamp`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub message: String,
    #[serde(rename = "read")]
    pub is_read: bool,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}
