//! Repository for the `uploads` blob table.
//!
//! The contract is deliberately minimal: write bytes and get back an
//! opaque id, or read the full blob by id. Blobs are immutable and
//! never deleted; a record that re-uploads simply points at a new row.

use sqlx::PgPool;
use syllabase_core::types::DbId;

use crate::models::upload::{FileMeta, StoredFile};

/// Metadata column list (payload excluded).
const META_COLUMNS: &str = "id, filename, content_type, size_bytes, created_at";

/// Provides write/read access to stored file blobs.
pub struct FileRepo;

impl FileRepo {
    /// Store a blob, returning its metadata (the caller only needs the
    /// opaque id and filename).
    pub async fn create(
        pool: &PgPool,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<FileMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploads (filename, content_type, data, size_bytes)
             VALUES ($1, $2, $3, octet_length($3))
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, FileMeta>(&query)
            .bind(filename)
            .bind(content_type)
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// Fetch a blob with its payload.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StoredFile>, sqlx::Error> {
        sqlx::query_as::<_, StoredFile>(
            "SELECT id, filename, content_type, data, size_bytes, created_at
             FROM uploads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
