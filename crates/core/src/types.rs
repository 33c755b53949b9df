/// Primary-key type matching the BIGSERIAL columns in the schema.
pub type DbId = i64;

/// Timestamps are `timestamptz` columns, always read as UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
