//! Regulation entry status constants.
//!
//! Creating a regulation code fans out one entry per existing
//! department; each entry then tracks its own curriculum upload.

/// Freshly fanned-out entry, no curriculum uploaded yet.
pub const STATUS_PENDING: &str = "Pending";

/// A curriculum file has been uploaded for this entry.
pub const STATUS_SUBMITTED: &str = "Submitted";

/// Version assigned to newly created regulation entries.
pub const INITIAL_VERSION: i32 = 1;
