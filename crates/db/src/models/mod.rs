//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response shapes (camelCase on the wire)
//! - `Deserialize` DTOs for inserts and updates

pub mod department;
pub mod notification;
pub mod regulation;
pub mod subject;
pub mod upload;
pub mod user;
