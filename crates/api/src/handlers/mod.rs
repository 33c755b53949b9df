//! Request handlers for the portal API.
//!
//! Each submodule provides async handler functions for one resource
//! area. Handlers delegate to the repositories in `syllabase_db` (and
//! the utilities in `syllabase_docgen`) and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod curriculum;
pub mod departments;
pub mod extraction;
pub mod files;
pub mod lifecycle;
pub mod notifications;
pub mod regulations;
pub mod subjects;
pub mod users;
