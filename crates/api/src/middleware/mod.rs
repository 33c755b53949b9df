//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireSuperuser`] -- Requires the `superuser` role.
//! - [`rbac::RequireHod`] -- Requires the `hod` role.

pub mod auth;
pub mod rbac;
