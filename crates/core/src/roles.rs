//! Well-known role name constants.
//!
//! These are the exact strings stored in `users.roles` and embedded in
//! JWT claims; access checks compare against them verbatim. A user may
//! hold several roles at once (e.g. an HOD who also teaches).

/// Full administrative access, including department and HOD management.
pub const ROLE_SUPERUSER: &str = "superuser";

/// Head of department: creates subjects and gives final approval.
pub const ROLE_HOD: &str = "hod";

/// Teaching staff: uploads syllabus files for assigned subjects.
pub const ROLE_FACULTY: &str = "faculty";

/// Reviews syllabus content before it reaches the HOD.
pub const ROLE_SUBJECT_EXPERT: &str = "subject-expert";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_SUPERUSER, ROLE_HOD, ROLE_FACULTY, ROLE_SUBJECT_EXPERT];

/// Whether a role string is one of the accepted values.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
