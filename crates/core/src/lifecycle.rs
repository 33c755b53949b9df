//! Syllabus lifecycle state machine.
//!
//! A subject's syllabus moves through a fixed review pipeline: faculty
//! upload a file, a subject expert reviews it, and the HOD gives final
//! approval or sends it back with feedback. The set of legal moves is
//! closed; anything outside the table below is rejected before any row
//! is touched.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Review status of a subject's syllabus.
///
/// Stored in the database and sent on the wire as the display string
/// (e.g. `"Sent to Expert"`), which the frontend renders directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStatus {
    Draft,
    SentToExpert,
    SentToHod,
    Approved,
    Rejected,
}

impl SubjectStatus {
    /// All statuses, in pipeline order.
    pub const ALL: [SubjectStatus; 5] = [
        SubjectStatus::Draft,
        SubjectStatus::SentToExpert,
        SubjectStatus::SentToHod,
        SubjectStatus::Approved,
        SubjectStatus::Rejected,
    ];

    /// The display string stored in `subjects.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectStatus::Draft => "Draft",
            SubjectStatus::SentToExpert => "Sent to Expert",
            SubjectStatus::SentToHod => "Sent to HOD",
            SubjectStatus::Approved => "Approved",
            SubjectStatus::Rejected => "Rejected",
        }
    }

    /// Whether a transition from `self` to `to` is legal.
    ///
    /// Re-submitting to the same review stage is legal (faculty may
    /// replace the file while it sits with the expert or HOD), and a
    /// rejected syllabus may re-enter either review stage. `Approved`
    /// is terminal, and nothing ever returns to `Draft`.
    pub fn can_transition(self, to: SubjectStatus) -> bool {
        use SubjectStatus::{Approved, Draft, Rejected, SentToExpert, SentToHod};
        matches!(
            (self, to),
            (Draft, SentToExpert)
                | (Draft, SentToHod)
                | (SentToExpert, SentToExpert)
                | (SentToExpert, SentToHod)
                | (SentToExpert, Rejected)
                | (SentToHod, SentToHod)
                | (SentToHod, Approved)
                | (SentToHod, Rejected)
                | (Rejected, SentToExpert)
                | (Rejected, SentToHod)
        )
    }

    /// Validate a transition, returning `CoreError::IllegalTransition`
    /// for any move outside the table.
    pub fn ensure_transition(self, to: SubjectStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::IllegalTransition {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(SubjectStatus::Draft),
            "Sent to Expert" => Ok(SubjectStatus::SentToExpert),
            "Sent to HOD" => Ok(SubjectStatus::SentToHod),
            "Approved" => Ok(SubjectStatus::Approved),
            "Rejected" => Ok(SubjectStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown subject status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_round_trip() {
        for status in SubjectStatus::ALL {
            assert_eq!(status.as_str().parse::<SubjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "In Review".parse::<SubjectStatus>().unwrap_err();
        assert!(err.to_string().contains("Unknown subject status"));
    }

    #[test]
    fn test_draft_reaches_only_review_stages() {
        use SubjectStatus::*;
        assert!(Draft.can_transition(SentToExpert));
        assert!(Draft.can_transition(SentToHod));
        assert!(!Draft.can_transition(Approved));
        assert!(!Draft.can_transition(Rejected));
        assert!(!Draft.can_transition(Draft));
    }

    #[test]
    fn test_resubmission_to_same_stage_is_legal() {
        use SubjectStatus::*;
        assert!(SentToExpert.can_transition(SentToExpert));
        assert!(SentToHod.can_transition(SentToHod));
    }

    #[test]
    fn test_expert_stage_outcomes() {
        use SubjectStatus::*;
        assert!(SentToExpert.can_transition(SentToHod));
        assert!(SentToExpert.can_transition(Rejected));
        assert!(!SentToExpert.can_transition(Approved));
        assert!(!SentToExpert.can_transition(Draft));
    }

    #[test]
    fn test_hod_stage_outcomes() {
        use SubjectStatus::*;
        assert!(SentToHod.can_transition(Approved));
        assert!(SentToHod.can_transition(Rejected));
        assert!(!SentToHod.can_transition(SentToExpert));
        assert!(!SentToHod.can_transition(Draft));
    }

    #[test]
    fn test_approved_is_terminal() {
        for to in SubjectStatus::ALL {
            assert!(!SubjectStatus::Approved.can_transition(to));
        }
    }

    #[test]
    fn test_rejected_returns_to_review() {
        use SubjectStatus::*;
        assert!(Rejected.can_transition(SentToExpert));
        assert!(Rejected.can_transition(SentToHod));
        assert!(!Rejected.can_transition(Approved));
        assert!(!Rejected.can_transition(Draft));
        assert!(!Rejected.can_transition(Rejected));
    }

    #[test]
    fn test_nothing_returns_to_draft() {
        for from in SubjectStatus::ALL {
            assert!(!from.can_transition(SubjectStatus::Draft));
        }
    }

    #[test]
    fn test_illegal_transition_error_names_both_states() {
        let err = SubjectStatus::Approved
            .ensure_transition(SubjectStatus::Rejected)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Approved"));
        assert!(msg.contains("Rejected"));
    }
}
