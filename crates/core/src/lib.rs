//! Shared domain types and rules for the syllabus portal.
//!
//! Everything in this crate is I/O-free: ID and timestamp aliases, the
//! role vocabulary, the syllabus lifecycle state machine, regulation
//! status constants, and the error type the API layer maps onto HTTP
//! responses.

pub mod error;
pub mod lifecycle;
pub mod regulation;
pub mod roles;
pub mod types;
