//! Syllabase API server library.
//!
//! Everything the binary entrypoint wires together is public here, so
//! the integration tests can assemble the same router and state.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifier;
pub mod routes;
pub mod state;
pub mod ws;
