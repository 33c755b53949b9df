//! WebSocket push channel for notifications.
//!
//! The connection registry tracks open sockets and their user bindings;
//! the heartbeat task keeps them alive, and the upgrade handler feeds
//! inbound join messages into the registry.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
