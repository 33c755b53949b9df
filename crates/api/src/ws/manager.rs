//! Connection registry for notification pushes.
//!
//! One entry per open socket, keyed by a generated connection id. A
//! user with several open tabs has one entry per tab; each bound tab
//! receives every push independently.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use syllabase_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// User this connection is bound to, once a `join` message arrives.
    /// Unbound connections receive heartbeat pings but no notifications.
    pub user_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Registry of all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; constructed once in `main`,
/// wrapped in `Arc`, and injected through application state rather
/// than held as a global.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection, initially unbound.
    ///
    /// Returns the receiver half of the per-connection channel; the
    /// socket task forwards whatever arrives on it to the sink.
    /// Registering an id that already exists replaces the old entry.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: Option<DbId>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut conns = self.connections.write().await;
        conns.insert(
            conn_id,
            WsConnection {
                user_id,
                sender: tx,
                connected_at: chrono::Utc::now(),
            },
        );
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Bind a connection to a user id (the socket `join` handshake).
    ///
    /// Idempotent: re-joining with the same or a different user id simply
    /// overwrites the binding. Returns `false` when the connection is
    /// unknown (already removed).
    pub async fn bind_user(&self, conn_id: &str, user_id: DbId) -> bool {
        let mut conns = self.connections.write().await;
        let Some(conn) = conns.get_mut(conn_id) else {
            return false;
        };
        conn.user_id = Some(user_id);
        true
    }

    /// Push a message to every connection bound to the given user.
    ///
    /// Returns how many connections were targeted. Zero means the user
    /// is offline; callers log and move on, the durable notification
    /// row is the only trace. Send failures on individual channels are
    /// ignored (the owning socket task cleans up on its next turn).
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut delivered = 0;
        for conn in conns.values().filter(|c| c.user_id == Some(user_id)) {
            let _ = conn.sender.send(message.clone());
            delivered += 1;
        }
        delivered
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Driven by the heartbeat task so intermediaries do not idle out
    /// long-lived sockets.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection and empty the registry.
    ///
    /// Called once during graceful shutdown, after the server has
    /// stopped accepting requests.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for (_, conn) in conns.drain() {
            let _ = conn.sender.send(Message::Close(None));
        }
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
