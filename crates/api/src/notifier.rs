//! Durable-log + socket-push notification service.
//!
//! Every user-facing event writes a notification row first, then pushes
//! the same payload over each WebSocket connection bound to the target
//! user. Offline users get nothing pushed; the row is the only trace and
//! is fetched on next page load. There is no queue and no replay.

use std::sync::Arc;

use axum::extract::ws::Message;
use syllabase_core::types::DbId;
use syllabase_db::models::notification::Notification;
use syllabase_db::repositories::NotificationRepo;
use syllabase_db::DbPool;

use crate::ws::WsManager;

/// Creates notification rows and pushes them to connected clients.
///
/// Cheap to clone; carried in `AppState`.
#[derive(Clone)]
pub struct Notifier {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl Notifier {
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Persist a notification for the user and push it to every socket
    /// bound to them.
    ///
    /// The push is best-effort: zero reached connections just means the
    /// user is offline. A failed insert propagates; the caller's entity
    /// mutation has already committed by then and is not rolled back.
    pub async fn notify(&self, user_id: DbId, message: &str) -> Result<Notification, sqlx::Error> {
        let notification = NotificationRepo::create(&self.pool, user_id, message).await?;

        let payload = serde_json::json!({
            "event": format!("notification:{user_id}"),
            "data": notification,
        });
        let reached = self
            .ws_manager
            .send_to_user(user_id, Message::Text(payload.to_string().into()))
            .await;

        if reached == 0 {
            tracing::debug!(user_id, "User offline, notification stored only");
        } else {
            tracing::debug!(user_id, reached, "Notification pushed");
        }

        Ok(notification)
    }
}
