use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use syllabase_core::types::DbId;
use tokio::sync::mpsc;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Inbound socket control message. The only recognized form is
/// `{"type": "join", "userId": <id>}`, which binds the connection to a
/// user so notification pushes can reach it.
#[derive(Debug, Deserialize)]
struct ClientMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "userId")]
    user_id: Option<DbId>,
}

/// `GET /api/v1/ws` upgrade endpoint.
///
/// Connections start anonymous; pushes only reach them once the join
/// handshake binds a user id.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

/// Drive one upgraded socket until it disconnects.
///
/// The outbound half is pumped by a spawned task fed from the manager
/// channel. The inbound half is consumed here, handling the join
/// handshake and close frames. Registry cleanup happens on the way out
/// no matter which half ended first.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let rx = ws_manager.add(conn_id.clone(), None).await;
    tracing::info!(conn_id = %conn_id, "WebSocket client connected");

    let (sink, mut stream) = socket.split();
    let outbound = tokio::spawn(pump_outbound(rx, sink, conn_id.clone()));

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_client_message(&ws_manager, &conn_id, &text).await,
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => tracing::trace!(conn_id = %conn_id, "Pong"),
            // Binary and ping frames carry nothing for us.
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    outbound.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket client disconnected");
}

/// Forward messages queued on the manager channel into the socket sink
/// until either end closes.
async fn pump_outbound(
    mut rx: mpsc::UnboundedReceiver<Message>,
    mut sink: SplitSink<WebSocket, Message>,
    conn_id: String,
) {
    while let Some(msg) = rx.recv().await {
        if sink.send(msg).await.is_err() {
            tracing::debug!(conn_id = %conn_id, "WebSocket sink closed");
            break;
        }
    }
}

/// Parse and apply an inbound text frame. Unknown or malformed messages
/// are logged and dropped; the connection stays open.
async fn handle_client_message(ws_manager: &WsManager, conn_id: &str, text: &str) {
    let parsed: ClientMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Unparseable socket message");
            return;
        }
    };

    match (parsed.kind.as_str(), parsed.user_id) {
        ("join", Some(user_id)) => {
            if ws_manager.bind_user(conn_id, user_id).await {
                tracing::info!(conn_id = %conn_id, user_id, "Connection joined user channel");
            }
        }
        ("join", None) => {
            tracing::debug!(conn_id = %conn_id, "Join message without userId");
        }
        (other, _) => {
            tracing::debug!(conn_id = %conn_id, kind = other, "Unknown socket message type");
        }
    }
}
