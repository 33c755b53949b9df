use std::sync::Arc;

use syllabase_docgen::model::ModelClient;

use crate::config::ServerConfig;
use crate::notifier::Notifier;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: syllabase_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection registry (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Durable-log + socket-push notification service.
    pub notifier: Notifier,
    /// Generative model client for syllabus extraction.
    /// `None` when no API key is configured; the extraction endpoint
    /// reports an error in that case.
    pub model_client: Option<Arc<ModelClient>>,
}
