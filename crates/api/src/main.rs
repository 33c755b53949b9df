use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabase_api::auth::password::hash_password;
use syllabase_api::config::ServerConfig;
use syllabase_api::notifier::Notifier;
use syllabase_api::{routes, state, ws};
use syllabase_core::roles::ROLE_SUPERUSER;
use syllabase_db::models::user::CreateUser;
use syllabase_db::repositories::UserRepo;
use syllabase_db::DbPool;
use syllabase_docgen::model::ModelClient;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "syllabase=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = syllabase_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    syllabase_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    syllabase_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_superuser(&pool).await;

    // --- CORS ---
    let cors = build_cors_layer(&config);

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Notifier (durable log + WebSocket push) ---
    let notifier = Notifier::new(pool.clone(), Arc::clone(&ws_manager));

    // --- Generative model client (optional) ---
    let model_client = config.model.api_key.as_ref().map(|key| {
        Arc::new(ModelClient::new(
            config.model.base_url.clone(),
            config.model.model.clone(),
            key.clone(),
        ))
    });
    if model_client.is_some() {
        tracing::info!(model = %config.model.model, "Syllabus extraction enabled");
    } else {
        tracing::warn!("GEMINI_API_KEY not set, syllabus extraction disabled");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        notifier,
        model_client,
    };

    // --- Request ID header name ---
    let request_id_header = HeaderName::from_static("x-request-id");

    // --- Router ---
    // Middleware applies bottom-up: request id first, then tracing,
    // body cap, timeout, panic recovery innermost.
    let app = Router::new()
        // Liveness probe stays at root level, outside /api/v1.
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Body size cap covering the multipart upload endpoints.
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let cleanup = async {
        let ws_count = ws_manager.connection_count().await;
        tracing::info!(ws_count, "Closing remaining WebSocket connections");
        ws_manager.shutdown_all().await;
    };
    if tokio::time::timeout(Duration::from_secs(config.shutdown_timeout_secs), cleanup)
        .await
        .is_err()
    {
        tracing::warn!("Cleanup did not finish within the shutdown window");
    }

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Create the initial superuser account if none exists for the
/// configured email.
///
/// Controlled by `BOOTSTRAP_SUPERUSER_EMAIL` / `BOOTSTRAP_SUPERUSER_PASSWORD`
/// (plus optional `BOOTSTRAP_SUPERUSER_NAME`); without both variables the
/// step is skipped entirely, so routine restarts need no configuration.
async fn bootstrap_superuser(pool: &DbPool) {
    let (Ok(email), Ok(password)) = (
        std::env::var("BOOTSTRAP_SUPERUSER_EMAIL"),
        std::env::var("BOOTSTRAP_SUPERUSER_PASSWORD"),
    ) else {
        return;
    };
    let name =
        std::env::var("BOOTSTRAP_SUPERUSER_NAME").unwrap_or_else(|_| "Superuser".to_string());

    let existing = UserRepo::find_by_email(pool, &email)
        .await
        .expect("Failed to look up bootstrap superuser");
    if existing.is_some() {
        tracing::debug!(%email, "Bootstrap superuser already exists");
        return;
    }

    let password_hash = hash_password(&password).expect("Failed to hash bootstrap password");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name,
            email,
            password_hash,
            roles: vec![ROLE_SUPERUSER.to_string()],
            department: None,
        },
    )
    .await
    .expect("Failed to create bootstrap superuser");
    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap superuser created");
}

/// Resolve when a termination signal arrives.
///
/// SIGINT covers interactive stops, SIGTERM covers process managers
/// (systemd, Docker, Kubernetes). On non-Unix targets only Ctrl-C is
/// wired up.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Termination signal received, starting graceful shutdown");
}

/// Build the CORS middleware layer from server configuration.
///
/// A misconfigured origin aborts startup via panic rather than serving
/// with a broken policy. The single origin `*` switches to a wildcard
/// layer without credentials; tower-http rejects the wildcard plus
/// credentials combination at runtime, as browsers do.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ];
    let base = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if config.cors_origins == ["*"] {
        return base.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}
