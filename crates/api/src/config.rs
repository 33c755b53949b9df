use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The single entry `*` means any origin (without credentials).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown drain window in seconds (default: `20`).
    pub shutdown_timeout_secs: u64,
    /// Maximum request body size in bytes, bounding multipart uploads
    /// (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Generative model configuration for syllabus extraction.
    pub model: ModelConfig,
}

/// Generative model endpoint configuration.
///
/// Extraction is optional at runtime: without an API key the server
/// starts normally and the extraction endpoint reports an error.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Default multipart body cap: 25 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default            |
    /// |-------------------------|--------------------|
    /// | `HOST`                  | `0.0.0.0`          |
    /// | `PORT`                  | `3000`             |
    /// | `CORS_ORIGINS`          | `*`                |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`               |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `20`               |
    /// | `MAX_UPLOAD_BYTES`      | `26214400` (25 MiB)|
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let jwt = JwtConfig::from_env();
        let model = ModelConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            jwt,
            model,
        }
    }
}

impl ModelConfig {
    /// Load model configuration from environment variables.
    ///
    /// | Env Var           | Default                          |
    /// |-------------------|----------------------------------|
    /// | `GEMINI_API_KEY`  | unset (extraction disabled)      |
    /// | `GEMINI_BASE_URL` | public generative language API   |
    /// | `GEMINI_MODEL`    | `gemini-2.0-flash`               |
    pub fn from_env() -> Self {
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| syllabase_docgen::model::DEFAULT_BASE_URL.into());
        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| syllabase_docgen::model::DEFAULT_MODEL.into());
        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        Self {
            base_url,
            model,
            api_key,
        }
    }
}
