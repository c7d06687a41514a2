/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// AI gateway settings used by certificate extraction.
    pub extraction: ExtractionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            extraction: ExtractionConfig::from_env(),
        }
    }
}

/// Settings for the OpenAI-compatible chat completions gateway.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Gateway base URL; `/v1/chat/completions` is appended.
    pub gateway_url: String,
    /// Bearer token. Extraction reports "not configured" when absent.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ExtractionConfig {
    /// Load extraction settings from environment variables with defaults.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `AI_GATEWAY_URL`          | `https://ai.gateway.lovable.dev` |
    /// | `AI_GATEWAY_API_KEY`      | unset                          |
    /// | `AI_MODEL`                | `google/gemini-2.5-flash`      |
    /// | `EXTRACTION_TIMEOUT_SECS` | `60`                           |
    pub fn from_env() -> Self {
        let gateway_url = std::env::var("AI_GATEWAY_URL")
            .unwrap_or_else(|_| "https://ai.gateway.lovable.dev".into())
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("AI_GATEWAY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model =
            std::env::var("AI_MODEL").unwrap_or_else(|_| "google/gemini-2.5-flash".into());

        let timeout_secs: u64 = std::env::var("EXTRACTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("EXTRACTION_TIMEOUT_SECS must be a valid u64");

        Self {
            gateway_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}
