use std::path::PathBuf;

use stockroom_core::depreciation::DEFAULT_REPLACEMENT_THRESHOLD_DAYS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory item photos are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Usage days past which an item is flagged for replacement.
    pub replacement_threshold_days: i32,
    /// Period of the background replacement sweep; `0` disables it.
    pub replacement_sweep_interval_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `HOST`                            | `0.0.0.0`               |
    /// | `PORT`                            | `8080`                  |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                    |
    /// | `UPLOAD_DIR`                      | `uploads`               |
    /// | `MAX_UPLOAD_BYTES`                | `10485760`              |
    /// | `REPLACEMENT_THRESHOLD_DAYS`      | `100`                   |
    /// | `REPLACEMENT_SWEEP_INTERVAL_SECS` | `3600`                  |
    /// | `COOKIE_SECURE`                   | `false`                 |
    ///
    /// `DATABASE_URL` is read separately by `main`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
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

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let replacement_threshold_days: i32 = std::env::var("REPLACEMENT_THRESHOLD_DAYS")
            .ok()
            .map(|v| {
                v.parse()
                    .expect("REPLACEMENT_THRESHOLD_DAYS must be a valid i32")
            })
            .unwrap_or(DEFAULT_REPLACEMENT_THRESHOLD_DAYS);

        let replacement_sweep_interval_secs: u64 =
            std::env::var("REPLACEMENT_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()
                .expect("REPLACEMENT_SWEEP_INTERVAL_SECS must be a valid u64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            replacement_threshold_days,
            replacement_sweep_interval_secs,
            cookie_secure,
        }
    }
}
