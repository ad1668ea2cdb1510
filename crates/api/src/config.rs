use std::path::PathBuf;

use ojisandex_catalog::paths::{DEFAULT_PUBLIC_DIR, PUBLIC_DIR_ENV};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path prefix the whole site is served under, e.g. `/ojisandex`.
    /// Normalized: empty for root, otherwise leading slash, no trailing
    /// slash.
    pub base_path: String,
    /// Public asset root holding `data/entries.json` and `images/`.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `BASE_PATH`            | `` (site root)          |
    /// | `OJISANDEX_PUBLIC_DIR` | `public`                |
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

        let base_path =
            normalize_base_path(&std::env::var("BASE_PATH").unwrap_or_default());

        let public_dir: PathBuf = std::env::var(PUBLIC_DIR_ENV)
            .unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.into())
            .into();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            base_path,
            public_dir,
        }
    }
}

/// Normalize a configured base path: `""` and `"/"` mean the site root,
/// anything else gets a leading slash and loses trailing ones.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "/" {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
