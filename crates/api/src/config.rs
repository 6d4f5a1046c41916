use std::fmt;

use focus_core::identity::IdentityClientConfig;
use focus_core::provider::DEFAULT_REGION_CODE;
use focus_youtube::DEFAULT_BASE_URL;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8050`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection string for the preference store.
    pub database_url: String,
    /// Upstream video API settings.
    pub youtube: YouTubeConfig,
    /// Web configuration handed to the browser sign-in widget.
    pub identity: IdentityClientConfig,
}

/// YouTube Data API settings.
#[derive(Clone)]
pub struct YouTubeConfig {
    /// `None` when unset or blank; search and trending then report
    /// "not configured" instead of calling out.
    pub api_key: Option<String>,
    pub region_code: String,
    pub base_url: String,
}

impl fmt::Debug for YouTubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("region_code", &self.region_code)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                                  |
    /// |--------------------------------|------------------------------------------|
    /// | `HOST`                         | `0.0.0.0`                                |
    /// | `PORT`                         | `8050`                                   |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                                     |
    /// | `DATABASE_URL`                 | `sqlite://user_preferences.db?mode=rwc`  |
    /// | `YOUTUBE_API_KEY`              | unset                                    |
    /// | `YOUTUBE_REGION_CODE`          | `IN`                                     |
    /// | `YOUTUBE_API_BASE_URL`         | `https://www.googleapis.com/youtube/v3`  |
    /// | `FIREBASE_API_KEY` etc.        | unset                                    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "8050")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = var("DATABASE_URL", "sqlite://user_preferences.db?mode=rwc");

        let youtube = YouTubeConfig {
            api_key: optional("YOUTUBE_API_KEY"),
            region_code: optional("YOUTUBE_REGION_CODE")
                .unwrap_or_else(|| DEFAULT_REGION_CODE.to_string()),
            base_url: optional("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        let identity = IdentityClientConfig {
            api_key: optional("FIREBASE_API_KEY").unwrap_or_default(),
            auth_domain: optional("FIREBASE_AUTH_DOMAIN").unwrap_or_default(),
            project_id: optional("FIREBASE_PROJECT_ID").unwrap_or_default(),
            storage_bucket: optional("FIREBASE_STORAGE_BUCKET").unwrap_or_default(),
            messaging_sender_id: optional("FIREBASE_MESSAGING_SENDER_ID").unwrap_or_default(),
            app_id: optional("FIREBASE_APP_ID").unwrap_or_default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            youtube,
            identity,
        }
    }
}
