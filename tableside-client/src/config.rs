//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default delay between live feed reconnect attempts
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Client configuration for connecting to the ordering backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | TABLESIDE_API_BASE_URL | http://localhost:8080 | REST API origin |
/// | TABLESIDE_WEBSOCKET_URL | ws://localhost:8080/ws | Push broker URL |
/// | TABLESIDE_STORAGE_DIR | ./.tableside | Token file directory |
/// | TABLESIDE_APP_ORIGIN | http://localhost:5173 | Public origin used in table URLs |
/// | TABLESIDE_TIMEOUT_SECS | 30 | Request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// STOMP-over-WebSocket broker URL (e.g., "ws://localhost:8080/ws")
    pub ws_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Delay before the live feed reconnects
    pub reconnect_delay: Duration,

    /// Directory holding the persisted tokens
    pub storage_dir: PathBuf,

    /// Origin customers open menus on, used for table provisioning URLs
    pub app_origin: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let ws_url = format!(
            "{}/ws",
            base_url
                .trim_end_matches('/')
                .replacen("https://", "wss://", 1)
                .replacen("http://", "ws://", 1)
        );
        Self {
            base_url,
            ws_url,
            timeout: 30,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            storage_dir: PathBuf::from(".tableside"),
            app_origin: "http://localhost:5173".into(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("TABLESIDE_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Ok(ws_url) = std::env::var("TABLESIDE_WEBSOCKET_URL") {
            config.ws_url = ws_url;
        }
        if let Ok(dir) = std::env::var("TABLESIDE_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Ok(origin) = std::env::var("TABLESIDE_APP_ORIGIN") {
            config.app_origin = origin;
        }
        config.timeout = std::env::var("TABLESIDE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.timeout);
        config
    }

    /// Set the broker URL
    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the live feed reconnect delay
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set the token storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the public app origin
    pub fn with_app_origin(mut self, origin: impl Into<String>) -> Self {
        self.app_origin = origin.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
