use serde::{Deserialize, Serialize};

/// Body sent to the /download-video endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
}

/// Body returned by the backend on a non-2xx status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Origin of the hosted backend, used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://meu-baixador-de-videos.onrender.com";

/// Environment variable that overrides the backend origin.
pub const BACKEND_URL_ENV: &str = "VIDEO_DOWNLOADER_BACKEND_URL";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the backend origin, preferring the environment override.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(base_url) => Self { base_url },
            Err(_) => Self::default(),
        }
    }
}
