use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::utils::filename_from_disposition;

use super::models::{ApiConfig, DownloadRequest, ErrorResponse};

const DOWNLOAD_PATH: &str = "download-video";

/// Shown when the backend fails without a usable JSON error body.
pub const DEFAULT_SERVER_ERROR: &str = "An error occurred while processing the video.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("invalid backend URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("server error ({status}): {message}")]
    ServerError { status: StatusCode, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// A 2xx answer from the backend: the attachment name it suggested and the
/// raw body stream, left unread for the caller to persist.
pub struct FileDelivery {
    pub suggested_filename: Option<String>,
    pub stream: BoxStream<'static, Result<bytes::Bytes>>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            DOWNLOAD_PATH
        );
        Ok(Url::parse(&raw)?)
    }

    /// POST the video URL to the backend.
    ///
    /// A 2xx status yields the body stream without reading it; a non-2xx
    /// status is turned into `ServerError` with the message from the JSON
    /// `error` field, falling back to [`DEFAULT_SERVER_ERROR`] when the body
    /// is missing or malformed.
    pub async fn request_download(&self, video_url: &str) -> Result<FileDelivery> {
        let endpoint = self.endpoint()?;
        debug!(%endpoint, "requesting video download");

        let response = self
            .http
            .post(endpoint)
            .json(&DownloadRequest {
                url: video_url.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string());
            warn!(%status, %message, "backend rejected download request");
            return Err(ApiError::ServerError { status, message });
        }

        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition);

        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok(FileDelivery {
            suggested_filename,
            stream: stream.boxed(),
        })
    }
}
