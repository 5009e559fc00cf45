use std::path::{Path, PathBuf};

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError, FileDelivery},
    domain::AppError,
    utils::sanitize_filename,
};

/// Used when the backend suggests no attachment name.
const DEFAULT_FILENAME: &str = "video.mp4";

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    /// The backend accepted the request and is streaming a file.
    Accepted { suggested_filename: String },
    /// The user dismissed the save dialog.
    Cancelled,
    /// The file was fully written to disk.
    Completed(PathBuf),
    Failed(AppError),
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Drive one click-to-completion cycle: POST the link, let the user pick
    /// a save location, then copy the body stream to disk. Every exit path
    /// ends the stream with a terminal event (`Cancelled`, `Completed` or
    /// `Failed`).
    pub fn download_events(&self, video_url: String) -> BoxStream<'static, DownloadEvent> {
        futures::stream::unfold(
            FetchState::Request {
                client: self.api_client.clone(),
                video_url,
            },
            |state| async move {
                match state {
                    FetchState::Request { client, video_url } => {
                        match client.request_download(&video_url).await {
                            Ok(delivery) => {
                                let suggested_filename = attachment_name(&delivery);
                                Some((
                                    DownloadEvent::Accepted {
                                        suggested_filename: suggested_filename.clone(),
                                    },
                                    FetchState::Persist {
                                        delivery,
                                        suggested_filename,
                                    },
                                ))
                            }
                            Err(e) => {
                                Some((DownloadEvent::Failed(map_api_error(e)), FetchState::Finished))
                            }
                        }
                    }
                    FetchState::Persist {
                        delivery,
                        suggested_filename,
                    } => match choose_save_path(&suggested_filename).await {
                        None => Some((DownloadEvent::Cancelled, FetchState::Finished)),
                        Some(path) => match persist_delivery(delivery, &path).await {
                            Ok(()) => {
                                info!(path = %path.display(), "download saved");
                                Some((DownloadEvent::Completed(path), FetchState::Finished))
                            }
                            Err(e) => Some((DownloadEvent::Failed(e), FetchState::Finished)),
                        },
                    },
                    FetchState::Finished => None,
                }
            },
        )
        .boxed()
    }
}

enum FetchState {
    Request {
        client: ApiClient,
        video_url: String,
    },
    Persist {
        delivery: FileDelivery,
        suggested_filename: String,
    },
    Finished,
}

fn attachment_name(delivery: &FileDelivery) -> String {
    let raw = delivery
        .suggested_filename
        .as_deref()
        .unwrap_or(DEFAULT_FILENAME);
    sanitize_filename(raw)
        .trim_matches(|c| c == '.' || c == ' ')
        .to_string()
}

fn map_api_error(error: ApiError) -> AppError {
    match error {
        ApiError::ServerError { message, .. } => AppError::Server(message),
        ApiError::RequestError(e) => AppError::Network(e.to_string()),
        ApiError::InvalidEndpoint(e) => AppError::Network(e.to_string()),
    }
}

async fn choose_save_path(suggested_filename: &str) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_file_name(suggested_filename)
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn persist_delivery(delivery: FileDelivery, path: &Path) -> Result<(), AppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

    let mut stream = delivery.stream;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_api_error)?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;
    }

    file.sync_all()
        .await
        .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

    Ok(())
}
