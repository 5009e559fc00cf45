use crate::api::{ApiClient, ApiConfig};
use crate::application::{DownloadCoordinator, DownloadEvent};
use crate::domain::{AppError, MessageTone};
use crate::ui::{DownloadMessage, DownloadView};
use futures::StreamExt;
use iced::Task;
use tracing::{debug, error};

const EMPTY_INPUT_PROMPT: &str = "Please enter a video link.";
const DOWNLOAD_STARTED: &str = "Download started!";
const DOWNLOAD_CANCELLED: &str = "Download cancelled.";
const CONNECTIVITY_ERROR: &str = "Could not connect to the server, or a network error occurred.";

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
    // Token of the one request allowed in flight; events carrying any other
    // token are stale and must not touch the view.
    active_request: Option<u64>,
    next_request: u64,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let api_client = ApiClient::new(ApiConfig::from_env());

        Self {
            view: DownloadView::default(),
            coordinator: DownloadCoordinator::new(api_client),
            active_request: None,
            next_request: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Ui(DownloadMessage),
    Download { request: u64, event: DownloadEvent },
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::Ui(ui_msg) => {
            app.view.update(ui_msg.clone());

            if let DownloadMessage::DownloadPressed = ui_msg {
                return submit(app);
            }
        }
        Message::Download { request, event } => {
            if app.active_request != Some(request) {
                debug!(request, "discarding event from a stale request");
                return Task::none();
            }
            apply_event(app, event);
        }
    }
    Task::none()
}

fn submit(app: &mut DownloadApp) -> Task<Message> {
    // The button is disabled while a request is in flight; the token keeps
    // any other path from starting a second one.
    if app.active_request.is_some() {
        return Task::none();
    }

    let video_link = app.view.video_link.trim().to_string();
    app.view.reset_status();

    if video_link.is_empty() {
        app.view.set_status(EMPTY_INPUT_PROMPT, MessageTone::Neutral);
        return Task::none();
    }

    let request = app.next_request;
    app.next_request += 1;
    app.active_request = Some(request);
    app.view.is_loading = true;

    let events = app.coordinator.download_events(video_link);
    Task::stream(events.map(move |event| Message::Download { request, event }))
}

fn apply_event(app: &mut DownloadApp, event: DownloadEvent) {
    match event {
        DownloadEvent::Accepted { .. } => {
            app.view.set_status(DOWNLOAD_STARTED, MessageTone::Success);
        }
        DownloadEvent::Cancelled => {
            finish(app);
            app.view.set_status(DOWNLOAD_CANCELLED, MessageTone::Neutral);
        }
        DownloadEvent::Completed(path) => {
            finish(app);
            app.view
                .set_status(format!("Saved: {}", path.display()), MessageTone::Success);
        }
        DownloadEvent::Failed(failure) => {
            finish(app);
            match failure {
                AppError::Server(message) => {
                    app.view
                        .set_status(format!("Error: {}", message), MessageTone::Error);
                }
                AppError::Network(reason) => {
                    error!(%reason, "download request failed in transit");
                    app.view.set_status(CONNECTIVITY_ERROR, MessageTone::Error);
                }
                AppError::Io(message) => {
                    app.view
                        .set_status(format!("Error: {}", message), MessageTone::Error);
                }
            }
        }
    }
}

fn finish(app: &mut DownloadApp) {
    app.active_request = None;
    app.view.is_loading = false;
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::Ui)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn press_download(app: &mut DownloadApp) {
        let _ = update(app, Message::Ui(DownloadMessage::DownloadPressed));
    }

    fn deliver(app: &mut DownloadApp, request: u64, event: DownloadEvent) {
        let _ = update(app, Message::Download { request, event });
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let mut app = DownloadApp::new();
        app.view.video_link = "   ".to_string();

        press_download(&mut app);

        assert_eq!(app.view.status_message, EMPTY_INPUT_PROMPT);
        assert!(!app.view.is_loading);
        assert!(app.active_request.is_none());
    }

    #[test]
    fn test_submit_shows_loading_and_arms_token() {
        let mut app = DownloadApp::new();
        app.view.video_link = "https://v.example/w".to_string();

        press_download(&mut app);

        assert!(app.view.is_loading);
        assert_eq!(app.active_request, Some(0));
        assert_eq!(app.next_request, 1);
    }

    #[test]
    fn test_second_press_is_ignored_while_in_flight() {
        let mut app = DownloadApp::new();
        app.view.video_link = "https://v.example/w".to_string();
        press_download(&mut app);

        press_download(&mut app);

        assert_eq!(app.active_request, Some(0));
        assert_eq!(app.next_request, 1);
    }

    #[test]
    fn test_stale_event_does_not_touch_view() {
        let mut app = DownloadApp::new();
        app.active_request = Some(5);
        app.view.is_loading = true;
        app.view.set_status("Download started!", MessageTone::Success);

        deliver(
            &mut app,
            4,
            DownloadEvent::Failed(AppError::Server("old failure".to_string())),
        );

        assert_eq!(app.view.status_message, "Download started!");
        assert_eq!(app.view.status_tone, MessageTone::Success);
        assert!(app.view.is_loading);
        assert_eq!(app.active_request, Some(5));
    }

    #[test]
    fn test_accepted_shows_success_and_keeps_loading() {
        let mut app = DownloadApp::new();
        app.active_request = Some(3);
        app.view.is_loading = true;

        deliver(
            &mut app,
            3,
            DownloadEvent::Accepted {
                suggested_filename: "clip.mp4".to_string(),
            },
        );

        assert_eq!(app.view.status_message, DOWNLOAD_STARTED);
        assert_eq!(app.view.status_tone, MessageTone::Success);
        assert!(app.view.is_loading);
    }

    #[test]
    fn test_server_error_is_prefixed() {
        let mut app = DownloadApp::new();
        app.active_request = Some(1);
        app.view.is_loading = true;

        deliver(
            &mut app,
            1,
            DownloadEvent::Failed(AppError::Server("Invalid URL".to_string())),
        );

        assert_eq!(app.view.status_message, "Error: Invalid URL");
        assert_eq!(app.view.status_tone, MessageTone::Error);
        assert!(!app.view.is_loading);
        assert!(app.active_request.is_none());
    }

    #[test]
    fn test_network_error_shows_connectivity_message() {
        let mut app = DownloadApp::new();
        app.active_request = Some(1);
        app.view.is_loading = true;

        deliver(
            &mut app,
            1,
            DownloadEvent::Failed(AppError::Network("connection refused".to_string())),
        );

        assert_eq!(app.view.status_message, CONNECTIVITY_ERROR);
        assert_eq!(app.view.status_tone, MessageTone::Error);
        assert!(!app.view.is_loading);
    }

    #[test]
    fn test_completed_reports_saved_path() {
        let mut app = DownloadApp::new();
        app.active_request = Some(2);
        app.view.is_loading = true;

        deliver(
            &mut app,
            2,
            DownloadEvent::Completed(PathBuf::from("/tmp/clip.mp4")),
        );

        assert_eq!(app.view.status_message, "Saved: /tmp/clip.mp4");
        assert_eq!(app.view.status_tone, MessageTone::Success);
        assert!(!app.view.is_loading);
        assert!(app.active_request.is_none());
    }

    #[test]
    fn test_cancelled_hides_loading() {
        let mut app = DownloadApp::new();
        app.active_request = Some(2);
        app.view.is_loading = true;

        deliver(&mut app, 2, DownloadEvent::Cancelled);

        assert_eq!(app.view.status_message, DOWNLOAD_CANCELLED);
        assert_eq!(app.view.status_tone, MessageTone::Neutral);
        assert!(!app.view.is_loading);
        assert!(app.active_request.is_none());
    }
}
