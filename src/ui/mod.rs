use iced::{
    widget::{button, column, text, text_input, Space},
    Color, Element, Length,
};

use crate::domain::MessageTone;

/// Main view state
pub struct DownloadView {
    pub video_link: String,
    pub status_message: String,
    pub status_tone: MessageTone,
    pub is_loading: bool,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            video_link: String::new(),
            status_message: "Paste a video link to download".to_string(),
            status_tone: MessageTone::Neutral,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    VideoLinkChanged(String),
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::VideoLinkChanged(link) => {
                self.video_link = link;
            }
            DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    /// Clear the message area and hide the loading indicator.
    pub fn reset_status(&mut self) {
        self.status_message.clear();
        self.status_tone = MessageTone::Neutral;
        self.is_loading = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>, tone: MessageTone) {
        self.status_message = message.into();
        self.status_tone = tone;
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let status_color = match self.status_tone {
            MessageTone::Neutral => Color::from_rgb(0.35, 0.35, 0.35),
            MessageTone::Success => Color::from_rgb(0.0, 0.5, 0.0),
            MessageTone::Error => Color::from_rgb(0.8, 0.1, 0.1),
        };

        let mut content = column![
            text("Video Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Video link:").size(16),
            text_input("Paste a video link...", &self.video_link)
                .on_input(DownloadMessage::VideoLinkChanged)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14).color(status_color),
            Space::new().height(Length::Fixed(20.0)),
            button("Download video")
                .on_press_maybe((!self.is_loading).then_some(DownloadMessage::DownloadPressed))
                .padding([10, 20]),
        ];

        if let Some(loading) = self
            .is_loading
            .then(|| text("Processing video, please wait...").size(14))
        {
            content = content.push(loading);
        }

        content.padding(20).spacing(10).into()
    }
}
