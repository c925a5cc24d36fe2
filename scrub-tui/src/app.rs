//! Player state shared between the event loop and the widgets

use crate::theme::Theme;

/// Message type for colored status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Playback and display state
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub playing: bool,
    pub looped: bool,
    /// Playback speed multiplier
    pub speed: f64,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub theme: Theme,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playing: false,
            looped: false,
            speed: 1.0,
            message: None,
            message_type: MessageType::Info,
            theme: Theme::default(),
        }
    }
}

impl PlayerState {
    pub fn new(theme: Theme, looped: bool) -> Self {
        Self {
            looped,
            theme,
            ..Default::default()
        }
    }

    /// Clear any displayed message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_type = MessageType::Info;
    }

    /// Set a message to display (info level)
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Info;
    }

    /// Set a success message
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Success;
    }

    /// Set a warning message
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Warning;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Error;
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn toggle_loop(&mut self) -> bool {
        self.looped = !self.looped;
        self.looped
    }
}
