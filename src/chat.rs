use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Spinner text while a reply is pending
pub const THINKING: &str = "Thinking...";

/// First line of the block shown when a chat request fails
pub const CONNECTION_ERROR_TEXT: &str = "Connection Error: Unable to reach the AI service.";
/// Second line, the likely cause
pub const CONNECTION_ERROR_HINT: &str = "The backend service might not be running yet.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageType {
    User,
    Nota,
    System,
    Success,
    Error,
    Info,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::User => write!(f, "user"),
            MessageType::Nota => write!(f, "nota"),
            MessageType::System => write!(f, "system"),
            MessageType::Success => write!(f, "success"),
            MessageType::Error => write!(f, "error"),
            MessageType::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: DateTime<Local>,
    pub message_type: MessageType,
    pub content: String,
}

impl ChatMessage {
    pub fn new(message_type: MessageType, content: String) -> Self {
        Self {
            timestamp: Local::now(),
            message_type,
            content,
        }
    }
}

/// Chat view state
#[derive(Debug, Default)]
pub struct ChatPanel {
    /// Display name from the session check
    pub user_name: Option<String>,
    /// Set while a send is on the wire; further sends are dropped
    pub in_flight: bool,
}

impl ChatPanel {
    pub fn new(user_name: Option<String>) -> Self {
        Self {
            user_name,
            in_flight: false,
        }
    }

    /// Claim the in-flight slot. Returns false if a send already holds it.
    pub fn try_begin_send(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish_send(&mut self) {
        self.in_flight = false;
    }
}
