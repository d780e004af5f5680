use chrono::{DateTime, Utc};

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    Empty,
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An incoming message, already detached from the transport it arrived on
#[derive(Debug, Clone)]
pub struct Message {
    /// Conversation identity; dialogue state is keyed on it
    pub chat_id: String,
    /// Display name, for logs
    pub sender: Option<String>,
    pub content: Content,
    /// Anchors the day look-back window
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender: None,
            content,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(chat_id: impl Into<String>, name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(chat_id, Content::Command { name: name.into(), args })
    }

    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let msg = Message::from_text("1", "leo")
            .with_sender(Some("sam".to_string()))
            .with_platform("telegram");
        assert_eq!(msg.sender.as_deref(), Some("sam"));
        assert_eq!(msg.platform, "telegram");
        assert!(!msg.content.is_command());
        assert!(Message::from_command("1", "help", vec![]).content.is_command());
    }
}
