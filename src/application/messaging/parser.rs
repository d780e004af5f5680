//! Message parser - Parses raw text into structured messages

use crate::domain::entities::{Content, Message};

/// Parses incoming text into Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>) -> Message {
        let text = text.into();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Message::new(chat_id, Content::Empty);
        }

        // Telegram always uses '/', a custom prefix is accepted as well
        let body = trimmed.strip_prefix('/')
            .or_else(|| {
                if self.command_prefix.is_empty() {
                    None
                } else {
                    trimmed.strip_prefix(self.command_prefix.as_str())
                }
            });

        // The name has to follow the prefix directly: "/ leo" is plain text
        let body = body.filter(|b| b.chars().next().is_some_and(|c| !c.is_whitespace()));
        if let Some(body) = body {
            return self.parse_command(chat_id, body);
        }

        Message::new(chat_id, Content::Text(text))
    }

    /// Parse a command body (prefix already removed)
    fn parse_command(&self, chat_id: impl Into<String>, body: &str) -> Message {
        let mut parts = body.split_whitespace();
        let head = parts.next().unwrap_or_default();
        // "/horoscope@SomeBot" in group chats
        let name = head.split('@').next().unwrap_or_default().to_string();
        let args = parts.map(|s| s.to_string()).collect();

        Message::from_command(chat_id, name, args)
    }
}
