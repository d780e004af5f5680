//! Message dispatcher - Routes messages to commands or the pending dialogue

use crate::application::errors::{BotError, CommandError};
use crate::application::services::{CommandService, DialogueService};
use crate::domain::entities::{CommandOutput, Content, Message, Reply};
use super::parser::MessageParser;

pub const NO_DIALOGUE_HINT: &str = "Send /horoscope to get your daily horoscope.";
pub const CANCELLED: &str = "Dialogue cancelled.";
pub const NOTHING_TO_CANCEL: &str = "There is nothing to cancel.";

/// Message dispatcher - commands first, then free text into the dialogue
pub struct MessageDispatcher {
    parser: MessageParser,
    commands: CommandService,
    dialogue: DialogueService,
}

impl MessageDispatcher {
    pub fn new(commands: CommandService, dialogue: DialogueService) -> Self {
        Self {
            parser: MessageParser::new(commands.prefix()),
            commands,
            dialogue,
        }
    }

    pub fn commands(&self) -> &CommandService {
        &self.commands
    }

    pub fn parser(&self) -> &MessageParser {
        &self.parser
    }

    /// Parse and process a raw text message
    pub async fn process_text(&self, chat_id: impl Into<String>, text: impl Into<String>) -> Result<Vec<Reply>, BotError> {
        let message = self.parser.parse(chat_id, text);
        self.process(&message).await
    }

    /// Process a message and return the replies to send, in order
    pub async fn process(&self, message: &Message) -> Result<Vec<Reply>, BotError> {
        let chat_id = message.chat_id.as_str();
        tracing::debug!(
            "[{}] {} message from {}",
            chat_id,
            message.platform,
            message.sender.as_deref().unwrap_or("unknown")
        );

        match &message.content {
            Content::Command { name, .. } => {
                tracing::debug!("[{}] Command: /{}", chat_id, name);
                match self.commands.handle(message) {
                    Ok(Some(output)) => self.run_output(chat_id, output, message).await,
                    Ok(None) => Ok(Vec::new()),
                    Err(CommandError::NotFound(name)) => Ok(vec![Reply::plain(format!(
                        "Unknown command: {}{}. Send {}help for the list.",
                        self.commands.prefix(), name, self.commands.prefix()
                    ))]),
                    Err(e) => Err(BotError::Command(e)),
                }
            }
            Content::Text(text) => {
                match self.dialogue.answer(chat_id, text, message.timestamp).await? {
                    Some(replies) => Ok(replies),
                    None => Ok(vec![Reply::plain(NO_DIALOGUE_HINT)]),
                }
            }
            Content::Empty => Ok(Vec::new()),
        }
    }

    async fn run_output(&self, chat_id: &str, output: CommandOutput, message: &Message) -> Result<Vec<Reply>, BotError> {
        match output {
            CommandOutput::Reply(replies) => Ok(replies),
            CommandOutput::StartDialogue => self.dialogue.start(chat_id, message.timestamp).await,
            CommandOutput::CancelDialogue => {
                let text = if self.dialogue.cancel(chat_id).await? { CANCELLED } else { NOTHING_TO_CANCEL };
                Ok(vec![Reply::plain(text)])
            }
        }
    }
}
