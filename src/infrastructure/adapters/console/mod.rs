//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::Reply;
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for the single console conversation
pub const CONSOLE_CHAT_ID: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                username: "console".to_string(),
            },
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Next line from stdin, `None` on EOF
    pub async fn read_line(&self) -> Result<Option<String>, BotError> {
        let mut input = self.input.lock().await;
        input.next_line()
            .await
            .map_err(|e| BotError::Internal(format!("stdin: {}", e)))
    }

    /// How a reply looks in the terminal
    pub fn render(reply: &Reply) -> String {
        format!("[BOT] {}", reply.text)
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        println!("Type /horoscope to begin, Ctrl-D to quit.");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, reply: &Reply) -> Result<String, BotError> {
        println!("{}", Self::render(reply));
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
