//! Telegram horoscope bot
//!
//! Asks a chat for its zodiac sign and a day, validates both, then relays
//! the daily reading from the horoscope API.

pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use application::errors::BotError;
use application::messaging::MessageDispatcher;
use application::services::{CommandService, DialogueService};
use infrastructure::config::Config;
use infrastructure::horoscope::HoroscopeClient;
use infrastructure::storage::MemoryDialogueStore;

/// Wire the dispatcher from config: default commands, in-memory dialogue
/// store and the HTTP horoscope client.
pub fn build_dispatcher(config: &Config) -> Result<MessageDispatcher, BotError> {
    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults();

    let source = HoroscopeClient::new(&config.horoscope.base_url, config.horoscope_timeout())?;
    let dialogue = DialogueService::new(Arc::new(MemoryDialogueStore::new()), Arc::new(source));

    Ok(MessageDispatcher::new(commands, dialogue))
}
