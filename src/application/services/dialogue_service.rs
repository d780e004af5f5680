use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::dialogue::{step, DialogueEvent};
use crate::application::errors::BotError;
use crate::domain::entities::{DialogueState, Reply};
use crate::domain::traits::{DialogueStore, HoroscopeSource};

/// Runs the horoscope dialogue for every chat against a store and a source.
///
/// A step reads the chat's state, may await the fetch, then writes the new
/// state back. That is not atomic per chat: callers must not process two
/// messages from the same chat concurrently. The polling loops in `main.rs`
/// handle one update at a time.
pub struct DialogueService {
    store: Arc<dyn DialogueStore>,
    source: Arc<dyn HoroscopeSource>,
}

impl DialogueService {
    pub fn new(store: Arc<dyn DialogueStore>, source: Arc<dyn HoroscopeSource>) -> Self {
        Self { store, source }
    }

    /// Begin a dialogue, discarding any pending one for the chat
    pub async fn start(&self, chat_id: &str, now: DateTime<Utc>) -> Result<Vec<Reply>, BotError> {
        let state = self.store.get(chat_id).await?.unwrap_or(DialogueState::Done);
        if !state.is_terminal() {
            tracing::debug!("[{}] Restarting dialogue from {}", chat_id, state.name());
        }
        self.advance(chat_id, state, DialogueEvent::Trigger, now).await
    }

    /// Feed a free-text answer into the chat's dialogue.
    ///
    /// Returns `Ok(None)` when the chat has no dialogue in progress.
    pub async fn answer(&self, chat_id: &str, text: &str, now: DateTime<Utc>) -> Result<Option<Vec<Reply>>, BotError> {
        let Some(state) = self.store.get(chat_id).await? else {
            return Ok(None);
        };
        let replies = self.advance(chat_id, state, DialogueEvent::Text(text.to_string()), now).await?;
        Ok(Some(replies))
    }

    /// Abandon the chat's dialogue. Returns whether one was pending.
    pub async fn cancel(&self, chat_id: &str) -> Result<bool, BotError> {
        let removed = self.store.remove(chat_id).await?;
        if let Some(state) = removed {
            tracing::info!("[{}] Dialogue cancelled in {}", chat_id, state.name());
        }
        Ok(removed.is_some())
    }

    pub async fn state(&self, chat_id: &str) -> Result<Option<DialogueState>, BotError> {
        Ok(self.store.get(chat_id).await?)
    }

    async fn advance(
        &self,
        chat_id: &str,
        state: DialogueState,
        event: DialogueEvent,
        now: DateTime<Utc>,
    ) -> Result<Vec<Reply>, BotError> {
        let transition = step(state, event, now);
        let mut replies = transition.replies;
        let mut state = transition.state;

        if let DialogueState::Fetching { sign, day } = state {
            tracing::info!("[{}] Fetching horoscope for {} ({})", chat_id, sign, day);
            let outcome = self.source.fetch(sign, day).await;
            if let Err(e) = &outcome {
                tracing::warn!("[{}] Horoscope fetch failed: {}", chat_id, e);
            }
            let transition = step(state, DialogueEvent::Fetched(outcome), now);
            replies.extend(transition.replies);
            state = transition.state;
        }

        if state.is_terminal() {
            self.store.remove(chat_id).await?;
        } else {
            self.store.set(chat_id, state).await?;
        }
        tracing::debug!("[{}] Dialogue now {}", chat_id, state.name());

        Ok(replies)
    }
}
