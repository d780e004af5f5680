//! In-memory dialogue storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::DialogueState;
use crate::domain::traits::DialogueStore;

/// Dialogue state per chat, lost on restart
#[derive(Default)]
pub struct MemoryDialogueStore {
    states: RwLock<HashMap<String, DialogueState>>,
}

impl MemoryDialogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with a dialogue in progress
    pub fn len(&self) -> usize {
        self.states.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Poisoned("dialogue states".to_string())
}

#[async_trait]
impl DialogueStore for MemoryDialogueStore {
    async fn get(&self, chat_id: &str) -> Result<Option<DialogueState>, StorageError> {
        let states = self.states.read().map_err(poisoned)?;
        Ok(states.get(chat_id).copied())
    }

    async fn set(&self, chat_id: &str, state: DialogueState) -> Result<(), StorageError> {
        let mut states = self.states.write().map_err(poisoned)?;
        states.insert(chat_id.to_string(), state);
        Ok(())
    }

    async fn remove(&self, chat_id: &str) -> Result<Option<DialogueState>, StorageError> {
        let mut states = self.states.write().map_err(poisoned)?;
        Ok(states.remove(chat_id))
    }
}
