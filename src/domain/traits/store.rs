use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::DialogueState;

/// Per-conversation dialogue state, keyed by chat id
#[async_trait]
pub trait DialogueStore: Send + Sync {
    async fn get(&self, chat_id: &str) -> Result<Option<DialogueState>, StorageError>;
    async fn set(&self, chat_id: &str, state: DialogueState) -> Result<(), StorageError>;
    /// Returns the state that was removed, if any
    async fn remove(&self, chat_id: &str) -> Result<Option<DialogueState>, StorageError>;
}
