use super::{DayToken, ZodiacSign};

/// Where a chat is in the horoscope dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingSign,
    AwaitingDay { sign: ZodiacSign },
    /// Both keys validated; a single fetch is due
    Fetching { sign: ZodiacSign, day: DayToken },
    Done,
}

impl DialogueState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DialogueState::Done)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogueState::AwaitingSign => "awaiting-sign",
            DialogueState::AwaitingDay { .. } => "awaiting-day",
            DialogueState::Fetching { .. } => "fetching",
            DialogueState::Done => "done",
        }
    }
}
