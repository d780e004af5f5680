//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod horoscope;
pub mod store;

pub use bot::{Bot, BotInfo};
pub use horoscope::HoroscopeSource;
pub use store::DialogueStore;
