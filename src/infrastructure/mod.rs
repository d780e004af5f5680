//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Dialogue state persistence
//! - Horoscope: The remote horoscope API client
//! - Adapters: Platform integrations (Telegram, console)

pub mod adapters;
pub mod config;
pub mod horoscope;
pub mod storage;
