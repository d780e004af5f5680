//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Dialogue: The pure horoscope dialogue state machine
//! - Services: Command handling and dialogue orchestration
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod dialogue;
pub mod errors;
pub mod messaging;
pub mod services;
