//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (ZodiacSign, DayToken, DialogueState, Message)
//! - Traits: Abstractions for infrastructure (Bot, HoroscopeSource, DialogueStore)

pub mod entities;
pub mod traits;
