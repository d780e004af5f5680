//! Application services - Business logic orchestration

pub mod command_service;
pub mod dialogue_service;

pub use command_service::CommandService;
pub use dialogue_service::DialogueService;
