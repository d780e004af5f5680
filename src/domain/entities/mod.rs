//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod day;
pub mod dialogue;
pub mod horoscope;
pub mod message;
pub mod reply;
pub mod zodiac;

pub use command::{Command, CommandOutput, CommandRegistry};
pub use day::{validate_day, DayToken, MAX_LOOKBACK_DAYS};
pub use dialogue::DialogueState;
pub use horoscope::HoroscopeResult;
pub use message::{Content, Message};
pub use reply::{Reply, ReplyFormat};
pub use zodiac::{validate_sign, ZodiacSign};
