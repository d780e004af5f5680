//! Horoscope dialogue state machine
//!
//! `step` is pure: it never talks to the transport or the horoscope API.
//! The caller performs the fetch when a transition lands in `Fetching` and
//! feeds the outcome back as `DialogueEvent::Fetched`.

use chrono::{DateTime, Utc};

use crate::application::errors::FetchError;
use crate::domain::entities::{validate_day, validate_sign, DialogueState, HoroscopeResult, Reply, ZodiacSign};

pub const DAY_PROMPT: &str = "What day do you want to know?\nChoose one: *TODAY*, *TOMORROW*, *YESTERDAY*, or a date in format YYYY-MM-DD *up to a year ago*.";
pub const RESULT_HEADER: &str = "Here's your horoscope!";
pub const FETCH_FAILED: &str = "Sorry, I couldn't fetch your horoscope right now. Please try again later.";

pub fn sign_prompt() -> String {
    format!("What's your zodiac sign?\nChoose one: {}.", ZodiacSign::list())
}

/// Something that moves a dialogue forward
#[derive(Debug, Clone)]
pub enum DialogueEvent {
    /// The horoscope command was issued
    Trigger,
    /// A free-text answer from the user
    Text(String),
    /// Outcome of the fetch requested by entering `Fetching`
    Fetched(Result<HoroscopeResult, FetchError>),
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DialogueState,
    pub replies: Vec<Reply>,
}

impl Transition {
    fn new(state: DialogueState, replies: Vec<Reply>) -> Self {
        Self { state, replies }
    }

    fn stay(state: DialogueState) -> Self {
        Self::new(state, Vec::new())
    }
}

/// Advance `state` by one event. `now` anchors the day look-back window.
pub fn step(state: DialogueState, event: DialogueEvent, now: DateTime<Utc>) -> Transition {
    use DialogueEvent::*;
    use DialogueState::*;

    match (state, event) {
        // A trigger restarts from any state
        (_, Trigger) => Transition::new(AwaitingSign, vec![Reply::markdown(sign_prompt())]),

        (AwaitingSign, Text(input)) => match validate_sign(&input) {
            Ok(sign) => Transition::new(AwaitingDay { sign }, vec![Reply::markdown(DAY_PROMPT)]),
            Err(e) => Transition::new(
                AwaitingSign,
                vec![Reply::plain(e.user_message()), Reply::markdown(sign_prompt())],
            ),
        },

        (AwaitingDay { sign }, Text(input)) => match validate_day(&input, now) {
            Ok(day) => Transition::stay(Fetching { sign, day }),
            Err(e) => Transition::new(AwaitingDay { sign }, vec![Reply::plain(e.user_message())]),
        },

        (Fetching { sign, .. }, Fetched(Ok(result))) => Transition::new(
            Done,
            vec![Reply::plain(RESULT_HEADER), Reply::markdown(result.render(sign))],
        ),
        (Fetching { .. }, Fetched(Err(_))) => Transition::new(Done, vec![Reply::plain(FETCH_FAILED)]),

        // Text while a fetch is in flight, stray fetch results, anything after Done
        (state, _) => Transition::stay(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DayToken;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    fn text(s: &str) -> DialogueEvent {
        DialogueEvent::Text(s.to_string())
    }

    #[test]
    fn test_trigger_lists_all_signs() {
        let t = step(DialogueState::Done, DialogueEvent::Trigger, now());
        assert_eq!(t.state, DialogueState::AwaitingSign);
        assert_eq!(t.replies.len(), 1);
        assert!(t.replies[0].is_markdown());
        for sign in ZodiacSign::ALL {
            assert!(t.replies[0].text.contains(sign.as_str()));
        }
    }

    #[test]
    fn test_invalid_sign_reprompts_without_advancing() {
        let t = step(DialogueState::AwaitingSign, text("Dragon"), now());
        assert_eq!(t.state, DialogueState::AwaitingSign);
        assert_eq!(t.replies.len(), 2);
        assert!(t.replies[0].text.contains("not a valid star sign"));
        assert_eq!(t.replies[1].text, sign_prompt());
    }

    #[test]
    fn test_valid_sign_asks_for_day() {
        let t = step(DialogueState::AwaitingSign, text("leo"), now());
        assert_eq!(t.state, DialogueState::AwaitingDay { sign: ZodiacSign::Leo });
        assert_eq!(t.replies, vec![Reply::markdown(DAY_PROMPT)]);
    }

    #[test]
    fn test_day_errors_have_distinct_text_and_keep_state() {
        let state = DialogueState::AwaitingDay { sign: ZodiacSign::Leo };
        let mut seen = Vec::new();
        for input in ["whenever", "2099-01-01", "2020-01-01"] {
            let t = step(state, text(input), now());
            assert_eq!(t.state, state);
            assert_eq!(t.replies.len(), 1);
            seen.push(t.replies[0].text.clone());
        }
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_valid_day_enters_fetching_silently() {
        let t = step(DialogueState::AwaitingDay { sign: ZodiacSign::Leo }, text("Today"), now());
        assert_eq!(
            t.state,
            DialogueState::Fetching { sign: ZodiacSign::Leo, day: DayToken::Today }
        );
        assert!(t.replies.is_empty());
    }

    #[test]
    fn test_fetch_success_renders_result() {
        let state = DialogueState::Fetching { sign: ZodiacSign::Leo, day: DayToken::Today };
        let result = HoroscopeResult::new("Jun 15, 2024", "Stars align.");
        let t = step(state, DialogueEvent::Fetched(Ok(result)), now());
        assert_eq!(t.state, DialogueState::Done);
        assert_eq!(
            t.replies,
            vec![
                Reply::plain(RESULT_HEADER),
                Reply::markdown("*Horoscope details for Leo, Jun 15, 2024*: Stars align."),
            ]
        );
    }

    #[test]
    fn test_fetch_failure_ends_with_notice() {
        let state = DialogueState::Fetching { sign: ZodiacSign::Leo, day: DayToken::Today };
        let t = step(state, DialogueEvent::Fetched(Err(FetchError::Status(500))), now());
        assert_eq!(t.state, DialogueState::Done);
        assert_eq!(t.replies, vec![Reply::plain(FETCH_FAILED)]);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let t = step(DialogueState::Done, text("leo"), now());
        assert_eq!(t, Transition::stay(DialogueState::Done));

        let result = Ok(HoroscopeResult::new("d", "t"));
        let t = step(DialogueState::AwaitingSign, DialogueEvent::Fetched(result), now());
        assert_eq!(t.state, DialogueState::AwaitingSign);
        assert!(t.replies.is_empty());
    }
}
