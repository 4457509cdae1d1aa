//! Rotating-phrase typing effect
//!
//! The state machine here is pure: `step` takes the current state and returns
//! the next one plus the text to emit, if any. Timers live in `animator`.

pub mod animator;

use std::time::Duration;
use thiserror::Error;

pub use animator::TypingAnimator;

/// Default delay between typed characters
pub const DEFAULT_TYPING_MS: u64 = 100;
/// Default delay between deleted characters
pub const DEFAULT_DELETING_MS: u64 = 50;
/// Default dwell after a phrase is fully typed
pub const DEFAULT_PAUSE_MS: u64 = 2000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Ordered, non-empty, cyclic list of phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseList(Vec<String>);

impl PhraseList {
    pub fn new(phrases: Vec<String>) -> Result<Self, AnimatorError> {
        if phrases.is_empty() {
            return Err(AnimatorError::InvalidConfiguration(
                "phrase list is empty".to_string(),
            ));
        }
        Ok(Self(phrases))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.0.len()
    }
}

/// Tick intervals for each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub typing: Duration,
    pub deleting: Duration,
    pub pause: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TYPING_MS, DEFAULT_DELETING_MS, DEFAULT_PAUSE_MS)
    }
}

impl Timings {
    pub fn from_millis(typing: u64, deleting: u64, pause: u64) -> Self {
        Self {
            typing: Duration::from_millis(typing),
            deleting: Duration::from_millis(deleting),
            pause: Duration::from_millis(pause),
        }
    }

    /// Delay before the next tick while in `phase`
    pub fn delay_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Typing => self.typing,
            Phase::Pausing => self.pause,
            Phase::Deleting => self.deleting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Typing,
    Pausing,
    Deleting,
}

/// Position in the cycle.
///
/// `end` is a byte offset that always sits on a char boundary of the phrase at
/// `index`, so the displayed text is `&phrase[..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatorState {
    pub index: usize,
    pub end: usize,
    pub phase: Phase,
}

impl AnimatorState {
    pub fn displayed<'a>(&self, phrases: &'a PhraseList) -> &'a str {
        &phrases.get(self.index)[..self.end]
    }
}

/// Advance the machine by one tick.
///
/// Returns the new state and the displayed text if it changed.
pub fn step<'a>(state: AnimatorState, phrases: &'a PhraseList) -> (AnimatorState, Option<&'a str>) {
    let phrase = phrases.get(state.index);

    match state.phase {
        Phase::Typing => {
            let Some(c) = phrase[state.end..].chars().next() else {
                // Empty phrase: nothing to type
                let next = AnimatorState { phase: Phase::Pausing, ..state };
                return (next, None);
            };
            let end = state.end + c.len_utf8();
            let phase = if end == phrase.len() {
                Phase::Pausing
            } else {
                Phase::Typing
            };
            (AnimatorState { end, phase, ..state }, Some(&phrase[..end]))
        }
        Phase::Pausing => (AnimatorState { phase: Phase::Deleting, ..state }, None),
        Phase::Deleting => {
            let Some(c) = phrase[..state.end].chars().next_back() else {
                let next = AnimatorState {
                    index: phrases.next_index(state.index),
                    end: 0,
                    phase: Phase::Typing,
                };
                return (next, None);
            };
            let end = state.end - c.len_utf8();
            let next = if end == 0 {
                AnimatorState {
                    index: phrases.next_index(state.index),
                    end: 0,
                    phase: Phase::Typing,
                }
            } else {
                AnimatorState { end, ..state }
            };
            (next, Some(&phrase[..end]))
        }
    }
}
