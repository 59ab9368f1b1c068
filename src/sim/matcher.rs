//! Typed-input matching and scoring

use super::state::{RoundState, WordId};
use crate::settings::ScoringMode;

/// Outcome of a non-empty submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A word was popped
    Hit { id: WordId, gain: i64 },
    /// Nothing matched; `penalty` was taken off the score (0 in flat mode)
    Miss { penalty: i64 },
}

/// Trim and lowercase; `None` for blank input
pub fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Match typed text against the board.
///
/// Pops the first unpopped word (store order) whose text equals the input
/// case-insensitively. Blank input returns `None` and changes nothing.
pub fn submit(state: &mut RoundState, input: &str, scoring: ScoringMode) -> Option<MatchResult> {
    let target = normalize(input)?;

    let Some(word) = state.words.iter_mut().find(|w| w.matches(&target)) else {
        let penalty = match scoring {
            ScoringMode::Length => {
                state.streak = 0;
                target.chars().count() as i64
            }
            ScoringMode::Flat => 0,
        };
        state.score -= penalty;
        log::debug!("Miss '{target}' (-{penalty})");
        return Some(MatchResult::Miss { penalty });
    };

    word.popped = true;
    word.pop_age = 0.0;
    let gain = match scoring {
        ScoringMode::Length => word.char_len() as i64,
        ScoringMode::Flat => 1,
    };
    let id = word.id;

    state.score += gain;
    state.popped += 1;
    state.streak += 1;
    state.best_streak = state.best_streak.max(state.streak);
    log::debug!("Popped #{id} '{target}' (+{gain}, streak {})", state.streak);

    Some(MatchResult::Hit { id, gain })
}
