//! Per-frame and per-second simulation steps
//!
//! Frames run at whatever rate the display refreshes, so every step takes
//! the measured delta rather than a fixed timestep.

use super::motion::Bounds;
use super::state::{Floater, RoundPhase, RoundState, RoundSummary, WordId};

/// Advance the board by one frame.
///
/// Unpopped words drift while the round is running. Popped words age
/// regardless, and the ids of those whose pop feedback has finished are
/// returned after being dropped from the store.
pub fn advance_words(state: &mut RoundState, bounds: Bounds, dt: f32) -> Vec<WordId> {
    let running = state.is_running();

    for word in &mut state.words {
        if word.popped {
            word.pop_age += dt;
        } else if running {
            word.advance(bounds, dt);
        }
    }

    let expired: Vec<WordId> = state
        .words
        .iter()
        .filter(|w| w.linger_done())
        .map(|w| w.id)
        .collect();
    if !expired.is_empty() {
        state.words.retain(|w| !w.linger_done());
    }
    expired
}

/// Advance every unpinned floater by one frame
pub fn advance_floaters(floaters: &mut [Floater], viewport: Bounds, dt: f32) {
    for floater in floaters {
        floater.advance(viewport, dt);
    }
}

/// One second of round clock.
///
/// Returns the summary when this tick ends the round.
pub fn countdown(state: &mut RoundState) -> Option<RoundSummary> {
    if !state.is_running() {
        return None;
    }

    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        state.phase = RoundPhase::Ended;
        let summary = state.summary();
        log::info!(
            "Round over: score {} | popped {} | best streak {}",
            summary.score,
            summary.popped,
            summary.best_streak
        );
        return Some(summary);
    }
    None
}

/// Pull everything back inside after the field shrank (velocity untouched)
pub fn reclamp_words(state: &mut RoundState, bounds: Bounds) {
    for word in &mut state.words {
        word.pos = bounds.clamp(word.pos, word.size);
    }
}

pub fn reclamp_floaters(floaters: &mut [Floater], viewport: Bounds) {
    for floater in floaters {
        floater.pos = viewport.clamp(floater.pos, floater.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POP_LINGER_SECS;
    use crate::sim::state::{FloaterKey, Word};
    use glam::Vec2;

    const FIELD: Bounds = Bounds {
        width: 400.0,
        height: 300.0,
    };

    fn running_with(words: &[(&str, Vec2, Vec2)]) -> RoundState {
        let mut state = RoundState::new(3);
        state.phase = RoundPhase::Running;
        for (text, pos, vel) in words {
            let id = state.next_entity_id();
            state
                .words
                .push(Word::new(id, *text, *pos, *vel, Vec2::new(50.0, 20.0)));
        }
        state
    }

    #[test]
    fn test_words_drift_only_while_running() {
        let mut state = running_with(&[("orbit", Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0))]);
        advance_words(&mut state, FIELD, 1.0);
        assert_eq!(state.words[0].pos, Vec2::new(110.0, 100.0));

        state.phase = RoundPhase::Ended;
        advance_words(&mut state, FIELD, 1.0);
        assert_eq!(state.words[0].pos, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_only_popped_word_expires() {
        let mut state = running_with(&[
            ("orbit", Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0)),
            ("pulse", Vec2::new(200.0, 100.0), Vec2::new(-10.0, 5.0)),
        ]);
        state.words[0].popped = true;
        let before = state.words[1].pos;

        assert!(advance_words(&mut state, FIELD, POP_LINGER_SECS / 2.0).is_empty());
        assert_eq!(state.words.len(), 2);
        assert_eq!(state.words[0].pos, Vec2::new(10.0, 10.0));
        assert_ne!(state.words[1].pos, before);

        let expired = advance_words(&mut state, FIELD, POP_LINGER_SECS);
        assert_eq!(expired, vec![0]);
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.words[0].text, "pulse");
    }

    #[test]
    fn test_countdown_ends_round() {
        let mut state = running_with(&[]);
        state.score = 17;
        state.popped = 3;
        state.best_streak = 2;
        assert_eq!(countdown(&mut state), None);
        assert_eq!(countdown(&mut state), None);
        let summary = countdown(&mut state).unwrap();
        assert_eq!(state.phase, RoundPhase::Ended);
        assert_eq!(state.time_left, 0);
        assert_eq!(
            summary,
            RoundSummary {
                score: 17,
                popped: 3,
                best_streak: 2
            }
        );
        // Stale tick after the end does nothing
        assert_eq!(countdown(&mut state), None);
        assert_eq!(state.time_left, 0);
    }

    #[test]
    fn test_reclamp_keeps_velocity() {
        let mut state = running_with(&[("orbit", Vec2::new(350.0, 280.0), Vec2::new(30.0, -40.0))]);
        reclamp_words(&mut state, Bounds::new(200.0, 100.0));
        assert_eq!(state.words[0].pos, Vec2::new(150.0, 80.0));
        assert_eq!(state.words[0].vel, Vec2::new(30.0, -40.0));
    }

    #[test]
    fn test_floaters_move_independently_of_round() {
        let viewport = Bounds::new(1000.0, 800.0);
        let mut floaters = vec![
            Floater::anchored(FloaterKey::Hero, viewport, Vec2::splat(100.0), Vec2::new(100.0, 0.0)),
            Floater::anchored(FloaterKey::Stats, viewport, Vec2::splat(100.0), Vec2::new(0.0, 100.0)),
        ];
        floaters[1].pinned = true;
        advance_floaters(&mut floaters, viewport, 0.5);
        assert_eq!(floaters[0].pos, Vec2::new(70.0, 20.0));
        assert_eq!(floaters[1].pos, Vec2::new(880.0, 20.0));

        reclamp_floaters(&mut floaters, Bounds::new(500.0, 500.0));
        assert_eq!(floaters[1].pos, Vec2::new(400.0, 20.0));
    }
}
