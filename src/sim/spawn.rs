//! Word spawning
//!
//! Picks a catalog word, measures it, and drops it somewhere random inside
//! the playfield with a random drift velocity.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::motion::Bounds;
use super::state::{RoundState, Word, WordId};
use crate::random_velocity;
use crate::settings::Settings;

/// Spawner knobs taken from `Settings`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    /// Skip words already on screen (case-insensitive)
    pub unique: bool,
    pub speed_base: f32,
    pub speed_range: f32,
}

impl From<&Settings> for SpawnRules {
    fn from(settings: &Settings) -> Self {
        Self {
            unique: settings.unique_words,
            speed_base: settings.speed_base,
            speed_range: settings.speed_range,
        }
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Pick a catalog word uniformly at random.
///
/// Entries are trimmed before use. With `unique` set, words whose lowercase
/// form is already active are excluded; `None` when nothing is left to pick.
pub fn pick_word<'a, R: Rng + ?Sized>(
    state: &RoundState,
    catalog: &'a [String],
    unique: bool,
    rng: &mut R,
) -> Option<&'a str> {
    let active: HashSet<String> = if unique {
        state.active().map(|w| w.text.to_lowercase()).collect()
    } else {
        HashSet::new()
    };

    let available: Vec<&str> = catalog
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .filter(|w| !active.contains(&w.to_lowercase()))
        .collect();

    if available.is_empty() {
        return None;
    }
    Some(available[rng.random_range(0..available.len())])
}

/// Spawn one word into the store.
///
/// `measure` creates the word's visual and reports its box size; it is only
/// called once a word has been picked. Returns `None` when the round is not
/// running or the catalog is exhausted.
pub fn spawn_word<R, F>(
    state: &mut RoundState,
    catalog: &[String],
    bounds: Bounds,
    rules: SpawnRules,
    rng: &mut R,
    measure: F,
) -> Option<WordId>
where
    R: Rng + ?Sized,
    F: FnOnce(WordId, &str) -> Vec2,
{
    if !state.is_running() {
        return None;
    }

    let Some(text) = pick_word(state, catalog, rules.unique, rng) else {
        log::debug!("Spawn skipped: every catalog word is on screen");
        return None;
    };

    let id = state.next_entity_id();
    let size = measure(id, text);
    let max = bounds.max_origin(size);
    let pos = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
    let vel = random_velocity(rng, rules.speed_base, rules.speed_range);

    log::debug!("Spawned #{id} '{text}' at ({:.0}, {:.0})", pos.x, pos.y);
    state.words.push(Word::new(id, text, pos, vel, size));
    Some(id)
}
