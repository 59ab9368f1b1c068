//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Randomness only through the caller's seeded RNG
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod matcher;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use matcher::{MatchResult, normalize, submit};
pub use motion::{Bounds, WallContact, step_body};
pub use spawn::{SpawnRules, pick_word, spawn_word};
pub use state::{
    Floater, FloaterKey, GameEvent, RoundPhase, RoundState, RoundSummary, Word, WordId,
};
pub use tick::{advance_floaters, advance_words, countdown, reclamp_floaters, reclamp_words};
