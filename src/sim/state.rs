//! Round state and entity types
//!
//! Everything a round mutates lives in one `RoundState` record that the
//! spawner, matcher and clock borrow in turn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Bounds, WallContact, step_body};
use crate::consts::*;

pub type WordId = u32;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round yet, or aborted with Stop
    #[default]
    Idle,
    /// Clock running, words spawning
    Running,
    /// Clock hit zero, summary on screen
    Ended,
}

/// A drifting word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    /// Top-left corner (px)
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    /// Measured box size (px)
    pub size: Vec2,
    pub popped: bool,
    /// Seconds since popped
    #[serde(default)]
    pub pop_age: f32,
}

impl Word {
    pub fn new(id: WordId, text: impl Into<String>, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            id,
            text: text.into(),
            pos,
            vel,
            size,
            popped: false,
            pop_age: 0.0,
        }
    }

    /// Drift one frame (popped words hold still)
    pub fn advance(&mut self, bounds: Bounds, dt: f32) -> WallContact {
        if self.popped {
            return WallContact::default();
        }
        step_body(&mut self.pos, &mut self.vel, self.size, bounds, dt)
    }

    /// Character count (what a hit scores in length mode)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn matches(&self, normalized: &str) -> bool {
        !self.popped && self.text.to_lowercase() == normalized
    }

    /// Pop feedback finished, ready to leave the store
    pub fn linger_done(&self) -> bool {
        self.popped && self.pop_age >= POP_LINGER_SECS
    }
}

/// Final tally shown when the clock runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: i64,
    pub popped: u32,
    pub best_streak: u32,
}

/// Notable transitions for the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    RoundEnded(RoundSummary),
    RoundStopped,
    WordSpawned { id: WordId },
    WordPopped { id: WordId, gain: i64 },
    Missed { penalty: i64 },
    CatalogExhausted,
}

/// Mutable state of the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// Seconds left on the clock
    pub time_left: u32,
    /// Signed: misses can push it below zero
    pub score: i64,
    /// Words popped this round
    pub popped: u32,
    pub streak: u32,
    pub best_streak: u32,
    /// Entity store (spawn order)
    pub words: Vec<Word>,
    /// Next entity ID
    next_id: WordId,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(ROUND_SECONDS)
    }
}

impl RoundState {
    pub fn new(round_seconds: u32) -> Self {
        Self {
            phase: RoundPhase::Idle,
            time_left: round_seconds,
            score: 0,
            popped: 0,
            streak: 0,
            best_streak: 0,
            words: Vec::new(),
            next_id: 0,
        }
    }

    /// Back to a fresh idle round. Returns the ids that were still in the store.
    ///
    /// Ids keep counting up so a late removal from the previous round can
    /// never hit a new word.
    pub fn reset(&mut self, round_seconds: u32) -> Vec<WordId> {
        let cleared = self.words.iter().map(|w| w.id).collect();
        let next_id = self.next_id;
        *self = Self::new(round_seconds);
        self.next_id = next_id;
        cleared
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> WordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Words still on the board (not popped)
    pub fn active(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|w| !w.popped)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score,
            popped: self.popped,
            best_streak: self.best_streak,
        }
    }
}

/// The three decorative panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloaterKey {
    Hero,
    Stats,
    Controls,
}

impl FloaterKey {
    pub const ALL: [FloaterKey; 3] = [FloaterKey::Hero, FloaterKey::Stats, FloaterKey::Controls];

    pub fn as_str(&self) -> &'static str {
        match self {
            FloaterKey::Hero => "hero",
            FloaterKey::Stats => "stats",
            FloaterKey::Controls => "controls",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Starting position inside a viewport for a panel of `size`
    pub fn anchor(&self, viewport: Bounds, size: Vec2) -> Vec2 {
        match self {
            FloaterKey::Hero => Vec2::new(FLOATER_MARGIN, FLOATER_MARGIN),
            FloaterKey::Stats => Vec2::new(viewport.width - size.x - FLOATER_MARGIN, FLOATER_MARGIN),
            FloaterKey::Controls => Vec2::new(
                (viewport.width - size.x) / 2.0,
                viewport.height - size.y - FLOATER_MARGIN,
            ),
        }
    }
}

/// A UI panel that wanders the viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floater {
    pub key: FloaterKey,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Frozen in place
    pub pinned: bool,
}

impl Floater {
    pub fn anchored(key: FloaterKey, viewport: Bounds, size: Vec2, vel: Vec2) -> Self {
        Self {
            key,
            pos: key.anchor(viewport, size),
            vel,
            size,
            pinned: false,
        }
    }

    /// Drift one frame unless pinned
    pub fn advance(&mut self, bounds: Bounds, dt: f32) -> WallContact {
        if self.pinned {
            return WallContact::default();
        }
        step_body(&mut self.pos, &mut self.vel, self.size, bounds, dt)
    }
}
