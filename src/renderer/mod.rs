//! Presentation interface
//!
//! The game never touches the page directly. Everything it needs from the
//! screen (field sizes, word boxes, placement, pop/removal feedback) goes
//! through `Renderer`. The DOM implementation lives in `dom` (wasm only);
//! `Headless` measures text with a fixed advance and records what it is told.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{Bounds, FloaterKey, WordId};

/// Presentation sink and bounds source
pub trait Renderer {
    /// Current playfield size (words bounce inside this)
    fn playfield(&self) -> Bounds;
    /// Current viewport size (floaters bounce inside this)
    fn viewport(&self) -> Bounds;

    /// Create the visual for a new word and report its box size
    fn create_word(&mut self, id: WordId, text: &str) -> Vec2;
    fn place_word(&mut self, id: WordId, pos: Vec2);
    /// Start pop feedback; the word stays visible until `remove_word`
    fn pop_word(&mut self, id: WordId);
    fn remove_word(&mut self, id: WordId);
    /// Transient "no such word" feedback on the input
    fn flash_invalid(&mut self);

    fn floater_size(&self, key: FloaterKey) -> Vec2;
    fn place_floater(&mut self, key: FloaterKey, pos: Vec2);
}

/// Monospace advance used by the headless renderer (px per char)
pub const HEADLESS_CHAR_WIDTH: f32 = 12.0;
/// Line height used by the headless renderer
pub const HEADLESS_LINE_HEIGHT: f32 = 24.0;

/// In-memory renderer for native runs and tests
#[derive(Debug, Clone)]
pub struct Headless {
    pub playfield: Bounds,
    pub viewport: Bounds,
    pub floater_sizes: HashMap<FloaterKey, Vec2>,
    /// Last placed position per live word
    pub words: HashMap<WordId, Vec2>,
    pub popping: Vec<WordId>,
    pub removed: Vec<WordId>,
    pub floaters: HashMap<FloaterKey, Vec2>,
    pub invalid_flashes: u32,
}

impl Headless {
    pub fn new(playfield: Bounds, viewport: Bounds) -> Self {
        let floater_sizes = FloaterKey::ALL
            .into_iter()
            .map(|key| (key, Vec2::new(240.0, 90.0)))
            .collect();
        Self {
            playfield,
            viewport,
            floater_sizes,
            words: HashMap::new(),
            popping: Vec::new(),
            removed: Vec::new(),
            floaters: HashMap::new(),
            invalid_flashes: 0,
        }
    }

    pub fn measure(text: &str) -> Vec2 {
        Vec2::new(
            text.chars().count() as f32 * HEADLESS_CHAR_WIDTH,
            HEADLESS_LINE_HEIGHT,
        )
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new(Bounds::new(960.0, 540.0), Bounds::new(1280.0, 800.0))
    }
}

impl Renderer for Headless {
    fn playfield(&self) -> Bounds {
        self.playfield
    }

    fn viewport(&self) -> Bounds {
        self.viewport
    }

    fn create_word(&mut self, id: WordId, text: &str) -> Vec2 {
        self.words.insert(id, Vec2::ZERO);
        Self::measure(text)
    }

    fn place_word(&mut self, id: WordId, pos: Vec2) {
        self.words.insert(id, pos);
    }

    fn pop_word(&mut self, id: WordId) {
        self.popping.push(id);
    }

    fn remove_word(&mut self, id: WordId) {
        self.words.remove(&id);
        self.popping.retain(|p| *p != id);
        self.removed.push(id);
    }

    fn flash_invalid(&mut self) {
        self.invalid_flashes += 1;
    }

    fn floater_size(&self, key: FloaterKey) -> Vec2 {
        self.floater_sizes.get(&key).copied().unwrap_or(Vec2::ZERO)
    }

    fn place_floater(&mut self, key: FloaterKey, pos: Vec2) {
        self.floaters.insert(key, pos);
    }
}
