//! Word Pop - a drifting-word typing minigame
//!
//! Core modules:
//! - `sim`: Simulation (word motion, wall collision, spawning, matching, round clock)
//! - `game`: Driver that wires the simulation to a renderer and timer host
//! - `renderer`: Presentation interface (DOM implementation on wasm)
//! - `platform`: Repeating timers and frame clock
//! - `settings`: Data-driven round configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Hud};
pub use settings::{ScoringMode, Settings, SettingsError, Theme};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECONDS: u32 = 60;
    /// Spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: u32 = 1000;
    /// Countdown cadence (ms)
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

    /// Minimum drift speed (pixels/s)
    pub const SPEED_BASE: f32 = 60.0;
    /// Random speed added on top of the base (pixels/s)
    pub const SPEED_RANGE: f32 = 140.0;

    /// How long a popped word stays in the store while its pop feedback plays
    pub const POP_LINGER_SECS: f32 = 0.18;

    /// Inset of floater panels from the viewport edges
    pub const FLOATER_MARGIN: f32 = 20.0;
}

/// Random drift velocity: `base + [0, range)` px/s at a uniform angle in [0, 2π)
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, base: f32, range: f32) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let speed = base + rng.random::<f32>() * range;
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_velocity_speed_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let speed = random_velocity(&mut rng, consts::SPEED_BASE, consts::SPEED_RANGE).length();
            assert!(speed >= consts::SPEED_BASE - 0.001);
            assert!(speed < consts::SPEED_BASE + consts::SPEED_RANGE + 0.001);
        }
    }
}
