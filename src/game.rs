//! Game driver
//!
//! Owns the round, the floaters, the RNG and the settings, and connects them
//! to a `Renderer` and a `TimerHost`. Every callback site (animation frame,
//! interval, form submit, button, resize) calls exactly one method here.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::COUNTDOWN_INTERVAL_MS;
use crate::platform::{FrameClock, RoundTask, TaskHandle, TimerHost};
use crate::random_velocity;
use crate::renderer::Renderer;
use crate::settings::{Settings, Theme};
use crate::sim::{
    Floater, FloaterKey, GameEvent, MatchResult, RoundPhase, RoundState, SpawnRules, WordId,
    advance_floaters, advance_words, countdown, reclamp_floaters, reclamp_words, spawn_word,
    submit,
};

/// Values the HUD binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: RoundPhase,
    pub score: i64,
    pub popped: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub time_left: u32,
    pub active_count: usize,
}

/// One game session: many rounds, one set of floaters
pub struct Game<R, T> {
    pub round: RoundState,
    pub floaters: Vec<Floater>,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    renderer: R,
    timers: T,
    clock: FrameClock,
    spawn_task: Option<TaskHandle>,
    countdown_task: Option<TaskHandle>,
    events: Vec<GameEvent>,
}

impl<R: Renderer, T: TimerHost> Game<R, T> {
    pub fn new(settings: Settings, seed: u64, renderer: R, timers: T) -> Self {
        let mut game = Self {
            round: RoundState::new(settings.round_seconds),
            floaters: Vec::new(),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            renderer,
            timers,
            clock: FrameClock::new(),
            spawn_task: None,
            countdown_task: None,
            events: Vec::new(),
        };
        game.init_floaters();
        game
    }

    /// Place the panels at their anchors with fresh random velocities
    pub fn init_floaters(&mut self) {
        let viewport = self.renderer.viewport();
        let (base, range) = (self.settings.speed_base, self.settings.speed_range);
        self.floaters = FloaterKey::ALL
            .into_iter()
            .map(|key| {
                let size = self.renderer.floater_size(key);
                let vel = random_velocity(&mut self.rng, base, range);
                Floater::anchored(key, viewport, size, vel)
            })
            .collect();
        for floater in &self.floaters {
            self.renderer.place_floater(floater.key, floater.pos);
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.round.phase,
            score: self.round.score,
            popped: self.round.popped,
            streak: self.round.streak,
            best_streak: self.round.best_streak,
            time_left: self.round.time_left,
            active_count: self.round.active_count(),
        }
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a round (ignored while one is running)
    pub fn start(&mut self) -> bool {
        if self.round.is_running() {
            return false;
        }
        self.reset_round();
        self.round.phase = RoundPhase::Running;
        log::info!("Round started ({}s)", self.round.time_left);
        self.events.push(GameEvent::RoundStarted);

        self.spawn();
        self.spawn_task = Some(self.timers.arm(RoundTask::Spawn, self.settings.spawn_interval_ms));
        self.countdown_task = Some(self.timers.arm(RoundTask::Countdown, COUNTDOWN_INTERVAL_MS));
        true
    }

    /// Abort the current round without a summary
    pub fn stop(&mut self) {
        let was_running = self.round.is_running();
        self.reset_round();
        if was_running {
            log::info!("Round stopped");
        }
        self.events.push(GameEvent::RoundStopped);
    }

    /// Stop whatever is going on and start fresh
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Run one firing of a repeating task
    pub fn run_task(&mut self, task: RoundTask) {
        match task {
            RoundTask::Spawn => {
                self.spawn();
            }
            RoundTask::Countdown => {
                if let Some(summary) = countdown(&mut self.round) {
                    self.cancel_tasks();
                    self.events.push(GameEvent::RoundEnded(summary));
                }
            }
        }
    }

    /// Spawn one word if the round is running
    pub fn spawn(&mut self) -> Option<WordId> {
        if !self.round.is_running() {
            return None;
        }
        let bounds = self.renderer.playfield();
        let rules = SpawnRules::from(&self.settings);
        let spawned = spawn_word(
            &mut self.round,
            &self.settings.words,
            bounds,
            rules,
            &mut self.rng,
            |id, text| self.renderer.create_word(id, text),
        );

        match spawned {
            Some(id) => {
                if let Some(word) = self.round.word(id) {
                    self.renderer.place_word(id, word.pos);
                }
                self.events.push(GameEvent::WordSpawned { id });
            }
            None => self.events.push(GameEvent::CatalogExhausted),
        }
        spawned
    }

    /// Handle one form submission (ignored outside a running round)
    pub fn submit(&mut self, text: &str) -> Option<MatchResult> {
        if !self.round.is_running() {
            return None;
        }
        let result = submit(&mut self.round, text, self.settings.scoring)?;
        match result {
            MatchResult::Hit { id, gain } => {
                self.renderer.pop_word(id);
                self.events.push(GameEvent::WordPopped { id, gain });
            }
            MatchResult::Miss { penalty } => {
                self.renderer.flash_invalid();
                self.events.push(GameEvent::Missed { penalty });
            }
        }
        Some(result)
    }

    /// One display refresh
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.delta(now_ms);

        for floater in self.floaters.iter_mut().filter(|f| !f.pinned) {
            floater.size = self.renderer.floater_size(floater.key);
        }
        advance_floaters(&mut self.floaters, self.renderer.viewport(), dt);

        let expired = advance_words(&mut self.round, self.renderer.playfield(), dt);

        for id in expired {
            self.renderer.remove_word(id);
        }
        for floater in self.floaters.iter().filter(|f| !f.pinned) {
            self.renderer.place_floater(floater.key, floater.pos);
        }
        if self.round.is_running() {
            for word in self.round.active() {
                self.renderer.place_word(word.id, word.pos);
            }
        }
    }

    /// Re-fit words and floaters after the window changed size
    pub fn resize(&mut self) {
        reclamp_words(&mut self.round, self.renderer.playfield());
        for word in &self.round.words {
            self.renderer.place_word(word.id, word.pos);
        }

        for floater in &mut self.floaters {
            floater.size = self.renderer.floater_size(floater.key);
        }
        reclamp_floaters(&mut self.floaters, self.renderer.viewport());
        for floater in &self.floaters {
            self.renderer.place_floater(floater.key, floater.pos);
        }
    }

    /// Freeze or release one floater
    pub fn set_pinned(&mut self, key: FloaterKey, pinned: bool) {
        if let Some(floater) = self.floaters.iter_mut().find(|f| f.key == key) {
            floater.pinned = pinned;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn floater(&self, key: FloaterKey) -> Option<&Floater> {
        self.floaters.iter().find(|f| f.key == key)
    }

    fn cancel_tasks(&mut self) {
        if let Some(handle) = self.spawn_task.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.countdown_task.take() {
            self.timers.cancel(handle);
        }
    }

    fn reset_round(&mut self) {
        self.cancel_tasks();
        for id in self.round.reset(self.settings.round_seconds) {
            self.renderer.remove_word(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POP_LINGER_SECS;
    use crate::platform::VirtualTimers;
    use crate::renderer::Headless;
    use crate::settings::ScoringMode;
    use crate::sim::{Bounds, RoundSummary, Word};
    use glam::Vec2;

    type TestGame = Game<Headless, VirtualTimers>;

    fn game_with(settings: Settings) -> TestGame {
        Game::new(settings, 42, Headless::default(), VirtualTimers::new())
    }

    fn two_word_game(scoring: ScoringMode) -> TestGame {
        game_with(Settings {
            words: vec!["orbit".into(), "pulse".into()],
            scoring,
            ..Settings::default()
        })
    }

    /// Advance the virtual clock, firing due tasks one at a time
    fn run_until(game: &mut TestGame, until_ms: f64) {
        while let Some(task) = game.timers_mut().pop_due(until_ms) {
            game.run_task(task);
        }
    }

    #[test]
    fn test_start_spawns_and_arms() {
        let mut game = game_with(Settings::default());
        assert_eq!(game.phase(), RoundPhase::Idle);
        assert!(game.start());
        assert_eq!(game.phase(), RoundPhase::Running);
        assert_eq!(game.hud().active_count, 1);
        assert!(game.timers().is_armed(RoundTask::Spawn));
        assert!(game.timers().is_armed(RoundTask::Countdown));
        assert_eq!(game.renderer().words.len(), 1);

        // Second start while running is ignored
        assert!(!game.start());
        assert_eq!(game.timers().armed_count(), 2);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut game = game_with(Settings::default());
        game.start();
        run_until(&mut game, 3000.0);
        assert_eq!(game.hud().active_count, 4);
        assert_eq!(game.hud().time_left, 57);
    }

    #[test]
    fn test_orbit_pulse_example() {
        let mut game = two_word_game(ScoringMode::Length);
        game.start();
        run_until(&mut game, 1000.0);
        assert_eq!(game.hud().active_count, 2);

        let result = game.submit("Orbit ");
        assert!(matches!(result, Some(MatchResult::Hit { gain: 5, .. })));
        let hud = game.hud();
        assert_eq!(hud.score, 5);
        assert_eq!(hud.streak, 1);
        assert_eq!(hud.active_count, 1);
    }

    #[test]
    fn test_orbit_pulse_flat() {
        let mut game = two_word_game(ScoringMode::Flat);
        game.start();
        run_until(&mut game, 1000.0);
        game.submit("orbit");
        assert_eq!(game.hud().score, 1);
        assert_eq!(game.hud().active_count, 1);
    }

    #[test]
    fn test_padded_config_word_can_be_popped() {
        let settings = Settings::from_json(r#"{"words": [" Nova "]}"#).unwrap();
        let mut game = game_with(settings);
        game.start();
        assert_eq!(game.round.words[0].text, "Nova");

        let result = game.submit(" Nova ");
        assert!(matches!(result, Some(MatchResult::Hit { gain: 4, .. })));
        assert_eq!(game.hud().active_count, 0);
        assert_eq!(game.hud().score, 4);
    }

    #[test]
    fn test_padded_words_set_in_code_still_match() {
        let mut game = game_with(Settings {
            words: vec!["  orbit\t".into()],
            ..Settings::default()
        });
        game.start();
        assert!(matches!(game.submit("orbit"), Some(MatchResult::Hit { gain: 5, .. })));
    }

    #[test]
    fn test_exhausted_catalog_spawns_nothing() {
        let mut game = two_word_game(ScoringMode::Length);
        game.start();
        run_until(&mut game, 5000.0);
        assert_eq!(game.hud().active_count, 2);
        assert!(game.drain_events().contains(&GameEvent::CatalogExhausted));
    }

    #[test]
    fn test_miss_flashes_and_penalizes() {
        let mut game = game_with(Settings::default());
        game.start();
        let result = game.submit("definitely-not-a-word");
        assert!(matches!(result, Some(MatchResult::Miss { penalty: 21 })));
        assert_eq!(game.hud().score, -21);
        assert_eq!(game.renderer().invalid_flashes, 1);
        // Blank input neither flashes nor scores
        assert_eq!(game.submit("   "), None);
        assert_eq!(game.renderer().invalid_flashes, 1);
    }

    #[test]
    fn test_submit_ignored_when_idle() {
        let mut game = game_with(Settings::default());
        assert_eq!(game.submit("orbit"), None);
        assert_eq!(game.renderer().invalid_flashes, 0);
    }

    #[test]
    fn test_popped_word_removed_after_linger() {
        let mut game = two_word_game(ScoringMode::Length);
        game.start();
        game.frame(0.0);
        let id = game.round.words[0].id;
        let text = game.round.words[0].text.clone();
        game.submit(&text);
        assert_eq!(game.renderer().popping, vec![id]);

        game.frame(16.0);
        assert!(game.round.word(id).is_some());
        game.frame(16.0 + f64::from(POP_LINGER_SECS) * 1000.0 + 1.0);
        assert!(game.round.word(id).is_none());
        assert_eq!(game.renderer().removed, vec![id]);
    }

    #[test]
    fn test_round_ends_and_stops_spawning() {
        let mut game = game_with(Settings {
            round_seconds: 3,
            ..Settings::default()
        });
        game.start();
        run_until(&mut game, 2500.0);
        let text = game.round.words[0].text.clone();
        game.submit(&text);

        run_until(&mut game, 3000.0);
        assert_eq!(game.phase(), RoundPhase::Ended);
        assert_eq!(game.timers().armed_count(), 0);
        let count = game.round.words.len();

        let events = game.drain_events();
        let expected = RoundSummary {
            score: text.chars().count() as i64,
            popped: 1,
            best_streak: 1,
        };
        assert!(events.contains(&GameEvent::RoundEnded(expected)));

        // No more spawns, even if a stale tick sneaks in
        run_until(&mut game, 10_000.0);
        game.run_task(RoundTask::Spawn);
        assert_eq!(game.round.words.len(), count);
        assert_eq!(game.hud().time_left, 0);
    }

    #[test]
    fn test_stop_resets_without_summary() {
        let mut game = game_with(Settings::default());
        game.start();
        run_until(&mut game, 2000.0);
        game.submit("zzz");
        game.stop();

        let hud = game.hud();
        assert_eq!(hud.phase, RoundPhase::Idle);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.active_count, 0);
        assert_eq!(hud.time_left, 60);
        assert_eq!(game.timers().armed_count(), 0);
        assert!(game.renderer().words.is_empty());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::RoundStopped));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::RoundEnded(_))));
    }

    #[test]
    fn test_restart_from_running() {
        let mut game = game_with(Settings::default());
        game.start();
        run_until(&mut game, 4000.0);
        let old_ids: Vec<WordId> = game.round.words.iter().map(|w| w.id).collect();

        game.restart();
        assert_eq!(game.phase(), RoundPhase::Running);
        assert_eq!(game.hud().time_left, 60);
        assert_eq!(game.round.words.len(), 1);
        assert!(!old_ids.contains(&game.round.words[0].id));
        assert_eq!(game.timers().armed_count(), 2);
    }

    #[test]
    fn test_words_stay_in_bounds_over_many_frames() {
        let mut game = game_with(Settings::default());
        game.start();
        let bounds = game.renderer().playfield();
        let mut now = 0.0;
        for frame in 0..2000 {
            now += 16.7;
            game.frame(now);
            if frame % 60 == 0 {
                run_until(&mut game, now);
            }
            for word in game.round.active() {
                assert!(bounds.contains(word.pos, word.size));
            }
        }
    }

    #[test]
    fn test_floaters_drift_when_idle_unless_pinned() {
        let mut game = game_with(Settings::default());
        let hero = game.floater(FloaterKey::Hero).unwrap().pos;
        let stats = game.floater(FloaterKey::Stats).unwrap().pos;
        game.set_pinned(FloaterKey::Stats, true);

        game.frame(0.0);
        game.frame(500.0);
        assert_eq!(game.phase(), RoundPhase::Idle);
        assert_ne!(game.floater(FloaterKey::Hero).unwrap().pos, hero);
        assert_eq!(game.floater(FloaterKey::Stats).unwrap().pos, stats);
    }

    #[test]
    fn test_theme_and_seed_are_kept() {
        let mut game = game_with(Settings::default());
        assert_eq!(game.seed(), 42);
        assert_eq!(game.settings().theme, Theme::Dark);
        game.set_theme(Theme::Neon);
        assert_eq!(game.settings().theme, Theme::Neon);
        // Switching theme never touches the round
        assert_eq!(game.phase(), RoundPhase::Idle);
    }

    #[test]
    fn test_resize_clamps_everything() {
        let mut game = game_with(Settings::default());
        game.start();
        game.round.words.push(Word::new(
            1000,
            "zenith",
            Vec2::new(900.0, 500.0),
            Vec2::new(-50.0, 20.0),
            Vec2::new(72.0, 24.0),
        ));

        game.renderer_mut().playfield = Bounds::new(300.0, 200.0);
        game.renderer_mut().viewport = Bounds::new(400.0, 300.0);
        game.resize();

        let word = game.round.word(1000).unwrap();
        assert_eq!(word.pos, Vec2::new(228.0, 176.0));
        assert_eq!(word.vel, Vec2::new(-50.0, 20.0));
        let playfield = game.renderer().playfield();
        let viewport = game.renderer().viewport();
        for word in &game.round.words {
            assert!(playfield.contains(word.pos, word.size));
        }
        for floater in &game.floaters {
            assert!(viewport.contains(floater.pos, floater.size));
        }
    }
}
