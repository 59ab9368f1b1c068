//! Round settings and preferences
//!
//! Loaded from JSON (inline page config on web, a file path natively).
//! Anything missing falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::catalog::DEFAULT_WORDS;

/// Scoring rules applied by the input matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Hits score the word length, misses cost the typed length and reset the streak
    #[default]
    Length,
    /// Hits score 1, misses cost nothing
    Flat,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Length => "length",
            ScoringMode::Flat => "flat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "length" | "penalty" => Some(ScoringMode::Length),
            "flat" | "simple" => Some(ScoringMode::Flat),
            _ => None,
        }
    }
}

/// Visual theme (applied as a `theme-<name>` body class)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Neon,
    Crt,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Dark, Theme::Light, Theme::Neon, Theme::Crt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Neon => "neon",
            Theme::Crt => "crt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s.to_lowercase())
    }

    /// Body class for this theme
    pub fn class_name(&self) -> String {
        format!("theme-{}", self.as_str())
    }
}

/// Errors from loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON parsed but describes an unplayable round.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Round length (seconds)
    pub round_seconds: u32,
    /// Spawn cadence (ms)
    pub spawn_interval_ms: u32,
    /// Minimum drift speed (px/s)
    pub speed_base: f32,
    /// Random extra drift speed (px/s)
    pub speed_range: f32,
    /// Scoring rules
    pub scoring: ScoringMode,
    /// Never spawn a word whose text is already on screen
    pub unique_words: bool,
    /// Visual theme
    pub theme: Theme,
    /// Spawn catalog
    pub words: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            speed_base: SPEED_BASE,
            speed_range: SPEED_RANGE,
            scoring: ScoringMode::Length,
            unique_words: true,
            theme: Theme::Dark,
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tidy_words();
        settings.validate()?;
        Ok(settings)
    }

    /// Trim catalog entries and drop blank ones (typed input is trimmed too)
    pub fn tidy_words(&mut self) {
        self.words = self
            .words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} words)", settings.words.len());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.round_seconds == 0 {
            return Err(SettingsError::Invalid("round_seconds must be positive".into()));
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::Invalid("spawn_interval_ms must be positive".into()));
        }
        if !(self.speed_base >= 0.0 && self.speed_range >= 0.0) {
            return Err(SettingsError::Invalid("speeds must be non-negative".into()));
        }
        if self.words.iter().all(|w| w.trim().is_empty()) {
            return Err(SettingsError::Invalid("word list is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"round_seconds": 30, "scoring": "flat"}"#).unwrap();
        assert_eq!(settings.round_seconds, 30);
        assert_eq!(settings.scoring, ScoringMode::Flat);
        assert_eq!(settings.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert_eq!(settings.words.len(), DEFAULT_WORDS.len());
        assert!(settings.unique_words);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"round_seconds": 0}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"words": ["  "]}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(Settings::from_json("{oops"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_padded_words_are_trimmed() {
        let settings = Settings::from_json(r#"{"words": [" Nova ", "", "orbit\t"]}"#).unwrap();
        assert_eq!(settings.words, vec!["Nova".to_string(), "orbit".to_string()]);
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_str("NEON"), Some(Theme::Neon));
        assert_eq!(Theme::from_str("sepia"), None);
        assert_eq!(Theme::Crt.class_name(), "theme-crt");
        assert_eq!(ScoringMode::from_str("simple"), Some(ScoringMode::Flat));
    }
}
