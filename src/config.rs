//! Game configuration file.
//!
//! A JSON document with `field`, `engine`, `input` and `scores` sections. Every
//! field is optional and falls back to its default. When the file does not
//! exist, the defaults are written there so players have something to edit.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::config::{MAX_FIELD_SIDE, MIN_FIELD_SIDE};
use crate::core::{EngineConfig, Randomizer};
use crate::input::RepeatTiming;
use crate::scores::{DEFAULT_MAX_HIGH_SCORES, DEFAULT_PLAYER_NAME};
use crate::types::{
    ADD_REPEAT_DELAY_MS, AUTO_REPEAT_DELAY_MS, AUTO_REPEAT_INTERVAL_MS, BASE_FALL_MS,
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_TICK_MS,
    FAST_FALL_MS,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_SCORES_PATH: &str = "data/scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSection {
    pub width: u16,
    pub height: u16,
}

impl Default for FieldSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub base_fall_ms: u32,
    pub fast_fall_ms: u32,
    pub randomizer: Randomizer,
    pub ghost_enabled: bool,
    pub hold_enabled: bool,
    /// Game loop period
    pub tick_ms: u32,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            base_fall_ms: BASE_FALL_MS,
            fast_fall_ms: FAST_FALL_MS,
            randomizer: Randomizer::Bag,
            ghost_enabled: true,
            hold_enabled: true,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    pub auto_repeat_delay_ms: u32,
    pub add_repeat_delay_ms: u32,
    pub auto_repeat_interval_ms: u32,
    /// Release held keys after this much quiet time, for terminals without
    /// key-release events. Zero waits for real releases.
    pub key_release_timeout_ms: u32,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            auto_repeat_delay_ms: AUTO_REPEAT_DELAY_MS,
            add_repeat_delay_ms: ADD_REPEAT_DELAY_MS,
            auto_repeat_interval_ms: AUTO_REPEAT_INTERVAL_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoresSection {
    pub max_high_scores: usize,
    pub path: PathBuf,
    pub player_name: String,
}

impl Default for ScoresSection {
    fn default() -> Self {
        Self {
            max_high_scores: DEFAULT_MAX_HIGH_SCORES,
            path: PathBuf::from(DEFAULT_SCORES_PATH),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldSection,
    pub engine: EngineSection,
    pub input: InputSection,
    pub scores: ScoresSection,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; if it does not exist, write the defaults there first.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            eprintln!("[Config] wrote defaults to {}", path.display());
            return Ok(config);
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.field.width >= MIN_FIELD_SIDE && self.field.height >= MIN_FIELD_SIDE,
            "field must be at least {}x{}, got {}x{}",
            MIN_FIELD_SIDE,
            MIN_FIELD_SIDE,
            self.field.width,
            self.field.height
        );
        ensure!(
            self.field.width <= MAX_FIELD_SIDE && self.field.height <= MAX_FIELD_SIDE,
            "field must be at most {}x{}, got {}x{}",
            MAX_FIELD_SIDE,
            MAX_FIELD_SIDE,
            self.field.width,
            self.field.height
        );
        ensure!(self.engine.base_fall_ms > 0, "engine.base_fall_ms must be positive");
        ensure!(self.engine.fast_fall_ms > 0, "engine.fast_fall_ms must be positive");
        ensure!(self.engine.tick_ms > 0, "engine.tick_ms must be positive");
        ensure!(
            self.input.auto_repeat_interval_ms > 0,
            "input.auto_repeat_interval_ms must be positive"
        );
        Ok(())
    }

    /// The engine-facing part
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.field.width,
            height: self.field.height,
            base_fall_ms: self.engine.base_fall_ms,
            fast_fall_ms: self.engine.fast_fall_ms,
            randomizer: self.engine.randomizer,
            hold_enabled: self.engine.hold_enabled,
            ghost_enabled: self.engine.ghost_enabled,
        }
    }

    pub fn repeat_timing(&self) -> RepeatTiming {
        RepeatTiming {
            auto_repeat_delay_ms: self.input.auto_repeat_delay_ms,
            add_repeat_delay_ms: self.input.add_repeat_delay_ms,
            auto_repeat_interval_ms: self.input.auto_repeat_interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.engine_config(), EngineConfig::default());
        assert_eq!(config.repeat_timing(), RepeatTiming::default());
        assert_eq!(config.engine.tick_ms, 16);
        assert_eq!(config.scores.max_high_scores, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config = GameConfig::from_json(
            r#"{ "field": { "width": 12 }, "engine": { "randomizer": "random" } }"#,
        )
        .unwrap();
        assert_eq!(config.field.width, 12);
        assert_eq!(config.field.height, 20);
        assert_eq!(config.engine.randomizer, Randomizer::Uniform);
        assert_eq!(config.input, InputSection::default());
    }

    #[test]
    fn test_validate_rejects_tiny_field() {
        let err = GameConfig::from_json(r#"{ "field": { "width": 3 } }"#).unwrap_err();
        assert!(err.to_string().contains("field must be at least"));
    }

    #[test]
    fn test_validate_rejects_huge_field() {
        let err = GameConfig::from_json(r#"{ "field": { "width": 40000, "height": 4 } }"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("at most"));

        let config = GameConfig::from_json(r#"{ "field": { "width": 64, "height": 64 } }"#)
            .unwrap();
        assert_eq!(config.engine_config().normalized().width, 64);
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let mut config = GameConfig::default();
        config.engine.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.input.auto_repeat_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_randomizer_is_an_error() {
        assert!(GameConfig::from_json(r#"{ "engine": { "randomizer": "fair" } }"#).is_err());
    }
}
