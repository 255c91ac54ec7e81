//! Engine configuration
//!
//! An immutable value handed to [`Engine::new`](crate::Engine::new). The engine
//! never re-reads configuration while a game runs.

use serde::{Deserialize, Serialize};

use crate::sequencer::Randomizer;
use crate::types::{BASE_FALL_MS, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, FAST_FALL_MS};

/// Smallest field side the engine accepts; the spawn column needs 4 columns.
pub const MIN_FIELD_SIDE: u16 = 4;

/// Largest field side the engine accepts.
pub const MAX_FIELD_SIDE: u16 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Fall interval at level 1, in milliseconds per row
    pub base_fall_ms: u32,
    /// Fall interval while soft drop is held
    pub fast_fall_ms: u32,
    pub randomizer: Randomizer,
    pub hold_enabled: bool,
    pub ghost_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            base_fall_ms: BASE_FALL_MS,
            fast_fall_ms: FAST_FALL_MS,
            randomizer: Randomizer::Bag,
            hold_enabled: true,
            ghost_enabled: true,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    /// Copy with degenerate values clamped to something playable.
    pub fn normalized(self) -> Self {
        Self {
            width: self.width.clamp(MIN_FIELD_SIDE, MAX_FIELD_SIDE),
            height: self.height.clamp(MIN_FIELD_SIDE, MAX_FIELD_SIDE),
            base_fall_ms: self.base_fall_ms.max(1),
            fast_fall_ms: self.fast_fall_ms.max(1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.base_fall_ms, 1000);
        assert_eq!(config.fast_fall_ms, 50);
        assert_eq!(config.randomizer, Randomizer::Bag);
        assert!(config.hold_enabled && config.ghost_enabled);
    }

    #[test]
    fn test_normalized_clamps_degenerate_values() {
        let config = EngineConfig {
            width: 1,
            height: 0,
            base_fall_ms: 0,
            fast_fall_ms: 0,
            ..EngineConfig::default()
        }
        .normalized();

        assert_eq!((config.width, config.height), (4, 4));
        assert_eq!((config.base_fall_ms, config.fast_fall_ms), (1, 1));
    }

    #[test]
    fn test_normalized_caps_oversized_field() {
        let config = EngineConfig::default().with_size(40_000, 65).normalized();
        assert_eq!((config.width, config.height), (MAX_FIELD_SIDE, MAX_FIELD_SIDE));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"width": 12, "randomizer": "random"}"#)
            .expect("parse");
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 20);
        assert_eq!(config.randomizer, Randomizer::Uniform);
    }
}
