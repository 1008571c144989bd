//! # Engine Settings
//!
//! Configuration for the entity store, the scene manager and the frame loop.
//! Every struct is `#[serde(default)]` so partial files only override what
//! they mention.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::foundation::logging;

/// # World Configuration
///
/// Behavior of the entity/component store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Reject component writes to dead or never-allocated entities with
    /// `EcsError::StaleEntity`. When false the write is dropped with a warning.
    pub strict_entities: bool,
    /// Entity slots reserved up front
    pub initial_capacity: usize,
}

impl WorldConfig {
    /// Create the default world configuration
    pub fn new() -> Self {
        Self {
            strict_entities: true,
            initial_capacity: 256,
        }
    }

    /// Choose strict or permissive handling of stale entity writes
    pub fn with_strict_entities(mut self, strict: bool) -> Self {
        self.strict_entities = strict;
        self
    }

    /// Set the number of entity slots reserved up front
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Configuration
///
/// Behavior of the scene manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Refuse to push a scene whose id is already current or paused.
    /// A load replaces every live scene, so it is never checked.
    /// Tag-based cleanup relies on ids being unique, so this is on by default.
    pub unique_scene_ids: bool,
    /// Log every completed transition at info level (debug otherwise)
    pub log_transitions: bool,
}

impl SceneConfig {
    /// Create the default scene configuration
    pub fn new() -> Self {
        Self {
            unique_scene_ids: true,
            log_transitions: true,
        }
    }

    /// Enable or disable the scene id uniqueness check
    pub fn with_unique_scene_ids(mut self, unique: bool) -> Self {
        self.unique_scene_ids = unique;
        self
    }

    /// Enable or disable info-level transition logging
    pub fn with_log_transitions(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Top-level configuration applications load from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound for a single frame delta in seconds
    pub max_frame_delta: f32,
    /// Entity store settings
    pub world: WorldConfig,
    /// Scene manager settings
    pub scenes: SceneConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frame_delta: 0.25,
            world: WorldConfig::default(),
            scenes: SceneConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the frame delta clamp
    pub fn with_max_frame_delta(mut self, seconds: f32) -> Self {
        self.max_frame_delta = seconds;
        self
    }

    /// Replace the world settings
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Replace the scene settings
    pub fn with_scenes(mut self, scenes: SceneConfig) -> Self {
        self.scenes = scenes;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_delta must be positive, got {}",
                self.max_frame_delta
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.world.strict_entities);
        assert!(config.scenes.unique_scene_ids);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = "log_level = \"debug\"\n\n[world]\nstrict_entities = false\n";
        let config = EngineConfig::from_str_as(text, ConfigFormat::Toml).unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.world.strict_entities);
        assert_eq!(config.world.initial_capacity, 256);
        assert_eq!(config.scenes, SceneConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = EngineConfig::default()
            .with_scenes(SceneConfig::default().with_unique_scene_ids(false))
            .with_max_frame_delta(0.1);
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        let parsed = EngineConfig::from_str_as(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_level = EngineConfig::default().with_log_level("chatty");
        assert!(matches!(bad_level.validate(), Err(ConfigError::Invalid(_))));

        let bad_delta = EngineConfig::default().with_max_frame_delta(0.0);
        assert!(matches!(bad_delta.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        let result = EngineConfig::from_str_as("log_level = ", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
