//! Physics and level tuning
//!
//! Loaded from JSON by the host; every section falls back to the game's
//! defaults for missing fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, at_least, finite, positive};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Difficulty rating (1-5) fed to fragment composition
    pub fn rating(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 5,
        }
    }
}

/// Actor tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Visual edge length of the square actor
    pub size: f32,
    /// Hitbox edge as a fraction of the visual size
    pub hitbox_scale: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub max_fall_speed: f32,
    /// Y of the ground line the actor is clamped to
    pub ground_level: f32,
    pub start: Vec2,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            size: ACTOR_SIZE,
            hitbox_scale: HITBOX_SCALE,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            max_fall_speed: MAX_FALL_SPEED,
            ground_level: GROUND_Y,
            start: Vec2::new(START_X, START_Y),
        }
    }
}

impl ActorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("actor.size", self.size)?;
        positive("actor.hitbox_scale", self.hitbox_scale)?;
        positive("actor.gravity", self.gravity)?;
        positive("actor.jump_force", self.jump_force)?;
        positive("actor.max_fall_speed", self.max_fall_speed)?;
        finite("actor.ground_level", self.ground_level)?;
        finite("actor.start.x", self.start.x)?;
        finite("actor.start.y", self.start.y)?;
        Ok(())
    }

    /// Hitbox edge length
    pub fn hitbox_edge(&self) -> f32 {
        self.size * self.hitbox_scale
    }
}

/// Level layout tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub ground_y: f32,
    pub segment_width: f32,
    /// Nominal length of a procedural level
    pub level_length: f32,
    /// Procedural segments kept generated ahead of the actor
    pub segments_ahead: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            ground_y: GROUND_Y,
            segment_width: SEGMENT_WIDTH,
            level_length: LEVEL_LENGTH,
            segments_ahead: SEGMENTS_AHEAD,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("level.ground_y", self.ground_y)?;
        at_least("level.segment_width", self.segment_width, MIN_SEGMENT_WIDTH)?;
        positive("level.level_length", self.level_length)?;
        Ok(())
    }
}

/// Run pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    /// Horizontal speed on level 1
    pub base_speed: f32,
    /// Added to the run speed for every level past the first
    pub speed_per_level: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            base_speed: BASE_RUN_SPEED,
            speed_per_level: RUN_SPEED_PER_LEVEL,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("run.base_speed", self.base_speed)?;
        finite("run.speed_per_level", self.speed_per_level)?;
        Ok(())
    }

    /// Run speed for a 1-based level number
    pub fn speed_for_level(&self, level_number: u32) -> f32 {
        self.base_speed + level_number.saturating_sub(1) as f32 * self.speed_per_level
    }
}

/// Complete core settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub actor: ActorConfig,
    pub level: LevelConfig,
    pub run: RunConfig,
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings (difficulty {})",
            settings.run.difficulty.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.actor.validate()?;
        self.level.validate()?;
        self.run.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "actor": { "gravity": 40.0 } }"#).unwrap();
        assert_eq!(settings.actor.gravity, 40.0);
        assert_eq!(settings.actor.jump_force, JUMP_FORCE);
        assert_eq!(settings.level.segment_width, SEGMENT_WIDTH);
    }

    #[test]
    fn test_negative_size_rejected() {
        let result = Settings::from_json(r#"{ "actor": { "size": -1.0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::NonPositive { field: "actor.size", .. })
        ));
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_speed_for_level() {
        let run = RunConfig::default();
        assert_eq!(run.speed_for_level(1), 7.0);
        assert_eq!(run.speed_for_level(3), 8.0);
    }

    #[test]
    fn test_difficulty_rating() {
        assert_eq!(Difficulty::Easy.rating(), 1);
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    #[test]
    fn test_tiny_segment_width_rejected() {
        let result = Settings::from_json(r#"{ "level": { "segment_width": 0.000001 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::BelowMinimum { field: "level.segment_width", .. })
        ));
        let result = Settings::from_json(r#"{ "level": { "segment_width": 0.0 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_start() {
        let mut settings = Settings::default();
        settings.actor.start = Vec2::new(2.0, 4.0);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.actor.start, Vec2::new(2.0, 4.0));
    }
}
