//! Data-driven game balance
//!
//! Every gameplay number lives here so a match can be replayed or rebalanced
//! from a JSON file without recompiling.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning file: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// How a contact's joystick origin is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoystickMode {
    /// Origin is wherever the finger first touched
    #[default]
    FreeRoam,
    /// Origin is the center of a fixed zone in the lower part of each half
    FixedZone,
}

/// Gameplay tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Match ===
    /// Match length (ms)
    pub game_duration_ms: f32,
    /// Scoring gate period (ms)
    pub score_interval_ms: f32,
    /// Time added whenever a dot loses health (ms)
    pub time_bonus_per_hit_ms: f32,

    // === Players ===
    /// Player circle radius as a fraction of min(width, height)
    pub player_size_ratio: f32,
    /// Top speed of a player circle (px/s)
    pub max_speed: f32,
    /// Wall restitution for player circles
    pub player_bounce: f32,
    pub left_x_ratio: f32,
    pub right_x_ratio: f32,
    pub player_y_ratio: f32,
    /// Heading indicator length, in radii at full speed
    pub indicator_length: f32,

    // === Joystick ===
    pub joystick_mode: JoystickMode,
    /// Free-roam joystick reach as a fraction of screen height
    pub joystick_range_ratio: f32,
    /// Fixed-zone height as a fraction of screen height
    pub joystick_zone_height_ratio: f32,
    /// Fixed-zone center height as a fraction of screen height
    pub joystick_zone_y_ratio: f32,
    /// Deadzone as a fraction of joystick reach
    pub deadzone: f32,
    /// Response curve exponent is 1 / sensitivity
    pub sensitivity: f32,
    /// Largest distance ratio fed into the response curve
    pub overshoot_cap: f32,

    // === Targets ===
    /// Dot radius as a fraction of the player radius
    pub target_size_ratio: f32,
    pub target_y_ratio: f32,
    pub min_target_speed: f32,
    pub max_target_speed: f32,
    pub max_health: u32,
    pub health_drain_interval_ms: f32,
    pub health_drain_amount: u32,
    /// Smallest dot radius (px)
    pub min_dot_size: f32,
    pub speed_increase_per_respawn: f32,
    /// Speeds below this fraction of the target speed get re-randomized
    pub speed_floor_ratio: f32,

    // === Particles ===
    /// Seconds between bursts from the same dot
    pub spawn_cooldown_secs: f32,
    pub particles_per_burst: usize,
    pub spawn_radius: f32,
    pub particle_base_speed: f32,
    pub particle_speed_variance: f32,
    pub particle_start_size: f32,
    pub particle_min_size: f32,
    pub particle_size_decay: f32,
    pub particle_alpha_start: f32,
    /// Life lost per frame
    pub particle_life_decay: f32,
    pub white_particle_chance: f32,
    /// Sideways weave amplitude (px); zero disables weaving
    pub particle_weave_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_ms: 15_000.0,
            score_interval_ms: 100.0,
            time_bonus_per_hit_ms: 150.0,

            player_size_ratio: 0.15,
            max_speed: 600.0,
            player_bounce: 0.5,
            left_x_ratio: 0.25,
            right_x_ratio: 0.75,
            player_y_ratio: 0.5,
            indicator_length: 3.0,

            joystick_mode: JoystickMode::FreeRoam,
            joystick_range_ratio: 0.15,
            joystick_zone_height_ratio: 0.4,
            joystick_zone_y_ratio: 0.75,
            deadzone: 0.01,
            sensitivity: 1.0,
            overshoot_cap: 1.0,

            target_size_ratio: 0.15,
            target_y_ratio: 0.25,
            min_target_speed: 20.0,
            max_target_speed: 80.0,
            max_health: 50,
            health_drain_interval_ms: 100.0,
            health_drain_amount: 1,
            min_dot_size: 5.0,
            speed_increase_per_respawn: 0.2,
            speed_floor_ratio: 0.9,

            spawn_cooldown_secs: 0.1,
            particles_per_burst: 12,
            spawn_radius: 4.0,
            particle_base_speed: 120.0,
            particle_speed_variance: 40.0,
            particle_start_size: 3.0,
            particle_min_size: 1.0,
            particle_size_decay: 0.94,
            particle_alpha_start: 0.4,
            particle_life_decay: 0.03,
            white_particle_chance: 0.4,
            particle_weave_amplitude: 0.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("game_duration_ms", self.game_duration_ms)?;
        positive("score_interval_ms", self.score_interval_ms)?;
        positive("max_speed", self.max_speed)?;
        positive("sensitivity", self.sensitivity)?;
        positive("overshoot_cap", self.overshoot_cap)?;
        positive("joystick_range_ratio", self.joystick_range_ratio)?;
        positive("joystick_zone_height_ratio", self.joystick_zone_height_ratio)?;
        positive("min_dot_size", self.min_dot_size)?;
        positive("particle_life_decay", self.particle_life_decay)?;

        if self.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_target_speed > self.max_target_speed {
            return Err(ConfigError::Invalid {
                field: "min_target_speed",
                reason: format!(
                    "{} exceeds max_target_speed {}",
                    self.min_target_speed, self.max_target_speed
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.white_particle_chance) {
            return Err(ConfigError::Invalid {
                field: "white_particle_chance",
                reason: "must be within 0..=1".to_string(),
            });
        }
        Ok(())
    }

    /// Speed multiplier after `respawn_count` respawns
    #[inline]
    pub fn speed_multiplier(&self, respawn_count: u32) -> f32 {
        1.0 + respawn_count as f32 * self.speed_increase_per_respawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_duration_ms": 30000.0, "joystick_mode": "FixedZone" }"#)
            .expect("valid tuning");
        assert_eq!(tuning.game_duration_ms, 30_000.0);
        assert_eq!(tuning.joystick_mode, JoystickMode::FixedZone);
        assert_eq!(tuning.max_health, 50);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{ "min_target_speed": 90.0, "max_target_speed": 10.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_target_speed", .. }));
    }

    #[test]
    fn test_rejects_zero_sensitivity() {
        let err = Tuning::from_json(r#"{ "sensitivity": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("sensitivity"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_speed_multiplier() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_multiplier(0), 1.0);
        assert!((tuning.speed_multiplier(3) - 1.6).abs() < 1e-6);
    }
}
