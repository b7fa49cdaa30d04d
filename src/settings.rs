//! Player settings and preferences
//!
//! Kept apart from `Tuning`: tuning is game balance, settings are what a
//! player flips in a menu. `apply_to` folds the relevant ones into a tuning
//! copy before a match starts.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES_PER_SIDE;
use crate::tuning::{JoystickMode, Tuning};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum live particles per side for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 128,
            QualityPreset::High => MAX_PARTICLES_PER_SIDE,
        }
    }

    /// Fraction of each burst actually emitted
    pub fn burst_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    /// Particle bursts on contact
    pub particles: bool,

    /// Joystick variant; `None` keeps the tuning's choice
    pub joystick_mode: Option<JoystickMode>,
    /// Joystick sensitivity; `None` keeps the tuning's value
    pub sensitivity: Option<f32>,

    // === Accessibility ===
    /// Reduced motion (no weaving particles, smaller bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            joystick_mode: None,
            sensitivity: None,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap per side
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Tuning with these preferences applied
    pub fn apply_to(&self, tuning: &Tuning) -> Tuning {
        let mut tuned = tuning.clone();

        if let Some(mode) = self.joystick_mode {
            tuned.joystick_mode = mode;
        }
        if let Some(sensitivity) = self.sensitivity.filter(|s| s.is_finite() && *s > 0.0) {
            tuned.sensitivity = sensitivity;
        }

        let mut scale = self.quality.burst_scale();
        if self.reduced_motion {
            tuned.particle_weave_amplitude = 0.0;
            scale *= 0.5;
        }
        if !self.particles {
            scale = 0.0;
        }
        tuned.particles_per_burst = (tuned.particles_per_burst as f32 * scale).round() as usize;

        tuned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_tuning_alone() {
        let tuning = Tuning::default();
        let applied = Settings::default().apply_to(&tuning);
        assert_eq!(applied, tuning);
        assert_eq!(Settings::default().max_particles(), 128);
    }

    #[test]
    fn test_particles_off() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(settings.apply_to(&Tuning::default()).particles_per_burst, 0);
    }

    #[test]
    fn test_low_preset_halves_bursts() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.apply_to(&Tuning::default()).particles_per_burst, 6);
        assert_eq!(settings.max_particles(), 48);
    }

    #[test]
    fn test_reduced_motion_stops_weave() {
        let tuning = Tuning {
            particle_weave_amplitude: 3.0,
            ..Tuning::default()
        };
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let applied = settings.apply_to(&tuning);
        assert_eq!(applied.particle_weave_amplitude, 0.0);
        assert_eq!(applied.particles_per_burst, 6);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            joystick_mode: Some(JoystickMode::FixedZone),
            sensitivity: Some(1.5),
            ..Settings::default()
        };
        let applied = settings.apply_to(&Tuning::default());
        assert_eq!(applied.joystick_mode, JoystickMode::FixedZone);
        assert_eq!(applied.sensitivity, 1.5);
    }

    #[test]
    fn test_bad_sensitivity_ignored() {
        let settings = Settings {
            sensitivity: Some(-2.0),
            ..Settings::default()
        };
        assert_eq!(settings.apply_to(&Tuning::default()).sensitivity, 1.0);
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"High"}"#).expect("parse");
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.particles);
    }
}
