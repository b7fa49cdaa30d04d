//! Hemisphere Hunter - a two-stick arcade chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (joysticks, targets, scoring, particles)
//! - `view`: Draw-command read model for whatever renders the game
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: Session leaderboard and last score

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::{ConfigError, JoystickMode, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame period (ms) the game was tuned at
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default play area when no window size is known
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

    /// Particle budget per side before quality presets apply
    pub const MAX_PARTICLES_PER_SIDE: usize = 256;

    /// Player outline colors (light blue / light red)
    pub const LEFT_PLAYER_COLOR: u32 = 0x99_BB_FF;
    pub const RIGHT_PLAYER_COLOR: u32 = 0xFF_99_99;

    /// Dot fill colors
    pub const LEFT_TARGET_COLOR: u32 = 0x88_88_FF;
    pub const RIGHT_TARGET_COLOR: u32 = 0xFF_88_88;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Split 0xRRGGBB into normalized RGBA
#[inline]
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
    let b = (rgb & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}
