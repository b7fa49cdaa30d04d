//! Match state and core simulation types
//!
//! Everything a match mutates lives in [`MatchState`], so a match can be
//! stepped, inspected and reset without hidden globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputRouter;
use super::particle::Particle;
use super::player::PlayerController;
use super::target::Target;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which half of the screen (and which player/dot pair)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn player_color(self) -> u32 {
        match self {
            Side::Left => LEFT_PLAYER_COLOR,
            Side::Right => RIGHT_PLAYER_COLOR,
        }
    }

    pub fn target_color(self) -> u32 {
        match self {
            Side::Left => LEFT_TARGET_COLOR,
            Side::Right => RIGHT_TARGET_COLOR,
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Clock running, input live
    Running,
    /// Clock expired; waiting for `begin`
    Ended,
}

/// Things that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Scored { points: u32 },
    Burst { side: Side, pos: Vec2 },
    Drained { side: Side, health: u32 },
    Respawned { side: Side, count: u32 },
    TimeBonus { added_ms: f32 },
    Ended { score: u32 },
}

/// Summary handed to the match-end observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u32,
    /// Respawns across both dots
    pub respawns: u32,
    /// How long the match actually lasted, bonuses included
    pub duration_ms: f64,
    pub frames: u64,
}

/// Receives finished matches (menu, leaderboard, ...)
pub trait MatchObserver {
    fn match_ended(&mut self, report: &MatchReport);
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub tuning: Tuning,
    /// Particle budget per side
    pub max_particles: usize,
    pub seed: u64,
    /// Play area size (px)
    pub arena: Vec2,
    pub phase: MatchPhase,
    pub score: u32,
    pub time_left_ms: f32,
    /// Time since the last scoring tick
    pub score_timer_ms: f32,
    /// Match clock, used for drain timestamps
    pub clock_ms: f64,
    pub frame: u64,
    pub players: [PlayerController; 2],
    pub targets: [Target; 2],
    /// Sparkles, owned per side
    pub particles: [Vec<Particle>; 2],
    pub router: InputRouter,
    pub rng: Pcg32,
    /// Score of the previous match, for the menu
    pub last_score: Option<u32>,
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Create a running match
    pub fn new(seed: u64, arena: Vec2, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let players = Side::BOTH.map(|side| PlayerController::new(side, arena, &tuning));
        let targets = Side::BOTH.map(|side| Target::new(side, arena, &tuning, &mut rng));

        log::info!("Match started (seed {seed}, arena {}x{})", arena.x, arena.y);

        Self {
            max_particles: MAX_PARTICLES_PER_SIDE,
            seed,
            arena,
            phase: MatchPhase::Running,
            score: 0,
            time_left_ms: tuning.game_duration_ms,
            score_timer_ms: 0.0,
            clock_ms: 0.0,
            frame: 0,
            players,
            targets,
            particles: [Vec::new(), Vec::new()],
            router: InputRouter::new(),
            rng,
            last_score: None,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn with_particle_cap(mut self, cap: usize) -> Self {
        self.max_particles = cap;
        self
    }

    pub fn player(&self, side: Side) -> &PlayerController {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerController {
        &mut self.players[side.index()]
    }

    pub fn target(&self, side: Side) -> &Target {
        &self.targets[side.index()]
    }

    pub fn target_mut(&mut self, side: Side) -> &mut Target {
        &mut self.targets[side.index()]
    }

    pub fn particles(&self, side: Side) -> &[Particle] {
        &self.particles[side.index()]
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Remaining time as a 0..=1 fill ratio
    pub fn timer_ratio(&self) -> f32 {
        (self.time_left_ms / self.tuning.game_duration_ms).clamp(0.0, 1.0)
    }

    pub fn total_respawns(&self) -> u32 {
        self.targets.iter().map(|t| t.respawn_count).sum()
    }

    /// Extend the clock, never past the full match length
    pub fn add_time_bonus(&mut self) -> f32 {
        let before = self.time_left_ms;
        self.time_left_ms =
            (self.time_left_ms + self.tuning.time_bonus_per_hit_ms).min(self.tuning.game_duration_ms);
        self.time_left_ms - before
    }

    /// Restore every per-match value; the RNG keeps its stream
    pub fn reset(&mut self) {
        let arena = self.arena;
        self.score = 0;
        self.time_left_ms = self.tuning.game_duration_ms;
        self.score_timer_ms = 0.0;
        self.clock_ms = 0.0;
        self.frame = 0;
        self.players = Side::BOTH.map(|side| PlayerController::new(side, arena, &self.tuning));
        let rng = &mut self.rng;
        let tuning = &self.tuning;
        self.targets = Side::BOTH.map(|side| Target::new(side, arena, tuning, rng));
        self.particles.iter_mut().for_each(Vec::clear);
        self.router.clear();
        self.events.clear();
    }

    /// Start a fresh match
    pub fn begin(&mut self) {
        self.reset();
        self.phase = MatchPhase::Running;
        log::info!("Match started (seed {}, arena {}x{})", self.seed, self.arena.x, self.arena.y);
    }

    /// Rescale all ratio-based geometry; scores, health and particles survive
    pub fn resize(&mut self, width: f32, height: f32) {
        let new_arena = Vec2::new(width, height);
        if !new_arena.is_finite() || width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring resize to {width}x{height}");
            return;
        }
        let old_arena = self.arena;
        self.arena = new_arena;
        for player in &mut self.players {
            player.resize(new_arena, &self.tuning);
        }
        for target in &mut self.targets {
            target.resize(old_arena, new_arena, &self.tuning);
        }
    }
}
