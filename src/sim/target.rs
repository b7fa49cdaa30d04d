//! Target dots: bouncing, draining and respawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::Body;
use super::state::Side;
use crate::heading;
use crate::tuning::Tuning;

/// Lifecycle of a dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPhase {
    Active,
    Depleted,
}

/// What happened when a player sat on a dot during a scoring tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapOutcome {
    /// Emit a particle burst here
    pub burst: Option<Vec2>,
    /// Health was drained (grants a time bonus)
    pub drained: bool,
    /// Health hit zero and the dot moved
    pub respawned: bool,
}

/// A moving colored dot paired with one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub side: Side,
    pub body: Body,
    /// Full-health radius
    pub base_radius: f32,
    pub color: u32,
    pub health: u32,
    pub max_health: u32,
    pub speed_multiplier: f32,
    pub base_speed: f32,
    pub respawn_count: u32,
    /// Seconds until another burst may be emitted
    pub spawn_cooldown: f32,
    /// Match clock (ms) of the last health drain
    pub last_drain_ms: Option<f64>,
}

/// `[lo, hi]`, collapsed to its midpoint when inverted
fn spawn_span(lo: f32, hi: f32) -> (f32, f32) {
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    }
}

impl Target {
    /// Full-health radius for an arena of this size
    pub fn base_radius_for(arena: Vec2, tuning: &Tuning) -> f32 {
        let player_radius = arena.x.min(arena.y) * tuning.player_size_ratio;
        (player_radius * tuning.target_size_ratio).max(tuning.min_dot_size)
    }

    /// Starting position for a side
    pub fn anchor(side: Side, arena: Vec2, tuning: &Tuning) -> Vec2 {
        let x_ratio = match side {
            Side::Left => tuning.left_x_ratio,
            Side::Right => tuning.right_x_ratio,
        };
        Vec2::new(arena.x * x_ratio, arena.y * tuning.target_y_ratio)
    }

    pub fn new<R: Rng + ?Sized>(side: Side, arena: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let base_radius = Self::base_radius_for(arena, tuning);
        let mut target = Self {
            side,
            body: Body::new(Self::anchor(side, arena, tuning), base_radius),
            base_radius,
            color: side.target_color(),
            health: tuning.max_health,
            max_health: tuning.max_health,
            speed_multiplier: 1.0,
            base_speed: rng.random_range(tuning.min_target_speed..=tuning.max_target_speed),
            respawn_count: 0,
            spawn_cooldown: 0.0,
            last_drain_ms: None,
        };
        target.set_random_velocity(rng);
        target
    }

    pub fn phase(&self) -> TargetPhase {
        if self.health == 0 {
            TargetPhase::Depleted
        } else {
            TargetPhase::Active
        }
    }

    /// Speed the dot is meant to travel at
    #[inline]
    pub fn target_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// Radius interpolated between the floor and the base by health ratio
    pub fn radius_for_health(&self, tuning: &Tuning) -> f32 {
        let ratio = self.health as f32 / self.max_health as f32;
        let radius = tuning.min_dot_size + (self.base_radius - tuning.min_dot_size) * ratio;
        radius.clamp(tuning.min_dot_size, self.base_radius)
    }

    pub fn set_random_velocity<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.body.vel = heading(angle) * self.target_speed();
    }

    /// Per-frame upkeep: cooldown and speed guard
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, tuning: &Tuning, rng: &mut R) {
        self.spawn_cooldown = (self.spawn_cooldown - dt).max(0.0);

        // Wall bounces or a lossy integrator can bleed off energy
        if self.body.speed() < self.target_speed() * tuning.speed_floor_ratio {
            self.set_random_velocity(rng);
        }
    }

    /// Apply one scoring tick of contact with the paired player
    pub fn on_overlap<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        arena: Vec2,
        tuning: &Tuning,
        rng: &mut R,
    ) -> OverlapOutcome {
        let mut outcome = OverlapOutcome::default();

        if self.spawn_cooldown <= 0.0 {
            outcome.burst = Some(self.body.pos);
            self.spawn_cooldown = tuning.spawn_cooldown_secs;
        }

        let drain_due = self
            .last_drain_ms
            .is_none_or(|last| now_ms - last >= tuning.health_drain_interval_ms as f64);
        if drain_due {
            self.health = self.health.saturating_sub(tuning.health_drain_amount);
            self.last_drain_ms = Some(now_ms);
            self.body.radius = self.radius_for_health(tuning);
            outcome.drained = true;

            if self.phase() == TargetPhase::Depleted {
                self.respawn(arena, tuning, rng);
                outcome.respawned = true;
            }
        }

        outcome
    }

    /// Reset health, speed up, and jump somewhere new on this side
    pub fn respawn<R: Rng + ?Sized>(&mut self, arena: Vec2, tuning: &Tuning, rng: &mut R) {
        self.respawn_count += 1;
        self.speed_multiplier = tuning.speed_multiplier(self.respawn_count);

        // The base speed never regresses
        let floor = self.base_speed;
        self.base_speed = rng.random_range(
            tuning.min_target_speed.max(floor)..=tuning.max_target_speed.max(floor),
        );

        self.health = self.max_health;
        self.body.radius = self.base_radius;

        let margin = self.base_radius * 2.0;
        let half = arena.x / 2.0;
        let (min_x, max_x) = match self.side {
            Side::Left => spawn_span(margin, half - margin),
            Side::Right => spawn_span(half + margin, arena.x - margin),
        };
        let (min_y, max_y) = spawn_span(margin, arena.y - margin);
        self.body.pos = Vec2::new(
            rng.random_range(min_x..=max_x),
            rng.random_range(min_y..=max_y),
        );

        self.set_random_velocity(rng);

        log::info!(
            "{:?} target respawned (#{}, speed {:.1})",
            self.side,
            self.respawn_count,
            self.target_speed()
        );
    }

    /// Rescale geometry for a new arena size, keeping health and side
    pub fn resize(&mut self, old_arena: Vec2, new_arena: Vec2, tuning: &Tuning) {
        self.base_radius = Self::base_radius_for(new_arena, tuning);
        self.body.radius = self.radius_for_health(tuning);

        if old_arena.x > 0.0 && old_arena.y > 0.0 {
            self.body.pos *= new_arena / old_arena;
        } else {
            self.body.pos = Self::anchor(self.side, new_arena, tuning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ARENA: Vec2 = Vec2::new(1280.0, 720.0);

    fn setup(side: Side) -> (Target, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let target = Target::new(side, ARENA, &tuning, &mut rng);
        (target, tuning, rng)
    }

    #[test]
    fn test_new_target() {
        let (target, tuning, _) = setup(Side::Left);
        assert_eq!(target.health, 50);
        assert_eq!(target.phase(), TargetPhase::Active);
        assert_eq!(target.body.pos, Vec2::new(320.0, 180.0));
        assert!((target.base_radius - 720.0 * 0.15 * 0.15).abs() < 1e-4);
        assert!(target.base_speed >= tuning.min_target_speed);
        assert!(target.base_speed <= tuning.max_target_speed);
        assert!((target.body.speed() - target.base_speed).abs() < 1e-3);
    }

    #[test]
    fn test_first_overlap_bursts_and_drains() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        let outcome = target.on_overlap(0.0, ARENA, &tuning, &mut rng);
        assert_eq!(outcome.burst, Some(target.body.pos));
        assert!(outcome.drained);
        assert!(!outcome.respawned);
        assert_eq!(target.health, 49);
        assert_eq!(target.spawn_cooldown, tuning.spawn_cooldown_secs);
    }

    #[test]
    fn test_drain_interval_gates_health_loss() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        target.on_overlap(1000.0, ARENA, &tuning, &mut rng);
        let outcome = target.on_overlap(1050.0, ARENA, &tuning, &mut rng);
        assert!(!outcome.drained);
        assert_eq!(target.health, 49);
        let outcome = target.on_overlap(1100.0, ARENA, &tuning, &mut rng);
        assert!(outcome.drained);
        assert_eq!(target.health, 48);
    }

    #[test]
    fn test_cooldown_gates_bursts() {
        let (mut target, tuning, mut rng) = setup(Side::Right);
        assert!(target.on_overlap(0.0, ARENA, &tuning, &mut rng).burst.is_some());
        assert!(target.on_overlap(100.0, ARENA, &tuning, &mut rng).burst.is_none());
        target.update(0.1, &tuning, &mut rng);
        assert_eq!(target.spawn_cooldown, 0.0);
        assert!(target.on_overlap(200.0, ARENA, &tuning, &mut rng).burst.is_some());
    }

    #[test]
    fn test_radius_shrinks_with_health() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        let full = target.body.radius;
        for i in 0..25 {
            target.on_overlap(i as f64 * 100.0, ARENA, &tuning, &mut rng);
        }
        assert_eq!(target.health, 25);
        let expected = tuning.min_dot_size + (target.base_radius - tuning.min_dot_size) * 0.5;
        assert!((target.body.radius - expected).abs() < 1e-4);
        assert!(target.body.radius < full);
    }

    #[test]
    fn test_last_health_point_respawns_inside_half() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        target.health = 1;
        let outcome = target.on_overlap(0.0, ARENA, &tuning, &mut rng);

        assert!(outcome.drained && outcome.respawned);
        assert_eq!(target.health, target.max_health);
        assert_eq!(target.respawn_count, 1);
        assert!((target.speed_multiplier - 1.2).abs() < 1e-6);
        assert_eq!(target.body.radius, target.base_radius);

        let margin = target.base_radius * 2.0;
        assert!(target.body.pos.x >= margin && target.body.pos.x <= ARENA.x / 2.0 - margin);
        assert!(target.body.pos.y >= margin && target.body.pos.y <= ARENA.y - margin);
        assert!((target.body.speed() - target.target_speed()).abs() < 1e-3);
    }

    #[test]
    fn test_right_respawn_stays_right() {
        let (mut target, tuning, mut rng) = setup(Side::Right);
        for _ in 0..20 {
            target.respawn(ARENA, &tuning, &mut rng);
            assert!(target.body.pos.x >= ARENA.x / 2.0 + target.base_radius * 2.0);
            assert!(target.body.pos.x <= ARENA.x - target.base_radius * 2.0);
        }
    }

    #[test]
    fn test_base_speed_never_regresses() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        let mut previous = target.base_speed;
        for _ in 0..50 {
            target.respawn(ARENA, &tuning, &mut rng);
            assert!(target.base_speed >= previous);
            previous = target.base_speed;
        }
    }

    #[test]
    fn test_narrow_arena_collapses_spawn_span() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        let narrow = Vec2::new(40.0, 720.0);
        target.resize(ARENA, narrow, &tuning);
        target.respawn(narrow, &tuning, &mut rng);
        assert!((target.body.pos.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_guard_rerandomizes_slow_target() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        target.body.vel = Vec2::new(0.1, 0.0);
        target.update(1.0 / 60.0, &tuning, &mut rng);
        assert!((target.body.speed() - target.target_speed()).abs() < 1e-3);
    }

    #[test]
    fn test_speed_guard_leaves_fast_target_alone() {
        let (mut target, tuning, mut rng) = setup(Side::Left);
        let vel = target.body.vel;
        target.update(1.0 / 60.0, &tuning, &mut rng);
        assert_eq!(target.body.vel, vel);
    }

    #[test]
    fn test_resize_keeps_health_ratio_and_side() {
        let (mut target, tuning, mut rng) = setup(Side::Right);
        for i in 0..10 {
            target.on_overlap(i as f64 * 100.0, ARENA, &tuning, &mut rng);
        }
        let health = target.health;
        let pos = target.body.pos;
        let bigger = Vec2::new(2560.0, 1440.0);
        target.resize(ARENA, bigger, &tuning);

        assert_eq!(target.health, health);
        assert!((target.base_radius - 1440.0 * 0.15 * 0.15).abs() < 1e-3);
        assert!((target.body.radius - target.radius_for_health(&tuning)).abs() < 1e-6);
        assert!((target.body.pos - pos * 2.0).length() < 1e-3);
        assert!(target.body.pos.x > bigger.x / 2.0);
    }

    #[test]
    fn test_tiny_arena_floors_base_radius() {
        let tuning = Tuning::default();
        let radius = Target::base_radius_for(Vec2::new(100.0, 100.0), &tuning);
        assert_eq!(radius, tuning.min_dot_size);
    }
}
