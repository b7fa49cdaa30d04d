//! Shared helpers for the integration tests.
//!
//! `Frozen` stands in for the physics collaborator so scenarios control every
//! position by hand.

#![allow(dead_code)]

use glam::Vec2;
pub use hemisphere_hunter::consts::FRAME_MS;
use hemisphere_hunter::Tuning;
use hemisphere_hunter::sim::{Body, MatchState, MotionIntegrator, Side};

pub const ARENA: Vec2 = Vec2::new(1280.0, 720.0);

/// Integrator double that never moves anything
pub struct Frozen;

impl MotionIntegrator for Frozen {
    fn integrate(&mut self, _body: &mut Body, _bounds: Vec2, _bounce: f32, _dt: f32) {}
}

pub fn new_match(seed: u64) -> MatchState {
    MatchState::new(seed, ARENA, Tuning::default())
}

/// Put a side's dot right on top of its player
pub fn park_on_player(state: &mut MatchState, side: Side) {
    let pos = state.player(side).body.pos;
    state.target_mut(side).body.pos = pos;
}
