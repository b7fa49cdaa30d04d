//! Demo-mode autopilot
//!
//! Plays both sides by synthesizing the same touch input a person would
//! produce: one finger per half, dragged toward where that side's dot is
//! heading.

use glam::Vec2;

use super::input::{FrameInput, InputRouter};
use super::state::{MatchState, Side};

/// How far ahead (seconds) to lead a moving dot
const LEAD_SECS: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct Autopilot {
    contact_ids: [u64; 2],
    /// Fraction of full joystick deflection to use (0..=1)
    pub aggression: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            contact_ids: [9001, 9002],
            aggression: 1.0,
        }
    }
}

impl Autopilot {
    pub fn new(aggression: f32) -> Self {
        Self {
            aggression: aggression.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn contact_id(&self, side: Side) -> u64 {
        self.contact_ids[side.index()]
    }

    /// Where this side's finger goes down
    fn press_point(side: Side, state: &MatchState) -> Vec2 {
        InputRouter::zone_center(side, state.arena, &state.tuning)
    }

    /// Build this frame's input from the current state
    pub fn input_for(&self, state: &MatchState) -> FrameInput {
        let mut input = FrameInput::new();
        if !state.is_running() {
            return input;
        }

        let max_distance = InputRouter::max_distance(state.arena, &state.tuning);
        for side in Side::BOTH {
            let id = self.contact_id(side);
            let press = Self::press_point(side, state);

            let origin = match state.router.binding(side) {
                Some(binding) if binding.contact_id == id => binding.origin,
                Some(_) => continue,
                None => {
                    input = input.press(id, press);
                    continue;
                }
            };

            let player = state.player(side);
            let target = state.target(side);
            let aim = target.body.pos + target.body.vel * LEAD_SECS;
            let to_aim = aim - player.body.pos;

            // Ease off when already on top of the dot
            let distance = to_aim.length();
            let urgency = (distance / player.body.radius.max(1.0)).min(1.0) * self.aggression;

            // Small sway so the circles don't orbit in perfect loops
            let time = state.frame as f32 * 0.05;
            let sway = Vec2::new(time.sin(), (time * 0.7).cos()) * 0.1;

            let drag = (to_aim.normalize_or_zero() + sway).normalize_or_zero() * urgency * max_distance;
            input = input.hold(id, origin + drag);
        }
        input
    }
}
