//! Player-controlled circles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::Body;
use super::state::Side;
use crate::tuning::Tuning;

/// A straight segment for overlays (heading indicator, thumb line)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// One of the two steerable circles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    pub side: Side,
    pub body: Body,
    /// Outline color (0xRRGGBB)
    pub color: u32,
    pub max_speed: f32,
    /// Heading line, `None` while stationary
    pub indicator: Option<Segment>,
    /// Line from the circle to the steering finger
    pub thumb_line: Option<Segment>,
}

impl PlayerController {
    pub fn new(side: Side, arena: Vec2, tuning: &Tuning) -> Self {
        Self {
            side,
            body: Body::new(Self::anchor(side, arena, tuning), Self::radius_for(arena, tuning)),
            color: side.player_color(),
            max_speed: tuning.max_speed,
            indicator: None,
            thumb_line: None,
        }
    }

    pub fn radius_for(arena: Vec2, tuning: &Tuning) -> f32 {
        arena.x.min(arena.y) * tuning.player_size_ratio
    }

    pub fn anchor(side: Side, arena: Vec2, tuning: &Tuning) -> Vec2 {
        let x_ratio = match side {
            Side::Left => tuning.left_x_ratio,
            Side::Right => tuning.right_x_ratio,
        };
        Vec2::new(arena.x * x_ratio, arena.y * tuning.player_y_ratio)
    }

    /// Set velocity from a joystick vector expressed as a fraction of top speed
    pub fn set_velocity(&mut self, nx: f32, ny: f32) {
        let vel = Vec2::new(nx, ny) * self.max_speed;
        self.body.vel = if vel.is_finite() {
            vel.clamp_length_max(self.max_speed)
        } else {
            Vec2::ZERO
        };
    }

    pub fn stop(&mut self) {
        self.body.vel = Vec2::ZERO;
    }

    /// Recompute the heading line from the current velocity
    pub fn update_indicator(&mut self, tuning: &Tuning) {
        let speed = self.body.speed();
        self.indicator = if speed > 0.0 {
            let dir = self.body.vel / speed;
            let length = (speed / self.max_speed) * self.body.radius * tuning.indicator_length;
            Some(Segment {
                from: self.body.pos,
                to: self.body.pos + dir * length,
            })
        } else {
            None
        };
    }

    pub fn update_thumb_line(&mut self, contact: Option<Vec2>) {
        self.thumb_line = contact.map(|to| Segment {
            from: self.body.pos,
            to,
        });
    }

    pub fn clear_graphics(&mut self) {
        self.indicator = None;
        self.thumb_line = None;
    }

    /// Snap back to the side's anchor at the new scale
    pub fn resize(&mut self, arena: Vec2, tuning: &Tuning) {
        self.body.radius = Self::radius_for(arena, tuning);
        self.body.pos = Self::anchor(self.side, arena, tuning);
    }
}
