//! Motion integration and overlap queries
//!
//! The simulation only assigns velocities. Moving bodies, keeping them inside
//! the arena and answering overlap queries is delegated to a
//! [`MotionIntegrator`], so a host engine can plug in its own physics.
//! [`ArcadePhysics`] is the built-in headless integrator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular body in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Signed distance between the edges of two circles (negative when overlapping)
#[inline]
pub fn sd_circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> f32 {
    (a - b).length() - (ra + rb)
}

/// Physics collaborator used by the match loop
pub trait MotionIntegrator {
    /// Advance `body` by `dt` seconds inside a `bounds`-sized arena
    fn integrate(&mut self, body: &mut Body, bounds: Vec2, bounce: f32, dt: f32);

    /// Whether two bodies currently overlap
    fn overlaps(&self, a: &Body, b: &Body) -> bool {
        sd_circle_circle(a.pos, a.radius, b.pos, b.radius) < 0.0
    }
}

/// Explicit-Euler integrator with world-bounds bounce
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcadePhysics;

impl ArcadePhysics {
    pub fn new() -> Self {
        Self
    }
}

/// Reflect one axis off the `[radius, extent - radius]` interval
fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32, bounce: f32) {
    // Body wider than the arena: pin it to the middle
    if extent <= radius * 2.0 {
        *pos = extent / 2.0;
        *vel = 0.0;
        return;
    }

    if *pos - radius < 0.0 {
        *pos = radius;
        if *vel < 0.0 {
            *vel = -*vel * bounce;
        }
    } else if *pos + radius > extent {
        *pos = extent - radius;
        if *vel > 0.0 {
            *vel = -*vel * bounce;
        }
    }
}

impl MotionIntegrator for ArcadePhysics {
    fn integrate(&mut self, body: &mut Body, bounds: Vec2, bounce: f32, dt: f32) {
        body.pos += body.vel * dt;
        bounce_axis(&mut body.pos.x, &mut body.vel.x, body.radius, bounds.x, bounce);
        bounce_axis(&mut body.pos.y, &mut body.vel.y, body.radius, bounds.y, bounce);
    }
}
