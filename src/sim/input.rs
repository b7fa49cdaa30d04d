//! Virtual joysticks
//!
//! Each half of the screen is a joystick. The first finger to land on a half
//! claims it until it lifts; its drag away from the origin becomes a velocity
//! request for that side's circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::tuning::{JoystickMode, Tuning};

/// A live pointer/touch contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub pos: Vec2,
    pub is_down: bool,
}

/// Press/release edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactEvent {
    Down { id: u64, pos: Vec2 },
    Up { id: u64 },
}

/// Input delivered for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub events: Vec<ContactEvent>,
    pub contacts: Vec<Contact>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finger landing (edge + live contact)
    pub fn press(mut self, id: u64, pos: Vec2) -> Self {
        self.events.push(ContactEvent::Down { id, pos });
        self.contacts.push(Contact { id, pos, is_down: true });
        self
    }

    /// A finger held at `pos`
    pub fn hold(mut self, id: u64, pos: Vec2) -> Self {
        self.contacts.push(Contact { id, pos, is_down: true });
        self
    }

    /// A finger lifting
    pub fn release(mut self, id: u64) -> Self {
        self.events.push(ContactEvent::Up { id });
        self
    }
}

/// A contact that owns one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoystickBinding {
    pub contact_id: u64,
    pub origin: Vec2,
}

/// Joystick output for one side this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickReading {
    pub side: Side,
    /// Requested velocity as a fraction of top speed
    pub vector: Vec2,
    /// Where the finger is, `None` inside the deadzone
    pub contact: Option<Vec2>,
}

/// Maps contacts to the left/right joysticks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputRouter {
    bindings: [Option<JoystickBinding>; 2],
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self, side: Side) -> Option<&JoystickBinding> {
        self.bindings[side.index()].as_ref()
    }

    pub fn side_of(&self, contact_id: u64) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.binding(*side).is_some_and(|b| b.contact_id == contact_id))
    }

    pub fn clear(&mut self) {
        self.bindings = [None, None];
    }

    /// Center of a side's fixed joystick zone
    pub fn zone_center(side: Side, arena: Vec2, tuning: &Tuning) -> Vec2 {
        let x_ratio = match side {
            Side::Left => tuning.left_x_ratio,
            Side::Right => tuning.right_x_ratio,
        };
        Vec2::new(arena.x * x_ratio, arena.y * tuning.joystick_zone_y_ratio)
    }

    /// Drag distance that maps to full speed
    pub fn max_distance(arena: Vec2, tuning: &Tuning) -> f32 {
        match tuning.joystick_mode {
            JoystickMode::FreeRoam => arena.y * tuning.joystick_range_ratio,
            JoystickMode::FixedZone => arena.y * tuning.joystick_zone_height_ratio / 2.0,
        }
    }

    /// Bind a new contact to its half if that half is free
    pub fn contact_down(&mut self, id: u64, pos: Vec2, arena: Vec2, tuning: &Tuning) -> Option<Side> {
        if self.side_of(id).is_some() {
            return None;
        }

        let side = if pos.x < arena.x / 2.0 { Side::Left } else { Side::Right };
        let slot = &mut self.bindings[side.index()];
        if slot.is_some() {
            return None;
        }

        let origin = match tuning.joystick_mode {
            JoystickMode::FreeRoam => pos,
            JoystickMode::FixedZone => Self::zone_center(side, arena, tuning),
        };
        *slot = Some(JoystickBinding {
            contact_id: id,
            origin,
        });
        log::debug!("Contact {id} bound to {side:?} joystick at {origin}");
        Some(side)
    }

    /// Release a contact; returns the side it was steering
    pub fn contact_up(&mut self, id: u64) -> Option<Side> {
        let side = self.side_of(id)?;
        self.bindings[side.index()] = None;
        log::debug!("Contact {id} released {side:?} joystick");
        Some(side)
    }

    /// Turn a raw drag offset into a joystick vector
    pub fn shape(offset: Vec2, max_distance: f32, tuning: &Tuning) -> Vec2 {
        if max_distance <= 0.0 {
            return Vec2::ZERO;
        }
        let distance = offset.length();
        if distance <= tuning.deadzone * max_distance {
            return Vec2::ZERO;
        }

        let ratio = distance / max_distance;
        let factor = ratio.min(tuning.overshoot_cap).powf(1.0 / tuning.sensitivity);
        let unit = offset / distance;
        unit * ratio.min(tuning.overshoot_cap) * factor
    }

    /// Readings for every bound, pressed contact
    pub fn route(&self, contacts: &[Contact], arena: Vec2, tuning: &Tuning) -> Vec<JoystickReading> {
        let max_distance = Self::max_distance(arena, tuning);
        contacts
            .iter()
            .filter(|c| c.is_down)
            .filter_map(|contact| {
                let side = self.side_of(contact.id)?;
                let origin = self.binding(side)?.origin;
                let vector = Self::shape(contact.pos - origin, max_distance, tuning);
                Some(JoystickReading {
                    side,
                    vector,
                    contact: (vector != Vec2::ZERO).then_some(contact.pos),
                })
            })
            .collect()
    }
}
