//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time is always passed in, never read from a clock
//! - Seeded RNG only
//! - Fixed left-then-right iteration order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod input;
pub mod particle;
pub mod physics;
pub mod player;
pub mod state;
pub mod target;
pub mod tick;

pub use autopilot::Autopilot;
pub use input::{Contact, ContactEvent, FrameInput, InputRouter, JoystickBinding, JoystickReading};
pub use particle::{Particle, ParticleColor, Weave};
pub use physics::{ArcadePhysics, Body, MotionIntegrator};
pub use player::{PlayerController, Segment};
pub use state::{MatchEvent, MatchObserver, MatchPhase, MatchReport, MatchState, Side};
pub use target::{OverlapOutcome, Target, TargetPhase};
pub use tick::{finish_match, tick};
