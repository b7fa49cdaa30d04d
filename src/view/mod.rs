//! Presentation read model
//!
//! `build_frame` flattens a `MatchState` into an ordered list of draw
//! commands (back to front). Whatever actually puts pixels on screen
//! implements `Presenter` and consumes the `Frame`; the simulation never
//! calls into it.

pub mod colors;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rgb_to_rgba;
use crate::sim::{MatchState, Side};

/// Timer bar geometry, as fractions of the arena width plus fixed pixels
const TIMER_BAR_X_RATIO: f32 = 0.1;
const TIMER_BAR_WIDTH_RATIO: f32 = 0.8;
const TIMER_BAR_Y: f32 = 20.0;
const TIMER_BAR_HEIGHT: f32 = 20.0;

/// Background score glyph height
const SCORE_FONT_SIZE: f32 = 200.0;

/// Outline style for a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: [f32; 4],
}

/// One primitive to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<[f32; 4]>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    /// Axis-aligned rectangle; `pos` is the top-left corner
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Text centered on `center`
    Text {
        center: Vec2,
        text: String,
        size: f32,
        color: [f32; 4],
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: [f32; 4],
    pub score: u32,
    /// Remaining time as a fraction of the match length
    pub timer_ratio: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

/// Sink for built frames (a renderer, a recorder, a test double)
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}

/// Presenter that only keeps running totals
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub commands: u64,
    pub peak_commands: usize,
}

impl Presenter for FrameStats {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        self.commands += frame.commands.len() as u64;
        self.peak_commands = self.peak_commands.max(frame.commands.len());
    }
}

fn timer_bar(commands: &mut Vec<DrawCommand>, arena: Vec2, ratio: f32) {
    let pos = Vec2::new(
        arena.x * TIMER_BAR_X_RATIO,
        TIMER_BAR_Y - TIMER_BAR_HEIGHT / 2.0,
    );
    let full = arena.x * TIMER_BAR_WIDTH_RATIO;

    commands.push(DrawCommand::Rect {
        pos,
        size: Vec2::new(full, TIMER_BAR_HEIGHT),
        color: colors::timer_track(),
    });
    if ratio > 0.0 {
        commands.push(DrawCommand::Rect {
            pos,
            size: Vec2::new(full * ratio, TIMER_BAR_HEIGHT),
            color: colors::timer_fill(),
        });
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &MatchState) -> Frame {
    let arena = state.arena;
    let tuning = &state.tuning;
    let timer_ratio = state.timer_ratio();
    let mut commands = Vec::with_capacity(
        16 + state.particles(Side::Left).len() + state.particles(Side::Right).len(),
    );

    commands.push(DrawCommand::Text {
        center: arena / 2.0,
        text: state.score.to_string(),
        size: SCORE_FONT_SIZE,
        color: colors::score_text(),
    });
    timer_bar(&mut commands, arena, timer_ratio);

    for side in Side::BOTH {
        for p in state.particles(side) {
            commands.push(DrawCommand::Circle {
                center: p.pos,
                radius: p.size,
                fill: Some(rgb_to_rgba(p.color.rgb(), p.alpha(tuning))),
                stroke: None,
            });
        }
    }

    for side in Side::BOTH {
        let target = state.target(side);
        commands.push(DrawCommand::Circle {
            center: target.body.pos,
            radius: target.body.radius,
            fill: Some(rgb_to_rgba(target.color, 1.0)),
            stroke: Some(Stroke {
                width: colors::OUTLINE_WIDTH,
                color: colors::target_outline(),
            }),
        });
    }

    for side in Side::BOTH {
        let player = state.player(side);
        if let Some(seg) = player.thumb_line {
            commands.push(DrawCommand::Line {
                from: seg.from,
                to: seg.to,
                width: colors::LINE_WIDTH,
                color: colors::thumb_line(player.color),
            });
        }
        if let Some(seg) = player.indicator {
            commands.push(DrawCommand::Line {
                from: seg.from,
                to: seg.to,
                width: colors::LINE_WIDTH,
                color: colors::indicator(),
            });
        }
        commands.push(DrawCommand::Circle {
            center: player.body.pos,
            radius: player.body.radius,
            fill: None,
            stroke: Some(Stroke {
                width: colors::OUTLINE_WIDTH,
                color: colors::player_outline(player.color),
            }),
        });
    }

    Frame {
        width: arena.x,
        height: arena.y,
        background: colors::background(),
        score: state.score,
        timer_ratio,
        commands,
    }
}
