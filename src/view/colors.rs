//! Palette and stroke styles for the draw list

use crate::rgb_to_rgba;

pub const BACKGROUND: u32 = 0x22_22_22;
pub const WHITE: u32 = 0xFF_FF_FF;
pub const TIMER_TRACK: u32 = 0x33_33_33;

pub const PLAYER_OUTLINE_ALPHA: f32 = 0.4;
pub const TARGET_OUTLINE_ALPHA: f32 = 0.8;
pub const INDICATOR_ALPHA: f32 = 0.3;
pub const THUMB_ALPHA: f32 = 0.3;
pub const TIMER_ALPHA: f32 = 0.3;
pub const SCORE_ALPHA: f32 = 0.08;

pub const OUTLINE_WIDTH: f32 = 2.0;
pub const LINE_WIDTH: f32 = 2.0;

#[inline]
pub fn background() -> [f32; 4] {
    rgb_to_rgba(BACKGROUND, 1.0)
}

/// Player circle outline in its side color
#[inline]
pub fn player_outline(rgb: u32) -> [f32; 4] {
    rgb_to_rgba(rgb, PLAYER_OUTLINE_ALPHA)
}

#[inline]
pub fn target_outline() -> [f32; 4] {
    rgb_to_rgba(WHITE, TARGET_OUTLINE_ALPHA)
}

#[inline]
pub fn indicator() -> [f32; 4] {
    rgb_to_rgba(WHITE, INDICATOR_ALPHA)
}

#[inline]
pub fn thumb_line(rgb: u32) -> [f32; 4] {
    rgb_to_rgba(rgb, THUMB_ALPHA)
}

#[inline]
pub fn timer_track() -> [f32; 4] {
    rgb_to_rgba(TIMER_TRACK, TIMER_ALPHA)
}

#[inline]
pub fn timer_fill() -> [f32; 4] {
    rgb_to_rgba(WHITE, TIMER_ALPHA)
}

#[inline]
pub fn score_text() -> [f32; 4] {
    rgb_to_rgba(WHITE, SCORE_ALPHA)
}
