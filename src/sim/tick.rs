//! Per-frame match loop
//!
//! Frame order matters: joystick routing sets velocities, the integrator moves
//! bodies, then overlaps are scored against the moved positions, and finally
//! particles age.

use super::input::FrameInput;
use super::particle::{emit_burst, update_particles};
use super::physics::MotionIntegrator;
use super::state::{MatchEvent, MatchPhase, MatchReport, MatchState, Side};

/// Bounce coefficient for the dots (perfectly elastic)
const TARGET_BOUNCE: f32 = 1.0;

/// Advance the match by one rendered frame of `delta_ms` milliseconds.
///
/// Returns the final report on the frame the clock runs out. The state is
/// reset at that point and stays [`MatchPhase::Ended`] until
/// [`MatchState::begin`] is called.
pub fn tick<P: MotionIntegrator + ?Sized>(
    state: &mut MatchState,
    physics: &mut P,
    input: &FrameInput,
    delta_ms: f32,
) -> Option<MatchReport> {
    if state.phase == MatchPhase::Ended {
        return None;
    }

    let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
    let dt = delta_ms / 1000.0;

    state.events.clear();
    state.frame += 1;
    state.clock_ms += delta_ms as f64;

    // Clock
    state.time_left_ms = (state.time_left_ms - delta_ms).clamp(0.0, state.tuning.game_duration_ms);
    if state.time_left_ms <= 0.0 {
        return Some(end_match(state));
    }

    // Transient overlays are rebuilt every frame
    for player in &mut state.players {
        player.clear_graphics();
    }

    route_input(state, input);

    // Physics step (external collaborator)
    let arena = state.arena;
    for player in &mut state.players {
        physics.integrate(&mut player.body, arena, state.tuning.player_bounce, dt);
    }
    for target in &mut state.targets {
        physics.integrate(&mut target.body, arena, TARGET_BOUNCE, dt);
    }

    for player in &mut state.players {
        player.update_indicator(&state.tuning);
    }
    for target in &mut state.targets {
        target.update(dt, &state.tuning, &mut state.rng);
    }

    // Fixed-period scoring gate; the remainder is dropped
    state.score_timer_ms += delta_ms;
    if state.score_timer_ms >= state.tuning.score_interval_ms {
        score_tick(state, physics);
        state.score_timer_ms = 0.0;
    }

    for particles in &mut state.particles {
        update_particles(particles, dt, &state.tuning);
    }

    None
}

/// Apply edge events, then feed joystick readings to the players
fn route_input(state: &mut MatchState, input: &FrameInput) {
    use super::input::ContactEvent;

    for event in &input.events {
        match *event {
            ContactEvent::Down { id, pos } => {
                state.router.contact_down(id, pos, state.arena, &state.tuning);
            }
            ContactEvent::Up { id } => {
                if let Some(side) = state.router.contact_up(id) {
                    state.player_mut(side).stop();
                }
            }
        }
    }

    for reading in state.router.route(&input.contacts, state.arena, &state.tuning) {
        let player = state.player_mut(reading.side);
        player.set_velocity(reading.vector.x, reading.vector.y);
        player.update_thumb_line(reading.contact);
    }
}

/// One overlap check per side: +1 point each, drain, bursts and time bonus
fn score_tick<P: MotionIntegrator + ?Sized>(state: &mut MatchState, physics: &P) {
    let mut points = 0;

    for side in Side::BOTH {
        let i = side.index();
        if !physics.overlaps(&state.players[i].body, &state.targets[i].body) {
            continue;
        }
        points += 1;

        let outcome = state.targets[i].on_overlap(state.clock_ms, state.arena, &state.tuning, &mut state.rng);

        if let Some(pos) = outcome.burst {
            let color = state.targets[i].color;
            emit_burst(
                &mut state.particles[i],
                pos,
                color,
                &state.tuning,
                state.max_particles,
                &mut state.rng,
            );
            state.events.push(MatchEvent::Burst { side, pos });
        }

        if outcome.drained {
            let added_ms = state.add_time_bonus();
            state.events.push(MatchEvent::Drained {
                side,
                health: state.targets[i].health,
            });
            if added_ms > 0.0 {
                state.events.push(MatchEvent::TimeBonus { added_ms });
            }
        }

        if outcome.respawned {
            state.events.push(MatchEvent::Respawned {
                side,
                count: state.targets[i].respawn_count,
            });
        }
    }

    if points > 0 {
        state.score += points;
        state.events.push(MatchEvent::Scored { points });
    }
}

/// End a running match early, as if the clock had run out
pub fn finish_match(state: &mut MatchState) -> Option<MatchReport> {
    state.is_running().then(|| end_match(state))
}

fn end_match(state: &mut MatchState) -> MatchReport {
    let report = MatchReport {
        score: state.score,
        respawns: state.total_respawns(),
        duration_ms: state.clock_ms,
        frames: state.frame,
    };
    log::info!(
        "Match over: score {} ({} respawns, {:.1}s)",
        report.score,
        report.respawns,
        report.duration_ms / 1000.0
    );

    state.last_score = Some(report.score);
    state.reset();
    state.phase = MatchPhase::Ended;
    state.events.push(MatchEvent::Ended { score: report.score });
    report
}
