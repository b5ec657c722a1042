//! Fixed timestep session tick
//!
//! Advances one play session deterministically. Pointer and press input
//! arrive as data; whether a press means start, drop, release, or restart
//! depends only on the current phase. Input that arrives mid-transition is
//! dropped, never queued.

use glam::Vec2;

use super::collision::{claw_can_grab, prize_in_zone, settle_against_bounds};
use super::state::{ClawLean, GameEvent, SessionPhase, SessionState};
use crate::consts::{LEAN_LEFT_X, LEAN_RIGHT_X};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw pointer x from the host, unclamped
    pub pointer_x: Option<f32>,
    /// Pointer-down this tick; meaning depends on the phase
    pub press: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.phase {
        SessionPhase::Idle => {
            if input.press {
                state.begin_play();
            }
        }

        SessionPhase::Playing => {
            track_pointer(state, input);
            step_prizes(state, dt);

            if input.press {
                state.claw.travel_target_y = drop_target(state);
                state.phase = SessionPhase::Dropping;
                log::debug!("claw dropping from x={:.1}", state.claw.pos.x);
            }
        }

        SessionPhase::Dropping => {
            // Input is a no-op while the drop is in flight
            step_prizes(state, dt);

            // Prizes may still be settling; keep chasing the deepest one
            state.claw.travel_target_y = drop_target(state);
            if advance_claw(state, dt) {
                try_grab(state);
                state.claw.travel_target_y = state.config.claw_rest_y;
                state.phase = SessionPhase::Ascending;
            }
        }

        SessionPhase::Ascending => {
            step_prizes(state, dt);

            let arrived = advance_claw(state, dt);
            carry_held_prize(state);
            if arrived {
                state.phase = if state.held_prize.is_some() {
                    SessionPhase::Holding
                } else {
                    SessionPhase::Playing
                };
            }
        }

        SessionPhase::Holding => {
            track_pointer(state, input);
            carry_held_prize(state);
            step_prizes(state, dt);

            if input.press {
                release_prize(state);
            }
        }

        SessionPhase::Releasing => {
            // Claw is locked until the release resolves
            step_prizes(state, dt);
            detect_win(state);

            if let Some(remaining) = state.victory_countdown {
                if remaining <= 1 {
                    state.victory_countdown = None;
                    state.phase = SessionPhase::Won;
                    if let Some(id) = state.released_prize {
                        state.push_event(GameEvent::Victory { prize_id: id });
                        log::info!("prize {id} landed in the zone, victory");
                    }
                } else {
                    state.victory_countdown = Some(remaining - 1);
                }
            } else {
                state.release_ticks += 1;
                if state.release_ticks >= state.config.release_timeout_ticks {
                    // The release settled outside the zone; hand the claw back
                    log::debug!("release settled outside the zone");
                    state.prize_released = false;
                    state.released_prize = None;
                    state.release_ticks = 0;
                    state.phase = SessionPhase::Playing;
                }
            }
        }

        SessionPhase::Won => {
            if input.press {
                state.reset();
            }
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Clamp the claw to its rail and refresh the overlay lean cue
fn track_pointer(state: &mut SessionState, input: &TickInput) {
    if let Some(x) = input.pointer_x {
        state.claw.pos.x = x.clamp(state.config.claw_min_x, state.config.claw_max_x);
        state.lean = if x < LEAN_LEFT_X {
            ClawLean::Left
        } else if x > LEAN_RIGHT_X {
            ClawLean::Right
        } else {
            ClawLean::Centered
        };
    }
}

/// Depth the claw descends to: the deepest free prize, capped to the rail
fn drop_target(state: &SessionState) -> f32 {
    let deepest = state
        .prizes
        .iter()
        .filter(|p| !p.held)
        .map(|p| p.pos.y)
        .fold(f32::MIN, f32::max);
    deepest.clamp(state.config.claw_rest_y, state.config.claw_drop_y)
}

/// Move the claw toward its travel target; true once it arrives
///
/// Speed is fixed so a full rest-to-drop leg takes the configured time.
fn advance_claw(state: &mut SessionState, dt: f32) -> bool {
    let config = &state.config;
    let speed = (config.claw_drop_y - config.claw_rest_y) / config.claw_travel_secs;
    let delta = state.claw.travel_target_y - state.claw.pos.y;
    let step = speed * dt;
    if delta.abs() <= step {
        state.claw.pos.y = state.claw.travel_target_y;
        true
    } else {
        state.claw.pos.y += step * delta.signum();
        false
    }
}

/// Grab arbitration at the bottom of a drop: the first prize in id order
/// strictly inside the grab radius wins; everything else is ignored
fn try_grab(state: &mut SessionState) {
    if state.held_prize.is_some() {
        return;
    }

    let claw_pos = state.claw.pos;
    let grab_radius = state.config.grab_radius;
    let carry_offset = state.config.carry_offset_y;

    let candidate = state
        .prizes
        .iter()
        .find(|p| !p.held && claw_can_grab(claw_pos, p.pos, grab_radius))
        .map(|p| p.id);

    match candidate {
        Some(id) => {
            if let Some(prize) = state.prize_mut(id) {
                prize.attach(claw_pos, carry_offset);
            }
            state.held_prize = Some(id);
            state.push_event(GameEvent::PrizeGrabbed { prize_id: id });
            log::info!("grabbed prize {id}");
        }
        None => {
            state.push_event(GameEvent::GrabMissed);
            log::debug!("grab missed at x={:.1}", claw_pos.x);
        }
    }
}

/// Keep a held prize pinned under the claw
fn carry_held_prize(state: &mut SessionState) {
    if let Some(id) = state.held_prize {
        let target = state.claw.pos + Vec2::new(0.0, state.config.carry_offset_y);
        if let Some(prize) = state.prize_mut(id) {
            prize.pos = target;
        }
    }
}

/// Free the held prize with a downward kick and arm the win guard
fn release_prize(state: &mut SessionState) {
    let Some(id) = state.held_prize.take() else {
        state.phase = SessionPhase::Playing;
        return;
    };

    let release_speed = state.config.release_speed;
    if let Some(prize) = state.prize_mut(id) {
        prize.release(release_speed);
    }
    state.released_prize = Some(id);
    state.prize_released = true;
    state.release_ticks = 0;
    state.phase = SessionPhase::Releasing;
    state.push_event(GameEvent::PrizeReleased { prize_id: id });
    log::info!("released prize {id} at x={:.1}", state.claw.pos.x);
}

/// Zone contact is a win candidate only for the deliberately released
/// prize; the guard clears on first contact, so repeated per-tick overlap
/// reports cannot re-arm it
fn detect_win(state: &mut SessionState) {
    if !state.prize_released {
        return;
    }
    let Some(id) = state.released_prize else {
        return;
    };

    let zone = state.config.zone;
    let landed = state
        .prize(id)
        .is_some_and(|p| prize_in_zone(p.pos, p.radius, &zone));

    if landed {
        state.prize_released = false;
        state.victory_countdown = Some(state.config.victory_delay_ticks);
        log::debug!("prize {id} contacted the drop zone");
    }
}

/// Gravity, integration, and bounds response for every free prize
fn step_prizes(state: &mut SessionState, dt: f32) {
    let field = state.config.field;
    let bounce = state.config.bounce;
    let gravity = state.config.gravity;

    for prize in &mut state.prizes {
        if prize.held {
            continue;
        }
        if prize.gravity_enabled {
            prize.vel.y += gravity * dt;
        }
        prize.pos += prize.vel * dt;
        settle_against_bounds(prize, field, bounce);
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::SessionConfig;
    use proptest::prelude::*;

    proptest! {
        /// Clamp invariant: any raw pointer value leaves the claw on the rail
        #[test]
        fn prop_claw_stays_on_rail(xs in proptest::collection::vec(-2000.0f32..2800.0, 1..200)) {
            let mut state = SessionState::new(1, SessionConfig::default());
            tick(&mut state, &TickInput { press: true, ..Default::default() }, SIM_DT);

            for x in xs {
                let input = TickInput { pointer_x: Some(x), ..Default::default() };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.claw.pos.x >= state.config.claw_min_x);
                prop_assert!(state.claw.pos.x <= state.config.claw_max_x);
            }
        }

        /// At-most-one-held invariant under arbitrary input sequences
        #[test]
        fn prop_at_most_one_held(
            script in proptest::collection::vec((any::<bool>(), -500.0f32..1300.0), 1..400)
        ) {
            let mut state = SessionState::new(42, SessionConfig::default());
            tick(&mut state, &TickInput { press: true, ..Default::default() }, SIM_DT);

            for (pressed, x) in script {
                let input = TickInput { pointer_x: Some(x), press: pressed };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.prizes.iter().filter(|p| p.held).count() <= 1);
                if let Some(id) = state.held_prize {
                    prop_assert!(state.prize(id).is_some_and(|p| p.held));
                }
            }
        }
    }
}
