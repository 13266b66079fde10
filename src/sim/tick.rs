//! Per-frame simulation step
//!
//! One call advances the world by exactly one display frame. The order of the
//! phases below is observable (support checks read the velocity of the frame
//! they run in), so do not reorder them.

use super::input::InputState;
use super::state::{GameEvent, GamePhase, GameState, Viewport};
use crate::tuning::Tuning;

/// Advance the game by one frame.
///
/// `now_ms` is a monotonic wall clock used only by the speed-up ramp.
/// Consumes the jump/drop edges queued in `input`. Returns the events raised
/// this frame; a finished game is left untouched and raises nothing.
pub fn tick(
    state: &mut GameState,
    input: &mut InputState,
    viewport: Viewport,
    now_ms: f64,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;
    state.viewport = viewport;

    // Key edges queued since the last frame
    if input.take_jump() && !state.player.try_jump(tuning) {
        log::trace!("Jump refused ({} used)", state.player.jump_count);
    }
    if input.take_drop() {
        state.player.fast_fall(tuning);
    }
    state.player.update_sprite(input, tuning);

    // World scroll: floors first, then platforms
    let floor_speed = state.difficulty.floor_speed;
    let platform_speed = state.difficulty.platform_speed;
    state.floors.advance(
        &mut state.player,
        input,
        floor_speed,
        viewport,
        &mut state.rng,
        tuning,
    );
    state.platforms.advance(
        &mut state.player,
        input,
        platform_speed,
        viewport,
        &mut state.rng,
        tuning,
    );

    let threshold = viewport.scroll_threshold(tuning);
    let scrolling = state.player.pos.x >= threshold;
    if let Some(distance) = state.difficulty.update(scrolling, now_ms, tuning) {
        events.push(GameEvent::SpeedUp { distance });
    }

    update_velocity(state, input, threshold, tuning);

    // Integrate
    state.player.pos += state.player.vel;
    // Running right stops dead at the threshold; past it the world scrolls instead
    if state.player.vel.x > 0.0 && state.player.pos.x > threshold {
        state.player.pos.x = threshold;
    }

    if state.player_lost() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at distance {} after {} ticks",
            state.difficulty.distance,
            state.time_ticks
        );
        events.push(GameEvent::GameOver {
            distance: state.difficulty.distance,
        });
        return events;
    }

    state.player.advance_animation(tuning);
    events
}

/// Resolve ground contact, gravity and horizontal intent
fn update_velocity(state: &mut GameState, input: &InputState, threshold: f32, tuning: &Tuning) {
    if state.player_supported() {
        state.player.land();
    } else {
        state.player.vel.y += tuning.gravity;
    }

    let x = state.player.pos.x;
    let can_go_right = input.right_pressed && !input.both_pressed() && x < threshold;
    let can_go_left = input.left_pressed && !input.both_pressed() && x > tuning.min_player_x;

    state.player.vel.x = if can_go_right {
        tuning.run_speed
    } else if can_go_left {
        -tuning.run_speed
    } else {
        0.0
    };
}
