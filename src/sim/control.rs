//! Control: turns the frame's input into position/angle deltas
//!
//! Movement is per-frame fixed steps with clamped targets: a step that would
//! leave the allowed band simply does not happen (the barrel angle instead
//! saturates exactly to its bound). The pointer-release rule either snaps a
//! grabbed entity to the pointer or aims and fires the cannon.

use glam::Vec2;

use crate::consts::*;
use crate::sim::input::{FrameInput, PointerRelease};
use crate::sim::state::{GameEvent, GameState};

/// Apply held-key movement to the cannon and buckets
pub fn apply_held(state: &mut GameState, input: &FrameInput) {
    let cannon = &mut state.cannon;
    if input.raise_cannon && cannon.small.pos.y + MOVE_STEP < CANNON_Y_MAX {
        cannon.small.pos.y += MOVE_STEP;
        cannon.big.pos.y += MOVE_STEP;
    }
    if input.lower_cannon && cannon.small.pos.y - MOVE_STEP > CANNON_Y_MIN {
        cannon.small.pos.y -= MOVE_STEP;
        cannon.big.pos.y -= MOVE_STEP;
    }

    if input.turn_left {
        if cannon.angle_deg < CANNON_ANGLE_MAX - TURN_STEP {
            cannon.angle_deg += TURN_STEP;
        } else {
            cannon.angle_deg = CANNON_ANGLE_MAX;
        }
    }
    if input.turn_right {
        if cannon.angle_deg > -CANNON_ANGLE_MAX + TURN_STEP {
            cannon.angle_deg -= TURN_STEP;
        } else {
            cannon.angle_deg = -CANNON_ANGLE_MAX;
        }
    }

    if input.modifier_one {
        let bucket = &mut state.buckets[0];
        if input.move_left && bucket.body.pos.x - MOVE_STEP > -BUCKET_X_LIMIT {
            bucket.body.pos.x -= MOVE_STEP;
        }
        if input.move_right && bucket.body.pos.x + MOVE_STEP < BUCKET_X_LIMIT {
            bucket.body.pos.x += MOVE_STEP;
        }
    }
    if input.modifier_two {
        let bucket = &mut state.buckets[1];
        if input.move_left && bucket.body.pos.x - MOVE_STEP > -BUCKET_X_LIMIT {
            bucket.body.pos.x -= MOVE_STEP;
        }
        if input.move_right && bucket.body.pos.x + MOVE_STEP < BUCKET_X_LIMIT {
            bucket.body.pos.x += MOVE_STEP;
        }
    }
}

/// Apply pan/zoom input to the camera
pub fn apply_camera(state: &mut GameState, input: &FrameInput) {
    let camera = &mut state.camera;
    for _ in 0..input.zoom_steps.max(0) {
        camera.zoom_in();
    }
    for _ in 0..(-input.zoom_steps).max(0) {
        camera.zoom_out();
    }
    if input.pan_steps != 0 {
        camera.pan_by(Vec2::new(input.pan_steps as f32 * PAN_STEP, 0.0));
    }
    if input.drag_delta != Vec2::ZERO {
        // Screen y grows downward
        camera.pan_by(Vec2::new(input.drag_delta.x, -input.drag_delta.y));
    }
}

/// Resolve a primary-button release: snap a grabbed bucket/cannon to the
/// pointer, or treat it as an aim-and-fire command.
pub fn handle_pointer_release(state: &mut GameState, release: PointerRelease, now: f64) {
    let anchor = state.camera.screen_to_world(release.anchor);
    let target = state.camera.screen_to_world(release.at);

    if state.buckets[0].body.contains(anchor) {
        if target.x > -WORLD_HALF_WIDTH && target.x < WORLD_HALF_WIDTH {
            state.buckets[0].body.pos.x = target.x;
        }
    } else if state.buckets[1].body.contains(anchor) {
        if target.x > -WORLD_HALF_WIDTH && target.x < WORLD_HALF_WIDTH {
            state.buckets[1].body.pos.x = target.x;
        }
    } else if state.cannon.small.contains(anchor) || state.cannon.big.contains(anchor) {
        if target.y > -WORLD_HALF_HEIGHT && target.y < WORLD_HALF_HEIGHT {
            state.cannon.small.pos.y = target.y;
            state.cannon.big.pos.y = target.y;
        }
    } else {
        aim_at(state, target);
        try_fire(state, now);
    }
}

/// Point the barrel at a world position: plain arctangent of the offset
/// ratio, saturated to the swing bounds. A degenerate offset (release on the
/// muzzle itself) leaves the angle untouched.
fn aim_at(state: &mut GameState, target: Vec2) {
    let d = target - state.cannon.small.pos;
    let angle = (d.y / d.x).atan().to_degrees();
    if angle.abs() <= CANNON_ANGLE_MAX {
        state.cannon.angle_deg = angle;
    } else if angle > CANNON_ANGLE_MAX {
        state.cannon.angle_deg = CANNON_ANGLE_MAX;
    } else if angle < -CANNON_ANGLE_MAX {
        state.cannon.angle_deg = -CANNON_ANGLE_MAX;
    }
}

/// Fire the first idle laser slot from the cannon's muzzle.
///
/// The cooldown is consumed even when every slot is airborne, in which case
/// the shot is silently dropped. Returns whether a laser actually launched.
pub fn try_fire(state: &mut GameState, now: f64) -> bool {
    if now - state.last_shot < FIRE_COOLDOWN {
        return false;
    }
    state.last_shot = now;

    let Some(slot) = state.idle_laser_slot() else {
        return false;
    };
    let laser = &mut state.lasers[slot];
    laser.in_flight = true;
    laser.angle_deg = state.cannon.angle_deg;
    laser.body.pos = state.cannon.small.pos;
    log::debug!("laser {slot} fired at {:.0} degrees", state.cannon.angle_deg);
    state.push_event(GameEvent::LaserFired { slot });
    true
}
