//! Per-frame simulation step
//!
//! One `tick` per iteration of the shell's event loop. Control deltas apply
//! first, then laser flight and deflection, then brick spawn, fall and
//! scoring. The fire cooldown is measured in clock seconds (`now`), the
//! brick spawn cadence in frame counts; the two must not be mixed.

use crate::consts::*;
use crate::sim::collision::{
    aabb_overlap, buckets_overlap, in_bucket_window, laser_out_of_bounds, mirror_deflection,
};
use crate::sim::control;
use crate::sim::input::FrameInput;
use crate::sim::state::{Brick, Bucket, GameEvent, GamePhase, GameState, Laser, Tone};
use crate::{heading, spawn_period};

/// Advance the game by one frame. `now` is a monotonic clock in seconds,
/// sampled once by the caller.
pub fn tick(state: &mut GameState, input: &FrameInput, now: f64) {
    state.frame += 1;
    // View control stays live in every phase
    control::apply_camera(state, input);

    match state.phase {
        GamePhase::Start => {
            advance_marquee(state);
            if input.start || input.release.is_some() {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Started);
                log::info!("game started");
            }
        }
        GamePhase::Playing => {
            if input.speed_up && state.bricks_speed < BRICKS_SPEED_MAX {
                state.bricks_speed += 1;
                state.push_event(GameEvent::SpeedChanged {
                    speed: state.bricks_speed,
                });
            }
            if input.speed_down && state.bricks_speed > BRICKS_SPEED_MIN {
                state.bricks_speed -= 1;
                state.push_event(GameEvent::SpeedChanged {
                    speed: state.bricks_speed,
                });
            }

            control::apply_held(state, input);
            if let Some(release) = input.release {
                control::handle_pointer_release(state, release, now);
            }
            if input.fire {
                control::try_fire(state, now);
            }

            advance_lasers(state);
            spawn_brick(state);
            update_bricks(state);
        }
        GamePhase::GameOver => {}
    }
}

/// Start-screen decoration: the marquee laser sweeps right and wraps back
fn advance_marquee(state: &mut GameState) {
    state.marquee.laser_x += MARQUEE_SPEED;
    if state.marquee.laser_x > MARQUEE_WRAP_X {
        state.marquee.laser_x = MARQUEE_RESET_X;
    }
}

/// Move airborne lasers along their heading, deflect off the first matching
/// mirror (creation order), retire any that leave the flight area.
fn advance_lasers(state: &mut GameState) {
    let mirrors = &state.mirrors;
    for laser in state.lasers.iter_mut() {
        if !laser.in_flight {
            continue;
        }
        laser.body.pos += LASER_SPEED * heading(laser.angle_deg);
        for mirror in mirrors {
            if let Some(angle) = mirror_deflection(laser, mirror) {
                laser.angle_deg = angle;
                break;
            }
        }
        if laser_out_of_bounds(laser.body.pos) {
            laser.in_flight = false;
        }
    }
}

/// Once per frame a spawn slot is drawn; when the cadence counter divides
/// the period and the slotted brick is idle, it starts falling and the
/// counter resets.
fn spawn_brick(state: &mut GameState) {
    let slot = state.draw_spawn_slot();
    let period = spawn_period(state.bricks_speed);
    if state.frame % period != 0 {
        return;
    }
    if let Some(brick) = state.bricks.get_mut(slot) {
        if !brick.falling {
            brick.falling = true;
            state.frame = 1;
            log::debug!("brick {slot} released");
        }
    }
}

/// First airborne laser (creation order) overlapping the brick is retired;
/// returns whether there was a hit.
fn laser_hit(lasers: &mut [Laser], brick: &Brick) -> bool {
    for laser in lasers.iter_mut() {
        if laser.in_flight && aabb_overlap(&brick.body, &laser.body) {
            laser.in_flight = false;
            return true;
        }
    }
    false
}

/// Fall, laser scoring and bucket resolution for every airborne brick.
///
/// Branch order matters: wrong-bucket penalties fire before correct catches
/// and do not retire the brick, catch scoring is disabled entirely while
/// the buckets overlap, and a hazard landing in either window ends the game
/// at once (no overlap gate), leaving the remaining bricks unprocessed.
/// Catches only happen on the exact `y == -260` row; a brick falling more
/// than one unit per frame can step over it.
fn update_bricks(state: &mut GameState) {
    let bucket_one: Bucket = state.buckets[0].clone();
    let bucket_two: Bucket = state.buckets[1].clone();
    let overlap = buckets_overlap(&bucket_one, &bucket_two);
    let speed = state.bricks_speed as f32;

    for i in 0..state.bricks.len() {
        if !state.bricks[i].falling {
            continue;
        }

        // Descend, or recycle unscored at the floor
        {
            let brick = &mut state.bricks[i];
            if brick.body.pos.y - speed > BRICK_FLOOR_Y {
                brick.body.pos.y -= speed;
            } else {
                brick.body.pos.y = BRICK_RECYCLE_HIGH_Y;
                brick.falling = false;
            }
        }

        if laser_hit(&mut state.lasers, &state.bricks[i]) {
            let tone = state.bricks[i].tone;
            let delta = match tone {
                Tone::Hazard => 10,
                Tone::Blue | Tone::Red => {
                    if state.score > 0 {
                        -10
                    } else {
                        0
                    }
                }
                Tone::Bonus => 50,
            };
            state.score += delta;
            let brick = &mut state.bricks[i];
            brick.falling = false;
            brick.body.pos.y = BRICK_SPAWN_Y;
            state.push_event(GameEvent::BrickShot {
                tone,
                score: delta,
            });
        }

        let tone = state.bricks[i].tone;
        let x = state.bricks[i].body.pos.x;
        let y = state.bricks[i].body.pos.y;
        let at_catch_row = y == CATCH_ROW_Y;

        // Wrong bucket: a brick matching the other bucket's tone costs
        // points but keeps falling
        if tone == bucket_one.tone
            && in_bucket_window(x, &bucket_two)
            && at_catch_row
            && !overlap
            && state.score > 0
        {
            state.score -= 10;
            state.push_event(GameEvent::WrongBucket {
                bucket: bucket_two.id,
                tone,
                score: -10,
            });
        }
        if tone == bucket_two.tone
            && in_bucket_window(x, &bucket_one)
            && at_catch_row
            && !overlap
            && state.score > 0
        {
            state.score -= 10;
            state.push_event(GameEvent::WrongBucket {
                bucket: bucket_one.id,
                tone,
                score: -10,
            });
        }

        // Correct catches recycle the brick; the two branches park it on
        // different rows
        if tone == bucket_two.tone && in_bucket_window(x, &bucket_two) && at_catch_row && !overlap
        {
            state.score += 10;
            let brick = &mut state.bricks[i];
            brick.falling = false;
            brick.body.pos.y = BRICK_SPAWN_Y;
            state.push_event(GameEvent::BrickCaught {
                bucket: bucket_two.id,
                tone,
                score: 10,
            });
        }
        if tone == bucket_one.tone && in_bucket_window(x, &bucket_one) && at_catch_row && !overlap
        {
            state.score += 10;
            let brick = &mut state.bricks[i];
            brick.falling = false;
            brick.body.pos.y = BRICK_RECYCLE_HIGH_Y;
            state.push_event(GameEvent::BrickCaught {
                bucket: bucket_one.id,
                tone,
                score: 10,
            });
        }

        // A hazard in either window ends the run immediately
        if tone == Tone::Hazard
            && at_catch_row
            && (in_bucket_window(x, &bucket_one) || in_bucket_window(x, &bucket_two))
        {
            state.phase = GamePhase::GameOver;
            state.push_event(GameEvent::GameOver { score: state.score });
            log::info!("hazard brick caught; game over with score {}", state.score);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(9);
        state.phase = GamePhase::Playing;
        state
    }

    fn idle_frame() -> FrameInput {
        FrameInput::default()
    }

    /// Park a falling brick so the next tick's fall step lands it exactly on
    /// the catch row.
    fn drop_brick(state: &mut GameState, index: usize, x: f32) {
        let speed = state.bricks_speed as f32;
        let brick = &mut state.bricks[index];
        brick.falling = true;
        brick.body.pos = Vec2::new(x, CATCH_ROW_Y + speed);
    }

    #[test]
    fn test_start_key_begins_play() {
        let mut state = GameState::new(9);
        let mut input = idle_frame();
        input.start = true;
        tick(&mut state, &input, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_click_release_begins_play() {
        use crate::sim::input::PointerRelease;
        let mut state = GameState::new(9);
        let mut input = idle_frame();
        input.release = Some(PointerRelease {
            anchor: Vec2::ZERO,
            at: Vec2::ZERO,
        });
        tick(&mut state, &input, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        // The release started the game; nothing was fired by it
        assert!(state.lasers.iter().all(|l| !l.in_flight));
    }

    #[test]
    fn test_start_phase_runs_marquee_not_physics() {
        let mut state = GameState::new(9);
        state.lasers[0].in_flight = true;
        state.lasers[0].body.pos = Vec2::new(0.0, 0.0);
        let x0 = state.marquee.laser_x;
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.marquee.laser_x, x0 + MARQUEE_SPEED);
        // Flight physics did not run
        assert_eq!(state.lasers[0].body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_marquee_wraps() {
        let mut state = GameState::new(9);
        state.marquee.laser_x = 398.0;
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.marquee.laser_x, MARQUEE_RESET_X);
    }

    #[test]
    fn test_laser_out_of_bounds_is_retired() {
        let mut state = playing_state();
        state.lasers[0].in_flight = true;
        state.lasers[0].angle_deg = 0.0;
        state.lasers[0].body.pos = Vec2::new(410.0, 0.0);
        tick(&mut state, &idle_frame(), 0.0);
        assert!(!state.lasers[0].in_flight);
    }

    #[test]
    fn test_laser_advances_along_heading() {
        let mut state = playing_state();
        state.lasers[0].in_flight = true;
        state.lasers[0].angle_deg = 0.0;
        state.lasers[0].body.pos = Vec2::new(0.0, 0.0);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.lasers[0].body.pos, Vec2::new(LASER_SPEED, 0.0));
        assert!(state.lasers[0].in_flight);
    }

    #[test]
    fn test_bonus_brick_shot_scores_fifty() {
        let mut state = playing_state();
        let bonus = state
            .bricks
            .iter()
            .position(|b| b.tone == Tone::Bonus)
            .unwrap();
        state.bricks[bonus].falling = true;
        state.bricks[bonus].body.pos = Vec2::new(90.0, 100.0);
        state.lasers[0].in_flight = true;
        state.lasers[0].angle_deg = 90.0;
        // One tick moves the laser up 5 and the brick down 1 into overlap
        state.lasers[0].body.pos = Vec2::new(90.0, 85.0);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.score, 50);
        assert!(!state.lasers[0].in_flight);
        assert!(!state.bricks[bonus].falling);
        assert_eq!(state.bricks[bonus].body.pos.y, BRICK_SPAWN_Y);
    }

    #[test]
    fn test_colored_brick_shot_penalty_is_guarded() {
        let mut state = playing_state();
        state.bricks[0].falling = true; // red
        state.bricks[0].body.pos = Vec2::new(0.0, 100.0);
        state.lasers[0].in_flight = true;
        state.lasers[0].angle_deg = 90.0;
        state.lasers[0].body.pos = Vec2::new(0.0, 85.0);
        tick(&mut state, &idle_frame(), 0.0);
        // Score was zero; the decrement is skipped
        assert_eq!(state.score, 0);
        assert!(!state.bricks[0].falling);
    }

    #[test]
    fn test_correct_catch_recycles_brick() {
        let mut state = playing_state();
        state.score = 0;
        // Red brick into bucket two's window
        let x = state.buckets[1].body.pos.x;
        drop_brick(&mut state, 0, x);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.score, 10);
        assert!(!state.bricks[0].falling);
        assert_eq!(state.bricks[0].body.pos.y, BRICK_SPAWN_Y);
    }

    #[test]
    fn test_wrong_bucket_penalizes_but_keeps_falling() {
        let mut state = playing_state();
        state.score = 20;
        // Red brick into bucket one's window
        let x = state.buckets[0].body.pos.x;
        drop_brick(&mut state, 0, x);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.score, 10);
        let brick = &state.bricks[0];
        assert!(brick.falling);
        assert_eq!(brick.body.pos.y, CATCH_ROW_Y);
    }

    #[test]
    fn test_overlapping_buckets_disable_catch_scoring() {
        let mut state = playing_state();
        state.score = 20;
        state.buckets[0].body.pos.x = 170.0;
        state.buckets[1].body.pos.x = 200.0;
        let x = state.buckets[1].body.pos.x;
        drop_brick(&mut state, 0, x); // red, correct bucket
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.score, 20);
        assert!(state.bricks[0].falling);
    }

    #[test]
    fn test_hazard_catch_ends_game() {
        let mut state = playing_state();
        let hazard = state
            .bricks
            .iter()
            .position(|b| b.tone == Tone::Hazard)
            .unwrap();
        let x = state.buckets[0].body.pos.x;
        drop_brick(&mut state, hazard, x);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));

        // Terminal: a start press does not leave GameOver, and nothing moves
        let snapshot: Vec<f32> = state.bricks.iter().map(|b| b.body.pos.y).collect();
        let mut input = idle_frame();
        input.start = true;
        tick(&mut state, &input, 10.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let after: Vec<f32> = state.bricks.iter().map(|b| b.body.pos.y).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_fast_bricks_can_skip_the_catch_row() {
        let mut state = playing_state();
        state.bricks_speed = 4;
        state.score = 20;
        let hazard = state
            .bricks
            .iter()
            .position(|b| b.tone == Tone::Hazard)
            .unwrap();
        let x = state.buckets[0].body.pos.x;
        state.bricks[hazard].falling = true;
        // -258 - 4 = -262: steps over -260 entirely
        state.bricks[hazard].body.pos = Vec2::new(x, -258.0);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks[hazard].body.pos.y, -262.0);
    }

    #[test]
    fn test_brick_recycles_at_floor() {
        let mut state = playing_state();
        state.bricks[0].falling = true;
        state.bricks[0].body.pos = Vec2::new(0.0, -269.0);
        tick(&mut state, &idle_frame(), 0.0);
        assert!(!state.bricks[0].falling);
        assert_eq!(state.bricks[0].body.pos.y, BRICK_RECYCLE_HIGH_Y);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_spawn_cadence_releases_bricks() {
        let mut state = playing_state();
        for _ in 0..300 {
            tick(&mut state, &idle_frame(), 0.0);
        }
        assert!(state.bricks.iter().any(|b| b.falling || b.body.pos.y < BRICK_SPAWN_Y));
    }

    #[test]
    fn test_last_brick_never_spawns() {
        let mut state = playing_state();
        for _ in 0..5_000 {
            tick(&mut state, &idle_frame(), 0.0);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        let last = state.bricks.last().unwrap();
        assert!(!last.falling);
        assert_eq!(last.body.pos.y, BRICK_SPAWN_Y);
    }

    #[test]
    fn test_fire_input_respects_cooldown() {
        let mut state = playing_state();
        let mut input = idle_frame();
        input.fire = true;
        tick(&mut state, &input, 2.0);
        tick(&mut state, &input, 2.4);
        assert_eq!(state.lasers.iter().filter(|l| l.in_flight).count(), 1);
        tick(&mut state, &input, 3.1);
        assert_eq!(state.lasers.iter().filter(|l| l.in_flight).count(), 2);
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut state = playing_state();
        let mut up = idle_frame();
        up.speed_up = true;
        for _ in 0..8 {
            tick(&mut state, &up, 0.0);
        }
        assert_eq!(state.bricks_speed, BRICKS_SPEED_MAX);
        let mut down = idle_frame();
        down.speed_down = true;
        for _ in 0..8 {
            tick(&mut state, &down, 0.0);
        }
        assert_eq!(state.bricks_speed, BRICKS_SPEED_MIN);
    }

    #[test]
    fn test_mirror_deflects_flight() {
        let mut state = playing_state();
        // Clear all mirrors but one and fly the laser straight at it
        let mirror = state.mirrors[1].clone(); // (-150, -50) at 50 degrees
        state.lasers[0].in_flight = true;
        state.lasers[0].angle_deg = 0.0;
        // After the 5-unit advance the tip sits on the mirror center
        state.lasers[0].body.pos =
            Vec2::new(mirror.body.pos.x - 5.0 - state.lasers[0].body.half_width(), mirror.body.pos.y);
        tick(&mut state, &idle_frame(), 0.0);
        assert_eq!(state.lasers[0].angle_deg, 2.0 * mirror.angle_deg);
    }
}
