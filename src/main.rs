//! Brick Blaster entry point
//!
//! The windowed build wires `InputState`/`Scene` to a real event loop and a
//! GPU-backed `RenderBackend`. Standalone, this binary runs the simulation
//! headless against the recording backend: a scripted player starts the
//! game, sweeps the barrel while firing, and the run ends at game over or
//! after a frame budget.

use std::time::{SystemTime, UNIX_EPOCH};

use brick_blaster::Settings;
use brick_blaster::renderer::{RecordingBackend, Scene};
use brick_blaster::sim::{GameEvent, GameKey, GamePhase, GameState, InputState, tick};

/// Nominal frame rate of the demo clock
const DEMO_HZ: f64 = 60.0;

fn main() {
    env_logger::init();

    let settings = Settings::load(std::env::args().skip(1));
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("brick-blaster starting with seed {seed}");

    let mut state = GameState::new(seed);
    state.bricks_speed = settings.bricks_speed;
    let mut input = InputState::default();
    let mut backend = RecordingBackend::default();
    let scene = Scene::new(&mut backend);

    println!("Press P or click the left mouse button to start");
    input.key_down(GameKey::Start);

    let mut draws = 0usize;
    for frame in 0..settings.frames {
        let now = frame as f64 / DEMO_HZ;
        script_input(&mut input, frame);

        let frame_input = input.frame_input();
        tick(&mut state, &frame_input, now);

        backend.clear_frame();
        scene.render(&state, &mut backend);
        draws += backend.draw_count();

        let mut over = false;
        for event in state.drain_events() {
            match event {
                GameEvent::Started => log::info!("round started"),
                GameEvent::LaserFired { slot } => log::debug!("laser {slot} away"),
                GameEvent::BrickShot { tone, score } => {
                    log::info!("shot a {tone:?} brick ({score:+})")
                }
                GameEvent::BrickCaught { bucket, tone, score } => {
                    log::info!("{tone:?} brick caught in {bucket:?} ({score:+})")
                }
                GameEvent::WrongBucket { bucket, tone, score } => {
                    log::info!("{tone:?} brick in the wrong bucket {bucket:?} ({score:+})")
                }
                GameEvent::SpeedChanged { speed } => log::info!("fall speed now {speed}"),
                GameEvent::GameOver { score } => {
                    println!("GAME OVER");
                    println!("YOUR FINAL SCORE IS : {score}");
                    over = true;
                }
            }
        }
        if over {
            break;
        }
    }

    if state.phase != GamePhase::GameOver {
        log::info!(
            "frame budget reached; score {} at speed {}",
            state.score,
            state.bricks_speed
        );
    }
    log::info!("{} draw calls issued over the run", draws);

    if settings.dump_state {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("state dump failed: {err}"),
        }
    }
}

/// The scripted demo player: sweep the barrel back and forth, fire on a
/// steady rhythm, nudge the buckets around now and then.
fn script_input(input: &mut InputState, frame: u32) {
    match frame % 240 {
        30 => input.key_down(GameKey::TurnLeft),
        90 => {
            input.key_up(GameKey::TurnLeft);
            input.key_down(GameKey::TurnRight);
        }
        150 => input.key_up(GameKey::TurnRight),
        160 => {
            input.key_down(GameKey::ModifierOne);
            input.key_down(GameKey::MoveRight);
        }
        200 => {
            input.key_up(GameKey::MoveRight);
            input.key_up(GameKey::ModifierOne);
        }
        _ => {}
    }
    if frame % 75 == 0 {
        input.key_down(GameKey::Fire);
    }
}
