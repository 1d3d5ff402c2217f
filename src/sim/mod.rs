//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic: fixed per-frame steps, seeded RNG, creation-order
//! iteration for every tie-break, and no rendering or platform
//! dependencies beyond the drawing interface it is handed.

pub mod camera;
pub mod collision;
pub mod control;
pub mod glyphs;
pub mod input;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use glyphs::{DIGIT_STROKES, GAME_OVER_MESSAGE, START_MESSAGE, Stroke, TEXT_STROKES};
pub use input::{FrameInput, GameKey, InputState, PointerRelease};
pub use state::{
    Body, Brick, Bucket, BucketId, Cannon, GameEvent, GamePhase, GameState, Laser, Marquee,
    Mirror, RngState, Tone,
};
pub use tick::tick;
