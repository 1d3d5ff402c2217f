//! Brick Blaster - a cannon vs. falling bricks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, control, collisions, game state)
//! - `renderer`: Drawing interface consumed by the sim, implemented by the shell
//! - `settings`: Run configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World half-extents; the playfield is [-400,400] x [-300,300]
    pub const WORLD_HALF_WIDTH: f32 = 400.0;
    pub const WORLD_HALF_HEIGHT: f32 = 300.0;

    /// Fixed window size owned by the bootstrap
    pub const WINDOW_WIDTH: f32 = 600.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Camera zoom bounds and per-tick factor
    pub const ZOOM_MIN: f32 = 1.0;
    pub const ZOOM_MAX: f32 = 4.0;
    pub const ZOOM_STEP: f32 = 1.1;
    /// Arrow-key pan step (per key press, not per held frame)
    pub const PAN_STEP: f32 = 10.0;

    /// Cannon vertical travel, exclusive bounds
    pub const CANNON_Y_MIN: f32 = -250.0;
    pub const CANNON_Y_MAX: f32 = 290.0;
    /// Cannon barrel swing, inclusive saturation bounds (degrees)
    pub const CANNON_ANGLE_MAX: f32 = 60.0;
    /// Cannon/bucket movement per held frame
    pub const MOVE_STEP: f32 = 5.0;
    /// Barrel swing per held frame (degrees)
    pub const TURN_STEP: f32 = 5.0;

    /// Bucket horizontal travel, exclusive bounds
    pub const BUCKET_X_LIMIT: f32 = 370.0;
    pub const BUCKET_WIDTH: f32 = 60.0;
    pub const BUCKET_HEIGHT: f32 = 40.0;

    /// Laser flight speed per frame along the current angle
    pub const LASER_SPEED: f32 = 5.0;
    /// Seconds between shots
    pub const FIRE_COOLDOWN: f64 = 1.0;
    /// Flight bounds; leaving them retires the laser
    pub const LASER_X_LIMIT: f32 = 400.0;
    pub const LASER_Y_MIN: f32 = -250.0;
    pub const LASER_Y_MAX: f32 = 300.0;

    /// Mirror deflection proximity tolerance (world units)
    pub const MIRROR_TOLERANCE: f32 = 5.0;

    /// Brick spawn row and the rows bricks recycle to
    pub const BRICK_SPAWN_Y: f32 = 310.0;
    pub const BRICK_RECYCLE_HIGH_Y: f32 = 320.0;
    /// Bricks stop falling once the next step would cross this floor
    pub const BRICK_FLOOR_Y: f32 = -270.0;
    /// Exact row at which bucket catches are evaluated
    pub const CATCH_ROW_Y: f32 = -260.0;
    /// Fall-speed level bounds (player adjustable)
    pub const BRICKS_SPEED_MIN: u8 = 1;
    pub const BRICKS_SPEED_MAX: u8 = 5;
    /// Spawn slots drawn per frame; one less than the brick count, so the
    /// last brick in creation order never enters play
    pub const SPAWN_SLOTS: u32 = 18;

    /// Start-screen marquee laser travel
    pub const MARQUEE_SPEED: f32 = 5.0;
    pub const MARQUEE_RESET_X: f32 = -265.0;
    pub const MARQUEE_WRAP_X: f32 = 400.0;
}

/// Spawn-cadence period in frames for a given fall-speed level
#[inline]
pub fn spawn_period(bricks_speed: u8) -> u64 {
    100 - 15 * (bricks_speed as u64 - 1)
}

/// Unit vector for an angle in degrees
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
