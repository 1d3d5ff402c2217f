//! Collision predicates
//!
//! All tests are simple closed-form checks: axis-aligned overlap for
//! laser/brick hits, an interval test on the brick center for bucket
//! catches, and a projection onto the mirror's rotated axis for laser
//! deflection.

use glam::Vec2;

use crate::consts::*;
use crate::heading;
use crate::sim::state::{Body, Bucket, Laser, Mirror};

/// Axis-aligned bounding-box overlap, strict on both axes
pub fn aabb_overlap(a: &Body, b: &Body) -> bool {
    let dx = (a.pos.x - b.pos.x).abs();
    let dy = (a.pos.y - b.pos.y).abs();
    dx < (a.width + b.width) * 0.5 && dy < (a.height + b.height) * 0.5
}

/// Has the laser left the flight area?
pub fn laser_out_of_bounds(pos: Vec2) -> bool {
    pos.x > LASER_X_LIMIT || pos.x < -LASER_X_LIMIT || pos.y > LASER_Y_MAX || pos.y < LASER_Y_MIN
}

/// Test the laser's leading edge against one mirror.
///
/// The tip is projected onto the mirror's local frame; a hit requires both
/// projected offsets to fall within the mirror's half-width and to agree
/// within the tolerance. On a hit the reflected flight angle is
/// `2 * mirror_angle - laser_angle`.
pub fn mirror_deflection(laser: &Laser, mirror: &Mirror) -> Option<f32> {
    let tip = laser.body.pos + laser.body.half_width() * heading(laser.angle_deg);
    let rad = mirror.angle_deg.to_radians();
    let d1 = (tip.x - mirror.body.pos.x) / rad.cos();
    let d2 = (tip.y - mirror.body.pos.y) / rad.sin();
    let half = mirror.body.half_width();
    if d1 > -half
        && d1 < half
        && d2 > -half
        && d2 < half
        && (d1 - d2).abs() <= MIRROR_TOLERANCE
    {
        Some(2.0 * mirror.angle_deg - laser.angle_deg)
    } else {
        None
    }
}

/// Is the brick center inside the bucket's horizontal catch window?
pub fn in_bucket_window(brick_x: f32, bucket: &Bucket) -> bool {
    brick_x > bucket.body.pos.x - bucket.body.half_width()
        && brick_x < bucket.body.pos.x + bucket.body.half_width()
}

/// Buckets count as overlapping when their centers are closer than one
/// bucket width; overlap disables all catch scoring.
pub fn buckets_overlap(a: &Bucket, b: &Bucket) -> bool {
    (a.body.pos.x - b.body.pos.x).abs() < a.body.width
}
