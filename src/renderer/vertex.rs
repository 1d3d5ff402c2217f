//! Vertex type for drawable payloads

use bytemuck::{Pod, Zeroable};

/// 2D vertex (z fixed at 0) with per-vertex color, laid out for direct
/// upload by the backend
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 3]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const RED: [f32; 3] = [255.0 / 255.0, 51.0 / 255.0, 51.0 / 255.0];
    pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
    pub const GOLD: [f32; 3] = [218.0 / 255.0, 165.0 / 255.0, 32.0 / 255.0];
    pub const BLACK: [f32; 3] = [30.0 / 255.0, 30.0 / 255.0, 21.0 / 255.0];
    pub const LIGHT_GREEN: [f32; 3] = [57.0 / 255.0, 230.0 / 255.0, 0.0];
    pub const CRATE_BROWN: [f32; 3] = [102.0 / 255.0, 68.0 / 255.0, 0.0];
    pub const SKY_BLUE: [f32; 3] = [123.0 / 255.0, 201.0 / 255.0, 227.0 / 255.0];
}
