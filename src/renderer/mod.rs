//! Drawing interface between the simulation and the GPU backend
//!
//! The simulation never touches a graphics API: it builds drawables once
//! through `RenderBackend::create_drawable` and then issues
//! `draw(handle, transform)` calls per frame. The real backend (window,
//! shaders, buffer upload, projection) lives outside this crate;
//! `RecordingBackend` stands in for it in tests and headless runs.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::Scene;
pub use vertex::Vertex;

use glam::Vec2;

/// Primitive mode of a drawable. The backend accepts only triangles; quads
/// are decomposed before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

/// World-space pose a drawable is drawn at; the backend composes the rest
/// of the model/view/projection stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
    pub rotation_deg: f32,
}

impl Transform {
    pub fn at(translation: Vec2) -> Self {
        Self {
            translation,
            rotation_deg: 0.0,
        }
    }

    pub fn rotated(translation: Vec2, rotation_deg: f32) -> Self {
        Self {
            translation,
            rotation_deg,
        }
    }
}

/// Opaque handle to a backend-owned drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u32);

/// The rendering collaborator the simulation draws through
pub trait RenderBackend {
    fn create_drawable(&mut self, primitive: Primitive, vertices: &[Vertex]) -> DrawableId;
    fn draw(&mut self, drawable: DrawableId, transform: Transform);
}

/// Backend stand-in that records every call; used by tests and the
/// headless demo.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub created: Vec<(Primitive, Vec<Vertex>)>,
    pub calls: Vec<(DrawableId, Transform)>,
}

impl RecordingBackend {
    pub fn draw_count(&self) -> usize {
        self.calls.len()
    }

    pub fn clear_frame(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn create_drawable(&mut self, primitive: Primitive, vertices: &[Vertex]) -> DrawableId {
        let id = DrawableId(self.created.len() as u32);
        self.created.push((primitive, vertices.to_vec()));
        id
    }

    fn draw(&mut self, drawable: DrawableId, transform: Transform) {
        self.calls.push((drawable, transform));
    }
}
