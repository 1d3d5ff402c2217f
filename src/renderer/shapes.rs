//! Shape generation for drawables

use super::vertex::Vertex;

/// Build a centered `width` x `height` quad as two triangles with one color
/// per corner (A bottom-left, B top-left, C top-right, D bottom-right).
///
/// The backend only accepts triangles, so the quad decomposes as
/// A,B,C / C,D,A.
pub fn quad(width: f32, height: f32, corners: [[f32; 3]; 4]) -> [Vertex; 6] {
    let w = width / 2.0;
    let h = height / 2.0;
    let [a, b, c, d] = corners;
    [
        Vertex::new(-w, -h, a),
        Vertex::new(-w, h, b),
        Vertex::new(w, h, c),
        Vertex::new(w, h, c),
        Vertex::new(w, -h, d),
        Vertex::new(-w, -h, a),
    ]
}

/// Single-color quad
pub fn solid_quad(width: f32, height: f32, color: [f32; 3]) -> [Vertex; 6] {
    quad(width, height, [color; 4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_quad_spans_extents() {
        let verts = quad(40.0, 10.0, [colors::RED; 4]);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.position[0].abs() == 20.0));
        assert!(verts.iter().all(|v| v.position[1].abs() == 5.0));
        assert!(verts.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn test_quad_corner_colors() {
        let corners = [colors::RED, colors::BLUE, colors::GOLD, colors::BLACK];
        let verts = quad(2.0, 2.0, corners);
        assert_eq!(verts[0].color, colors::RED);
        assert_eq!(verts[1].color, colors::BLUE);
        assert_eq!(verts[2].color, colors::GOLD);
        assert_eq!(verts[4].color, colors::BLACK);
        // Shared vertices repeat their corner color
        assert_eq!(verts[3], verts[2]);
        assert_eq!(verts[5], verts[0]);
    }
}
