//! Colored line and triangle geometry produced each tick.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

/// Vertex data for scene geometry (position + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Everything drawn in one frame: a line list and a triangle list
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub lines: Vec<Vertex>,
    pub triangles: Vec<Vertex>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    pub fn segment(&mut self, a: Vertex, b: Vertex) {
        self.lines.push(a);
        self.lines.push(b);
    }

    /// Connected polyline, expanded into line-list pairs
    pub fn line_strip<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut previous: Option<Vertex> = None;
        for vertex in vertices {
            if let Some(prev) = previous {
                self.segment(prev, vertex);
            }
            previous = Some(vertex);
        }
    }

    /// Closed polygon outline in a single color
    pub fn outline(&mut self, corners: &[Vec3], color: Color) {
        let closed = corners.iter().chain(corners.first());
        self.line_strip(closed.map(|&p| Vertex::new(p, color)));
    }

    /// Filled quad (corners in winding order) as two triangles
    pub fn quad(&mut self, corners: [Vec3; 4], color: Color) {
        let [a, b, c, d] = corners.map(|p| Vertex::new(p, color));
        self.triangles.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Twelve edges of an axis-aligned cube
    pub fn wire_cube(&mut self, center: Vec3, size: f32, color: Color) {
        let h = size / 2.0;
        let corner = |x: f32, y: f32, z: f32| center + Vec3::new(x * h, y * h, z * h);
        let bottom = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, -1.0, 1.0),
            corner(-1.0, -1.0, 1.0),
        ];
        let top = bottom.map(|p| p + Vec3::Y * size);

        self.outline(&bottom, color);
        self.outline(&top, color);
        for (b, t) in bottom.iter().zip(&top) {
            self.segment(Vertex::new(*b, color), Vertex::new(*t, color));
        }
    }

    /// Thin horizontal slab filling a cube cross-section at `baseline_y`
    pub fn slab(&mut self, size: f32, baseline_y: f32, thickness: f32, color: Color) {
        let h = size / 2.0;
        let y0 = baseline_y;
        let y1 = baseline_y + thickness;
        let p = Vec3::new;

        // bottom, top
        self.quad([p(-h, y0, -h), p(h, y0, -h), p(h, y0, h), p(-h, y0, h)], color);
        self.quad([p(-h, y1, -h), p(h, y1, -h), p(h, y1, h), p(-h, y1, h)], color);
        // back, front
        self.quad([p(-h, y0, -h), p(h, y0, -h), p(h, y1, -h), p(-h, y1, -h)], color);
        self.quad([p(-h, y0, h), p(h, y0, h), p(h, y1, h), p(-h, y1, h)], color);
        // left, right
        self.quad([p(-h, y1, h), p(-h, y1, -h), p(-h, y0, -h), p(-h, y0, h)], color);
        self.quad([p(h, y0, h), p(h, y1, h), p(h, y1, -h), p(h, y0, -h)], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_strip_expands_to_pairs() {
        let mut draw = DrawList::new();
        draw.line_strip((0..4).map(|i| Vertex::new(Vec3::new(i as f32, 0.0, 0.0), WHITE)));

        // 4 points → 3 segments → 6 vertices
        assert_eq!(draw.lines.len(), 6);
        assert_eq!(draw.lines[1], draw.lines[2]);
        assert!(draw.triangles.is_empty());
    }

    #[test]
    fn test_outline_closes_polygon() {
        let mut draw = DrawList::new();
        let square = [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        draw.outline(&square, WHITE);

        assert_eq!(draw.lines.len(), 8);
        assert_eq!(draw.lines.last().unwrap().position, square[0].to_array());
    }

    #[test]
    fn test_wire_cube_has_twelve_edges() {
        let mut draw = DrawList::new();
        draw.wire_cube(Vec3::ZERO, 5.0, WHITE);
        assert_eq!(draw.lines.len(), 24);
        assert!(draw
            .lines
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() == 2.5)));
    }

    #[test]
    fn test_slab_has_six_faces() {
        let mut draw = DrawList::new();
        draw.slab(5.0, 0.0, 0.1, WHITE);
        assert_eq!(draw.triangles.len(), 6 * 6);
    }
}
