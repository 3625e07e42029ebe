//! Tessellation of draw-list quads into triangles

use super::vertex::{Vertex, color_for};
use crate::sim::{DrawList, Quad};

/// Two triangles covering a quad (corners taken in order around the edge)
pub fn quad(quad: &Quad) -> [Vertex; 6] {
    let color = color_for(quad.kind);
    let [a, b, c, d] = quad.corners;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Flatten a frame's draw list, keeping its back-to-front order
pub fn draw_list(list: &DrawList, out: &mut Vec<Vertex>) {
    out.clear();
    out.reserve(list.quads.len() * 6);
    for q in &list.quads {
        out.extend_from_slice(&quad(q));
    }
}
