//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in field coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(r, color, color)
}

/// Filled rectangle blending from `top` to `bottom` color
pub fn gradient_rect(r: &Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (r.pos.x, r.pos.y);
    let (x1, y1) = (r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Filled rectangle with rounded corners (opaque colors only; the corner
/// discs overlap the body)
pub fn rounded_rect(r: &Rect, radius: f32, color: [f32; 4], corner_segments: u32) -> Vec<Vertex> {
    let radius = radius.min(r.size.x / 2.0).min(r.size.y / 2.0).max(0.0);
    if radius == 0.0 {
        return rect(r, color);
    }

    let mut vertices = Vec::with_capacity(12 + (corner_segments * 12) as usize);

    // Horizontal and vertical bars
    vertices.extend(rect(
        &Rect::new(r.pos.x, r.pos.y + radius, r.size.x, r.size.y - radius * 2.0),
        color,
    ));
    vertices.extend(rect(
        &Rect::new(r.pos.x + radius, r.pos.y, r.size.x - radius * 2.0, r.size.y),
        color,
    ));

    // Corners
    for corner in [
        Vec2::new(r.pos.x + radius, r.pos.y + radius),
        Vec2::new(r.right() - radius, r.pos.y + radius),
        Vec2::new(r.pos.x + radius, r.bottom() - radius),
        Vec2::new(r.right() - radius, r.bottom() - radius),
    ] {
        vertices.extend(circle(corner, radius, color, corner_segments));
    }

    vertices
}
