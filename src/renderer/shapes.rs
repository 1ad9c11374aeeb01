//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Append a filled disc as a triangle list (three vertices per segment)
pub fn push_disc(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    if radius <= 0.0 || segments < 3 {
        return;
    }
    let step = TAU / segments as f32;
    for i in 0..segments {
        let a0 = i as f32 * step;
        let a1 = (i + 1) as f32 * step;
        let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radius;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(p0.x, p0.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
    }
}

/// Segment count that keeps edges short on large discs
pub fn segments_for_radius(radius: f32) -> u32 {
    (radius * 2.0).ceil().clamp(8.0, 48.0) as u32
}
