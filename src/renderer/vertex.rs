//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::palette::Rgb;

/// Simple 2D vertex with position and color, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride between consecutive vertices
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// 8-bit color plus 8-bit alpha to normalized RGBA
pub fn rgba(color: Rgb, alpha: u8) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        alpha as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, [0.0; 4]); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 72);
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba([255, 0, 255], 0), [1.0, 0.0, 1.0, 0.0]);
        assert_eq!(rgba([0, 0, 0], 255)[3], 1.0);
    }
}
