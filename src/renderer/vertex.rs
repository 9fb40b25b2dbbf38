//! Vertex format and palette

use bytemuck::{Pod, Zeroable};

/// 2D vertex in field coordinates with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// River palette
pub mod colors {
    pub const RIVER_TOP: [f32; 4] = [0.31, 0.765, 0.969, 1.0]; // #4FC3F7
    pub const RIVER_BOTTOM: [f32; 4] = [0.008, 0.533, 0.82, 1.0]; // #0288D1
    pub const RAFT: [f32; 4] = [0.62, 0.42, 0.22, 1.0];
    pub const RAFT_PLANK_GAP: [f32; 4] = [0.38, 0.24, 0.12, 1.0];
    pub const ROCK: [f32; 4] = [0.45, 0.45, 0.48, 1.0];
    pub const ROCK_HIGHLIGHT: [f32; 4] = [0.62, 0.62, 0.66, 1.0];
    /// Dims the river behind the game-over panel
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const PANEL: [f32; 4] = [0.133, 0.133, 0.133, 1.0]; // #222
    pub const BUTTON: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
