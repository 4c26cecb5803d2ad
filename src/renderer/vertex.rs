//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color, in play-field pixels
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

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Raw bytes for uploading a vertex list to any backend
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const WALL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.15, 0.25, 0.6, 1.0];
    pub const FIRED_BULLET: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BOUNCING_BULLET: [f32; 4] = [0.6, 0.05, 0.05, 1.0];
    pub const RIPPLE: [f32; 4] = [0.0, 0.0, 0.0, 0.8];
    pub const GAME_OVER_TINT: [f32; 4] = [1.0, 0.0, 0.0, 0.25];
}
