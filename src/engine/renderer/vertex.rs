// Vertex structure for 2D sprite rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// Vertex for 2D sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in pixels
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
    /// Vertex color (RGBA), multiplied with the texel
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec2, tex_coords: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            color: color.to_array(),
        }
    }

    /// Corners of an axis-aligned quad centered on `center`, in the order
    /// top-left, top-right, bottom-right, bottom-left (y down).
    ///
    /// With `flip_x` the texture is mirrored horizontally.
    pub fn quad(center: Vec2, size: Vec2, flip_x: bool, color: Vec4) -> [Vertex; 4] {
        let half = size / 2.0;
        let (u0, u1) = if flip_x { (1.0, 0.0) } else { (0.0, 1.0) };
        [
            Vertex::new(center + Vec2::new(-half.x, -half.y), Vec2::new(u0, 0.0), color),
            Vertex::new(center + Vec2::new(half.x, -half.y), Vec2::new(u1, 0.0), color),
            Vertex::new(center + Vec2::new(half.x, half.y), Vec2::new(u1, 1.0), color),
            Vertex::new(center + Vec2::new(-half.x, half.y), Vec2::new(u0, 1.0), color),
        ]
    }

    /// Index pattern for one quad whose first vertex is `base`
    pub fn quad_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
