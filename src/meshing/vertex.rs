//! Vertex format handed to the renderer.

use cgmath::Point3;

/// A surface vertex in chunk-local space.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
///
/// `#[repr(C)]` and `Pod` so a renderer can upload the vertex buffer as raw
/// bytes without conversion.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    position: [f32; 3],
}

impl MeshVertex {
    /// Creates a vertex at `pos`.
    pub fn new(pos: Point3<f32>) -> Self {
        MeshVertex {
            position: [pos.x, pos.y, pos.z],
        }
    }

    /// Position in chunk-local space.
    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }
}
