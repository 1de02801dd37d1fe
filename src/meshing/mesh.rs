//! Indexed triangle mesh produced for one chunk.

use cgmath::Point3;

use super::vertex::MeshVertex;

/// Vertex and triangle buffers of a chunk's surface.
///
/// Rebuilt from scratch on every triangulation pass. `triangles` holds three
/// vertex indices per triangle, counter-clockwise when seen from the empty
/// side of the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    vertices: Vec<MeshVertex>,
    triangles: Vec<u32>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, pos: Point3<f32>) -> u32 {
        debug_assert!(self.vertices.len() < u32::MAX as usize);
        self.vertices.push(MeshVertex::new(pos));
        (self.vertices.len() - 1) as u32
    }

    /// Appends a triangle made of three previously pushed vertices.
    pub fn push_triangle(&mut self, indices: [u32; 3]) {
        debug_assert!(indices.iter().all(|&i| (i as usize) < self.vertices.len()));
        self.triangles.extend_from_slice(&indices);
    }

    /// The vertex buffer.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// The index buffer, three entries per triangle.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.triangle_count()`.
    pub fn triangle(&self, index: usize) -> [Point3<f32>; 3] {
        let t = &self.triangles[index * 3..index * 3 + 3];
        [
            self.vertices[t[0] as usize].position(),
            self.vertices[t[1] as usize].position(),
            self.vertices[t[2] as usize].position(),
        ]
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
