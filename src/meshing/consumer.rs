use cgmath::Point3;

use super::mesh::ChunkMesh;

/// Receives chunk placements and rebuilt meshes from a volume.
///
/// This is the seam to whatever displays the surface. Implementations only
/// observe; nothing they do feeds back into triangulation.
pub trait MeshConsumer {
    /// A chunk exists at `offset` (its min corner, in volume-local space).
    fn chunk_placed(&mut self, chunk_index: usize, offset: Point3<f32>);

    /// The mesh of chunk `chunk_index` was rebuilt.
    fn mesh_rebuilt(&mut self, chunk_index: usize, mesh: &ChunkMesh);
}
