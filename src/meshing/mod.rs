//! Surface extraction for voxel chunks.
//!
//! This module turns a chunk's boolean voxel grid into an indexed triangle
//! mesh and defines the seam through which rebuilt meshes leave the crate.
//!
//! # Architecture
//! - [`ChunkMesh`]: vertex and index buffers for one chunk
//! - [`MeshVertex`]: the `Pod` vertex format handed to renderers
//! - [`marching_cubes`]: case classification and triangle emission
//! - [`MeshConsumer`]: receives chunk placements and rebuilt meshes

mod consumer;
pub mod marching_cubes;
mod mesh;
mod vertex;

pub use consumer::MeshConsumer;
pub use marching_cubes::triangulate;
pub use mesh::ChunkMesh;
pub use vertex::MeshVertex;
