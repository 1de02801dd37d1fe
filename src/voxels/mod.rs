//! # Voxel Storage
//!
//! The two-level voxel store: a [`volume::VoxelVolume`] of chunks, each
//! [`chunk::VoxelChunk`] a dense cube of [`cell::VoxelCell`]s.
//!
//! ## Architecture
//!
//! * **Cell**: one voxel's fixed anchors and its boolean state
//! * **Chunk**: owns its cells and the mesh extracted from them
//! * **Volume**: owns the chunks and routes edits to them
//! * **Coords**: world ↔ (chunk, voxel) arithmetic
//! * **Grid**: the Y/Z/X flattening shared by both levels
//!
//! ## Data Flow
//!
//! 1. The volume receives an edit point in its local space
//! 2. The point is resolved to a chunk and a local voxel
//! 3. The chunk updates the voxel and rebuilds its whole mesh
//! 4. The rebuilt mesh is available to the renderer

pub mod cell;
pub mod chunk;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;
pub mod volume;
