#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Volume
//!
//! An editable voxel volume that keeps a triangle surface in sync with its
//! contents.
//!
//! The volume is a cube split into `chunk_resolution³` chunks, each holding
//! `voxel_resolution³` boolean voxels. Points in the volume's local space are
//! mapped to a chunk and a voxel; editing a voxel re-triangulates its chunk
//! with marching cubes, and the resulting buffers are handed to whatever
//! renders them.
//!
//! ## Key Modules
//!
//! * `voxels` - Cells, chunks, the volume and the coordinate arithmetic between them
//! * `meshing` - Marching-cubes surface extraction and mesh buffers
//! * `core` - Shared-ownership primitives
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_volume::voxels::{config::VolumeConfig, volume::VoxelVolume};
//!
//! let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
//! let address = volume.edit_at(Point3::new(0.3, -0.2, 0.6)).unwrap();
//! let chunk = volume.chunk(address.chunk).unwrap();
//! assert!(chunk.get().mesh().triangle_count() > 0);
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunks are allocated eagerly and never evicted
//! * Every edit rebuilds the whole mesh of one chunk, O(voxel_resolution³)
//! * Surface vertices are welded, so each edge midpoint is emitted once

pub mod core;
pub mod meshing;
pub mod voxels;

/// Initializes `env_logger` from `RUST_LOG`, writing to stdout.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
}
