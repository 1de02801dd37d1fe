//! # Voxel Error Types
//!
//! All errors that can occur while building or editing a volume.

use thiserror::Error;

/// Errors raised by chunks and volumes.
///
/// Construction errors are fatal to the component being built. Edit errors
/// are recoverable: the targeted chunk keeps its previous state and mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoxelError {
    /// A size or resolution is non-positive, non-finite or too small.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Chunk-local voxel coordinates outside `[0, resolution)`.
    #[error("voxel ({x}, {y}, {z}) is outside a chunk of resolution {resolution}")]
    IndexOutOfRange {
        /// Local X coordinate.
        x: usize,
        /// Local Y coordinate.
        y: usize,
        /// Local Z coordinate.
        z: usize,
        /// Voxels per axis of the chunk.
        resolution: usize,
    },

    /// A world point (or flat index) that does not resolve inside the volume.
    #[error("point ({x}, {y}, {z}) is outside the volume")]
    OutOfBounds {
        /// World X coordinate.
        x: f32,
        /// World Y coordinate.
        y: f32,
        /// World Z coordinate.
        z: f32,
    },
}

/// Errors raised while loading a [`VolumeConfig`](super::config::VolumeConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read volume config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for a volume config.
    #[error("failed to parse volume config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an unusable volume.
    #[error(transparent)]
    Invalid(#[from] VoxelError),
}

/// Result type for chunk and volume operations.
pub type VoxelResult<T> = Result<T, VoxelError>;
