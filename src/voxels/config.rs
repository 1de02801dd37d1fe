//! # Volume Configuration
//!
//! The three numbers a volume is built from. Everything else (chunk size,
//! voxel size, half size) is derived from them once, at construction.
//!
//! ```json
//! { "size": 2.0, "chunk_resolution": 2, "voxel_resolution": 8 }
//! ```
//!
//! Missing fields fall back to the defaults above.

use std::{fs, path::Path};

use serde::Deserialize;

use super::{
    error::{ConfigError, VoxelError, VoxelResult},
    grid,
};

/// Smallest voxel resolution that still contains one full 2×2×2 cube.
pub const MIN_VOXEL_RESOLUTION: usize = 2;

/// Checks a per-chunk voxel resolution.
///
/// A chunk needs at least [`MIN_VOXEL_RESOLUTION`] voxels per axis, and every
/// (voxel, axis) edge of it must be addressable by a `u32` mesh index.
pub fn check_voxel_resolution(resolution: usize) -> VoxelResult<()> {
    if resolution < MIN_VOXEL_RESOLUTION {
        return Err(VoxelError::InvalidConfiguration(format!(
            "voxel resolution must be at least {MIN_VOXEL_RESOLUTION}, got {resolution}"
        )));
    }
    match grid::checked_volume(resolution).and_then(|cells| cells.checked_mul(3)) {
        Some(edges) if edges < u32::MAX as usize => Ok(()),
        _ => Err(VoxelError::InvalidConfiguration(format!(
            "voxel resolution {resolution} needs more than u32 mesh indices"
        ))),
    }
}

/// Size and resolution parameters of a [`VoxelVolume`](super::volume::VoxelVolume).
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// World-space edge length of the whole (cubic) volume.
    pub size: f32,
    /// Chunks per axis.
    pub chunk_resolution: usize,
    /// Voxels per axis inside every chunk.
    pub voxel_resolution: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        VolumeConfig {
            size: 2.0,
            chunk_resolution: 2,
            voxel_resolution: 8,
        }
    }
}

impl VolumeConfig {
    /// Creates a config from its three parameters without validating it.
    pub fn new(size: f32, chunk_resolution: usize, voxel_resolution: usize) -> Self {
        VolumeConfig {
            size,
            chunk_resolution,
            voxel_resolution,
        }
    }

    /// Checks that the parameters describe a usable volume.
    pub fn validate(&self) -> VoxelResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(VoxelError::InvalidConfiguration(format!(
                "volume size must be positive and finite, got {}",
                self.size
            )));
        }
        if self.chunk_resolution < 1 {
            return Err(VoxelError::InvalidConfiguration(
                "chunk resolution must be at least 1".to_string(),
            ));
        }
        check_voxel_resolution(self.voxel_resolution)?;

        // A voxel count that fits a usize also keeps every per-axis index
        // below 2^22, exact in f32.
        let voxels = self
            .chunk_resolution
            .checked_mul(self.voxel_resolution)
            .and_then(grid::checked_volume);
        match voxels {
            Some(_) => Ok(()),
            None => Err(VoxelError::InvalidConfiguration(format!(
                "{}³ chunks of {}³ voxels is too many voxels",
                self.chunk_resolution, self.voxel_resolution
            ))),
        }
    }

    /// World-space edge length of one chunk.
    pub fn chunk_size(&self) -> f32 {
        self.size / self.chunk_resolution as f32
    }

    /// World-space edge length of one voxel.
    pub fn voxel_size(&self) -> f32 {
        self.chunk_size() / self.voxel_resolution as f32
    }

    /// Half the volume's edge length; the volume spans `[-half_size, half_size)`.
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: VolumeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
