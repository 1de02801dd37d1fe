//! # Chunk Module
//!
//! A [`VoxelChunk`] is a cube of `resolution³` voxels and the unit of mesh
//! regeneration. It owns its voxels and the mesh derived from them; every
//! successful edit rebuilds the whole mesh before returning.
//!
//! ## Storage
//!
//! Voxels are kept in one flat `Vec<VoxelCell>` in Y/Z/X order (see
//! [`grid::flatten`]). Each cell carries its own geometric anchors, which the
//! triangulation reads directly instead of recomputing positions.
//!
//! ### Performance Characteristics
//! - **State lookup**: O(1)
//! - **Edit**: O(resolution³), dominated by re-triangulation

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::{
    cell::VoxelCell,
    config::check_voxel_resolution,
    error::{VoxelError, VoxelResult},
    grid,
};
use crate::meshing::{self, ChunkMesh};

pub mod chunk_iteration;

/// A cube of voxels together with the surface mesh extracted from them.
#[derive(Clone, Debug)]
pub struct VoxelChunk {
    /// Voxels per axis. Fixed for the chunk's lifetime.
    resolution: usize,
    /// Edge length of one voxel (`chunk_size / resolution`).
    voxel_size: f32,
    /// `resolution³` voxels in Y/Z/X order.
    cells: Vec<VoxelCell>,
    /// Surface of the current voxel states.
    mesh: ChunkMesh,
}

impl VoxelChunk {
    /// Creates an all-empty chunk of `resolution` voxels per axis spanning
    /// `chunk_size` units, and runs the initial triangulation.
    ///
    /// # Errors
    /// [`VoxelError::InvalidConfiguration`] if `resolution < 2`, if the
    /// chunk's edges outgrow `u32` mesh indices, or if `chunk_size` is not a
    /// positive finite number.
    pub fn new(resolution: usize, chunk_size: f32) -> VoxelResult<Self> {
        check_voxel_resolution(resolution)?;
        if !chunk_size.is_finite() || chunk_size <= 0.0 {
            return Err(VoxelError::InvalidConfiguration(format!(
                "chunk size must be positive and finite, got {chunk_size}"
            )));
        }

        let voxel_size = chunk_size / resolution as f32;
        let cells = grid::coords(resolution)
            .map(|c| VoxelCell::new(c.x, c.y, c.z, voxel_size))
            .collect();

        let mut chunk = VoxelChunk {
            resolution,
            voxel_size,
            cells,
            mesh: ChunkMesh::new(),
        };
        chunk.triangulate();
        Ok(chunk)
    }

    /// Voxels per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Edge length of one voxel.
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// All voxels in Y/Z/X order.
    pub fn cells(&self) -> &[VoxelCell] {
        &self.cells
    }

    /// The mesh built by the last triangulation.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    fn checked_index(&self, x: usize, y: usize, z: usize) -> VoxelResult<usize> {
        let coord = Point3::new(x, y, z);
        if !grid::contains(coord, self.resolution) {
            return Err(VoxelError::IndexOutOfRange {
                x,
                y,
                z,
                resolution: self.resolution,
            });
        }
        Ok(grid::flatten(coord, self.resolution))
    }

    /// The voxel at local coordinate `(x, y, z)`.
    ///
    /// # Errors
    /// [`VoxelError::IndexOutOfRange`] if any coordinate is `>= resolution`.
    pub fn cell(&self, x: usize, y: usize, z: usize) -> VoxelResult<&VoxelCell> {
        let index = self.checked_index(x, y, z)?;
        Ok(&self.cells[index])
    }

    /// Whether the voxel at local coordinate `(x, y, z)` is solid.
    ///
    /// # Errors
    /// [`VoxelError::IndexOutOfRange`] if any coordinate is `>= resolution`.
    pub fn state_at(&self, x: usize, y: usize, z: usize) -> VoxelResult<bool> {
        Ok(self.cell(x, y, z)?.state())
    }

    /// State of the voxel at flat index `index`, or `None` past the end.
    pub fn state_at_index(&self, index: usize) -> Option<bool> {
        self.cells.get(index).map(VoxelCell::state)
    }

    /// Sets the voxel at `(x, y, z)` and rebuilds the mesh.
    ///
    /// The mesh is rebuilt even when `state` equals the current state; the
    /// result is then identical to the previous mesh.
    ///
    /// # Errors
    /// [`VoxelError::IndexOutOfRange`] if any coordinate is `>= resolution`.
    /// Nothing is modified in that case.
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, state: bool) -> VoxelResult<()> {
        let index = self.checked_index(x, y, z)?;
        self.cells[index].set_state(state);
        self.triangulate();
        Ok(())
    }

    /// Rebuilds the mesh from the current voxel states and returns it.
    pub fn triangulate(&mut self) -> &ChunkMesh {
        self.mesh = meshing::triangulate(&self.cells, self.resolution);
        &self.mesh
    }

    /// One bit per voxel in flat order, set where the voxel is solid.
    pub fn solid_mask(&self) -> BitVec {
        self.cells.iter().map(VoxelCell::state).collect()
    }

    /// Number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.state()).count()
    }
}
