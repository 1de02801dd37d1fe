//! # Volume Module
//!
//! A [`VoxelVolume`] is a cube of `chunk_resolution³` chunks, all allocated
//! up front. It translates volume-local points into (chunk, voxel) pairs and
//! forwards edits to the chunk that owns the voxel.
//!
//! ## Data Flow
//!
//! 1. A caller supplies a point already expressed in the volume's local space
//! 2. The [`CoordinateMapper`] resolves it to a chunk and local voxel
//! 3. That chunk sets the voxel and re-triangulates under its write lock
//! 4. The rebuilt mesh is handed to a [`MeshConsumer`] if one was given
//!
//! ## Thread Safety
//!
//! Each chunk sits behind its own [`MtResource`], so edits to different
//! chunks may run concurrently and edits to the same chunk are serialized.

use cgmath::Point3;
use log::{debug, info, warn};

use super::{
    chunk::VoxelChunk,
    config::VolumeConfig,
    coords::{CoordinateMapper, VoxelAddress},
    error::VoxelResult,
    grid,
};
use crate::{core::MtResource, meshing::MeshConsumer};

/// The full grid of chunks.
pub struct VoxelVolume {
    config: VolumeConfig,
    mapper: CoordinateMapper,
    /// `chunk_resolution³` chunks in Y/Z/X order.
    chunks: Vec<MtResource<VoxelChunk>>,
}

impl VoxelVolume {
    /// Builds a volume and every chunk in it. All voxels start empty.
    ///
    /// # Errors
    /// [`VoxelError::InvalidConfiguration`](super::error::VoxelError::InvalidConfiguration)
    /// if `config` does not validate. No partially built volume is returned.
    pub fn new(config: VolumeConfig) -> VoxelResult<Self> {
        let mapper = CoordinateMapper::new(&config)?;

        let chunks = (0..grid::volume(config.chunk_resolution))
            .map(|_| {
                VoxelChunk::new(config.voxel_resolution, mapper.chunk_size()).map(MtResource::new)
            })
            .collect::<VoxelResult<Vec<_>>>()?;

        info!(
            "Built voxel volume: size {}, {}³ chunks of {}³ voxels",
            config.size, config.chunk_resolution, config.voxel_resolution
        );

        Ok(VoxelVolume {
            config,
            mapper,
            chunks,
        })
    }

    /// The parameters the volume was built from.
    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    /// Coordinate arithmetic for this volume.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Handle to the chunk at chunk-grid coordinate `coord`.
    pub fn chunk(&self, coord: Point3<usize>) -> Option<MtResource<VoxelChunk>> {
        if !grid::contains(coord, self.mapper.chunk_resolution()) {
            return None;
        }
        self.chunk_at_index(self.mapper.chunk_index(coord))
    }

    /// Handle to the chunk at flat index `index`.
    pub fn chunk_at_index(&self, index: usize) -> Option<MtResource<VoxelChunk>> {
        self.chunks.get(index).cloned()
    }

    /// Min corner of chunk `index` in volume-local space.
    pub fn chunk_offset(&self, index: usize) -> Option<Point3<f32>> {
        (index < self.chunks.len()).then(|| {
            self.mapper
                .chunk_offset(grid::unflatten(index, self.mapper.chunk_resolution()))
        })
    }

    /// Volume-local bounds `(min, max)`, the box an input layer picks against.
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        self.mapper.bounds()
    }

    /// Makes the voxel containing `point` solid.
    ///
    /// # Errors
    /// [`VoxelError::OutOfBounds`](super::error::VoxelError::OutOfBounds) if
    /// `point` is outside the volume. No chunk is touched in that case.
    pub fn edit_at(&self, point: Point3<f32>) -> VoxelResult<VoxelAddress> {
        self.set_voxel_at(point, true)
    }

    /// Sets the voxel containing `point` to `state` and re-triangulates its
    /// chunk.
    ///
    /// # Errors
    /// [`VoxelError::OutOfBounds`](super::error::VoxelError::OutOfBounds) if
    /// `point` is outside the volume. No chunk is touched in that case.
    pub fn set_voxel_at(&self, point: Point3<f32>, state: bool) -> VoxelResult<VoxelAddress> {
        self.apply_edit(point, state, |_, _| {})
    }

    /// Like [`set_voxel_at`](Self::set_voxel_at), then hands the rebuilt mesh
    /// of the edited chunk to `consumer` before the chunk is unlocked.
    pub fn edit_at_with<C: MeshConsumer>(
        &self,
        point: Point3<f32>,
        state: bool,
        consumer: &mut C,
    ) -> VoxelResult<VoxelAddress> {
        self.apply_edit(point, state, |chunk_index, chunk| {
            consumer.mesh_rebuilt(chunk_index, chunk.mesh())
        })
    }

    /// Resolves `point`, edits its chunk and calls `rebuilt` under the same
    /// write guard.
    fn apply_edit<F>(
        &self,
        point: Point3<f32>,
        state: bool,
        rebuilt: F,
    ) -> VoxelResult<VoxelAddress>
    where
        F: FnOnce(usize, &VoxelChunk),
    {
        let address = self.mapper.resolve(point).map_err(|err| {
            warn!("Rejected voxel edit: {err}");
            err
        })?;

        debug!(
            "Voxel ({}, {}, {}) in chunk ({}, {}, {})",
            address.absolute.x,
            address.absolute.y,
            address.absolute.z,
            address.chunk.x,
            address.chunk.y,
            address.chunk.z
        );

        let chunk_index = self.mapper.chunk_index(address.chunk);
        let local = address.local;
        let mut chunk = self.chunks[chunk_index].get_mut();
        chunk.set_voxel(local.x, local.y, local.z, state)?;
        rebuilt(chunk_index, &chunk);
        Ok(address)
    }

    /// State of voxel `voxel_index` in chunk `chunk_index`, both flat indices.
    pub fn voxel_state(&self, chunk_index: usize, voxel_index: usize) -> Option<bool> {
        self.chunks.get(chunk_index)?.get().state_at_index(voxel_index)
    }

    /// State of the voxel containing `point`.
    ///
    /// # Errors
    /// [`VoxelError::OutOfBounds`](super::error::VoxelError::OutOfBounds) if
    /// `point` is outside the volume.
    pub fn state_at(&self, point: Point3<f32>) -> VoxelResult<bool> {
        let address = self.mapper.resolve(point)?;
        let chunk = self.chunks[self.mapper.chunk_index(address.chunk)].get();
        chunk.state_at(address.local.x, address.local.y, address.local.z)
    }

    /// Announces every chunk's placement and current mesh to `consumer`, in
    /// flat chunk order.
    pub fn publish<C: MeshConsumer>(&self, consumer: &mut C) {
        for (index, chunk) in self.chunks.iter().enumerate() {
            let offset = self
                .mapper
                .chunk_offset(grid::unflatten(index, self.mapper.chunk_resolution()));
            consumer.chunk_placed(index, offset);
            consumer.mesh_rebuilt(index, chunk.get().mesh());
        }
    }

    /// Number of solid voxels across all chunks.
    pub fn solid_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.get().solid_count()).sum()
    }

    /// Number of triangles across all chunk meshes.
    pub fn triangle_count(&self) -> usize {
        self.chunks
            .iter()
            .map(|chunk| chunk.get().mesh().triangle_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::sync::Arc;

    use super::*;
    use crate::meshing::ChunkMesh;
    use crate::voxels::error::VoxelError;

    #[derive(Default)]
    struct RecordingConsumer {
        placed: Vec<(usize, Point3<f32>)>,
        rebuilt: Vec<(usize, usize)>,
    }

    impl MeshConsumer for RecordingConsumer {
        fn chunk_placed(&mut self, chunk_index: usize, offset: Point3<f32>) {
            self.placed.push((chunk_index, offset));
        }

        fn mesh_rebuilt(&mut self, chunk_index: usize, mesh: &ChunkMesh) {
            self.rebuilt.push((chunk_index, mesh.triangle_count()));
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            VoxelVolume::new(VolumeConfig::new(2.0, 2, 1)),
            Err(VoxelError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            VoxelVolume::new(VolumeConfig::new(0.0, 2, 8)),
            Err(VoxelError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            VoxelVolume::new(VolumeConfig::new(2.0, 1 << 22, 2)),
            Err(VoxelError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_edit_just_below_max_face_is_accepted() {
        let volume = VoxelVolume::new(VolumeConfig::new(3.0, 3, 5)).unwrap();
        let address = volume.edit_at(Point3::new(1.4999999, 0.0, 0.0)).unwrap();
        assert_eq!(address.absolute.x, 14);
        assert_eq!(volume.solid_count(), 1);
    }

    #[test]
    fn test_edit_touches_only_the_target_chunk() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        let address = volume.edit_at(Point3::new(0.3, -0.7, 0.1)).unwrap();
        let target = volume.mapper().chunk_index(address.chunk);

        for index in 0..volume.chunk_count() {
            let chunk = volume.chunk_at_index(index).unwrap();
            let expected = usize::from(index == target);
            assert_eq!(chunk.get().solid_count(), expected, "chunk {index}");
            assert_eq!(chunk.get().mesh().is_empty(), index != target);
        }
    }

    #[test]
    fn test_set_voxel_at_can_clear() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        let point = Point3::new(-0.4, 0.4, 0.9);
        volume.set_voxel_at(point, true).unwrap();
        assert!(volume.state_at(point).unwrap());

        volume.set_voxel_at(point, false).unwrap();
        assert!(!volume.state_at(point).unwrap());
        assert_eq!(volume.triangle_count(), 0);
    }

    #[test]
    fn test_rejected_edit_changes_nothing() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        volume.edit_at(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let triangles = volume.triangle_count();

        let err = volume.edit_at(Point3::new(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            VoxelError::OutOfBounds {
                x: 1.0,
                y: 0.0,
                z: 0.0
            }
        );
        assert_eq!(volume.solid_count(), 1);
        assert_eq!(volume.triangle_count(), triangles);
    }

    #[test]
    fn test_publish_announces_every_chunk_in_order() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        let mut consumer = RecordingConsumer::default();
        volume.publish(&mut consumer);

        assert_eq!(consumer.placed.len(), 8);
        assert_eq!(consumer.placed[0], (0, Point3::new(-1.0, -1.0, -1.0)));
        assert_eq!(consumer.placed[1], (1, Point3::new(0.0, -1.0, -1.0)));
        assert_eq!(consumer.placed[2], (2, Point3::new(-1.0, -1.0, 0.0)));
        assert_eq!(consumer.placed[4], (4, Point3::new(-1.0, 0.0, -1.0)));
        assert!(consumer.rebuilt.iter().all(|&(_, triangles)| triangles == 0));
        assert_eq!(volume.chunk_offset(7), Some(Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(volume.chunk_offset(8), None);
    }

    #[test]
    fn test_edit_at_with_forwards_rebuilt_mesh() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        let mut consumer = RecordingConsumer::default();
        let address = volume
            .edit_at_with(Point3::new(0.5, 0.5, 0.5), true, &mut consumer)
            .unwrap();

        assert_eq!(address.chunk, Point3::new(1, 1, 1));
        assert_eq!(consumer.rebuilt.len(), 1);
        let (index, triangles) = consumer.rebuilt[0];
        assert_eq!(index, 7);
        assert!(triangles > 0);

        let mut untouched = RecordingConsumer::default();
        assert!(volume
            .edit_at_with(Point3::new(0.0, 2.0, 0.0), true, &mut untouched)
            .is_err());
        assert!(untouched.rebuilt.is_empty());
    }

    /// Checks, while the chunk is still locked, that the mesh it is handed
    /// is the one its own edit produced.
    struct ExpectSurface(bool);

    impl MeshConsumer for ExpectSurface {
        fn chunk_placed(&mut self, _chunk_index: usize, _offset: Point3<f32>) {}

        fn mesh_rebuilt(&mut self, _chunk_index: usize, mesh: &ChunkMesh) {
            assert_eq!(!mesh.is_empty(), self.0);
        }
    }

    #[test]
    fn test_consumer_sees_its_own_edit_under_contention() {
        let volume = Arc::new(VoxelVolume::new(VolumeConfig::default()).unwrap());
        let point = Point3::new(0.3, 0.3, 0.3);
        let handles: Vec<_> = [true, false]
            .into_iter()
            .map(|state| {
                let volume = Arc::clone(&volume);
                thread::spawn(move || {
                    let mut consumer = ExpectSurface(state);
                    for _ in 0..200 {
                        volume.edit_at_with(point, state, &mut consumer).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_voxel_state_reads_flat_indices() {
        let volume = VoxelVolume::new(VolumeConfig::default()).unwrap();
        let address = volume.edit_at(Point3::new(-0.9, -0.9, -0.9)).unwrap();
        let voxel_index = volume.mapper().voxel_index(address.local);

        assert_eq!(volume.voxel_state(0, voxel_index), Some(true));
        assert_eq!(volume.voxel_state(1, voxel_index), Some(false));
        assert_eq!(volume.voxel_state(8, 0), None);
        assert_eq!(volume.voxel_state(0, 512), None);
    }

    #[test]
    fn test_concurrent_edits_on_separate_chunks() {
        let volume = Arc::new(VoxelVolume::new(VolumeConfig::default()).unwrap());
        let handles: Vec<_> = [-0.5f32, 0.5]
            .into_iter()
            .map(|x| {
                let volume = Arc::clone(&volume);
                thread::spawn(move || {
                    for step in 0..8 {
                        let z = -0.9375 + step as f32 * 0.25;
                        volume.edit_at(Point3::new(x, 0.2, z)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(volume.solid_count(), 16);
    }
}
