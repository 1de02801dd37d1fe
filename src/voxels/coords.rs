//! # Coordinate Mapping
//!
//! Three coordinate spaces meet in a volume:
//!
//! * **volume-local space**: `f32` positions with the volume's centroid at the
//!   origin, spanning `[-half_size, half_size)` on every axis
//! * **absolute voxel space**: integer voxel indices across the whole volume,
//!   `[0, chunk_resolution * voxel_resolution)` per axis
//! * **chunk + local voxel space**: which chunk, and which voxel inside it
//!
//! A world point maps down with
//!
//! ```text
//! absolute = floor((point + half_size) / voxel_size)
//! chunk    = absolute / voxel_resolution
//! local    = absolute - chunk * voxel_resolution
//! ```
//!
//! and a voxel maps back up to its center through the chunk offset.

use cgmath::{Point3, Vector3};

use super::{
    config::VolumeConfig,
    error::{VoxelError, VoxelResult},
    grid,
};

/// Where a voxel lives: its absolute index, its chunk, and its index inside
/// that chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoxelAddress {
    /// Voxel index across the whole volume.
    pub absolute: Point3<usize>,
    /// Chunk grid coordinate.
    pub chunk: Point3<usize>,
    /// Voxel coordinate inside the chunk.
    pub local: Point3<usize>,
}

/// The derived sizes of a volume and the arithmetic between its coordinate
/// spaces.
///
/// Built once from a validated [`VolumeConfig`]; the derived values never
/// change afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    chunk_resolution: usize,
    voxel_resolution: usize,
    chunk_size: f32,
    voxel_size: f32,
    half_size: f32,
}

impl CoordinateMapper {
    /// Derives the mapper for `config`.
    ///
    /// # Errors
    /// [`VoxelError::InvalidConfiguration`] if the config does not validate.
    pub fn new(config: &VolumeConfig) -> VoxelResult<Self> {
        config.validate()?;
        Ok(CoordinateMapper {
            chunk_resolution: config.chunk_resolution,
            voxel_resolution: config.voxel_resolution,
            chunk_size: config.chunk_size(),
            voxel_size: config.voxel_size(),
            half_size: config.half_size(),
        })
    }

    /// Chunks per axis.
    pub fn chunk_resolution(&self) -> usize {
        self.chunk_resolution
    }

    /// Voxels per axis per chunk.
    pub fn voxel_resolution(&self) -> usize {
        self.voxel_resolution
    }

    /// Edge length of one chunk.
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    /// Edge length of one voxel.
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Half the volume's edge length.
    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// Voxels per axis across the whole volume.
    pub fn voxels_per_axis(&self) -> usize {
        self.chunk_resolution * self.voxel_resolution
    }

    /// Absolute voxel index containing `point`.
    ///
    /// Every point inside `[-half_size, half_size)` resolves. A point just
    /// below the max face whose scaled position rounds up to the face lands
    /// in the last voxel.
    ///
    /// # Errors
    /// [`VoxelError::OutOfBounds`] if the point is not finite or falls outside
    /// `[-half_size, half_size)` on any axis.
    pub fn absolute_voxel(&self, point: Point3<f32>) -> VoxelResult<Point3<usize>> {
        let last = self.voxels_per_axis() - 1;
        let to_index = |component: f32| -> Option<usize> {
            if !(-self.half_size..self.half_size).contains(&component) {
                return None;
            }
            let scaled = ((component + self.half_size) / self.voxel_size).floor();
            Some((scaled as usize).min(last))
        };

        match (to_index(point.x), to_index(point.y), to_index(point.z)) {
            (Some(x), Some(y), Some(z)) => Ok(Point3::new(x, y, z)),
            _ => Err(VoxelError::OutOfBounds {
                x: point.x,
                y: point.y,
                z: point.z,
            }),
        }
    }

    /// Splits an absolute voxel index into chunk and local coordinates.
    ///
    /// The caller must pass an index inside the volume.
    pub fn split(&self, absolute: Point3<usize>) -> VoxelAddress {
        let chunk = absolute.map(|a| a / self.voxel_resolution);
        let local = Point3::new(
            absolute.x - chunk.x * self.voxel_resolution,
            absolute.y - chunk.y * self.voxel_resolution,
            absolute.z - chunk.z * self.voxel_resolution,
        );
        VoxelAddress {
            absolute,
            chunk,
            local,
        }
    }

    /// Resolves a volume-local point to the voxel containing it.
    ///
    /// # Errors
    /// [`VoxelError::OutOfBounds`] as for [`absolute_voxel`](Self::absolute_voxel).
    pub fn resolve(&self, point: Point3<f32>) -> VoxelResult<VoxelAddress> {
        let address = self.split(self.absolute_voxel(point)?);
        debug_assert!(grid::contains(address.chunk, self.chunk_resolution));
        debug_assert!(grid::contains(address.local, self.voxel_resolution));
        Ok(address)
    }

    /// Flat index of a chunk coordinate in the chunk grid.
    pub fn chunk_index(&self, chunk: Point3<usize>) -> usize {
        grid::flatten(chunk, self.chunk_resolution)
    }

    /// Flat index of a local voxel coordinate inside a chunk.
    pub fn voxel_index(&self, local: Point3<usize>) -> usize {
        grid::flatten(local, self.voxel_resolution)
    }

    /// Min corner of a chunk in volume-local space.
    pub fn chunk_offset(&self, chunk: Point3<usize>) -> Point3<f32> {
        chunk.map(|c| c as f32 * self.chunk_size - self.half_size)
    }

    /// Center of a voxel in volume-local space.
    pub fn voxel_center(&self, address: &VoxelAddress) -> Point3<f32> {
        let local = address.local.map(|l| (l as f32 + 0.5) * self.voxel_size);
        self.chunk_offset(address.chunk) + Vector3::new(local.x, local.y, local.z)
    }

    /// Volume-local axis-aligned bounds, `(min, max)`.
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let h = self.half_size;
        (Point3::new(-h, -h, -h), Point3::new(h, h, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mapper() -> CoordinateMapper {
        CoordinateMapper::new(&VolumeConfig::new(2.0, 2, 8)).unwrap()
    }

    fn center_of(mapper: &CoordinateMapper, x: usize, y: usize, z: usize) -> Point3<f32> {
        let v = mapper.voxel_size();
        let h = mapper.half_size();
        Point3::new(
            (x as f32 + 0.5) * v - h,
            (y as f32 + 0.5) * v - h,
            (z as f32 + 0.5) * v - h,
        )
    }

    #[test]
    fn test_resolves_voxel_in_first_chunk() {
        let mapper = reference_mapper();
        let address = mapper.resolve(center_of(&mapper, 3, 3, 3)).unwrap();
        assert_eq!(address.absolute, Point3::new(3, 3, 3));
        assert_eq!(address.chunk, Point3::new(0, 0, 0));
        assert_eq!(address.local, Point3::new(3, 3, 3));
    }

    #[test]
    fn test_resolves_voxel_in_neighbour_chunk() {
        let mapper = reference_mapper();
        let address = mapper.resolve(center_of(&mapper, 9, 3, 3)).unwrap();
        assert_eq!(address.absolute, Point3::new(9, 3, 3));
        assert_eq!(address.chunk, Point3::new(1, 0, 0));
        assert_eq!(address.local, Point3::new(1, 3, 3));
        assert_eq!(mapper.chunk_index(address.chunk), 1);
    }

    #[test]
    fn test_chunk_boundary_maps_to_upper_chunk() {
        let mapper = reference_mapper();
        let address = mapper.resolve(Point3::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(address.chunk, Point3::new(1, 1, 1));
        assert_eq!(address.local, Point3::new(0, 0, 0));

        let address = mapper.resolve(Point3::new(-1.0, -1.0, -1.0)).unwrap();
        assert_eq!(address.absolute, Point3::new(0, 0, 0));
    }

    #[test]
    fn test_points_outside_the_volume_are_rejected() {
        let mapper = reference_mapper();
        for point in [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, -1.01, 0.0),
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(f32::NAN, 0.0, 0.0),
            Point3::new(0.0, f32::INFINITY, 0.0),
        ] {
            assert!(matches!(
                mapper.resolve(point),
                Err(VoxelError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_point_just_below_max_face_lands_in_last_voxel() {
        let mapper = CoordinateMapper::new(&VolumeConfig::new(3.0, 3, 5)).unwrap();
        let below = 1.4999999f32;
        assert!(below < mapper.half_size());

        let address = mapper.resolve(Point3::new(below, 0.0, below)).unwrap();
        assert_eq!(address.absolute.x, 14);
        assert_eq!(address.absolute.z, 14);
        assert_eq!(address.chunk.x, 2);
        assert_eq!(address.local.x, 4);
        assert!(mapper.resolve(Point3::new(1.5, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_split_recombines_to_absolute() {
        let mapper = CoordinateMapper::new(&VolumeConfig::new(3.0, 3, 5)).unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        let (min, _) = mapper.bounds();
        for _ in 0..2000 {
            let point = Point3::new(
                min.x + rng.f32() * 3.0,
                min.y + rng.f32() * 3.0,
                min.z + rng.f32() * 3.0,
            );
            let Ok(address) = mapper.resolve(point) else {
                continue;
            };
            for axis in 0..3 {
                assert_eq!(
                    address.chunk[axis] * mapper.voxel_resolution() + address.local[axis],
                    address.absolute[axis]
                );
            }
        }
    }

    #[test]
    fn test_voxel_center_round_trips() {
        let mapper = reference_mapper();
        for absolute in grid::coords(mapper.voxels_per_axis()) {
            let address = mapper.split(absolute);
            let center = mapper.voxel_center(&address);
            assert_eq!(mapper.resolve(center).unwrap(), address);
        }
    }

    #[test]
    fn test_chunk_offsets_recenter_the_volume() {
        let mapper = reference_mapper();
        assert_eq!(mapper.chunk_offset(Point3::new(0, 0, 0)), Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(mapper.chunk_offset(Point3::new(1, 0, 1)), Point3::new(0.0, -1.0, 0.0));
        assert_eq!(
            mapper.bounds(),
            (Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
        );
    }
}
