//! # Voxel Cell
//!
//! A single voxel: its fixed geometric anchors in chunk-local space and its
//! boolean occupancy.

use cgmath::{Point3, Vector3};

/// One of the three grid axes.
///
/// Used to name the edge running from a voxel's center towards its `+axis`
/// neighbour.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Axis {
    /// Positive X
    X = 0,
    /// Positive Y
    Y = 1,
    /// Positive Z
    Z = 2,
}

/// A voxel inside a chunk.
///
/// `center` and the three edge midpoints are computed once and never move;
/// only `state` changes. The edge midpoint along an axis sits halfway between
/// this voxel's center and the center of its `+axis` neighbour, which is where
/// triangulation places a surface vertex when the two voxels disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelCell {
    state: bool,
    center: Point3<f32>,
    edge_midpoints: [Point3<f32>; 3],
}

impl VoxelCell {
    /// Builds the voxel at local grid coordinate `(x, y, z)` of a chunk whose
    /// voxels have edge length `voxel_size`. The voxel starts empty.
    pub fn new(x: usize, y: usize, z: usize, voxel_size: f32) -> Self {
        let center = Point3::new(
            (x as f32 + 0.5) * voxel_size,
            (y as f32 + 0.5) * voxel_size,
            (z as f32 + 0.5) * voxel_size,
        );
        let half = voxel_size * 0.5;

        VoxelCell {
            state: false,
            center,
            edge_midpoints: [
                center + Vector3::new(half, 0.0, 0.0),
                center + Vector3::new(0.0, half, 0.0),
                center + Vector3::new(0.0, 0.0, half),
            ],
        }
    }

    /// Whether the voxel is solid.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Sets the voxel's occupancy.
    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    /// Geometric center in chunk-local space.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Midpoint of the edge from the center towards the `+axis` neighbour.
    pub fn edge_midpoint(&self, axis: Axis) -> Point3<f32> {
        self.edge_midpoints[axis as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_offset_by_half_a_voxel() {
        let cell = VoxelCell::new(0, 1, 2, 0.5);
        assert_eq!(cell.center(), Point3::new(0.25, 0.75, 1.25));
        assert!(!cell.state());
    }

    #[test]
    fn test_edge_midpoints_step_half_a_voxel_along_their_axis() {
        let cell = VoxelCell::new(3, 3, 3, 0.125);
        let c = cell.center();
        assert_eq!(cell.edge_midpoint(Axis::X), Point3::new(c.x + 0.0625, c.y, c.z));
        assert_eq!(cell.edge_midpoint(Axis::Y), Point3::new(c.x, c.y + 0.0625, c.z));
        assert_eq!(cell.edge_midpoint(Axis::Z), Point3::new(c.x, c.y, c.z + 0.0625));
    }

    #[test]
    fn test_edge_midpoint_is_shared_with_neighbour() {
        let a = VoxelCell::new(2, 5, 1, 0.25);
        let b = VoxelCell::new(2, 5, 2, 0.25);
        let midpoint = a.center() + (b.center() - a.center()) * 0.5;
        assert_eq!(a.edge_midpoint(Axis::Z), midpoint);
    }

    #[test]
    fn test_set_state_leaves_anchors_alone() {
        let mut cell = VoxelCell::new(1, 2, 3, 1.0);
        let before = (cell.center(), cell.edge_midpoint(Axis::Y));
        cell.set_state(true);
        assert!(cell.state());
        assert_eq!((cell.center(), cell.edge_midpoint(Axis::Y)), before);
    }
}
