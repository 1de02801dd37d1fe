//! # Grid Indexing
//!
//! Both levels of the volume, the chunk grid and the voxel grid inside every
//! chunk, are cubic and flattened the same way: Y-major, then Z, then X.
//!
//! ```text
//! index = y * extent² + z * extent + x
//! ```
//!
//! Keeping the formula in one place means the two levels cannot drift apart.

use cgmath::Point3;

/// Flattens a coordinate of a cubic grid with `extent` cells per axis.
///
/// The caller is responsible for `coord` being inside the grid; see
/// [`contains`].
#[inline]
pub fn flatten(coord: Point3<usize>, extent: usize) -> usize {
    coord.y * extent * extent + coord.z * extent + coord.x
}

/// Inverse of [`flatten`].
#[inline]
pub fn unflatten(index: usize, extent: usize) -> Point3<usize> {
    let plane = extent * extent;
    Point3::new(index % extent, index / plane, (index % plane) / extent)
}

/// Whether every component of `coord` lies in `[0, extent)`.
#[inline]
pub fn contains(coord: Point3<usize>, extent: usize) -> bool {
    coord.x < extent && coord.y < extent && coord.z < extent
}

/// Number of cells in a cubic grid.
#[inline]
pub fn volume(extent: usize) -> usize {
    extent * extent * extent
}

/// [`volume`], or `None` if the cell count does not fit in a `usize`.
#[inline]
pub fn checked_volume(extent: usize) -> Option<usize> {
    extent.checked_mul(extent)?.checked_mul(extent)
}

/// Visits every coordinate of a cubic grid in flat-index order.
pub fn coords(extent: usize) -> impl Iterator<Item = Point3<usize>> {
    (0..extent).flat_map(move |y| {
        (0..extent).flat_map(move |z| (0..extent).map(move |x| Point3::new(x, y, z)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_is_y_major() {
        assert_eq!(flatten(Point3::new(1, 0, 0), 4), 1);
        assert_eq!(flatten(Point3::new(0, 0, 1), 4), 4);
        assert_eq!(flatten(Point3::new(0, 1, 0), 4), 16);
        assert_eq!(flatten(Point3::new(3, 3, 3), 4), 63);
    }

    #[test]
    fn test_unflatten_inverts_flatten() {
        for extent in 1..6 {
            for index in 0..volume(extent) {
                let coord = unflatten(index, extent);
                assert!(contains(coord, extent));
                assert_eq!(flatten(coord, extent), index);
            }
        }
    }

    #[test]
    fn test_coords_follow_flat_order() {
        for (index, coord) in coords(3).enumerate() {
            assert_eq!(flatten(coord, 3), index);
        }
        assert_eq!(coords(3).count(), 27);
    }

    #[test]
    fn test_contains_rejects_extent() {
        assert!(contains(Point3::new(7, 7, 7), 8));
        assert!(!contains(Point3::new(8, 0, 0), 8));
        assert!(!contains(Point3::new(0, 8, 0), 8));
        assert!(!contains(Point3::new(0, 0, 8), 8));
    }

    #[test]
    fn test_checked_volume_reports_overflow() {
        assert_eq!(checked_volume(8), Some(512));
        assert_eq!(checked_volume(usize::MAX), None);
        assert_eq!(checked_volume(1 << 22), None);
    }
}
