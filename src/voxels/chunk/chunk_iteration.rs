//! # Cube Iteration
//!
//! Triangulation works on cubes of 2×2×2 neighbouring voxels. A chunk of
//! resolution `n` has `(n - 1)³` of them, each identified by its min-corner
//! voxel. [`CubeIterator`] walks those origins in the same Y/Z/X order the
//! voxels themselves are stored in.

use cgmath::Point3;

/// An iterator over the min-corner voxel of every 2×2×2 cube in a chunk.
pub struct CubeIterator {
    /// Cubes per axis (`resolution - 1`)
    cubes: usize,
    local_x: usize,
    local_y: usize,
    local_z: usize,
}

impl CubeIterator {
    /// Creates an iterator over the cubes of a chunk with `resolution` voxels
    /// per axis. A resolution below 2 yields nothing.
    pub fn new(resolution: usize) -> Self {
        CubeIterator {
            cubes: resolution.saturating_sub(1),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }
}

impl Iterator for CubeIterator {
    type Item = Point3<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cubes == 0 || self.local_y == self.cubes {
            return None;
        }

        let origin = Point3::new(self.local_x, self.local_y, self.local_z);

        self.local_x += 1;
        if self.local_x == self.cubes {
            self.local_x = 0;
            self.local_z += 1;
            if self.local_z == self.cubes {
                self.local_z = 0;
                self.local_y += 1;
            }
        }

        Some(origin)
    }
}
