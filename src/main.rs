//! # Voxel Volume Demo
//!
//! Builds a volume, scatters random edits through it and logs the surface
//! that results.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json] [edits]
//! ```
//!
//! `VOXEL_SEED` selects the random sequence (default 0).

use std::{env, process::ExitCode};

use cgmath::Point3;
use log::{error, info};
use voxel_volume::{
    meshing::{ChunkMesh, MeshConsumer},
    voxels::{config::VolumeConfig, volume::VoxelVolume},
};

const DEFAULT_EDITS: usize = 32;

/// Logs what a renderer would receive.
struct LogConsumer;

impl MeshConsumer for LogConsumer {
    fn chunk_placed(&mut self, chunk_index: usize, offset: Point3<f32>) {
        info!("Chunk {chunk_index} placed at {offset:?}");
    }

    fn mesh_rebuilt(&mut self, chunk_index: usize, mesh: &ChunkMesh) {
        info!(
            "Chunk {chunk_index} mesh: {} vertices, {} triangles",
            mesh.vertices().len(),
            mesh.triangle_count()
        );
    }
}

fn main() -> ExitCode {
    voxel_volume::init_logging();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match VolumeConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("{path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => VolumeConfig::default(),
    };
    let edits = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_EDITS);
    let seed = env::var("VOXEL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let volume = match VoxelVolume::new(config) {
        Ok(volume) => volume,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut consumer = LogConsumer;
    volume.publish(&mut consumer);

    let mut rng = fastrand::Rng::with_seed(seed);
    let (min, _) = volume.bounds();
    for _ in 0..edits {
        let point = Point3::new(
            min.x + rng.f32() * config.size,
            min.y + rng.f32() * config.size,
            min.z + rng.f32() * config.size,
        );
        if let Err(err) = volume.edit_at_with(point, true, &mut consumer) {
            error!("{err}");
        }
    }

    info!(
        "{} solid voxels, {} triangles across {} chunks",
        volume.solid_count(),
        volume.triangle_count(),
        volume.chunk_count()
    );

    ExitCode::SUCCESS
}
