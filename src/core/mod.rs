//! # Core Module
//!
//! Shared-ownership primitives used by the voxel store.
//!
//! ## Key Components
//! - `MtResource`: thread-safe reference-counted resource with read-write locking

pub mod mt_resource;

pub use mt_resource::MtResource;
