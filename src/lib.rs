//! Scales a reference door model to user-entered dimensions and publishes
//! the result for 3D/AR viewing.
//!
//! The pipeline: a binary glTF reference asset is loaded once, re-anchored
//! so its footprint center sits at the origin with its base on the floor,
//! and measured. Each request then validates the user's feet/inch input,
//! derives per-axis scale factors against the measured reference, scales
//! an independent copy of the scene, serializes it back to GLB, and
//! uploads it to object storage, returning a publicly fetchable URL.
//!
//! The geometry core ([`mesh`], [`scene`], [`scaling`]) is a plain library
//! with no I/O; [`server`] and [`storage`] wrap it into the HTTP service
//! the `doorscale` binary runs.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod asset;
pub mod config;
pub mod dims;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod scaling;
pub mod scene;
pub mod server;
pub mod storage;
pub mod traits;

pub use asset::{AssetCache, ReferenceAsset};
pub use dims::{DimensionLimits, RawDimensions, TargetDimensions};
pub use mesh::Mesh;
pub use scaling::ScaleFactors;
pub use scene::{DoorScene, Scene};
pub use traits::Transformable;
