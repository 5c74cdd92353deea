//! The reference door asset: loaded once, normalized once, then shared
//! read-only with every scale request for the life of the process.

use crate::dims::TargetDimensions;
use crate::float_types::{tolerance, Real};
use crate::io::{glb, IoError};
use crate::scaling::ScaleFactors;
use crate::scene::DoorScene;
use crate::traits::Transformable;
use nalgebra::Vector3;
use std::path::Path;
use std::sync::Arc;

/// Reference asset unreachable or unusable. Fatal to request submission
/// until the process is restarted with a good asset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read reference asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse reference asset: {0}")]
    Parse(#[from] IoError),

    #[error("reference asset is degenerate: {axis} extent is {size} m")]
    Degenerate { axis: char, size: Real },
}

/// The normalized reference scene plus its measured extent.
///
/// Construction is the only mutation this type ever sees: the scene is
/// pivoted to bottom-center and measured, then everything is read-only.
/// Scaling hands out transformed copies, so one `ReferenceAsset` behind an
/// `Arc` serves any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct ReferenceAsset {
    scene: DoorScene,
    size: Vector3<Real>,
}

impl ReferenceAsset {
    /// Normalize and measure an already-parsed scene.
    ///
    /// Rejects geometry whose width or height extent is below tolerance:
    /// scale factors against a zero extent would be infinite, so a
    /// degenerate reference is refused up front instead of poisoning every
    /// later request.
    pub fn from_scene(scene: DoorScene) -> Result<Self, LoadError> {
        let scene = scene.pivot_to_base();
        let size = scene.size();

        for (axis, extent) in [('x', size.x), ('y', size.y)] {
            if extent < tolerance() {
                return Err(LoadError::Degenerate { axis, size: extent });
            }
        }

        Ok(ReferenceAsset { scene, size })
    }

    /// Parse a GLB buffer, then normalize and measure it.
    pub fn from_glb(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::from_scene(glb::from_glb(bytes)?)
    }

    /// Read and parse the reference asset from disk. One-shot; there is no
    /// retry loop; a failed load leaves the cache `Failed` until restart.
    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_glb(&bytes)
    }

    /// The normalized scene: footprint centered on the origin, base at y=0.
    pub fn scene(&self) -> &DoorScene {
        &self.scene
    }

    /// Measured extent of the normalized scene, in meters.
    pub fn size(&self) -> &Vector3<Real> {
        &self.size
    }

    /// Produce an independent scaled copy for one request, along with the
    /// factors that were applied. The reference itself is untouched.
    pub fn scaled(&self, dims: &TargetDimensions) -> (DoorScene, ScaleFactors) {
        let factors = ScaleFactors::for_panel(dims, &self.size);
        let scaled = self.scene.scale(factors.sx, factors.sy, factors.sz);
        (scaled, factors)
    }
}

/// Lifecycle of the process-wide reference asset.
///
/// Requests only ever get their hands on a `ReferenceAsset` through
/// [`AssetCache::ready`], so the scale pipeline cannot be invoked against
/// a cache that is still loading or has failed.
#[derive(Debug, Clone, Default)]
pub enum AssetCache {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<ReferenceAsset>),
    Failed(String),
}

impl AssetCache {
    /// The loaded asset, if and only if the cache is `Ready`.
    pub fn ready(&self) -> Option<Arc<ReferenceAsset>> {
        match self {
            AssetCache::Ready(asset) => Some(Arc::clone(asset)),
            _ => None,
        }
    }

    pub const fn state_name(&self) -> &'static str {
        match self {
            AssetCache::Unloaded => "unloaded",
            AssetCache::Loading => "loading",
            AssetCache::Ready(_) => "ready",
            AssetCache::Failed(_) => "failed",
        }
    }
}
