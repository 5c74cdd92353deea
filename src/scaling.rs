//! Per-axis scale factors mapping the measured reference onto a validated
//! target size.

use crate::dims::TargetDimensions;
use crate::float_types::Real;
use nalgebra::Vector3;
use serde::Serialize;

/// Anisotropic scale factors for one request.
///
/// Height drives Y, width drives X, and **depth is tied to width**
/// (`sz == sx`). That coupling is a domain assumption about panel-shaped
/// assets (a door's thickness reads best when it follows the width) and
/// not a geometric law; it will distort assets whose depth is unrelated to
/// their width. Factors are carried at full f64 precision, unrounded, all
/// the way into serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    pub sx: Real,
    pub sy: Real,
    pub sz: Real,
}

impl ScaleFactors {
    /// Derive factors for a panel-shaped asset. Pure: `reference_size` is
    /// the measured extent of the normalized reference
    /// (`x` = width, `y` = height).
    pub fn for_panel(dims: &TargetDimensions, reference_size: &Vector3<Real>) -> Self {
        let sy = dims.height_m() / reference_size.y;
        let sx = dims.width_m() / reference_size.x;
        ScaleFactors { sx, sy, sz: sx }
    }
}
