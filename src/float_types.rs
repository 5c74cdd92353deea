// Re-export parry under a stable name so downstream modules never
// spell out the float-suffixed crate.
pub use parry3d_f64 as parry3d;

/// Scalar type used for all geometry in this crate.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate for geometric
/// comparisons (degenerate-box detection, vertex welding on export).
/// Can be overridden:
///  1) **Build-time**: set env var `DOORSCALE_TOLERANCE` (e.g. `DOORSCALE_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_TOLERANCE: Real = 1e-6;

/// Returns the current tolerance value.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("DOORSCALE_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `doorscale::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion
//
// All geometry is carried in meters, matching the glTF convention.
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const METER: Real = 1.0;
pub const CM: Real = 0.01;
pub const MM: Real = 0.001;
pub const INCH: Real = 0.0254;
pub const FOOT: Real = 0.0254 * 12.0;
