//! Turns raw feet/inch input into a validated physical door size.
//!
//! Raw input moves through exactly one path: [`RawDimensions`] →
//! [`TargetDimensions::from_feet_inches`] → `Ok(TargetDimensions)` or
//! `Err(DimensionError)`. `TargetDimensions` has no other constructor, so
//! holding one proves the input passed every check.

use crate::errors::{DimensionError, Extent};
use crate::float_types::{Real, INCH};
use serde::Deserialize;

/// User input exactly as submitted, before any validation. Free-form
/// numeric fields; missing values deserialize to zero the same way the
/// empty input boxes do.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawDimensions {
    #[serde(default)]
    pub height_ft: Real,
    #[serde(default)]
    pub height_in: Real,
    #[serde(default)]
    pub width_ft: Real,
    #[serde(default)]
    pub width_in: Real,
}

/// Plausibility bounds for a validated door size. These are configuration,
/// not constants; see [`crate::config::ServiceConfig`] for the environment
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionLimits {
    /// Smallest accepted side, in meters. Guards against degenerate scale factors.
    pub min_side_m: Real,
    /// Tallest accepted door, in meters.
    pub max_height_m: Real,
    /// Widest accepted door, in meters.
    pub max_width_m: Real,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        DimensionLimits {
            min_side_m: 0.3,
            max_height_m: 4.0,
            max_width_m: 3.0,
        }
    }
}

/// A validated physical door size in meters. Only obtainable through
/// [`TargetDimensions::from_feet_inches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDimensions {
    height_m: Real,
    width_m: Real,
}

impl TargetDimensions {
    /// Validate raw feet/inch input against `limits`.
    ///
    /// Checks run in the order the user sees them reported: positive
    /// totals first, then the inches range, then physical plausibility.
    /// NaN and infinite inputs never pass the first two checks.
    pub fn from_feet_inches(
        raw: &RawDimensions,
        limits: &DimensionLimits,
    ) -> Result<Self, DimensionError> {
        let height_total_in = raw.height_ft * 12.0 + raw.height_in;
        let width_total_in = raw.width_ft * 12.0 + raw.width_in;

        if height_total_in <= 0.0 || !height_total_in.is_finite() {
            return Err(DimensionError::NonPositive(Extent::Height));
        }
        if width_total_in <= 0.0 || !width_total_in.is_finite() {
            return Err(DimensionError::NonPositive(Extent::Width));
        }

        if !(0.0..12.0).contains(&raw.height_in) {
            return Err(DimensionError::InchesOutOfRange(Extent::Height, raw.height_in));
        }
        if !(0.0..12.0).contains(&raw.width_in) {
            return Err(DimensionError::InchesOutOfRange(Extent::Width, raw.width_in));
        }

        let height_m = height_total_in * INCH;
        let width_m = width_total_in * INCH;

        if height_m < limits.min_side_m {
            return Err(DimensionError::BelowMinimum(
                Extent::Height,
                height_m,
                limits.min_side_m,
            ));
        }
        if width_m < limits.min_side_m {
            return Err(DimensionError::BelowMinimum(
                Extent::Width,
                width_m,
                limits.min_side_m,
            ));
        }
        if height_m > limits.max_height_m {
            return Err(DimensionError::AboveMaximum(
                Extent::Height,
                height_m,
                limits.max_height_m,
            ));
        }
        if width_m > limits.max_width_m {
            return Err(DimensionError::AboveMaximum(
                Extent::Width,
                width_m,
                limits.max_width_m,
            ));
        }

        Ok(TargetDimensions { height_m, width_m })
    }

    pub const fn height_m(&self) -> Real {
        self.height_m
    }

    pub const fn width_m(&self) -> Real {
        self.width_m
    }
}
