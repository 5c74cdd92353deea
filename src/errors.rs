//! Validation errors

use crate::float_types::Real;
use std::fmt::Display;

/// Which user-entered dimension a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Height,
    Width,
}

impl Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extent::Height => write!(f, "height"),
            Extent::Width => write!(f, "width"),
        }
    }
}

/// All the ways raw feet/inch input can fail validation. Each message is
/// meant to be shown to the user as-is, telling them how to correct the
/// entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DimensionError {
    /// (NonPositive) Combined feet+inches came out zero, negative, or unparsable
    #[error("{0} must be greater than zero; enter feet and inches")]
    NonPositive(Extent),
    /// (InchesOutOfRange) The inches component must satisfy 0 <= inches < 12
    #[error("{0} inches must be between 0 and 11 (got {1})")]
    InchesOutOfRange(Extent, Real),
    /// (BelowMinimum) Resulting physical size is implausibly small
    #[error("{0} of {1:.2} m is below the minimum of {2:.2} m")]
    BelowMinimum(Extent, Real, Real),
    /// (AboveMaximum) Resulting physical size is implausibly large
    #[error("{0} of {1:.2} m is above the maximum of {2:.2} m")]
    AboveMaximum(Extent, Real, Real),
}
