//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; it is **copied verbatim**,
    ///   so make sure it is oriented the way the lighting model expects.
    ///
    /// Non-finite components are zeroed rather than propagated.
    #[inline]
    pub fn new(mut pos: Point3<Real>, mut normal: Vector3<Real>) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        for c in normal.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex { pos, normal }
    }

    /// Euclidean distance between vertex positions.
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zeroes_non_finite_components() {
        let v = Vertex::new(
            Point3::new(1.0, Real::NAN, 3.0),
            Vector3::new(Real::INFINITY, 1.0, 0.0),
        );
        assert_eq!(v.pos, Point3::new(1.0, 0.0, 3.0));
        assert_eq!(v.normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vertex::new(Point3::origin(), Vector3::y());
        let b = Vertex::new(Point3::new(3.0, 4.0, 0.0), Vector3::y());
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
