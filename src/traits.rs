use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use nalgebra::{Matrix4, Translation3, Vector3};

/// Affine transformations over a measurable 3D value.
///
/// `transform` always returns a new value; implementors never mutate in
/// place. This is what lets one normalized reference scene serve any
/// number of concurrent scale requests.
pub trait Transformable: Sized + Clone {
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self scaled by sx, sy, sz about the origin.
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Extent of the bounding box along each axis.
    fn size(&self) -> Vector3<Real> {
        let aabb = self.bounding_box();
        aabb.maxs - aabb.mins
    }
}
