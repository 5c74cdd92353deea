//! `Mesh` struct and implementations of the `Transformable` trait for `Mesh`

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use crate::traits::Transformable;
use nalgebra::{Matrix4, Point3};
use std::{fmt::Debug, sync::OnceLock};

pub mod polygon;
pub mod vertex;

use polygon::Polygon;
use vertex::Vertex;

/// A bag of polygons in a shared coordinate space, with a lazily
/// cached bounding box.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons making up this mesh
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh.metadata = metadata;
        mesh
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Number of triangles after fan-triangulation of every polygon.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Transformable for Mesh<S> {
    /// Apply an arbitrary 4x4 transform to every vertex of a copy of this
    /// mesh. Normals are mapped through the inverse-transpose so they stay
    /// perpendicular under non-uniform scaling.
    fn transform(&self, matrix: &Matrix4<Real>) -> Mesh<S> {
        let normal_matrix = matrix
            .try_inverse()
            .expect("transform matrix must be invertible")
            .transpose();
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                let homog_pos = matrix * vert.pos.to_homogeneous();
                vert.pos = Point3::from_homogeneous(homog_pos)
                    .expect("transformed point has non-unit w");

                let mapped = normal_matrix.transform_vector(&vert.normal);
                let len = mapped.norm();
                if len > 0.0 {
                    vert.normal = mapped / len;
                }
            }
        }

        // the old cached bounding box no longer applies
        mesh.bounding_box = OnceLock::new();

        mesh
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for poly in &self.polygons {
                for v in &poly.vertices {
                    mins.x = mins.x.min(v.pos.x);
                    mins.y = mins.y.min(v.pos.y);
                    mins.z = mins.z.min(v.pos.z);
                    maxs.x = maxs.x.max(v.pos.x);
                    maxs.y = maxs.y.max(v.pos.y);
                    maxs.z = maxs.z.max(v.pos.z);
                }
            }

            // No polygons: return a trivial AABB at origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
