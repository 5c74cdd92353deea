//! `Scene`: the unit the pipeline operates on: an ordered list of mesh
//! parts sharing one coordinate space, plus the material table they
//! reference.
//!
//! A scene is measured through its cached world-space [`Aabb`], re-anchored
//! once after load with [`Scene::pivot_to_base`], and copied-then-scaled per
//! request through [`Transformable::scale`]. Nothing here mutates in place.

use crate::float_types::parry3d::bounding_volume::{Aabb, BoundingVolume};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::traits::Transformable;
use nalgebra::{Matrix4, Point3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

/// The subset of a glTF material the door pipeline round-trips: enough to
/// keep the asset looking right in the viewer, nothing more.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: None,
            base_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 1.0,
            roughness: 1.0,
            double_sided: false,
        }
    }
}

/// Identity a mesh part keeps from the source file: its node/mesh name and
/// the index of its entry in [`Scene::materials`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartInfo {
    pub name: Option<String>,
    pub material: Option<usize>,
}

/// A scene instantiated with the metadata the GLB loader attaches.
pub type DoorScene = Scene<PartInfo>;

#[derive(Clone, Debug)]
pub struct Scene<S: Clone + Send + Sync + Debug> {
    /// Mesh parts, one per source primitive.
    pub parts: Vec<Mesh<S>>,

    /// Materials referenced by part metadata.
    pub materials: Vec<Material>,

    /// Lazily calculated AABB that spans every part.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Scene<S> {
    pub const fn new() -> Self {
        Scene {
            parts: Vec::new(),
            materials: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    pub fn from_parts(parts: Vec<Mesh<S>>, materials: Vec<Material>) -> Self {
        Scene {
            parts,
            materials,
            bounding_box: OnceLock::new(),
        }
    }

    /// True if no part carries any polygon.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.polygons.is_empty())
    }

    /// Total triangle count across all parts.
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(Mesh::triangle_count).sum()
    }

    /// The anchor every request scales around: footprint center in X/Z,
    /// lowest point in Y.
    pub fn pivot_offset(&self) -> Vector3<Real> {
        let aabb = self.bounding_box();
        Vector3::new(
            (aabb.mins.x + aabb.maxs.x) * 0.5,
            aabb.mins.y,
            (aabb.mins.z + aabb.maxs.z) * 0.5,
        )
    }

    /// Returns a copy translated so the pivot offset sits at the origin:
    /// the footprint is centered on `x = 0, z = 0` and the lowest point
    /// rests on `y = 0`.
    ///
    /// Run once per loaded asset, before any scale operation. Scaling about
    /// the origin afterwards preserves the anchor, so every scaled copy
    /// stands on the floor exactly where the reference did.
    pub fn pivot_to_base(&self) -> Scene<S> {
        self.translate_vector(-self.pivot_offset())
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Scene<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Transformable for Scene<S> {
    /// Apply a transform to a copy of every part. Materials carry over
    /// untouched.
    fn transform(&self, matrix: &Matrix4<Real>) -> Scene<S> {
        Scene {
            parts: self.parts.iter().map(|p| p.transform(matrix)).collect(),
            materials: self.materials.clone(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Returns an [`Aabb`] spanning every part's bounding box.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut boxes = self
                .parts
                .iter()
                .filter(|p| !p.polygons.is_empty())
                .map(Transformable::bounding_box);

            let Some(first) = boxes.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };

            boxes.fold(first, |merged, bb| merged.merged(&bb))
        })
    }

    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::tolerance;
    use crate::mesh::polygon::Polygon;
    use crate::mesh::vertex::Vertex;

    /// An axis-aligned slab spanning the given corners, as one scene part.
    fn slab(mins: Point3<Real>, maxs: Point3<Real>) -> Scene<()> {
        let corner = |x: bool, y: bool, z: bool| {
            Point3::new(
                if x { maxs.x } else { mins.x },
                if y { maxs.y } else { mins.y },
                if z { maxs.z } else { mins.z },
            )
        };
        let quad = |pts: [Point3<Real>; 4], n: Vector3<Real>| {
            Polygon::new(pts.map(|p| Vertex::new(p, n)).to_vec(), None)
        };

        let polygons = vec![
            // front / back
            quad(
                [
                    corner(false, false, true),
                    corner(true, false, true),
                    corner(true, true, true),
                    corner(false, true, true),
                ],
                Vector3::z(),
            ),
            quad(
                [
                    corner(true, false, false),
                    corner(false, false, false),
                    corner(false, true, false),
                    corner(true, true, false),
                ],
                -Vector3::z(),
            ),
            // left / right
            quad(
                [
                    corner(false, false, false),
                    corner(false, false, true),
                    corner(false, true, true),
                    corner(false, true, false),
                ],
                -Vector3::x(),
            ),
            quad(
                [
                    corner(true, false, true),
                    corner(true, false, false),
                    corner(true, true, false),
                    corner(true, true, true),
                ],
                Vector3::x(),
            ),
            // bottom / top
            quad(
                [
                    corner(false, false, false),
                    corner(true, false, false),
                    corner(true, false, true),
                    corner(false, false, true),
                ],
                -Vector3::y(),
            ),
            quad(
                [
                    corner(false, true, true),
                    corner(true, true, true),
                    corner(true, true, false),
                    corner(false, true, false),
                ],
                Vector3::y(),
            ),
        ];

        Scene::from_parts(vec![Mesh::from_polygons(&polygons, None)], Vec::new())
    }

    #[test]
    fn pivot_to_base_grounds_and_centers() {
        let scene = slab(Point3::new(1.0, 2.0, -3.0), Point3::new(2.0, 5.0, -1.0));
        let normalized = scene.pivot_to_base();
        let aabb = normalized.bounding_box();

        assert!(aabb.mins.y.abs() < tolerance());
        assert!((aabb.mins.x + aabb.maxs.x).abs() < tolerance());
        assert!((aabb.mins.z + aabb.maxs.z).abs() < tolerance());

        // extents survive the move
        let size = normalized.size();
        assert!((size.x - 1.0).abs() < tolerance());
        assert!((size.y - 3.0).abs() < tolerance());
        assert!((size.z - 2.0).abs() < tolerance());
    }

    #[test]
    fn pivot_to_base_leaves_source_untouched() {
        let scene = slab(Point3::new(1.0, 2.0, -3.0), Point3::new(2.0, 5.0, -1.0));
        let _ = scene.pivot_to_base();
        assert_eq!(scene.bounding_box().mins, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn bounding_box_merges_parts() {
        let a = slab(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = slab(Point3::new(2.0, -1.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        let scene = Scene::from_parts(
            vec![a.parts[0].clone(), b.parts[0].clone()],
            Vec::new(),
        );
        let aabb = scene.bounding_box();
        assert_eq!(aabb.mins, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(aabb.maxs, Point3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn empty_scene_reports_empty() {
        assert!(Scene::<()>::new().is_empty());
    }
}
