//! A planar `Polygon` defined by an ordered list of vertices.

use crate::float_types::Real;
use crate::mesh::vertex::Vertex;
use nalgebra::Vector3;
use std::fmt::Debug;

/// A convex polygon with at least three vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from vertices
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");
        Polygon { vertices, metadata }
    }

    /// Fan-triangulate this polygon into triangles.
    ///
    /// Correct for the convex faces a GLB primitive carries; polygons
    /// arriving from import are triangles already and pass through as-is.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        for i in 1..self.vertices.len() - 1 {
            triangles.push([
                self.vertices[0],
                self.vertices[i],
                self.vertices[i + 1],
            ]);
        }
        triangles
    }

    /// Geometric face normal from the first three vertices (unit length,
    /// or zero if the vertices are collinear).
    pub fn face_normal(&self) -> Vector3<Real> {
        let a = self.vertices[0].pos;
        let b = self.vertices[1].pos;
        let c = self.vertices[2].pos;
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len > 0.0 { n / len } else { Vector3::zeros() }
    }
}
