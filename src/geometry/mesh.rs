// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle-soup mesh representation

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle as three corner points.
///
/// Scans arrive as raw facet lists, so no shared-vertex indexing is kept;
/// corners repeated across triangles stay repeated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit face normal from the winding order, or `None` for a triangle
    /// whose edge cross product vanishes exactly.
    pub fn face_normal(&self) -> Option<Vector3<f64>> {
        let [a, b, c] = &self.vertices;
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        if norm > 0.0 {
            Some(cross / norm)
        } else {
            None
        }
    }

    /// Sum of the three edge lengths.
    pub fn perimeter(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        (b - a).norm() + (c - b).norm() + (a - c).norm()
    }
}

/// Triangular surface mesh as an ordered triangle sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Append a triangle
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner count over all triangles (repeats included)
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Flattened corner points in storage order, repeats included
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for vertex in self.vertices() {
            bbox.expand_to_include(vertex);
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let n = t.face_normal().unwrap();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);

        let flipped = tri([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        let n = flipped.face_normal().unwrap();
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_normal_of_collapsed_triangle_is_none() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let t = Triangle::new(p, p, p);
        assert!(t.face_normal().is_none());
    }

    #[test]
    fn test_perimeter() {
        let t = tri([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
        assert_relative_eq!(t.perimeter(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_iteration_keeps_repeats() {
        let mut mesh = Mesh::new();
        let shared = [1.0, 1.0, 1.0];
        mesh.push(tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], shared));
        mesh.push(tri(shared, [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]));

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.vertices().count(), 6);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = Mesh::from_triangles(vec![tri(
            [-1.0, 0.0, 2.0],
            [3.0, -2.0, 0.0],
            [0.0, 1.0, 5.0],
        )]);
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3::new(3.0, 1.0, 5.0));
    }
}
