// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plane-based mesh partition

use super::{CuttingPlane, Mesh};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the cutting plane a part came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Above,
    Below,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Above => write!(f, "above"),
            Side::Below => write!(f, "below"),
        }
    }
}

/// Outcome of splitting a mesh along a plane.
#[derive(Debug, Clone)]
pub struct SplitParts {
    pub above: Mesh,
    pub below: Mesh,
    /// Triangles straddling the plane, discarded rather than clipped.
    pub dropped: usize,
}

/// Split a mesh into the triangles wholly above and wholly below a plane.
///
/// A vertex is above when its signed distance is strictly positive; a
/// distance of exactly zero counts as below, by policy, so reruns land
/// boundary triangles on the same side every time. A triangle joins a
/// side only when all three vertices agree; mixed triangles are dropped
/// and counted.
pub fn split_mesh(mesh: &Mesh, plane: &CuttingPlane) -> SplitParts {
    let mut above = Mesh::new();
    let mut below = Mesh::new();
    let mut dropped = 0usize;

    for triangle in &mesh.triangles {
        let above_count = triangle
            .vertices
            .iter()
            .filter(|v| plane.signed_distance(v) > 0.0)
            .count();

        match above_count {
            3 => above.push(*triangle),
            0 => below.push(*triangle),
            _ => dropped += 1,
        }
    }

    SplitParts {
        above,
        below,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::synthetic;
    use crate::geometry::Triangle;
    use nalgebra::{Point3, Vector3};

    fn center_plane() -> CuttingPlane {
        CuttingPlane::new(Point3::new(0.5, 0.5, 0.5), Vector3::z())
    }

    #[test]
    fn test_cube_center_split_drops_side_walls() {
        // Every side-wall triangle of the canonical cube spans both caps,
        // so only the two caps survive the all-three-vertices rule.
        let cube = synthetic::unit_cube();
        let parts = split_mesh(&cube, &center_plane());

        assert_eq!(parts.above.triangle_count(), 2);
        assert_eq!(parts.below.triangle_count(), 2);
        assert_eq!(parts.dropped, 8);
    }

    #[test]
    fn test_side_predicates_hold() {
        let mesh = synthetic::molar(3);
        let axis = crate::geometry::estimate_long_axis(&mesh).unwrap();
        let plane = CuttingPlane::new(axis.centroid, axis.direction);
        let parts = split_mesh(&mesh, &plane);

        assert!(parts
            .above
            .vertices()
            .all(|v| plane.signed_distance(v) > 0.0));
        assert!(parts
            .below
            .vertices()
            .all(|v| plane.signed_distance(v) <= 0.0));
        assert!(
            parts.above.triangle_count() + parts.below.triangle_count() + parts.dropped
                == mesh.triangle_count()
        );
    }

    #[test]
    fn test_on_plane_vertex_counts_as_below() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.5),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let parts = split_mesh(&Mesh::from_triangles(vec![triangle]), &center_plane());
        assert_eq!(parts.below.triangle_count(), 1);
        assert_eq!(parts.above.triangle_count(), 0);
        assert_eq!(parts.dropped, 0);
    }

    #[test]
    fn test_straddling_triangle_is_dropped() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        let parts = split_mesh(&Mesh::from_triangles(vec![triangle]), &center_plane());
        assert!(parts.above.is_empty());
        assert!(parts.below.is_empty());
        assert_eq!(parts.dropped, 1);
    }

    #[test]
    fn test_two_band_mesh_splits_six_six() {
        // Two horizontal fans, one per side of the center plane; nothing
        // straddles, so each side keeps its full six triangles.
        let mut mesh = synthetic::disc(Point3::new(0.5, 0.5, 0.9), 0.4, 6);
        for t in synthetic::disc(Point3::new(0.5, 0.5, 0.1), 0.4, 6).triangles {
            mesh.push(t);
        }

        let parts = split_mesh(&mesh, &center_plane());
        assert_eq!(parts.above.triangle_count(), 6);
        assert_eq!(parts.below.triangle_count(), 6);
        assert_eq!(parts.dropped, 0);
    }
}
