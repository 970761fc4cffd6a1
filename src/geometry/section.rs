// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cross-section sweep along the long axis

use super::heatmap::planar_basis;
use super::{LongAxis, Mesh};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Number of planes sampled along the sweep range.
pub const SCAN_SAMPLES: usize = 100;

/// Plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CuttingPlane {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl CuttingPlane {
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { point, normal }
    }

    /// Signed side of a vertex: positive above, negative below, zero on
    /// the plane.
    pub fn signed_distance(&self, vertex: &Point3<f64>) -> f64 {
        (vertex - self.point).dot(&self.normal)
    }
}

/// Result of the plane sweep.
///
/// `polygon` is `None` when every sample was degenerate; the plane then
/// falls back to the mesh centroid and callers decide whether the
/// downstream cut is still usable.
#[derive(Debug, Clone)]
pub struct SectionScan {
    pub plane: CuttingPlane,
    pub polygon: Option<Vec<Point3<f64>>>,
    pub area: f64,
    /// Samples evaluated by the sweep.
    pub samples: usize,
    /// Samples that produced no positive area (fewer than 3 crossing
    /// points, or a hull that degenerated).
    pub degenerate_samples: usize,
}

impl SectionScan {
    pub fn used_centroid_fallback(&self) -> bool {
        self.polygon.is_none()
    }
}

/// Collect the plane crossings of every triangle cut once by `plane`.
///
/// Each of the three wrapping edges is intersected; an edge parallel to
/// the plane (or of zero length) has a vanishing denominator and counts
/// as no crossing. Only triangles yielding exactly two crossings
/// contribute, both points appended in encounter order.
pub fn cross_section(mesh: &Mesh, plane: &CuttingPlane) -> Vec<Point3<f64>> {
    let mut section = Vec::new();
    for triangle in &mesh.triangles {
        let mut crossings: Vec<Point3<f64>> = Vec::with_capacity(3);
        for i in 0..3 {
            let p1 = triangle.vertices[i];
            let p2 = triangle.vertices[(i + 1) % 3];
            let denom = (p2 - p1).dot(&plane.normal);
            if denom == 0.0 {
                continue;
            }
            let t = (plane.point - p1).dot(&plane.normal) / denom;
            if (0.0..=1.0).contains(&t) {
                crossings.push(p1 + (p2 - p1) * t);
            }
        }
        if crossings.len() == 2 {
            section.extend(crossings);
        }
    }
    section
}

/// Convex-hull area of a coplanar point set.
///
/// The points are projected into the plane's 2D basis before hulling, so
/// coplanarity costs nothing numerically; a hull that still degenerates
/// (collinear input) yields zero.
pub fn section_area(points: &[Point3<f64>], normal: &Vector3<f64>) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let (v1, v2) = planar_basis(normal);
    let origin = points[0];
    let flat: Vec<Point2<f64>> = points
        .iter()
        .map(|p| {
            let rel = p - origin;
            Point2::new(rel.dot(&v1), rel.dot(&v2))
        })
        .collect();

    let hull = parry2d_f64::transformation::convex_hull(&flat);
    if hull.len() < 3 {
        return 0.0;
    }

    let mut doubled = 0.0;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        doubled += a.x * b.y - b.x * a.y;
    }
    doubled.abs() / 2.0
}

/// Sweep [`SCAN_SAMPLES`] planes and keep the one with maximum area.
pub fn scan_max_section(mesh: &Mesh, axis: &LongAxis) -> SectionScan {
    scan_max_section_with(mesh, axis, SCAN_SAMPLES, &mut |_, _| {})
}

/// Plane sweep with an explicit sample count and a per-sample callback.
///
/// The sweep offsets run over the raw world-Z extent of the mesh, and
/// each candidate plane sits at `centroid + z * axis`. The sample with
/// strictly greater area than all before it wins; ties keep the first.
/// `on_sample(done, total)` fires after every sample.
pub fn scan_max_section_with(
    mesh: &Mesh,
    axis: &LongAxis,
    samples: usize,
    on_sample: &mut dyn FnMut(usize, usize),
) -> SectionScan {
    let fallback = CuttingPlane::new(axis.centroid, axis.direction);
    if mesh.is_empty() {
        return SectionScan {
            plane: fallback,
            polygon: None,
            area: 0.0,
            samples: 0,
            degenerate_samples: 0,
        };
    }

    let samples = samples.max(1);
    let bbox = mesh.bounding_box();
    let (z_min, z_max) = (bbox.min.z, bbox.max.z);

    let mut max_area = 0.0;
    let mut max_polygon = None;
    let mut max_plane = None;
    let mut degenerate = 0usize;

    for index in 0..samples {
        let z = if samples == 1 {
            z_min
        } else {
            z_min + (z_max - z_min) * index as f64 / (samples - 1) as f64
        };
        let plane = CuttingPlane::new(axis.centroid + z * axis.direction, axis.direction);

        let points = cross_section(mesh, &plane);
        if points.len() < 3 {
            degenerate += 1;
        } else {
            let area = section_area(&points, &plane.normal);
            if area > max_area {
                max_area = area;
                max_polygon = Some(points);
                max_plane = Some(plane);
            } else if area == 0.0 {
                degenerate += 1;
            }
        }
        on_sample(index + 1, samples);
    }

    match max_plane {
        Some(plane) => SectionScan {
            plane,
            polygon: max_polygon,
            area: max_area,
            samples,
            degenerate_samples: degenerate,
        },
        None => SectionScan {
            plane: fallback,
            polygon: None,
            area: 0.0,
            samples,
            degenerate_samples: degenerate,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::synthetic;
    use crate::geometry::{estimate_long_axis, Triangle};
    use approx::assert_relative_eq;

    fn z_axis_through(point: Point3<f64>) -> CuttingPlane {
        CuttingPlane::new(point, Vector3::z())
    }

    #[test]
    fn test_cube_center_section_is_unit_square() {
        let cube = synthetic::unit_cube();
        let plane = z_axis_through(Point3::new(0.5, 0.5, 0.5));

        let points = cross_section(&cube, &plane);
        // 8 side triangles cut once, two crossings each; caps are parallel.
        assert_eq!(points.len(), 16);
        assert!(points.iter().all(|p| p.z == 0.5));

        let area = section_area(&points, &plane.normal);
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_section_through_cap_plane_keeps_boundary_crossings() {
        // At z = 1 the cap triangles lie in the plane (guarded out) while
        // the side triangles still cross at t = 0 or t = 1.
        let cube = synthetic::unit_cube();
        let plane = z_axis_through(Point3::new(0.5, 0.5, 1.0));

        let points = cross_section(&cube, &plane);
        assert!(!points.is_empty());
        let area = section_area(&points, &plane.normal);
        assert_relative_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_grazing_triangle_is_dropped() {
        // The plane passes through one vertex and the opposite edge,
        // producing three crossings; the exactly-two rule drops it.
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        let mesh = Mesh::from_triangles(vec![triangle]);
        let points = cross_section(&mesh, &z_axis_through(Point3::origin()));
        assert!(points.is_empty());
    }

    #[test]
    fn test_area_needs_three_points() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert_eq!(section_area(&points, &Vector3::z()), 0.0);
    }

    #[test]
    fn test_collinear_points_have_zero_area() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        assert_eq!(section_area(&points, &Vector3::z()), 0.0);
    }

    #[test]
    fn test_cube_scan_keeps_first_maximal_sample() {
        let cube = synthetic::unit_cube();
        // World-Z sweep offsets start at z = 0, so the first sample is the
        // centroid plane with the full unit-square section; later samples
        // match its area but never exceed it.
        let axis = LongAxis {
            centroid: Point3::new(0.5, 0.5, 0.5),
            direction: Vector3::z(),
        };

        let scan = scan_max_section(&cube, &axis);
        assert!(!scan.used_centroid_fallback());
        assert_relative_eq!(scan.area, 1.0, epsilon = 1e-12);
        assert_relative_eq!(scan.plane.point.z, 0.5, epsilon = 1e-12);
        assert_eq!(scan.samples, SCAN_SAMPLES);
        // Offsets beyond +0.5 push the plane past the top of the cube.
        assert_eq!(scan.degenerate_samples, 50);
    }

    #[test]
    fn test_flat_mesh_falls_back_to_centroid() {
        let disc = synthetic::disc(Point3::new(1.0, 2.0, 3.0), 2.0, 8);
        let axis = estimate_long_axis(&disc).unwrap();

        let mut calls = Vec::new();
        let scan = scan_max_section_with(&disc, &axis, 10, &mut |done, total| {
            calls.push((done, total));
        });

        assert!(scan.used_centroid_fallback());
        assert_eq!(scan.area, 0.0);
        assert_eq!(scan.degenerate_samples, 10);
        assert_relative_eq!(scan.plane.point.x, axis.centroid.x, epsilon = 1e-12);
        assert_relative_eq!(scan.plane.point.z, axis.centroid.z, epsilon = 1e-12);
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0], (1, 10));
        assert_eq!(calls[9], (10, 10));
    }

    #[test]
    fn test_empty_mesh_scan_reports_nothing() {
        let axis = LongAxis {
            centroid: Point3::origin(),
            direction: Vector3::z(),
        };
        let scan = scan_max_section(&Mesh::new(), &axis);
        assert!(scan.used_centroid_fallback());
        assert_eq!(scan.samples, 0);
    }
}
