// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis-relative heatmap projection

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One projected vertex: planar coordinates plus the normalized
/// along-axis distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Scalar field over a labeled part, ready for an external renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeatmapField {
    pub points: Vec<HeatmapPoint>,
}

impl HeatmapField {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Planar extent as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        let mut bounds = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            bounds.0 = bounds.0.min(p.x);
            bounds.1 = bounds.1.min(p.y);
            bounds.2 = bounds.2.max(p.x);
            bounds.3 = bounds.3.max(p.y);
        }
        Some(bounds)
    }
}

/// Two vectors spanning the plane orthogonal to `axis`.
///
/// The helper vector is world X unless the axis is nearly parallel to it
/// (`|axis.x| >= 0.9`), in which case world Y keeps the cross product away
/// from zero. `axis` must be unit length.
pub fn planar_basis(axis: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if axis.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let v1 = axis.cross(&helper).normalize();
    let v2 = axis.cross(&v1);
    (v1, v2)
}

/// Project the vertices of one labeled part into the cutting plane.
///
/// `value` is the signed distance along `axis` from `plane_point`,
/// rescaled to `[0, 1]` by the part's own distance range; a part whose
/// distances are all identical maps to the constant 0.5.
pub fn project_heatmap(
    vertices: &[Point3<f64>],
    plane_point: &Point3<f64>,
    axis: &Vector3<f64>,
) -> HeatmapField {
    if vertices.is_empty() {
        return HeatmapField::default();
    }

    let distances: Vec<f64> = vertices.iter().map(|v| (v - plane_point).dot(axis)).collect();
    let mut min = distances[0];
    let mut max = distances[0];
    for &d in &distances[1..] {
        min = min.min(d);
        max = max.max(d);
    }
    let span = max - min;

    let (v1, v2) = planar_basis(axis);
    let points = vertices
        .iter()
        .zip(&distances)
        .map(|(v, &d)| {
            let rel = v - plane_point;
            HeatmapPoint {
                x: rel.dot(&v1),
                y: rel.dot(&v2),
                value: if span == 0.0 { 0.5 } else { (d - min) / span },
            }
        })
        .collect();

    HeatmapField { points }
}
