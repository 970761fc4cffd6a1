// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Principal axis estimation via the inertia tensor

use super::Mesh;
use crate::error::SegmentError;
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};

/// Centroid and dominant elongation direction of a mesh.
///
/// The direction is unit length; its sign is an eigensolver artifact and
/// carries no meaning. Anything directional must be decided downstream by
/// the classifier, never from this sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LongAxis {
    pub centroid: Point3<f64>,
    pub direction: Vector3<f64>,
}

/// Estimate the long axis of a mesh.
///
/// All triangle corners are flattened into one point cloud without
/// deduplication, so corners shared by several triangles weigh in once per
/// triangle. The centroid is the arithmetic mean of that cloud; the axis is
/// the eigenvector of the largest eigenvalue of the second-moment inertia
/// tensor about the centroid.
pub fn estimate_long_axis(mesh: &Mesh) -> Result<LongAxis, SegmentError> {
    if mesh.is_empty() {
        return Err(SegmentError::EmptyMesh);
    }

    let count = mesh.vertex_count() as f64;
    let mut sum = Vector3::zeros();
    for vertex in mesh.vertices() {
        sum += vertex.coords;
    }
    let centroid = Point3::from(sum / count);

    let mut xx = 0.0;
    let mut yy = 0.0;
    let mut zz = 0.0;
    let mut xy = 0.0;
    let mut xz = 0.0;
    let mut yz = 0.0;
    for vertex in mesh.vertices() {
        let r = vertex - centroid;
        xx += r.y * r.y + r.z * r.z;
        yy += r.x * r.x + r.z * r.z;
        zz += r.x * r.x + r.y * r.y;
        xy -= r.x * r.y;
        xz -= r.x * r.z;
        yz -= r.y * r.z;
    }
    let tensor = Matrix3::new(xx, xy, xz, xy, yy, yz, xz, yz, zz);

    let eigen = SymmetricEigen::new(tensor);
    let dominant = eigen.eigenvalues.imax();

    // A null tensor means every corner coincides with the centroid.
    if eigen.eigenvalues[dominant] <= 1e-12 {
        return Err(SegmentError::DegenerateAxis);
    }

    let direction = eigen.eigenvectors.column(dominant).normalize();

    Ok(LongAxis {
        centroid,
        direction,
    })
}
