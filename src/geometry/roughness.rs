// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Texture statistics and crown/root classification

use super::Mesh;
use serde::{Deserialize, Serialize};

/// Minimum composite-score gap for the first part to win the crown label.
pub const CLASSIFY_THRESHOLD: f64 = 0.02;

/// Feature weights for the composite score. Units are deliberately mixed
/// (radians, length units); the weights are tuned against that, so the
/// features must not be normalized.
const W_NORMAL: f64 = 0.3;
const W_HEIGHT: f64 = 0.3;
const W_CURVATURE: f64 = 0.2;
const W_EDGE: f64 = 0.2;

/// Four texture features of one mesh part.
///
/// The two turning-angle features iterate consecutive triangle pairs in
/// storage order rather than spatial adjacency; scans arrive with
/// neighboring facets stored together often enough for the statistic to
/// separate crown from root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoughnessProfile {
    /// Mean turning angle between consecutive face normals, radians.
    pub normal_roughness: f64,
    /// Population standard deviation of all corner Z values, world frame.
    pub height_variation: f64,
    /// Mean squared turning angle, a curvature proxy.
    pub curvature: f64,
    /// Mean triangle perimeter.
    pub edge_density: f64,
}

impl RoughnessProfile {
    /// Compute the profile of a part. Empty parts score zero on every
    /// feature; pairs touching a degenerate (zero-area) normal are skipped
    /// and excluded from the turning-angle averages.
    pub fn compute(mesh: &Mesh) -> Self {
        if mesh.is_empty() {
            return Self::default();
        }

        let mut angle_sum = 0.0;
        let mut angle_sq_sum = 0.0;
        let mut pair_count = 0usize;
        for pair in mesh.triangles.windows(2) {
            let (Some(a), Some(b)) = (pair[0].face_normal(), pair[1].face_normal()) else {
                continue;
            };
            let angle = a.dot(&b).clamp(-1.0, 1.0).acos();
            angle_sum += angle;
            angle_sq_sum += angle * angle;
            pair_count += 1;
        }
        let (normal_roughness, curvature) = if pair_count > 0 {
            let n = pair_count as f64;
            (angle_sum / n, angle_sq_sum / n)
        } else {
            (0.0, 0.0)
        };

        let corner_count = mesh.vertex_count() as f64;
        let mean_z: f64 = mesh.vertices().map(|v| v.z).sum::<f64>() / corner_count;
        let var_z: f64 = mesh
            .vertices()
            .map(|v| (v.z - mean_z) * (v.z - mean_z))
            .sum::<f64>()
            / corner_count;
        let height_variation = var_z.sqrt();

        let edge_density = mesh
            .triangles
            .iter()
            .map(|t| t.perimeter())
            .sum::<f64>()
            / mesh.triangle_count() as f64;

        Self {
            normal_roughness,
            height_variation,
            curvature,
            edge_density,
        }
    }

    /// Weighted composite score used for the crown/root decision.
    pub fn composite(&self) -> f64 {
        W_NORMAL * self.normal_roughness
            + W_HEIGHT * self.height_variation
            + W_CURVATURE * self.curvature
            + W_EDGE * self.edge_density
    }
}

/// Structured record of one crown/root decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Classification {
    pub first: RoughnessProfile,
    pub second: RoughnessProfile,
    pub first_score: f64,
    pub second_score: f64,
    /// True when the first argument won the crown label outright; false
    /// on the swap branch.
    pub crown_was_first: bool,
}

impl Classification {
    pub fn crown_score(&self) -> f64 {
        if self.crown_was_first {
            self.first_score
        } else {
            self.second_score
        }
    }

    pub fn root_score(&self) -> f64 {
        if self.crown_was_first {
            self.second_score
        } else {
            self.first_score
        }
    }
}

/// The two partitioned meshes re-ordered into anatomical roles.
#[derive(Debug, Clone)]
pub struct LabeledParts {
    pub crown: Mesh,
    pub root: Mesh,
    pub classification: Classification,
}

/// Assign crown/root labels to two partitioned parts.
///
/// The first part is the crown only when its composite score beats the
/// second's by more than [`CLASSIFY_THRESHOLD`]; a gap inside the
/// threshold band (including zero and negative gaps) takes the swap
/// branch and crowns the second part. The asymmetry is deliberate and
/// matched to the tuned threshold.
pub fn classify_parts(first: Mesh, second: Mesh) -> LabeledParts {
    let first_profile = RoughnessProfile::compute(&first);
    let second_profile = RoughnessProfile::compute(&second);
    let first_score = first_profile.composite();
    let second_score = second_profile.composite();

    let crown_was_first = first_score - second_score > CLASSIFY_THRESHOLD;
    let classification = Classification {
        first: first_profile,
        second: second_profile,
        first_score,
        second_score,
        crown_was_first,
    };

    let (crown, root) = if crown_was_first {
        (first, second)
    } else {
        (second, first)
    };

    LabeledParts {
        crown,
        root,
        classification,
    }
}
