// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segmentation pipeline entry point

use crate::error::SegmentError;
use crate::geometry::{
    classify_parts, estimate_long_axis, scan_max_section_with, split_mesh, Classification,
    CuttingPlane, LongAxis, Mesh, SectionScan, Side, SCAN_SAMPLES,
};
use serde::{Deserialize, Serialize};

/// Tunables for one segmentation run.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions {
    /// Planes sampled by the section sweep.
    pub samples: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            samples: SCAN_SAMPLES,
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Axis,
    Scan,
    Partition,
    Classify,
}

/// Progress events fired at true stage boundaries, never simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    StageStarted(Stage),
    /// One event per plane evaluated by the sweep.
    ScanSample { done: usize, total: usize },
}

/// Serializable record of what the sweep found.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScanSummary {
    pub max_area: f64,
    pub samples: usize,
    pub degenerate_samples: usize,
    /// True when no sample produced a positive area and the plane fell
    /// back to the mesh centroid.
    pub centroid_fallback: bool,
}

impl From<&SectionScan> for ScanSummary {
    fn from(scan: &SectionScan) -> Self {
        Self {
            max_area: scan.area,
            samples: scan.samples,
            degenerate_samples: scan.degenerate_samples,
            centroid_fallback: scan.used_centroid_fallback(),
        }
    }
}

/// Full result of segmenting one scan.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub crown: Mesh,
    pub root: Mesh,
    pub axis: LongAxis,
    pub plane: CuttingPlane,
    pub scan: ScanSummary,
    pub classification: Classification,
    /// Triangles straddling the cutting plane, discarded by the split.
    pub dropped: usize,
}

/// Flat, serializable view of a [`Segmentation`] for reports and `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationSummary {
    pub crown_triangles: usize,
    pub root_triangles: usize,
    pub dropped_triangles: usize,
    pub axis: LongAxis,
    pub plane: CuttingPlane,
    pub scan: ScanSummary,
    pub classification: Classification,
}

impl Segmentation {
    pub fn summary(&self) -> SegmentationSummary {
        SegmentationSummary {
            crown_triangles: self.crown.triangle_count(),
            root_triangles: self.root.triangle_count(),
            dropped_triangles: self.dropped,
            axis: self.axis,
            plane: self.plane,
            scan: self.scan,
            classification: self.classification,
        }
    }
}

/// Segment a mesh with default options and no progress reporting.
pub fn segment(mesh: &Mesh) -> Result<Segmentation, SegmentError> {
    segment_with(mesh, &SegmentOptions::default(), &mut |_| {})
}

/// Segment a mesh: long axis, maximum cross-section, split, classify.
///
/// The sweep's centroid fallback is not fatal by itself; the run only
/// fails if the resulting cut leaves one side without a whole triangle.
/// Identical inputs produce identical outputs; the interactive and batch
/// flows both call this one entry point.
pub fn segment_with(
    mesh: &Mesh,
    options: &SegmentOptions,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> Result<Segmentation, SegmentError> {
    on_progress(ProgressEvent::StageStarted(Stage::Axis));
    let axis = estimate_long_axis(mesh)?;

    on_progress(ProgressEvent::StageStarted(Stage::Scan));
    let scan = scan_max_section_with(mesh, &axis, options.samples, &mut |done, total| {
        on_progress(ProgressEvent::ScanSample { done, total });
    });
    let summary = ScanSummary::from(&scan);
    let plane = scan.plane;

    on_progress(ProgressEvent::StageStarted(Stage::Partition));
    let parts = split_mesh(mesh, &plane);
    if parts.above.is_empty() {
        return Err(SegmentError::EmptyPart(Side::Above));
    }
    if parts.below.is_empty() {
        return Err(SegmentError::EmptyPart(Side::Below));
    }
    let dropped = parts.dropped;

    on_progress(ProgressEvent::StageStarted(Stage::Classify));
    let labeled = classify_parts(parts.above, parts.below);

    Ok(Segmentation {
        crown: labeled.crown,
        root: labeled.root,
        axis,
        plane,
        scan: summary,
        classification: labeled.classification,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::synthetic;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_empty_mesh_fails_before_scanning() {
        let err = segment(&Mesh::new()).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyMesh));
    }

    #[test]
    fn test_molar_splits_into_two_parts() {
        let mesh = synthetic::molar(42);
        let result = segment(&mesh).unwrap();

        assert!(!result.crown.is_empty());
        assert!(!result.root.is_empty());
        assert!(
            result.crown.triangle_count() + result.root.triangle_count()
                <= mesh.triangle_count()
        );
        assert!(!result.scan.centroid_fallback);
        assert!(result.scan.max_area > 0.0);
    }

    #[test]
    fn test_progress_events_arrive_in_stage_order() {
        let mesh = synthetic::molar(42);
        let options = SegmentOptions { samples: 25 };

        let mut events = Vec::new();
        segment_with(&mesh, &options, &mut |e| events.push(e)).unwrap();

        assert_eq!(events[0], ProgressEvent::StageStarted(Stage::Axis));
        assert_eq!(events[1], ProgressEvent::StageStarted(Stage::Scan));
        let samples: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::ScanSample { .. }))
            .collect();
        assert_eq!(samples.len(), 25);
        assert_eq!(
            events[events.len() - 2],
            ProgressEvent::StageStarted(Stage::Partition)
        );
        assert_eq!(
            events[events.len() - 1],
            ProgressEvent::StageStarted(Stage::Classify)
        );
    }

    #[test]
    fn test_segment_is_deterministic() {
        let mesh = synthetic::molar(7);
        let a = segment(&mesh).unwrap();
        let b = segment(&mesh).unwrap();

        assert_eq!(a.crown, b.crown);
        assert_eq!(a.root, b.root);
        assert_relative_eq!(
            a.classification.crown_score(),
            b.classification.crown_score(),
            epsilon = 0.0
        );
        assert_relative_eq!(a.scan.max_area, b.scan.max_area, epsilon = 0.0);
    }

    #[test]
    fn test_flat_scan_surfaces_empty_part() {
        // Every vertex shares one Z plane, so the sweep falls back to the
        // centroid and the cut leaves the above side empty.
        let disc = synthetic::disc(Point3::new(0.0, 0.0, 2.0), 3.0, 12);
        let err = segment(&disc).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyPart(_)));
    }

    #[test]
    fn test_summary_reflects_parts() {
        let mesh = synthetic::molar(11);
        let result = segment(&mesh).unwrap();
        let summary = result.summary();

        assert_eq!(summary.crown_triangles, result.crown.triangle_count());
        assert_eq!(summary.root_triangles, result.root.triangle_count());
        assert_eq!(summary.dropped_triangles, result.dropped);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("crown_triangles"));
    }
}
