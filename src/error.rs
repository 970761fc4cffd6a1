// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the segmentation pipeline

use crate::geometry::Side;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the segmentation pipeline.
///
/// Scan-level degeneracies (no valid section, per-sample hull failures)
/// are recovered inside the scanner and reported through
/// [`SectionScan`](crate::geometry::SectionScan) rather than as errors.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Mesh file is missing, unreadable, or not valid STL.
    #[error("failed to read mesh from {path}: {source}")]
    MeshRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mesh file could not be written.
    #[error("failed to write mesh to {path}: {source}")]
    MeshWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input mesh has zero triangles.
    #[error("mesh contains no triangles")]
    EmptyMesh,

    /// Vertex cloud has no spatial extent; the inertia tensor is null and
    /// the long axis is undefined.
    #[error("long axis undefined: vertex cloud has no spatial extent")]
    DegenerateAxis,

    /// The cutting plane left one side of the split without any whole
    /// triangle.
    #[error("cutting plane left the {0} part empty")]
    EmptyPart(Side),
}
