// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coronal
//!
//! Crown/root segmentation for scanned tooth surfaces. Finds the
//! principal elongation axis, locates the maximum cross-section along
//! it, splits the mesh at that plane, and labels the two parts by
//! geometric texture statistics.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;
pub mod render;

pub use config::PipelineConfig;
pub use error::SegmentError;
pub use geometry::{
    project_heatmap, Classification, CuttingPlane, HeatmapField, LongAxis, Mesh, RoughnessProfile,
    Triangle,
};
pub use io::{export_stl, import_stl};
pub use pipeline::{segment, segment_with, SegmentOptions, Segmentation};

/// Segment a scan straight from an STL file.
pub fn segment_file(path: &str) -> Result<Segmentation, SegmentError> {
    let mesh = import_stl(path)?;
    segment(&mesh)
}
