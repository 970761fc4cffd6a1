// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and the segmentation core

mod axis;
mod bbox;
mod heatmap;
mod mesh;
mod partition;
mod roughness;
mod section;
pub mod synthetic;

pub use axis::{estimate_long_axis, LongAxis};
pub use bbox::BoundingBox;
pub use heatmap::{planar_basis, project_heatmap, HeatmapField, HeatmapPoint};
pub use mesh::{Mesh, Triangle};
pub use partition::{split_mesh, Side, SplitParts};
pub use roughness::{
    classify_parts, Classification, LabeledParts, RoughnessProfile, CLASSIFY_THRESHOLD,
};
pub use section::{
    cross_section, scan_max_section, scan_max_section_with, section_area, CuttingPlane,
    SectionScan, SCAN_SAMPLES,
};
