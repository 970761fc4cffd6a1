// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch segmentation over scan folders

pub mod report;
pub mod runner;

pub use report::{BatchReport, Reporter, ScanError, ScanOutcome};
pub use runner::{discover_scans, mesh_fingerprint, process_scan, run};
