// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL import and export

mod exporter;
mod importer;

pub use exporter::export_stl;
pub use importer::import_stl;
