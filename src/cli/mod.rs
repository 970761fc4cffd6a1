// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for coronal

pub mod runner;

pub use runner::{
    batch_command, gen_command, heatmap_command, info_command, segment_command,
};
