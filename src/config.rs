// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pipeline configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pipeline configuration, loaded from `coronal.toml` with `CORONAL_*`
/// environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Planes sampled by the section sweep.
    pub scan_samples: usize,
    /// Output directory for part files, heatmaps, and reports.
    pub output_dir: PathBuf,
    /// Worker threads for batch runs; `None` lets rayon decide, 1 runs
    /// serially.
    pub parallelism: Option<usize>,
    /// Write a heatmap PNG per labeled part.
    pub write_heatmaps: bool,
    /// Square heatmap resolution in pixels.
    pub heatmap_resolution: u32,
    /// Heatmap color ramp: "gray" or "thermal".
    pub heatmap_style: String,
    /// Stop a batch at the first failing scan.
    pub fail_fast: bool,
    /// Verbose console output.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scan_samples: crate::geometry::SCAN_SAMPLES,
            output_dir: PathBuf::from("segmented"),
            parallelism: None,
            write_heatmaps: false,
            heatmap_resolution: 500,
            heatmap_style: "gray".to_string(),
            fail_fast: false,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from("coronal.toml").exists() {
            Self::from_file("coronal.toml")?
        } else {
            Self::default()
        };

        if let Ok(samples) = std::env::var("CORONAL_SCAN_SAMPLES") {
            if let Ok(samples) = samples.parse() {
                config.scan_samples = samples;
            }
        }

        if let Ok(parallelism) = std::env::var("CORONAL_PARALLELISM") {
            config.parallelism = parallelism.parse().ok();
        }

        if let Ok(output_dir) = std::env::var("CORONAL_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(verbose) = std::env::var("CORONAL_VERBOSE") {
            config.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
