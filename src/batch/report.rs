// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch report generation (JSON and Markdown)

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One successfully segmented scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub scan: String,
    pub crown_triangles: usize,
    pub root_triangles: usize,
    pub dropped_triangles: usize,
    pub max_section_area: f64,
    pub crown_score: f64,
    pub root_score: f64,
    /// The sweep found no positive-area section and cut at the centroid.
    pub centroid_fallback: bool,
    pub time_ms: u64,
    /// SHA-256 of the crown part's sorted vertex bytes.
    pub crown_fingerprint: String,
    /// SHA-256 of the root part's sorted vertex bytes.
    pub root_fingerprint: String,
}

/// Error information for scans that failed to segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanError {
    pub scan: String,
    pub error: String,
}

/// Complete batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub timestamp: String,
    pub total_scans: usize,
    pub segmented: usize,
    pub failed: usize,
    pub outcomes: Vec<ScanOutcome>,
    pub errors: Vec<ScanError>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            total_scans: 0,
            segmented: 0,
            failed: 0,
            outcomes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_outcome(&mut self, outcome: ScanOutcome) {
        self.total_scans += 1;
        self.segmented += 1;
        self.outcomes.push(outcome);
    }

    pub fn add_error(&mut self, scan: String, error: String) {
        self.total_scans += 1;
        self.failed += 1;
        self.errors.push(ScanError { scan, error });
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_scans == 0 {
            0.0
        } else {
            (self.segmented as f64 / self.total_scans as f64) * 100.0
        }
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Report writer
pub struct Reporter;

impl Reporter {
    /// Write JSON report
    pub fn write_json(report: &BatchReport, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write Markdown report
    pub fn write_markdown(report: &BatchReport, path: &Path) -> Result<()> {
        let mut md = String::new();

        md.push_str(&format!(
            "# Coronal Segmentation Report ({})\n\n",
            Utc::now().format("%Y-%m-%d")
        ));

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Total Scans**: {}\n", report.total_scans));
        md.push_str(&format!(
            "- **Segmented**: {} ({:.1}%)\n",
            report.segmented,
            report.success_rate()
        ));
        md.push_str(&format!("- **Failed**: {}\n\n", report.failed));

        md.push_str("## Detailed Results\n\n");
        md.push_str(
            "| Scan | Crown △ | Root △ | Dropped | Max Area | Crown Score | Root Score | Time |\n",
        );
        md.push_str(
            "|------|---------|--------|---------|----------|-------------|------------|------|\n",
        );

        for outcome in &report.outcomes {
            let scan_name = Path::new(&outcome.scan)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| outcome.scan.clone());

            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.4} | {:.5} | {:.5} | {}ms |\n",
                scan_name,
                outcome.crown_triangles,
                outcome.root_triangles,
                outcome.dropped_triangles,
                outcome.max_section_area,
                outcome.crown_score,
                outcome.root_score,
                outcome.time_ms
            ));
        }

        let fallbacks: Vec<_> = report
            .outcomes
            .iter()
            .filter(|o| o.centroid_fallback)
            .collect();
        if !fallbacks.is_empty() {
            md.push_str("\n## Centroid Fallbacks\n\n");
            md.push_str("The sweep found no positive-area section for these scans:\n\n");
            for outcome in fallbacks {
                md.push_str(&format!("- ⚠️ **{}**\n", outcome.scan));
            }
        }

        if report.failed > 0 {
            md.push_str("\n## Failed Scans\n\n");
            for error in &report.errors {
                md.push_str(&format!("- ❌ **{}**\n", error.scan));
                md.push_str(&format!("  ```\n  {}\n  ```\n", error.error));
            }
        }

        md.push_str(&format!("\n---\n\n*Generated on {}*\n", report.timestamp));

        fs::write(path, md)?;
        Ok(())
    }
}
