// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unattended batch segmentation over scan folders

use super::report::{BatchReport, Reporter, ScanOutcome};
use crate::config::PipelineConfig;
use crate::geometry::{project_heatmap, Mesh};
use crate::io::{export_stl, import_stl};
use crate::pipeline::{segment_with, SegmentOptions};
use crate::render::{render_heatmap_png, HeatmapStyle};
use anyhow::{Context, Result};
use nalgebra::Point3;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Discover `.stl` scans under the given paths, recursing into folders.
/// The list is sorted so batch order never depends on directory layout.
pub fn discover_scans(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut scans = Vec::new();

    for input in inputs {
        if input.is_file() && has_stl_extension(input) {
            scans.push(input.clone());
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && has_stl_extension(path) {
                    scans.push(path.to_path_buf());
                }
            }
        }
    }

    scans.sort();
    Ok(scans)
}

fn has_stl_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"))
}

/// SHA-256 over a mesh's sorted corner bytes. Sorting makes the
/// fingerprint insensitive to triangle order, so identical geometry
/// always hashes identically.
pub fn mesh_fingerprint(mesh: &Mesh) -> String {
    let mut positions: Vec<(f64, f64, f64)> =
        mesh.vertices().map(|v| (v.x, v.y, v.z)).collect();
    positions.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.total_cmp(&b.2))
    });

    let mut hasher = Sha256::new();
    for (x, y, z) in positions {
        hasher.update(x.to_le_bytes());
        hasher.update(y.to_le_bytes());
        hasher.update(z.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Segment one scan and write its artifacts into the output directory.
pub fn process_scan(scan: &Path, config: &PipelineConfig) -> Result<ScanOutcome> {
    let start = Instant::now();

    let mesh = import_stl(scan)?;
    let options = SegmentOptions {
        samples: config.scan_samples,
    };
    let result = segment_with(&mesh, &options, &mut |_| {})?;

    let stem = scan
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "scan".to_string());

    let crown_path = config.output_dir.join(format!("{stem}_crown.stl"));
    let root_path = config.output_dir.join(format!("{stem}_root.stl"));
    export_stl(&result.crown, &crown_path)?;
    export_stl(&result.root, &root_path)?;

    if config.write_heatmaps {
        let style: HeatmapStyle = config.heatmap_style.parse()?;
        for (part, label) in [(&result.crown, "crown"), (&result.root, "root")] {
            let vertices: Vec<Point3<f64>> = part.vertices().copied().collect();
            let field = project_heatmap(&vertices, &result.plane.point, &result.axis.direction);
            let png = config.output_dir.join(format!("{stem}_{label}.png"));
            render_heatmap_png(&field, config.heatmap_resolution, style, &png)
                .with_context(|| format!("Failed to render {label} heatmap for {stem}"))?;
        }
    }

    Ok(ScanOutcome {
        scan: scan.display().to_string(),
        crown_triangles: result.crown.triangle_count(),
        root_triangles: result.root.triangle_count(),
        dropped_triangles: result.dropped,
        max_section_area: result.scan.max_area,
        crown_score: result.classification.crown_score(),
        root_score: result.classification.root_score(),
        centroid_fallback: result.scan.centroid_fallback,
        time_ms: start.elapsed().as_millis() as u64,
        crown_fingerprint: mesh_fingerprint(&result.crown),
        root_fingerprint: mesh_fingerprint(&result.root),
    })
}

/// Run the batch flow: discover, segment each scan in isolation,
/// accumulate a report, write `latest.json` and `report.md`.
///
/// One scan's failure lands in the report and never aborts the rest,
/// unless `fail_fast` opts into a serial short-circuit run.
pub fn run(inputs: &[PathBuf], config: &PipelineConfig) -> Result<BatchReport> {
    let scans = discover_scans(inputs)?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output dir {:?}", config.output_dir))?;

    let mut report = BatchReport::new();

    if config.fail_fast {
        for scan in &scans {
            match process_scan(scan, config) {
                Ok(outcome) => report.add_outcome(outcome),
                Err(e) => {
                    report.add_error(scan.display().to_string(), format!("{e:#}"));
                    break;
                }
            }
        }
    } else {
        let results: Vec<(PathBuf, Result<ScanOutcome>)> = match config.parallelism {
            Some(1) => scans
                .iter()
                .map(|scan| (scan.clone(), process_scan(scan, config)))
                .collect(),
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build batch thread pool")?
                .install(|| {
                    scans
                        .par_iter()
                        .map(|scan| (scan.clone(), process_scan(scan, config)))
                        .collect()
                }),
            None => scans
                .par_iter()
                .map(|scan| (scan.clone(), process_scan(scan, config)))
                .collect(),
        };

        for (scan, result) in results {
            match result {
                Ok(outcome) => report.add_outcome(outcome),
                Err(e) => report.add_error(scan.display().to_string(), format!("{e:#}")),
            }
        }
    }

    Reporter::write_json(&report, &config.output_dir.join("latest.json"))?;
    Reporter::write_markdown(&report, &config.output_dir.join("report.md"))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::synthetic;
    use tempfile::TempDir;

    #[test]
    fn test_discovery_is_sorted_and_filtered() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::create_dir(dir.path().join("nested"))?;
        export_stl(&synthetic::molar(1), &dir.path().join("b.stl"))?;
        export_stl(&synthetic::molar(2), &dir.path().join("nested/a.STL"))?;
        std::fs::write(dir.path().join("notes.txt"), "not a scan")?;

        let scans = discover_scans(&[dir.path().to_path_buf()])?;
        assert_eq!(scans.len(), 2);
        assert!(scans[0].ends_with("b.stl") || scans[1].ends_with("b.stl"));
        Ok(())
    }

    #[test]
    fn test_fingerprint_ignores_triangle_order() {
        let mesh = synthetic::unit_cube();
        let mut shuffled = mesh.clone();
        shuffled.triangles.reverse();
        assert_eq!(mesh_fingerprint(&mesh), mesh_fingerprint(&shuffled));

        let other = synthetic::molar(1);
        assert_ne!(mesh_fingerprint(&mesh), mesh_fingerprint(&other));
    }

    #[test]
    fn test_process_scan_writes_both_parts() -> Result<()> {
        let dir = TempDir::new()?;
        let scan = dir.path().join("tooth.stl");
        export_stl(&synthetic::molar(9), &scan)?;

        let mut config = PipelineConfig::default();
        config.output_dir = dir.path().join("out");
        std::fs::create_dir_all(&config.output_dir)?;

        let outcome = process_scan(&scan, &config)?;
        assert!(config.output_dir.join("tooth_crown.stl").exists());
        assert!(config.output_dir.join("tooth_root.stl").exists());
        assert!(outcome.crown_triangles > 0);
        assert!(outcome.root_triangles > 0);
        Ok(())
    }
}
