// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command implementations for the coronal CLI

use crate::batch::{self, BatchReport, Reporter};
use crate::config::PipelineConfig;
use crate::geometry::{estimate_long_axis, project_heatmap, synthetic, Mesh};
use crate::io::{export_stl, import_stl};
use crate::pipeline::{segment_with, ProgressEvent, SegmentOptions, Segmentation};
use crate::render::{render_heatmap_png, HeatmapStyle};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Segment one scan into crown and root part files.
pub fn segment_command(
    input: &Path,
    output_dir: &Path,
    samples: Option<usize>,
    json: bool,
    heatmaps: bool,
    verbose: bool,
) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let mut config = PipelineConfig::load()?;
    if let Some(samples) = samples {
        config.scan_samples = samples;
    }
    if heatmaps {
        config.write_heatmaps = true;
    }

    if verbose {
        println!("{} {}", "Segmenting:".bold(), input.display());
    }

    let mesh = import_stl(input)?;
    let options = SegmentOptions {
        samples: config.scan_samples,
    };

    let pb = progress_bar(config.scan_samples);
    let result = segment_with(&mesh, &options, &mut |event| match event {
        ProgressEvent::StageStarted(stage) => {
            pb.set_message(format!("{stage:?}"));
        }
        ProgressEvent::ScanSample { done, .. } => {
            pb.set_position(done as u64);
        }
    })?;
    pb.finish_and_clear();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;

    let stem = file_stem(input);
    let crown_path = output_dir.join(format!("{stem}_crown.stl"));
    let root_path = output_dir.join(format!("{stem}_root.stl"));
    export_stl(&result.crown, &crown_path)?;
    export_stl(&result.root, &root_path)?;

    if config.write_heatmaps {
        write_part_heatmaps(&result, &stem, output_dir, &config)?;
    }

    if json {
        let json_path = output_dir.join(format!("{stem}_segmentation.json"));
        let summary = serde_json::to_string_pretty(&result.summary())?;
        std::fs::write(&json_path, summary)?;
        if verbose {
            println!("  {} {}", "Summary:".bright_black(), json_path.display());
        }
    }

    print_segmentation_summary(&result, &crown_path, &root_path);

    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "scan".to_string())
}

fn write_part_heatmaps(
    result: &Segmentation,
    stem: &str,
    output_dir: &Path,
    config: &PipelineConfig,
) -> Result<()> {
    let style: HeatmapStyle = config.heatmap_style.parse()?;
    for (part, label) in [(&result.crown, "crown"), (&result.root, "root")] {
        let vertices: Vec<Point3<f64>> = part.vertices().copied().collect();
        let field = project_heatmap(&vertices, &result.plane.point, &result.axis.direction);
        let png = output_dir.join(format!("{stem}_{label}.png"));
        render_heatmap_png(&field, config.heatmap_resolution, style, &png)?;
    }
    Ok(())
}

fn print_segmentation_summary(result: &Segmentation, crown_path: &Path, root_path: &Path) {
    let c = &result.classification;

    println!("\n{}", "═".repeat(72).bright_black());
    println!("{}", "Segmentation Summary".bold());
    println!("{}", "═".repeat(72).bright_black());
    println!(
        "  {} {} triangles -> {}",
        "Crown:".bright_black(),
        result.crown.triangle_count().to_string().cyan(),
        crown_path.display()
    );
    println!(
        "  {} {} triangles -> {}",
        "Root:".bright_black(),
        result.root.triangle_count().to_string().cyan(),
        root_path.display()
    );
    println!(
        "  {} {}",
        "Dropped (straddling):".bright_black(),
        result.dropped.to_string().yellow()
    );
    println!(
        "  {} {:.4} ({} of {} samples degenerate)",
        "Max section area:".bright_black(),
        result.scan.max_area,
        result.scan.degenerate_samples,
        result.scan.samples
    );
    if result.scan.centroid_fallback {
        println!(
            "  {} {}",
            "Warning:".yellow().bold(),
            "no valid section found, cut at mesh centroid"
        );
    }
    println!(
        "  {} crown {:.5} vs root {:.5}{}",
        "Scores:".bright_black(),
        c.crown_score(),
        c.root_score(),
        if c.crown_was_first {
            ""
        } else {
            " (swap branch)"
        }
    );
    println!("{}", "═".repeat(72).bright_black());
}

/// Segment every scan under the given folders, accumulating a report.
pub fn batch_command(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    threads: Option<usize>,
    fail_fast: bool,
    heatmaps: bool,
    verbose: bool,
) -> Result<()> {
    let mut config = PipelineConfig::load()?;
    if let Some(dir) = output_dir {
        config.output_dir = dir.to_path_buf();
    }
    if let Some(threads) = threads {
        config.parallelism = Some(threads);
    }
    if fail_fast {
        config.fail_fast = true;
    }
    if heatmaps {
        config.write_heatmaps = true;
    }
    config.verbose = config.verbose || verbose;

    let scans = batch::discover_scans(inputs)?;
    if scans.is_empty() {
        bail!("No .stl scans found under the given paths");
    }
    if verbose {
        println!("Found {} scans", scans.len());
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output dir {:?}", config.output_dir))?;

    // Parallel runs delegate to the library runner; the serial default
    // keeps a per-scan progress bar.
    let report = if config.parallelism.is_some_and(|t| t > 1) && !config.fail_fast {
        batch::run(inputs, &config)?
    } else {
        let pb = progress_bar(scans.len());
        let mut report = BatchReport::new();
        for scan in &scans {
            pb.set_message(file_stem(scan));
            match batch::process_scan(scan, &config) {
                Ok(outcome) => report.add_outcome(outcome),
                Err(e) => {
                    if verbose {
                        eprintln!("{} {}: {e:#}", "Error".red(), scan.display());
                    }
                    report.add_error(scan.display().to_string(), format!("{e:#}"));
                    if config.fail_fast {
                        break;
                    }
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("Batch complete");

        Reporter::write_json(&report, &config.output_dir.join("latest.json"))?;
        Reporter::write_markdown(&report, &config.output_dir.join("report.md"))?;
        report
    };

    println!("\n{}", "═".repeat(72).bright_black());
    println!("{}", "Batch Summary".bold());
    println!("{}", "═".repeat(72).bright_black());
    println!(
        "  {} {}",
        "Total Scans:".bright_black(),
        report.total_scans.to_string().cyan()
    );
    println!(
        "  {} {} ({:.1}%)",
        "Segmented:".bright_black(),
        report.segmented.to_string().green(),
        report.success_rate()
    );
    println!(
        "  {} {}",
        "Failed:".bright_black(),
        if report.failed > 0 {
            report.failed.to_string().red()
        } else {
            report.failed.to_string().green()
        }
    );
    println!(
        "\n  {} {}",
        "JSON Report:".bright_black(),
        config
            .output_dir
            .join("latest.json")
            .display()
            .to_string()
            .cyan()
    );
    println!(
        "  {} {}",
        "Markdown Report:".bright_black(),
        config
            .output_dir
            .join("report.md")
            .display()
            .to_string()
            .cyan()
    );
    println!("{}", "═".repeat(72).bright_black());

    if report.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Segment a scan and render crown/root heatmap PNGs.
pub fn heatmap_command(
    input: &Path,
    output_dir: &Path,
    style: &str,
    resolution: u32,
    verbose: bool,
) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let mut config = PipelineConfig::load()?;
    config.heatmap_style = style.to_string();
    config.heatmap_resolution = resolution;

    let mesh = import_stl(input)?;
    let options = SegmentOptions {
        samples: config.scan_samples,
    };
    let result = segment_with(&mesh, &options, &mut |_| {})?;

    std::fs::create_dir_all(output_dir)?;
    let stem = file_stem(input);
    write_part_heatmaps(&result, &stem, output_dir, &config)?;

    if verbose {
        println!(
            "Rendered {stem}_crown.png and {stem}_root.png at {resolution}x{resolution} into {}",
            output_dir.display()
        );
    } else {
        println!("Heatmaps written to {}", output_dir.display());
    }
    Ok(())
}

/// Generate a synthetic scan for demos and testing.
pub fn gen_command(shape: &str, seed: u64, output: &Path, verbose: bool) -> Result<()> {
    let mesh: Mesh = match shape.to_lowercase().as_str() {
        "cube" => synthetic::unit_cube(),
        "ellipsoid" => synthetic::ellipsoid(Vector3::new(4.0, 3.0, 7.0), 32),
        "molar" => synthetic::molar(seed),
        other => bail!("Unknown shape: {} (expected cube, ellipsoid, or molar)", other),
    };

    export_stl(&mesh, output)?;
    if verbose {
        println!(
            "Wrote {} ({} triangles)",
            output.display(),
            mesh.triangle_count()
        );
    } else {
        println!("Wrote {}", output.display());
    }
    Ok(())
}

/// Print geometric facts about a scan without segmenting it.
pub fn info_command(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let mesh = import_stl(input)?;
    let bbox = mesh.bounding_box();
    let size = bbox.size();

    println!("{} {}", "Scan:".bold(), input.display());
    println!("  Triangles: {}", mesh.triangle_count());
    println!(
        "  Bounds: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
        bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
    );
    println!("  Size: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);

    match estimate_long_axis(&mesh) {
        Ok(axis) => {
            println!(
                "  Centroid: ({:.3}, {:.3}, {:.3})",
                axis.centroid.x, axis.centroid.y, axis.centroid.z
            );
            println!(
                "  Long axis: ({:.4}, {:.4}, {:.4}) (sign arbitrary)",
                axis.direction.x, axis.direction.y, axis.direction.z
            );
        }
        Err(e) => println!("  Long axis: {}", e.to_string().yellow()),
    }

    Ok(())
}
