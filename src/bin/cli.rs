// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coronal CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use coronal::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coronal")]
#[command(about = "Coronal - crown/root segmentation for dental surface scans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a scan into crown and root STL files
    Segment {
        /// Input STL scan
        input: PathBuf,

        /// Output directory for part files
        #[arg(short, long, default_value = "segmented")]
        out: PathBuf,

        /// Planes sampled by the section sweep
        #[arg(long)]
        samples: Option<usize>,

        /// Write the structured segmentation summary as JSON
        #[arg(long)]
        json: bool,

        /// Render a heatmap PNG per labeled part
        #[arg(long)]
        heatmaps: bool,
    },

    /// Segment every .stl scan under the given folders
    Batch {
        /// Scan folders or files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for parts and reports
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Worker threads (default: serial with progress bar)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Stop at the first failing scan
        #[arg(long)]
        fail_fast: bool,

        /// Render heatmap PNGs per labeled part
        #[arg(long)]
        heatmaps: bool,
    },

    /// Render crown/root heatmap images for one scan
    Heatmap {
        /// Input STL scan
        input: PathBuf,

        /// Output directory for PNGs
        #[arg(short, long, default_value = "segmented")]
        out: PathBuf,

        /// Color ramp (gray or thermal)
        #[arg(long, default_value = "gray")]
        style: String,

        /// Square image resolution in pixels
        #[arg(long, default_value = "500")]
        resolution: u32,
    },

    /// Generate a synthetic scan (cube, ellipsoid, molar)
    Gen {
        /// Shape name
        shape: String,

        /// Output STL path
        #[arg(short, long, default_value = "synthetic.stl")]
        out: PathBuf,

        /// Seed for jittered shapes
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print triangle count, bounds, and long axis of a scan
    Info {
        /// Input STL scan
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Segment {
            input,
            out,
            samples,
            json,
            heatmaps,
        } => {
            cli::segment_command(input, out, *samples, *json, *heatmaps, cli.verbose)?;
        }
        Commands::Batch {
            inputs,
            out,
            threads,
            fail_fast,
            heatmaps,
        } => {
            cli::batch_command(
                inputs,
                out.as_deref(),
                *threads,
                *fail_fast,
                *heatmaps,
                cli.verbose,
            )?;
        }
        Commands::Heatmap {
            input,
            out,
            style,
            resolution,
        } => {
            cli::heatmap_command(input, out, style, *resolution, cli.verbose)?;
        }
        Commands::Gen { shape, out, seed } => {
            cli::gen_command(shape, *seed, out, cli.verbose)?;
        }
        Commands::Info { input } => {
            cli::info_command(input)?;
        }
        Commands::Version => {
            println!("Coronal v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
