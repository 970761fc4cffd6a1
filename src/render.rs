// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Heatmap rasterization to PNG
//!
//! Resamples the irregular (x, y, value) point cloud of a
//! [`HeatmapField`](crate::geometry::HeatmapField) onto a square grid by
//! splatting each point with a hat kernel, then maps the field through a
//! color ramp.

use crate::geometry::HeatmapField;
use anyhow::{bail, Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;
use std::str::FromStr;

/// Color ramp applied to the normalized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapStyle {
    Gray,
    Thermal,
}

impl FromStr for HeatmapStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gray" | "grey" => Ok(HeatmapStyle::Gray),
            "thermal" => Ok(HeatmapStyle::Thermal),
            other => bail!("Unknown heatmap style: {} (expected gray or thermal)", other),
        }
    }
}

impl HeatmapStyle {
    fn color(&self, value: f64) -> Rgb<u8> {
        match self {
            HeatmapStyle::Gray => {
                let shade = (value * 255.0).clamp(0.0, 255.0) as u8;
                Rgb([shade, shade, shade])
            }
            HeatmapStyle::Thermal => thermal_ramp(value),
        }
    }
}

// Blue through pale yellow to red, low to high.
fn thermal_ramp(value: f64) -> Rgb<u8> {
    const LOW: [f64; 3] = [69.0, 117.0, 180.0];
    const MID: [f64; 3] = [255.0, 255.0, 191.0];
    const HIGH: [f64; 3] = [215.0, 48.0, 39.0];

    let v = value.clamp(0.0, 1.0);
    let (a, b, t) = if v < 0.5 {
        (LOW, MID, v * 2.0)
    } else {
        (MID, HIGH, (v - 0.5) * 2.0)
    };
    Rgb([
        (a[0] + (b[0] - a[0]) * t) as u8,
        (a[1] + (b[1] - a[1]) * t) as u8,
        (a[2] + (b[2] - a[2]) * t) as u8,
    ])
}

/// Rasterize a heatmap field to a square PNG of the given resolution.
pub fn render_heatmap_png(
    field: &HeatmapField,
    resolution: u32,
    style: HeatmapStyle,
    path: &Path,
) -> Result<()> {
    if resolution == 0 {
        bail!("Heatmap resolution must be at least 1 pixel");
    }
    let Some((min_x, min_y, max_x, max_y)) = field.bounds() else {
        bail!("Heatmap field contains no points to render");
    };

    let span_x = (max_x - min_x).max(1e-9);
    let span_y = (max_y - min_y).max(1e-9);
    let res = resolution as usize;

    // Kernel radius scales with the grid so sparse clouds still close up.
    let radius = ((resolution as f64) / 48.0).ceil().max(1.0) as i64;

    let mut weighted = vec![0.0f64; res * res];
    let mut weights = vec![0.0f64; res * res];

    for point in &field.points {
        let cx = (point.x - min_x) / span_x * (res - 1) as f64;
        let cy = (max_y - point.y) / span_y * (res - 1) as f64;

        let x0 = (cx as i64 - radius).max(0);
        let x1 = (cx as i64 + radius).min(res as i64 - 1);
        let y0 = (cy as i64 - radius).max(0);
        let y1 = (cy as i64 + radius).min(res as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let w = 1.0 - dist / (radius as f64 + 1.0);
                if w <= 0.0 {
                    continue;
                }
                let idx = y as usize * res + x as usize;
                weighted[idx] += w * point.value;
                weights[idx] += w;
            }
        }
    }

    let mut image = RgbImage::from_pixel(resolution, resolution, Rgb([15, 18, 26]));
    for y in 0..res {
        for x in 0..res {
            let idx = y * res + x;
            if weights[idx] > 0.0 {
                let value = weighted[idx] / weights[idx];
                image.put_pixel(x as u32, y as u32, style.color(value));
            }
        }
    }

    image
        .save(path)
        .with_context(|| format!("Failed to save heatmap PNG to {}", path.display()))?;

    Ok(())
}
