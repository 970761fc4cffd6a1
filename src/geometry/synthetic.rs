// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Procedural scan stand-ins for tests, benches, and demos

use super::{Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Axis-aligned unit cube over `[0, 1]^3`, 12 triangles.
pub fn unit_cube() -> Mesh {
    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];

    let faces: [[usize; 3]; 12] = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    let mut mesh = Mesh::with_capacity(faces.len());
    for [a, b, c] in faces {
        mesh.push(Triangle::new(positions[a], positions[b], positions[c]));
    }
    mesh
}

/// Lat-long ellipsoid with the given semi-axes along x, y, z.
///
/// Pole rows collapse one corner of each quad, leaving degenerate
/// triangles there; the pipeline tolerates them by contract.
pub fn ellipsoid(semi_axes: Vector3<f64>, segments: u32) -> Mesh {
    let stacks = segments;
    let slices = segments;

    let point = |i: u32, j: u32| -> Point3<f64> {
        let phi = PI * i as f64 / stacks as f64;
        let theta = 2.0 * PI * j as f64 / slices as f64;
        Point3::new(
            semi_axes.x * phi.sin() * theta.cos(),
            semi_axes.y * phi.sin() * theta.sin(),
            semi_axes.z * phi.cos(),
        )
    };

    let mut mesh = Mesh::with_capacity((stacks * slices * 2) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let jn = (j + 1) % slices;
            let p00 = point(i, j);
            let p01 = point(i, jn);
            let p10 = point(i + 1, j);
            let p11 = point(i + 1, jn);
            mesh.push(Triangle::new(p00, p10, p01));
            mesh.push(Triangle::new(p10, p11, p01));
        }
    }
    mesh
}

/// Flat triangle fan in a horizontal plane: `segments` triangles around
/// `center`, all at the same Z.
pub fn disc(center: Point3<f64>, radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(segments as usize);
    for i in 0..segments {
        let a0 = 2.0 * PI * i as f64 / segments as f64;
        let a1 = 2.0 * PI * (i + 1) as f64 / segments as f64;
        mesh.push(Triangle::new(
            center,
            Point3::new(center.x + radius * a0.cos(), center.y + radius * a0.sin(), center.z),
            Point3::new(center.x + radius * a1.cos(), center.y + radius * a1.sin(), center.z),
        ));
    }
    mesh
}

/// Molar-like closed surface at millimeter scale: a smooth tapered root
/// below, a bulging crown with cusp bumps and seeded jitter above.
///
/// Identical seeds produce identical meshes.
pub fn molar(seed: u64) -> Mesh {
    molar_with_resolution(seed, 48, 36)
}

/// [`molar`] with explicit angular and vertical resolution.
pub fn molar_with_resolution(seed: u64, segments: u32, rings: u32) -> Mesh {
    const HEIGHT: f64 = 14.0;
    // Radius profile from root apex (t = 0) to the occlusal rim (t = 1).
    const PROFILE: [(f64, f64); 8] = [
        (0.00, 0.6),
        (0.18, 1.9),
        (0.36, 2.7),
        (0.55, 3.3),
        (0.70, 4.4),
        (0.84, 5.3),
        (0.94, 5.0),
        (1.00, 3.4),
    ];
    const CROWN_START: f64 = 0.65;

    let mut rng = StdRng::seed_from_u64(seed);

    let mut ring_points: Vec<Vec<Point3<f64>>> = Vec::with_capacity(rings as usize);
    for i in 1..=rings {
        let t = i as f64 / rings as f64;
        let z = HEIGHT * t;
        let base = profile_radius(&PROFILE, t);
        let crown = ((t - CROWN_START) / (1.0 - CROWN_START)).max(0.0);

        let mut ring = Vec::with_capacity(segments as usize);
        for j in 0..segments {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            let mut r = base + 0.45 * (2.0 * theta).cos().powi(2) * crown;
            let mut zj = z;
            if crown > 0.0 {
                r += 0.25 * crown * rng.gen_range(-1.0..1.0);
                zj += 0.12 * crown * rng.gen_range(-1.0..1.0);
            }
            ring.push(Point3::new(r * theta.cos(), r * theta.sin(), zj));
        }
        ring_points.push(ring);
    }

    let apex = Point3::new(0.0, 0.0, 0.0);
    // Central fossa: the occlusal cap dips below the rim.
    let fossa = Point3::new(0.0, 0.0, HEIGHT - 0.5);

    let mut mesh = Mesh::with_capacity((segments * 2 * rings) as usize);
    let first = &ring_points[0];
    for j in 0..segments as usize {
        let jn = (j + 1) % segments as usize;
        mesh.push(Triangle::new(apex, first[jn], first[j]));
    }
    for w in ring_points.windows(2) {
        let (lower, upper) = (&w[0], &w[1]);
        for j in 0..segments as usize {
            let jn = (j + 1) % segments as usize;
            mesh.push(Triangle::new(lower[j], lower[jn], upper[j]));
            mesh.push(Triangle::new(lower[jn], upper[jn], upper[j]));
        }
    }
    let last = &ring_points[rings as usize - 1];
    for j in 0..segments as usize {
        let jn = (j + 1) % segments as usize;
        mesh.push(Triangle::new(fossa, last[j], last[jn]));
    }
    mesh
}

fn profile_radius(profile: &[(f64, f64)], t: f64) -> f64 {
    for w in profile.windows(2) {
        let ((t0, r0), (t1, r1)) = (w[0], w[1]);
        if t <= t1 {
            let s = (t - t0) / (t1 - t0);
            return r0 + (r1 - r0) * s;
        }
    }
    profile[profile.len() - 1].1
}
