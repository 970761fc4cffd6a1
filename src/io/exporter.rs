// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporter

use crate::error::SegmentError;
use crate::geometry::Mesh;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write a mesh as STL: binary for a `.stl` extension, ASCII otherwise.
///
/// Coordinates are narrowed to f32 at the boundary, which is the STL
/// format's own precision; re-importing the file reproduces the triangle
/// list at that precision.
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), SegmentError> {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == "stl") {
        export_stl_binary(mesh, path)
    } else {
        export_stl_ascii(mesh, path)
    }
    .map_err(|source| SegmentError::MeshWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn export_stl_binary(mesh: &Mesh, path: &Path) -> std::io::Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let normal = tri
                .face_normal()
                .map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .unwrap_or([0.0; 3]);
            let vertex =
                |i: usize| StlVertex::new(tri.vertices[i].coords.map(|c| c as f32).into());
            StlTriangle {
                normal: Normal::new(normal),
                vertices: [vertex(0), vertex(1), vertex(2)],
            }
        })
        .collect();

    let mut file = File::create(path)?;
    stl_io::write_stl(&mut file, triangles.iter())
}

fn export_stl_ascii(mesh: &Mesh, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "solid mesh")?;
    for tri in &mesh.triangles {
        let normal = tri.face_normal().unwrap_or_else(nalgebra::Vector3::zeros);
        writeln!(
            file,
            "  facet normal {} {} {}",
            normal.x as f32, normal.y as f32, normal.z as f32
        )?;
        writeln!(file, "    outer loop")?;
        for v in &tri.vertices {
            writeln!(
                file,
                "      vertex {} {} {}",
                v.x as f32, v.y as f32, v.z as f32
            )?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }
    writeln!(file, "endsolid mesh")?;

    Ok(())
}
