// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL importer

use crate::error::SegmentError;
use crate::geometry::{Mesh, Triangle};
use nalgebra::Point3;
use std::fs::File;
use std::path::Path;

/// Load a triangulated surface from a binary or ASCII STL file.
///
/// `stl_io` returns an indexed mesh; the index is flattened straight back
/// into a triangle soup since nothing downstream shares vertices. An STL
/// with zero facets is rejected rather than handed to the axis estimator.
pub fn import_stl(path: impl AsRef<Path>) -> Result<Mesh, SegmentError> {
    let path = path.as_ref();
    let read_error = |source| SegmentError::MeshRead {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let stl = stl_io::read_stl(&mut file).map_err(read_error)?;

    let mut mesh = Mesh::with_capacity(stl.faces.len());
    for face in &stl.faces {
        let corner = |i: usize| {
            let v = &stl.vertices[face.vertices[i]];
            Point3::new(v[0] as f64, v[1] as f64, v[2] as f64)
        };
        mesh.push(Triangle::new(corner(0), corner(1), corner(2)));
    }

    if mesh.is_empty() {
        return Err(SegmentError::EmptyMesh);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::synthetic;
    use crate::io::export_stl;
    use tempfile::TempDir;

    #[test]
    fn test_import_round_trips_a_cube() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("cube.stl");
        export_stl(&synthetic::unit_cube(), &path)?;

        let mesh = import_stl(&path)?;
        assert_eq!(mesh.triangle_count(), 12);
        Ok(())
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = import_stl("no/such/scan.stl").unwrap_err();
        match err {
            SegmentError::MeshRead { path, .. } => {
                assert!(path.ends_with("scan.stl"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_stl_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.stl");
        std::fs::write(&path, "solid empty\nendsolid empty\n")?;

        let err = import_stl(&path).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyMesh));
        Ok(())
    }
}
