// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Mesh and solid-description exporters

use crate::geometry::{Mesh, SolidDescription};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Export mesh to STL: binary for `.stl`, ASCII for any other extension
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let binary = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));

    if binary {
        export_stl_binary(mesh, path)?;
    } else {
        export_stl_ascii(mesh, path)?;
    }

    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        binary,
        "exported STL"
    );
    Ok(())
}

fn to_f32(v: &nalgebra::Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn export_stl_binary(mesh: &Mesh, path: &Path) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let [v0, v1, v2] = tri.indices.map(|i| mesh.vertices[i].position.coords);
            StlTriangle {
                normal: Normal::new(to_f32(&tri.face_normal(mesh))),
                vertices: [
                    StlVertex::new(to_f32(&v0)),
                    StlVertex::new(to_f32(&v1)),
                    StlVertex::new(to_f32(&v2)),
                ],
            }
        })
        .collect();

    let mut file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create STL file {}", path.display()))?,
    );
    stl_io::write_stl(&mut file, triangles.iter()).context("Failed to write STL file")?;
    file.flush().context("Failed to flush STL file")?;

    Ok(())
}

fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create STL file {}", path.display()))?,
    );

    writeln!(file, "solid vessel")?;
    for tri in &mesh.triangles {
        let normal = tri.face_normal(mesh);
        writeln!(file, "  facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(file, "    outer loop")?;
        for &index in &tri.indices {
            let p = mesh.vertices[index].position;
            writeln!(file, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }
    writeln!(file, "endsolid vessel")?;
    file.flush().context("Failed to flush STL file")?;

    Ok(())
}

/// Pretty JSON of solid descriptions, the record list renderers consume
pub fn solids_to_json(solids: &[SolidDescription]) -> Result<String> {
    serde_json::to_string_pretty(solids).context("Failed to serialize solid descriptions")
}

/// Write solid descriptions as JSON
pub fn export_solids_json(solids: &[SolidDescription], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = solids_to_json(solids)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write solid descriptions to {}", path.display()))?;
    info!(path = %path.display(), count = solids.len(), "exported solid descriptions");
    Ok(())
}
