// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Round-trip export/import tests

use anyhow::Result;
use std::fs::OpenOptions;
use tempfile::tempdir;
use vesselframe::geometry::Primitive;
use vesselframe::io::{export_solids_json, export_stl};
use vesselframe::{build_solid, Dimensions, ShapeKind, TessellationOptions, VesselAssembly};

#[test]
fn test_roundtrip_binary_stl() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("vessel.stl");
    let mesh = VesselAssembly::default().to_mesh(&TessellationOptions::default());

    export_stl(&mesh, &path)?;

    let mut file = OpenOptions::new().read(true).open(&path)?;
    let imported = stl_io::read_stl(&mut file)?;
    assert_eq!(imported.faces.len(), mesh.triangle_count());

    // 80-byte header, triangle count, 50 bytes per triangle
    let size = std::fs::metadata(&path)?.len();
    assert_eq!(size, 84 + 50 * mesh.triangle_count() as u64);

    Ok(())
}

#[test]
fn test_roundtrip_ascii_stl() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cube.ast");
    let mesh = Primitive::cuboid(1.0, 1.0, 1.0).to_mesh(4);

    export_stl(&mesh, &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("solid vessel"));
    assert_eq!(text.matches("facet normal").count(), 12);

    let mut file = OpenOptions::new().read(true).open(&path)?;
    let imported = stl_io::read_stl(&mut file)?;
    assert_eq!(imported.faces.len(), 12);
    assert_eq!(imported.vertices.len(), 8);

    Ok(())
}

#[test]
fn test_export_solid_descriptions() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("solids.json");
    let solids: Vec<_> = ShapeKind::ALL
        .into_iter()
        .map(|kind| build_solid(&Dimensions::defaults(kind)))
        .collect();

    export_solids_json(&solids, &path)?;

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let records = json.as_array().expect("array of solids");
    assert_eq!(records.len(), ShapeKind::ALL.len());
    assert_eq!(records[0]["shape"], "cube");
    assert_eq!(records[0]["parts"][0]["primitiveKind"], "box");
    assert_eq!(records[4]["parts"][0]["primitiveKind"], "hemisphere");

    Ok(())
}

#[test]
fn test_export_to_missing_directory_fails() {
    let mesh = Primitive::sphere(1.0).to_mesh(8);
    assert!(export_stl(&mesh, "/nonexistent/dir/sphere.stl").is_err());
}
