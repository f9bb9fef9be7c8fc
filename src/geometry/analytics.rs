// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Mesh analytics, used to cross-check analytic volumes against geometry

use super::mesh_utils::is_closed;
use super::Mesh;
use serde::{Deserialize, Serialize};

/// Geometry statistics of a tessellated mesh, lengths in meters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Enclosed volume in m³ (meaningful only for closed meshes)
    pub volume: f64,
    /// Total surface area in m²
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Vertex centroid [x, y, z]
    pub centroid: [f64; 3],
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub is_watertight: bool,
}

impl GeometryStats {
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
        }
    }

    pub fn height(&self) -> f64 {
        self.bbox[4] - self.bbox[1]
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    let bbox = mesh.bounding_box();
    if mesh.is_empty() || bbox.is_empty() {
        return GeometryStats::empty();
    }

    GeometryStats {
        volume: signed_volume(mesh).abs(),
        surface_area: surface_area(mesh),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        centroid: centroid(mesh),
        vertex_count: mesh.vertices.len(),
        triangle_count: mesh.triangles.len(),
        is_watertight: is_closed(mesh),
    }
}

/// Sum of signed tetrahedra against the origin.
///
/// Positive for closed meshes with outward winding.
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let v0 = &mesh.vertices[triangle.indices[0]].position;
            let v1 = &mesh.vertices[triangle.indices[1]].position;
            let v2 = &mesh.vertices[triangle.indices[2]].position;
            v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
        })
        .sum()
}

/// Total surface area
pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let v0 = &mesh.vertices[triangle.indices[0]].position;
            let v1 = &mesh.vertices[triangle.indices[1]].position;
            let v2 = &mesh.vertices[triangle.indices[2]].position;
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

fn centroid(mesh: &Mesh) -> [f64; 3] {
    let sum = mesh
        .vertices
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position.coords);
    let mean = sum / mesh.vertices.len() as f64;
    [mean.x, mean.y, mean.z]
}
