// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Mesh validation utilities

use super::Mesh;
use std::collections::HashMap;

/// Edge representation for connectivity checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    fn new(v0: usize, v1: usize) -> Self {
        // Smaller index first for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

fn edge_counts(mesh: &Mesh) -> HashMap<Edge, u32> {
    let mut counts: HashMap<Edge, u32> = HashMap::new();

    for triangle in &mesh.triangles {
        let edges = [
            Edge::new(triangle.indices[0], triangle.indices[1]),
            Edge::new(triangle.indices[1], triangle.indices[2]),
            Edge::new(triangle.indices[2], triangle.indices[0]),
        ];

        for edge in edges {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }

    counts
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> bool {
    !mesh.triangles.is_empty() && edge_counts(mesh).values().all(|&count| count == 2)
}

/// Every index in range and no zero-area triangle
pub fn has_valid_triangles(mesh: &Mesh) -> bool {
    mesh.triangles.iter().all(|triangle| {
        if triangle.indices.iter().any(|&i| i >= mesh.vertices.len()) {
            return false;
        }
        let v0 = mesh.vertices[triangle.indices[0]].position;
        let v1 = mesh.vertices[triangle.indices[1]].position;
        let v2 = mesh.vertices[triangle.indices[2]].position;
        (v1 - v0).cross(&(v2 - v0)).norm() > 1e-14
    })
}

/// Mesh validation report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshValidation {
    pub is_manifold: bool,
    pub is_closed: bool,
    pub has_valid_triangles: bool,
    pub edge_count: usize,
    pub boundary_edge_count: usize,
}

pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let counts = edge_counts(mesh);
    MeshValidation {
        is_manifold: counts.values().all(|&count| count <= 2),
        is_closed: !counts.is_empty() && counts.values().all(|&count| count == 2),
        has_valid_triangles: has_valid_triangles(mesh),
        edge_count: counts.len(),
        boundary_edge_count: counts.values().filter(|&&count| count == 1).count(),
    }
}
