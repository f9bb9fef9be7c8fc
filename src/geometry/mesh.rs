// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        self.position = matrix.transform_point(&self.position);
        // Normals go through the inverse transpose
        let normal_matrix = matrix
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or(*matrix);
        let normal = normal_matrix.transform_vector(&self.normal);
        self.normal = normal.try_normalize(1e-12).unwrap_or(normal);
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// Unit normal from the triangle's winding
    pub fn face_normal(&self, mesh: &Mesh) -> Vector3<f64> {
        let v0 = mesh.vertices[self.indices[0]].position;
        let v1 = mesh.vertices[self.indices[1]].position;
        let v2 = mesh.vertices[self.indices[2]].position;
        (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Transform all vertices by a matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            vertex.transform(matrix);
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append another mesh without any boolean processing
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);

        for triangle in &other.triangles {
            self.triangles.push(Triangle::new([
                triangle.indices[0] + offset,
                triangle.indices[1] + offset,
                triangle.indices[2] + offset,
            ]));
        }
    }

    /// Recompute vertex normals as area-weighted averages of face normals
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() || self.triangles.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let v0 = &self.vertices[triangle.indices[0]];
            let v1 = &self.vertices[triangle.indices[1]];
            let v2 = &self.vertices[triangle.indices[2]];

            // Cross product length is twice the area, which gives the weighting
            let face_normal = (v1.position - v0.position).cross(&(v2.position - v0.position));
            if face_normal.norm() > 1e-12 {
                for &idx in &triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(normal_sums) {
            // Unreferenced or degenerate vertices keep their original normal
            if let Some(normal) = sum.try_normalize(1e-12) {
                vertex.normal = normal;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use approx::assert_relative_eq;

    #[test]
    fn test_recompute_normals_cylinder() {
        let mut mesh = Primitive::cylinder(0.5, 1.0).to_mesh(32);
        mesh.recompute_normals();

        assert!(mesh.vertices.iter().all(|v| {
            let norm = v.normal.norm();
            norm > 0.9 && norm < 1.1
        }));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = Primitive::cuboid(1.0, 1.0, 1.0).to_mesh(8);
        let other = Primitive::cuboid(2.0, 2.0, 2.0).to_mesh(8);
        mesh.merge(&other);

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 24);
        assert!(mesh.triangles[12..].iter().all(|t| t.indices.iter().all(|&i| i >= 8)));
    }

    #[test]
    fn test_transform_moves_vertices() {
        let mut mesh = Primitive::cuboid(1.0, 1.0, 1.0).to_mesh(8);
        mesh.transform(&Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0)));
        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.min.y, 1.5);
        assert_relative_eq!(bbox.max.y, 2.5);
    }

    #[test]
    fn test_face_normal_points_outward() {
        let mesh = Primitive::cuboid(1.0, 1.0, 1.0).to_mesh(8);
        // Triangle 6 belongs to the +Y face
        let normal = mesh.triangles[6].face_normal(&mesh);
        assert_relative_eq!(normal, Vector3::y(), epsilon = 1e-12);
    }
}
