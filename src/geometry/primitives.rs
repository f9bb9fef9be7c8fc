// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Renderer-agnostic primitive solids and their triangle meshes
//!
//! Every primitive is expressed in its own frame with +Y as the vessel
//! axis. Round primitives and boxes are centered on their local origin;
//! a hemisphere sits on the XZ plane with its pole on +Y.

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default number of segments around a circle
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum segment count that still produces a closed ring
const MIN_SEGMENTS: u32 = 3;

/// Primitive solid with its dimensions in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitiveKind", content = "dimensions", rename_all = "camelCase")]
pub enum Primitive {
    /// Open-ended cylindrical shell
    Tube { radius: f64, height: f64 },
    /// Capped cylinder
    Cylinder { radius: f64, height: f64 },
    /// Capped cone with its apex on +Y
    Cone { radius: f64, height: f64 },
    Sphere { radius: f64 },
    /// Open dome, pole on +Y, rim on the XZ plane
    Hemisphere { radius: f64 },
    #[serde(rename = "box")]
    Cuboid { width: f64, height: f64, depth: f64 },
    /// Thin capped cylinder
    Disc { radius: f64, thickness: f64 },
    /// Reference line; produces no triangles
    Polyline { points: Vec<Point3<f64>> },
}

impl Primitive {
    pub fn tube(radius: f64, height: f64) -> Self {
        Self::Tube { radius, height }
    }

    pub fn cylinder(radius: f64, height: f64) -> Self {
        Self::Cylinder { radius, height }
    }

    pub fn cone(radius: f64, height: f64) -> Self {
        Self::Cone { radius, height }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    pub fn hemisphere(radius: f64) -> Self {
        Self::Hemisphere { radius }
    }

    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self::Cuboid {
            width,
            height,
            depth,
        }
    }

    pub fn disc(radius: f64, thickness: f64) -> Self {
        Self::Disc { radius, thickness }
    }

    /// Extent of the primitive along +Y
    pub fn height(&self) -> f64 {
        match self {
            Self::Tube { height, .. } | Self::Cylinder { height, .. } | Self::Cone { height, .. } => {
                *height
            }
            Self::Sphere { radius } => 2.0 * radius,
            Self::Hemisphere { radius } => *radius,
            Self::Cuboid { height, .. } => *height,
            Self::Disc { thickness, .. } => *thickness,
            Self::Polyline { points } => {
                let (min, max) = points
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                        (min.min(p.y), max.max(p.y))
                    });
                if points.is_empty() {
                    0.0
                } else {
                    max - min
                }
            }
        }
    }

    /// Whether the generated mesh bounds a volume
    pub fn is_closed(&self) -> bool {
        !matches!(
            self,
            Self::Tube { .. } | Self::Hemisphere { .. } | Self::Polyline { .. }
        )
    }

    pub fn to_mesh(&self, segments: u32) -> Mesh {
        let segments = segments.max(MIN_SEGMENTS);
        match self {
            Self::Tube { radius, height } => generate_tube_mesh(*radius, *height, segments),
            Self::Cylinder { radius, height } => generate_cylinder_mesh(*radius, *height, segments),
            Self::Cone { radius, height } => generate_cone_mesh(*radius, *height, segments),
            Self::Sphere { radius } => generate_sphere_mesh(*radius, segments),
            Self::Hemisphere { radius } => generate_hemisphere_mesh(*radius, segments),
            Self::Cuboid {
                width,
                height,
                depth,
            } => generate_box_mesh(*width, *height, *depth),
            Self::Disc { radius, thickness } => generate_cylinder_mesh(*radius, *thickness, segments),
            Self::Polyline { .. } => Mesh::new(),
        }
    }
}

/// Ring of `segments` vertices at height `y`, counterclockwise seen from -Y
fn add_ring(mesh: &mut Mesh, radius: f64, y: f64, segments: u32) -> Vec<usize> {
    (0..segments)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / segments as f64;
            let (sin, cos) = angle.sin_cos();
            mesh.add_vertex(Vertex::new(
                Point3::new(radius * cos, y, radius * sin),
                Vector3::new(cos, 0.0, sin),
            ))
        })
        .collect()
}

/// Side wall between a lower and an upper ring, normals pointing outward
fn add_band(mesh: &mut Mesh, lower: &[usize], upper: &[usize]) {
    let segments = lower.len();
    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_triangle(Triangle::new([lower[i], upper[i], lower[next]]));
        mesh.add_triangle(Triangle::new([upper[i], upper[next], lower[next]]));
    }
}

/// Fan from a ring to a vertex above it
fn add_fan_up(mesh: &mut Mesh, ring: &[usize], apex: usize) {
    let segments = ring.len();
    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_triangle(Triangle::new([ring[i], apex, ring[next]]));
    }
}

/// Fan from a ring to a vertex below (or level with) it
fn add_fan_down(mesh: &mut Mesh, ring: &[usize], apex: usize) {
    let segments = ring.len();
    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_triangle(Triangle::new([apex, ring[i], ring[next]]));
    }
}

fn generate_tube_mesh(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(2 * segments as usize, 2 * segments as usize);
    let bottom = add_ring(&mut mesh, radius, -height / 2.0, segments);
    let top = add_ring(&mut mesh, radius, height / 2.0, segments);
    add_band(&mut mesh, &bottom, &top);
    mesh
}

fn generate_cylinder_mesh(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(2 * segments as usize + 2, 4 * segments as usize);

    let bottom_center = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, -height / 2.0, 0.0),
        -Vector3::y(),
    ));
    let top_center = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, height / 2.0, 0.0),
        Vector3::y(),
    ));

    // Rim vertices are shared between caps and side to keep the mesh closed
    let bottom = add_ring(&mut mesh, radius, -height / 2.0, segments);
    let top = add_ring(&mut mesh, radius, height / 2.0, segments);

    add_fan_down(&mut mesh, &bottom, bottom_center);
    add_band(&mut mesh, &bottom, &top);
    add_fan_up(&mut mesh, &top, top_center);

    mesh.recompute_normals();
    mesh
}

fn generate_cone_mesh(radius: f64, height: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(segments as usize + 2, 2 * segments as usize);

    let bottom_center = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, -height / 2.0, 0.0),
        -Vector3::y(),
    ));
    let apex = mesh.add_vertex(Vertex::new(
        Point3::new(0.0, height / 2.0, 0.0),
        Vector3::y(),
    ));

    let bottom = add_ring(&mut mesh, radius, -height / 2.0, segments);
    add_fan_down(&mut mesh, &bottom, bottom_center);
    add_fan_up(&mut mesh, &bottom, apex);

    mesh.recompute_normals();
    mesh
}

/// Rings of a sphere from the north pole downward, excluding the poles.
///
/// `last_stack` bounds the rings generated: `stacks - 1` for a full sphere,
/// `stacks / 2` to stop at the equator.
fn add_latitude_rings(
    mesh: &mut Mesh,
    radius: f64,
    stacks: u32,
    last_stack: u32,
    segments: u32,
) -> Vec<Vec<usize>> {
    (1..=last_stack)
        .map(|i| {
            let phi = PI * i as f64 / stacks as f64;
            add_ring(mesh, radius * phi.sin(), radius * phi.cos(), segments)
        })
        .collect()
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let stacks = segments.max(2);

    let north = mesh.add_vertex(Vertex::new(Point3::new(0.0, radius, 0.0), Vector3::y()));
    let rings = add_latitude_rings(&mut mesh, radius, stacks, stacks - 1, segments);
    let south = mesh.add_vertex(Vertex::new(Point3::new(0.0, -radius, 0.0), -Vector3::y()));

    let (Some(first), Some(last)) = (rings.first(), rings.last()) else {
        return Mesh::new();
    };
    add_fan_up(&mut mesh, first, north);
    for pair in rings.windows(2) {
        add_band(&mut mesh, &pair[1], &pair[0]);
    }
    add_fan_down(&mut mesh, last, south);

    mesh.recompute_normals();
    mesh
}

fn generate_hemisphere_mesh(radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    // Even stack count so the last ring lands on the equator
    let stacks = (segments.max(2) + 1) & !1;

    let pole = mesh.add_vertex(Vertex::new(Point3::new(0.0, radius, 0.0), Vector3::y()));
    let rings = add_latitude_rings(&mut mesh, radius, stacks, stacks / 2, segments);

    let Some(first) = rings.first() else {
        return Mesh::new();
    };
    add_fan_up(&mut mesh, first, pole);
    for pair in rings.windows(2) {
        add_band(&mut mesh, &pair[1], &pair[0]);
    }

    mesh.recompute_normals();
    mesh
}

fn generate_box_mesh(width: f64, height: f64, depth: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);

    // Corner index bits: 1 = +X, 2 = +Y, 4 = +Z
    for corner in 0..8 {
        let sign = |bit: usize| if corner & bit != 0 { 0.5 } else { -0.5 };
        let position = Point3::new(sign(1) * width, sign(2) * height, sign(4) * depth);
        mesh.add_vertex(Vertex::new(position, position.coords.normalize()));
    }

    let faces: [[usize; 3]; 12] = [
        // -X
        [0, 4, 6],
        [0, 6, 2],
        // +X
        [1, 7, 5],
        [1, 3, 7],
        // -Y
        [0, 1, 5],
        [0, 5, 4],
        // +Y
        [2, 7, 3],
        [2, 6, 7],
        // -Z
        [0, 2, 3],
        [0, 3, 1],
        // +Z
        [4, 7, 6],
        [4, 5, 7],
    ];
    for indices in faces {
        mesh.add_triangle(Triangle::new(indices));
    }

    mesh
}
