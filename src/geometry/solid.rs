// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Solid descriptions: ordered primitives with local transforms
//!
//! A component's local frame has its origin on the vessel axis at the
//! component's lowest point, with +Y pointing up. Its parts therefore span
//! `0..=height` along Y, which lets an assembly stack components by
//! cumulative height alone.

use super::primitives::{Primitive, DEFAULT_SEGMENTS};
use super::Mesh;
use crate::dimensions::Dimensions;
use crate::shape::{DimensionField, ShapeKind};
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Points sampled along a head's inner profile arc
pub const PROFILE_SAMPLES: usize = 100;

/// Fixed feet-with-floor-plate parts, in meters
pub mod feet {
    pub const FOOT_RADIUS: f64 = 0.010;
    pub const PLATE_WIDTH: f64 = 0.200;
    pub const PLATE_DEPTH: f64 = 0.200;
    pub const PLATE_THICKNESS: f64 = 0.010;
    pub const PAD_RADIUS: f64 = 0.005;
    pub const PAD_THICKNESS: f64 = 0.005;
}

/// How a part is meant to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartRole {
    /// Solid body of the component
    Body,
    /// Wireframe reference geometry such as an inner wall
    Reference,
    /// Line work drawn over the body
    Outline,
}

/// Primitive placed in the component's local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidPart {
    #[serde(flatten)]
    pub primitive: Primitive,
    pub position: Point3<f64>,
    /// XYZ Euler angles in radians
    pub rotation: Vector3<f64>,
    pub role: PartRole,
}

impl SolidPart {
    pub fn new(primitive: Primitive, position: Point3<f64>) -> Self {
        Self {
            primitive,
            position,
            rotation: Vector3::zeros(),
            role: PartRole::Body,
        }
    }

    pub fn rotated(mut self, rotation: Vector3<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_role(mut self, role: PartRole) -> Self {
        self.role = role;
        self
    }

    /// Local transform: rotate about the part origin, then translate
    pub fn transform(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position.coords)
            * Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous()
    }

    /// Mesh of this part in the component frame
    pub fn to_mesh(&self, segments: u32) -> Mesh {
        let mut mesh = self.primitive.to_mesh(segments);
        mesh.transform(&self.transform());
        mesh
    }
}

/// Which way a dished head faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeadOrientation {
    /// Dome on top, closing the upper end of a shell
    #[default]
    Up,
    /// Dome below, closing the lower end of a shell
    Down,
}

/// Renderer-agnostic description of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidDescription {
    pub shape: ShapeKind,
    /// Extent along the shared axis, used to stack components
    pub height: f64,
    pub parts: Vec<SolidPart>,
}

impl SolidDescription {
    /// Parts that form the body, excluding reference and outline geometry
    pub fn body_parts(&self) -> impl Iterator<Item = &SolidPart> {
        self.parts.iter().filter(|part| part.role == PartRole::Body)
    }

    /// Shift every part along the shared axis
    pub fn translated(&self, offset: f64) -> Self {
        let mut moved = self.clone();
        for part in &mut moved.parts {
            part.position.y += offset;
        }
        moved
    }

    /// Mesh of the parts selected by `options`
    pub fn to_mesh(&self, options: &TessellationOptions) -> Mesh {
        let mut mesh = Mesh::new();
        for part in self.parts.iter().filter(|part| options.includes(part.role)) {
            mesh.merge(&part.to_mesh(options.segments));
        }
        mesh
    }
}

/// Controls how solid descriptions become triangle meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TessellationOptions {
    pub segments: u32,
    pub include_reference: bool,
}

impl TessellationOptions {
    fn includes(&self, role: PartRole) -> bool {
        match role {
            PartRole::Body => true,
            PartRole::Reference => self.include_reference,
            PartRole::Outline => false,
        }
    }
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            include_reference: false,
        }
    }
}

/// Build the solid description for a validated dimension set
pub fn build_solid(dimensions: &Dimensions) -> SolidDescription {
    use DimensionField::*;

    match dimensions.kind() {
        ShapeKind::Cube => {
            let width = dimensions.length(Width);
            single(
                dimensions.kind(),
                width,
                Primitive::cuboid(width, width, width),
            )
        }
        ShapeKind::Cylinder => {
            let height = dimensions.length(Height);
            single(
                dimensions.kind(),
                height,
                Primitive::tube(dimensions.outer_radius(), height),
            )
        }
        ShapeKind::Cone => {
            let height = dimensions.length(Height);
            single(
                dimensions.kind(),
                height,
                Primitive::cone(dimensions.length(Radius), height),
            )
        }
        ShapeKind::Sphere => {
            let radius = dimensions.length(Radius);
            single(dimensions.kind(), 2.0 * radius, Primitive::sphere(radius))
        }
        ShapeKind::TorisphericalHead => build_head(dimensions, HeadOrientation::Up),
        ShapeKind::FeetWithFloorPlates => build_feet(dimensions.length(OutletHeight)),
    }
}

fn single(shape: ShapeKind, height: f64, primitive: Primitive) -> SolidDescription {
    SolidDescription {
        shape,
        height,
        parts: vec![SolidPart::new(primitive, Point3::new(0.0, height / 2.0, 0.0))],
    }
}

/// Torispherical head approximated by a hemispherical shell.
///
/// The outer dome is the body, the inner dome (offset inward by the sheet
/// thickness) is reference geometry, and an arc through the inner profile
/// is drawn as an outline. The brim is an open cylindrical skirt between
/// the dome rim and the component's open end, so the head meets the shell
/// without a gap in either orientation.
pub fn build_head(dimensions: &Dimensions, orientation: HeadOrientation) -> SolidDescription {
    let outer_radius = dimensions.outer_radius();
    let brim_height = dimensions.length(DimensionField::BrimHeight);
    let inner_radius = outer_radius - dimensions.length(DimensionField::SheetThickness);

    let (rim, rotation, skirt_base) = match orientation {
        HeadOrientation::Up => (brim_height, Vector3::zeros(), 0.0),
        HeadOrientation::Down => (outer_radius, Vector3::new(PI, 0.0, 0.0), outer_radius),
    };
    let rim_center = Point3::new(0.0, rim, 0.0);

    let profile = (0..=PROFILE_SAMPLES)
        .map(|i| {
            let angle = i as f64 / PROFILE_SAMPLES as f64 * PI;
            Point3::new(
                inner_radius * angle.cos(),
                inner_radius * angle.sin() - brim_height / 2.0,
                0.0,
            )
        })
        .collect();

    SolidDescription {
        shape: dimensions.kind(),
        height: outer_radius + brim_height,
        parts: vec![
            SolidPart::new(Primitive::hemisphere(outer_radius), rim_center).rotated(rotation),
            SolidPart::new(Primitive::hemisphere(inner_radius), rim_center)
                .rotated(rotation)
                .with_role(PartRole::Reference),
            SolidPart::new(Primitive::Polyline { points: profile }, rim_center)
                .rotated(rotation)
                .with_role(PartRole::Outline),
            SolidPart::new(
                Primitive::tube(outer_radius, brim_height),
                Point3::new(0.0, skirt_base + brim_height / 2.0, 0.0),
            ),
        ],
    }
}

/// Floor plate carried by four corner feet, each standing on a pad.
///
/// Only the feet length follows the outlet height; a zero outlet height
/// leaves the plate resting directly on the pads.
fn build_feet(outlet_height: f64) -> SolidDescription {
    use feet::*;

    let foot_base = PAD_THICKNESS;
    let plate_base = foot_base + outlet_height;
    let inset_x = PLATE_WIDTH / 2.0 - FOOT_RADIUS;
    let inset_z = PLATE_DEPTH / 2.0 - FOOT_RADIUS;
    let corners = [
        (-inset_x, -inset_z),
        (inset_x, -inset_z),
        (-inset_x, inset_z),
        (inset_x, inset_z),
    ];

    let mut parts = vec![SolidPart::new(
        Primitive::cuboid(PLATE_WIDTH, PLATE_THICKNESS, PLATE_DEPTH),
        Point3::new(0.0, plate_base + PLATE_THICKNESS / 2.0, 0.0),
    )];

    for (x, z) in corners {
        if outlet_height > 0.0 {
            parts.push(SolidPart::new(
                Primitive::cylinder(FOOT_RADIUS, outlet_height),
                Point3::new(x, foot_base + outlet_height / 2.0, z),
            ));
        }
        parts.push(SolidPart::new(
            Primitive::disc(PAD_RADIUS, PAD_THICKNESS),
            Point3::new(x, PAD_THICKNESS / 2.0, z),
        ));
    }

    SolidDescription {
        shape: ShapeKind::FeetWithFloorPlates,
        height: plate_base + PLATE_THICKNESS,
        parts,
    }
}
