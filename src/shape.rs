// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Shape kinds and dimension field names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete component type; selects required fields and the volume formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "cube")]
    Cube,
    #[serde(rename = "cylinder")]
    Cylinder,
    #[serde(rename = "cone")]
    Cone,
    #[serde(rename = "sphere")]
    Sphere,
    #[serde(rename = "torispherical-head")]
    TorisphericalHead,
    #[serde(rename = "feetWithFloorPlates")]
    FeetWithFloorPlates,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cube,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::TorisphericalHead,
        ShapeKind::FeetWithFloorPlates,
    ];

    /// Wire name used by the transport layer
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Sphere => "sphere",
            Self::TorisphericalHead => "torispherical-head",
            Self::FeetWithFloorPlates => "feetWithFloorPlates",
        }
    }

    /// Look up a shape by wire name. Unknown names yield `None`, which the
    /// volume engine maps to a zero volume rather than an error.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Field groups that must be present, in validation order
    pub fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Cube => CUBE_REQUIREMENTS,
            Self::Cylinder => CYLINDER_REQUIREMENTS,
            Self::Cone => CONE_REQUIREMENTS,
            Self::Sphere => SPHERE_REQUIREMENTS,
            Self::TorisphericalHead => HEAD_REQUIREMENTS,
            Self::FeetWithFloorPlates => FEET_REQUIREMENTS,
        }
    }

    /// Fields accepted and validated when supplied, but never required
    pub fn optional_fields(self) -> &'static [DimensionField] {
        match self {
            Self::Cylinder => &[DimensionField::SheetThickness],
            _ => &[],
        }
    }

    /// Shapes whose wall thickness must stay below the outer radius
    pub fn is_walled(self) -> bool {
        matches!(self, Self::TorisphericalHead | Self::Cylinder)
    }
}

const CUBE_REQUIREMENTS: &[Requirement] = &[Requirement::positive(&[DimensionField::Width])];

const CYLINDER_REQUIREMENTS: &[Requirement] = &[
    Requirement::positive(&[DimensionField::OuterDiameter, DimensionField::Radius]),
    Requirement::positive(&[DimensionField::Height]),
];

const CONE_REQUIREMENTS: &[Requirement] = &[
    Requirement::positive(&[DimensionField::Radius]),
    Requirement::positive(&[DimensionField::Height]),
];

const SPHERE_REQUIREMENTS: &[Requirement] = &[Requirement::positive(&[DimensionField::Radius])];

const HEAD_REQUIREMENTS: &[Requirement] = &[
    Requirement::positive(&[DimensionField::OuterDiameter]),
    Requirement::positive(&[DimensionField::SheetThickness]),
    Requirement::positive(&[DimensionField::BrimHeight]),
];

const FEET_REQUIREMENTS: &[Requirement] =
    &[Requirement::non_negative(&[DimensionField::OutletHeight])];

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One required entry of a shape's dimension set.
///
/// `alternatives` lists interchangeable fields in order of preference: the
/// first one present satisfies the requirement.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub alternatives: &'static [DimensionField],
    pub allow_zero: bool,
}

impl Requirement {
    const fn positive(alternatives: &'static [DimensionField]) -> Self {
        Self {
            alternatives,
            allow_zero: false,
        }
    }

    const fn non_negative(alternatives: &'static [DimensionField]) -> Self {
        Self {
            alternatives,
            allow_zero: true,
        }
    }

    /// Name reported when none of the alternatives is supplied
    pub fn primary(&self) -> DimensionField {
        self.alternatives[0]
    }
}

/// Named length of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionField {
    Width,
    Height,
    Radius,
    OuterDiameter,
    SheetThickness,
    BrimHeight,
    OutletHeight,
}

impl DimensionField {
    pub const ALL: [DimensionField; 7] = [
        DimensionField::Width,
        DimensionField::Height,
        DimensionField::Radius,
        DimensionField::OuterDiameter,
        DimensionField::SheetThickness,
        DimensionField::BrimHeight,
        DimensionField::OutletHeight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Radius => "radius",
            Self::OuterDiameter => "outerDiameter",
            Self::SheetThickness => "sheetThickness",
            Self::BrimHeight => "brimHeight",
            Self::OutletHeight => "outletHeight",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for DimensionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
