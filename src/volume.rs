// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Analytic volume formulas
//!
//! Known limitations, kept deliberately so the reported numbers stay
//! compatible with existing consumers:
//! - a cylinder reports the volume enclosed by its outer surface, with no
//!   wall-thickness deduction;
//! - a torispherical head reports a hemisphere of the outer radius, ignoring
//!   brim height and sheet thickness even though the solid uses both;
//! - feet with floor plates, and any shape name that is not recognized,
//!   report zero instead of failing.

use crate::dimensions::Dimensions;
use crate::shape::{DimensionField, ShapeKind};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Enclosed volume of one component, in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub shape: ShapeKind,
    pub volume: f64,
}

impl VolumeResult {
    pub fn of(dimensions: &Dimensions) -> Self {
        Self {
            shape: dimensions.kind(),
            volume: volume(dimensions),
        }
    }
}

/// Volume in m³ of a validated dimension set
pub fn volume(dimensions: &Dimensions) -> f64 {
    use DimensionField::*;

    let volume = match dimensions.kind() {
        ShapeKind::Cube => dimensions.length(Width).powi(3),
        ShapeKind::Cylinder => PI * dimensions.outer_radius().powi(2) * dimensions.length(Height),
        ShapeKind::Cone => PI * dimensions.length(Radius).powi(2) * dimensions.length(Height) / 3.0,
        ShapeKind::Sphere => (4.0 / 3.0) * PI * dimensions.length(Radius).powi(3),
        ShapeKind::TorisphericalHead => (2.0 / 3.0) * PI * dimensions.outer_radius().powi(3),
        // No analytic body; matches the calculation service, which has no case for it.
        ShapeKind::FeetWithFloorPlates => 0.0,
    };

    debug!(shape = %dimensions.kind(), volume, "computed volume");
    volume
}

/// Volume for a shape given by wire name.
///
/// Unrecognized names return 0 and never fail.
pub fn volume_for_shape_name(shape: &str, dimensions: &Dimensions) -> f64 {
    match ShapeKind::from_name(shape) {
        Some(kind) if kind == dimensions.kind() => volume(dimensions),
        Some(kind) => {
            warn!(shape = %kind, dimensions_for = %dimensions.kind(), "dimension set belongs to another shape");
            0.0
        }
        None => {
            warn!(shape, "unknown shape, volume defaults to zero");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims(kind: ShapeKind, lengths: &[(DimensionField, f64)]) -> Dimensions {
        Dimensions::new(kind, lengths.iter().copied()).unwrap()
    }

    #[test]
    fn test_reference_values() {
        use DimensionField::*;
        assert_eq!(volume(&dims(ShapeKind::Cube, &[(Width, 1.0)])), 1.0);
        assert_relative_eq!(
            volume(&dims(ShapeKind::Sphere, &[(Radius, 1.0)])),
            4.18879,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            volume(&dims(ShapeKind::Cone, &[(Radius, 1.0), (Height, 3.0)])),
            PI,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            volume(&dims(ShapeKind::Cylinder, &[(Radius, 1.0), (Height, 1.0)])),
            PI,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cylinder_uses_outer_diameter_without_wall_deduction() {
        use DimensionField::*;
        let with_wall = dims(
            ShapeKind::Cylinder,
            &[(OuterDiameter, 2.0), (Height, 1.0), (SheetThickness, 0.1)],
        );
        assert_relative_eq!(volume(&with_wall), PI, max_relative = 1e-12);
    }

    #[test]
    fn test_feet_have_no_volume() {
        let feet = Dimensions::defaults(ShapeKind::FeetWithFloorPlates);
        assert_eq!(volume(&feet), 0.0);
        assert_eq!(VolumeResult::of(&feet).volume, 0.0);
    }

    #[test]
    fn test_unknown_name_is_zero() {
        let cube = dims(ShapeKind::Cube, &[(DimensionField::Width, 2.0)]);
        assert_eq!(volume_for_shape_name("dodecahedron", &cube), 0.0);
        assert_eq!(volume_for_shape_name("cube", &cube), 8.0);
    }

    #[test]
    fn test_mismatched_name_is_zero() {
        let cube = dims(ShapeKind::Cube, &[(DimensionField::Width, 2.0)]);
        assert_eq!(volume_for_shape_name("sphere", &cube), 0.0);
    }
}
