// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Volume engine contract tests

use approx::assert_relative_eq;
use serde_json::json;
use std::f64::consts::PI;
use vesselframe::{
    calculate_volume, validate, volume, volume_for_shape_name, DimensionField, Dimensions,
    RawDimensions, ShapeKind,
};

fn raw(value: serde_json::Value) -> RawDimensions {
    serde_json::from_value(value).unwrap()
}

fn dims(kind: ShapeKind, lengths: &[(DimensionField, f64)]) -> Dimensions {
    Dimensions::new(kind, lengths.iter().copied()).unwrap()
}

#[test]
fn test_reference_volumes() {
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
fn test_volume_grows_with_every_dimension() {
    use DimensionField::*;

    let cases: [(ShapeKind, &[(DimensionField, f64)]); 4] = [
        (ShapeKind::Cube, &[(Width, 0.5)]),
        (ShapeKind::Cylinder, &[(Radius, 0.5), (Height, 0.5)]),
        (ShapeKind::Cone, &[(Radius, 0.5), (Height, 0.5)]),
        (ShapeKind::Sphere, &[(Radius, 0.5)]),
    ];

    for (kind, lengths) in cases {
        let base = dims(kind, lengths);
        for &(field, value) in lengths {
            let mut previous = volume(&base);
            for step in 1..=5 {
                let grown = base.with(field, value + 0.25 * step as f64).unwrap();
                let next = volume(&grown);
                assert!(next > previous, "{kind} volume did not grow with {field}");
                previous = next;
            }
        }
    }
}

#[test]
fn test_head_volume_ignores_brim_and_thickness() {
    let expected = 2.0 / 3.0 * PI * 0.5_f64.powi(3);

    for (thickness, brim) in [(0.003, 0.2), (0.01, 0.2), (0.003, 0.05), (0.3, 1.5)] {
        let head = validate(
            ShapeKind::TorisphericalHead,
            &raw(json!({"outerDiameter": 1.0, "sheetThickness": thickness, "brimHeight": brim})),
        )
        .unwrap();
        assert_relative_eq!(volume(&head), expected, max_relative = 1e-12);
    }
    assert_relative_eq!(expected, 0.26180, epsilon = 1e-5);
}

#[test]
fn test_feet_volume_is_zero() {
    for outlet in [0.0, 0.2, 1.0, 12.5] {
        let feet = dims(
            ShapeKind::FeetWithFloorPlates,
            &[(DimensionField::OutletHeight, outlet)],
        );
        assert_eq!(volume(&feet), 0.0);
    }
}

#[test]
fn test_unknown_shape_is_zero_not_an_error() {
    assert_eq!(calculate_volume("pyramid", &RawDimensions::new()).unwrap(), 0.0);
    assert_eq!(
        calculate_volume("", &raw(json!({"width": -1}))).unwrap(),
        0.0
    );

    let cube = dims(ShapeKind::Cube, &[(DimensionField::Width, 1.0)]);
    assert_eq!(volume_for_shape_name("Cube ", &cube), 0.0);
}

#[test]
fn test_volume_is_idempotent() {
    for kind in ShapeKind::ALL {
        let dimensions = Dimensions::defaults(kind);
        let first = volume(&dimensions);
        let second = volume(&dimensions);
        assert_eq!(first.to_bits(), second.to_bits(), "{kind}");
    }
}

#[test]
fn test_known_shape_validates_before_computing() {
    assert!(calculate_volume("sphere", &raw(json!({"radius": 0}))).is_err());
    assert!(calculate_volume("cylinder", &raw(json!({"height": 1}))).is_err());
}

#[test]
fn test_volume_is_always_finite() {
    assert!(calculate_volume("cube", &raw(json!({"width": 1e120}))).is_err());
    assert!(calculate_volume("sphere", &raw(json!({"radius": 1e103}))).is_err());
    assert!(calculate_volume("sphere", &raw(json!({"radius": 1e100})))
        .unwrap()
        .is_finite());
}
