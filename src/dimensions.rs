// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Dimension model: validation and unit normalization of component lengths
//!
//! Raw mappings come from the caller keyed by wire field name. They are
//! converted to meters exactly once, here, and checked against the
//! requirements of the shape kind. Every [`Dimensions`] value in circulation
//! has passed these checks, so the formulas downstream are total.

use crate::error::{DimensionError, DimensionResult};
use crate::shape::{DimensionField, ShapeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Unvalidated field name → value mapping as received from a caller
pub type RawDimensions = BTreeMap<String, Value>;

/// Unit of the lengths in a raw mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Millimeters,
    Meters,
}

impl LengthUnit {
    /// Convert a length in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Millimeters => value / 1000.0,
            Self::Meters => value,
        }
    }

    /// Convert a length in meters to this unit
    pub fn from_meters(self, value: f64) -> f64 {
        match self {
            Self::Millimeters => value * 1000.0,
            Self::Meters => value,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Meters => "m",
        }
    }
}

/// Validated dimension set for one shape kind, in meters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    kind: ShapeKind,
    values: BTreeMap<DimensionField, f64>,
}

impl Dimensions {
    /// Validate a raw mapping expressed in `unit` and normalize it to meters.
    ///
    /// Unknown fields are ignored. Missing, non-numeric, non-finite and
    /// out-of-range required fields fail with `InvalidDimension`; a wall
    /// thickness reaching the outer radius, or lengths so large the volume
    /// is not finite, fail with `InconsistentGeometry`.
    pub fn from_raw(kind: ShapeKind, raw: &RawDimensions, unit: LengthUnit) -> DimensionResult<Self> {
        let mut values = BTreeMap::new();

        for requirement in kind.requirements() {
            let Some((field, value)) = requirement
                .alternatives
                .iter()
                .find_map(|field| raw.get(field.name()).map(|value| (*field, value)))
            else {
                return Err(DimensionError::invalid(
                    requirement.primary().name(),
                    "required field is missing",
                ));
            };

            let meters = unit.to_meters(parse_length(field, value)?);
            check_range(field, meters, requirement.allow_zero)?;
            values.insert(field, meters);
        }

        for &field in kind.optional_fields() {
            if let Some(value) = raw.get(field.name()) {
                let meters = unit.to_meters(parse_length(field, value)?);
                check_range(field, meters, false)?;
                values.insert(field, meters);
            }
        }

        let dimensions = Self { kind, values };
        dimensions.check_consistency()?;
        dimensions.check_volume_range()?;
        Ok(dimensions)
    }

    /// Build from typed lengths already in meters
    pub fn new(
        kind: ShapeKind,
        lengths: impl IntoIterator<Item = (DimensionField, f64)>,
    ) -> DimensionResult<Self> {
        let raw: RawDimensions = lengths
            .into_iter()
            .map(|(field, value)| (field.name().to_string(), Value::from(value)))
            .collect();
        Self::from_raw(kind, &raw, LengthUnit::Meters)
    }

    /// Starting values used when a component is first configured
    pub fn defaults(kind: ShapeKind) -> Self {
        use DimensionField::*;
        let millimeters: &[(DimensionField, f64)] = match kind {
            ShapeKind::Cube => &[(Width, 10.0)],
            ShapeKind::Cylinder => &[(SheetThickness, 3.0), (OuterDiameter, 500.0), (Height, 1000.0)],
            ShapeKind::Cone => &[(Radius, 10.0), (Height, 10.0)],
            ShapeKind::Sphere => &[(Radius, 10.0)],
            ShapeKind::TorisphericalHead => {
                &[(SheetThickness, 3.0), (OuterDiameter, 500.0), (BrimHeight, 200.0)]
            }
            ShapeKind::FeetWithFloorPlates => &[(OutletHeight, 200.0)],
        };

        Self::from_trusted_millimeters(kind, millimeters)
    }

    /// Build from constant millimeter values known to satisfy validation
    pub(crate) fn from_trusted_millimeters(kind: ShapeKind, millimeters: &[(DimensionField, f64)]) -> Self {
        Self {
            kind,
            values: millimeters
                .iter()
                .map(|&(field, value)| (field, LengthUnit::Millimeters.to_meters(value)))
                .collect(),
        }
    }

    /// Return a copy with one field replaced, revalidated.
    ///
    /// `value` is in meters.
    pub fn with(&self, field: DimensionField, value: f64) -> DimensionResult<Self> {
        let mut lengths = self.values.clone();
        if field == DimensionField::Radius {
            lengths.remove(&DimensionField::OuterDiameter);
        }
        lengths.insert(field, value);
        Self::new(self.kind, lengths)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn get(&self, field: DimensionField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Length of a field in meters, zero when the shape does not use it
    pub fn length(&self, field: DimensionField) -> f64 {
        self.get(field).unwrap_or(0.0)
    }

    /// Outer radius from `outerDiameter`, falling back to `radius`
    pub fn outer_radius(&self) -> f64 {
        match self.get(DimensionField::OuterDiameter) {
            Some(diameter) => diameter / 2.0,
            None => self.length(DimensionField::Radius),
        }
    }

    pub fn values(&self) -> &BTreeMap<DimensionField, f64> {
        &self.values
    }

    /// Express every field in `unit`
    pub fn to_unit(&self, unit: LengthUnit) -> BTreeMap<DimensionField, f64> {
        self.values
            .iter()
            .map(|(&field, &meters)| (field, unit.from_meters(meters)))
            .collect()
    }

    /// Raw mapping in `unit`, suitable for the transport layer
    pub fn to_raw(&self, unit: LengthUnit) -> RawDimensions {
        self.to_unit(unit)
            .into_iter()
            .map(|(field, value)| (field.name().to_string(), Value::from(value)))
            .collect()
    }

    /// Lengths that are finite on their own may still overflow the volume
    fn check_volume_range(&self) -> DimensionResult<()> {
        let volume = crate::volume::volume(self);
        if !volume.is_finite() {
            return Err(DimensionError::InconsistentGeometry(format!(
                "{} dimensions are too large, volume overflows",
                self.kind
            )));
        }
        Ok(())
    }

    fn check_consistency(&self) -> DimensionResult<()> {
        if !self.kind.is_walled() {
            return Ok(());
        }
        let Some(thickness) = self.get(DimensionField::SheetThickness) else {
            return Ok(());
        };

        let radius = self.outer_radius();
        if thickness >= radius {
            return Err(DimensionError::InconsistentGeometry(format!(
                "sheet thickness {thickness} m must be smaller than the outer radius {radius} m"
            )));
        }
        Ok(())
    }
}

/// Validate and normalize a millimeter mapping for `kind`
pub fn normalize(kind: ShapeKind, raw: &RawDimensions) -> DimensionResult<Dimensions> {
    Dimensions::from_raw(kind, raw, LengthUnit::Millimeters)
}

/// Validate a mapping whose lengths are already in meters
pub fn validate(kind: ShapeKind, raw: &RawDimensions) -> DimensionResult<Dimensions> {
    Dimensions::from_raw(kind, raw, LengthUnit::Meters)
}

fn parse_length(field: DimensionField, value: &Value) -> DimensionResult<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|value| value.is_finite())
        .ok_or_else(|| DimensionError::invalid(field.name(), format!("{value} is not a finite number")))
}

fn check_range(field: DimensionField, value: f64, allow_zero: bool) -> DimensionResult<()> {
    if value < 0.0 {
        return Err(DimensionError::invalid(field.name(), "must not be negative"));
    }
    if value == 0.0 && !allow_zero {
        return Err(DimensionError::invalid(field.name(), "must be greater than zero"));
    }
    Ok(())
}
