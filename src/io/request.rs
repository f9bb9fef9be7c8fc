// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Request/response contract consumed by the display and transport layer

use crate::dimensions::{validate, RawDimensions};
use crate::error::DimensionResult;
use crate::geometry::{build_solid, SolidDescription};
use crate::shape::ShapeKind;
use crate::volume::volume;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `{ shape, dimensions }` with lengths in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub shape: String,
    #[serde(default)]
    pub dimensions: RawDimensions,
}

impl VolumeRequest {
    pub fn new(shape: impl Into<String>, dimensions: RawDimensions) -> Self {
        Self {
            shape: shape.into(),
            dimensions,
        }
    }
}

/// `{ volume }` in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResponse {
    pub volume: f64,
}

/// Answer a volume request.
///
/// An unrecognized shape answers 0 without looking at the dimensions.
/// Recognized shapes are validated first and fail with the dimension error.
pub fn handle_volume_request(request: &VolumeRequest) -> DimensionResult<VolumeResponse> {
    let Some(kind) = ShapeKind::from_name(&request.shape) else {
        warn!(shape = %request.shape, "unknown shape, answering zero volume");
        return Ok(VolumeResponse { volume: 0.0 });
    };

    let dimensions = validate(kind, &request.dimensions)?;
    Ok(VolumeResponse {
        volume: volume(&dimensions),
    })
}

/// Solid description for a request; `None` for unrecognized shapes
pub fn solid_for_request(request: &VolumeRequest) -> DimensionResult<Option<SolidDescription>> {
    let Some(kind) = ShapeKind::from_name(&request.shape) else {
        return Ok(None);
    };
    let dimensions = validate(kind, &request.dimensions)?;
    Ok(Some(build_solid(&dimensions)))
}

/// Parse a JSON request and serialize the JSON response
pub fn handle_json(body: &str) -> Result<String> {
    let request: VolumeRequest =
        serde_json::from_str(body).context("Failed to parse volume request")?;
    let response = handle_volume_request(&request)
        .with_context(|| format!("Invalid dimensions for shape `{}`", request.shape))?;
    serde_json::to_string(&response).context("Failed to serialize volume response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DimensionError;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn request(value: serde_json::Value) -> VolumeRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cylinder_request() {
        let response = handle_volume_request(&request(json!({
            "shape": "cylinder",
            "dimensions": {"height": 1.0, "outerDiameter": 0.5, "sheetThickness": 0.003}
        })))
        .unwrap();
        assert_relative_eq!(
            response.volume,
            std::f64::consts::PI * 0.0625,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_unknown_shape_answers_zero_without_validation() {
        let response = handle_volume_request(&request(json!({
            "shape": "torus",
            "dimensions": {"radius": -1}
        })))
        .unwrap();
        assert_eq!(response, VolumeResponse { volume: 0.0 });
        assert!(solid_for_request(&request(json!({"shape": "torus"}))).unwrap().is_none());
    }

    #[test]
    fn test_invalid_dimensions_surface_as_errors() {
        let err = handle_volume_request(&request(json!({
            "shape": "sphere",
            "dimensions": {}
        })))
        .unwrap_err();
        assert_eq!(err, DimensionError::invalid("radius", "required field is missing"));
    }

    #[test]
    fn test_handle_json() {
        let body = r#"{"shape":"cube","dimensions":{"width":2}}"#;
        assert_eq!(handle_json(body).unwrap(), r#"{"volume":8.0}"#);

        assert!(handle_json("not json").is_err());
        assert!(handle_json(r#"{"shape":"cube","dimensions":{"width":0}}"#).is_err());
    }

    #[test]
    fn test_solid_for_request() {
        let solid = solid_for_request(&request(json!({
            "shape": "torispherical-head",
            "dimensions": {"outerDiameter": 0.5, "sheetThickness": 0.003, "brimHeight": 0.2}
        })))
        .unwrap()
        .unwrap();
        assert_eq!(solid.shape, ShapeKind::TorisphericalHead);
        assert_eq!(solid.parts.len(), 4);
    }
}
