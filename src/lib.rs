// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Vesselframe
//!
//! Parametric geometry and volume engine for process vessels.
//! Computes component volumes, builds solid descriptions for display and
//! stacks heads, shells and bases into complete vessel assemblies.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod geometry;
pub mod io;
pub mod shape;
pub mod volume;

pub use assembly::{ComponentRole, VesselAssembly, VesselSpec};
pub use dimensions::{normalize, validate, Dimensions, LengthUnit, RawDimensions};
pub use error::{DimensionError, DimensionResult};
pub use geometry::{build_solid, Mesh, Primitive, SolidDescription, TessellationOptions};
pub use io::{export_stl, handle_volume_request, VolumeRequest, VolumeResponse};
pub use shape::{DimensionField, ShapeKind};
pub use volume::{volume, volume_for_shape_name};

/// Volume in m³ of a named shape with lengths in meters.
///
/// Unknown shape names answer 0.
pub fn calculate_volume(shape: &str, dimensions: &RawDimensions) -> DimensionResult<f64> {
    handle_volume_request(&VolumeRequest::new(shape, dimensions.clone()))
        .map(|response| response.volume)
}

/// Tessellate a named shape with lengths in meters; `None` for unknown shapes
pub fn render(
    shape: &str,
    dimensions: &RawDimensions,
    options: &TessellationOptions,
) -> DimensionResult<Option<Mesh>> {
    let request = VolumeRequest::new(shape, dimensions.clone());
    Ok(io::solid_for_request(&request)?.map(|solid| solid.to_mesh(options)))
}
