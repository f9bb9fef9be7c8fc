// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Geometry module - solid descriptions, meshes and mesh analytics

mod analytics;
mod bbox;
mod mesh;
pub mod mesh_utils;
mod primitives;
mod solid;

pub use analytics::{analyze, signed_volume, surface_area, GeometryStats};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::{Primitive, DEFAULT_SEGMENTS};
pub use solid::{
    build_head, build_solid, feet, HeadOrientation, PartRole, SolidDescription, SolidPart,
    TessellationOptions, PROFILE_SAMPLES,
};
