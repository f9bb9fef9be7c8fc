// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! I/O module - transport contract and exporters

mod export;
mod request;

pub use export::{export_solids_json, export_stl, solids_to_json};
pub use request::{
    handle_json, handle_volume_request, solid_for_request, VolumeRequest, VolumeResponse,
};
