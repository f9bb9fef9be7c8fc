// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Terminal output for the vesselframe binary

pub mod reporter;

pub use reporter::Reporter;
