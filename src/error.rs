// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Error types for dimension validation

use thiserror::Error;

/// Failure raised by the dimension model before any arithmetic runs.
///
/// The volume engine and geometry builder never produce errors on
/// validated input, so this is the only error a caller of the core sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    /// A required field is missing, non-numeric, non-finite or out of range.
    #[error("invalid dimension `{field}`: {reason}")]
    InvalidDimension { field: String, reason: String },

    /// Fields are individually valid but cannot describe a real part.
    #[error("inconsistent geometry: {0}")]
    InconsistentGeometry(String),
}

impl DimensionError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidDimension { field, .. } => Some(field),
            Self::InconsistentGeometry(_) => None,
        }
    }
}

pub type DimensionResult<T> = std::result::Result<T, DimensionError>;
