// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Command-line configuration

use crate::assembly::VesselSpec;
use crate::dimensions::LengthUnit;
use crate::geometry::{TessellationOptions, DEFAULT_SEGMENTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "vesselframe.toml";

/// Settings for the `vesselframe` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Segments around each circle when meshing
    pub segments: u32,
    /// Include inner reference shells in exported meshes
    pub include_reference: bool,
    /// Unit of lengths given on the command line
    pub input_unit: LengthUnit,
    /// Directory for exported files given by bare name
    pub output_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            include_reference: false,
            input_unit: LengthUnit::Millimeters,
            output_dir: PathBuf::from("."),
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load an explicit file, else `vesselframe.toml` if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn tessellation(&self) -> TessellationOptions {
        TessellationOptions {
            segments: self.segments,
            include_reference: self.include_reference,
        }
    }

    /// Resolve an output path against `output_dir` unless it has a directory
    pub fn output_path(&self, name: impl AsRef<Path>) -> PathBuf {
        let name = name.as_ref();
        if name.is_absolute() || name.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
            name.to_path_buf()
        } else {
            self.output_dir.join(name)
        }
    }
}

/// Read a vessel description from a TOML file
pub fn load_vessel_spec(path: impl AsRef<Path>) -> Result<VesselSpec> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read vessel file: {:?}", path.as_ref()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse vessel file: {:?}", path.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = CliConfig {
            segments: 64,
            include_reference: true,
            input_unit: LengthUnit::Meters,
            output_dir: PathBuf::from("out"),
        };
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CliConfig = toml::from_str("segments = 12").unwrap();
        assert_eq!(config.segments, 12);
        assert_eq!(config.input_unit, LengthUnit::Millimeters);
        assert_eq!(config.tessellation().segments, 12);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::from_file("/nonexistent/vesselframe.toml").is_err());
    }

    #[test]
    fn test_output_path() {
        let config = CliConfig {
            output_dir: PathBuf::from("exports"),
            ..CliConfig::default()
        };
        assert_eq!(config.output_path("vessel.stl"), PathBuf::from("exports/vessel.stl"));
        assert_eq!(config.output_path("a/vessel.stl"), PathBuf::from("a/vessel.stl"));
    }

    #[test]
    fn test_load_vessel_spec() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vessel.toml");
        std::fs::write(
            &path,
            r#"
unit = "millimeters"

[topHead]
type = "Torispherical Head"
sheetThickness = 3
brimHeight = 20

[cylindricalPart]
type = "Single Shell"
sheetThickness = 3
outerDiameter = 500
height = 1000

[lowerBottom]
type = "Torispherical Head"
sheetThickness = 3
brimHeight = 20

[base]
type = "Feet with Floor Plate"
outletHeight = 500
"#,
        )
        .unwrap();

        let spec = load_vessel_spec(&path).unwrap();
        let assembly = spec.to_assembly().unwrap();
        assert_eq!(assembly, crate::assembly::VesselAssembly::default());
    }
}
