// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! CLI output reporter with colored formatting

use crate::assembly::{AssemblyVolumes, PlacedComponent};
use crate::dimensions::{Dimensions, LengthUnit};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the volume of a single component
    pub fn report_volume(shape: &str, dimensions: Option<&Dimensions>, volume: f64) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Shape:".bold(), shape.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if let Some(dimensions) = dimensions {
            for (field, value) in dimensions.to_unit(LengthUnit::Millimeters) {
                println!(
                    "  {} {}",
                    format!("{field}:").bright_black(),
                    Self::format_length(value, LengthUnit::Millimeters).cyan()
                );
            }
        }
        println!(
            "  {} {}",
            "Volume:".bold(),
            Self::format_volume(volume).green().bold()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report stacked components with their volumes
    pub fn report_assembly(layout: &[PlacedComponent], volumes: &AssemblyVolumes) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{}", "Vessel assembly (bottom to top)".bold());
        println!("{}", "━".repeat(80).bright_black());

        for placed in layout {
            println!(
                "  {:<18} {:<24} {} {:>10} {} {:>10} {} {}",
                placed.role.label().bold(),
                placed.type_name.cyan(),
                "offset".bright_black(),
                Self::format_length(placed.offset * 1000.0, LengthUnit::Millimeters),
                "height".bright_black(),
                Self::format_length(placed.height * 1000.0, LengthUnit::Millimeters),
                "volume".bright_black(),
                Self::format_volume(placed.volume).yellow()
            );
        }

        let total_height: f64 = layout.iter().map(|placed| placed.height).sum();
        println!("\n{}", "Totals:".bold());
        println!(
            "  {} {}",
            "Height:".bright_black(),
            Self::format_length(total_height * 1000.0, LengthUnit::Millimeters).cyan()
        );
        println!(
            "  {} {}",
            "Volume:".bright_black(),
            Self::format_volume(volumes.total).green().bold()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a finished export
    pub fn report_export(file: &str, vertices: usize, triangles: usize, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Exported:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Vertices:".bright_black(),
            vertices.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            triangles.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Volume in m³ with the equivalent in liters
    pub fn format_volume(cubic_meters: f64) -> String {
        format!("{:.6} m³ ({:.2} L)", cubic_meters, cubic_meters * 1000.0)
    }

    fn format_length(value: f64, unit: LengthUnit) -> String {
        format!("{:.1} {}", value, unit.symbol())
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
