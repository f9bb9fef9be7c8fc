// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Vessel assemblies: four components stacked on a shared vertical axis
//!
//! Components are independent value objects. Apart from agreeing on the
//! outer diameter they share nothing but the axis, and the stacking order
//! is fixed: base, lower bottom, cylindrical part, top head.

use crate::dimensions::{Dimensions, LengthUnit, RawDimensions};
use crate::error::{DimensionError, DimensionResult};
use crate::geometry::{
    build_head, build_solid, HeadOrientation, Mesh, SolidDescription, TessellationOptions,
};
use crate::shape::{DimensionField, ShapeKind};
use crate::volume::volume;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

/// Allowed mismatch between head and shell diameters, in meters
pub const DIAMETER_TOLERANCE: f64 = 1e-9;

/// Position of a component in the vessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentRole {
    Base,
    LowerBottom,
    CylindricalPart,
    TopHead,
}

impl ComponentRole {
    /// Bottom-to-top stacking order
    pub const STACK_ORDER: [ComponentRole; 4] = [
        ComponentRole::Base,
        ComponentRole::LowerBottom,
        ComponentRole::CylindricalPart,
        ComponentRole::TopHead,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::LowerBottom => "Lower Bottom",
            Self::CylindricalPart => "Cylindrical Part",
            Self::TopHead => "Top Head",
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Head subtype selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadType {
    #[default]
    #[serde(rename = "Torispherical Head")]
    Torispherical,
    #[serde(rename = "Conical")]
    Conical,
}

/// Cylindrical part subtype selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShellType {
    #[default]
    #[serde(rename = "Single Shell")]
    SingleShell,
}

/// Base subtype selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaseType {
    #[default]
    #[serde(rename = "Feet with Floor Plate")]
    FeetWithFloorPlate,
    #[serde(rename = "No Feet/Brackets")]
    NoFeet,
}

/// One configured component of a vessel
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Head {
        role: ComponentRole,
        head_type: HeadType,
        dimensions: Dimensions,
    },
    Shell {
        shell_type: ShellType,
        dimensions: Dimensions,
    },
    Base {
        base_type: BaseType,
        dimensions: Option<Dimensions>,
    },
}

impl Component {
    pub fn role(&self) -> ComponentRole {
        match self {
            Self::Head { role, .. } => *role,
            Self::Shell { .. } => ComponentRole::CylindricalPart,
            Self::Base { .. } => ComponentRole::Base,
        }
    }

    /// Subtype name as shown to users
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Head {
                head_type: HeadType::Torispherical,
                ..
            } => "Torispherical Head",
            Self::Head {
                head_type: HeadType::Conical,
                ..
            } => "Conical",
            Self::Shell { .. } => "Single Shell",
            Self::Base {
                base_type: BaseType::FeetWithFloorPlate,
                ..
            } => "Feet with Floor Plate",
            Self::Base {
                base_type: BaseType::NoFeet,
                ..
            } => "No Feet/Brackets",
        }
    }

    pub fn dimensions(&self) -> Option<&Dimensions> {
        match self {
            Self::Head { dimensions, .. } | Self::Shell { dimensions, .. } => Some(dimensions),
            Self::Base { dimensions, .. } => dimensions.as_ref(),
        }
    }

    /// Solid in the component's own frame; `None` when nothing is drawn
    pub fn solid(&self) -> Option<SolidDescription> {
        match self {
            Self::Head {
                role: ComponentRole::LowerBottom,
                head_type: HeadType::Torispherical,
                dimensions,
            } => Some(build_head(dimensions, HeadOrientation::Down)),
            Self::Head { dimensions, .. } | Self::Shell { dimensions, .. } => {
                Some(build_solid(dimensions))
            }
            Self::Base { dimensions, .. } => dimensions.as_ref().map(build_solid),
        }
    }

    /// Extent along the shared axis
    pub fn height(&self) -> f64 {
        self.solid().map_or(0.0, |solid| solid.height)
    }

    pub fn volume(&self) -> f64 {
        self.dimensions().map_or(0.0, volume)
    }

    /// Outer radius where the component joins the shell
    fn joint_radius(&self) -> Option<f64> {
        match self {
            Self::Head { dimensions, .. } | Self::Shell { dimensions, .. } => {
                Some(dimensions.outer_radius())
            }
            Self::Base { .. } => None,
        }
    }
}

/// Component placed on the shared axis
#[derive(Debug, Clone, Serialize)]
pub struct PlacedComponent {
    pub role: ComponentRole,
    pub type_name: &'static str,
    /// Height of the component's lowest point above the vessel origin
    pub offset: f64,
    pub height: f64,
    pub volume: f64,
    pub solid: Option<SolidDescription>,
}

/// Volume of each component and of the whole vessel, in m³
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyVolumes {
    pub components: Vec<(ComponentRole, f64)>,
    pub total: f64,
}

/// Complete vessel configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VesselAssembly {
    top_head: Component,
    cylindrical_part: Component,
    lower_bottom: Component,
    base: Component,
}

impl VesselAssembly {
    /// Assemble validated components, checking that the heads fit the shell
    pub fn new(
        top_head: (HeadType, Dimensions),
        cylindrical_part: (ShellType, Dimensions),
        lower_bottom: (HeadType, Dimensions),
        base: (BaseType, Option<Dimensions>),
    ) -> DimensionResult<Self> {
        let assembly = Self {
            top_head: head_component(ComponentRole::TopHead, top_head.0, top_head.1)?,
            cylindrical_part: shell_component(cylindrical_part.0, cylindrical_part.1)?,
            lower_bottom: head_component(ComponentRole::LowerBottom, lower_bottom.0, lower_bottom.1)?,
            base: base_component(base.0, base.1)?,
        };
        assembly.check_joints()?;
        Ok(assembly)
    }

    pub fn top_head(&self) -> &Component {
        &self.top_head
    }

    pub fn cylindrical_part(&self) -> &Component {
        &self.cylindrical_part
    }

    pub fn lower_bottom(&self) -> &Component {
        &self.lower_bottom
    }

    pub fn base(&self) -> &Component {
        &self.base
    }

    pub fn component(&self, role: ComponentRole) -> &Component {
        match role {
            ComponentRole::Base => &self.base,
            ComponentRole::LowerBottom => &self.lower_bottom,
            ComponentRole::CylindricalPart => &self.cylindrical_part,
            ComponentRole::TopHead => &self.top_head,
        }
    }

    /// Components from bottom to top
    pub fn components(&self) -> [&Component; 4] {
        ComponentRole::STACK_ORDER.map(|role| self.component(role))
    }

    /// Stack components along the axis by cumulative height
    pub fn layout(&self) -> Vec<PlacedComponent> {
        let mut offset = 0.0;
        self.components()
            .into_iter()
            .map(|component| {
                let solid = component.solid();
                let height = solid.as_ref().map_or(0.0, |solid| solid.height);
                let placed = PlacedComponent {
                    role: component.role(),
                    type_name: component.type_name(),
                    offset,
                    height,
                    volume: component.volume(),
                    solid: solid.map(|solid| solid.translated(offset)),
                };
                debug!(role = %placed.role, offset, height, "placed component");
                offset += height;
                placed
            })
            .collect()
    }

    /// Overall height of the stacked vessel
    pub fn total_height(&self) -> f64 {
        self.components().iter().map(|component| component.height()).sum()
    }

    /// Per-component volumes, computed independently
    pub fn volumes(&self) -> AssemblyVolumes {
        let components: Vec<(ComponentRole, f64)> = self
            .components()
            .par_iter()
            .map(|component| (component.role(), component.volume()))
            .collect();
        let total = components.iter().map(|(_, volume)| volume).sum();

        info!(total, "computed assembly volumes");
        AssemblyVolumes { components, total }
    }

    /// Mesh of the stacked vessel
    pub fn to_mesh(&self, options: &TessellationOptions) -> Mesh {
        let mut mesh = Mesh::new();
        for placed in self.layout() {
            if let Some(solid) = placed.solid {
                mesh.merge(&solid.to_mesh(options));
            }
        }
        mesh
    }

    fn check_joints(&self) -> DimensionResult<()> {
        let Some(shell_radius) = self.cylindrical_part.joint_radius() else {
            return Ok(());
        };
        for head in [&self.top_head, &self.lower_bottom] {
            if let Some(radius) = head.joint_radius() {
                if (radius - shell_radius).abs() > DIAMETER_TOLERANCE {
                    return Err(DimensionError::InconsistentGeometry(format!(
                        "{} outer diameter {} m does not match the cylindrical part ({} m)",
                        head.role(),
                        2.0 * radius,
                        2.0 * shell_radius
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for VesselAssembly {
    fn default() -> Self {
        use DimensionField::*;
        let head = || {
            Dimensions::from_trusted_millimeters(
                ShapeKind::TorisphericalHead,
                &[(SheetThickness, 3.0), (OuterDiameter, 500.0), (BrimHeight, 20.0)],
            )
        };
        Self {
            top_head: Component::Head {
                role: ComponentRole::TopHead,
                head_type: HeadType::Torispherical,
                dimensions: head(),
            },
            cylindrical_part: Component::Shell {
                shell_type: ShellType::SingleShell,
                dimensions: Dimensions::from_trusted_millimeters(
                    ShapeKind::Cylinder,
                    &[(SheetThickness, 3.0), (OuterDiameter, 500.0), (Height, 1000.0)],
                ),
            },
            lower_bottom: Component::Head {
                role: ComponentRole::LowerBottom,
                head_type: HeadType::Torispherical,
                dimensions: head(),
            },
            base: Component::Base {
                base_type: BaseType::FeetWithFloorPlate,
                dimensions: Some(Dimensions::from_trusted_millimeters(
                    ShapeKind::FeetWithFloorPlates,
                    &[(OutletHeight, 500.0)],
                )),
            },
        }
    }
}

fn expect_kind(role: ComponentRole, dimensions: &Dimensions, kind: ShapeKind) -> DimensionResult<()> {
    if dimensions.kind() == kind {
        Ok(())
    } else {
        Err(DimensionError::InconsistentGeometry(format!(
            "{role} needs {kind} dimensions, got {}",
            dimensions.kind()
        )))
    }
}

fn head_component(
    role: ComponentRole,
    head_type: HeadType,
    dimensions: Dimensions,
) -> DimensionResult<Component> {
    if role == ComponentRole::LowerBottom && head_type == HeadType::Conical {
        return Err(DimensionError::InconsistentGeometry(
            "a conical lower bottom is not supported".into(),
        ));
    }
    let kind = match head_type {
        HeadType::Torispherical => ShapeKind::TorisphericalHead,
        HeadType::Conical => ShapeKind::Cone,
    };
    expect_kind(role, &dimensions, kind)?;
    Ok(Component::Head {
        role,
        head_type,
        dimensions,
    })
}

fn shell_component(shell_type: ShellType, dimensions: Dimensions) -> DimensionResult<Component> {
    expect_kind(ComponentRole::CylindricalPart, &dimensions, ShapeKind::Cylinder)?;
    Ok(Component::Shell {
        shell_type,
        dimensions,
    })
}

fn base_component(base_type: BaseType, dimensions: Option<Dimensions>) -> DimensionResult<Component> {
    let dimensions = match base_type {
        BaseType::NoFeet => None,
        BaseType::FeetWithFloorPlate => {
            let Some(dimensions) = dimensions else {
                return Err(DimensionError::invalid(
                    DimensionField::OutletHeight.name(),
                    "required field is missing",
                ));
            };
            expect_kind(ComponentRole::Base, &dimensions, ShapeKind::FeetWithFloorPlates)?;
            Some(dimensions)
        }
    };
    Ok(Component::Base {
        base_type,
        dimensions,
    })
}

/// Raw settings of one component: a subtype name plus its lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec<T> {
    #[serde(rename = "type", default)]
    pub kind: T,
    #[serde(flatten)]
    pub dimensions: RawDimensions,
}

impl<T: Default> ComponentSpec<T> {
    fn with_lengths(lengths: &[(DimensionField, f64)]) -> Self {
        Self {
            kind: T::default(),
            dimensions: lengths
                .iter()
                .map(|&(field, value)| (field.name().to_string(), Value::from(value)))
                .collect(),
        }
    }
}

/// Unvalidated vessel description, as edited by users or read from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselSpec {
    #[serde(default)]
    pub unit: LengthUnit,
    pub top_head: ComponentSpec<HeadType>,
    pub cylindrical_part: ComponentSpec<ShellType>,
    pub lower_bottom: ComponentSpec<HeadType>,
    pub base: ComponentSpec<BaseType>,
}

impl Default for VesselSpec {
    fn default() -> Self {
        use DimensionField::*;
        Self {
            unit: LengthUnit::Millimeters,
            top_head: ComponentSpec::with_lengths(&[(SheetThickness, 3.0), (BrimHeight, 20.0)]),
            cylindrical_part: ComponentSpec::with_lengths(&[
                (SheetThickness, 3.0),
                (OuterDiameter, 500.0),
                (Height, 1000.0),
            ]),
            lower_bottom: ComponentSpec::with_lengths(&[(SheetThickness, 3.0), (BrimHeight, 20.0)]),
            base: ComponentSpec::with_lengths(&[(OutletHeight, 500.0)]),
        }
    }
}

impl VesselSpec {
    /// Validate every component and build the assembly.
    ///
    /// Heads that omit `outerDiameter` inherit the cylindrical part's; a
    /// conical head takes its `radius` from that diameter the same way.
    pub fn to_assembly(&self) -> DimensionResult<VesselAssembly> {
        let shell = Dimensions::from_raw(
            ShapeKind::Cylinder,
            &self.cylindrical_part.dimensions,
            self.unit,
        )?;
        let shell_diameter = self.unit.from_meters(2.0 * shell.outer_radius());

        let top = self.head_dimensions(&self.top_head, shell_diameter)?;
        let bottom = self.head_dimensions(&self.lower_bottom, shell_diameter)?;
        let base = match self.base.kind {
            BaseType::NoFeet => None,
            BaseType::FeetWithFloorPlate => Some(Dimensions::from_raw(
                ShapeKind::FeetWithFloorPlates,
                &self.base.dimensions,
                self.unit,
            )?),
        };

        VesselAssembly::new(
            (self.top_head.kind, top),
            (self.cylindrical_part.kind, shell),
            (self.lower_bottom.kind, bottom),
            (self.base.kind, base),
        )
    }

    fn head_dimensions(
        &self,
        spec: &ComponentSpec<HeadType>,
        shell_diameter: f64,
    ) -> DimensionResult<Dimensions> {
        let mut raw = spec.dimensions.clone();
        match spec.kind {
            HeadType::Torispherical => {
                raw.entry(DimensionField::OuterDiameter.name().to_string())
                    .or_insert_with(|| Value::from(shell_diameter));
                Dimensions::from_raw(ShapeKind::TorisphericalHead, &raw, self.unit)
            }
            HeadType::Conical => {
                let radius = match raw.get(DimensionField::OuterDiameter.name()) {
                    Some(Value::Number(diameter)) => diameter.as_f64().map(|d| d / 2.0),
                    Some(_) => None,
                    None => Some(shell_diameter / 2.0),
                };
                if let Some(radius) = radius {
                    raw.entry(DimensionField::Radius.name().to_string())
                        .or_insert_with(|| Value::from(radius));
                }
                Dimensions::from_raw(ShapeKind::Cone, &raw, self.unit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_default_spec_matches_default_assembly() {
        let assembly = VesselSpec::default().to_assembly().unwrap();
        assert_eq!(assembly, VesselAssembly::default());
    }

    #[test]
    fn test_layout_stacks_by_cumulative_height() {
        let layout = VesselAssembly::default().layout();
        let roles: Vec<_> = layout.iter().map(|p| p.role).collect();
        assert_eq!(roles, ComponentRole::STACK_ORDER);

        // feet: pad 5 mm + outlet 500 mm + plate 10 mm
        assert_relative_eq!(layout[0].offset, 0.0);
        assert_relative_eq!(layout[0].height, 0.515, epsilon = 1e-12);
        // heads: radius 250 mm + brim 20 mm
        assert_relative_eq!(layout[1].offset, 0.515, epsilon = 1e-12);
        assert_relative_eq!(layout[1].height, 0.27, epsilon = 1e-12);
        assert_relative_eq!(layout[2].offset, 0.785, epsilon = 1e-12);
        assert_relative_eq!(layout[2].height, 1.0, epsilon = 1e-12);
        assert_relative_eq!(layout[3].offset, 1.785, epsilon = 1e-12);

        for window in layout.windows(2) {
            assert_relative_eq!(
                window[0].offset + window[0].height,
                window[1].offset,
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(
            VesselAssembly::default().total_height(),
            2.055,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_placed_solids_are_translated() {
        let layout = VesselAssembly::default().layout();
        let shell = layout[2].solid.as_ref().unwrap();
        assert_relative_eq!(shell.parts[0].position.y, 0.785 + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_volumes() {
        let volumes = VesselAssembly::default().volumes();
        let head = 2.0 / 3.0 * PI * 0.25_f64.powi(3);
        let shell = PI * 0.25_f64.powi(2) * 1.0;

        assert_eq!(volumes.components.len(), 4);
        assert_eq!(volumes.components[0], (ComponentRole::Base, 0.0));
        assert_relative_eq!(volumes.components[1].1, head, max_relative = 1e-12);
        assert_relative_eq!(volumes.components[2].1, shell, max_relative = 1e-12);
        assert_relative_eq!(volumes.components[3].1, head, max_relative = 1e-12);
        assert_relative_eq!(volumes.total, shell + 2.0 * head, max_relative = 1e-12);
    }

    #[test]
    fn test_no_feet_base() {
        let mut spec = VesselSpec::default();
        spec.base.kind = BaseType::NoFeet;
        let assembly = spec.to_assembly().unwrap();

        assert_eq!(assembly.base().height(), 0.0);
        assert_eq!(assembly.base().volume(), 0.0);
        assert!(assembly.base().solid().is_none());
        assert_eq!(assembly.layout()[1].offset, 0.0);
    }

    #[test]
    fn test_conical_top_head_inherits_radius() {
        let mut spec = VesselSpec::default();
        spec.top_head = ComponentSpec {
            kind: HeadType::Conical,
            dimensions: [("height".to_string(), Value::from(300.0))].into_iter().collect(),
        };
        let assembly = spec.to_assembly().unwrap();

        let dims = assembly.top_head().dimensions().unwrap();
        assert_eq!(dims.kind(), ShapeKind::Cone);
        assert_relative_eq!(dims.length(DimensionField::Radius), 0.25);
        assert_relative_eq!(assembly.top_head().height(), 0.3);
        assert_eq!(assembly.top_head().type_name(), "Conical");
    }

    #[test]
    fn test_mismatched_head_diameter() {
        let mut spec = VesselSpec::default();
        spec.top_head
            .dimensions
            .insert("outerDiameter".into(), Value::from(600.0));
        let err = spec.to_assembly().unwrap_err();
        assert!(matches!(err, DimensionError::InconsistentGeometry(_)));
    }

    #[test]
    fn test_invalid_component_dimension_is_reported() {
        let mut spec = VesselSpec::default();
        spec.lower_bottom
            .dimensions
            .insert("brimHeight".into(), Value::from(-5.0));
        let err = spec.to_assembly().unwrap_err();
        assert_eq!(err.field(), Some("brimHeight"));
    }

    #[test]
    fn test_conical_lower_bottom_rejected() {
        let mut spec = VesselSpec::default();
        spec.lower_bottom.kind = HeadType::Conical;
        spec.lower_bottom
            .dimensions
            .insert("height".into(), Value::from(100.0));
        assert!(spec.to_assembly().is_err());
    }

    #[test]
    fn test_spec_reads_from_toml() {
        let text = r#"
            unit = "millimeters"

            [topHead]
            type = "Torispherical Head"
            sheetThickness = 3.0
            brimHeight = 20.0

            [cylindricalPart]
            type = "Single Shell"
            sheetThickness = 3.0
            outerDiameter = 500.0
            height = 1000.0

            [lowerBottom]
            sheetThickness = 3.0
            brimHeight = 20.0

            [base]
            type = "No Feet/Brackets"
        "#;
        let spec: VesselSpec = toml::from_str(text).unwrap();
        assert_eq!(spec.lower_bottom.kind, HeadType::Torispherical);
        assert_eq!(spec.base.kind, BaseType::NoFeet);
        assert!(spec.to_assembly().is_ok());
    }
}
