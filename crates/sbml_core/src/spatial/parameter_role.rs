//! Roles a core parameter can play in a spatial model.
//!
//! # Invariants
//! - A parameter carries at most one role, held by `SpatialParameterPlugin`.
//! - Roles carry no secondary id.

use crate::model::{AttributeTable, ElementCore, Node};
use crate::spatial::kinds::{BoundaryKind, CoordinateKind, DiffusionKind};
use crate::spatial::{
    spatial_element, ADVECTION_COEFFICIENT, BOUNDARY_CONDITION, DIFFUSION_COEFFICIENT,
    SPATIAL, SPATIAL_SYMBOL_REFERENCE, TYPE, VARIABLE,
};
use once_cell::sync::Lazy;

pub const SPATIAL_REF: &str = "spatialRef";
pub const COORDINATE_REFERENCE1: &str = "coordinateReference1";
pub const COORDINATE_REFERENCE2: &str = "coordinateReference2";
pub const COORDINATE: &str = "coordinate";
pub const COORDINATE_BOUNDARY: &str = "coordinateBoundary";
pub const BOUNDARY_DOMAIN_TYPE: &str = "boundaryDomainType";

static SPATIAL_SYMBOL_REFERENCE_ATTRIBUTES: Lazy<AttributeTable<SpatialSymbolReference>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL).text(
            SPATIAL_REF,
            SpatialSymbolReference::spatial_ref,
            |reference: &mut SpatialSymbolReference, target: String| {
                reference.set_spatial_ref(target)
            },
            SpatialSymbolReference::unset_spatial_ref,
        )
    });

static DIFFUSION_COEFFICIENT_ATTRIBUTES: Lazy<AttributeTable<DiffusionCoefficient>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .text(
                VARIABLE,
                DiffusionCoefficient::variable,
                |coefficient: &mut DiffusionCoefficient, variable: String| {
                    coefficient.set_variable(variable)
                },
                DiffusionCoefficient::unset_variable,
            )
            .token(
                TYPE,
                DiffusionCoefficient::diffusion_type,
                DiffusionCoefficient::set_diffusion_type,
                DiffusionCoefficient::unset_diffusion_type,
            )
            .token(
                COORDINATE_REFERENCE1,
                DiffusionCoefficient::coordinate_reference1,
                DiffusionCoefficient::set_coordinate_reference1,
                DiffusionCoefficient::unset_coordinate_reference1,
            )
            .token(
                COORDINATE_REFERENCE2,
                DiffusionCoefficient::coordinate_reference2,
                DiffusionCoefficient::set_coordinate_reference2,
                DiffusionCoefficient::unset_coordinate_reference2,
            )
    });

static ADVECTION_COEFFICIENT_ATTRIBUTES: Lazy<AttributeTable<AdvectionCoefficient>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .text(
                VARIABLE,
                AdvectionCoefficient::variable,
                |coefficient: &mut AdvectionCoefficient, variable: String| {
                    coefficient.set_variable(variable)
                },
                AdvectionCoefficient::unset_variable,
            )
            .token(
                COORDINATE,
                AdvectionCoefficient::coordinate,
                AdvectionCoefficient::set_coordinate,
                AdvectionCoefficient::unset_coordinate,
            )
    });

static BOUNDARY_CONDITION_ATTRIBUTES: Lazy<AttributeTable<BoundaryCondition>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .text(
            VARIABLE,
            BoundaryCondition::variable,
            |condition: &mut BoundaryCondition, variable: String| condition.set_variable(variable),
            BoundaryCondition::unset_variable,
        )
        .token(
            TYPE,
            BoundaryCondition::condition_type,
            BoundaryCondition::set_condition_type,
            BoundaryCondition::unset_condition_type,
        )
        .text(
            COORDINATE_BOUNDARY,
            BoundaryCondition::coordinate_boundary,
            |condition: &mut BoundaryCondition, boundary: String| {
                condition.set_coordinate_boundary(boundary)
            },
            BoundaryCondition::unset_coordinate_boundary,
        )
        .text(
            BOUNDARY_DOMAIN_TYPE,
            BoundaryCondition::boundary_domain_type,
            |condition: &mut BoundaryCondition, domain_type: String| {
                condition.set_boundary_domain_type(domain_type)
            },
            BoundaryCondition::unset_boundary_domain_type,
        )
});

/// Role held by a spatial parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterRole {
    SymbolReference(SpatialSymbolReference),
    Diffusion(DiffusionCoefficient),
    Advection(AdvectionCoefficient),
    Boundary(BoundaryCondition),
}

delegate_node!(ParameterRole {
    SymbolReference,
    Diffusion,
    Advection,
    Boundary,
});

impl ParameterRole {
    /// Species or parameter the role applies to; symbol references have none.
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::SymbolReference(_) => None,
            Self::Diffusion(role) => role.variable(),
            Self::Advection(role) => role.variable(),
            Self::Boundary(role) => role.variable(),
        }
    }
}

impl From<SpatialSymbolReference> for ParameterRole {
    fn from(role: SpatialSymbolReference) -> Self {
        Self::SymbolReference(role)
    }
}

impl From<DiffusionCoefficient> for ParameterRole {
    fn from(role: DiffusionCoefficient) -> Self {
        Self::Diffusion(role)
    }
}

impl From<AdvectionCoefficient> for ParameterRole {
    fn from(role: AdvectionCoefficient) -> Self {
        Self::Advection(role)
    }
}

impl From<BoundaryCondition> for ParameterRole {
    fn from(role: BoundaryCondition) -> Self {
        Self::Boundary(role)
    }
}

/// Binds a parameter to a spatial symbol such as a coordinate component.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSymbolReference {
    core: ElementCore,
    spatial_ref: Option<String>,
}

impl SpatialSymbolReference {
    pub fn new() -> Self {
        Self {
            core: spatial_element(SPATIAL_SYMBOL_REFERENCE),
            spatial_ref: None,
        }
    }
}

impl Default for SpatialSymbolReference {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SpatialSymbolReference {
    text spatial_ref: String = SPATIAL_REF => is_set_spatial_ref, set_spatial_ref, unset_spatial_ref;
});

impl Node for SpatialSymbolReference {
    element_core_access!();
    attribute_table_access!(SPATIAL_SYMBOL_REFERENCE_ATTRIBUTES);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionCoefficient {
    core: ElementCore,
    variable: Option<String>,
    diffusion_type: Option<DiffusionKind>,
    coordinate_reference1: Option<CoordinateKind>,
    coordinate_reference2: Option<CoordinateKind>,
}

impl DiffusionCoefficient {
    pub fn new() -> Self {
        Self {
            core: spatial_element(DIFFUSION_COEFFICIENT),
            variable: None,
            diffusion_type: None,
            coordinate_reference1: None,
            coordinate_reference2: None,
        }
    }
}

impl Default for DiffusionCoefficient {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(DiffusionCoefficient {
    text variable: String = VARIABLE => is_set_variable, set_variable, unset_variable;
    token diffusion_type: DiffusionKind = TYPE
        => is_set_diffusion_type, set_diffusion_type, unset_diffusion_type;
    token coordinate_reference1: CoordinateKind = COORDINATE_REFERENCE1
        => is_set_coordinate_reference1, set_coordinate_reference1, unset_coordinate_reference1;
    token coordinate_reference2: CoordinateKind = COORDINATE_REFERENCE2
        => is_set_coordinate_reference2, set_coordinate_reference2, unset_coordinate_reference2;
});

impl Node for DiffusionCoefficient {
    element_core_access!();
    attribute_table_access!(DIFFUSION_COEFFICIENT_ATTRIBUTES);
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvectionCoefficient {
    core: ElementCore,
    variable: Option<String>,
    coordinate: Option<CoordinateKind>,
}

impl AdvectionCoefficient {
    pub fn new() -> Self {
        Self {
            core: spatial_element(ADVECTION_COEFFICIENT),
            variable: None,
            coordinate: None,
        }
    }
}

impl Default for AdvectionCoefficient {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(AdvectionCoefficient {
    text variable: String = VARIABLE => is_set_variable, set_variable, unset_variable;
    token coordinate: CoordinateKind = COORDINATE => is_set_coordinate, set_coordinate, unset_coordinate;
});

impl Node for AdvectionCoefficient {
    element_core_access!();
    attribute_table_access!(ADVECTION_COEFFICIENT_ATTRIBUTES);
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCondition {
    core: ElementCore,
    variable: Option<String>,
    condition_type: Option<BoundaryKind>,
    coordinate_boundary: Option<String>,
    boundary_domain_type: Option<String>,
}

impl BoundaryCondition {
    pub fn new() -> Self {
        Self {
            core: spatial_element(BOUNDARY_CONDITION),
            variable: None,
            condition_type: None,
            coordinate_boundary: None,
            boundary_domain_type: None,
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(BoundaryCondition {
    text variable: String = VARIABLE => is_set_variable, set_variable, unset_variable;
    token condition_type: BoundaryKind = TYPE
        => is_set_condition_type, set_condition_type, unset_condition_type;
    text coordinate_boundary: String = COORDINATE_BOUNDARY
        => is_set_coordinate_boundary, set_coordinate_boundary, unset_coordinate_boundary;
    text boundary_domain_type: String = BOUNDARY_DOMAIN_TYPE
        => is_set_boundary_domain_type, set_boundary_domain_type, unset_boundary_domain_type;
});

impl Node for BoundaryCondition {
    element_core_access!();
    attribute_table_access!(BOUNDARY_CONDITION_ATTRIBUTES);
}

#[cfg(test)]
mod tests {
    use super::{BoundaryCondition, DiffusionCoefficient, ParameterRole};
    use crate::diagnostics::CollectedDiagnostics;
    use crate::model::Node;
    use crate::spatial::kinds::{BoundaryKind, DiffusionKind};

    #[test]
    fn type_attribute_parses_per_role() {
        let mut diagnostics = CollectedDiagnostics::new();
        let mut diffusion = DiffusionCoefficient::new();
        assert!(diffusion.read_attribute("type", "spatial", "anisotropic", &mut diagnostics));
        let mut boundary = BoundaryCondition::new();
        assert!(boundary.read_attribute("type", "spatial", "Dirichlet", &mut diagnostics));

        assert!(diagnostics.is_empty());
        assert_eq!(diffusion.diffusion_type(), Some(DiffusionKind::Anisotropic));
        assert_eq!(boundary.condition_type(), Some(BoundaryKind::Dirichlet));
    }

    #[test]
    fn role_enum_exposes_variable_and_element_name() {
        let mut boundary = BoundaryCondition::new();
        boundary.set_variable("glucose");
        let role = ParameterRole::from(boundary);
        assert_eq!(role.variable(), Some("glucose"));
        assert_eq!(role.element_name(), "boundaryCondition");
        assert!(!role.carries_secondary_id());
    }
}
