use crate::elements::{core_element, SPECIES};
use crate::model::{AttributeTable, ElementCore, Node, CORE_PACKAGE};
use once_cell::sync::Lazy;

pub const COMPARTMENT_REF: &str = "compartment";
pub const INITIAL_CONCENTRATION: &str = "initialConcentration";
pub const HAS_ONLY_SUBSTANCE_UNITS: &str = "hasOnlySubstanceUnits";
pub const BOUNDARY_CONDITION: &str = "boundaryCondition";
pub const CONSTANT: &str = "constant";

static SPECIES_ATTRIBUTES: Lazy<AttributeTable<Species>> = Lazy::new(|| {
    AttributeTable::new(CORE_PACKAGE)
        .text(
            COMPARTMENT_REF,
            Species::compartment,
            |species: &mut Species, compartment: String| species.set_compartment(compartment),
            Species::unset_compartment,
        )
        .value(
            INITIAL_CONCENTRATION,
            Species::initial_concentration,
            Species::set_initial_concentration,
            Species::unset_initial_concentration,
        )
        .value(
            HAS_ONLY_SUBSTANCE_UNITS,
            Species::has_only_substance_units,
            Species::set_has_only_substance_units,
            Species::unset_has_only_substance_units,
        )
        .value(
            BOUNDARY_CONDITION,
            Species::boundary_condition,
            Species::set_boundary_condition,
            Species::unset_boundary_condition,
        )
        .value(
            CONSTANT,
            Species::constant,
            Species::set_constant,
            Species::unset_constant,
        )
});

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    core: ElementCore,
    compartment: Option<String>,
    initial_concentration: Option<f64>,
    has_only_substance_units: Option<bool>,
    boundary_condition: Option<bool>,
    constant: Option<bool>,
}

impl Species {
    pub fn new() -> Self {
        Self {
            core: core_element(SPECIES),
            compartment: None,
            initial_concentration: None,
            has_only_substance_units: None,
            boundary_condition: None,
            constant: None,
        }
    }
}

impl Default for Species {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Species {
    text compartment: String = COMPARTMENT_REF
        => is_set_compartment, set_compartment, unset_compartment;
    double initial_concentration: f64 = INITIAL_CONCENTRATION
        => is_set_initial_concentration, set_initial_concentration, unset_initial_concentration;
    value has_only_substance_units: bool = HAS_ONLY_SUBSTANCE_UNITS
        => is_set_has_only_substance_units, set_has_only_substance_units,
           unset_has_only_substance_units;
    value boundary_condition: bool = BOUNDARY_CONDITION
        => is_set_boundary_condition, set_boundary_condition, unset_boundary_condition;
    value constant: bool = CONSTANT => is_set_constant, set_constant, unset_constant;
});

impl Node for Species {
    element_core_access!();
    attribute_table_access!(SPECIES_ATTRIBUTES);
}
