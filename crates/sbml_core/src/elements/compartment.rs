use crate::elements::{core_element, COMPARTMENT};
use crate::model::{AttributeTable, ElementCore, Node, CORE_PACKAGE};
use once_cell::sync::Lazy;

pub const SPATIAL_DIMENSIONS: &str = "spatialDimensions";
pub const SIZE: &str = "size";
pub const UNITS: &str = "units";
pub const CONSTANT: &str = "constant";

static COMPARTMENT_ATTRIBUTES: Lazy<AttributeTable<Compartment>> = Lazy::new(|| {
    AttributeTable::new(CORE_PACKAGE)
        .value(
            SPATIAL_DIMENSIONS,
            Compartment::spatial_dimensions,
            Compartment::set_spatial_dimensions,
            Compartment::unset_spatial_dimensions,
        )
        .value(SIZE, Compartment::size, Compartment::set_size, Compartment::unset_size)
        .text(
            UNITS,
            Compartment::units,
            |compartment: &mut Compartment, units: String| compartment.set_units(units),
            Compartment::unset_units,
        )
        .value(
            CONSTANT,
            Compartment::constant,
            Compartment::set_constant,
            Compartment::unset_constant,
        )
});

/// Bounded container in which species are located.
#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    core: ElementCore,
    spatial_dimensions: Option<f64>,
    size: Option<f64>,
    units: Option<String>,
    constant: Option<bool>,
}

impl Compartment {
    pub fn new() -> Self {
        Self {
            core: core_element(COMPARTMENT),
            spatial_dimensions: None,
            size: None,
            units: None,
            constant: None,
        }
    }
}

impl Default for Compartment {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Compartment {
    double spatial_dimensions: f64 = SPATIAL_DIMENSIONS
        => is_set_spatial_dimensions, set_spatial_dimensions, unset_spatial_dimensions;
    double size: f64 = SIZE => is_set_size, set_size, unset_size;
    text units: String = UNITS => is_set_units, set_units, unset_units;
    value constant: bool = CONSTANT => is_set_constant, set_constant, unset_constant;
});

impl Node for Compartment {
    element_core_access!();
    attribute_table_access!(COMPARTMENT_ATTRIBUTES);
}
