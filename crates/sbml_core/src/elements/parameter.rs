use crate::elements::{core_element, PARAMETER};
use crate::model::{AttributeTable, ElementCore, Node, CORE_PACKAGE};
use once_cell::sync::Lazy;

pub const VALUE: &str = "value";
pub const UNITS: &str = "units";
pub const CONSTANT: &str = "constant";

static PARAMETER_ATTRIBUTES: Lazy<AttributeTable<Parameter>> = Lazy::new(|| {
    AttributeTable::new(CORE_PACKAGE)
        .value(VALUE, Parameter::value, Parameter::set_value, Parameter::unset_value)
        .text(
            UNITS,
            Parameter::units,
            |parameter: &mut Parameter, units: String| parameter.set_units(units),
            Parameter::unset_units,
        )
        .value(
            CONSTANT,
            Parameter::constant,
            Parameter::set_constant,
            Parameter::unset_constant,
        )
});

/// Global quantity; spatial roles attach through the spatial plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    core: ElementCore,
    value: Option<f64>,
    units: Option<String>,
    constant: Option<bool>,
}

impl Parameter {
    pub fn new() -> Self {
        Self {
            core: core_element(PARAMETER),
            value: None,
            units: None,
            constant: None,
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Parameter {
    double value: f64 = VALUE => is_set_value, set_value, unset_value;
    text units: String = UNITS => is_set_units, set_units, unset_units;
    value constant: bool = CONSTANT => is_set_constant, set_constant, unset_constant;
});

impl Node for Parameter {
    element_core_access!();
    attribute_table_access!(PARAMETER_ATTRIBUTES);
}
