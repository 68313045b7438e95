//! Mapping of a core compartment onto a spatial domain type.

use crate::model::{AttributeTable, ElementCore, Node};
use crate::spatial::{spatial_element, COMPARTMENT_MAPPING, DOMAIN_TYPE_REF, SPATIAL};
use once_cell::sync::Lazy;

pub const COMPARTMENT_REF: &str = "compartment";
pub const UNIT_SIZE: &str = "unitSize";

static COMPARTMENT_MAPPING_ATTRIBUTES: Lazy<AttributeTable<CompartmentMapping>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .text(
                COMPARTMENT_REF,
                CompartmentMapping::compartment,
                |mapping: &mut CompartmentMapping, compartment: String| {
                    mapping.set_compartment(compartment)
                },
                CompartmentMapping::unset_compartment,
            )
            .text(
                DOMAIN_TYPE_REF,
                CompartmentMapping::domain_type,
                |mapping: &mut CompartmentMapping, domain_type: String| {
                    mapping.set_domain_type(domain_type)
                },
                CompartmentMapping::unset_domain_type,
            )
            .value(
                UNIT_SIZE,
                CompartmentMapping::unit_size,
                CompartmentMapping::set_unit_size,
                CompartmentMapping::unset_unit_size,
            )
    });

/// Share of a domain type occupied by one compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentMapping {
    core: ElementCore,
    compartment: Option<String>,
    domain_type: Option<String>,
    unit_size: Option<f64>,
}

impl CompartmentMapping {
    pub fn new() -> Self {
        Self {
            core: spatial_element(COMPARTMENT_MAPPING),
            compartment: None,
            domain_type: None,
            unit_size: None,
        }
    }
}

impl Default for CompartmentMapping {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CompartmentMapping {
    text compartment: String = COMPARTMENT_REF
        => is_set_compartment, set_compartment, unset_compartment;
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
    double unit_size: f64 = UNIT_SIZE => is_set_unit_size, set_unit_size, unset_unit_size;
});

impl Node for CompartmentMapping {
    element_core_access!();
    attribute_table_access!(COMPARTMENT_MAPPING_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::CompartmentMapping;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::model::Node;

    #[test]
    fn compartment_reference_is_written_under_spatial_prefix() {
        let mut mapping = CompartmentMapping::new();
        mapping.set_compartment("cytosol");
        mapping.set_domain_type("cell");
        mapping.set_unit_size(0.5);

        let attributes = mapping.write_xml_attributes();
        assert_eq!(
            attributes.get("spatial:compartment").map(String::as_str),
            Some("cytosol")
        );

        let mut copy = CompartmentMapping::new();
        let mut diagnostics = CollectedDiagnostics::new();
        assert!(copy.read_attributes(&attributes, &mut diagnostics).is_empty());
        assert_eq!(copy, mapping);
    }
}
