//! Root of the spatial description of a model.
//!
//! # Invariants
//! - Children enumerate in a fixed order: adjacent domains, coordinate
//!   components, domains, domain types, geometry definitions, sampled fields.
//! - Only non-empty lists are children.

use crate::model::node::{Children, ChildrenMut};
use crate::model::{AttributeTable, ElementCore, ListOf, Node};
use crate::spatial::coordinate::CoordinateComponent;
use crate::spatial::definition::GeometryDefinition;
use crate::spatial::domain::{AdjacentDomains, Domain, DomainType};
use crate::spatial::kinds::{CoordinateKind, GeometryKind};
use crate::spatial::sampled_field::SampledField;
use crate::spatial::{
    spatial_element, ADJACENT_DOMAINS, COORDINATE_COMPONENT, DOMAIN, DOMAIN_TYPE, GEOMETRY,
    GEOMETRY_DEFINITION, LIST_OF_ADJACENT_DOMAINS, LIST_OF_COORDINATE_COMPONENTS,
    LIST_OF_DOMAINS, LIST_OF_DOMAIN_TYPES, LIST_OF_GEOMETRY_DEFINITIONS, LIST_OF_SAMPLED_FIELDS,
    SAMPLED_FIELD, SPATIAL,
};
use once_cell::sync::Lazy;

pub const COORDINATE_SYSTEM: &str = "coordinateSystem";

static GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<Geometry>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).token(
        COORDINATE_SYSTEM,
        Geometry::coordinate_system,
        Geometry::set_coordinate_system,
        Geometry::unset_coordinate_system,
    )
});

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    core: ElementCore,
    coordinate_system: Option<GeometryKind>,
    coordinate_components: Option<ListOf<CoordinateComponent>>,
    domain_types: Option<ListOf<DomainType>>,
    domains: Option<ListOf<Domain>>,
    adjacent_domains: Option<ListOf<AdjacentDomains>>,
    geometry_definitions: Option<ListOf<GeometryDefinition>>,
    sampled_fields: Option<ListOf<SampledField>>,
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(GEOMETRY),
            coordinate_system: None,
            coordinate_components: None,
            domain_types: None,
            domains: None,
            adjacent_domains: None,
            geometry_definitions: None,
            sampled_fields: None,
        }
    }

    /// Coordinate component describing `axis`, if declared.
    pub fn coordinate_component(&self, axis: CoordinateKind) -> Option<&CoordinateComponent> {
        self.coordinate_components()?
            .iter()
            .find(|component| component.component_type() == Some(axis))
    }

    /// Definitions flagged `isActive="true"`, in document order.
    pub fn active_definitions(&self) -> impl Iterator<Item = &GeometryDefinition> {
        self.geometry_definitions()
            .into_iter()
            .flat_map(|list| list.iter())
            .filter(|definition| definition.is_active() == Some(true))
    }

    /// Domains whose `domainType` refers to `domain_type`.
    pub fn domains_of_type<'a>(&'a self, domain_type: &'a str) -> impl Iterator<Item = &'a Domain> {
        self.domains()
            .into_iter()
            .flat_map(|list| list.iter())
            .filter(move |domain| domain.domain_type() == Some(domain_type))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Geometry {
    token coordinate_system: GeometryKind = COORDINATE_SYSTEM
        => is_set_coordinate_system, set_coordinate_system, unset_coordinate_system;
});

child_lists!(Geometry {
    coordinate_components: CoordinateComponent
        = (LIST_OF_COORDINATE_COMPONENTS, COORDINATE_COMPONENT, 0)
        => is_set_coordinate_components, coordinate_components_mut, set_coordinate_components,
           unset_coordinate_components, add_coordinate_component, remove_coordinate_component;
    domain_types: DomainType = (LIST_OF_DOMAIN_TYPES, DOMAIN_TYPE, 0)
        => is_set_domain_types, domain_types_mut, set_domain_types, unset_domain_types,
           add_domain_type, remove_domain_type;
    domains: Domain = (LIST_OF_DOMAINS, DOMAIN, 0)
        => is_set_domains, domains_mut, set_domains, unset_domains, add_domain, remove_domain;
    adjacent_domains: AdjacentDomains = (LIST_OF_ADJACENT_DOMAINS, ADJACENT_DOMAINS, 0)
        => is_set_adjacent_domains, adjacent_domains_mut, set_adjacent_domains,
           unset_adjacent_domains, add_adjacent_domains, remove_adjacent_domains;
    geometry_definitions: GeometryDefinition
        = (LIST_OF_GEOMETRY_DEFINITIONS, GEOMETRY_DEFINITION, 0)
        => is_set_geometry_definitions, geometry_definitions_mut, set_geometry_definitions,
           unset_geometry_definitions, add_geometry_definition, remove_geometry_definition;
    sampled_fields: SampledField = (LIST_OF_SAMPLED_FIELDS, SAMPLED_FIELD, 0)
        => is_set_sampled_fields, sampled_fields_mut, set_sampled_fields, unset_sampled_fields,
           add_sampled_field, remove_sampled_field;
});

impl Node for Geometry {
    element_core_access!();
    attribute_table_access!(GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .list(self.adjacent_domains.as_ref())
            .list(self.coordinate_components.as_ref())
            .list(self.domains.as_ref())
            .list(self.domain_types.as_ref())
            .list(self.geometry_definitions.as_ref())
            .list(self.sampled_fields.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.adjacent_domains.as_mut())
            .slot(self.coordinate_components.as_mut())
            .slot(self.domains.as_mut())
            .slot(self.domain_types.as_mut())
            .slot(self.geometry_definitions.as_mut())
            .slot(self.sampled_fields.as_mut())
            .build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Geometry;
    use crate::model::Node;
    use crate::spatial::coordinate::CoordinateComponent;
    use crate::spatial::definition::{AnalyticGeometry, CsGeometry, GeometryDefinition};
    use crate::spatial::domain::{AdjacentDomains, Domain, DomainType};
    use crate::spatial::kinds::CoordinateKind;
    use crate::spatial::sampled_field::SampledField;

    #[test]
    fn children_skip_empty_lists_and_keep_declaration_order() {
        let mut geometry = Geometry::new();
        geometry.add_sampled_field(SampledField::new());
        geometry.add_domain_type(DomainType::new());
        geometry.domains_mut();

        let names: Vec<_> = geometry
            .children()
            .into_iter()
            .map(|child| child.element_name())
            .collect();
        assert_eq!(names, vec!["listOfDomainTypes", "listOfSampledFields"]);
    }

    #[test]
    fn every_list_enumerates_in_fixed_order() {
        let mut geometry = Geometry::new();
        geometry.add_sampled_field(SampledField::new());
        geometry.add_geometry_definition(GeometryDefinition::from(CsGeometry::new()));
        geometry.add_domain_type(DomainType::new());
        geometry.add_domain(Domain::new());
        geometry.add_coordinate_component(CoordinateComponent::new());
        geometry.add_adjacent_domains(AdjacentDomains::new());

        let names: Vec<_> = (0..geometry.child_count())
            .map(|index| geometry.child_at(index).expect("child").element_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "listOfAdjacentDomains",
                "listOfCoordinateComponents",
                "listOfDomains",
                "listOfDomainTypes",
                "listOfGeometryDefinitions",
                "listOfSampledFields",
            ]
        );
    }

    #[test]
    fn coordinate_component_found_by_axis() {
        let mut geometry = Geometry::new();
        let mut x = CoordinateComponent::new();
        x.set_component_type(CoordinateKind::CartesianX);
        geometry.add_coordinate_component(x);

        assert!(geometry.coordinate_component(CoordinateKind::CartesianX).is_some());
        assert!(geometry.coordinate_component(CoordinateKind::CartesianY).is_none());
    }

    #[test]
    fn active_definitions_filter_on_flag() {
        let mut geometry = Geometry::new();
        let mut analytic = AnalyticGeometry::new();
        analytic.set_is_active(true);
        let mut csg = CsGeometry::new();
        csg.set_is_active(false);
        geometry.add_geometry_definition(GeometryDefinition::from(analytic));
        geometry.add_geometry_definition(GeometryDefinition::from(csg));

        let active: Vec<_> = geometry.active_definitions().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].element_name(), "analyticGeometry");
    }
}
