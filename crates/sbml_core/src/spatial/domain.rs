//! Domain types, domains, interior points and domain adjacency.

use crate::model::node::{Children, ChildrenMut};
use crate::model::{AttributeTable, ElementCore, ListOf, Node};
use crate::spatial::{
    spatial_element, ADJACENT_DOMAINS, DOMAIN, DOMAIN_TYPE, DOMAIN_TYPE_REF, INTERIOR_POINT,
    LIST_OF_INTERIOR_POINTS, SPATIAL,
};
use once_cell::sync::Lazy;

pub const SPATIAL_DIMENSIONS: &str = "spatialDimensions";
pub const COORD1: &str = "coord1";
pub const COORD2: &str = "coord2";
pub const COORD3: &str = "coord3";
pub const DOMAIN1: &str = "domain1";
pub const DOMAIN2: &str = "domain2";

static DOMAIN_TYPE_ATTRIBUTES: Lazy<AttributeTable<DomainType>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        SPATIAL_DIMENSIONS,
        DomainType::spatial_dimensions,
        DomainType::set_spatial_dimensions,
        DomainType::unset_spatial_dimensions,
    )
});

static DOMAIN_ATTRIBUTES: Lazy<AttributeTable<Domain>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).text(
        DOMAIN_TYPE_REF,
        Domain::domain_type,
        |domain: &mut Domain, domain_type: String| domain.set_domain_type(domain_type),
        Domain::unset_domain_type,
    )
});

static INTERIOR_POINT_ATTRIBUTES: Lazy<AttributeTable<InteriorPoint>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .value(
            COORD1,
            InteriorPoint::coord1,
            InteriorPoint::set_coord1,
            InteriorPoint::unset_coord1,
        )
        .value(
            COORD2,
            InteriorPoint::coord2,
            InteriorPoint::set_coord2,
            InteriorPoint::unset_coord2,
        )
        .value(
            COORD3,
            InteriorPoint::coord3,
            InteriorPoint::set_coord3,
            InteriorPoint::unset_coord3,
        )
});

static ADJACENT_DOMAINS_ATTRIBUTES: Lazy<AttributeTable<AdjacentDomains>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .text(
            DOMAIN1,
            AdjacentDomains::domain1,
            |adjacency: &mut AdjacentDomains, domain: String| adjacency.set_domain1(domain),
            AdjacentDomains::unset_domain1,
        )
        .text(
            DOMAIN2,
            AdjacentDomains::domain2,
            |adjacency: &mut AdjacentDomains, domain: String| adjacency.set_domain2(domain),
            AdjacentDomains::unset_domain2,
        )
});

/// Class of domains sharing a dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainType {
    core: ElementCore,
    spatial_dimensions: Option<i32>,
}

impl DomainType {
    pub fn new() -> Self {
        Self {
            core: spatial_element(DOMAIN_TYPE),
            spatial_dimensions: None,
        }
    }
}

impl Default for DomainType {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(DomainType {
    value spatial_dimensions: i32 = SPATIAL_DIMENSIONS
        => is_set_spatial_dimensions, set_spatial_dimensions, unset_spatial_dimensions;
});

impl Node for DomainType {
    element_core_access!();
    attribute_table_access!(DOMAIN_TYPE_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Contiguous region of one domain type.
///
/// Its interior point list, once created, must keep at least one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    core: ElementCore,
    domain_type: Option<String>,
    interior_points: Option<ListOf<InteriorPoint>>,
}

impl Domain {
    pub fn new() -> Self {
        Self {
            core: spatial_element(DOMAIN),
            domain_type: None,
            interior_points: None,
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Domain {
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
});

child_lists!(Domain {
    interior_points: InteriorPoint = (LIST_OF_INTERIOR_POINTS, INTERIOR_POINT, 1)
        => is_set_interior_points, interior_points_mut, set_interior_points,
           unset_interior_points, add_interior_point, remove_interior_point;
});

impl Node for Domain {
    element_core_access!();
    attribute_table_access!(DOMAIN_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new().list(self.interior_points.as_ref()).build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new().slot(self.interior_points.as_mut()).build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Point known to lie inside a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorPoint {
    core: ElementCore,
    coord1: Option<f64>,
    coord2: Option<f64>,
    coord3: Option<f64>,
}

impl InteriorPoint {
    pub fn new() -> Self {
        Self {
            core: spatial_element(INTERIOR_POINT),
            coord1: None,
            coord2: None,
            coord3: None,
        }
    }
}

impl Default for InteriorPoint {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(InteriorPoint {
    double coord1: f64 = COORD1 => is_set_coord1, set_coord1, unset_coord1;
    double coord2: f64 = COORD2 => is_set_coord2, set_coord2, unset_coord2;
    double coord3: f64 = COORD3 => is_set_coord3, set_coord3, unset_coord3;
});

impl Node for InteriorPoint {
    element_core_access!();
    attribute_table_access!(INTERIOR_POINT_ATTRIBUTES);
}

/// Declares two domains as touching.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacentDomains {
    core: ElementCore,
    domain1: Option<String>,
    domain2: Option<String>,
}

impl AdjacentDomains {
    pub fn new() -> Self {
        Self {
            core: spatial_element(ADJACENT_DOMAINS),
            domain1: None,
            domain2: None,
        }
    }
}

impl Default for AdjacentDomains {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(AdjacentDomains {
    text domain1: String = DOMAIN1 => is_set_domain1, set_domain1, unset_domain1;
    text domain2: String = DOMAIN2 => is_set_domain2, set_domain2, unset_domain2;
});

impl Node for AdjacentDomains {
    element_core_access!();
    attribute_table_access!(ADJACENT_DOMAINS_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}
