use crate::model::node::{Children, ChildrenMut};
use crate::model::{AttributeTable, ElementCore, Node};
use crate::spatial::kinds::CoordinateKind;
use crate::spatial::{spatial_element, BOUNDARY_MAX, BOUNDARY_MIN, COORDINATE_COMPONENT, SPATIAL};
use once_cell::sync::Lazy;

pub const TYPE: &str = "type";
pub const UNIT: &str = "unit";
pub const VALUE: &str = "value";

static COORDINATE_COMPONENT_ATTRIBUTES: Lazy<AttributeTable<CoordinateComponent>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .token(
                TYPE,
                CoordinateComponent::component_type,
                CoordinateComponent::set_component_type,
                CoordinateComponent::unset_component_type,
            )
            .text(
                UNIT,
                CoordinateComponent::unit,
                |component: &mut CoordinateComponent, unit: String| component.set_unit(unit),
                CoordinateComponent::unset_unit,
            )
    });

static BOUNDARY_ATTRIBUTES: Lazy<AttributeTable<Boundary>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(VALUE, Boundary::value, Boundary::set_value, Boundary::unset_value)
});

/// One axis of the geometry's coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateComponent {
    core: ElementCore,
    component_type: Option<CoordinateKind>,
    unit: Option<String>,
    boundary_min: Option<Boundary>,
    boundary_max: Option<Boundary>,
}

impl CoordinateComponent {
    pub fn new() -> Self {
        Self {
            core: spatial_element(COORDINATE_COMPONENT),
            component_type: None,
            unit: None,
            boundary_min: None,
            boundary_max: None,
        }
    }
}

impl Default for CoordinateComponent {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CoordinateComponent {
    token component_type: CoordinateKind = TYPE
        => is_set_component_type, set_component_type, unset_component_type;
    text unit: String = UNIT => is_set_unit, set_unit, unset_unit;
});

child_slots!(CoordinateComponent {
    boundary_min: Boundary = BOUNDARY_MIN
        => is_set_boundary_min, boundary_min_mut, set_boundary_min, unset_boundary_min;
    boundary_max: Boundary = BOUNDARY_MAX
        => is_set_boundary_max, boundary_max_mut, set_boundary_max, unset_boundary_max;
});

impl Node for CoordinateComponent {
    element_core_access!();
    attribute_table_access!(COORDINATE_COMPONENT_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .slot(self.boundary_min.as_ref())
            .slot(self.boundary_max.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.boundary_min.as_mut())
            .slot(self.boundary_max.as_mut())
            .build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Lower or upper limit of a coordinate component.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    core: ElementCore,
    value: Option<f64>,
}

impl Boundary {
    /// Creates a `boundaryMin` element.
    pub fn min() -> Self {
        Self::with_element(BOUNDARY_MIN)
    }

    /// Creates a `boundaryMax` element.
    pub fn max() -> Self {
        Self::with_element(BOUNDARY_MAX)
    }

    fn with_element(element: &'static str) -> Self {
        Self {
            core: spatial_element(element),
            value: None,
        }
    }
}

optional_properties!(Boundary {
    double value: f64 = VALUE => is_set_value, set_value, unset_value;
});

impl Node for Boundary {
    element_core_access!();
    attribute_table_access!(BOUNDARY_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}
