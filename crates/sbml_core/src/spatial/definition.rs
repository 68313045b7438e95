//! Geometry definitions and their volume descriptions.
//!
//! # Invariants
//! - Every definition variant carries `isActive` and a secondary id.
//! - `GeometryDefinition` delegates the whole tree contract to its variant.
//! - A mixed geometry nests definitions of any variant, itself included.

use crate::model::node::{Children, ChildrenMut};
use crate::model::{AttributeTable, ElementCore, ListOf, Node};
use crate::spatial::csg::CsgObject;
use crate::spatial::kinds::FunctionKind;
use crate::spatial::parametric::{ParametricObject, SpatialPoints};
use crate::spatial::{
    spatial_element, ANALYTIC_GEOMETRY, ANALYTIC_VOLUME, CSG_OBJECT, CS_GEOMETRY,
    DOMAIN_TYPE_REF, GEOMETRY_DEFINITION, LIST_OF_ANALYTIC_VOLUMES, LIST_OF_CSG_OBJECTS,
    LIST_OF_GEOMETRY_DEFINITIONS, LIST_OF_ORDINAL_MAPPINGS, LIST_OF_PARAMETRIC_OBJECTS,
    LIST_OF_SAMPLED_VOLUMES, MIXED_GEOMETRY, ORDINAL, ORDINAL_MAPPING, PARAMETRIC_GEOMETRY,
    PARAMETRIC_OBJECT, SAMPLED_FIELD_GEOMETRY, SAMPLED_VOLUME, SPATIAL, SPATIAL_POINTS,
};
use once_cell::sync::Lazy;

pub const IS_ACTIVE: &str = "isActive";
pub const SAMPLED_FIELD_REF: &str = "sampledField";
pub const FUNCTION_TYPE: &str = "functionType";
pub const MATH: &str = "math";
pub const SAMPLED_VALUE: &str = "sampledValue";
pub const MIN_VALUE: &str = "minValue";
pub const MAX_VALUE: &str = "maxValue";
pub const GEOMETRY_DEFINITION_REF: &str = "geometryDefinition";

/// One way of describing the geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDefinition {
    Analytic(AnalyticGeometry),
    SampledField(SampledFieldGeometry),
    Csg(CsGeometry),
    Parametric(ParametricGeometry),
    Mixed(MixedGeometry),
}

delegate_node!(GeometryDefinition {
    Analytic,
    SampledField,
    Csg,
    Parametric,
    Mixed,
});

impl GeometryDefinition {
    pub fn is_active(&self) -> Option<bool> {
        match self {
            Self::Analytic(definition) => definition.is_active(),
            Self::SampledField(definition) => definition.is_active(),
            Self::Csg(definition) => definition.is_active(),
            Self::Parametric(definition) => definition.is_active(),
            Self::Mixed(definition) => definition.is_active(),
        }
    }
}

impl From<AnalyticGeometry> for GeometryDefinition {
    fn from(definition: AnalyticGeometry) -> Self {
        Self::Analytic(definition)
    }
}

impl From<SampledFieldGeometry> for GeometryDefinition {
    fn from(definition: SampledFieldGeometry) -> Self {
        Self::SampledField(definition)
    }
}

impl From<CsGeometry> for GeometryDefinition {
    fn from(definition: CsGeometry) -> Self {
        Self::Csg(definition)
    }
}

impl From<ParametricGeometry> for GeometryDefinition {
    fn from(definition: ParametricGeometry) -> Self {
        Self::Parametric(definition)
    }
}

impl From<MixedGeometry> for GeometryDefinition {
    fn from(definition: MixedGeometry) -> Self {
        Self::Mixed(definition)
    }
}

static ANALYTIC_GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<AnalyticGeometry>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        IS_ACTIVE,
        AnalyticGeometry::is_active,
        AnalyticGeometry::set_is_active,
        AnalyticGeometry::unset_is_active,
    )
});

static SAMPLED_FIELD_GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<SampledFieldGeometry>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .value(
                IS_ACTIVE,
                SampledFieldGeometry::is_active,
                SampledFieldGeometry::set_is_active,
                SampledFieldGeometry::unset_is_active,
            )
            .text(
                SAMPLED_FIELD_REF,
                SampledFieldGeometry::sampled_field,
                |definition: &mut SampledFieldGeometry, field: String| {
                    definition.set_sampled_field(field)
                },
                SampledFieldGeometry::unset_sampled_field,
            )
    });

static CS_GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<CsGeometry>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        IS_ACTIVE,
        CsGeometry::is_active,
        CsGeometry::set_is_active,
        CsGeometry::unset_is_active,
    )
});

static PARAMETRIC_GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<ParametricGeometry>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL).value(
            IS_ACTIVE,
            ParametricGeometry::is_active,
            ParametricGeometry::set_is_active,
            ParametricGeometry::unset_is_active,
        )
    });

static MIXED_GEOMETRY_ATTRIBUTES: Lazy<AttributeTable<MixedGeometry>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        IS_ACTIVE,
        MixedGeometry::is_active,
        MixedGeometry::set_is_active,
        MixedGeometry::unset_is_active,
    )
});

static ORDINAL_MAPPING_ATTRIBUTES: Lazy<AttributeTable<OrdinalMapping>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .value(
            ORDINAL,
            OrdinalMapping::ordinal,
            OrdinalMapping::set_ordinal,
            OrdinalMapping::unset_ordinal,
        )
        .text(
            GEOMETRY_DEFINITION_REF,
            OrdinalMapping::geometry_definition,
            |mapping: &mut OrdinalMapping, definition: String| {
                mapping.set_geometry_definition(definition)
            },
            OrdinalMapping::unset_geometry_definition,
        )
});

static ANALYTIC_VOLUME_ATTRIBUTES: Lazy<AttributeTable<AnalyticVolume>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .token(
            FUNCTION_TYPE,
            AnalyticVolume::function_type,
            AnalyticVolume::set_function_type,
            AnalyticVolume::unset_function_type,
        )
        .text(
            DOMAIN_TYPE_REF,
            AnalyticVolume::domain_type,
            |volume: &mut AnalyticVolume, domain_type: String| volume.set_domain_type(domain_type),
            AnalyticVolume::unset_domain_type,
        )
        .value(
            ORDINAL,
            AnalyticVolume::ordinal,
            AnalyticVolume::set_ordinal,
            AnalyticVolume::unset_ordinal,
        )
});

static SAMPLED_VOLUME_ATTRIBUTES: Lazy<AttributeTable<SampledVolume>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .text(
            DOMAIN_TYPE_REF,
            SampledVolume::domain_type,
            |volume: &mut SampledVolume, domain_type: String| volume.set_domain_type(domain_type),
            SampledVolume::unset_domain_type,
        )
        .value(
            SAMPLED_VALUE,
            SampledVolume::sampled_value,
            SampledVolume::set_sampled_value,
            SampledVolume::unset_sampled_value,
        )
        .value(
            MIN_VALUE,
            SampledVolume::min_value,
            SampledVolume::set_min_value,
            SampledVolume::unset_min_value,
        )
        .value(
            MAX_VALUE,
            SampledVolume::max_value,
            SampledVolume::set_max_value,
            SampledVolume::unset_max_value,
        )
});

/// Geometry described by inequalities over the coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticGeometry {
    core: ElementCore,
    is_active: Option<bool>,
    analytic_volumes: Option<ListOf<AnalyticVolume>>,
}

impl AnalyticGeometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(ANALYTIC_GEOMETRY),
            is_active: None,
            analytic_volumes: None,
        }
    }
}

impl Default for AnalyticGeometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(AnalyticGeometry {
    value is_active: bool = IS_ACTIVE => is_set_is_active, set_is_active, unset_is_active;
});

child_lists!(AnalyticGeometry {
    analytic_volumes: AnalyticVolume = (LIST_OF_ANALYTIC_VOLUMES, ANALYTIC_VOLUME, 0)
        => is_set_analytic_volumes, analytic_volumes_mut, set_analytic_volumes,
           unset_analytic_volumes, add_analytic_volume, remove_analytic_volume;
});

impl Node for AnalyticGeometry {
    element_core_access!();
    attribute_table_access!(ANALYTIC_GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new().list(self.analytic_volumes.as_ref()).build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new().slot(self.analytic_volumes.as_mut()).build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Geometry derived from a sampled field.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFieldGeometry {
    core: ElementCore,
    is_active: Option<bool>,
    sampled_field: Option<String>,
    sampled_volumes: Option<ListOf<SampledVolume>>,
}

impl SampledFieldGeometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(SAMPLED_FIELD_GEOMETRY),
            is_active: None,
            sampled_field: None,
            sampled_volumes: None,
        }
    }
}

impl Default for SampledFieldGeometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SampledFieldGeometry {
    value is_active: bool = IS_ACTIVE => is_set_is_active, set_is_active, unset_is_active;
    text sampled_field: String = SAMPLED_FIELD_REF
        => is_set_sampled_field, set_sampled_field, unset_sampled_field;
});

child_lists!(SampledFieldGeometry {
    sampled_volumes: SampledVolume = (LIST_OF_SAMPLED_VOLUMES, SAMPLED_VOLUME, 0)
        => is_set_sampled_volumes, sampled_volumes_mut, set_sampled_volumes,
           unset_sampled_volumes, add_sampled_volume, remove_sampled_volume;
});

impl Node for SampledFieldGeometry {
    element_core_access!();
    attribute_table_access!(SAMPLED_FIELD_GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new().list(self.sampled_volumes.as_ref()).build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new().slot(self.sampled_volumes.as_mut()).build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Constructive solid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CsGeometry {
    core: ElementCore,
    is_active: Option<bool>,
    csg_objects: Option<ListOf<CsgObject>>,
}

impl CsGeometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CS_GEOMETRY),
            is_active: None,
            csg_objects: None,
        }
    }
}

impl Default for CsGeometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsGeometry {
    value is_active: bool = IS_ACTIVE => is_set_is_active, set_is_active, unset_is_active;
});

child_lists!(CsGeometry {
    csg_objects: CsgObject = (LIST_OF_CSG_OBJECTS, CSG_OBJECT, 0)
        => is_set_csg_objects, csg_objects_mut, set_csg_objects, unset_csg_objects,
           add_csg_object, remove_csg_object;
});

impl Node for CsGeometry {
    element_core_access!();
    attribute_table_access!(CS_GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new().list(self.csg_objects.as_ref()).build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new().slot(self.csg_objects.as_mut()).build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Geometry given as a polygon mesh over shared points.
///
/// Children enumerate as the point set first, then the object list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricGeometry {
    core: ElementCore,
    is_active: Option<bool>,
    spatial_points: Option<SpatialPoints>,
    parametric_objects: Option<ListOf<ParametricObject>>,
}

impl ParametricGeometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(PARAMETRIC_GEOMETRY),
            is_active: None,
            spatial_points: None,
            parametric_objects: None,
        }
    }
}

impl Default for ParametricGeometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(ParametricGeometry {
    value is_active: bool = IS_ACTIVE => is_set_is_active, set_is_active, unset_is_active;
});

child_slots!(ParametricGeometry {
    spatial_points: SpatialPoints = SPATIAL_POINTS
        => is_set_spatial_points, spatial_points_mut, set_spatial_points, unset_spatial_points;
});

child_lists!(ParametricGeometry {
    parametric_objects: ParametricObject = (LIST_OF_PARAMETRIC_OBJECTS, PARAMETRIC_OBJECT, 0)
        => is_set_parametric_objects, parametric_objects_mut, set_parametric_objects,
           unset_parametric_objects, add_parametric_object, remove_parametric_object;
});

impl Node for ParametricGeometry {
    element_core_access!();
    attribute_table_access!(PARAMETRIC_GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .slot(self.spatial_points.as_ref())
            .list(self.parametric_objects.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.spatial_points.as_mut())
            .slot(self.parametric_objects.as_mut())
            .build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Combination of other geometry definitions.
///
/// Children enumerate as the nested definitions first, then the ordinal
/// mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedGeometry {
    core: ElementCore,
    is_active: Option<bool>,
    geometry_definitions: Option<ListOf<GeometryDefinition>>,
    ordinal_mappings: Option<ListOf<OrdinalMapping>>,
}

impl MixedGeometry {
    pub fn new() -> Self {
        Self {
            core: spatial_element(MIXED_GEOMETRY),
            is_active: None,
            geometry_definitions: None,
            ordinal_mappings: None,
        }
    }

    /// Ordinal assigned to the nested definition `id`, if mapped.
    pub fn ordinal_of(&self, id: &str) -> Option<i32> {
        self.ordinal_mappings()?
            .iter()
            .find(|mapping| mapping.geometry_definition() == Some(id))?
            .ordinal()
    }
}

impl Default for MixedGeometry {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(MixedGeometry {
    value is_active: bool = IS_ACTIVE => is_set_is_active, set_is_active, unset_is_active;
});

child_lists!(MixedGeometry {
    geometry_definitions: GeometryDefinition
        = (LIST_OF_GEOMETRY_DEFINITIONS, GEOMETRY_DEFINITION, 0)
        => is_set_geometry_definitions, geometry_definitions_mut, set_geometry_definitions,
           unset_geometry_definitions, add_geometry_definition, remove_geometry_definition;
    ordinal_mappings: OrdinalMapping = (LIST_OF_ORDINAL_MAPPINGS, ORDINAL_MAPPING, 0)
        => is_set_ordinal_mappings, ordinal_mappings_mut, set_ordinal_mappings,
           unset_ordinal_mappings, add_ordinal_mapping, remove_ordinal_mapping;
});

impl Node for MixedGeometry {
    element_core_access!();
    attribute_table_access!(MIXED_GEOMETRY_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .list(self.geometry_definitions.as_ref())
            .list(self.ordinal_mappings.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.geometry_definitions.as_mut())
            .slot(self.ordinal_mappings.as_mut())
            .build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Precedence of one nested definition of a mixed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalMapping {
    core: ElementCore,
    geometry_definition: Option<String>,
    ordinal: Option<i32>,
}

impl OrdinalMapping {
    pub fn new() -> Self {
        Self {
            core: spatial_element(ORDINAL_MAPPING),
            geometry_definition: None,
            ordinal: None,
        }
    }
}

impl Default for OrdinalMapping {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(OrdinalMapping {
    text geometry_definition: String = GEOMETRY_DEFINITION_REF
        => is_set_geometry_definition, set_geometry_definition, unset_geometry_definition;
    value ordinal: i32 = ORDINAL => is_set_ordinal, set_ordinal, unset_ordinal;
});

impl Node for OrdinalMapping {
    element_core_access!();
    attribute_table_access!(ORDINAL_MAPPING_ATTRIBUTES);
}

/// Region selected by an analytic expression.
///
/// `math` holds the expression text; it is element content, not an attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticVolume {
    core: ElementCore,
    function_type: Option<FunctionKind>,
    domain_type: Option<String>,
    ordinal: Option<i32>,
    math: Option<String>,
}

impl AnalyticVolume {
    pub fn new() -> Self {
        Self {
            core: spatial_element(ANALYTIC_VOLUME),
            function_type: None,
            domain_type: None,
            ordinal: None,
            math: None,
        }
    }
}

impl Default for AnalyticVolume {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(AnalyticVolume {
    token function_type: FunctionKind = FUNCTION_TYPE
        => is_set_function_type, set_function_type, unset_function_type;
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
    value ordinal: i32 = ORDINAL => is_set_ordinal, set_ordinal, unset_ordinal;
    text math: String = MATH => is_set_math, set_math, unset_math;
});

impl Node for AnalyticVolume {
    element_core_access!();
    attribute_table_access!(ANALYTIC_VOLUME_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Range of sampled values mapped to one domain type.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledVolume {
    core: ElementCore,
    domain_type: Option<String>,
    sampled_value: Option<f64>,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

impl SampledVolume {
    pub fn new() -> Self {
        Self {
            core: spatial_element(SAMPLED_VOLUME),
            domain_type: None,
            sampled_value: None,
            min_value: None,
            max_value: None,
        }
    }
}

impl Default for SampledVolume {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SampledVolume {
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
    double sampled_value: f64 = SAMPLED_VALUE
        => is_set_sampled_value, set_sampled_value, unset_sampled_value;
    double min_value: f64 = MIN_VALUE => is_set_min_value, set_min_value, unset_min_value;
    double max_value: f64 = MAX_VALUE => is_set_max_value, set_max_value, unset_max_value;
});

impl Node for SampledVolume {
    element_core_access!();
    attribute_table_access!(SAMPLED_VOLUME_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AnalyticGeometry, GeometryDefinition, MixedGeometry, OrdinalMapping, ParametricGeometry,
    };
    use crate::model::{node, Node};
    use crate::spatial::parametric::{ParametricObject, SpatialPoints};

    #[test]
    fn point_set_slot_precedes_object_list() {
        let mut geometry = ParametricGeometry::new();
        assert_eq!(geometry.child_count(), 0);
        assert!(geometry.allows_children());

        geometry.add_parametric_object(ParametricObject::new());
        assert_eq!(geometry.child_count(), 1);
        assert_eq!(
            geometry.child_at(0).expect("list slot").element_name(),
            "listOfParametricObjects"
        );

        geometry.set_spatial_points(SpatialPoints::new());
        assert_eq!(geometry.child_count(), 2);
        assert_eq!(
            geometry.child_at(0).expect("point slot").element_name(),
            "spatialPoints"
        );
        assert_eq!(
            geometry.child_at(1).expect("list slot").element_name(),
            "listOfParametricObjects"
        );
        assert!(geometry.child_at(2).is_err());
    }

    #[test]
    fn definition_enum_delegates_tree_contract() {
        let mut parametric = ParametricGeometry::new();
        parametric.set_is_active(true);
        parametric.set_spatial_points(SpatialPoints::new());
        let definition = GeometryDefinition::from(parametric);

        assert_eq!(definition.element_name(), "parametricGeometry");
        assert_eq!(definition.child_count(), 1);
        assert_eq!(definition.is_active(), Some(true));
        assert!(definition.carries_secondary_id());
    }

    #[test]
    fn mixed_geometry_nests_definitions_before_mappings() {
        let mut mixed = MixedGeometry::new();
        assert_eq!(mixed.child_count(), 0);

        let mut mapping = OrdinalMapping::new();
        mapping.set_geometry_definition("inner");
        mapping.set_ordinal(2);
        mixed.add_ordinal_mapping(mapping);
        let mut inner = AnalyticGeometry::new();
        inner.core_mut().set_id("inner").expect("valid id");
        mixed.add_geometry_definition(GeometryDefinition::from(inner));

        let names: Vec<_> = mixed
            .children()
            .into_iter()
            .map(|child| child.element_name())
            .collect();
        assert_eq!(names, vec!["listOfGeometryDefinitions", "listOfOrdinalMappings"]);
        assert_eq!(mixed.ordinal_of("inner"), Some(2));
        assert_eq!(mixed.ordinal_of("other"), None);

        let nested = mixed.child_at(0).expect("definition list");
        assert_eq!(nested.parent(), Some(mixed.handle()));
        assert_eq!(
            nested.child_at(0).expect("nested definition").element_name(),
            "analyticGeometry"
        );
    }

    #[test]
    fn mixed_geometry_can_nest_itself() {
        let mut inner = MixedGeometry::new();
        inner.set_is_active(false);
        let mut outer = MixedGeometry::new();
        outer.set_is_active(true);
        outer.add_geometry_definition(GeometryDefinition::from(inner));

        let definition = GeometryDefinition::from(outer);
        assert_eq!(definition.element_name(), "mixedGeometry");
        assert_eq!(definition.is_active(), Some(true));
        let copy = node::deep_clone(&definition);
        assert_eq!(copy, definition);
    }

    #[test]
    fn ordinal_mapping_has_no_secondary_id_or_children() {
        let mut mapping = OrdinalMapping::new();
        mapping.core_mut().set_id("om").expect("valid id");
        assert!(!mapping.allows_children());
        assert_eq!(mapping.child_count(), 0);
        assert_eq!(mapping.secondary_id(), None);
    }
}
