//! SBML Level 3 spatial package.
//!
//! # Responsibility
//! - Concrete spatial elements, each one instance of the generic element
//!   pattern: an attribute table, optional fields, child slots and lists.
//! - Plugins attaching spatial fields to core model, compartment, species,
//!   parameter and reaction elements.
//!
//! # Invariants
//! - Every spatial element writes its attributes, `id` and `name` included,
//!   under the `spatial` prefix.
//! - Secondary ids live in the `IdRegistry` of the `SpatialModelPlugin`
//!   attached to the model; nothing is registered globally.

pub mod coordinate;
pub mod csg;
pub mod definition;
pub mod domain;
pub mod geometry;
pub mod kinds;
pub mod mapping;
pub mod parameter_role;
pub mod parametric;
pub mod plugins;
pub mod sampled_field;

pub use coordinate::{Boundary, CoordinateComponent};
pub use csg::{
    CsgHomogeneousTransformation, CsgNode, CsgObject, CsgPrimitive, CsgRotation, CsgScale,
    CsgSetOperator, CsgTranslation, TransformationComponent,
};
pub use definition::{
    AnalyticGeometry, AnalyticVolume, CsGeometry, GeometryDefinition, MixedGeometry,
    OrdinalMapping, ParametricGeometry, SampledFieldGeometry, SampledVolume,
};
pub use domain::{AdjacentDomains, Domain, DomainType, InteriorPoint};
pub use geometry::Geometry;
pub use kinds::{
    BoundaryKind, CompressionKind, CoordinateKind, DataKind, DiffusionKind, FunctionKind,
    GeometryKind, InterpolationKind, PolygonKind, PrimitiveKind, SetOperation,
};
pub use mapping::CompartmentMapping;
pub use parameter_role::{
    AdvectionCoefficient, BoundaryCondition, DiffusionCoefficient, ParameterRole,
    SpatialSymbolReference,
};
pub use parametric::{ParametricObject, SpatialPoints};
pub use plugins::{
    rebuild_model_ids, GeometryEdit, SpatialCompartmentPlugin, SpatialModelPlugin,
    SpatialParameterPlugin, SpatialReactionPlugin, SpatialSpeciesPlugin,
};
pub use sampled_field::SampledField;

use crate::model::ElementCore;

/// Namespace URI of spatial Version 1 for SBML Level 3 Version 1.
pub const SPATIAL_NAMESPACE: &str = "http://www.sbml.org/sbml/level3/version1/spatial/version1";
/// Package label; also the attribute prefix.
pub const SPATIAL: &str = "spatial";

pub const GEOMETRY: &str = "geometry";
pub const COORDINATE_COMPONENT: &str = "coordinateComponent";
pub const BOUNDARY_MIN: &str = "boundaryMin";
pub const BOUNDARY_MAX: &str = "boundaryMax";
pub const DOMAIN_TYPE: &str = "domainType";
pub const DOMAIN: &str = "domain";
pub const INTERIOR_POINT: &str = "interiorPoint";
pub const ADJACENT_DOMAINS: &str = "adjacentDomains";
pub const GEOMETRY_DEFINITION: &str = "geometryDefinition";
pub const ANALYTIC_GEOMETRY: &str = "analyticGeometry";
pub const SAMPLED_FIELD_GEOMETRY: &str = "sampledFieldGeometry";
pub const CS_GEOMETRY: &str = "csGeometry";
pub const PARAMETRIC_GEOMETRY: &str = "parametricGeometry";
pub const MIXED_GEOMETRY: &str = "mixedGeometry";
pub const ORDINAL_MAPPING: &str = "ordinalMapping";
pub const ANALYTIC_VOLUME: &str = "analyticVolume";
pub const SAMPLED_VOLUME: &str = "sampledVolume";
pub const SAMPLED_FIELD: &str = "sampledField";
pub const CSG_OBJECT: &str = "csgObject";
pub const CSG_NODE: &str = "csgNode";
pub const CSG_PRIMITIVE: &str = "csgPrimitive";
pub const CSG_TRANSLATION: &str = "csgTranslation";
pub const CSG_ROTATION: &str = "csgRotation";
pub const CSG_SCALE: &str = "csgScale";
pub const CSG_SET_OPERATOR: &str = "csgSetOperator";
pub const CSG_HOMOGENEOUS_TRANSFORMATION: &str = "csgHomogeneousTransformation";
pub const FORWARD_TRANSFORMATION: &str = "forwardTransformation";
pub const REVERSE_TRANSFORMATION: &str = "reverseTransformation";
pub const SPATIAL_POINTS: &str = "spatialPoints";
pub const PARAMETRIC_OBJECT: &str = "parametricObject";
pub const COMPARTMENT_MAPPING: &str = "compartmentMapping";
pub const SPATIAL_SYMBOL_REFERENCE: &str = "spatialSymbolReference";
pub const DIFFUSION_COEFFICIENT: &str = "diffusionCoefficient";
pub const ADVECTION_COEFFICIENT: &str = "advectionCoefficient";
pub const BOUNDARY_CONDITION: &str = "boundaryCondition";

pub const LIST_OF_COORDINATE_COMPONENTS: &str = "listOfCoordinateComponents";
pub const LIST_OF_DOMAIN_TYPES: &str = "listOfDomainTypes";
pub const LIST_OF_DOMAINS: &str = "listOfDomains";
pub const LIST_OF_INTERIOR_POINTS: &str = "listOfInteriorPoints";
pub const LIST_OF_ADJACENT_DOMAINS: &str = "listOfAdjacentDomains";
pub const LIST_OF_GEOMETRY_DEFINITIONS: &str = "listOfGeometryDefinitions";
pub const LIST_OF_ANALYTIC_VOLUMES: &str = "listOfAnalyticVolumes";
pub const LIST_OF_SAMPLED_VOLUMES: &str = "listOfSampledVolumes";
pub const LIST_OF_SAMPLED_FIELDS: &str = "listOfSampledFields";
pub const LIST_OF_CSG_OBJECTS: &str = "listOfCSGObjects";
pub const LIST_OF_CSG_NODES: &str = "listOfCSGNodes";
pub const LIST_OF_PARAMETRIC_OBJECTS: &str = "listOfParametricObjects";
pub const LIST_OF_ORDINAL_MAPPINGS: &str = "listOfOrdinalMappings";

/// Shared attribute naming the domain type an element applies to.
pub(crate) const DOMAIN_TYPE_REF: &str = "domainType";
pub(crate) const ORDINAL: &str = "ordinal";
pub(crate) const COMPRESSION: &str = "compression";
pub(crate) const DATA_TYPE: &str = "dataType";
pub(crate) const VARIABLE: &str = "variable";
pub(crate) const TYPE: &str = "type";

fn spatial_element(element: &'static str) -> ElementCore {
    ElementCore::new(element, SPATIAL, SPATIAL_NAMESPACE)
}
