//! Parametric surface description: a shared point array and polygon objects
//! indexing into it.

use crate::model::{AttributeTable, ElementCore, Node};
use crate::spatial::kinds::{CompressionKind, DataKind, PolygonKind};
use crate::spatial::{
    spatial_element, COMPRESSION, DATA_TYPE, DOMAIN_TYPE_REF, PARAMETRIC_OBJECT, SPATIAL,
    SPATIAL_POINTS,
};
use once_cell::sync::Lazy;

pub const ARRAY_DATA: &str = "arrayData";
pub const ARRAY_DATA_LENGTH: &str = "arrayDataLength";
pub const POLYGON_TYPE: &str = "polygonType";
pub const POINT_INDEX: &str = "pointIndex";
pub const POINT_INDEX_LENGTH: &str = "pointIndexLength";

static SPATIAL_POINTS_ATTRIBUTES: Lazy<AttributeTable<SpatialPoints>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .token(
            COMPRESSION,
            SpatialPoints::compression,
            SpatialPoints::set_compression,
            SpatialPoints::unset_compression,
        )
        .value(
            ARRAY_DATA,
            |points: &SpatialPoints| points.array_data().map(<[f64]>::to_vec),
            SpatialPoints::set_array_data,
            SpatialPoints::unset_array_data,
        )
        .value(
            ARRAY_DATA_LENGTH,
            SpatialPoints::array_data_length,
            SpatialPoints::set_array_data_length,
            SpatialPoints::unset_array_data_length,
        )
        .token(
            DATA_TYPE,
            SpatialPoints::data_type,
            SpatialPoints::set_data_type,
            SpatialPoints::unset_data_type,
        )
});

static PARAMETRIC_OBJECT_ATTRIBUTES: Lazy<AttributeTable<ParametricObject>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .token(
            POLYGON_TYPE,
            ParametricObject::polygon_type,
            ParametricObject::set_polygon_type,
            ParametricObject::unset_polygon_type,
        )
        .text(
            DOMAIN_TYPE_REF,
            ParametricObject::domain_type,
            |object: &mut ParametricObject, domain_type: String| object.set_domain_type(domain_type),
            ParametricObject::unset_domain_type,
        )
        .value(
            POINT_INDEX,
            |object: &ParametricObject| object.point_index().map(<[i32]>::to_vec),
            ParametricObject::set_point_index,
            ParametricObject::unset_point_index,
        )
        .value(
            POINT_INDEX_LENGTH,
            ParametricObject::point_index_length,
            ParametricObject::set_point_index_length,
            ParametricObject::unset_point_index_length,
        )
        .token(
            COMPRESSION,
            ParametricObject::compression,
            ParametricObject::set_compression,
            ParametricObject::unset_compression,
        )
        .token(
            DATA_TYPE,
            ParametricObject::data_type,
            ParametricObject::set_data_type,
            ParametricObject::unset_data_type,
        )
});

/// Flat coordinate array shared by the parametric objects of a geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPoints {
    core: ElementCore,
    compression: Option<CompressionKind>,
    array_data: Option<Vec<f64>>,
    array_data_length: Option<i32>,
    data_type: Option<DataKind>,
}

impl SpatialPoints {
    pub fn new() -> Self {
        Self {
            core: spatial_element(SPATIAL_POINTS),
            compression: None,
            array_data: None,
            array_data_length: None,
            data_type: None,
        }
    }
}

impl Default for SpatialPoints {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SpatialPoints {
    token compression: CompressionKind = COMPRESSION
        => is_set_compression, set_compression, unset_compression;
    array array_data: f64 = ARRAY_DATA => is_set_array_data, set_array_data, unset_array_data;
    value array_data_length: i32 = ARRAY_DATA_LENGTH
        => is_set_array_data_length, set_array_data_length, unset_array_data_length;
    token data_type: DataKind = DATA_TYPE => is_set_data_type, set_data_type, unset_data_type;
});

impl Node for SpatialPoints {
    element_core_access!();
    attribute_table_access!(SPATIAL_POINTS_ATTRIBUTES);
}

/// Surface of one domain type made of polygons over `SpatialPoints`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricObject {
    core: ElementCore,
    polygon_type: Option<PolygonKind>,
    domain_type: Option<String>,
    point_index: Option<Vec<i32>>,
    point_index_length: Option<i32>,
    compression: Option<CompressionKind>,
    data_type: Option<DataKind>,
}

impl ParametricObject {
    pub fn new() -> Self {
        Self {
            core: spatial_element(PARAMETRIC_OBJECT),
            polygon_type: None,
            domain_type: None,
            point_index: None,
            point_index_length: None,
            compression: None,
            data_type: None,
        }
    }

    /// Point indices grouped per polygon, or `None` when the polygon type or
    /// the index array is unset. A trailing incomplete group is dropped.
    pub fn polygons(&self) -> Option<Vec<&[i32]>> {
        let corners = match self.polygon_type? {
            PolygonKind::Triangle => 3,
            PolygonKind::Quadrilateral => 4,
        };
        Some(self.point_index()?.chunks_exact(corners).collect())
    }
}

impl Default for ParametricObject {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(ParametricObject {
    token polygon_type: PolygonKind = POLYGON_TYPE
        => is_set_polygon_type, set_polygon_type, unset_polygon_type;
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
    array point_index: i32 = POINT_INDEX => is_set_point_index, set_point_index, unset_point_index;
    value point_index_length: i32 = POINT_INDEX_LENGTH
        => is_set_point_index_length, set_point_index_length, unset_point_index_length;
    token compression: CompressionKind = COMPRESSION
        => is_set_compression, set_compression, unset_compression;
    token data_type: DataKind = DATA_TYPE => is_set_data_type, set_data_type, unset_data_type;
});

impl Node for ParametricObject {
    element_core_access!();
    attribute_table_access!(PARAMETRIC_OBJECT_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}
