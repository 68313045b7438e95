//! Constructive solid geometry tree.
//!
//! # Invariants
//! - A transformation owns at most one child node; a set operator owns an
//!   ordered list of child nodes.
//! - A homogeneous transformation also owns optional forward and reverse
//!   matrices, enumerated after its child node.
//! - Every CSG object and node carries a secondary id; matrices do not.

use crate::model::node::{attach, detach, Children, ChildrenMut};
use crate::model::{AttributeTable, ElementCore, ListOf, Node};
use crate::spatial::kinds::{PrimitiveKind, SetOperation};
use crate::spatial::{
    spatial_element, CSG_HOMOGENEOUS_TRANSFORMATION, CSG_NODE, CSG_OBJECT, CSG_PRIMITIVE,
    CSG_ROTATION, CSG_SCALE, CSG_SET_OPERATOR, CSG_TRANSLATION, DOMAIN_TYPE_REF,
    FORWARD_TRANSFORMATION, LIST_OF_CSG_NODES, ORDINAL, REVERSE_TRANSFORMATION, SPATIAL,
};
use once_cell::sync::Lazy;

pub const PRIMITIVE_TYPE: &str = "primitiveType";
pub const TRANSLATE_X: &str = "translateX";
pub const TRANSLATE_Y: &str = "translateY";
pub const TRANSLATE_Z: &str = "translateZ";
pub const ROTATE_AXIS_X: &str = "rotateAxisX";
pub const ROTATE_AXIS_Y: &str = "rotateAxisY";
pub const ROTATE_AXIS_Z: &str = "rotateAxisZ";
pub const ROTATE_ANGLE_IN_RADIANS: &str = "rotateAngleInRadians";
pub const SCALE_X: &str = "scaleX";
pub const SCALE_Y: &str = "scaleY";
pub const SCALE_Z: &str = "scaleZ";
pub const OPERATION_TYPE: &str = "operationType";
pub const COMPLEMENT_A: &str = "complementA";
pub const COMPLEMENT_B: &str = "complementB";
pub const COMPONENTS: &str = "components";
pub const COMPONENTS_LENGTH: &str = "componentsLength";

/// Node of a CSG tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CsgNode {
    Primitive(CsgPrimitive),
    Translation(CsgTranslation),
    Rotation(CsgRotation),
    Scale(CsgScale),
    HomogeneousTransformation(CsgHomogeneousTransformation),
    SetOperator(CsgSetOperator),
}

delegate_node!(CsgNode {
    Primitive,
    Translation,
    Rotation,
    Scale,
    HomogeneousTransformation,
    SetOperator,
});

impl From<CsgPrimitive> for CsgNode {
    fn from(node: CsgPrimitive) -> Self {
        Self::Primitive(node)
    }
}

impl From<CsgTranslation> for CsgNode {
    fn from(node: CsgTranslation) -> Self {
        Self::Translation(node)
    }
}

impl From<CsgRotation> for CsgNode {
    fn from(node: CsgRotation) -> Self {
        Self::Rotation(node)
    }
}

impl From<CsgScale> for CsgNode {
    fn from(node: CsgScale) -> Self {
        Self::Scale(node)
    }
}

impl From<CsgHomogeneousTransformation> for CsgNode {
    fn from(node: CsgHomogeneousTransformation) -> Self {
        Self::HomogeneousTransformation(node)
    }
}

impl From<CsgSetOperator> for CsgNode {
    fn from(node: CsgSetOperator) -> Self {
        Self::SetOperator(node)
    }
}

/// Accessors for the single boxed child node of a transformation or object.
macro_rules! csg_node_slot {
    ($owner:ty) => {
        impl $owner {
            pub fn csg_node(&self) -> Option<&CsgNode> {
                self.csg_node.as_deref()
            }

            pub fn csg_node_mut(&mut self) -> Option<&mut CsgNode> {
                self.csg_node.as_deref_mut()
            }

            pub fn is_set_csg_node(&self) -> bool {
                self.csg_node.is_some()
            }

            /// Sets the child node; the previous one is detached and returned.
            pub fn set_csg_node(&mut self, node: impl Into<CsgNode>) -> Option<CsgNode> {
                let previous = self.unset_csg_node();
                let mut node = Box::new(node.into());
                attach(self.core.handle(), &mut *node);
                self.csg_node = Some(node);
                self.core.node_added(CSG_NODE);
                previous
            }

            pub fn unset_csg_node(&mut self) -> Option<CsgNode> {
                let mut node = self.csg_node.take()?;
                detach(&mut *node);
                self.core.node_removed(CSG_NODE);
                Some(*node)
            }
        }
    };
}

/// Tree contract of a type whose only child is its boxed CSG node.
macro_rules! csg_node_children {
    () => {
        fn allows_children(&self) -> bool {
            true
        }

        fn children(&self) -> Vec<&dyn Node> {
            Children::new().slot(self.csg_node.as_deref()).build()
        }

        fn children_mut(&mut self) -> Vec<&mut dyn Node> {
            ChildrenMut::new().slot(self.csg_node.as_deref_mut()).build()
        }

        fn carries_secondary_id(&self) -> bool {
            true
        }
    };
}

static CSG_OBJECT_ATTRIBUTES: Lazy<AttributeTable<CsgObject>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .text(
            DOMAIN_TYPE_REF,
            CsgObject::domain_type,
            |object: &mut CsgObject, domain_type: String| object.set_domain_type(domain_type),
            CsgObject::unset_domain_type,
        )
        .value(ORDINAL, CsgObject::ordinal, CsgObject::set_ordinal, CsgObject::unset_ordinal)
});

static CSG_PRIMITIVE_ATTRIBUTES: Lazy<AttributeTable<CsgPrimitive>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).token(
        PRIMITIVE_TYPE,
        CsgPrimitive::primitive_type,
        CsgPrimitive::set_primitive_type,
        CsgPrimitive::unset_primitive_type,
    )
});

static CSG_TRANSLATION_ATTRIBUTES: Lazy<AttributeTable<CsgTranslation>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .value(
            TRANSLATE_X,
            CsgTranslation::translate_x,
            CsgTranslation::set_translate_x,
            CsgTranslation::unset_translate_x,
        )
        .value(
            TRANSLATE_Y,
            CsgTranslation::translate_y,
            CsgTranslation::set_translate_y,
            CsgTranslation::unset_translate_y,
        )
        .value(
            TRANSLATE_Z,
            CsgTranslation::translate_z,
            CsgTranslation::set_translate_z,
            CsgTranslation::unset_translate_z,
        )
});

static CSG_ROTATION_ATTRIBUTES: Lazy<AttributeTable<CsgRotation>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .value(
            ROTATE_AXIS_X,
            CsgRotation::rotate_axis_x,
            CsgRotation::set_rotate_axis_x,
            CsgRotation::unset_rotate_axis_x,
        )
        .value(
            ROTATE_AXIS_Y,
            CsgRotation::rotate_axis_y,
            CsgRotation::set_rotate_axis_y,
            CsgRotation::unset_rotate_axis_y,
        )
        .value(
            ROTATE_AXIS_Z,
            CsgRotation::rotate_axis_z,
            CsgRotation::set_rotate_axis_z,
            CsgRotation::unset_rotate_axis_z,
        )
        .value(
            ROTATE_ANGLE_IN_RADIANS,
            CsgRotation::rotate_angle_in_radians,
            CsgRotation::set_rotate_angle_in_radians,
            CsgRotation::unset_rotate_angle_in_radians,
        )
});

static CSG_SCALE_ATTRIBUTES: Lazy<AttributeTable<CsgScale>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .value(SCALE_X, CsgScale::scale_x, CsgScale::set_scale_x, CsgScale::unset_scale_x)
        .value(SCALE_Y, CsgScale::scale_y, CsgScale::set_scale_y, CsgScale::unset_scale_y)
        .value(SCALE_Z, CsgScale::scale_z, CsgScale::set_scale_z, CsgScale::unset_scale_z)
});

static CSG_HOMOGENEOUS_TRANSFORMATION_ATTRIBUTES: Lazy<
    AttributeTable<CsgHomogeneousTransformation>,
> = Lazy::new(|| AttributeTable::new(SPATIAL));

static TRANSFORMATION_COMPONENT_ATTRIBUTES: Lazy<AttributeTable<TransformationComponent>> =
    Lazy::new(|| {
        AttributeTable::new(SPATIAL)
            .value(
                COMPONENTS,
                |matrix: &TransformationComponent| matrix.components().map(<[f64]>::to_vec),
                TransformationComponent::set_components,
                TransformationComponent::unset_components,
            )
            .value(
                COMPONENTS_LENGTH,
                TransformationComponent::components_length,
                TransformationComponent::set_components_length,
                TransformationComponent::unset_components_length,
            )
    });

static CSG_SET_OPERATOR_ATTRIBUTES: Lazy<AttributeTable<CsgSetOperator>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL)
        .token(
            OPERATION_TYPE,
            CsgSetOperator::operation_type,
            CsgSetOperator::set_operation_type,
            CsgSetOperator::unset_operation_type,
        )
        .text(
            COMPLEMENT_A,
            CsgSetOperator::complement_a,
            |operator: &mut CsgSetOperator, node: String| operator.set_complement_a(node),
            CsgSetOperator::unset_complement_a,
        )
        .text(
            COMPLEMENT_B,
            CsgSetOperator::complement_b,
            |operator: &mut CsgSetOperator, node: String| operator.set_complement_b(node),
            CsgSetOperator::unset_complement_b,
        )
});

/// Domain type defined by a CSG tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgObject {
    core: ElementCore,
    domain_type: Option<String>,
    ordinal: Option<i32>,
    csg_node: Option<Box<CsgNode>>,
}

impl CsgObject {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_OBJECT),
            domain_type: None,
            ordinal: None,
            csg_node: None,
        }
    }
}

impl Default for CsgObject {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgObject {
    text domain_type: String = DOMAIN_TYPE_REF
        => is_set_domain_type, set_domain_type, unset_domain_type;
    value ordinal: i32 = ORDINAL => is_set_ordinal, set_ordinal, unset_ordinal;
});

csg_node_slot!(CsgObject);

impl Node for CsgObject {
    element_core_access!();
    attribute_table_access!(CSG_OBJECT_ATTRIBUTES);
    csg_node_children!();
}

/// Leaf shape of a CSG tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgPrimitive {
    core: ElementCore,
    primitive_type: Option<PrimitiveKind>,
}

impl CsgPrimitive {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_PRIMITIVE),
            primitive_type: None,
        }
    }
}

impl Default for CsgPrimitive {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgPrimitive {
    token primitive_type: PrimitiveKind = PRIMITIVE_TYPE
        => is_set_primitive_type, set_primitive_type, unset_primitive_type;
});

impl Node for CsgPrimitive {
    element_core_access!();
    attribute_table_access!(CSG_PRIMITIVE_ATTRIBUTES);

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsgTranslation {
    core: ElementCore,
    translate_x: Option<f64>,
    translate_y: Option<f64>,
    translate_z: Option<f64>,
    csg_node: Option<Box<CsgNode>>,
}

impl CsgTranslation {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_TRANSLATION),
            translate_x: None,
            translate_y: None,
            translate_z: None,
            csg_node: None,
        }
    }
}

impl Default for CsgTranslation {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgTranslation {
    double translate_x: f64 = TRANSLATE_X => is_set_translate_x, set_translate_x, unset_translate_x;
    double translate_y: f64 = TRANSLATE_Y => is_set_translate_y, set_translate_y, unset_translate_y;
    double translate_z: f64 = TRANSLATE_Z => is_set_translate_z, set_translate_z, unset_translate_z;
});

csg_node_slot!(CsgTranslation);

impl Node for CsgTranslation {
    element_core_access!();
    attribute_table_access!(CSG_TRANSLATION_ATTRIBUTES);
    csg_node_children!();
}

/// Rotation of the child node about an axis through the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgRotation {
    core: ElementCore,
    rotate_axis_x: Option<f64>,
    rotate_axis_y: Option<f64>,
    rotate_axis_z: Option<f64>,
    rotate_angle_in_radians: Option<f64>,
    csg_node: Option<Box<CsgNode>>,
}

impl CsgRotation {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_ROTATION),
            rotate_axis_x: None,
            rotate_axis_y: None,
            rotate_axis_z: None,
            rotate_angle_in_radians: None,
            csg_node: None,
        }
    }
}

impl Default for CsgRotation {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgRotation {
    double rotate_axis_x: f64 = ROTATE_AXIS_X
        => is_set_rotate_axis_x, set_rotate_axis_x, unset_rotate_axis_x;
    double rotate_axis_y: f64 = ROTATE_AXIS_Y
        => is_set_rotate_axis_y, set_rotate_axis_y, unset_rotate_axis_y;
    double rotate_axis_z: f64 = ROTATE_AXIS_Z
        => is_set_rotate_axis_z, set_rotate_axis_z, unset_rotate_axis_z;
    double rotate_angle_in_radians: f64 = ROTATE_ANGLE_IN_RADIANS
        => is_set_rotate_angle_in_radians, set_rotate_angle_in_radians,
           unset_rotate_angle_in_radians;
});

csg_node_slot!(CsgRotation);

impl Node for CsgRotation {
    element_core_access!();
    attribute_table_access!(CSG_ROTATION_ATTRIBUTES);
    csg_node_children!();
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsgScale {
    core: ElementCore,
    scale_x: Option<f64>,
    scale_y: Option<f64>,
    scale_z: Option<f64>,
    csg_node: Option<Box<CsgNode>>,
}

impl CsgScale {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_SCALE),
            scale_x: None,
            scale_y: None,
            scale_z: None,
            csg_node: None,
        }
    }
}

impl Default for CsgScale {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgScale {
    double scale_x: f64 = SCALE_X => is_set_scale_x, set_scale_x, unset_scale_x;
    double scale_y: f64 = SCALE_Y => is_set_scale_y, set_scale_y, unset_scale_y;
    double scale_z: f64 = SCALE_Z => is_set_scale_z, set_scale_z, unset_scale_z;
});

csg_node_slot!(CsgScale);

impl Node for CsgScale {
    element_core_access!();
    attribute_table_access!(CSG_SCALE_ATTRIBUTES);
    csg_node_children!();
}

/// Affine transformation of the child node given as 4x4 matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgHomogeneousTransformation {
    core: ElementCore,
    forward_transformation: Option<TransformationComponent>,
    reverse_transformation: Option<TransformationComponent>,
    csg_node: Option<Box<CsgNode>>,
}

impl CsgHomogeneousTransformation {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_HOMOGENEOUS_TRANSFORMATION),
            forward_transformation: None,
            reverse_transformation: None,
            csg_node: None,
        }
    }
}

impl Default for CsgHomogeneousTransformation {
    fn default() -> Self {
        Self::new()
    }
}

csg_node_slot!(CsgHomogeneousTransformation);

child_slots!(CsgHomogeneousTransformation {
    forward_transformation: TransformationComponent = FORWARD_TRANSFORMATION
        => is_set_forward_transformation, forward_transformation_mut,
           set_forward_transformation, unset_forward_transformation;
    reverse_transformation: TransformationComponent = REVERSE_TRANSFORMATION
        => is_set_reverse_transformation, reverse_transformation_mut,
           set_reverse_transformation, unset_reverse_transformation;
});

impl Node for CsgHomogeneousTransformation {
    element_core_access!();
    attribute_table_access!(CSG_HOMOGENEOUS_TRANSFORMATION_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .slot(self.csg_node.as_deref())
            .slot(self.forward_transformation.as_ref())
            .slot(self.reverse_transformation.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.csg_node.as_deref_mut())
            .slot(self.forward_transformation.as_mut())
            .slot(self.reverse_transformation.as_mut())
            .build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

/// Row-major matrix of a homogeneous transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationComponent {
    core: ElementCore,
    components: Option<Vec<f64>>,
    components_length: Option<i32>,
}

impl TransformationComponent {
    /// Creates a `forwardTransformation` element.
    pub fn forward() -> Self {
        Self::with_element(FORWARD_TRANSFORMATION)
    }

    /// Creates a `reverseTransformation` element.
    pub fn reverse() -> Self {
        Self::with_element(REVERSE_TRANSFORMATION)
    }

    fn with_element(element: &'static str) -> Self {
        Self {
            core: spatial_element(element),
            components: None,
            components_length: None,
        }
    }
}

optional_properties!(TransformationComponent {
    array components: f64 = COMPONENTS => is_set_components, set_components, unset_components;
    value components_length: i32 = COMPONENTS_LENGTH
        => is_set_components_length, set_components_length, unset_components_length;
});

impl Node for TransformationComponent {
    element_core_access!();
    attribute_table_access!(TRANSFORMATION_COMPONENT_ATTRIBUTES);
}

/// Union, intersection or difference of its child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgSetOperator {
    core: ElementCore,
    operation_type: Option<SetOperation>,
    complement_a: Option<String>,
    complement_b: Option<String>,
    csg_nodes: Option<ListOf<CsgNode>>,
}

impl CsgSetOperator {
    pub fn new() -> Self {
        Self {
            core: spatial_element(CSG_SET_OPERATOR),
            operation_type: None,
            complement_a: None,
            complement_b: None,
            csg_nodes: None,
        }
    }
}

impl Default for CsgSetOperator {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(CsgSetOperator {
    token operation_type: SetOperation = OPERATION_TYPE
        => is_set_operation_type, set_operation_type, unset_operation_type;
    text complement_a: String = COMPLEMENT_A
        => is_set_complement_a, set_complement_a, unset_complement_a;
    text complement_b: String = COMPLEMENT_B
        => is_set_complement_b, set_complement_b, unset_complement_b;
});

child_lists!(CsgSetOperator {
    csg_nodes: CsgNode = (LIST_OF_CSG_NODES, CSG_NODE, 0)
        => is_set_csg_nodes, csg_nodes_mut, set_csg_nodes, unset_csg_nodes,
           add_csg_node, remove_csg_node;
});

impl Node for CsgSetOperator {
    element_core_access!();
    attribute_table_access!(CSG_SET_OPERATOR_ATTRIBUTES);

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new().list(self.csg_nodes.as_ref()).build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new().slot(self.csg_nodes.as_mut()).build()
    }

    fn carries_secondary_id(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CsgHomogeneousTransformation, CsgNode, CsgPrimitive, CsgRotation, CsgSetOperator,
        TransformationComponent,
    };
    use crate::model::{node, Node};
    use crate::spatial::kinds::{PrimitiveKind, SetOperation};

    #[test]
    fn nested_nodes_are_linked_to_their_owner() {
        let mut sphere = CsgPrimitive::new();
        sphere.set_primitive_type(PrimitiveKind::Sphere);
        let mut rotation = CsgRotation::new();
        rotation.set_csg_node(sphere);

        let child = rotation.csg_node().expect("child node");
        assert_eq!(child.parent(), Some(rotation.handle()));
        assert_eq!(rotation.child_count(), 1);
    }

    #[test]
    fn set_operator_counts_its_list_as_one_child() {
        let mut union = CsgSetOperator::new();
        union.set_operation_type(SetOperation::Union);
        assert_eq!(union.child_count(), 0);

        union.add_csg_node(CsgNode::from(CsgPrimitive::new()));
        union.add_csg_node(CsgNode::from(CsgRotation::new()));
        assert_eq!(union.child_count(), 1);
        let list = union.child_at(0).expect("list slot");
        assert_eq!(list.child_count(), 2);
        assert_eq!(list.child_at(1).expect("rotation").element_name(), "csgRotation");
    }

    #[test]
    fn replacing_child_node_detaches_previous() {
        let mut rotation = CsgRotation::new();
        rotation.set_csg_node(CsgPrimitive::new());
        let previous = rotation
            .set_csg_node(CsgPrimitive::new())
            .expect("previous node returned");
        assert_eq!(previous.parent(), None);

        let copy = node::deep_clone(&rotation);
        assert_eq!(copy, rotation);
        let copied_child = copy.csg_node().expect("copied child");
        assert_eq!(copied_child.parent(), Some(copy.handle()));
    }

    #[test]
    fn homogeneous_transformation_enumerates_node_then_matrices() {
        let mut transformation = CsgHomogeneousTransformation::new();
        let mut reverse = TransformationComponent::reverse();
        reverse.set_components(vec![1.0; 16]);
        reverse.set_components_length(16);
        transformation.set_reverse_transformation(reverse);
        transformation.set_forward_transformation(TransformationComponent::forward());
        transformation.set_csg_node(CsgPrimitive::new());

        let names: Vec<_> = transformation
            .children()
            .into_iter()
            .map(|child| child.element_name())
            .collect();
        assert_eq!(
            names,
            vec!["csgPrimitive", "forwardTransformation", "reverseTransformation"]
        );
        let matrix = transformation.reverse_transformation().expect("reverse matrix");
        assert_eq!(matrix.parent(), Some(transformation.handle()));
        assert_eq!(matrix.components().map(<[f64]>::len), Some(16));
        assert!(!matrix.carries_secondary_id());

        let removed = transformation
            .unset_forward_transformation()
            .expect("forward matrix");
        assert_eq!(removed.parent(), None);
        assert_eq!(transformation.child_count(), 2);
    }

    #[test]
    fn homogeneous_transformation_is_a_csg_node() {
        let node = CsgNode::from(CsgHomogeneousTransformation::new());
        assert_eq!(node.element_name(), "csgHomogeneousTransformation");
        assert!(node.allows_children());
        assert!(node.carries_secondary_id());
    }
}
