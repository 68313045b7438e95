use sbml_core::model::node::{find_node, walk};
use sbml_core::spatial::{
    CoordinateComponent, CsgObject, CsgPrimitive, CsgRotation, Domain, Geometry, InteriorPoint,
    ParametricGeometry, ParametricObject, SpatialPoints,
};
use sbml_core::{Node, StructuralError};

fn assert_child_protocol(node: &dyn Node) {
    let count = node.child_count();
    for index in 0..count {
        assert!(node.child_at(index).is_ok(), "child {index} of {}", node.element_name());
    }
    let err = node.child_at(count).unwrap_err();
    assert_eq!(
        err,
        StructuralError::IndexOutOfBounds {
            index: count,
            bound: count
        }
    );
}

#[test]
fn slot_and_list_child_positions_are_fixed() {
    let mut definition = ParametricGeometry::new();
    assert_eq!(definition.child_count(), 0);
    assert!(definition.allows_children());

    definition.add_parametric_object(ParametricObject::new());
    assert_eq!(definition.child_count(), 1);
    let only = definition.child_at(0).unwrap();
    assert_eq!(only.element_name(), "listOfParametricObjects");
    assert_eq!(only.as_list().unwrap().item_count(), 1);

    definition.set_spatial_points(SpatialPoints::new());
    assert_eq!(definition.child_count(), 2);
    assert_eq!(definition.child_at(0).unwrap().element_name(), "spatialPoints");
    assert_eq!(
        definition.child_at(1).unwrap().element_name(),
        "listOfParametricObjects"
    );
    assert_child_protocol(&definition);
}

#[test]
fn child_at_out_of_range_reports_index_and_bound() {
    let mut component = CoordinateComponent::new();
    assert_child_protocol(&component);

    component.set_boundary_max(sbml_core::spatial::Boundary::max());
    assert_child_protocol(&component);
    let err = component.child_at(5).unwrap_err();
    assert_eq!(err, StructuralError::IndexOutOfBounds { index: 5, bound: 1 });
}

#[test]
fn leaf_elements_do_not_allow_children() {
    let point = InteriorPoint::new();
    assert!(!point.allows_children());
    assert_eq!(point.child_count(), 0);
    assert!(Domain::new().allows_children());
}

#[test]
fn children_are_linked_to_their_container() {
    let mut geometry = Geometry::new();
    let mut domain = Domain::new();
    domain.add_interior_point(InteriorPoint::new());
    geometry.add_domain(domain);

    let list = geometry.child_at(0).unwrap();
    assert_eq!(list.parent(), Some(geometry.handle()));
    let domain = list.as_list().unwrap().item_at(0).unwrap();
    assert_eq!(domain.parent(), Some(list.handle()));
    let interior_points = domain.child_at(0).unwrap();
    assert_eq!(interior_points.parent(), Some(domain.handle()));
}

#[test]
fn walk_visits_nested_csg_tree_in_order() {
    let mut rotation = CsgRotation::new();
    rotation.set_csg_node(CsgPrimitive::new());
    let mut object = CsgObject::new();
    object.set_csg_node(rotation);

    let mut names = Vec::new();
    walk(&object, &mut |node| names.push(node.element_name()));
    assert_eq!(names, vec!["csgObject", "csgRotation", "csgPrimitive"]);

    let primitive_handle = object
        .csg_node()
        .and_then(|node| node.child_at(0).ok())
        .map(|node| node.handle())
        .unwrap();
    let found = find_node(&object, primitive_handle).unwrap();
    assert_eq!(found.element_name(), "csgPrimitive");
}

#[test]
fn every_spatial_container_honours_child_protocol() {
    let mut geometry = Geometry::new();
    geometry.add_coordinate_component(CoordinateComponent::new());
    geometry.add_domain(Domain::new());
    assert_child_protocol(&geometry);
    for child in geometry.children() {
        assert_child_protocol(child);
    }
}
