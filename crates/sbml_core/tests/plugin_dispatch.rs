use sbml_core::elements::{Compartment, Model, Parameter, Reaction, Species};
use sbml_core::spatial::{
    CompartmentMapping, DiffusionCoefficient, Geometry, ParameterRole, SpatialCompartmentPlugin,
    SpatialModelPlugin, SpatialParameterPlugin, SpatialReactionPlugin, SpatialSpeciesPlugin,
    SPATIAL, SPATIAL_NAMESPACE,
};
use sbml_core::{CollectedDiagnostics, DiagnosticCode, Node, Plugin, StructuralError};

#[test]
fn host_fans_unconsumed_attributes_out_to_plugin() {
    let mut species = Species::new();
    species
        .core_mut()
        .add_plugin(Box::new(SpatialSpeciesPlugin::new()));
    let mut diagnostics = CollectedDiagnostics::new();

    assert!(species.read_attribute("compartment", "", "cell", &mut diagnostics));
    assert!(species.read_attribute("isSpatial", "spatial", "true", &mut diagnostics));
    assert!(!species.read_attribute("isSpatial", "other", "true", &mut diagnostics));
    assert!(diagnostics.is_empty());

    let plugin = species
        .core()
        .plugins()
        .get::<SpatialSpeciesPlugin>(SPATIAL)
        .unwrap()
        .unwrap();
    assert_eq!(plugin.is_spatial(), Some(true));
}

#[test]
fn written_map_is_union_of_host_and_plugins() {
    let mut reaction = Reaction::new();
    reaction.core_mut().set_id("r1").unwrap();
    reaction.set_reversible(false);
    let mut plugin = SpatialReactionPlugin::new();
    plugin.set_is_local(true);
    reaction.core_mut().add_plugin(Box::new(plugin));

    let attributes = reaction.write_xml_attributes();
    let keys: Vec<_> = attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "reversible", "spatial:isLocal"]);
}

#[test]
fn plugin_parent_is_host_parent() {
    let mut model = Model::new();
    let compartment = model.add_compartment(Compartment::new());
    compartment
        .core_mut()
        .add_plugin(Box::new(SpatialCompartmentPlugin::new()));

    let compartment = model.compartments().unwrap().get(0).unwrap();
    let plugin = compartment.core().plugins().get_dyn(SPATIAL).unwrap();
    let list_handle = model.child_at(0).unwrap().handle();
    assert_eq!(plugin.host(), Some(compartment.handle()));
    assert_eq!(plugin.parent(), Some(list_handle));
    assert_ne!(plugin.parent(), Some(compartment.handle()));
}

#[test]
fn plugin_parent_follows_host_when_host_is_inserted_later() {
    let mut compartment = Compartment::new();
    compartment
        .core_mut()
        .add_plugin(Box::new(SpatialCompartmentPlugin::new()));
    assert_eq!(compartment.core().plugins().get_dyn(SPATIAL).unwrap().parent(), None);

    let mut model = Model::new();
    let compartment = model.add_compartment(compartment);
    let host_parent = compartment.parent();
    assert!(host_parent.is_some());
    assert_eq!(
        compartment.core().plugins().get_dyn(SPATIAL).unwrap().parent(),
        host_parent
    );
}

#[test]
fn plugin_children_are_children_of_the_host_element() {
    let mut compartment = Compartment::new();
    let mut plugin = SpatialCompartmentPlugin::new();
    plugin.set_compartment_mapping(CompartmentMapping::new());
    compartment.core_mut().add_plugin(Box::new(plugin));

    let plugin = compartment.core().plugins().get_dyn(SPATIAL).unwrap();
    assert_eq!(plugin.child_count(), 1);
    assert_eq!(plugin.child_at(0).unwrap().parent(), Some(compartment.handle()));
    assert_eq!(compartment.child_count(), 0);
}

#[test]
fn typed_lookup_with_wrong_type_is_a_mismatch() {
    let mut parameter = Parameter::new();
    let mut plugin = SpatialParameterPlugin::new();
    plugin.set_role(DiffusionCoefficient::new());
    parameter.core_mut().add_plugin(Box::new(plugin));

    let err = parameter
        .core()
        .plugins()
        .get::<SpatialSpeciesPlugin>(SPATIAL)
        .unwrap_err();
    assert!(matches!(err, StructuralError::PluginMismatch { .. }));

    let plugin = parameter
        .core()
        .plugins()
        .get::<SpatialParameterPlugin>(SPATIAL)
        .unwrap()
        .unwrap();
    assert!(matches!(plugin.role(), Some(ParameterRole::Diffusion(_))));
    assert!(parameter.core().plugins().get::<SpatialParameterPlugin>("comp").unwrap().is_none());
}

#[test]
fn replacing_a_plugin_returns_the_detached_previous_one() {
    let mut model = Model::new();
    model
        .core_mut()
        .add_plugin(Box::new(SpatialModelPlugin::new()));
    let previous = model
        .core_mut()
        .add_plugin(Box::new(SpatialModelPlugin::new()))
        .unwrap();
    assert_eq!(previous.host(), None);
    assert_eq!(model.core().plugins().len(), 1);

    let removed = model.core_mut().remove_plugin(SPATIAL).unwrap();
    assert_eq!(removed.host(), None);
    assert!(model.core().plugins().is_empty());
}

#[test]
fn plugin_namespace_cannot_move_between_namespaces() {
    let mut plugin = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();

    assert!(plugin.core_mut().set_namespace(SPATIAL_NAMESPACE, &mut diagnostics));
    assert!(!plugin
        .core_mut()
        .set_namespace("http://example.org/other", &mut diagnostics));
    assert_eq!(plugin.namespace(), SPATIAL_NAMESPACE);
    assert!(diagnostics.contains(DiagnosticCode::NamespaceConflict));
}

#[test]
fn model_geometry_reached_through_extension_lookup() {
    let mut model = Model::new();
    let mut plugin = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();
    plugin.set_geometry(Geometry::new(), &mut diagnostics);
    model.core_mut().add_plugin(Box::new(plugin));

    assert_eq!(model.child_count(), 0);
    let plugin = model.core().plugins().get_dyn(SPATIAL).unwrap();
    let geometry = plugin.child_at(0).unwrap();
    assert_eq!(geometry.element_name(), "geometry");
    assert_eq!(geometry.parent(), Some(model.handle()));
}
