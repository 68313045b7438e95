use sbml_core::elements::{Compartment, Model};
use sbml_core::spatial::{
    rebuild_model_ids, CompartmentMapping, Domain, DomainType, Geometry,
    SpatialCompartmentPlugin, SpatialModelPlugin, SPATIAL,
};
use sbml_core::{CollectedDiagnostics, DiagnosticCode, IdRegistry, ListOf, Node, StructuralError};

fn domain_type(id: &str) -> DomainType {
    let mut domain_type = DomainType::new();
    domain_type.core_mut().set_id(id).unwrap();
    domain_type
}

fn domain(id: &str) -> Domain {
    let mut domain = Domain::new();
    domain.core_mut().set_id(id).unwrap();
    domain
}

fn plugin_with_domain(id: &str, diagnostics: &mut CollectedDiagnostics) -> SpatialModelPlugin {
    let mut plugin = SpatialModelPlugin::new();
    let mut geometry = Geometry::new();
    geometry.add_domain(domain(id));
    plugin.set_geometry(geometry, diagnostics);
    plugin
}

#[test]
fn duplicate_registration_keeps_first_node() {
    let mut registry = IdRegistry::new(SPATIAL);
    let mut diagnostics = CollectedDiagnostics::new();
    let first = domain_type("dom1");
    let second = domain_type("dom1");

    assert!(registry.register(&first, &mut diagnostics));
    assert!(!registry.register(&second, &mut diagnostics));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("dom1").unwrap().handle, first.handle());
    assert_eq!(diagnostics.errors().len(), 1);
    assert!(diagnostics.contains(DiagnosticCode::DuplicateId));
}

#[test]
fn try_register_reports_duplicate_as_structural_error() {
    let mut registry = IdRegistry::new(SPATIAL);
    registry.try_register(&domain_type("dom1")).unwrap();
    let err = registry.try_register(&domain_type("dom1")).unwrap_err();
    assert_eq!(
        err,
        StructuralError::DuplicateId {
            id: "dom1".to_string(),
            package: SPATIAL
        }
    );
}

#[test]
fn unregister_of_unknown_id_is_an_idempotent_no_op() {
    let mut registry = IdRegistry::new(SPATIAL);
    let mut diagnostics = CollectedDiagnostics::new();
    let node = domain_type("ghost");

    assert!(registry.unregister(&node, &mut diagnostics));
    assert!(registry.unregister(&node, &mut diagnostics));
    assert_eq!(diagnostics.warnings().len(), 2);
    assert!(diagnostics.contains(DiagnosticCode::UnknownId));

    registry.register(&node, &mut diagnostics);
    assert!(registry.unregister(&node, &mut diagnostics));
    assert!(registry.is_empty());
}

#[test]
fn unregister_does_not_remove_an_id_owned_by_another_node() {
    let mut registry = IdRegistry::new(SPATIAL);
    let mut diagnostics = CollectedDiagnostics::new();
    let owner = domain_type("dom1");
    let impostor = domain_type("dom1");
    registry.register(&owner, &mut diagnostics);

    assert!(registry.unregister(&impostor, &mut diagnostics));
    assert_eq!(registry.lookup("dom1").unwrap().handle, owner.handle());
}

#[test]
fn accept_looks_at_node_or_first_list_item() {
    let registry = IdRegistry::new(SPATIAL);
    let mut geometry = Geometry::new();
    geometry.add_domain_type(domain_type("cyto"));
    let list = geometry.child_at(0).unwrap();

    assert!(registry.accept(&domain_type("cyto")));
    assert!(registry.accept(list));
    assert!(!registry.accept(&sbml_core::spatial::InteriorPoint::new()));
}

#[test]
fn secondary_and_primary_id_spaces_are_separate_per_scope() {
    let mut first_model = SpatialModelPlugin::new();
    let mut second_model = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();

    let mut geometry = Geometry::new();
    geometry.add_domain_type(domain_type("cyto"));
    first_model.set_geometry(geometry.clone(), &mut diagnostics);
    second_model.set_geometry(geometry, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert!(first_model.ids().contains("cyto"));
    assert!(second_model.ids().contains("cyto"));
}

#[test]
fn registered_list_operations_keep_registry_current() {
    let mut plugin = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();
    plugin.set_geometry(Geometry::new(), &mut diagnostics);

    let mut edit = plugin.edit_geometry().unwrap();
    let (geometry, ids) = edit.parts();
    geometry
        .domains_mut()
        .add_registered(domain("nucleus"), ids, &mut diagnostics);
    assert!(ids.contains("nucleus"));

    geometry
        .domains_mut()
        .remove_at_registered(0, ids, &mut diagnostics)
        .unwrap();
    assert!(!ids.contains("nucleus"));
    assert!(edit.finish(&mut diagnostics));
    assert!(diagnostics.is_empty());
}

#[test]
fn registered_add_inside_edit_is_not_a_duplicate_on_finish() {
    let mut plugin = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();
    plugin.set_geometry(Geometry::new(), &mut diagnostics);

    let mut edit = plugin.edit_geometry().unwrap();
    let (geometry, ids) = edit.parts();
    geometry
        .domains_mut()
        .add_registered(domain("nucleus"), ids, &mut diagnostics);
    assert!(edit.finish(&mut diagnostics));

    assert!(diagnostics.is_empty());
    assert!(plugin.find_by_secondary_id("nucleus").is_some());
}

#[test]
fn plain_removal_inside_edit_releases_the_id() {
    let mut diagnostics = CollectedDiagnostics::new();
    let mut plugin = plugin_with_domain("d1", &mut diagnostics);
    assert!(plugin.ids().contains("d1"));

    let mut edit = plugin.edit_geometry().unwrap();
    edit.remove_domain(0).unwrap();
    assert!(edit.finish(&mut diagnostics));
    assert!(!plugin.ids().contains("d1"));
    assert!(plugin.find_by_secondary_id("d1").is_none());

    let fresh = domain("d1");
    let mut scratch = plugin.ids().clone();
    assert!(scratch.register(&fresh, &mut diagnostics));

    let mut edit = plugin.edit_geometry().unwrap();
    edit.add_domain(fresh);
    drop(edit);
    assert!(plugin.ids().contains("d1"));
    assert_eq!(
        plugin.find_by_secondary_id("d1").unwrap().element_name(),
        "domain"
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn unsetting_a_list_inside_edit_releases_every_item_id() {
    let mut diagnostics = CollectedDiagnostics::new();
    let mut plugin = plugin_with_domain("d1", &mut diagnostics);
    {
        let mut edit = plugin.edit_geometry().unwrap();
        edit.add_domain(domain("d2"));
    }
    assert_eq!(plugin.ids().len(), 2);

    let mut edit = plugin.edit_geometry().unwrap();
    let removed = edit.unset_domains().unwrap();
    assert!(edit.finish(&mut diagnostics));

    assert_eq!(removed.len(), 2);
    assert!(!plugin.ids().contains("d1"));
    assert!(!plugin.ids().contains("d2"));
}

#[test]
fn renaming_inside_edit_moves_the_entry() {
    let mut diagnostics = CollectedDiagnostics::new();
    let mut plugin = plugin_with_domain("d1", &mut diagnostics);

    let mut edit = plugin.edit_geometry().unwrap();
    edit.domains_mut()
        .get_mut(0)
        .unwrap()
        .core_mut()
        .set_id("d2")
        .unwrap();
    assert!(edit.finish(&mut diagnostics));

    assert!(!plugin.ids().contains("d1"));
    assert!(plugin.find_by_secondary_id("d2").is_some());
}

#[test]
fn edit_keeps_ids_registered_outside_the_geometry() {
    let mut diagnostics = CollectedDiagnostics::new();
    let mut plugin = plugin_with_domain("d1", &mut diagnostics);
    let mut mapping = CompartmentMapping::new();
    mapping.core_mut().set_id("mapping1").unwrap();
    plugin.ids_mut().register(&mapping, &mut diagnostics);

    let mut edit = plugin.edit_geometry().unwrap();
    edit.remove_domain(0).unwrap();
    drop(edit);

    assert!(plugin.ids().contains("mapping1"));
    assert!(!plugin.ids().contains("d1"));
}

#[test]
fn edit_reports_an_added_duplicate() {
    let mut diagnostics = CollectedDiagnostics::new();
    let mut plugin = plugin_with_domain("d1", &mut diagnostics);

    let mut edit = plugin.edit_geometry().unwrap();
    edit.add_domain_type(domain_type("d1"));
    assert!(!edit.finish(&mut diagnostics));

    assert!(diagnostics.contains(DiagnosticCode::DuplicateId));
    assert_eq!(
        plugin.find_by_secondary_id("d1").unwrap().element_name(),
        "domain"
    );
}

#[test]
fn list_is_registered_and_unregistered_item_by_item() {
    let mut registry = IdRegistry::new(SPATIAL);
    let mut diagnostics = CollectedDiagnostics::new();
    let mut list = ListOf::new("listOfDomainTypes", "domainType", SPATIAL, "");
    list.add(domain_type("cyto"));
    list.add(domain_type("nuc"));

    assert!(registry.accept(&list));
    assert!(registry.register(&list, &mut diagnostics));
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.lookup("nuc").unwrap().handle,
        list.get(1).unwrap().handle()
    );

    assert!(registry.unregister(&list, &mut diagnostics));
    assert!(registry.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn registering_the_same_node_twice_is_a_no_op() {
    let mut registry = IdRegistry::new(SPATIAL);
    let mut diagnostics = CollectedDiagnostics::new();
    let node = domain_type("cyto");

    assert_eq!(registry.try_register(&node), Ok(true));
    assert_eq!(registry.try_register(&node), Ok(false));
    assert!(registry.register(&node, &mut diagnostics));
    assert!(diagnostics.is_empty());
}

#[test]
fn plugin_mutation_registers_into_model_scope() {
    let mut model = Model::new();
    let mut spatial = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();
    spatial.set_geometry(Geometry::new(), &mut diagnostics);
    model.core_mut().add_plugin(Box::new(spatial));

    let compartment = model.add_compartment(Compartment::new());
    compartment
        .core_mut()
        .add_plugin(Box::new(SpatialCompartmentPlugin::new()));

    let parts = model.parts_mut();
    let compartment = parts.compartments.unwrap().get_mut(0).unwrap();
    let ids = parts
        .plugins
        .get_mut::<SpatialModelPlugin>(SPATIAL)
        .unwrap()
        .unwrap()
        .ids_mut();
    let compartment_plugin = compartment
        .core_mut()
        .plugins_mut()
        .get_mut::<SpatialCompartmentPlugin>(SPATIAL)
        .unwrap()
        .unwrap();

    let mut mapping = CompartmentMapping::new();
    mapping.core_mut().set_id("mapping1").unwrap();
    compartment_plugin.set_compartment_mapping_registered(mapping, ids, &mut diagnostics);
    assert!(ids.contains("mapping1"));

    compartment_plugin.unset_compartment_mapping_registered(ids, &mut diagnostics);
    assert!(!ids.contains("mapping1"));
    assert!(diagnostics.is_empty());
}

#[test]
fn model_rebuild_drops_mapping_detached_without_registry() {
    let mut model = Model::new();
    let mut spatial = SpatialModelPlugin::new();
    let mut diagnostics = CollectedDiagnostics::new();
    spatial.set_geometry(Geometry::new(), &mut diagnostics);
    model.core_mut().add_plugin(Box::new(spatial));

    let compartment = model.add_compartment(Compartment::new());
    let mut compartment_plugin = SpatialCompartmentPlugin::new();
    let mut mapping = CompartmentMapping::new();
    mapping.core_mut().set_id("mapping1").unwrap();
    compartment_plugin.set_compartment_mapping(mapping);
    compartment.core_mut().add_plugin(Box::new(compartment_plugin));

    assert_eq!(rebuild_model_ids(&mut model, &mut diagnostics), Ok(true));
    let spatial = model
        .core()
        .plugins()
        .get::<SpatialModelPlugin>(SPATIAL)
        .unwrap()
        .unwrap();
    assert!(spatial.ids().contains("mapping1"));

    model
        .compartments_mut()
        .get_mut(0)
        .unwrap()
        .core_mut()
        .plugins_mut()
        .get_mut::<SpatialCompartmentPlugin>(SPATIAL)
        .unwrap()
        .unwrap()
        .unset_compartment_mapping();
    assert_eq!(rebuild_model_ids(&mut model, &mut diagnostics), Ok(true));
    let spatial = model
        .core()
        .plugins()
        .get::<SpatialModelPlugin>(SPATIAL)
        .unwrap()
        .unwrap();
    assert!(!spatial.ids().contains("mapping1"));
    assert!(diagnostics.is_empty());
}
