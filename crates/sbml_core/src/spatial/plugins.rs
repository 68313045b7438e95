//! Spatial extensions of core model, compartment, species, parameter and
//! reaction elements.
//!
//! # Responsibility
//! - `SpatialModelPlugin` owns the `Geometry` of a model and the registry of
//!   every spatial secondary id below that model.
//! - The other plugins add spatial attributes or a single spatial child to
//!   their host.
//!
//! # Invariants
//! - Plugin children are children of the host element, not of the plugin.
//! - Geometry mutations go through `GeometryEdit`, which brings the registry
//!   up to date when the edit ends.
//! - Compartment mappings live outside the geometry; their ids are kept
//!   current by the `*_registered` operations or `rebuild_model_ids`.
//!
//! # See also
//! - `crate::model::IdRegistry`

use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::elements::{Model, COMPARTMENT, MODEL, PARAMETER, REACTION, SPECIES};
use crate::model::node::{attach, detach, find_node, relink, subtree_handles};
use crate::model::{
    AttributeMap, AttributeTable, IdRegistry, Node, NodeHandle, Plugin, PluginCore,
    StructuralError,
};
use crate::spatial::geometry::Geometry;
use crate::spatial::mapping::CompartmentMapping;
use crate::spatial::parameter_role::ParameterRole;
use crate::spatial::{COMPARTMENT_MAPPING, GEOMETRY, SPATIAL, SPATIAL_NAMESPACE};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

pub const IS_SPATIAL: &str = "isSpatial";
pub const IS_LOCAL: &str = "isLocal";
/// Change-event label for the parameter role slot.
pub const PARAMETER_ROLE: &str = "parameterRole";

static SPECIES_PLUGIN_ATTRIBUTES: Lazy<AttributeTable<SpatialSpeciesPlugin>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        IS_SPATIAL,
        SpatialSpeciesPlugin::is_spatial,
        SpatialSpeciesPlugin::set_is_spatial,
        SpatialSpeciesPlugin::unset_is_spatial,
    )
});

static REACTION_PLUGIN_ATTRIBUTES: Lazy<AttributeTable<SpatialReactionPlugin>> = Lazy::new(|| {
    AttributeTable::new(SPATIAL).value(
        IS_LOCAL,
        SpatialReactionPlugin::is_local,
        SpatialReactionPlugin::set_is_local,
        SpatialReactionPlugin::unset_is_local,
    )
});

/// Links `child` below the plugin's host, or leaves it rootless when the
/// plugin is not attached yet.
fn adopt(core: &PluginCore, child: &mut dyn Node) {
    match core.host() {
        Some(host) => attach(host, child),
        None => {
            detach(child);
            relink(child);
        }
    }
}

/// Spatial extension of `model`.
#[derive(Debug)]
pub struct SpatialModelPlugin {
    core: PluginCore,
    geometry: Option<Geometry>,
    ids: IdRegistry,
}

impl SpatialModelPlugin {
    pub fn new() -> Self {
        Self {
            core: PluginCore::new(SPATIAL, SPATIAL_NAMESPACE, MODEL),
            geometry: None,
            ids: IdRegistry::new(SPATIAL),
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Opens the geometry for mutation.
    ///
    /// Any change made through the edit, plain `remove_*`/`unset_*`/`set_*`
    /// calls included, is reflected in the registry when the edit ends.
    pub fn edit_geometry(&mut self) -> Option<GeometryEdit<'_>> {
        let geometry = self.geometry.as_mut()?;
        let previous = subtree_handles(&*geometry);
        Some(GeometryEdit {
            geometry,
            ids: &mut self.ids,
            previous,
            finished: false,
        })
    }

    pub fn is_set_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Installs `geometry` and registers every secondary id inside it.
    ///
    /// The previous geometry, if any, is unregistered, detached and returned.
    /// Conflicting ids are reported through `diagnostics`.
    pub fn set_geometry(
        &mut self,
        mut geometry: Geometry,
        diagnostics: &mut dyn Diagnostics,
    ) -> Option<Geometry> {
        let previous = self.unset_geometry(diagnostics);
        adopt(&self.core, &mut geometry);
        let registered = self.ids.register_subtree(&geometry, diagnostics);
        debug!(
            "event=geometry_set module=spatial status={} ids={}",
            if registered { "ok" } else { "conflict" },
            self.ids.len()
        );
        self.geometry = Some(geometry);
        self.core.node_added(GEOMETRY);
        previous
    }

    pub fn unset_geometry(&mut self, diagnostics: &mut dyn Diagnostics) -> Option<Geometry> {
        let mut geometry = self.geometry.take()?;
        self.ids.unregister_subtree(&geometry, diagnostics);
        detach(&mut geometry);
        self.core.node_removed(GEOMETRY);
        Some(geometry)
    }

    pub fn ids(&self) -> &IdRegistry {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdRegistry {
        &mut self.ids
    }

    /// Re-registers every secondary id of the current geometry.
    ///
    /// Ids registered from outside the geometry, e.g. compartment mappings,
    /// are dropped; `rebuild_model_ids` covers the whole model.
    pub fn rebuild_ids(&mut self, diagnostics: &mut dyn Diagnostics) -> bool {
        match self.geometry.as_ref() {
            Some(geometry) => self.ids.rebuild(geometry, diagnostics),
            None => {
                self.ids.clear();
                true
            }
        }
    }

    /// Node of the geometry registered under `id`.
    pub fn find_by_secondary_id(&self, id: &str) -> Option<&dyn Node> {
        let entry = self.ids.lookup(id)?;
        find_node(self.geometry.as_ref()?, entry.handle)
    }
}

/// Mutable view of a model's geometry that keeps the spatial registry in
/// step.
///
/// On `finish`, or on drop, entries of nodes that left the geometry are
/// removed and ids of added or renamed nodes are registered. Conflicts found
/// on drop go to `LogDiagnostics`.
#[derive(Debug)]
pub struct GeometryEdit<'a> {
    geometry: &'a mut Geometry,
    ids: &'a mut IdRegistry,
    previous: BTreeSet<NodeHandle>,
    finished: bool,
}

impl GeometryEdit<'_> {
    pub fn ids(&self) -> &IdRegistry {
        &*self.ids
    }

    /// Geometry and registry borrowed together, for the `*_registered`
    /// list operations.
    pub fn parts(&mut self) -> (&mut Geometry, &mut IdRegistry) {
        (&mut *self.geometry, &mut *self.ids)
    }

    /// Ends the edit, reporting id conflicts through `diagnostics`.
    ///
    /// Returns `false` when at least one id was rejected.
    pub fn finish(mut self, diagnostics: &mut dyn Diagnostics) -> bool {
        self.finished = true;
        self.reconcile(diagnostics)
    }

    fn reconcile(&mut self, diagnostics: &mut dyn Diagnostics) -> bool {
        let registered = self.ids.reconcile(&*self.geometry, &self.previous, diagnostics);
        debug!(
            "event=geometry_edit module=spatial status={} ids={}",
            if registered { "ok" } else { "conflict" },
            self.ids.len()
        );
        registered
    }
}

impl Deref for GeometryEdit<'_> {
    type Target = Geometry;

    fn deref(&self) -> &Geometry {
        &*self.geometry
    }
}

impl DerefMut for GeometryEdit<'_> {
    fn deref_mut(&mut self) -> &mut Geometry {
        &mut *self.geometry
    }
}

impl Drop for GeometryEdit<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.reconcile(&mut LogDiagnostics);
        }
    }
}

/// Rebuilds the spatial registry of `model` from every secondary id below
/// it, the geometry and the compartment mappings included.
///
/// Returns `Ok(false)` when an id was rejected; a model without a spatial
/// plugin is left unchanged.
///
/// # Errors
/// - `PluginMismatch` when the `spatial` plugin of `model` is not a
///   `SpatialModelPlugin`.
pub fn rebuild_model_ids(
    model: &mut Model,
    diagnostics: &mut dyn Diagnostics,
) -> Result<bool, StructuralError> {
    let mut ids = IdRegistry::new(SPATIAL);
    let registered = ids.register_subtree(&*model, diagnostics);
    if let Some(plugin) = model
        .core_mut()
        .plugins_mut()
        .get_mut::<SpatialModelPlugin>(SPATIAL)?
    {
        *plugin.ids_mut() = ids;
    }
    Ok(registered)
}

impl Default for SpatialModelPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SpatialModelPlugin {
    fn clone(&self) -> Self {
        let mut geometry = self.geometry.clone();
        let mut ids = IdRegistry::new(SPATIAL);
        if let Some(geometry) = geometry.as_mut() {
            relink(geometry);
            ids.register_subtree(geometry, &mut LogDiagnostics);
        }
        Self {
            core: self.core.clone(),
            geometry,
            ids,
        }
    }
}

impl PartialEq for SpatialModelPlugin {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core && self.geometry == other.geometry
    }
}

impl Plugin for SpatialModelPlugin {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn read_attribute(&mut self, _name: &str, _value: &str, _diagnostics: &mut dyn Diagnostics) -> bool {
        false
    }

    fn write_attributes(&self, _attributes: &mut AttributeMap) {}

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.geometry.iter().map(|geometry| geometry as &dyn Node).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        self.geometry
            .iter_mut()
            .map(|geometry| geometry as &mut dyn Node)
            .collect()
    }

    plugin_boilerplate!();
}

/// Spatial extension of `compartment`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialCompartmentPlugin {
    core: PluginCore,
    compartment_mapping: Option<CompartmentMapping>,
}

impl SpatialCompartmentPlugin {
    pub fn new() -> Self {
        Self {
            core: PluginCore::new(SPATIAL, SPATIAL_NAMESPACE, COMPARTMENT),
            compartment_mapping: None,
        }
    }

    pub fn compartment_mapping(&self) -> Option<&CompartmentMapping> {
        self.compartment_mapping.as_ref()
    }

    pub fn compartment_mapping_mut(&mut self) -> Option<&mut CompartmentMapping> {
        self.compartment_mapping.as_mut()
    }

    pub fn is_set_compartment_mapping(&self) -> bool {
        self.compartment_mapping.is_some()
    }

    pub fn set_compartment_mapping(
        &mut self,
        mut mapping: CompartmentMapping,
    ) -> Option<CompartmentMapping> {
        let previous = self.unset_compartment_mapping();
        adopt(&self.core, &mut mapping);
        self.compartment_mapping = Some(mapping);
        self.core.node_added(COMPARTMENT_MAPPING);
        previous
    }

    /// Detaches the mapping without touching any registry; see
    /// `unset_compartment_mapping_registered`.
    pub fn unset_compartment_mapping(&mut self) -> Option<CompartmentMapping> {
        let mut mapping = self.compartment_mapping.take()?;
        detach(&mut mapping);
        self.core.node_removed(COMPARTMENT_MAPPING);
        Some(mapping)
    }

    /// Like `set_compartment_mapping`, keeping `ids` in step: the previous
    /// mapping is unregistered and the new one registered.
    pub fn set_compartment_mapping_registered(
        &mut self,
        mapping: CompartmentMapping,
        ids: &mut IdRegistry,
        diagnostics: &mut dyn Diagnostics,
    ) -> Option<CompartmentMapping> {
        let previous = self.unset_compartment_mapping_registered(ids, diagnostics);
        self.set_compartment_mapping(mapping);
        if let Some(mapping) = self.compartment_mapping.as_ref() {
            ids.register(mapping, diagnostics);
        }
        previous
    }

    pub fn unset_compartment_mapping_registered(
        &mut self,
        ids: &mut IdRegistry,
        diagnostics: &mut dyn Diagnostics,
    ) -> Option<CompartmentMapping> {
        let mapping = self.unset_compartment_mapping()?;
        ids.unregister(&mapping, diagnostics);
        Some(mapping)
    }
}

impl Default for SpatialCompartmentPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SpatialCompartmentPlugin {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn read_attribute(&mut self, _name: &str, _value: &str, _diagnostics: &mut dyn Diagnostics) -> bool {
        false
    }

    fn write_attributes(&self, _attributes: &mut AttributeMap) {}

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.compartment_mapping
            .iter()
            .map(|mapping| mapping as &dyn Node)
            .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        self.compartment_mapping
            .iter_mut()
            .map(|mapping| mapping as &mut dyn Node)
            .collect()
    }

    plugin_boilerplate!();
}

/// Spatial extension of `species`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSpeciesPlugin {
    core: PluginCore,
    is_spatial: Option<bool>,
}

impl SpatialSpeciesPlugin {
    pub fn new() -> Self {
        Self {
            core: PluginCore::new(SPATIAL, SPATIAL_NAMESPACE, SPECIES),
            is_spatial: None,
        }
    }
}

impl Default for SpatialSpeciesPlugin {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SpatialSpeciesPlugin {
    value is_spatial: bool = IS_SPATIAL => is_set_is_spatial, set_is_spatial, unset_is_spatial;
});

impl Plugin for SpatialSpeciesPlugin {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn read_attribute(&mut self, name: &str, value: &str, diagnostics: &mut dyn Diagnostics) -> bool {
        let element = self.core.extended_element();
        SPECIES_PLUGIN_ATTRIBUTES.read_entry(self, element, name, value, diagnostics)
    }

    fn write_attributes(&self, attributes: &mut AttributeMap) {
        SPECIES_PLUGIN_ATTRIBUTES.write_entries(self, attributes);
    }

    plugin_boilerplate!();
}

/// Spatial extension of `parameter`: the role the parameter plays.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialParameterPlugin {
    core: PluginCore,
    role: Option<ParameterRole>,
}

impl SpatialParameterPlugin {
    pub fn new() -> Self {
        Self {
            core: PluginCore::new(SPATIAL, SPATIAL_NAMESPACE, PARAMETER),
            role: None,
        }
    }

    pub fn role(&self) -> Option<&ParameterRole> {
        self.role.as_ref()
    }

    pub fn role_mut(&mut self) -> Option<&mut ParameterRole> {
        self.role.as_mut()
    }

    pub fn is_set_role(&self) -> bool {
        self.role.is_some()
    }

    /// Replaces the role; a parameter holds at most one.
    pub fn set_role(&mut self, role: impl Into<ParameterRole>) -> Option<ParameterRole> {
        let previous = self.unset_role();
        let mut role = role.into();
        adopt(&self.core, &mut role);
        self.role = Some(role);
        self.core.node_added(PARAMETER_ROLE);
        previous
    }

    pub fn unset_role(&mut self) -> Option<ParameterRole> {
        let mut role = self.role.take()?;
        detach(&mut role);
        self.core.node_removed(PARAMETER_ROLE);
        Some(role)
    }
}

impl Default for SpatialParameterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SpatialParameterPlugin {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn read_attribute(&mut self, _name: &str, _value: &str, _diagnostics: &mut dyn Diagnostics) -> bool {
        false
    }

    fn write_attributes(&self, _attributes: &mut AttributeMap) {}

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.role.iter().map(|role| role as &dyn Node).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        self.role.iter_mut().map(|role| role as &mut dyn Node).collect()
    }

    plugin_boilerplate!();
}

/// Spatial extension of `reaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialReactionPlugin {
    core: PluginCore,
    is_local: Option<bool>,
}

impl SpatialReactionPlugin {
    pub fn new() -> Self {
        Self {
            core: PluginCore::new(SPATIAL, SPATIAL_NAMESPACE, REACTION),
            is_local: None,
        }
    }
}

impl Default for SpatialReactionPlugin {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(SpatialReactionPlugin {
    value is_local: bool = IS_LOCAL => is_set_is_local, set_is_local, unset_is_local;
});

impl Plugin for SpatialReactionPlugin {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn read_attribute(&mut self, name: &str, value: &str, diagnostics: &mut dyn Diagnostics) -> bool {
        let element = self.core.extended_element();
        REACTION_PLUGIN_ATTRIBUTES.read_entry(self, element, name, value, diagnostics)
    }

    fn write_attributes(&self, attributes: &mut AttributeMap) {
        REACTION_PLUGIN_ATTRIBUTES.write_entries(self, attributes);
    }

    plugin_boilerplate!();
}

#[cfg(test)]
mod tests {
    use super::{SpatialModelPlugin, SpatialSpeciesPlugin};
    use crate::diagnostics::{CollectedDiagnostics, DiagnosticCode};
    use crate::model::{Node, Plugin};
    use crate::spatial::domain::DomainType;
    use crate::spatial::geometry::Geometry;

    fn geometry_with_domain_types(ids: &[&str]) -> Geometry {
        let mut geometry = Geometry::new();
        for id in ids {
            let mut domain_type = DomainType::new();
            domain_type.core_mut().set_id(id).expect("valid id");
            geometry.add_domain_type(domain_type);
        }
        geometry
    }

    #[test]
    fn set_geometry_registers_nested_ids() {
        let mut plugin = SpatialModelPlugin::new();
        let mut diagnostics = CollectedDiagnostics::new();
        plugin.set_geometry(geometry_with_domain_types(&["cyto", "nuc"]), &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert!(plugin.ids().contains("cyto"));
        let found = plugin.find_by_secondary_id("nuc").expect("registered node");
        assert_eq!(found.element_name(), "domainType");
    }

    #[test]
    fn duplicate_ids_inside_geometry_are_reported() {
        let mut plugin = SpatialModelPlugin::new();
        let mut diagnostics = CollectedDiagnostics::new();
        plugin.set_geometry(geometry_with_domain_types(&["cyto", "cyto"]), &mut diagnostics);

        assert!(diagnostics.contains(DiagnosticCode::DuplicateId));
        assert_eq!(plugin.ids().len(), 1);
    }

    #[test]
    fn unset_geometry_clears_its_ids() {
        let mut plugin = SpatialModelPlugin::new();
        let mut diagnostics = CollectedDiagnostics::new();
        plugin.set_geometry(geometry_with_domain_types(&["cyto"]), &mut diagnostics);
        let geometry = plugin.unset_geometry(&mut diagnostics).expect("geometry was set");

        assert!(plugin.ids().is_empty());
        assert_eq!(geometry.parent(), None);
        assert_eq!(plugin.child_count(), 0);
    }

    #[test]
    fn clone_rebuilds_registry_against_copied_nodes() {
        let mut plugin = SpatialModelPlugin::new();
        let mut diagnostics = CollectedDiagnostics::new();
        plugin.set_geometry(geometry_with_domain_types(&["cyto"]), &mut diagnostics);

        let copy = plugin.clone();
        assert_eq!(copy, plugin);
        let original = plugin.ids().lookup("cyto").expect("original entry");
        let copied = copy.ids().lookup("cyto").expect("copied entry");
        assert_ne!(original.handle, copied.handle);
        assert!(copy.find_by_secondary_id("cyto").is_some());
    }

    #[test]
    fn species_plugin_reads_prefixed_flag() {
        let mut plugin = SpatialSpeciesPlugin::new();
        let mut diagnostics = CollectedDiagnostics::new();
        assert!(plugin.read_attribute("isSpatial", "true", &mut diagnostics));
        assert!(!plugin.read_attribute("isLocal", "true", &mut diagnostics));
        assert_eq!(plugin.is_spatial(), Some(true));

        let mut attributes = crate::model::AttributeMap::new();
        plugin.write_attributes(&mut attributes);
        assert_eq!(attributes.get("spatial:isSpatial").map(String::as_str), Some("true"));
    }
}
