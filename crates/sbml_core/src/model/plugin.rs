//! Package extensions attached to host elements.
//!
//! # Responsibility
//! - Define the `Plugin` contract: package label, namespace, host link, own
//!   attributes and children.
//! - Store a host's plugins keyed by package label.
//!
//! # Invariants
//! - A plugin is not a tree node: its parent is its host's parent.
//! - At most one plugin per package label per host.
//! - Host links are non-owning and are reset on clone.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::change::{ChangeEvent, ChangeKind, ChangeListener, Listeners};
use crate::model::codec::AttributeMap;
use crate::model::error::StructuralError;
use crate::model::handle::NodeHandle;
use crate::model::node::Node;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::rc::Rc;

/// State shared by every plugin.
#[derive(Debug)]
pub struct PluginCore {
    handle: NodeHandle,
    package: &'static str,
    namespace: String,
    /// Element name of the hosts this plugin extends, e.g. `model`.
    extended: &'static str,
    host: Option<NodeHandle>,
    host_parent: Option<NodeHandle>,
    listeners: Listeners,
}

impl PluginCore {
    pub fn new(package: &'static str, namespace: &str, extended: &'static str) -> Self {
        Self {
            handle: NodeHandle::new(),
            package,
            namespace: namespace.to_string(),
            extended,
            host: None,
            host_parent: None,
            listeners: Listeners::default(),
        }
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Changes the namespace URI.
    ///
    /// A plugin cannot move between two different namespaces; a conflicting
    /// request is reported and ignored.
    pub fn set_namespace(&mut self, namespace: &str, diagnostics: &mut dyn Diagnostics) -> bool {
        if !self.namespace.is_empty() && self.namespace != namespace {
            diagnostics.report(Diagnostic::namespace_conflict(
                self.extended,
                &self.namespace,
                namespace,
            ));
            return false;
        }
        self.namespace = namespace.to_string();
        true
    }

    pub fn extended_element(&self) -> &'static str {
        self.extended
    }

    pub fn host(&self) -> Option<NodeHandle> {
        self.host
    }

    pub fn host_parent(&self) -> Option<NodeHandle> {
        self.host_parent
    }

    pub(crate) fn attach_host(&mut self, host: NodeHandle, host_parent: Option<NodeHandle>) {
        self.host = Some(host);
        self.host_parent = host_parent;
    }

    pub(crate) fn detach_host(&mut self) {
        self.host = None;
        self.host_parent = None;
    }

    pub fn add_listener(&mut self, listener: Rc<dyn ChangeListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&mut self, listener: &Rc<dyn ChangeListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn property_changed(
        &self,
        property: &'static str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        self.fire(ChangeKind::Property, property, old_value, new_value);
    }

    pub fn node_added(&self, child: &'static str) {
        self.fire(ChangeKind::NodeAdded, child, None, None);
    }

    pub fn node_removed(&self, child: &'static str) {
        self.fire(ChangeKind::NodeRemoved, child, None, None);
    }

    fn fire(
        &self,
        kind: ChangeKind,
        property: &'static str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.fire(&ChangeEvent {
            kind,
            source: self.host.unwrap_or(self.handle),
            element: self.extended,
            property,
            old_value,
            new_value,
        });
    }
}

impl Clone for PluginCore {
    fn clone(&self) -> Self {
        Self {
            handle: NodeHandle::new(),
            package: self.package,
            namespace: self.namespace.clone(),
            extended: self.extended,
            host: None,
            host_parent: None,
            listeners: Listeners::default(),
        }
    }
}

impl PartialEq for PluginCore {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package
            && self.namespace == other.namespace
            && self.extended == other.extended
    }
}

/// Package extension of one host element.
///
/// Attribute names passed to `read_attribute` are already matched against the
/// plugin's package prefix by the host.
pub trait Plugin: Debug + Any {
    fn core(&self) -> &PluginCore;
    fn core_mut(&mut self) -> &mut PluginCore;

    /// Reads one attribute of this package; returns whether it was consumed.
    fn read_attribute(&mut self, name: &str, value: &str, diagnostics: &mut dyn Diagnostics)
        -> bool;

    /// Adds every set attribute of this plugin to `attributes`.
    fn write_attributes(&self, attributes: &mut AttributeMap);

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        Vec::new()
    }

    fn allows_children(&self) -> bool {
        false
    }

    fn clone_plugin(&self) -> Box<dyn Plugin>;

    fn eq_plugin(&self, other: &dyn Plugin) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn package(&self) -> &'static str {
        self.core().package()
    }

    fn namespace(&self) -> &str {
        self.core().namespace()
    }

    fn host(&self) -> Option<NodeHandle> {
        self.core().host()
    }

    /// Parent of the host element, not the host itself.
    fn parent(&self) -> Option<NodeHandle> {
        self.core().host_parent()
    }

    fn child_count(&self) -> usize {
        self.children().len()
    }

    fn child_at(&self, index: usize) -> Result<&dyn Node, StructuralError> {
        let children = self.children();
        let bound = children.len();
        children
            .into_iter()
            .nth(index)
            .ok_or(StructuralError::IndexOutOfBounds { index, bound })
    }
}

impl Clone for Box<dyn Plugin> {
    fn clone(&self) -> Self {
        self.clone_plugin()
    }
}

impl PartialEq for Box<dyn Plugin> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_plugin(other.as_ref())
    }
}

/// Plugins of one host keyed by package label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginMap {
    entries: BTreeMap<&'static str, Box<dyn Plugin>>,
}

impl PluginMap {
    /// Stores `plugin` under its package label; returns the replaced one.
    pub fn insert(&mut self, plugin: Box<dyn Plugin>) -> Option<Box<dyn Plugin>> {
        self.entries.insert(plugin.package(), plugin)
    }

    pub fn remove(&mut self, package: &str) -> Option<Box<dyn Plugin>> {
        self.entries.remove(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.entries.values().map(|plugin| plugin.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Plugin>> {
        self.entries.values_mut()
    }

    /// Extension by package name.
    pub fn get_dyn(&self, package: &str) -> Option<&dyn Plugin> {
        self.entries.get(package).map(|plugin| plugin.as_ref())
    }

    pub fn get_dyn_mut(&mut self, package: &str) -> Option<&mut Box<dyn Plugin>> {
        self.entries.get_mut(package)
    }

    /// Typed extension lookup.
    ///
    /// # Errors
    /// - `PluginMismatch` when the plugin under `package` is not a `P`.
    pub fn get<P: Plugin>(&self, package: &str) -> Result<Option<&P>, StructuralError> {
        match self.entries.get(package) {
            None => Ok(None),
            Some(plugin) => plugin
                .as_any()
                .downcast_ref::<P>()
                .map(Some)
                .ok_or_else(|| mismatch::<P>(package)),
        }
    }

    pub fn get_mut<P: Plugin>(&mut self, package: &str) -> Result<Option<&mut P>, StructuralError> {
        match self.entries.get_mut(package) {
            None => Ok(None),
            Some(plugin) => plugin
                .as_any_mut()
                .downcast_mut::<P>()
                .map(Some)
                .ok_or_else(|| mismatch::<P>(package)),
        }
    }
}

fn mismatch<P>(package: &str) -> StructuralError {
    StructuralError::PluginMismatch {
        package: package.to_string(),
        expected: std::any::type_name::<P>(),
    }
}
