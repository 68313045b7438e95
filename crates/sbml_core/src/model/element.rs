//! Shared element core embedded by every concrete element.
//!
//! # Responsibility
//! - Hold identity (handle, parent link) and the attributes every SBML
//!   element carries: `id`, `name`, `metaid`, `sboTerm`.
//! - Own the package label and namespace of the element and its plugins.
//! - Read and write the shared attribute layer that runs before any
//!   type-specific attribute table.
//!
//! # Invariants
//! - `handle`, `parent` and listeners are never cloned or compared.
//! - `id` always matches the SId grammar and `metaid` the NCName grammar.
//! - Elements of a package write `id`/`name` under that package's prefix.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::change::{ChangeEvent, ChangeKind, ChangeListener, Listeners};
use crate::model::codec::{package_prefix, qualified_name, AttributeMap};
use crate::model::error::StructuralError;
use crate::model::handle::NodeHandle;
use crate::model::node::attach;
use crate::model::plugin::{Plugin, PluginMap};
use once_cell::sync::Lazy;
use regex::Regex;
use std::rc::Rc;

/// SBML Level 3 Version 1 core namespace.
pub const CORE_NAMESPACE: &str = "http://www.sbml.org/sbml/level3/version1/core";

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const META_ID: &str = "metaid";
pub const SBO_TERM: &str = "sboTerm";

const MAX_SBO_TERM: i32 = 9_999_999;

static SID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid SId regex"));
static NCNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid NCName regex"));

/// Returns whether `value` follows the SBML `SId` grammar.
pub fn is_valid_sid(value: &str) -> bool {
    SID_RE.is_match(value)
}

/// Returns whether `value` follows the XML `NCName` grammar (ASCII subset).
pub fn is_valid_meta_id(value: &str) -> bool {
    NCNAME_RE.is_match(value)
}

/// Parses `SBO:0000123` or a bare non-negative integer.
pub fn parse_sbo_term(value: &str) -> Result<i32, StructuralError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("SBO:").unwrap_or(trimmed);
    digits
        .parse::<i32>()
        .ok()
        .filter(|term| (0..=MAX_SBO_TERM).contains(term))
        .ok_or_else(|| StructuralError::InvalidIdentifier {
            kind: "SBO term",
            value: value.to_string(),
        })
}

/// Formats an SBO term as `SBO:` followed by seven digits.
pub fn format_sbo_term(term: i32) -> String {
    format!("SBO:{term:07}")
}

#[derive(Debug)]
pub struct ElementCore {
    handle: NodeHandle,
    parent: Option<NodeHandle>,
    element: &'static str,
    package: &'static str,
    namespace: Option<String>,
    id: Option<String>,
    name: Option<String>,
    meta_id: Option<String>,
    sbo_term: Option<i32>,
    plugins: PluginMap,
    listeners: Listeners,
}

impl ElementCore {
    /// Creates an empty, detached core for `element` of `package`.
    pub fn new(element: &'static str, package: &'static str, namespace: &str) -> Self {
        Self {
            handle: NodeHandle::new(),
            parent: None,
            element,
            package,
            namespace: Some(namespace.to_string()),
            id: None,
            name: None,
            meta_id: None,
            sbo_term: None,
            plugins: PluginMap::default(),
            listeners: Listeners::default(),
        }
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeHandle>) {
        self.parent = parent;
        let host = self.handle;
        for plugin in self.plugins.iter_mut() {
            plugin.core_mut().attach_host(host, parent);
        }
    }

    pub fn element(&self) -> &'static str {
        self.element
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Moves the element into another package namespace.
    pub fn set_package(&mut self, package: &'static str, namespace: &str) {
        self.package = package;
        self.namespace = Some(namespace.to_string());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_set_id(&self) -> bool {
        self.id.is_some()
    }

    /// Sets the id after checking it against the SId grammar.
    ///
    /// Secondary ids are not re-registered here; callers holding the scope's
    /// `IdRegistry` unregister the old id and register the new one.
    pub fn set_id(&mut self, id: &str) -> Result<(), StructuralError> {
        if !is_valid_sid(id) {
            return Err(StructuralError::InvalidIdentifier {
                kind: "SId",
                value: id.to_string(),
            });
        }
        let old = self.id.replace(id.to_string());
        self.property_changed(ID, old, Some(id.to_string()));
        Ok(())
    }

    pub fn unset_id(&mut self) -> bool {
        let old = self.id.take();
        let was_set = old.is_some();
        if was_set {
            self.property_changed(ID, old, None);
        }
        was_set
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_set_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let old = self.name.replace(name.clone());
        self.property_changed(NAME, old, Some(name));
    }

    pub fn unset_name(&mut self) -> bool {
        let old = self.name.take();
        let was_set = old.is_some();
        if was_set {
            self.property_changed(NAME, old, None);
        }
        was_set
    }

    pub fn meta_id(&self) -> Option<&str> {
        self.meta_id.as_deref()
    }

    pub fn is_set_meta_id(&self) -> bool {
        self.meta_id.is_some()
    }

    pub fn set_meta_id(&mut self, meta_id: &str) -> Result<(), StructuralError> {
        if !is_valid_meta_id(meta_id) {
            return Err(StructuralError::InvalidIdentifier {
                kind: "metaid",
                value: meta_id.to_string(),
            });
        }
        let old = self.meta_id.replace(meta_id.to_string());
        self.property_changed(META_ID, old, Some(meta_id.to_string()));
        Ok(())
    }

    pub fn unset_meta_id(&mut self) -> bool {
        let old = self.meta_id.take();
        let was_set = old.is_some();
        if was_set {
            self.property_changed(META_ID, old, None);
        }
        was_set
    }

    pub fn sbo_term(&self) -> Option<i32> {
        self.sbo_term
    }

    pub fn is_set_sbo_term(&self) -> bool {
        self.sbo_term.is_some()
    }

    pub fn set_sbo_term(&mut self, term: i32) -> Result<(), StructuralError> {
        if !(0..=MAX_SBO_TERM).contains(&term) {
            return Err(StructuralError::InvalidIdentifier {
                kind: "SBO term",
                value: term.to_string(),
            });
        }
        let old = self.sbo_term.replace(term);
        self.property_changed(SBO_TERM, old.map(format_sbo_term), Some(format_sbo_term(term)));
        Ok(())
    }

    pub fn unset_sbo_term(&mut self) -> bool {
        let old = self.sbo_term.take();
        let was_set = old.is_some();
        if was_set {
            self.property_changed(SBO_TERM, old.map(format_sbo_term), None);
        }
        was_set
    }

    pub fn plugins(&self) -> &PluginMap {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginMap {
        &mut self.plugins
    }

    /// Attaches `plugin` under its package label and binds it to this host.
    ///
    /// Plugin children become children of this element. Returns the plugin
    /// previously stored under the same label, detached.
    pub fn add_plugin(&mut self, mut plugin: Box<dyn Plugin>) -> Option<Box<dyn Plugin>> {
        plugin.core_mut().attach_host(self.handle, self.parent);
        for child in plugin.children_mut() {
            attach(self.handle, child);
        }
        let mut previous = self.plugins.insert(plugin);
        if let Some(previous) = previous.as_mut() {
            previous.core_mut().detach_host();
        }
        previous
    }

    pub fn remove_plugin(&mut self, package: &str) -> Option<Box<dyn Plugin>> {
        let mut removed = self.plugins.remove(package)?;
        removed.core_mut().detach_host();
        Some(removed)
    }

    pub fn add_listener(&mut self, listener: Rc<dyn ChangeListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&mut self, listener: &Rc<dyn ChangeListener>) -> bool {
        self.listeners.remove(listener)
    }

    /// Notifies listeners that `property` changed from `old_value` to `new_value`.
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
            source: self.handle,
            element: self.element,
            property,
            old_value,
            new_value,
        });
    }

    /// Reads one of the shared attributes.
    ///
    /// `metaid` and `sboTerm` are always unprefixed; `id` and `name` live
    /// under the element's own package prefix.
    pub fn read_attribute(
        &mut self,
        name: &str,
        prefix: &str,
        value: &str,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        let own_prefix = package_prefix(self.package);
        let outcome = match (prefix, name) {
            ("", META_ID) => self.set_meta_id(value),
            ("", SBO_TERM) => parse_sbo_term(value).and_then(|term| self.set_sbo_term(term)),
            (p, ID) if p == own_prefix => self.set_id(value),
            (p, NAME) if p == own_prefix => {
                self.set_name(value);
                Ok(())
            }
            _ => return false,
        };
        if let Err(err) = outcome {
            match name {
                META_ID => self.unset_meta_id(),
                SBO_TERM => self.unset_sbo_term(),
                _ => self.unset_id(),
            };
            diagnostics.report(Diagnostic::unreadable_attribute(
                self.element,
                name,
                value,
                err,
            ));
        }
        true
    }

    /// Writes every set shared attribute.
    pub fn write_attributes(&self, attributes: &mut AttributeMap) {
        if let Some(meta_id) = &self.meta_id {
            attributes.insert(META_ID.to_string(), meta_id.clone());
        }
        if let Some(term) = self.sbo_term {
            attributes.insert(SBO_TERM.to_string(), format_sbo_term(term));
        }
        let prefix = package_prefix(self.package);
        if let Some(id) = &self.id {
            attributes.insert(qualified_name(prefix, ID), id.clone());
        }
        if let Some(name) = &self.name {
            attributes.insert(qualified_name(prefix, NAME), name.clone());
        }
    }
}

/// A clone gets a fresh handle, no parent and no listeners. Its plugins are
/// bound to the new handle and their children linked below it; structural
/// children are linked by `node::deep_clone`.
impl Clone for ElementCore {
    fn clone(&self) -> Self {
        let handle = NodeHandle::new();
        let mut plugins = self.plugins.clone();
        for plugin in plugins.iter_mut() {
            plugin.core_mut().attach_host(handle, None);
            for child in plugin.children_mut() {
                attach(handle, child);
            }
        }
        Self {
            handle,
            parent: None,
            element: self.element,
            package: self.package,
            namespace: self.namespace.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            meta_id: self.meta_id.clone(),
            sbo_term: self.sbo_term,
            plugins,
            listeners: Listeners::default(),
        }
    }
}

impl PartialEq for ElementCore {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
            && self.package == other.package
            && self.namespace == other.namespace
            && self.id == other.id
            && self.name == other.name
            && self.meta_id == other.meta_id
            && self.sbo_term == other.sbo_term
            && self.plugins == other.plugins
    }
}
