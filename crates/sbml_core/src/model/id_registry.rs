//! Package-scoped secondary id namespace.
//!
//! # Responsibility
//! - Map secondary ids of one package to the node carrying them, for one
//!   owning plugin instance (one document/model scope).
//! - Accept/register/unregister lifecycle with duplicate rejection.
//!
//! # Invariants
//! - An id maps to at most one node; a duplicate never overwrites.
//! - The registry is explicitly scoped; nothing is global and nothing is
//!   re-scanned automatically.
//! - Unregistering an unknown id is a reported no-op.
//! - A list is registered and unregistered item by item.
//!
//! # See also
//! - `crate::spatial::plugins::SpatialModelPlugin`, which owns one.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::error::StructuralError;
use crate::model::handle::NodeHandle;
use crate::model::node::{walk, ListNode, Node};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Registry entry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredNode {
    pub handle: NodeHandle,
    pub element: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRegistry {
    package: &'static str,
    entries: BTreeMap<String, RegisteredNode>,
    populated: bool,
}

impl IdRegistry {
    pub fn new(package: &'static str) -> Self {
        Self {
            package,
            entries: BTreeMap::new(),
            populated: false,
        }
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    /// Whether `node`, or the first item of list `node`, carries a secondary id.
    pub fn accept(&self, node: &dyn Node) -> bool {
        if node.carries_secondary_id() {
            return true;
        }
        node.as_list()
            .and_then(|list| list.item_at(0))
            .is_some_and(|first| first.carries_secondary_id())
    }

    /// Registers the secondary id of `node`, or of every item of list `node`.
    ///
    /// Returns `true` when the id was inserted or there was nothing to
    /// register, `false` when the id is already taken (reported, existing
    /// entry kept) or the node kind carries no secondary id.
    pub fn register(&mut self, node: &dyn Node, diagnostics: &mut dyn Diagnostics) -> bool {
        if let Some(list) = item_list(node) {
            let mut all_registered = true;
            for item in list_items(list) {
                all_registered &= self.register(item, diagnostics);
            }
            return all_registered;
        }
        match self.try_register(node) {
            Ok(_) => true,
            Err(StructuralError::DuplicateId { id, package }) => {
                diagnostics.report(Diagnostic::duplicate_id(node.element_name(), package, &id));
                false
            }
            Err(_) => false,
        }
    }

    /// Registers the secondary id of `node`.
    ///
    /// Returns whether an entry was inserted. Registering a node that already
    /// owns its id is a no-op.
    ///
    /// # Errors
    /// - `DuplicateId` when the id is already registered.
    /// - `PluginMismatch` when the node kind carries no secondary id.
    pub fn try_register(&mut self, node: &dyn Node) -> Result<bool, StructuralError> {
        if !node.carries_secondary_id() {
            return Err(StructuralError::PluginMismatch {
                package: self.package.to_string(),
                expected: "secondary id carrier",
            });
        }
        let Some(id) = node.secondary_id() else {
            return Ok(false);
        };
        if let Some(entry) = self.entries.get(id) {
            if entry.handle == node.handle() {
                return Ok(false);
            }
            return Err(StructuralError::DuplicateId {
                id: id.to_string(),
                package: self.package,
            });
        }
        self.entries.insert(
            id.to_string(),
            RegisteredNode {
                handle: node.handle(),
                element: node.element_name(),
            },
        );
        self.populated = true;
        debug!(
            "event=id_register module=model status=ok package={} id={} element={}",
            self.package,
            id,
            node.element_name()
        );
        Ok(true)
    }

    /// Removes the secondary id of `node`, or of every item of list `node`.
    /// Always returns `true`.
    ///
    /// An id that is absent, or registered to another node, is reported and
    /// left alone.
    pub fn unregister(&mut self, node: &dyn Node, diagnostics: &mut dyn Diagnostics) -> bool {
        if let Some(list) = item_list(node) {
            for item in list_items(list) {
                self.unregister(item, diagnostics);
            }
            return true;
        }
        let Some(id) = node.secondary_id() else {
            return true;
        };
        let owned_by_node = self
            .entries
            .get(id)
            .is_some_and(|entry| entry.handle == node.handle());
        if !self.populated || !owned_by_node {
            diagnostics.report(Diagnostic::unknown_id(node.element_name(), self.package, id));
            return true;
        }
        self.entries.remove(id);
        debug!(
            "event=id_unregister module=model status=ok package={} id={}",
            self.package, id
        );
        true
    }

    /// Registers every secondary id in the subtree of `root`.
    ///
    /// Returns `false` when at least one id was rejected.
    pub fn register_subtree(&mut self, root: &dyn Node, diagnostics: &mut dyn Diagnostics) -> bool {
        let mut all_registered = true;
        walk(root, &mut |node| {
            if node.carries_secondary_id() && !self.register(node, diagnostics) {
                all_registered = false;
            }
        });
        all_registered
    }

    /// Unregisters every secondary id in the subtree of `root`.
    pub fn unregister_subtree(&mut self, root: &dyn Node, diagnostics: &mut dyn Diagnostics) {
        walk(root, &mut |node| {
            if node.carries_secondary_id() {
                self.unregister(node, diagnostics);
            }
        });
    }

    /// Replaces the content with the ids found below `root`.
    pub fn rebuild(&mut self, root: &dyn Node, diagnostics: &mut dyn Diagnostics) -> bool {
        self.entries.clear();
        self.register_subtree(root, diagnostics)
    }

    /// Brings the entries of one subtree up to date after it was mutated.
    ///
    /// Entries owned by a node in `previous` (the subtree's handles before the
    /// mutation) are dropped, then every id below `root` is registered again.
    /// Entries of nodes outside the subtree are kept.
    pub fn reconcile(
        &mut self,
        root: &dyn Node,
        previous: &BTreeSet<NodeHandle>,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        self.entries.retain(|_, entry| !previous.contains(&entry.handle));
        self.register_subtree(root, diagnostics)
    }

    pub fn lookup(&self, id: &str) -> Option<&RegisteredNode> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The list view of `node` when its items, not the node, carry the ids.
fn item_list(node: &dyn Node) -> Option<&dyn ListNode> {
    if node.carries_secondary_id() {
        return None;
    }
    node.as_list()
}

fn list_items<'a>(list: &'a dyn ListNode) -> impl Iterator<Item = &'a dyn Node> + 'a {
    (0..list.item_count()).filter_map(move |index| list.item_at(index))
}
