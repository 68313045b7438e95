//! Tree node contract and parent bookkeeping.
//!
//! # Responsibility
//! - Define the `Node` contract consumed by generic tooling: child
//!   enumeration, attribute read/write fan-out to plugins, secondary ids.
//! - Maintain parent links when subtrees are attached or detached.
//!
//! # Invariants
//! - `child_count()` and `child_at()` are both derived from `children()`.
//! - `children()` lists set single-slot children in declaration order, then
//!   non-empty lists in declaration order; a list is one child slot.
//! - Parent links are handles and are never followed by clone or equality.

use crate::diagnostics::Diagnostics;
use crate::model::codec::{split_qualified_name, AttributeMap};
use crate::model::element::ElementCore;
use crate::model::error::StructuralError;
use crate::model::handle::NodeHandle;
use crate::model::list_of::ListOf;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Element of the document tree.
pub trait Node: Debug {
    fn core(&self) -> &ElementCore;
    fn core_mut(&mut self) -> &mut ElementCore;

    fn element_name(&self) -> &'static str {
        self.core().element()
    }

    fn handle(&self) -> NodeHandle {
        self.core().handle()
    }

    fn parent(&self) -> Option<NodeHandle> {
        self.core().parent()
    }

    /// Whether this element kind declares any child slot or list.
    fn allows_children(&self) -> bool {
        false
    }

    /// Set structural children in enumeration order.
    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    /// Every owned child, set or empty; used to maintain parent links.
    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        Vec::new()
    }

    fn child_count(&self) -> usize {
        self.children().len()
    }

    /// # Errors
    /// - `IndexOutOfBounds` carrying `index` and the current child count.
    fn child_at(&self, index: usize) -> Result<&dyn Node, StructuralError> {
        let children = self.children();
        let bound = children.len();
        children
            .into_iter()
            .nth(index)
            .ok_or(StructuralError::IndexOutOfBounds { index, bound })
    }

    /// Whether this element kind carries a package-scoped secondary id.
    fn carries_secondary_id(&self) -> bool {
        false
    }

    fn secondary_id(&self) -> Option<&str> {
        if self.carries_secondary_id() {
            self.core().id()
        } else {
            None
        }
    }

    fn as_list(&self) -> Option<&dyn ListNode> {
        None
    }

    /// Reads an attribute declared by this element kind (shared attributes
    /// included); plugins are not consulted.
    fn read_own_attribute(
        &mut self,
        name: &str,
        prefix: &str,
        value: &str,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        self.core_mut().read_attribute(name, prefix, value, diagnostics)
    }

    /// Writes the attributes declared by this element kind.
    fn write_own_attributes(&self, attributes: &mut AttributeMap) {
        self.core().write_attributes(attributes);
    }

    /// Reads one textual attribute.
    ///
    /// The element's own attributes are tried first; an unconsumed attribute
    /// goes to the plugin whose package label equals `prefix`.
    fn read_attribute(
        &mut self,
        name: &str,
        prefix: &str,
        value: &str,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        if self.read_own_attribute(name, prefix, value, diagnostics) {
            return true;
        }
        match self.core_mut().plugins_mut().get_dyn_mut(prefix) {
            Some(plugin) => plugin.read_attribute(name, value, diagnostics),
            None => false,
        }
    }

    /// Returns the element's attributes extended with those of every plugin.
    fn write_xml_attributes(&self) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        self.write_own_attributes(&mut attributes);
        for plugin in self.core().plugins().iter() {
            plugin.write_attributes(&mut attributes);
        }
        attributes
    }

    /// Feeds every entry of `attributes` through `read_attribute`.
    ///
    /// Returns the keys nobody consumed.
    fn read_attributes(
        &mut self,
        attributes: &AttributeMap,
        diagnostics: &mut dyn Diagnostics,
    ) -> Vec<String> {
        let mut unconsumed = Vec::new();
        for (key, value) in attributes {
            let (prefix, name) = split_qualified_name(key);
            if !self.read_attribute(name, prefix, value, diagnostics) {
                unconsumed.push(key.clone());
            }
        }
        unconsumed
    }
}

/// Homogeneous list seen through the tree contract.
pub trait ListNode {
    fn item_kind(&self) -> &'static str;
    fn minimum_items(&self) -> usize;
    fn item_count(&self) -> usize;
    fn item_at(&self, index: usize) -> Option<&dyn Node>;
}

/// Makes `child` and its whole subtree point at `owner`.
pub fn attach(owner: NodeHandle, child: &mut dyn Node) {
    child.core_mut().set_parent(Some(owner));
    relink(child);
}

/// Clears the parent link of a removed subtree root.
pub fn detach(child: &mut dyn Node) {
    child.core_mut().set_parent(None);
}

/// Re-establishes the parent links below `node`, plugin children included.
pub fn relink(node: &mut dyn Node) {
    let handle = node.handle();
    for child in node.children_mut() {
        attach(handle, child);
    }
    for plugin in node.core_mut().plugins_mut().iter_mut() {
        for child in plugin.children_mut() {
            attach(handle, child);
        }
    }
}

/// Clones `node` and links the copy's subtree to the copy.
pub fn deep_clone<N: Node + Clone>(node: &N) -> N {
    let mut copy = node.clone();
    relink(&mut copy);
    copy
}

/// Visits `root` and every node below it, plugin children included.
pub fn walk<'a>(root: &'a dyn Node, visit: &mut dyn FnMut(&'a dyn Node)) {
    visit(root);
    for child in root.children() {
        walk(child, visit);
    }
    for plugin in root.core().plugins().iter() {
        for child in plugin.children() {
            walk(child, visit);
        }
    }
}

/// Handles of `root` and every node below it.
pub fn subtree_handles(root: &dyn Node) -> BTreeSet<NodeHandle> {
    let mut handles = BTreeSet::new();
    walk(root, &mut |node| {
        handles.insert(node.handle());
    });
    handles
}

/// Finds the node with `handle` in the subtree of `root`.
pub fn find_node(root: &dyn Node, handle: NodeHandle) -> Option<&dyn Node> {
    let mut found = None;
    walk(root, &mut |node| {
        if found.is_none() && node.handle() == handle {
            found = Some(node);
        }
    });
    found
}

/// Collects set children in enumeration order.
pub struct Children<'a> {
    nodes: Vec<&'a dyn Node>,
}

impl<'a> Children<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a single-slot child when it is set.
    pub fn slot<T: Node + 'a>(mut self, slot: Option<&'a T>) -> Self {
        if let Some(child) = slot {
            self.nodes.push(child);
        }
        self
    }

    /// Adds a list as one child when it holds at least one item.
    pub fn list<T: Node + 'static>(mut self, list: Option<&'a ListOf<T>>) -> Self {
        if let Some(list) = list.filter(|list| !list.is_empty()) {
            self.nodes.push(list);
        }
        self
    }

    pub fn build(self) -> Vec<&'a dyn Node> {
        self.nodes
    }
}

impl Default for Children<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects every owned child, set or empty.
pub struct ChildrenMut<'a> {
    nodes: Vec<&'a mut dyn Node>,
}

impl<'a> ChildrenMut<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn slot<T: Node + 'a>(mut self, slot: Option<&'a mut T>) -> Self {
        if let Some(child) = slot {
            self.nodes.push(child);
        }
        self
    }

    pub fn build(self) -> Vec<&'a mut dyn Node> {
        self.nodes
    }
}

impl Default for ChildrenMut<'_> {
    fn default() -> Self {
        Self::new()
    }
}
