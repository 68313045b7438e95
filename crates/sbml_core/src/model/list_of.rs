//! Homogeneous, ordered child container.
//!
//! # Responsibility
//! - Store items of one element kind in insertion order.
//! - Carry its own package label and namespace, independent from the items.
//! - Enforce the minimum item count on removal.
//!
//! # Invariants
//! - Removal that would leave fewer than `minimum_items` items is rejected and
//!   the list is left unchanged.
//! - Every stored item has the list as parent.

use crate::diagnostics::Diagnostics;
use crate::model::element::ElementCore;
use crate::model::error::StructuralError;
use crate::model::id_registry::IdRegistry;
use crate::model::node::{attach, detach, ListNode, Node};

/// `listOf*` element holding items of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOf<T> {
    core: ElementCore,
    item_kind: &'static str,
    minimum: usize,
    items: Vec<T>,
}

impl<T: Node> ListOf<T> {
    pub fn new(
        list_name: &'static str,
        item_kind: &'static str,
        package: &'static str,
        namespace: &str,
    ) -> Self {
        Self {
            core: ElementCore::new(list_name, package, namespace),
            item_kind,
            minimum: 0,
            items: Vec::new(),
        }
    }

    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn item_kind(&self) -> &'static str {
        self.item_kind
    }

    /// Re-labels the list into another package namespace; items keep theirs.
    pub fn set_package(&mut self, package: &'static str, namespace: &str) {
        self.core.set_package(package, namespace);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Returns the first item whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.core().id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.core().id() == Some(id))
    }

    /// Appends `item` and makes the list its parent.
    pub fn add(&mut self, mut item: T) -> &mut T {
        attach(self.core.handle(), &mut item);
        let index = self.items.len();
        self.items.push(item);
        self.core.node_added(self.item_kind);
        &mut self.items[index]
    }

    /// Appends `item` and registers every secondary id in its subtree.
    ///
    /// A conflicting id is reported through `diagnostics`; the item is still
    /// added and keeps a non-functional id.
    pub fn add_registered(
        &mut self,
        item: T,
        ids: &mut IdRegistry,
        diagnostics: &mut dyn Diagnostics,
    ) -> &mut T {
        let item = self.add(item);
        ids.register_subtree(&*item, diagnostics);
        item
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when `index >= len()`.
    /// - `CardinalityViolation` when the list holds `minimum` items or fewer.
    pub fn remove_at(&mut self, index: usize) -> Result<T, StructuralError> {
        if index >= self.items.len() {
            return Err(StructuralError::IndexOutOfBounds {
                index,
                bound: self.items.len(),
            });
        }
        if self.items.len() <= self.minimum {
            return Err(StructuralError::CardinalityViolation {
                list: self.core.element(),
                minimum: self.minimum,
            });
        }
        let mut item = self.items.remove(index);
        detach(&mut item);
        self.core.node_removed(self.item_kind);
        Ok(item)
    }

    /// Removes the item at `index` and unregisters its subtree from `ids`.
    pub fn remove_at_registered(
        &mut self,
        index: usize,
        ids: &mut IdRegistry,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<T, StructuralError> {
        let item = self.remove_at(index)?;
        ids.unregister_subtree(&item, diagnostics);
        Ok(item)
    }

    /// Removes the first item matching `predicate`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub fn remove_matching(
        &mut self,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Option<T>, StructuralError> {
        match self.items.iter().position(predicate) {
            Some(index) => self.remove_at(index).map(Some),
            None => Ok(None),
        }
    }

    /// Removes the item with `id`.
    pub fn remove_by_id(&mut self, id: &str) -> Result<Option<T>, StructuralError> {
        self.remove_matching(|item| item.core().id() == Some(id))
    }
}

impl<T: Node + 'static> Node for ListOf<T> {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.items.iter().map(|item| item as &dyn Node).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        self.items
            .iter_mut()
            .map(|item| item as &mut dyn Node)
            .collect()
    }

    fn as_list(&self) -> Option<&dyn ListNode> {
        Some(self)
    }
}

impl<T: Node + 'static> ListNode for ListOf<T> {
    fn item_kind(&self) -> &'static str {
        self.item_kind
    }

    fn minimum_items(&self) -> usize {
        self.minimum
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<&dyn Node> {
        self.items.get(index).map(|item| item as &dyn Node)
    }
}

impl<'a, T> IntoIterator for &'a ListOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
