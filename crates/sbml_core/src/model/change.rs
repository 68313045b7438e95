//! Synchronous change notification.
//!
//! # Invariants
//! - Listeners run in registration order, after the mutation completed.
//! - Listener lists are per node; they are neither cloned nor compared.

use crate::model::handle::NodeHandle;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// What happened to the source node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A typed property was set or unset.
    Property,
    /// A child was attached to the source node.
    NodeAdded,
    /// A child was detached from the source node.
    NodeRemoved,
}

/// One change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub source: NodeHandle,
    /// Element name of the source, e.g. `domain`.
    pub element: &'static str,
    /// Property name for `Property` events, child element name otherwise.
    pub property: &'static str,
    /// Lexical form of the previous value; `None` when unset.
    pub old_value: Option<String>,
    /// Lexical form of the new value; `None` when unset.
    pub new_value: Option<String>,
}

/// Observer attached to one node.
pub trait ChangeListener {
    fn changed(&self, event: &ChangeEvent);
}

/// Ordered observer list owned by one node.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Rc<dyn ChangeListener>>,
}

impl Listeners {
    pub fn add(&mut self, listener: Rc<dyn ChangeListener>) {
        self.entries.push(listener);
    }

    /// Removes `listener` if it is attached; returns whether it was.
    pub fn remove(&mut self, listener: &Rc<dyn ChangeListener>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| !Rc::ptr_eq(entry, listener));
        before != self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fire(&self, event: &ChangeEvent) {
        for listener in &self.entries {
            listener.changed(event);
        }
    }
}

impl Clone for Listeners {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listeners({})", self.entries.len())
    }
}
