//! Generic extensible element model.
//!
//! # Responsibility
//! - Tree composite (`Node`), ordered child lists (`ListOf`), package
//!   extensions (`Plugin`), attribute marshaling (`AttributeTable`) and
//!   package-scoped secondary ids (`IdRegistry`).
//!
//! # Invariants
//! - Children are owned by exactly one slot or list; every back-reference is
//!   a `NodeHandle`.
//! - The model performs no I/O and keeps no process-wide state.

pub mod change;
pub mod codec;
pub mod element;
pub mod error;
pub mod handle;
pub mod id_registry;
pub mod list_of;
pub mod node;
pub mod plugin;

pub use change::{ChangeEvent, ChangeKind, ChangeListener};
pub use codec::{AttributeMap, AttributeTable, Lexical, Token, CORE_PACKAGE};
pub use element::{ElementCore, CORE_NAMESPACE};
pub use error::{LexicalError, StructuralError};
pub use handle::NodeHandle;
pub use id_registry::{IdRegistry, RegisteredNode};
pub use list_of::ListOf;
pub use node::{deep_clone, find_node, ListNode, Node};
pub use plugin::{Plugin, PluginCore, PluginMap};
