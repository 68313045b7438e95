//! Extensible hierarchical element model for SBML documents and the
//! spatial package built on it.
//! This crate is the single source of truth for tree, plugin and id invariants.

#[macro_use]
mod macros;

pub mod diagnostics;
pub mod elements;
pub mod logging;
pub mod model;
pub mod spatial;

pub use diagnostics::{
    CollectedDiagnostics, Diagnostic, DiagnosticCode, Diagnostics, LogDiagnostics, Severity,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::{
    AttributeMap, ChangeEvent, ChangeKind, ChangeListener, ElementCore, IdRegistry, ListOf,
    Node, NodeHandle, Plugin, PluginMap, StructuralError,
};

/// Liveness answer printed by the smoke binary before it builds a sample model.
pub fn ping() -> &'static str {
    "pong"
}

/// Version of the element model, printed by the smoke binary.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn cli_liveness_answer_is_stable() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn model_version_is_semver() {
        let parts: Vec<&str> = core_version().split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|part| part.parse::<u32>().is_ok()));
    }
}
