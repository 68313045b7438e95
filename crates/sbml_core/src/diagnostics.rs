//! Injected diagnostics sink for recoverable model problems.
//!
//! # Responsibility
//! - Carry tier-1 (unreadable attribute) and tier-2 (duplicate id, unknown id)
//!   reports out of the model core without touching process-wide state.
//! - Offer a `log`-backed sink and an in-memory collecting sink.
//!
//! # Invariants
//! - Reporting never fails and never aborts the caller's operation.
//! - Callers decide whether warnings are fatal; the sink only records them.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Severity of one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable classification of diagnostics emitted by the model core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Attribute belongs to the element but its value could not be parsed.
    UnreadableAttribute,
    /// Secondary id is already registered in the owning scope.
    DuplicateId,
    /// Secondary id was never registered in the owning scope.
    UnknownId,
    /// An element was asked to move between two package namespaces.
    NamespaceConflict,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnreadableAttribute => "unreadable_attribute",
            Self::DuplicateId => "duplicate_id",
            Self::UnknownId => "unknown_id",
            Self::NamespaceConflict => "namespace_conflict",
        }
    }
}

/// One recoverable problem found while reading or mutating the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Element name the problem was found on, e.g. `csgRotation`.
    pub element: String,
    /// Attribute name, when the problem concerns one attribute.
    pub attribute: Option<String>,
    /// Offending textual value or id.
    pub value: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// Builds the warning reported when an attribute value cannot be parsed.
    pub fn unreadable_attribute(
        element: &str,
        attribute: &str,
        value: &str,
        reason: impl Display,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code: DiagnosticCode::UnreadableAttribute,
            element: element.to_string(),
            attribute: Some(attribute.to_string()),
            value: Some(value.to_string()),
            message: format!(
                "could not read value `{value}` for attribute `{attribute}` on element `{element}`: {reason}"
            ),
        }
    }

    pub fn duplicate_id(element: &str, package: &str, id: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: DiagnosticCode::DuplicateId,
            element: element.to_string(),
            attribute: None,
            value: Some(id.to_string()),
            message: format!(
                "a {package} id `{id}` is already registered; element `{element}` keeps a non-functional id"
            ),
        }
    }

    pub fn unknown_id(element: &str, package: &str, id: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: DiagnosticCode::UnknownId,
            element: element.to_string(),
            attribute: None,
            value: Some(id.to_string()),
            message: format!("{package} id `{id}` of element `{element}` was not registered"),
        }
    }

    pub fn namespace_conflict(element: &str, current: &str, requested: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: DiagnosticCode::NamespaceConflict,
            element: element.to_string(),
            attribute: None,
            value: Some(requested.to_string()),
            message: format!(
                "element `{element}` cannot belong to two namespaces: current `{current}`, requested `{requested}`"
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

/// Sink receiving recoverable problems from model operations.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink forwarding every diagnostic to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        let value = diagnostic.value.as_deref().unwrap_or("-");
        let attribute = diagnostic.attribute.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Warning => warn!(
                "event=model_diagnostic module=model status=warning code={} element={} attribute={} value={}",
                diagnostic.code.as_str(),
                diagnostic.element,
                attribute,
                value
            ),
            Severity::Error => error!(
                "event=model_diagnostic module=model status=error code={} element={} attribute={} value={}",
                diagnostic.code.as_str(),
                diagnostic.element,
                attribute,
                value
            ),
        }
    }
}

/// Sink keeping every diagnostic in memory, in report order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectedDiagnostics {
    entries: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Warning)
            .collect()
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.entries.iter().filter(|entry| entry.is_error()).collect()
    }

    /// Returns whether any diagnostic with `code` was reported.
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectedDiagnostics, Diagnostic, DiagnosticCode, Diagnostics, Severity};

    #[test]
    fn collected_diagnostics_split_by_severity() {
        let mut sink = CollectedDiagnostics::new();
        sink.report(Diagnostic::unreadable_attribute(
            "csgRotation",
            "rotateAxisX",
            "abc",
            "not a number",
        ));
        sink.report(Diagnostic::duplicate_id("domain", "spatial", "dom1"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.warnings().len(), 1);
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.contains(DiagnosticCode::DuplicateId));
        assert!(!sink.contains(DiagnosticCode::UnknownId));
    }

    #[test]
    fn unreadable_attribute_message_names_attribute_and_element() {
        let diagnostic =
            Diagnostic::unreadable_attribute("sampledField", "numSamples1", "x", "invalid int");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.message.contains("numSamples1"));
        assert!(diagnostic.message.contains("sampledField"));
        assert!(diagnostic.to_string().starts_with("[unreadable_attribute]"));
    }
}
