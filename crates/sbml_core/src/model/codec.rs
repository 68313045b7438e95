//! Attribute marshaling between typed fields and namespaced text.
//!
//! # Responsibility
//! - Define the lexical form of every value type carried by an attribute.
//! - Provide per-type attribute tables: an ordered list of handlers built once
//!   per concrete element type and evaluated top-down on read.
//!
//! # Invariants
//! - Unset fields contribute nothing on write (omission, not empty text).
//! - A value this layer owns but cannot parse is reported, left unset and
//!   still counts as consumed.
//! - Write-then-read yields the identical typed value for every lexical kind.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::error::LexicalError;
use crate::model::node::Node;
use std::collections::BTreeMap;

/// Attribute map keyed by `prefix:name` (bare `name` for core attributes).
pub type AttributeMap = BTreeMap<String, String>;

/// Package label of SBML core; its attributes carry no prefix.
pub const CORE_PACKAGE: &str = "core";

/// Returns the attribute prefix used for `package`.
pub fn package_prefix(package: &str) -> &str {
    if package == CORE_PACKAGE {
        ""
    } else {
        package
    }
}

/// Builds the map key for `name` under `prefix`.
pub fn qualified_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}:{name}")
    }
}

/// Splits a map key into `(prefix, name)`; bare keys have an empty prefix.
pub fn split_qualified_name(key: &str) -> (&str, &str) {
    key.split_once(':').unwrap_or(("", key))
}

/// Value with a fixed textual representation.
pub trait Lexical: Sized {
    const KIND: &'static str;

    fn parse_lexical(value: &str) -> Result<Self, LexicalError>;
    fn to_lexical(&self) -> String;
}

impl Lexical for i32 {
    const KIND: &'static str = "int";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        let trimmed = value.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        unsigned
            .parse::<i32>()
            .map_err(|_| LexicalError::new(Self::KIND, value))
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

impl Lexical for f64 {
    const KIND: &'static str = "double";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        match value.trim() {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            other => {
                // Rust also accepts `inf`/`nan` spellings SBML does not.
                if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                    return Err(LexicalError::new(Self::KIND, value));
                }
                other
                    .parse::<f64>()
                    .map_err(|_| LexicalError::new(Self::KIND, value))
            }
        }
    }

    fn to_lexical(&self) -> String {
        if self.is_nan() {
            "NaN".to_string()
        } else if *self == f64::INFINITY {
            "INF".to_string()
        } else if *self == f64::NEG_INFINITY {
            "-INF".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Lexical for bool {
    const KIND: &'static str = "boolean";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        match value.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(LexicalError::new(Self::KIND, value)),
        }
    }

    fn to_lexical(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

impl Lexical for String {
    const KIND: &'static str = "string";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        Ok(value.to_string())
    }

    fn to_lexical(&self) -> String {
        self.clone()
    }
}

impl Lexical for Vec<f64> {
    const KIND: &'static str = "double array";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        split_tokens(value)
            .map(f64::parse_lexical)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LexicalError::new(Self::KIND, value))
    }

    fn to_lexical(&self) -> String {
        join_tokens(self.iter().map(Lexical::to_lexical))
    }
}

impl Lexical for Vec<i32> {
    const KIND: &'static str = "int array";

    fn parse_lexical(value: &str) -> Result<Self, LexicalError> {
        split_tokens(value)
            .map(i32::parse_lexical)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LexicalError::new(Self::KIND, value))
    }

    fn to_lexical(&self) -> String {
        join_tokens(self.iter().map(Lexical::to_lexical))
    }
}

fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

fn join_tokens(tokens: impl Iterator<Item = String>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

/// Closed enumeration with one wire token per variant.
///
/// Tokens are matched case-sensitively.
pub trait Token: Copy + PartialEq + 'static {
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse_token(value: &str) -> Result<Self, LexicalError> {
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
            .ok_or_else(|| LexicalError::new(Self::KIND, value))
    }
}

type ReadFn<T> = Box<dyn Fn(&mut T, &str) -> Result<(), LexicalError> + Send + Sync>;
type WriteFn<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

struct AttributeEntry<T> {
    name: &'static str,
    read: ReadFn<T>,
    write: WriteFn<T>,
    unset: fn(&mut T) -> bool,
}

/// Ordered attribute handlers of one concrete type.
pub struct AttributeTable<T> {
    package: &'static str,
    entries: Vec<AttributeEntry<T>>,
}

impl<T: 'static> AttributeTable<T> {
    pub fn new(package: &'static str) -> Self {
        Self {
            package,
            entries: Vec::new(),
        }
    }

    /// Adds a handler for a field with a `Lexical` value type.
    pub fn value<V: Lexical + 'static>(
        mut self,
        name: &'static str,
        get: fn(&T) -> Option<V>,
        set: fn(&mut T, V),
        unset: fn(&mut T) -> bool,
    ) -> Self {
        self.entries.push(AttributeEntry {
            name,
            read: Box::new(move |target, text| {
                set(target, V::parse_lexical(text)?);
                Ok(())
            }),
            write: Box::new(move |target| get(target).map(|value| value.to_lexical())),
            unset,
        });
        self
    }

    /// Adds a handler for an enumerated field.
    pub fn token<E: Token>(
        mut self,
        name: &'static str,
        get: fn(&T) -> Option<E>,
        set: fn(&mut T, E),
        unset: fn(&mut T) -> bool,
    ) -> Self {
        self.entries.push(AttributeEntry {
            name,
            read: Box::new(move |target, text| {
                set(target, E::parse_token(text)?);
                Ok(())
            }),
            write: Box::new(move |target| get(target).map(|value| value.as_str().to_string())),
            unset,
        });
        self
    }

    /// Adds a handler for a free-text field.
    pub fn text(
        mut self,
        name: &'static str,
        get: fn(&T) -> Option<&str>,
        set: fn(&mut T, String),
        unset: fn(&mut T) -> bool,
    ) -> Self {
        self.entries.push(AttributeEntry {
            name,
            read: Box::new(move |target, text| {
                set(target, text.to_string());
                Ok(())
            }),
            write: Box::new(move |target| get(target).map(str::to_string)),
            unset,
        });
        self
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    /// Attribute names handled by this table, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Reads `name` into `target` when it belongs to this table.
    ///
    /// Returns `false` only when no handler matches `name`.
    pub fn read_entry(
        &self,
        target: &mut T,
        element: &str,
        name: &str,
        value: &str,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        let Some(entry) = self.entries.iter().find(|entry| entry.name == name) else {
            return false;
        };
        if let Err(err) = (entry.read)(target, value) {
            (entry.unset)(target);
            diagnostics.report(Diagnostic::unreadable_attribute(element, name, value, err));
        }
        true
    }

    /// Writes every set field of `target` under this table's prefix.
    pub fn write_entries(&self, target: &T, attributes: &mut AttributeMap) {
        let prefix = package_prefix(self.package);
        for entry in &self.entries {
            if let Some(text) = (entry.write)(target) {
                attributes.insert(qualified_name(prefix, entry.name), text);
            }
        }
    }
}

impl<T: Node + 'static> AttributeTable<T> {
    /// Full read chain of an element: shared element attributes first, then
    /// this table when `prefix` is the table's package prefix.
    pub fn read(
        &self,
        node: &mut T,
        name: &str,
        prefix: &str,
        value: &str,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        if node.core_mut().read_attribute(name, prefix, value, diagnostics) {
            return true;
        }
        if prefix != package_prefix(self.package) {
            return false;
        }
        let element = node.element_name();
        self.read_entry(node, element, name, value, diagnostics)
    }

    /// Full write chain of an element: shared element attributes, then this
    /// table's set fields.
    pub fn write(&self, node: &T, attributes: &mut AttributeMap) {
        node.core().write_attributes(attributes);
        self.write_entries(node, attributes);
    }
}
