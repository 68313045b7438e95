//! Error types of the element model.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reported, non-fatal failure of a tree mutation or navigation.
///
/// Every operation returning this error leaves the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Requested child or item index is outside `0..bound`.
    IndexOutOfBounds { index: usize, bound: usize },
    /// Removal would take `list` below its minimum number of items.
    CardinalityViolation { list: &'static str, minimum: usize },
    /// Secondary id is already taken in the registry of `package`.
    DuplicateId { id: String, package: &'static str },
    /// Identifier does not follow the expected grammar.
    InvalidIdentifier { kind: &'static str, value: String },
    /// Plugin stored under a package label has an unexpected type.
    PluginMismatch {
        package: String,
        expected: &'static str,
    },
}

impl Display for StructuralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, bound } => {
                write!(f, "index {index} >= {bound}")
            }
            Self::CardinalityViolation { list, minimum } => write!(
                f,
                "{list} must keep at least {minimum} item(s); removal rejected"
            ),
            Self::DuplicateId { id, package } => {
                write!(f, "{package} id already registered: {id}")
            }
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "invalid {kind}: `{value}`")
            }
            Self::PluginMismatch { package, expected } => write!(
                f,
                "plugin registered under `{package}` is not a {expected}"
            ),
        }
    }
}

impl Error for StructuralError {}

/// Textual value could not be converted into its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    /// Expected lexical kind, e.g. `double` or `CoordinateKind`.
    pub kind: &'static str,
    pub value: String,
}

impl LexicalError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a valid {}", self.value, self.kind)
    }
}

impl Error for LexicalError {}

#[cfg(test)]
mod tests {
    use super::{LexicalError, StructuralError};

    #[test]
    fn index_error_carries_index_and_bound() {
        let err = StructuralError::IndexOutOfBounds { index: 3, bound: 2 };
        assert_eq!(err.to_string(), "index 3 >= 2");
    }

    #[test]
    fn lexical_error_names_kind() {
        let err = LexicalError::new("double", "abc");
        assert_eq!(err.to_string(), "`abc` is not a valid double");
    }
}
