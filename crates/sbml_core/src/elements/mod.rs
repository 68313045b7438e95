//! Core SBML host elements.
//!
//! Only the attribute surface and child lists needed to host package
//! plugins; no chemical or biological semantics.

pub mod compartment;
pub mod model;
pub mod parameter;
pub mod reaction;
pub mod species;

pub use compartment::Compartment;
pub use model::{Model, ModelParts};
pub use parameter::Parameter;
pub use reaction::Reaction;
pub use species::Species;

use crate::model::{ElementCore, CORE_NAMESPACE, CORE_PACKAGE};

pub const MODEL: &str = "model";
pub const COMPARTMENT: &str = "compartment";
pub const SPECIES: &str = "species";
pub const PARAMETER: &str = "parameter";
pub const REACTION: &str = "reaction";

pub const LIST_OF_COMPARTMENTS: &str = "listOfCompartments";
pub const LIST_OF_SPECIES: &str = "listOfSpecies";
pub const LIST_OF_PARAMETERS: &str = "listOfParameters";
pub const LIST_OF_REACTIONS: &str = "listOfReactions";

fn core_element(element: &'static str) -> ElementCore {
    ElementCore::new(element, CORE_PACKAGE, CORE_NAMESPACE)
}
