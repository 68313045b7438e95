//! Document model root.
//!
//! # Invariants
//! - Child lists enumerate in the order compartments, species, parameters,
//!   reactions.
//! - The model owns no id registry itself; package plugins attached to it do.

use crate::elements::{
    core_element, Compartment, Parameter, Reaction, Species, COMPARTMENT, LIST_OF_COMPARTMENTS,
    LIST_OF_PARAMETERS, LIST_OF_REACTIONS, LIST_OF_SPECIES, MODEL, PARAMETER, REACTION, SPECIES,
};
use crate::model::node::{Children, ChildrenMut};
use crate::model::{ElementCore, ListOf, Node, PluginMap};

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    core: ElementCore,
    compartments: Option<ListOf<Compartment>>,
    species: Option<ListOf<Species>>,
    parameters: Option<ListOf<Parameter>>,
    reactions: Option<ListOf<Reaction>>,
}

/// Disjoint mutable views of a model: its lists next to its plugins.
///
/// Lets callers mutate an element of a list while holding the id registry
/// of a plugin attached to the model.
pub struct ModelParts<'a> {
    pub compartments: Option<&'a mut ListOf<Compartment>>,
    pub species: Option<&'a mut ListOf<Species>>,
    pub parameters: Option<&'a mut ListOf<Parameter>>,
    pub reactions: Option<&'a mut ListOf<Reaction>>,
    pub plugins: &'a mut PluginMap,
}

impl Model {
    pub fn new() -> Self {
        Self {
            core: core_element(MODEL),
            compartments: None,
            species: None,
            parameters: None,
            reactions: None,
        }
    }

    pub fn parts_mut(&mut self) -> ModelParts<'_> {
        ModelParts {
            compartments: self.compartments.as_mut(),
            species: self.species.as_mut(),
            parameters: self.parameters.as_mut(),
            reactions: self.reactions.as_mut(),
            plugins: self.core.plugins_mut(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

child_lists!(Model {
    compartments: Compartment = (LIST_OF_COMPARTMENTS, COMPARTMENT, 0)
        => is_set_compartments, compartments_mut, set_compartments, unset_compartments,
           add_compartment, remove_compartment;
    species: Species = (LIST_OF_SPECIES, SPECIES, 0)
        => is_set_species, species_mut, set_species, unset_species,
           add_species, remove_species;
    parameters: Parameter = (LIST_OF_PARAMETERS, PARAMETER, 0)
        => is_set_parameters, parameters_mut, set_parameters, unset_parameters,
           add_parameter, remove_parameter;
    reactions: Reaction = (LIST_OF_REACTIONS, REACTION, 0)
        => is_set_reactions, reactions_mut, set_reactions, unset_reactions,
           add_reaction, remove_reaction;
});

impl Node for Model {
    element_core_access!();

    fn allows_children(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn Node> {
        Children::new()
            .list(self.compartments.as_ref())
            .list(self.species.as_ref())
            .list(self.parameters.as_ref())
            .list(self.reactions.as_ref())
            .build()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Node> {
        ChildrenMut::new()
            .slot(self.compartments.as_mut())
            .slot(self.species.as_mut())
            .slot(self.parameters.as_mut())
            .slot(self.reactions.as_mut())
            .build()
    }
}
