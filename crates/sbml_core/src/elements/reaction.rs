use crate::elements::{core_element, REACTION};
use crate::model::{AttributeTable, ElementCore, Node, CORE_PACKAGE};
use once_cell::sync::Lazy;

pub const REVERSIBLE: &str = "reversible";

static REACTION_ATTRIBUTES: Lazy<AttributeTable<Reaction>> = Lazy::new(|| {
    AttributeTable::new(CORE_PACKAGE).value(
        REVERSIBLE,
        Reaction::reversible,
        Reaction::set_reversible,
        Reaction::unset_reversible,
    )
});

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    core: ElementCore,
    reversible: Option<bool>,
}

impl Reaction {
    pub fn new() -> Self {
        Self {
            core: core_element(REACTION),
            reversible: None,
        }
    }
}

impl Default for Reaction {
    fn default() -> Self {
        Self::new()
    }
}

optional_properties!(Reaction {
    value reversible: bool = REVERSIBLE => is_set_reversible, set_reversible, unset_reversible;
});

impl Node for Reaction {
    element_core_access!();
    attribute_table_access!(REACTION_ATTRIBUTES);
}
