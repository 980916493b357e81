use core::fmt;

use serde::{Deserialize, Serialize};

use crate::world::interaction::Interaction;

/// Prototype number of a storable object (ore, lumber, wheat, coins-worth gold...)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generic component categories. Any stored object tagged with the category
/// can pay a component requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum ComponentKind {
    Lumber,
    Block,
    Fibers,
    Metal,
    Clay,
    Skin,
    Oil,
    Herb,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Lumber => write!(f, "lumber"),
            ComponentKind::Block => write!(f, "block"),
            ComponentKind::Fibers => write!(f, "fibers"),
            ComponentKind::Metal => write!(f, "metal"),
            ComponentKind::Clay => write!(f, "clay"),
            ComponentKind::Skin => write!(f, "skin"),
            ComponentKind::Oil => write!(f, "oil"),
            ComponentKind::Herb => write!(f, "herb"),
        }
    }
}

/// Wealth data for objects that can be minted into coins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wealth {
    pub value: u32,
    pub automint: bool,
}

#[derive(Debug, Clone)]
pub struct ObjectProto {
    pub id: ResourceId,
    pub name: String,
    pub component: Option<ComponentKind>,
    /// Counts towards the food that feeds the workforce
    pub food: bool,
    pub wealth: Option<Wealth>,
    /// Interactions exposed by the item itself (scrape, tan, saw)
    pub interactions: Vec<Interaction>,
}

impl ObjectProto {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            component: None,
            food: false,
            wealth: None,
            interactions: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: ComponentKind) -> Self {
        self.component = Some(component);
        self
    }

    pub fn as_food(mut self) -> Self {
        self.food = true;
        self
    }

    pub fn with_wealth(mut self, value: u32, automint: bool) -> Self {
        self.wealth = Some(Wealth { value, automint });
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// True if the workforce may melt this object down into coins
    pub fn is_mintable(&self) -> bool {
        matches!(self.wealth, Some(w) if w.value > 0 && w.automint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(ResourceId(120).to_string(), "#120");
        assert_eq!(ComponentKind::Lumber.to_string(), "lumber");
        assert_eq!(ComponentKind::Block.to_string(), "block");
    }

    #[test]
    fn mintable_requires_value_and_automint() {
        let gold = ObjectProto::new(ResourceId(1), "gold bar").with_wealth(10, true);
        let trinket = ObjectProto::new(ResourceId(2), "trinket").with_wealth(10, false);
        let worthless = ObjectProto::new(ResourceId(3), "rock").with_wealth(0, true);

        assert!(gold.is_mintable());
        assert!(!trinket.is_mintable());
        assert!(!worthless.is_mintable());
        assert!(!ObjectProto::new(ResourceId(4), "stick").is_mintable());
    }
}
