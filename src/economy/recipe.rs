use serde::{Deserialize, Serialize};

use crate::economy::goods::ResourceId;
use crate::world::site::{Requirement, SiteFunction};

/// Which chore may run a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftKind {
    Mill,
    Press,
    Smelt,
    Weave,
    /// Any recipe flagged for the general workforce
    General,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub kind: CraftKind,
    pub output: ResourceId,
    pub quantity: u32,
    pub costs: Vec<Requirement>,
    /// Building function the recipe needs beyond its chore's own
    pub requires_function: Option<SiteFunction>,
    /// An object that must be in storage but is not consumed
    pub requires_item: Option<ResourceId>,
    /// Only recipes flagged for the workforce are ever picked
    pub workforce: bool,
}

impl Recipe {
    pub fn new(id: u32, name: impl Into<String>, kind: CraftKind, output: ResourceId, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            output,
            quantity,
            costs: Vec::new(),
            requires_function: None,
            requires_item: None,
            workforce: true,
        }
    }

    pub fn with_cost(mut self, cost: Requirement) -> Self {
        self.costs.push(cost);
        self
    }

    pub fn requiring(mut self, function: SiteFunction) -> Self {
        self.requires_function = Some(function);
        self
    }

    pub fn requiring_item(mut self, vnum: ResourceId) -> Self {
        self.requires_item = Some(vnum);
        self
    }

    pub fn manual_only(mut self) -> Self {
        self.workforce = false;
        self
    }

    /// Every cost can be paid out of empire storage
    pub fn storage_payable(&self) -> bool {
        self.costs.iter().all(Requirement::is_storable)
    }
}
