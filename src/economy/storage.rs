use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::economy::goods::{ComponentKind, ResourceId};
use crate::world::IslandId;
use crate::world::catalog::Catalog;
use crate::world::site::{Requirement, RequirementKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredStack {
    pub vnum: ResourceId,
    pub amount: u32,
}

/// One island's warehouse. Stacks keep their order so component charges can
/// take from the largest stack first after a sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandStorage {
    stacks: Vec<StoredStack>,
}

impl IslandStorage {
    /// Get stored amount of an object
    pub fn get(&self, vnum: ResourceId) -> u32 {
        self.stacks
            .iter()
            .find(|stack| stack.vnum == vnum)
            .map(|stack| stack.amount)
            .unwrap_or(0)
    }

    pub fn add(&mut self, vnum: ResourceId, qty: u32) {
        if qty == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|stack| stack.vnum == vnum) {
            Some(stack) => stack.amount = stack.amount.saturating_add(qty),
            None => self.stacks.push(StoredStack { vnum, amount: qty }),
        }
    }

    /// Attempts to remove `qty` units; returns how many were actually removed
    pub fn take_up_to(&mut self, vnum: ResourceId, qty: u32) -> u32 {
        let Some(pos) = self.stacks.iter().position(|stack| stack.vnum == vnum) else {
            return 0;
        };
        let stack = &mut self.stacks[pos];
        let take = stack.amount.min(qty);
        stack.amount -= take;
        if stack.amount == 0 {
            self.stacks.remove(pos);
        }
        take
    }

    pub fn has_at_least(&self, vnum: ResourceId, qty: u32) -> bool {
        self.get(vnum) >= qty
    }

    pub fn stacks(&self) -> &[StoredStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Largest stacks first; ties keep their previous order
    pub fn sort_largest_first(&mut self) {
        self.stacks.sort_by(|a, b| b.amount.cmp(&a.amount));
    }

    /// Total of every stack tagged with `kind`
    pub fn component_amount(&self, catalog: &Catalog, kind: ComponentKind) -> u32 {
        self.stacks
            .iter()
            .filter(|stack| catalog.is_component(stack.vnum, kind))
            .map(|stack| stack.amount)
            .sum()
    }

    /// Takes `qty` units of `kind` walking stacks in order. Returns what was
    /// taken, or `None` (leaving storage untouched) if there isn't enough.
    pub fn try_take_component(
        &mut self,
        catalog: &Catalog,
        kind: ComponentKind,
        qty: u32,
    ) -> Option<Vec<(ResourceId, u32)>> {
        if self.component_amount(catalog, kind) < qty {
            return None;
        }

        let mut taken = Vec::new();
        let mut left = qty;
        for stack in self.stacks.iter_mut() {
            if left == 0 {
                break;
            }
            if !catalog.is_component(stack.vnum, kind) {
                continue;
            }
            let take = stack.amount.min(left);
            stack.amount -= take;
            left -= take;
            if take > 0 {
                taken.push((stack.vnum, take));
            }
        }
        self.stacks.retain(|stack| stack.amount > 0);
        Some(taken)
    }

    /// Pays a full cost list, or nothing at all.
    pub fn try_pay(
        &mut self,
        catalog: &Catalog,
        costs: &[Requirement],
    ) -> Option<Vec<(ResourceId, u32)>> {
        let mut scratch = self.clone();
        let mut paid = Vec::new();
        for cost in costs {
            match cost.kind {
                RequirementKind::Object(vnum) => {
                    if !scratch.has_at_least(vnum, cost.amount) {
                        return None;
                    }
                    scratch.take_up_to(vnum, cost.amount);
                    paid.push((vnum, cost.amount));
                }
                RequirementKind::Component(kind) => {
                    paid.extend(scratch.try_take_component(catalog, kind, cost.amount)?);
                }
                _ => return None,
            }
        }
        *self = scratch;
        Some(paid)
    }
}

/// An empire's storage across all of its islands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpireStorage {
    islands: BTreeMap<IslandId, IslandStorage>,
}

impl EmpireStorage {
    pub fn island(&self, island: IslandId) -> Option<&IslandStorage> {
        self.islands.get(&island)
    }

    pub fn island_mut(&mut self, island: IslandId) -> &mut IslandStorage {
        self.islands.entry(island).or_default()
    }

    pub fn islands(&self) -> impl Iterator<Item = (IslandId, &IslandStorage)> {
        self.islands.iter().map(|(id, storage)| (*id, storage))
    }

    pub fn find_stored_amount(&self, island: IslandId, vnum: ResourceId) -> u32 {
        self.island(island).map(|s| s.get(vnum)).unwrap_or(0)
    }

    /// Amount of `vnum` held on every island together
    #[cfg(test)]
    pub fn total_stored(&self, vnum: ResourceId) -> u32 {
        self.islands.values().map(|s| s.get(vnum)).sum()
    }

    pub fn add_to_storage(&mut self, island: IslandId, vnum: ResourceId, qty: u32) {
        self.island_mut(island).add(vnum, qty);
    }

    /// Removes exactly `qty` units. Callers must have verified availability.
    pub fn charge_stored_resource(&mut self, island: IslandId, vnum: ResourceId, qty: u32) {
        let have = self.find_stored_amount(island, vnum);
        assert!(
            have >= qty,
            "charged {qty}x {vnum} on island {} with only {have} stored",
            island.0
        );
        self.island_mut(island).take_up_to(vnum, qty);
    }

    pub fn can_afford_component(
        &self,
        catalog: &Catalog,
        island: IslandId,
        kind: ComponentKind,
        qty: u32,
    ) -> bool {
        self.island(island)
            .is_some_and(|s| s.component_amount(catalog, kind) >= qty)
    }

    /// Removes `qty` units of a component class, largest stacks first once
    /// storage has been sorted. Callers must have verified affordability.
    pub fn charge_component(
        &mut self,
        catalog: &Catalog,
        island: IslandId,
        kind: ComponentKind,
        qty: u32,
    ) -> Vec<(ResourceId, u32)> {
        let taken = self.island_mut(island).try_take_component(catalog, kind, qty);
        assert!(
            taken.is_some(),
            "charged {qty}x {kind} on island {} without enough stored",
            island.0
        );
        taken.unwrap_or_default()
    }

    pub fn can_pay(&self, catalog: &Catalog, island: IslandId, costs: &[Requirement]) -> bool {
        match self.island(island) {
            Some(storage) => storage.clone().try_pay(catalog, costs).is_some(),
            None => costs.iter().all(|cost| cost.amount == 0 && cost.is_storable()),
        }
    }

    pub fn sort_largest_first(&mut self) {
        for storage in self.islands.values_mut() {
            storage.sort_largest_first();
        }
    }
}
