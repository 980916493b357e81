use std::collections::BTreeMap;

use crate::economy::goods::ResourceId;
use crate::economy::storage::EmpireStorage;
use crate::world::IslandId;
use crate::world::catalog::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IslandNeeds {
    /// Food owed by workers charged this cycle
    pub owed: u32,
    pub starving: bool,
}

/// Food the workforce eats, per island
#[derive(Debug, Clone, Default)]
pub struct WorkforceNeeds {
    islands: BTreeMap<IslandId, IslandNeeds>,
}

impl WorkforceNeeds {
    pub fn add_demand(&mut self, island: IslandId, amount: u32) {
        self.islands.entry(island).or_default().owed += amount;
    }

    pub fn owed(&self, island: IslandId) -> u32 {
        self.islands.get(&island).map(|n| n.owed).unwrap_or(0)
    }

    pub fn is_starving(&self, island: IslandId) -> bool {
        self.islands.get(&island).is_some_and(|n| n.starving)
    }

    pub fn set_starving(&mut self, island: IslandId, starving: bool) {
        self.islands.entry(island).or_default().starving = starving;
    }

    /// Feeds every island from its stored food, largest stacks first. An island
    /// that can't pay in full starves; a starving island recovers once it has
    /// food again. Returns what was eaten.
    pub fn flush(&mut self, storage: &mut EmpireStorage, catalog: &Catalog) -> Vec<(ResourceId, u32)> {
        let mut eaten = Vec::new();

        for (&island, needs) in self.islands.iter_mut() {
            let stock = storage.island_mut(island);
            stock.sort_largest_first();

            let food: Vec<(ResourceId, u32)> = stock
                .stacks()
                .iter()
                .filter(|stack| catalog.is_food(stack.vnum))
                .map(|stack| (stack.vnum, stack.amount))
                .collect();

            let mut left = needs.owed;
            for (vnum, amount) in &food {
                if left == 0 {
                    break;
                }
                let take = stock.take_up_to(*vnum, left.min(*amount));
                left -= take;
                if take > 0 {
                    eaten.push((*vnum, take));
                }
            }

            let has_food = stock
                .stacks()
                .iter()
                .any(|stack| catalog.is_food(stack.vnum));
            needs.starving = left > 0 || (needs.starving && !has_food);
            needs.owed = 0;
        }

        eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::goods::ObjectProto;

    fn food_catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.add_object(ObjectProto::new(ResourceId(1), "bread").as_food());
        catalog.add_object(ObjectProto::new(ResourceId(2), "apple").as_food());
        catalog.add_object(ObjectProto::new(ResourceId(3), "rock"));
        catalog
    }

    #[test]
    fn flush_eats_largest_food_stack_first() {
        let catalog = food_catalog();
        let island = IslandId(1);
        let mut storage = EmpireStorage::default();
        storage.add_to_storage(island, ResourceId(1), 2);
        storage.add_to_storage(island, ResourceId(2), 5);
        storage.add_to_storage(island, ResourceId(3), 50);

        let mut needs = WorkforceNeeds::default();
        needs.add_demand(island, 3);
        let eaten = needs.flush(&mut storage, &catalog);

        assert_eq!(eaten, vec![(ResourceId(2), 3)]);
        assert!(!needs.is_starving(island));
        assert_eq!(needs.owed(island), 0);
        assert_eq!(storage.find_stored_amount(island, ResourceId(3)), 50);
    }

    #[test]
    fn shortfall_starves_until_food_returns() {
        let catalog = food_catalog();
        let island = IslandId(1);
        let mut storage = EmpireStorage::default();
        storage.add_to_storage(island, ResourceId(1), 1);

        let mut needs = WorkforceNeeds::default();
        needs.add_demand(island, 4);
        needs.flush(&mut storage, &catalog);
        assert!(needs.is_starving(island));
        assert_eq!(storage.find_stored_amount(island, ResourceId(1)), 0);

        // nothing owed and still nothing to eat
        needs.flush(&mut storage, &catalog);
        assert!(needs.is_starving(island));

        storage.add_to_storage(island, ResourceId(1), 3);
        needs.flush(&mut storage, &catalog);
        assert!(!needs.is_starving(island));
    }
}
