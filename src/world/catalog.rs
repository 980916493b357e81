use std::collections::BTreeMap;

use crate::economy::goods::{ComponentKind, ObjectProto, ResourceId};
use crate::economy::recipe::Recipe;
use crate::world::sector::{SectorId, SectorProto};

/// Ore a prospector may find, weighted against the other mine types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineType {
    pub name: String,
    pub ore: ResourceId,
    pub weight: u32,
    pub min_amount: u32,
    pub max_amount: u32,
    pub per_strike: u32,
}

/// Static prototype data the scheduler looks things up in
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub objects: BTreeMap<ResourceId, ObjectProto>,
    pub sectors: BTreeMap<SectorId, SectorProto>,
    pub recipes: Vec<Recipe>,
    pub mine_types: Vec<MineType>,
}

impl Catalog {
    pub fn add_object(&mut self, proto: ObjectProto) -> ResourceId {
        let id = proto.id;
        self.objects.insert(id, proto);
        id
    }

    pub fn add_sector(&mut self, proto: SectorProto) -> SectorId {
        let id = proto.id;
        self.sectors.insert(id, proto);
        id
    }

    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn add_mine_type(&mut self, mine: MineType) {
        self.mine_types.push(mine);
    }

    pub fn object(&self, id: ResourceId) -> Option<&ObjectProto> {
        self.objects.get(&id)
    }

    pub fn sector(&self, id: SectorId) -> Option<&SectorProto> {
        self.sectors.get(&id)
    }

    pub fn is_component(&self, id: ResourceId, kind: ComponentKind) -> bool {
        self.object(id).and_then(|proto| proto.component) == Some(kind)
    }

    pub fn is_food(&self, id: ResourceId) -> bool {
        self.object(id).is_some_and(|proto| proto.food)
    }

    pub fn object_name(&self, id: ResourceId) -> String {
        self.object(id)
            .map(|proto| proto.name.clone())
            .unwrap_or_else(|| format!("object {id}"))
    }

    /// Total weight of all mine types, used by prospecting rolls
    pub fn mine_weight(&self) -> u32 {
        self.mine_types.iter().map(|mine| mine.weight).sum()
    }

    /// Picks the mine type a roll in `0..mine_weight()` lands on.
    pub fn mine_for_roll(&self, mut roll: u32) -> Option<&MineType> {
        for mine in &self.mine_types {
            if roll < mine.weight {
                return Some(mine);
            }
            roll -= mine.weight;
        }
        None
    }
}
