#![allow(dead_code)]

use empire_workforce::ChoreWorld;
use empire_workforce::economy::{
    ComponentKind, CraftKind, Empire, EmpireId, ObjectProto, Recipe, ResourceId, Technology,
};
use empire_workforce::workforce::chore::ChoreSetting;
use empire_workforce::workforce::{Chore, WorkforceConfig};
use empire_workforce::world::catalog::Catalog;
use empire_workforce::world::{
    IslandId, MineDeposit, Mob, MobId, Requirement, SectorId, SectorProto, Site, SiteFunction,
    SiteId, WorkerRole, Workplace,
};
use hexx::Hex;

pub const PLANK: ResourceId = ResourceId(10);
pub const STONE: ResourceId = ResourceId(11);
pub const WHEAT: ResourceId = ResourceId(13);
pub const IRON_ORE: ResourceId = ResourceId(15);
pub const FLOUR: ResourceId = ResourceId(18);
pub const BREAD: ResourceId = ResourceId(25);
pub const GROUND_WHEAT: ResourceId = ResourceId(30);

pub const PLAINS: SectorId = SectorId(1);

pub const HOME: IslandId = IslandId(1);

/// Catalog with building materials, ore, bread and two milling recipes
pub fn catalog() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.add_object(ObjectProto::new(PLANK, "plank").with_component(ComponentKind::Lumber));
    catalog.add_object(ObjectProto::new(STONE, "stone block").with_component(ComponentKind::Block));
    catalog.add_object(ObjectProto::new(WHEAT, "wheat"));
    catalog.add_object(ObjectProto::new(IRON_ORE, "iron ore"));
    catalog.add_object(ObjectProto::new(FLOUR, "flour"));
    catalog.add_object(ObjectProto::new(GROUND_WHEAT, "ground wheat"));
    catalog.add_object(ObjectProto::new(BREAD, "bread").as_food());
    catalog.add_sector(SectorProto::new(PLAINS, "plains"));

    catalog.add_recipe(
        Recipe::new(1, "flour", CraftKind::Mill, FLOUR, 1).with_cost(Requirement::object(WHEAT, 1)),
    );
    catalog.add_recipe(
        Recipe::new(2, "ground wheat", CraftKind::Mill, GROUND_WHEAT, 1)
            .with_cost(Requirement::object(WHEAT, 1)),
    );
    catalog
}

pub fn world() -> ChoreWorld {
    ChoreWorld::new(WorkforceConfig::default(), catalog())
}

pub fn empire(world: &mut ChoreWorld) -> EmpireId {
    let mut empire = Empire::new("Aldmark").with_technology(Technology::Workforce);
    empire.last_activity = world.hour;
    world.add_empire(empire)
}

pub fn building(world: &mut ChoreWorld, owner: EmpireId, q: i32, workplace: Workplace) -> SiteId {
    world.add_site(
        Site::new("building", HOME, Hex::new(q, 0), PLAINS)
            .owned_by(owner)
            .with_building(workplace),
    )
}

pub fn mine(world: &mut ChoreWorld, owner: EmpireId, q: i32, remaining: u32, per_strike: u32) -> SiteId {
    let site = building(world, owner, q, Workplace::default().with_function(SiteFunction::Mine));
    if let Some(room) = world.site_mut(site) {
        room.mine = Some(MineDeposit {
            ore: IRON_ORE,
            remaining,
            per_strike,
        });
    }
    site
}

pub fn worker(world: &mut ChoreWorld, owner: EmpireId, site: SiteId, role: WorkerRole) -> MobId {
    world.spawn_mob(Mob::worker(owner, role, site))
}

pub fn set_chore(world: &mut ChoreWorld, owner: EmpireId, chore: Chore, setting: ChoreSetting) {
    world
        .set_chore_setting(owner, HOME, chore, setting)
        .expect("test island exists");
}

pub fn store(world: &mut ChoreWorld, owner: EmpireId, vnum: ResourceId, qty: u32) {
    if let Some(emp) = world.empire_mut(owner) {
        emp.storage.add_to_storage(HOME, vnum, qty);
    }
}

pub fn stored(world: &ChoreWorld, owner: EmpireId, vnum: ResourceId) -> u32 {
    world
        .empire(owner)
        .map(|emp| emp.storage.find_stored_amount(HOME, vnum))
        .unwrap_or(0)
}
