//! Testing utilities for the workforce scheduler
//!
//! Helpers that build a small catalog and populate a `ChoreWorld` so chore
//! and dispatcher tests can set up a scene in a few lines.

use bevy::ecs::message::{Message, MessageReader};
use bevy::ecs::system::SystemState;
use bevy::prelude::World;
use hexx::Hex;

use crate::economy::empire::{Empire, EmpireId};
use crate::economy::goods::{ComponentKind, ObjectProto, ResourceId};
use crate::economy::recipe::{CraftKind, Recipe};
use crate::economy::technology::Technology;
use crate::workforce::chore::{Chore, ChoreSetting};
use crate::workforce::config::WorkforceConfig;
use crate::workforce::problems::ProblemEntry;
use crate::world::catalog::{Catalog, MineType};
use crate::world::interaction::{Interaction, InteractionKind};
use crate::world::{
    ChoreWorld, Climate, CropInfo, IslandId, Mob, MobId, Requirement, SectorId, SectorProto, Site,
    SiteId, WorkerRole, Workplace,
};

pub const PLANK: ResourceId = ResourceId(10);
pub const STONE: ResourceId = ResourceId(11);
pub const LOG: ResourceId = ResourceId(12);
pub const WHEAT: ResourceId = ResourceId(13);
pub const APPLE: ResourceId = ResourceId(14);
pub const IRON_ORE: ResourceId = ResourceId(15);
pub const GOLD_BAR: ResourceId = ResourceId(16);
pub const FISH: ResourceId = ResourceId(17);
pub const FLOUR: ResourceId = ResourceId(18);
pub const WOOL: ResourceId = ResourceId(19);
pub const HIDE: ResourceId = ResourceId(20);
pub const LEATHER: ResourceId = ResourceId(21);
pub const HERB: ResourceId = ResourceId(22);
pub const PELT: ResourceId = ResourceId(23);
pub const CLAY: ResourceId = ResourceId(24);
pub const BREAD: ResourceId = ResourceId(25);
pub const CLOTH: ResourceId = ResourceId(26);
pub const IRON_BAR: ResourceId = ResourceId(27);

pub const PLAINS: SectorId = SectorId(1);
pub const DENSE_FOREST: SectorId = SectorId(2);
pub const FOREST: SectorId = SectorId(3);
pub const STUMPS: SectorId = SectorId(4);
pub const WHEAT_FIELD: SectorId = SectorId(5);
pub const SEEDED_FIELD: SectorId = SectorId(6);
pub const ORCHARD: SectorId = SectorId(7);
pub const HILLS: SectorId = SectorId(8);

/// Small catalog covering every chore's inputs and outputs
pub fn test_catalog() -> Catalog {
    let mut catalog = Catalog::default();

    catalog.add_object(ObjectProto::new(PLANK, "plank").with_component(ComponentKind::Lumber));
    catalog.add_object(ObjectProto::new(STONE, "stone block").with_component(ComponentKind::Block));
    catalog.add_object(
        ObjectProto::new(LOG, "log")
            .with_interaction(Interaction::new(InteractionKind::Saw, PLANK, 2)),
    );
    catalog.add_object(ObjectProto::new(WHEAT, "wheat").as_food());
    catalog.add_object(ObjectProto::new(APPLE, "apple").as_food());
    catalog.add_object(ObjectProto::new(IRON_ORE, "iron ore"));
    catalog.add_object(ObjectProto::new(GOLD_BAR, "gold bar").with_wealth(10, true));
    catalog.add_object(ObjectProto::new(FISH, "fish").as_food());
    catalog.add_object(ObjectProto::new(FLOUR, "flour"));
    catalog.add_object(ObjectProto::new(WOOL, "wool").with_component(ComponentKind::Fibers));
    catalog.add_object(
        ObjectProto::new(HIDE, "hide")
            .with_interaction(Interaction::new(InteractionKind::Scrape, PELT, 1))
            .with_interaction(Interaction::new(InteractionKind::Tan, LEATHER, 1)),
    );
    catalog.add_object(ObjectProto::new(LEATHER, "leather").with_component(ComponentKind::Skin));
    catalog.add_object(ObjectProto::new(HERB, "herb").with_component(ComponentKind::Herb));
    catalog.add_object(ObjectProto::new(PELT, "pelt"));
    catalog.add_object(ObjectProto::new(CLAY, "clay").with_component(ComponentKind::Clay));
    catalog.add_object(ObjectProto::new(BREAD, "bread").as_food());
    catalog.add_object(ObjectProto::new(CLOTH, "cloth"));
    catalog.add_object(ObjectProto::new(IRON_BAR, "iron bar").with_component(ComponentKind::Metal));

    catalog.add_sector(SectorProto::new(PLAINS, "plains").with_climate(Climate::Temperate));
    catalog.add_sector(
        SectorProto::new(DENSE_FOREST, "dense forest")
            .with_interaction(Interaction::new(InteractionKind::Chop, LOG, 2))
            .chops_into(FOREST),
    );
    catalog.add_sector(
        SectorProto::new(FOREST, "forest")
            .with_interaction(Interaction::new(InteractionKind::Chop, LOG, 1))
            .chops_into(STUMPS),
    );
    catalog.add_sector(SectorProto::new(STUMPS, "stumps").burns_into(PLAINS));
    catalog.add_sector(
        SectorProto::new(WHEAT_FIELD, "wheat field")
            .with_interaction(Interaction::new(InteractionKind::Harvest, WHEAT, 1))
            .with_crop(CropInfo {
                name: "wheat".to_string(),
                orchard: false,
                seeded: Some(SEEDED_FIELD),
                fallow: PLAINS,
            }),
    );
    catalog.add_sector(SectorProto::new(SEEDED_FIELD, "seeded field"));
    catalog.add_sector(
        SectorProto::new(ORCHARD, "apple orchard")
            .with_interaction(Interaction::new(InteractionKind::Harvest, APPLE, 1))
            .with_crop(CropInfo {
                name: "apples".to_string(),
                orchard: true,
                seeded: None,
                fallow: PLAINS,
            }),
    );
    catalog.add_sector(
        SectorProto::new(HILLS, "hills")
            .with_climate(Climate::Mountain)
            .with_interaction(Interaction::new(InteractionKind::Dig, CLAY, 1))
            .mineable(),
    );

    catalog.add_mine_type(MineType {
        name: "iron".to_string(),
        ore: IRON_ORE,
        weight: 1,
        min_amount: 10,
        max_amount: 20,
        per_strike: 1,
    });

    catalog.add_recipe(
        Recipe::new(1, "flour", CraftKind::Mill, FLOUR, 1).with_cost(Requirement::object(WHEAT, 2)),
    );
    catalog.add_recipe(
        Recipe::new(2, "cloth", CraftKind::Weave, CLOTH, 1)
            .with_cost(Requirement::component(ComponentKind::Fibers, 2)),
    );
    catalog.add_recipe(
        Recipe::new(3, "iron bar", CraftKind::Smelt, IRON_BAR, 1)
            .with_cost(Requirement::object(IRON_ORE, 2)),
    );

    catalog
}

/// Creates a world with the test catalog and default config
pub fn create_test_world() -> ChoreWorld {
    ChoreWorld::new(WorkforceConfig::default(), test_catalog())
}

/// Adds an empire that has the workforce technology
pub fn spawn_test_empire(world: &mut ChoreWorld, name: &str) -> EmpireId {
    let mut empire = Empire::new(name).with_technology(Technology::Workforce);
    empire.last_activity = world.hour;
    world.add_empire(empire)
}

/// Adds an owned plains room at axial `(q, r)`
pub fn spawn_test_site(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    (q, r): (i32, i32),
) -> SiteId {
    world.add_site(Site::new("plains", island, Hex::new(q, r), PLAINS).owned_by(empire))
}

/// Adds an owned room with a building
pub fn spawn_test_building(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    (q, r): (i32, i32),
    workplace: Workplace,
) -> SiteId {
    world.add_site(
        Site::new("building", island, Hex::new(q, r), PLAINS)
            .owned_by(empire)
            .with_building(workplace),
    )
}

/// Adds an owned room with `count` citizens who can be called up
pub fn spawn_test_home(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    (q, r): (i32, i32),
    count: usize,
) -> SiteId {
    world.add_site(
        Site::new("cottage", island, Hex::new(q, r), PLAINS)
            .owned_by(empire)
            .with_building(Workplace::default())
            .with_citizens(count),
    )
}

pub fn spawn_test_worker(
    world: &mut ChoreWorld,
    empire: EmpireId,
    site: SiteId,
    role: WorkerRole,
) -> MobId {
    world.spawn_mob(Mob::worker(empire, role, site))
}

pub fn set_sector(world: &mut ChoreWorld, site: SiteId, sector: SectorId) {
    if let Some(room) = world.site_mut(site) {
        room.sector = sector;
    }
}

pub fn set_chore(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    chore: Chore,
    setting: ChoreSetting,
) {
    if let Some(emp) = world.empire_mut(empire) {
        emp.chore_settings.set(island, chore, setting);
    }
}

pub fn enable_chore(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    chore: Chore,
) {
    set_chore(world, empire, island, chore, ChoreSetting::On);
}

pub fn store(
    world: &mut ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    vnum: ResourceId,
    qty: u32,
) {
    if let Some(emp) = world.empire_mut(empire) {
        emp.storage.add_to_storage(island, vnum, qty);
    }
}

pub fn stored(
    world: &ChoreWorld,
    empire: EmpireId,
    island: IslandId,
    vnum: ResourceId,
) -> u32 {
    world
        .empire(empire)
        .map(|emp| emp.storage.find_stored_amount(island, vnum))
        .unwrap_or(0)
}

/// Problems logged for the empire in the last cycle
pub fn problems(world: &ChoreWorld, empire: EmpireId) -> Vec<ProblemEntry> {
    world
        .empire(empire)
        .map(|emp| emp.workforce.problems.entries().to_vec())
        .unwrap_or_default()
}

/// Reads every message of type `M` still buffered in a Bevy world
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    let mut state: SystemState<MessageReader<M>> = SystemState::new(world);
    let mut reader = state.get_mut(world);
    let messages = reader.read().cloned().collect();
    state.apply(world);
    messages
}
