//! Per-location chore selection.
//!
//! Each room or vehicle is walked through a fixed priority list. Fire and the
//! building lifecycle are exclusive: when they apply nothing else runs there
//! this cycle. Below the lifecycle steps every eligible chore gets one try.

use crate::economy::empire::EmpireId;
use crate::economy::technology::Technology;
use crate::workforce::chore::Chore;
use crate::workforce::chores::construction::{ConstructionTask, DismantleMineTask};
use crate::workforce::chores::craft::CraftTask;
use crate::workforce::chores::extraction::{MiningTask, MintingTask, ShearingTask};
use crate::workforce::chores::fire::FireBrigadeTask;
use crate::workforce::chores::interaction::InteractionTask;
use crate::workforce::chores::inventory::InventoryTask;
use crate::workforce::chores::land::{BurnStumpsTask, ChoppingTask, FarmingTask, ProspectingTask};
use crate::workforce::chores::{
    ChoreContext, ChoreOutcome, ChoreTask, chore_enabled, log_problem, perform,
};
use crate::workforce::problems::WorkforceProblem;
use crate::world::{ChoreLocation, ChoreWorld, SiteFunction, SiteId, VehicleId};

const CRAFT_CHORES: [Chore; 5] = [
    Chore::General,
    Chore::Milling,
    Chore::Pressing,
    Chore::Smelting,
    Chore::Weaving,
];

/// The empire still controls the location. Chores can abandon a room or
/// remove a vehicle partway through the list.
fn still_owned(world: &ChoreWorld, ctx: &ChoreContext) -> bool {
    match ctx.location {
        ChoreLocation::Room(site) => world.site(site).is_some_and(|s| s.owner == Some(ctx.empire)),
        ChoreLocation::Vehicle(vehicle) => world
            .vehicle(vehicle)
            .is_some_and(|v| v.owner == Some(ctx.empire) && !v.extracted),
    }
}

/// Performs `task` if the location is still ours and the chore is switched on.
fn attempt<T: ChoreTask>(world: &mut ChoreWorld, ctx: &ChoreContext, task: &T) -> Option<ChoreOutcome> {
    if !still_owned(world, ctx) || !chore_enabled(world, ctx, task.chore()) {
        return None;
    }
    Some(perform(world, ctx, task))
}

fn is_starving(world: &ChoreWorld, ctx: &ChoreContext) -> bool {
    world
        .empire(ctx.empire)
        .is_some_and(|emp| emp.workforce.needs.is_starving(ctx.island))
}

fn has_tech(world: &ChoreWorld, ctx: &ChoreContext, tech: Technology) -> bool {
    world.empire(ctx.empire).is_some_and(|emp| emp.has_tech(tech))
}

fn has_function(world: &ChoreWorld, ctx: &ChoreContext, function: SiteFunction) -> bool {
    world
        .workplace(ctx.location)
        .is_some_and(|w| w.has_function(function))
}

/// Steps shared by rooms and vehicles: fire, the no-work flag and nothing else.
/// Returns false when the location is done for this cycle.
fn fire_and_no_work(world: &mut ChoreWorld, ctx: &ChoreContext) -> bool {
    let Some(workplace) = world.workplace(ctx.location) else {
        return false;
    };
    if workplace.is_burning() {
        // putting out fires doesn't wait for food
        attempt(world, ctx, &FireBrigadeTask);
        return false;
    }
    !workplace.no_work
}

/// Building, dismantling and maintenance. Returns false if one of them
/// applied, which ends the location's turn whatever the outcome.
fn lifecycle(world: &mut ChoreWorld, ctx: &ChoreContext, built: bool) -> bool {
    let Some(workplace) = world.workplace(ctx.location) else {
        return false;
    };
    if !built {
        return true;
    }
    if workplace.is_dismantling() {
        attempt(world, ctx, &ConstructionTask::dismantle());
        return false;
    }
    if !workplace.is_complete() {
        attempt(world, ctx, &ConstructionTask::build());
        return false;
    }
    if workplace.needs_maintenance() {
        attempt(world, ctx, &ConstructionTask::maintain(ctx.location));
        return false;
    }
    true
}

fn fishing(world: &mut ChoreWorld, ctx: &ChoreContext) {
    let fish = InteractionTask::fishing();
    if !fish.sources(world, ctx.location).is_empty() {
        attempt(world, ctx, &fish);
    }
}

/// Function, craft, interaction and item chores: everything that needs a
/// finished workplace and can run side by side.
fn production_chores(world: &mut ChoreWorld, ctx: &ChoreContext) {
    if has_function(world, ctx, SiteFunction::Stable) {
        attempt(world, ctx, &ShearingTask);
    }
    if let ChoreLocation::Room(site) = ctx.location
        && has_function(world, ctx, SiteFunction::Mine)
    {
        if world.site(site).is_some_and(|s| s.mine_remaining() > 0) {
            attempt(world, ctx, &MiningTask);
        } else {
            attempt(world, ctx, &DismantleMineTask);
        }
    }
    if has_function(world, ctx, SiteFunction::Mint)
        && has_tech(world, ctx, Technology::SkilledLabor)
    {
        attempt(world, ctx, &MintingTask);
    }

    let has_workplace = match ctx.location {
        ChoreLocation::Room(site) => world.site(site).is_some_and(|s| s.has_building),
        ChoreLocation::Vehicle(_) => true,
    };
    if has_workplace {
        for chore in CRAFT_CHORES {
            let station = match chore {
                Chore::Milling => Some(SiteFunction::Mill),
                Chore::Pressing => Some(SiteFunction::Press),
                Chore::Smelting => Some(SiteFunction::Smelter),
                Chore::Weaving => Some(SiteFunction::Tailor),
                _ => None,
            };
            if station.is_none_or(|f| has_function(world, ctx, f)) {
                attempt(world, ctx, &CraftTask::new(chore));
            }
        }
    }

    let skilled = has_tech(world, ctx, Technology::SkilledLabor);
    let mut interactions = Vec::new();
    if skilled {
        interactions.push(InteractionTask::skilled_production());
    }
    interactions.push(InteractionTask::production());
    interactions.push(InteractionTask::digging());
    if skilled {
        interactions.push(InteractionTask::herb_gardening());
        interactions.push(InteractionTask::trapping());
    }
    for task in interactions {
        if !task.sources(world, ctx.location).is_empty() {
            attempt(world, ctx, &task);
        }
    }

    if has_function(world, ctx, SiteFunction::LumberYard) {
        attempt(world, ctx, &InventoryTask::scraping());
    }
    if has_function(world, ctx, SiteFunction::Tannery) {
        attempt(world, ctx, &InventoryTask::tanning());
    }
    if has_function(world, ctx, SiteFunction::LumberYard) {
        attempt(world, ctx, &InventoryTask::sawing());
    }
}

/// Runs this cycle's chores for one territory room.
pub fn process_room_chores(world: &mut ChoreWorld, empire: EmpireId, site: SiteId) {
    let Some(ctx) = ChoreContext::resolve(world, empire, ChoreLocation::Room(site)) else {
        return;
    };
    if !still_owned(world, &ctx) || !fire_and_no_work(world, &ctx) {
        return;
    }

    let Some(room) = world.site(site) else {
        return;
    };
    let built = room.has_building;
    let instance = room.instance_present;
    let crop = world
        .catalog
        .sector(room.sector)
        .is_some_and(|sector| sector.is_crop());
    if crop && (!instance || chore_enabled(world, &ctx, Chore::Replanting)) {
        attempt(world, &ctx, &FarmingTask);
    }
    fishing(world, &ctx);

    if is_starving(world, &ctx) || !still_owned(world, &ctx) || !lifecycle(world, &ctx, built) {
        return;
    }

    let Some(room) = world.site(site) else {
        return;
    };
    if room.requires_city && !room.in_city {
        log_problem(world, &ctx, Chore::General, WorkforceProblem::OutOfCity);
        return;
    }
    if room.instance_present {
        log_problem(world, &ctx, Chore::General, WorkforceProblem::AdventureInstance);
        return;
    }

    if !room.has_building
        && let Some(sector) = world.catalog.sector(room.sector)
    {
        let fresh_ground = room.mine.is_none() && room.prospected_by != Some(empire);
        let terrain = if sector.has_stumps() {
            attempt(world, &ctx, &BurnStumpsTask)
        } else if sector.is_choppable() {
            attempt(world, &ctx, &ChoppingTask)
        } else if sector.mineable && fresh_ground {
            attempt(world, &ctx, &ProspectingTask)
        } else {
            None
        };
        if terrain.is_some() {
            return;
        }
    }

    if !still_owned(world, &ctx) || !world.workplace(ctx.location).is_some_and(|w| w.is_complete()) {
        return;
    }
    production_chores(world, &ctx);
}

/// Runs this cycle's chores for one owned vehicle.
pub fn process_vehicle_chores(world: &mut ChoreWorld, empire: EmpireId, vehicle: VehicleId) {
    let Some(ctx) = ChoreContext::resolve(world, empire, ChoreLocation::Vehicle(vehicle)) else {
        return;
    };
    let Some(found) = world.vehicle(vehicle) else {
        return;
    };
    if !still_owned(world, &ctx) || found.player_disabled {
        return;
    }

    let Some(room) = world.site(ctx.room) else {
        return;
    };
    let welcome = match room.owner {
        None => true,
        Some(owner) if owner == empire => true,
        Some(owner) => world.empire(empire).is_some_and(|emp| emp.is_allied_with(owner)),
    };
    let climate = world
        .catalog
        .sector(room.sector)
        .map(|sector| sector.climate)
        .unwrap_or_default();
    if !welcome || !found.works_in(climate) {
        return;
    }

    if !fire_and_no_work(world, &ctx) {
        return;
    }
    fishing(world, &ctx);

    if is_starving(world, &ctx) || !still_owned(world, &ctx) || !lifecycle(world, &ctx, true) {
        return;
    }
    if !still_owned(world, &ctx) || !world.workplace(ctx.location).is_some_and(|w| w.is_complete()) {
        return;
    }
    production_chores(world, &ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::world::{Climate, IslandId, Requirement, Vehicle, WorkerRole, Workplace};

    fn burning_site(world: &mut ChoreWorld) -> (EmpireId, SiteId) {
        let empire = spawn_test_empire(world, "Aldmark");
        let mut workplace = Workplace::default()
            .with_function(SiteFunction::Mill)
            .under_construction(vec![Requirement::object(PLANK, 1)]);
        workplace.set_on_fire();
        let site = spawn_test_building(world, empire, IslandId(1), (0, 0), workplace);
        spawn_test_worker(world, empire, site, WorkerRole::FireBrigade);
        spawn_test_worker(world, empire, site, WorkerRole::Builder);
        for chore in [Chore::FireBrigade, Chore::Building, Chore::Milling] {
            enable_chore(world, empire, IslandId(1), chore);
        }
        store(world, empire, IslandId(1), PLANK, 5);
        (empire, site)
    }

    #[test]
    fn burning_site_only_fights_the_fire_even_when_starving() {
        let mut world = create_test_world();
        let (empire, site) = burning_site(&mut world);
        world
            .empire_mut(empire)
            .unwrap()
            .workforce
            .needs
            .set_starving(IslandId(1), true);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);

        let workplace = &world.site(site).unwrap().workplace;
        assert!(workplace.fire.unwrap_or(0) > 0 || !workplace.is_burning());
        assert_eq!(workplace.requirements.len(), 1);
        assert_eq!(stored(&world, empire, IslandId(1), PLANK), 5);
        let worked: Vec<Chore> = world
            .empire(empire)
            .unwrap()
            .workforce
            .where_log
            .entries()
            .iter()
            .map(|entry| entry.chore)
            .collect();
        assert_eq!(worked, vec![Chore::FireBrigade]);
    }

    #[test]
    fn starving_empire_still_farms_but_does_not_build() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_site(&mut world, empire, IslandId(1), (0, 0));
        set_sector(&mut world, site, WHEAT_FIELD);
        spawn_test_worker(&mut world, empire, site, WorkerRole::Farmer);
        enable_chore(&mut world, empire, IslandId(1), Chore::Farming);
        world
            .empire_mut(empire)
            .unwrap()
            .workforce
            .needs
            .set_starving(IslandId(1), true);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);

        assert!(world.site(site).unwrap().harvest_progress > 0);
    }

    #[test]
    fn construction_stops_everything_else() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_building(
            &mut world,
            empire,
            IslandId(1),
            (0, 0),
            Workplace::default()
                .with_function(SiteFunction::Mill)
                .under_construction(vec![Requirement::object(PLANK, 2)]),
        );
        spawn_test_worker(&mut world, empire, site, WorkerRole::Builder);
        spawn_test_worker(&mut world, empire, site, WorkerRole::Miller);
        enable_chore(&mut world, empire, IslandId(1), Chore::Building);
        enable_chore(&mut world, empire, IslandId(1), Chore::Milling);
        store(&mut world, empire, IslandId(1), PLANK, 2);
        store(&mut world, empire, IslandId(1), WHEAT, 4);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);

        assert_eq!(stored(&world, empire, IslandId(1), PLANK), 1);
        assert_eq!(stored(&world, empire, IslandId(1), WHEAT), 4);
    }

    #[test]
    fn out_of_city_is_logged_and_stops() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_building(
            &mut world,
            empire,
            IslandId(1),
            (0, 0),
            Workplace::default().with_function(SiteFunction::Mill),
        );
        world.site_mut(site).unwrap().requires_city = true;
        spawn_test_worker(&mut world, empire, site, WorkerRole::Miller);
        enable_chore(&mut world, empire, IslandId(1), Chore::Milling);
        store(&mut world, empire, IslandId(1), WHEAT, 4);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);

        let logged = problems(&world, empire);
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].problem, WorkforceProblem::OutOfCity);
        assert_eq!(logged[0].chore, Chore::General);
        assert_eq!(stored(&world, empire, IslandId(1), WHEAT), 4);
    }

    #[test]
    fn only_one_terrain_chore_per_cycle() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_site(&mut world, empire, IslandId(1), (0, 0));
        set_sector(&mut world, site, STUMPS);
        spawn_test_worker(&mut world, empire, site, WorkerRole::StumpBurner);
        spawn_test_worker(&mut world, empire, site, WorkerRole::Feller);
        enable_chore(&mut world, empire, IslandId(1), Chore::BurnStumps);
        enable_chore(&mut world, empire, IslandId(1), Chore::Chopping);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);

        assert_eq!(world.site(site).unwrap().sector, PLAINS);
        assert_eq!(world.site(site).unwrap().chop_progress, 0);
    }

    #[test]
    fn vehicle_skips_hostile_rooms_and_wrong_climates() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let rival = spawn_test_empire(&mut world, "Vessia");
        let dock = spawn_test_site(&mut world, rival, IslandId(1), (0, 0));
        let mut workplace = Workplace::default();
        workplace.set_on_fire();
        let boat = world.add_vehicle(
            Vehicle::new("barge", dock)
                .owned_by(empire)
                .with_workplace(workplace)
                .allowed_in(Climate::Temperate),
        );
        spawn_test_worker(&mut world, empire, dock, WorkerRole::FireBrigade);
        enable_chore(&mut world, empire, IslandId(1), Chore::FireBrigade);

        world.hour += 1;
        process_vehicle_chores(&mut world, empire, boat);
        assert_eq!(world.vehicle(boat).unwrap().workplace.fire, Some(0));

        world.empire_mut(empire).unwrap().allies.insert(rival);
        world.hour += 1;
        process_vehicle_chores(&mut world, empire, boat);
        assert!(world.vehicle(boat).unwrap().workplace.fire != Some(0));

        set_sector(&mut world, dock, HILLS);
        world.vehicle_mut(boat).unwrap().workplace.set_on_fire();
        let before = world.vehicle(boat).unwrap().workplace.fire;
        world.hour += 1;
        process_vehicle_chores(&mut world, empire, boat);
        assert_eq!(world.vehicle(boat).unwrap().workplace.fire, before);
    }

    #[test]
    fn vehicle_repairs_use_their_own_chore() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let dock = spawn_test_site(&mut world, empire, IslandId(1), (0, 0));
        let mut workplace = Workplace::default();
        workplace.damage = 2;
        let cart = world.add_vehicle(Vehicle::new("cart", dock).owned_by(empire).with_workplace(workplace));
        spawn_test_worker(&mut world, empire, dock, WorkerRole::Repairman);
        enable_chore(&mut world, empire, IslandId(1), Chore::Maintenance);

        world.hour += 1;
        process_vehicle_chores(&mut world, empire, cart);
        assert_eq!(world.vehicle(cart).unwrap().workplace.damage, 2);

        enable_chore(&mut world, empire, IslandId(1), Chore::RepairVehicles);
        world.hour += 1;
        process_vehicle_chores(&mut world, empire, cart);
        assert_eq!(world.vehicle(cart).unwrap().workplace.damage, 0);
    }

    #[test]
    fn minting_needs_skilled_labor() {
        let mut world = create_test_world();
        world.config.mint_skip_chance = 0;
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_building(
            &mut world,
            empire,
            IslandId(1),
            (0, 0),
            Workplace::default().with_function(SiteFunction::Mint),
        );
        spawn_test_worker(&mut world, empire, site, WorkerRole::CoinMaker);
        enable_chore(&mut world, empire, IslandId(1), Chore::Minting);
        store(&mut world, empire, IslandId(1), GOLD_BAR, 3);

        world.hour += 1;
        process_room_chores(&mut world, empire, site);
        assert_eq!(stored(&world, empire, IslandId(1), GOLD_BAR), 3);
        assert_eq!(world.empire(empire).unwrap().treasury.total(), 0);

        world
            .empire_mut(empire)
            .unwrap()
            .technologies
            .unlock(Technology::SkilledLabor);
        world.hour += 1;
        process_room_chores(&mut world, empire, site);
        assert_eq!(stored(&world, empire, IslandId(1), GOLD_BAR), 2);
        assert_eq!(world.empire(empire).unwrap().treasury.total(), 10);
    }
}
