//! Building, maintenance, vehicle repair and dismantling.
//!
//! All of these work a workplace's requirement list one unit per cycle.

use crate::economy::goods::ResourceId;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{ChoreContext, ChoreTask, chore_enabled, log_consumed};
use crate::workforce::allocator::release_worker;
use crate::workforce::problems::WorkforceProblem;
use crate::world::construction::{finish_building, finish_dismantle, finish_maintenance, start_dismantle};
use crate::world::{ChoreLocation, ChoreWorld, MobId, Requirement, RequirementKind, SiteFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionMode {
    Build,
    Maintain,
    Dismantle,
}

/// Pays or refunds the front of a workplace's requirement list
#[derive(Debug, Clone, Copy)]
pub struct ConstructionTask {
    pub chore: Chore,
    pub mode: ConstructionMode,
}

impl ConstructionTask {
    pub fn build() -> Self {
        Self {
            chore: Chore::Building,
            mode: ConstructionMode::Build,
        }
    }

    pub fn dismantle() -> Self {
        Self {
            chore: Chore::Building,
            mode: ConstructionMode::Dismantle,
        }
    }

    /// Maintenance for rooms, repair for vehicles
    pub fn maintain(location: ChoreLocation) -> Self {
        let chore = match location {
            ChoreLocation::Room(_) => Chore::Maintenance,
            ChoreLocation::Vehicle(_) => Chore::RepairVehicles,
        };
        Self {
            chore,
            mode: ConstructionMode::Maintain,
        }
    }
}

fn front_requirement(world: &ChoreWorld, location: ChoreLocation) -> Option<Requirement> {
    world
        .workplace(location)?
        .requirements
        .iter()
        .find(|req| req.amount > 0)
        .copied()
}

/// Takes one unit off the first unpaid requirement, dropping spent entries.
fn advance_requirements(world: &mut ChoreWorld, location: ChoreLocation) -> bool {
    let Some(workplace) = world.workplace_mut(location) else {
        return true;
    };
    while workplace.requirements.front().is_some_and(|req| req.amount == 0) {
        workplace.requirements.pop_front();
    }
    if let Some(front) = workplace.requirements.front_mut() {
        front.amount -= 1;
        if front.amount == 0 {
            workplace.requirements.pop_front();
        }
    }
    workplace.requirements.is_empty()
}

impl ChoreTask for ConstructionTask {
    type Plan = Option<Requirement>;

    fn chore(&self) -> Chore {
        self.chore
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        let front = front_requirement(world, ctx.location);
        if self.mode == ConstructionMode::Dismantle {
            return Ok(front);
        }

        let Some(req) = front else {
            return Ok(None);
        };
        let storage = world.empire(ctx.empire).map(|emp| &emp.storage);
        let affordable = match req.kind {
            RequirementKind::Object(vnum) => {
                storage.is_some_and(|s| s.find_stored_amount(ctx.island, vnum) >= 1)
            }
            RequirementKind::Component(kind) => storage
                .is_some_and(|s| s.can_afford_component(&world.catalog, ctx.island, kind, 1)),
            _ => true,
        };
        if affordable {
            Ok(Some(req))
        } else {
            Err(WorkforceProblem::NoResources)
        }
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, plan: Self::Plan) {
        match self.mode {
            ConstructionMode::Build | ConstructionMode::Maintain => {
                if let Some(req) = plan {
                    let paid = pay_one(world, ctx, req);
                    log_consumed(world, ctx, &paid);
                    if self.mode == ConstructionMode::Build
                        && let Some(workplace) = world.workplace_mut(ctx.location)
                    {
                        workplace
                            .built_with
                            .extend(paid.iter().map(|&(vnum, qty)| Requirement::object(vnum, qty)));
                    }
                }
                if advance_requirements(world, ctx.location) {
                    match self.mode {
                        ConstructionMode::Build => finish_building(world, worker, ctx.location),
                        _ => finish_maintenance(world, worker, ctx.location),
                    }
                }
            }
            ConstructionMode::Dismantle => {
                if let Some(Requirement {
                    kind: RequirementKind::Object(vnum),
                    ..
                }) = plan
                    && let Some(emp) = world.empire_mut(ctx.empire)
                {
                    emp.storage.add_to_storage(ctx.island, vnum, 1);
                }
                if advance_requirements(world, ctx.location) {
                    finish_dismantle(world, worker, ctx.location);
                    if let ChoreLocation::Room(site) = ctx.location
                        && chore_enabled(world, ctx, Chore::AbandonDismantled)
                    {
                        world.abandon_room(site);
                    }
                }
            }
        }
    }
}

fn pay_one(world: &mut ChoreWorld, ctx: &ChoreContext, req: Requirement) -> Vec<(ResourceId, u32)> {
    let catalog = &world.catalog;
    let Some(emp) = world.empires.get_mut(&ctx.empire) else {
        return Vec::new();
    };
    match req.kind {
        RequirementKind::Object(vnum) => {
            emp.storage.charge_stored_resource(ctx.island, vnum, 1);
            vec![(vnum, 1)]
        }
        RequirementKind::Component(kind) => emp.storage.charge_component(catalog, ctx.island, kind, 1),
        _ => Vec::new(),
    }
}

/// Starts taking apart a mine that has run dry
#[derive(Debug, Clone, Copy)]
pub struct DismantleMineTask;

impl ChoreTask for DismantleMineTask {
    type Plan = ();

    fn chore(&self) -> Chore {
        Chore::DismantleMines
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<(), WorkforceProblem> {
        let site = world.site(ctx.room).ok_or(WorkforceProblem::NoResources)?;
        let workplace = &site.workplace;
        if site.has_building
            && workplace.is_complete()
            && workplace.has_function(SiteFunction::Mine)
            && !workplace.no_dismantle
            && site.mine_remaining() == 0
        {
            Ok(())
        } else {
            Err(WorkforceProblem::NoResources)
        }
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, _plan: ()) {
        start_dismantle(world, ctx.location);
        release_worker(world, worker);
    }
}
