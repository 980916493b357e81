//! Chore implementations.
//!
//! Every chore is a [`ChoreTask`]: a feasibility check that either names the
//! problem blocking it or returns a plan, and a `run` step that advances the
//! plan with a worker already on site. [`perform`] wraps both with the shared
//! backoff, claim, worker lookup and placement logic.

use bevy::prelude::*;

use crate::economy::empire::EmpireId;
use crate::economy::goods::ResourceId;
use crate::workforce::allocator::{
    charge_workforce, find_worker_in_site, place_worker, release_worker,
};
use crate::workforce::chore::Chore;
use crate::workforce::problems::WorkforceProblem;
use crate::workforce::production_log::ProductionKind;
use crate::workforce::tracker::{can_gain_resource, mark_resource_worker};
use crate::world::interaction::Interaction;
use crate::world::{ChoreLocation, ChoreWorld, IslandId, MobId, SiteId};

pub mod construction;
pub mod craft;
pub mod extraction;
pub mod fire;
pub mod interaction;
pub mod inventory;
pub mod land;

/// Where a chore runs and on whose behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoreContext {
    pub empire: EmpireId,
    pub location: ChoreLocation,
    pub island: IslandId,
    /// Room the workers stand in
    pub room: SiteId,
}

impl ChoreContext {
    pub fn resolve(world: &ChoreWorld, empire: EmpireId, location: ChoreLocation) -> Option<Self> {
        let room = world.room_of(location)?;
        let island = world.site(room)?.island;
        Some(Self {
            empire,
            location,
            island,
            room,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreOutcome {
    /// An on-site worker advanced the chore
    Worked(MobId),
    /// A worker was brought in; it starts next cycle
    Placed(MobId),
    Blocked(WorkforceProblem),
    Delayed,
}

pub trait ChoreTask {
    type Plan;

    fn chore(&self) -> Chore;

    /// Checks whether the chore can make progress right now.
    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem>;

    /// Output the plan may deliver, claimed against the caps up front
    fn claims(&self, _plan: &Self::Plan) -> Vec<(ResourceId, u32)> {
        Vec::new()
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, plan: Self::Plan);
}

pub fn log_problem(world: &mut ChoreWorld, ctx: &ChoreContext, chore: Chore, problem: WorkforceProblem) {
    if let Some(emp) = world.empire_mut(ctx.empire) {
        emp.workforce.problems.log(ctx.location, chore, problem);
    }
}

fn mark_delay(world: &mut ChoreWorld, ctx: &ChoreContext, chore: Chore, problem: WorkforceProblem) {
    let (min, max) = (world.config.delay_min, world.config.delay_max.max(world.config.delay_min));
    let cycles = world.roll(min..=max);
    if let Some(emp) = world.empire_mut(ctx.empire) {
        emp.workforce.delays.mark(ctx.location, chore, problem, cycles);
    }
}

fn clear_delay(world: &mut ChoreWorld, ctx: &ChoreContext, chore: Chore) {
    if let Some(emp) = world.empire_mut(ctx.empire) {
        emp.workforce.delays.clear(ctx.location, chore);
    }
}

/// Runs one chore at one location for one cycle.
pub fn perform<T: ChoreTask>(world: &mut ChoreWorld, ctx: &ChoreContext, task: &T) -> ChoreOutcome {
    let chore = task.chore();

    let delayed = world
        .empire_mut(ctx.empire)
        .and_then(|emp| emp.workforce.delays.consult(ctx.location, chore));
    if delayed.is_some() {
        log_problem(world, ctx, chore, WorkforceProblem::Delayed);
        return ChoreOutcome::Delayed;
    }

    let plan = match task.feasible(world, ctx) {
        Ok(plan) => plan,
        Err(problem) => {
            debug!("{} at {} blocked: {}", chore, ctx.location, problem.describe());
            log_problem(world, ctx, chore, problem);
            if problem.delays() {
                mark_delay(world, ctx, chore, problem);
            }
            if let Some(idle) = find_worker_in_site(world, ctx.empire, ctx.location, chore) {
                release_worker(world, idle);
            }
            return ChoreOutcome::Blocked(problem);
        }
    };

    for (vnum, qty) in task.claims(&plan) {
        mark_resource_worker(world, ctx.empire, ctx.location, vnum, qty);
    }

    if let Some(worker) = find_worker_in_site(world, ctx.empire, ctx.location, chore) {
        charge_workforce(world, ctx.empire, worker, chore, ctx.location);
        clear_delay(world, ctx, chore);
        task.run(world, ctx, worker, plan);
        return ChoreOutcome::Worked(worker);
    }

    if let Some(worker) = place_worker(world, ctx.empire, chore, ctx.location) {
        charge_workforce(world, ctx.empire, worker, chore, ctx.location);
        clear_delay(world, ctx, chore);
        return ChoreOutcome::Placed(worker);
    }

    log_problem(world, ctx, chore, WorkforceProblem::NoWorkers);
    mark_delay(world, ctx, chore, WorkforceProblem::NoWorkers);
    ChoreOutcome::Blocked(WorkforceProblem::NoWorkers)
}

/// Credits `qty` of `vnum` to the island's storage and the production log.
pub fn deliver(world: &mut ChoreWorld, ctx: &ChoreContext, vnum: ResourceId, qty: u32) {
    if let Some(emp) = world.empire_mut(ctx.empire) {
        emp.storage.add_to_storage(ctx.island, vnum, qty);
        emp.workforce.production.add(ProductionKind::Produced, vnum, qty);
    }
}

/// Logs storage spent by a chore.
pub fn log_consumed(world: &mut ChoreWorld, ctx: &ChoreContext, spent: &[(ResourceId, u32)]) {
    if let Some(emp) = world.empire_mut(ctx.empire) {
        for &(vnum, qty) in spent {
            emp.workforce.production.add(ProductionKind::Consumed, vnum, qty);
        }
    }
}

pub fn chore_enabled(world: &ChoreWorld, ctx: &ChoreContext, chore: Chore) -> bool {
    world
        .empire(ctx.empire)
        .is_some_and(|emp| emp.chore_settings.is_enabled(ctx.island, chore))
}

/// Interactions whose output (at `multiplier` times quantity) still fits the caps
pub fn gainable(
    world: &mut ChoreWorld,
    ctx: &ChoreContext,
    chore: Chore,
    interactions: &[Interaction],
    multiplier: u32,
) -> Vec<Interaction> {
    interactions
        .iter()
        .filter(|interaction| {
            can_gain_resource(
                world,
                ctx.empire,
                ctx.location,
                chore,
                interaction.vnum,
                interaction.quantity.saturating_mul(multiplier),
            )
        })
        .cloned()
        .collect()
}

pub fn interaction_claims(interactions: &[Interaction], multiplier: u32) -> Vec<(ResourceId, u32)> {
    interactions
        .iter()
        .map(|i| (i.vnum, i.quantity.saturating_mul(multiplier)))
        .collect()
}

#[cfg(test)]
mod tests;
