//! Chores that pull resources out of a building: mines, mints and stables.

use std::cmp::Reverse;

use bevy::prelude::*;

use crate::economy::goods::ResourceId;
use crate::workforce::allocator::release_worker;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{
    ChoreContext, ChoreTask, deliver, gainable, interaction_claims, log_consumed,
};
use crate::workforce::problems::WorkforceProblem;
use crate::workforce::production_log::ProductionKind;
use crate::workforce::tracker::can_gain_resource;
use crate::world::interaction::{Interaction, InteractionKind, run_interactions};
use crate::world::{ChoreWorld, MineDeposit, MobId, MobKind, SiteFunction};

fn has_function(world: &ChoreWorld, ctx: &ChoreContext, function: SiteFunction) -> bool {
    world
        .workplace(ctx.location)
        .is_some_and(|w| w.is_complete() && w.has_function(function))
}

#[derive(Debug, Clone, Copy)]
pub struct MiningTask;

impl ChoreTask for MiningTask {
    type Plan = MineDeposit;

    fn chore(&self) -> Chore {
        Chore::Mining
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<MineDeposit, WorkforceProblem> {
        if !has_function(world, ctx, SiteFunction::Mine) {
            return Err(WorkforceProblem::NoResources);
        }
        let deposit = world
            .site(ctx.room)
            .and_then(|room| room.mine)
            .filter(|mine| mine.remaining > 0)
            .ok_or(WorkforceProblem::Depleted)?;
        if !can_gain_resource(world, ctx.empire, ctx.location, Chore::Mining, deposit.ore, deposit.per_strike) {
            return Err(WorkforceProblem::OverLimit);
        }
        Ok(deposit)
    }

    fn claims(&self, deposit: &MineDeposit) -> Vec<(ResourceId, u32)> {
        vec![(deposit.ore, deposit.per_strike)]
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, deposit: MineDeposit) {
        let chance = world.config.mining_chance;
        if !world.one_in(chance) {
            return;
        }

        let Some(mine) = world.site_mut(ctx.room).and_then(|room| room.mine.as_mut()) else {
            return;
        };
        mine.remaining = mine.remaining.saturating_sub(1);
        let exhausted = mine.remaining == 0;

        deliver(world, ctx, deposit.ore, deposit.per_strike);
        if exhausted {
            debug!("Mine at {} is exhausted", ctx.location);
            release_worker(world, worker);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MintingTask;

impl ChoreTask for MintingTask {
    type Plan = (ResourceId, u32);

    fn chore(&self) -> Chore {
        Chore::Minting
    }

    /// Picks the biggest mintable stack on the island.
    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        if !has_function(world, ctx, SiteFunction::Mint) {
            return Err(WorkforceProblem::NoResources);
        }
        let emp = world.empire(ctx.empire).ok_or(WorkforceProblem::NoResources)?;
        if !emp.treasury.below(world.config.max_coins) {
            return Err(WorkforceProblem::OverLimit);
        }

        emp.storage
            .island(ctx.island)
            .into_iter()
            .flat_map(|storage| storage.stacks())
            .filter(|stack| stack.amount > 0)
            .filter_map(|stack| {
                let proto = world.catalog.object(stack.vnum).filter(|p| p.is_mintable())?;
                Some((stack.vnum, stack.amount, proto.wealth?.value))
            })
            .min_by_key(|&(_, amount, _)| Reverse(amount))
            .map(|(vnum, _, value)| (vnum, value))
            .ok_or(WorkforceProblem::NoResources)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, _worker: MobId, (vnum, value): Self::Plan) {
        let skip = world.config.mint_skip_chance;
        if skip > 0 && world.one_in(skip) {
            return;
        }
        let Some(emp) = world.empire_mut(ctx.empire) else {
            return;
        };
        emp.storage.charge_stored_resource(ctx.island, vnum, 1);
        emp.treasury.add(u64::from(value));
        emp.workforce.production.add(ProductionKind::Minted, vnum, 1);
        log_consumed(world, ctx, &[(vnum, 1)]);
    }
}

/// Shears the first animal in a stable whose coat has grown back
#[derive(Debug, Clone, Copy)]
pub struct ShearingTask;

impl ChoreTask for ShearingTask {
    type Plan = (MobId, Vec<Interaction>);

    fn chore(&self) -> Chore {
        Chore::Shearing
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        if !has_function(world, ctx, SiteFunction::Stable) {
            return Err(WorkforceProblem::NoResources);
        }
        let hour = world.hour;
        let animals: Vec<(MobId, Vec<Interaction>)> = world
            .mobs_in_room(ctx.room)
            .filter(|mob| mob.kind == MobKind::Animal && mob.shear_ready_at <= hour)
            .map(|mob| {
                let shear = mob
                    .interactions
                    .iter()
                    .filter(|i| i.kind == InteractionKind::Shear)
                    .cloned()
                    .collect();
                (mob.id, shear)
            })
            .filter(|(_, shear): &(MobId, Vec<Interaction>)| !shear.is_empty())
            .collect();
        if animals.is_empty() {
            return Err(WorkforceProblem::NoResources);
        }

        for (animal, shear) in animals {
            let fits = gainable(world, ctx, Chore::Shearing, &shear, 1);
            if !fits.is_empty() {
                return Ok((animal, fits));
            }
        }
        Err(WorkforceProblem::OverLimit)
    }

    fn claims(&self, (_, shear): &Self::Plan) -> Vec<(ResourceId, u32)> {
        interaction_claims(shear, 1)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, (animal, shear): Self::Plan) {
        let sheared = run_interactions(world, worker, ctx.location, &shear, InteractionKind::Shear, |world, i| {
            deliver(world, ctx, i.vnum, i.quantity);
            true
        });
        if !sheared {
            return;
        }
        let regrown_at = world.hour + world.config.shear_growth_hours;
        if let Some(mob) = world.mob_mut(animal) {
            mob.shear_ready_at = regrown_at;
        }
    }
}
