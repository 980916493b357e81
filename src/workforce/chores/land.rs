//! Terrain chores: farming, chopping, stump burning and prospecting.
//!
//! These act on the room's sector rather than on a building, and most of
//! them end by turning the room into a different sector.

use bevy::prelude::*;
use rand::Rng;

use crate::economy::goods::ResourceId;
use crate::messages::workforce::WorkforceEvent;
use crate::workforce::allocator::release_worker;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{
    ChoreContext, ChoreTask, chore_enabled, deliver, gainable, interaction_claims,
};
use crate::workforce::problems::WorkforceProblem;
use crate::world::interaction::{Interaction, InteractionKind, run_interactions};
use crate::world::{ChoreWorld, DepletionKind, MineDeposit, MobId, SectorId, SectorProto, SiteId};

/// Most a single harvest can multiply an interaction's quantity by
const HARVEST_MULTIPLIER: u32 = 8;

fn sector_of(world: &ChoreWorld, site: SiteId) -> Option<&SectorProto> {
    let sector = world.site(site)?.sector;
    world.catalog.sector(sector)
}

fn sector_interactions(world: &ChoreWorld, site: SiteId, kind: InteractionKind) -> Vec<Interaction> {
    sector_of(world, site)
        .map(|proto| {
            proto
                .interactions
                .iter()
                .filter(|i| i.kind == kind)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Turns a room into `to`, resetting the terrain timers.
pub fn change_sector(world: &mut ChoreWorld, site: SiteId, to: SectorId) {
    let Some(room) = world.site_mut(site) else {
        return;
    };
    let from = room.sector;
    room.sector = to;
    room.chop_progress = 0;
    room.harvest_progress = 0;

    debug!("Room {} changed from sector {} to {}", site.0, from.0, to.0);
    world.emit(WorkforceEvent::SectorChanged { site, from, to });
}

/// Filters `interactions` down to what fits the caps, naming the problem if
/// nothing is left.
fn gainable_or_problem(
    world: &mut ChoreWorld,
    ctx: &ChoreContext,
    chore: Chore,
    interactions: &[Interaction],
    multiplier: u32,
) -> Result<Vec<Interaction>, WorkforceProblem> {
    if interactions.is_empty() {
        return Err(WorkforceProblem::NoResources);
    }
    let fits = gainable(world, ctx, chore, interactions, multiplier);
    if fits.is_empty() {
        Err(WorkforceProblem::OverLimit)
    } else {
        Ok(fits)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FarmingTask;

impl ChoreTask for FarmingTask {
    type Plan = Vec<Interaction>;

    fn chore(&self) -> Chore {
        Chore::Farming
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        if !sector_of(world, ctx.room).is_some_and(SectorProto::is_crop) {
            return Err(WorkforceProblem::NoResources);
        }
        let harvest = sector_interactions(world, ctx.room, InteractionKind::Harvest);
        gainable_or_problem(world, ctx, self.chore(), &harvest, HARVEST_MULTIPLIER)
    }

    fn claims(&self, plan: &Self::Plan) -> Vec<(ResourceId, u32)> {
        interaction_claims(plan, HARVEST_MULTIPLIER)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, plan: Self::Plan) {
        let Some(crop) = sector_of(world, ctx.room).and_then(|proto| proto.crop.clone()) else {
            return;
        };
        let timer = if crop.orchard {
            world.config.harvest_timer * 2
        } else {
            world.config.harvest_timer
        };
        let picked = world.roll(1..=2) as i32;
        let Some(room) = world.site_mut(ctx.room) else {
            return;
        };
        if room.harvest_progress <= 0 {
            room.harvest_progress = timer;
        }
        room.harvest_progress -= picked;
        if room.harvest_progress > 0 {
            return;
        }

        for interaction in &plan {
            let amount = world.roll(4..=HARVEST_MULTIPLIER) * interaction.quantity;
            deliver(world, ctx, interaction.vnum, amount);
        }

        let short_depletion = world.config.short_depletion;
        let spent = match world.site_mut(ctx.room) {
            Some(room) if crop.orchard => {
                room.workplace.add_depletion(DepletionKind::Pick, 1);
                room.workplace.depletion(DepletionKind::Pick) >= short_depletion
            }
            Some(_) => true,
            None => return,
        };
        if !spent {
            return;
        }

        release_worker(world, worker);
        match crop.seeded {
            Some(seeded) if chore_enabled(world, ctx, Chore::Replanting) => {
                change_sector(world, ctx.room, seeded);
                let seed_hours = world.config.seed_hours;
                if let Some(room) = world.site_mut(ctx.room) {
                    room.seed_hours = seed_hours;
                }
            }
            _ => {
                change_sector(world, ctx.room, crop.fallow);
                if chore_enabled(world, ctx, Chore::AbandonFarmed) {
                    world.abandon_room(ctx.room);
                }
            }
        }
        info!("Harvested {} at {}", crop.name, ctx.location);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChoppingTask;

impl ChoreTask for ChoppingTask {
    type Plan = Vec<Interaction>;

    fn chore(&self) -> Chore {
        Chore::Chopping
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        if !sector_of(world, ctx.room).is_some_and(SectorProto::is_choppable) {
            return Err(WorkforceProblem::NoResources);
        }
        let chop = sector_interactions(world, ctx.room, InteractionKind::Chop);
        gainable_or_problem(world, ctx, self.chore(), &chop, 1)
    }

    fn claims(&self, plan: &Self::Plan) -> Vec<(ResourceId, u32)> {
        interaction_claims(plan, 1)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, plan: Self::Plan) {
        let timer = world.config.chop_timer.max(1);
        let Some(room) = world.site_mut(ctx.room) else {
            return;
        };
        if room.chop_progress == 0 {
            room.chop_progress = timer;
        }
        room.chop_progress -= 1;
        if room.chop_progress > 0 {
            return;
        }

        run_interactions(world, worker, ctx.location, &plan, InteractionKind::Chop, |world, i| {
            deliver(world, ctx, i.vnum, i.quantity);
            true
        });

        let Some(into) = sector_of(world, ctx.room).and_then(|proto| proto.chopped_into) else {
            return;
        };
        change_sector(world, ctx.room, into);

        if !sector_of(world, ctx.room).is_some_and(SectorProto::is_choppable) {
            release_worker(world, worker);
            if chore_enabled(world, ctx, Chore::AbandonChopped) {
                world.abandon_room(ctx.room);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BurnStumpsTask;

impl ChoreTask for BurnStumpsTask {
    type Plan = SectorId;

    fn chore(&self) -> Chore {
        Chore::BurnStumps
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<SectorId, WorkforceProblem> {
        sector_of(world, ctx.room)
            .and_then(|proto| proto.burns_into)
            .ok_or(WorkforceProblem::NoResources)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, into: SectorId) {
        change_sector(world, ctx.room, into);
        release_worker(world, worker);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProspectingTask;

impl ChoreTask for ProspectingTask {
    type Plan = ();

    fn chore(&self) -> Chore {
        Chore::Prospecting
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<(), WorkforceProblem> {
        let mineable = sector_of(world, ctx.room).is_some_and(|proto| proto.mineable);
        let fresh = world
            .site(ctx.room)
            .is_some_and(|room| room.mine.is_none() && room.prospected_by != Some(ctx.empire));
        if mineable && fresh {
            Ok(())
        } else {
            Err(WorkforceProblem::NoResources)
        }
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, _plan: ()) {
        let weight = world.catalog.mine_weight();
        let found = if weight > 0 {
            let roll = world.rng.random_range(0..weight);
            world.catalog.mine_for_roll(roll).cloned()
        } else {
            None
        };
        let deposit = match found {
            Some(mine) => {
                let min = mine.min_amount.min(mine.max_amount);
                Some(MineDeposit {
                    ore: mine.ore,
                    remaining: world.roll(min..=mine.max_amount),
                    per_strike: mine.per_strike,
                })
            }
            None => None,
        };

        if let Some(room) = world.site_mut(ctx.room) {
            room.prospected_by = Some(ctx.empire);
            room.mine = deposit;
        }
        release_worker(world, worker);

        if let Some(deposit) = deposit {
            info!("Found {}x ore {} at {}", deposit.remaining, deposit.ore, ctx.location);
            world.emit(WorkforceEvent::MineFound {
                site: ctx.room,
                ore: deposit.ore,
                amount: deposit.remaining,
            });
        }
    }
}
