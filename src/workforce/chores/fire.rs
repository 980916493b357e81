use bevy::prelude::*;

use crate::messages::workforce::WorkforceEvent;
use crate::workforce::allocator::release_worker;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{ChoreContext, ChoreTask};
use crate::workforce::problems::WorkforceProblem;
use crate::world::{ChoreWorld, MobId};

/// Puts out a burning building a little each cycle
#[derive(Debug, Clone, Copy)]
pub struct FireBrigadeTask;

impl ChoreTask for FireBrigadeTask {
    type Plan = ();

    fn chore(&self) -> Chore {
        Chore::FireBrigade
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<(), WorkforceProblem> {
        if world.workplace(ctx.location).is_some_and(|w| w.is_burning()) {
            Ok(())
        } else {
            Err(WorkforceProblem::NoResources)
        }
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, _plan: ()) {
        let doused = world.roll(2..=6);
        let target = world.config.fire_extinguish_value;
        let Some(workplace) = world.workplace_mut(ctx.location) else {
            return;
        };
        let progress = workplace.fire.get_or_insert(0);
        *progress += doused;
        if *progress < target {
            return;
        }

        workplace.fire = None;
        release_worker(world, worker);
        info!("Fire at {} put out", ctx.location);
        world.emit(WorkforceEvent::FireExtinguished {
            location: ctx.location,
        });
    }
}
