//! Chores that just roll a list of interactions: fishing, herb gardening,
//! trapping, digging and the two production passes.

use crate::economy::goods::ResourceId;
use crate::workforce::allocator::release_worker;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{ChoreContext, ChoreTask, deliver, gainable, interaction_claims};
use crate::workforce::problems::WorkforceProblem;
use crate::world::interaction::{Interaction, InteractionKind, run_interactions};
use crate::world::{ChoreLocation, ChoreWorld, DepletionKind, MobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionTask {
    pub chore: Chore,
    pub kind: InteractionKind,
    pub depletion: DepletionKind,
}

impl InteractionTask {
    pub const fn new(chore: Chore, kind: InteractionKind, depletion: DepletionKind) -> Self {
        Self {
            chore,
            kind,
            depletion,
        }
    }

    pub const fn fishing() -> Self {
        Self::new(Chore::Fishing, InteractionKind::Fish, DepletionKind::Fish)
    }

    pub const fn herb_gardening() -> Self {
        Self::new(Chore::HerbGardening, InteractionKind::FindHerb, DepletionKind::Pick)
    }

    pub const fn trapping() -> Self {
        Self::new(Chore::Trapping, InteractionKind::Trap, DepletionKind::Trapping)
    }

    pub const fn digging() -> Self {
        Self::new(Chore::Digging, InteractionKind::Dig, DepletionKind::Dig)
    }

    pub const fn production() -> Self {
        Self::new(Chore::Production, InteractionKind::Production, DepletionKind::Production)
    }

    /// Production interactions only a skilled empire can work
    pub const fn skilled_production() -> Self {
        Self::new(Chore::Production, InteractionKind::SkilledLabor, DepletionKind::Production)
    }

    /// Interactions of this task's kind the location offers. Rooms offer
    /// their sector's and, once built, their building's; vehicles only their own.
    pub fn sources(&self, world: &ChoreWorld, location: ChoreLocation) -> Vec<Interaction> {
        let mut found = Vec::new();
        if let ChoreLocation::Room(site) = location
            && let Some(room) = world.site(site)
            && let Some(sector) = world.catalog.sector(room.sector)
        {
            found.extend(sector.interactions.iter().filter(|i| i.kind == self.kind).cloned());
        }
        if let Some(workplace) = world.workplace(location)
            && workplace.is_complete()
        {
            found.extend(workplace.interactions.iter().filter(|i| i.kind == self.kind).cloned());
        }
        found
    }

    fn depletion_limit(&self, world: &ChoreWorld, location: ChoreLocation) -> u32 {
        world
            .workplace(location)
            .and_then(|w| w.depletion_limits.get(&self.depletion).copied())
            .unwrap_or_else(|| world.config.depletion_limit(self.depletion))
    }
}

impl ChoreTask for InteractionTask {
    type Plan = Vec<Interaction>;

    fn chore(&self) -> Chore {
        self.chore
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        let sources = self.sources(world, ctx.location);
        if sources.is_empty() {
            return Err(WorkforceProblem::NoResources);
        }

        let depleted = world
            .workplace(ctx.location)
            .map(|w| w.depletion(self.depletion))
            .unwrap_or(0);
        if depleted >= self.depletion_limit(world, ctx.location) {
            return Err(WorkforceProblem::Depleted);
        }

        let fits = gainable(world, ctx, self.chore, &sources, 1);
        if fits.is_empty() {
            Err(WorkforceProblem::OverLimit)
        } else {
            Ok(fits)
        }
    }

    fn claims(&self, plan: &Self::Plan) -> Vec<(ResourceId, u32)> {
        interaction_claims(plan, 1)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, plan: Self::Plan) {
        let depletion = self.depletion;
        let found = run_interactions(world, worker, ctx.location, &plan, self.kind, |world, i| {
            deliver(world, ctx, i.vnum, i.quantity);
            if let Some(workplace) = world.workplace_mut(ctx.location) {
                workplace.add_depletion(depletion, 1);
            }
            true
        });
        if !found {
            release_worker(world, worker);
        }
    }
}
