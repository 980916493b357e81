//! Chores that process stored items through the item's own interactions.

use crate::economy::goods::ResourceId;
use crate::workforce::chore::Chore;
use crate::workforce::chores::{
    ChoreContext, ChoreTask, deliver, gainable, interaction_claims, log_consumed,
};
use crate::workforce::problems::WorkforceProblem;
use crate::world::interaction::{Interaction, InteractionKind, run_interactions};
use crate::world::{ChoreWorld, MobId, SiteFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryTask {
    pub chore: Chore,
    pub kind: InteractionKind,
    pub function: SiteFunction,
}

impl InventoryTask {
    pub const fn sawing() -> Self {
        Self {
            chore: Chore::Sawing,
            kind: InteractionKind::Saw,
            function: SiteFunction::LumberYard,
        }
    }

    pub const fn scraping() -> Self {
        Self {
            chore: Chore::Scraping,
            kind: InteractionKind::Scrape,
            function: SiteFunction::LumberYard,
        }
    }

    pub const fn tanning() -> Self {
        Self {
            chore: Chore::Tanning,
            kind: InteractionKind::Tan,
            function: SiteFunction::Tannery,
        }
    }
}

impl ChoreTask for InventoryTask {
    /// The stored item to process and the outputs it may yield
    type Plan = (ResourceId, Vec<Interaction>);

    fn chore(&self) -> Chore {
        self.chore
    }

    /// Walks the island's storage, biggest stacks first, for an item that can
    /// be processed into something still under the caps.
    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<Self::Plan, WorkforceProblem> {
        if !world
            .workplace(ctx.location)
            .is_some_and(|w| w.is_complete() && w.has_function(self.function))
        {
            return Err(WorkforceProblem::NoResources);
        }

        let items: Vec<(ResourceId, Vec<Interaction>)> = world
            .empire(ctx.empire)
            .and_then(|emp| emp.storage.island(ctx.island))
            .map(|storage| {
                storage
                    .stacks()
                    .iter()
                    .filter(|stack| stack.amount > 0)
                    .filter_map(|stack| {
                        let proto = world.catalog.object(stack.vnum)?;
                        let outputs: Vec<Interaction> = proto
                            .interactions
                            .iter()
                            .filter(|i| i.kind == self.kind)
                            .cloned()
                            .collect();
                        (!outputs.is_empty()).then_some((stack.vnum, outputs))
                    })
                    .collect()
            })
            .unwrap_or_default();
        if items.is_empty() {
            return Err(WorkforceProblem::NoResources);
        }

        for (vnum, outputs) in items {
            let fits = gainable(world, ctx, self.chore, &outputs, 1);
            if !fits.is_empty() {
                return Ok((vnum, fits));
            }
        }
        Err(WorkforceProblem::OverLimit)
    }

    fn claims(&self, (_, outputs): &Self::Plan) -> Vec<(ResourceId, u32)> {
        interaction_claims(outputs, 1)
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, worker: MobId, (vnum, outputs): Self::Plan) {
        let Some(emp) = world.empire_mut(ctx.empire) else {
            return;
        };
        if emp.storage.find_stored_amount(ctx.island, vnum) == 0 {
            return;
        }
        emp.storage.charge_stored_resource(ctx.island, vnum, 1);
        log_consumed(world, ctx, &[(vnum, 1)]);

        run_interactions(world, worker, ctx.location, &outputs, self.kind, |world, i| {
            deliver(world, ctx, i.vnum, i.quantity);
            true
        });
    }
}
