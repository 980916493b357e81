//! Recipe crafting shared by milling, pressing, smelting, weaving and the
//! general workforce crafter.
//!
//! Recipes are matched in two phases: collect every recipe the building can
//! run that fits the caps and is affordable, then pick one uniformly at random.

use bevy::prelude::*;
use rand::Rng;

use crate::economy::goods::ResourceId;
use crate::economy::recipe::{CraftKind, Recipe};
use crate::workforce::chore::Chore;
use crate::workforce::chores::{ChoreContext, ChoreTask, deliver, log_consumed, log_problem};
use crate::workforce::problems::WorkforceProblem;
use crate::workforce::tracker::can_gain_resource;
use crate::world::{ChoreWorld, MobId, SiteFunction, Workplace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftTask {
    pub chore: Chore,
}

/// A recipe picked for this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftPlan {
    /// Index into the catalog's recipe list
    pub recipe: usize,
    pub output: ResourceId,
    pub quantity: u32,
}

impl CraftTask {
    pub fn new(chore: Chore) -> Self {
        Self { chore }
    }

    /// Recipe kind and building function this chore crafts with
    fn station(&self) -> Option<(CraftKind, Option<SiteFunction>)> {
        match self.chore {
            Chore::Milling => Some((CraftKind::Mill, Some(SiteFunction::Mill))),
            Chore::Pressing => Some((CraftKind::Press, Some(SiteFunction::Press))),
            Chore::Smelting => Some((CraftKind::Smelt, Some(SiteFunction::Smelter))),
            Chore::Weaving => Some((CraftKind::Weave, Some(SiteFunction::Tailor))),
            Chore::General => Some((CraftKind::General, None)),
            _ => None,
        }
    }

    fn can_craft(&self, recipe: &Recipe, workplace: &Workplace) -> bool {
        let Some((kind, function)) = self.station() else {
            return false;
        };
        recipe.kind == kind
            && recipe.workforce
            && recipe.storage_payable()
            && function.is_none_or(|f| workplace.has_function(f))
            && recipe.requires_function.is_none_or(|f| workplace.has_function(f))
    }
}

impl ChoreTask for CraftTask {
    type Plan = CraftPlan;

    fn chore(&self) -> Chore {
        self.chore
    }

    fn feasible(&self, world: &mut ChoreWorld, ctx: &ChoreContext) -> Result<CraftPlan, WorkforceProblem> {
        let Some(workplace) = world.workplace(ctx.location) else {
            return Err(WorkforceProblem::NoResources);
        };
        let craftable: Vec<usize> = world
            .catalog
            .recipes
            .iter()
            .enumerate()
            .filter(|(_, recipe)| self.can_craft(recipe, workplace))
            .map(|(index, _)| index)
            .collect();

        let mut blocked_cap = false;
        let mut blocked_res = false;
        let mut candidates = Vec::new();
        for index in craftable {
            let recipe = world.catalog.recipes[index].clone();
            if !can_gain_resource(world, ctx.empire, ctx.location, self.chore, recipe.output, recipe.quantity) {
                blocked_cap = true;
                continue;
            }
            let Some(emp) = world.empire(ctx.empire) else {
                return Err(WorkforceProblem::NoResources);
            };
            let holds_item = recipe
                .requires_item
                .is_none_or(|vnum| emp.storage.find_stored_amount(ctx.island, vnum) > 0);
            if !holds_item || !emp.storage.can_pay(&world.catalog, ctx.island, &recipe.costs) {
                blocked_res = true;
                continue;
            }
            candidates.push(CraftPlan {
                recipe: index,
                output: recipe.output,
                quantity: recipe.quantity,
            });
        }

        if candidates.is_empty() {
            return Err(match (blocked_res, blocked_cap) {
                (true, true) => {
                    log_problem(world, ctx, self.chore, WorkforceProblem::OverLimit);
                    WorkforceProblem::NoResources
                }
                (false, true) => WorkforceProblem::OverLimit,
                _ => WorkforceProblem::NoResources,
            });
        }

        let pick = world.rng.random_range(0..candidates.len());
        Ok(candidates[pick])
    }

    fn claims(&self, plan: &CraftPlan) -> Vec<(ResourceId, u32)> {
        vec![(plan.output, plan.quantity)]
    }

    fn run(&self, world: &mut ChoreWorld, ctx: &ChoreContext, _worker: MobId, plan: CraftPlan) {
        let Some(recipe) = world.catalog.recipes.get(plan.recipe) else {
            return;
        };
        let costs = recipe.costs.clone();
        let name = recipe.name.clone();
        let catalog = &world.catalog;
        let Some(emp) = world.empires.get_mut(&ctx.empire) else {
            return;
        };
        let Some(paid) = emp.storage.island_mut(ctx.island).try_pay(catalog, &costs) else {
            warn!("Recipe {} at {} became unaffordable", name, ctx.location);
            return;
        };

        log_consumed(world, ctx, &paid);
        deliver(world, ctx, plan.output, plan.quantity);
        debug!("{} crafted {} at {}", self.chore, name, ctx.location);
    }
}
