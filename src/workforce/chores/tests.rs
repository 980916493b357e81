use super::*;
use crate::test_utils::*;
use crate::workforce::chores::extraction::MiningTask;
use crate::workforce::chores::fire::FireBrigadeTask;
use crate::world::{IslandId, MineDeposit, SiteFunction, WorkerRole, Workplace};

fn mine_site(world: &mut ChoreWorld, remaining: Option<u32>) -> ChoreContext {
    let empire = spawn_test_empire(world, "Aldmark");
    let site = spawn_test_building(
        world,
        empire,
        IslandId(1),
        (0, 0),
        Workplace::default().with_function(SiteFunction::Mine),
    );
    world.site_mut(site).unwrap().mine = remaining.map(|remaining| MineDeposit {
        ore: IRON_ORE,
        remaining,
        per_strike: 1,
    });
    ChoreContext::resolve(world, empire, ChoreLocation::Room(site)).unwrap()
}

fn next_cycle(world: &mut ChoreWorld, empire: EmpireId) {
    world.hour += 1;
    if let Some(emp) = world.empire_mut(empire) {
        emp.workforce.begin_cycle();
    }
}

fn delay_left(world: &ChoreWorld, ctx: &ChoreContext, chore: Chore) -> Option<u32> {
    world
        .empire(ctx.empire)?
        .workforce
        .delays
        .get(ctx.location, chore)
        .map(|entry| entry.remaining)
}

#[test]
fn failure_backs_off_for_a_few_cycles() {
    let mut world = create_test_world();
    let ctx = mine_site(&mut world, None);
    spawn_test_worker(&mut world, ctx.empire, ctx.room, WorkerRole::Miner);

    next_cycle(&mut world, ctx.empire);
    assert_eq!(
        perform(&mut world, &ctx, &MiningTask),
        ChoreOutcome::Blocked(WorkforceProblem::Depleted)
    );
    let first = delay_left(&world, &ctx, Chore::Mining).unwrap();
    assert!((2..=3).contains(&first));

    let mut last = first;
    for _ in 0..first {
        next_cycle(&mut world, ctx.empire);
        assert_eq!(perform(&mut world, &ctx, &MiningTask), ChoreOutcome::Delayed);
        assert!(problems(&world, ctx.empire)
            .iter()
            .any(|p| p.problem == WorkforceProblem::Delayed));
        if let Some(left) = delay_left(&world, &ctx, Chore::Mining) {
            assert!(left < last);
            last = left;
        }
    }
    assert_eq!(delay_left(&world, &ctx, Chore::Mining), None);

    next_cycle(&mut world, ctx.empire);
    assert_eq!(
        perform(&mut world, &ctx, &MiningTask),
        ChoreOutcome::Blocked(WorkforceProblem::Depleted)
    );
}

#[test]
fn success_clears_the_delay() {
    let mut world = create_test_world();
    world.config.mining_chance = 1;
    let ctx = mine_site(&mut world, Some(10));

    next_cycle(&mut world, ctx.empire);
    assert_eq!(
        perform(&mut world, &ctx, &MiningTask),
        ChoreOutcome::Blocked(WorkforceProblem::NoWorkers)
    );
    assert!(delay_left(&world, &ctx, Chore::Mining).is_some());

    spawn_test_worker(&mut world, ctx.empire, ctx.room, WorkerRole::Miner);
    let mut outcome = ChoreOutcome::Delayed;
    for _ in 0..4 {
        next_cycle(&mut world, ctx.empire);
        outcome = perform(&mut world, &ctx, &MiningTask);
        if outcome != ChoreOutcome::Delayed {
            break;
        }
    }

    assert!(matches!(outcome, ChoreOutcome::Worked(_)));
    assert_eq!(delay_left(&world, &ctx, Chore::Mining), None);
    assert_eq!(stored(&world, ctx.empire, ctx.island, IRON_ORE), 1);
}

#[test]
fn blocked_chore_releases_its_worker() {
    let mut world = create_test_world();
    let ctx = mine_site(&mut world, Some(0));
    let miner = spawn_test_worker(&mut world, ctx.empire, ctx.room, WorkerRole::Miner);

    next_cycle(&mut world, ctx.empire);
    perform(&mut world, &ctx, &MiningTask);

    let miner = world.mob(miner).unwrap();
    assert!(miner.despawn_ready);
    assert_eq!(miner.last_active, None);
}

#[test]
fn claims_are_made_even_when_no_worker_turns_up() {
    let mut world = create_test_world();
    let ctx = mine_site(&mut world, Some(10));

    next_cycle(&mut world, ctx.empire);
    perform(&mut world, &ctx, &MiningTask);

    let tracker = world.empire(ctx.empire).unwrap().workforce.tracker.as_ref().unwrap();
    assert_eq!(tracker.entry(IRON_ORE).unwrap().island(ctx.island), 1);
    assert_eq!(stored(&world, ctx.empire, ctx.island, IRON_ORE), 0);
}

#[test]
fn placing_a_worker_charges_it_without_working() {
    let mut world = create_test_world();
    let ctx = mine_site(&mut world, Some(10));
    spawn_test_home(&mut world, ctx.empire, ctx.island, (0, 1), 2);

    next_cycle(&mut world, ctx.empire);
    let ChoreOutcome::Placed(worker) = perform(&mut world, &ctx, &MiningTask) else {
        panic!("expected a placed worker");
    };

    assert_eq!(world.mob(worker).unwrap().last_active, Some(world.hour));
    assert_eq!(world.site(ctx.room).unwrap().mine_remaining(), 10);
    let workforce = &world.empire(ctx.empire).unwrap().workforce;
    assert_eq!(workforce.where_log.entries().len(), 1);
    assert_eq!(workforce.needs.owed(ctx.island), world.config.food_per_worker);

    // the same worker can't be grabbed twice in one cycle
    assert_eq!(find_worker_in_site(&world, ctx.empire, ctx.location, Chore::Mining), None);
}

#[test]
fn no_workers_is_logged_once_per_cycle() {
    let mut world = create_test_world();
    let empire = spawn_test_empire(&mut world, "Aldmark");
    let mut workplace = Workplace::default();
    workplace.set_on_fire();
    let a = spawn_test_building(&mut world, empire, IslandId(1), (0, 0), workplace);
    let ctx = ChoreContext::resolve(&world, empire, ChoreLocation::Room(a)).unwrap();

    next_cycle(&mut world, empire);
    perform(&mut world, &ctx, &FireBrigadeTask);
    log_problem(&mut world, &ctx, Chore::FireBrigade, WorkforceProblem::NoWorkers);

    let logged = problems(&world, empire);
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].count, 2);
}
