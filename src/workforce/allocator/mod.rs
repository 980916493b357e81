//! Finding, placing and retiring workforce mobs.

use bevy::prelude::*;

use crate::economy::empire::EmpireId;
use crate::messages::workforce::WorkforceEvent;
use crate::workforce::chore::Chore;
use crate::world::{ChoreLocation, ChoreWorld, CitizenRef, Mob, MobId, MobKind, SiteId};

/// An idle worker of the right role already standing at `location`.
pub fn find_worker_in_site(
    world: &ChoreWorld,
    empire: EmpireId,
    location: ChoreLocation,
    chore: Chore,
) -> Option<MobId> {
    let role = chore.worker_role()?;
    let room = world.room_of(location)?;
    let artisan = if chore.accepts_artisan() {
        world.workplace(location).and_then(|w| w.artisan)
    } else {
        None
    };

    world
        .mobs_in_room(room)
        .find(|mob| {
            mob.owner == Some(empire)
                && mob
                    .role()
                    .is_some_and(|r| r == role || Some(r) == artisan)
                && !mob.worked_at(world.hour)
                && mob.is_able()
        })
        .map(|mob| mob.id)
}

enum Candidate {
    /// A finished worker of the right role that can just walk over
    Idle(MobId),
    /// A citizen slot with nobody spawned
    Free(SiteId, usize),
    /// A citizen wandering around as a plain mob
    Wandering(MobId, SiteId, usize),
}

/// Brings a worker to `location`: the building's artisan if it has one,
/// otherwise a citizen from nearby territory on the same island.
pub fn place_worker(
    world: &mut ChoreWorld,
    empire: EmpireId,
    chore: Chore,
    location: ChoreLocation,
) -> Option<MobId> {
    let role = chore.worker_role()?;
    let room = world.room_of(location)?;
    let (island, position) = world.site(room).map(|s| (s.island, s.position))?;

    if chore.accepts_artisan()
        && let Some(artisan) = world.workplace(location).and_then(|w| w.artisan)
    {
        let present = world
            .mobs_in_room(room)
            .any(|mob| mob.owner == Some(empire) && mob.role() == Some(artisan));
        if !present {
            let id = world.spawn_mob(Mob::worker(empire, artisan, room));
            debug!("Spawned {} {} for {} at {}", artisan, id.0, chore, location);
            world.emit(WorkforceEvent::WorkerPlaced {
                empire,
                worker: id,
                chore,
                location,
            });
            return Some(id);
        }
    }

    let mut idle = None;
    let mut free = None;
    let mut wandering = None;

    for site in world.sites.values() {
        if site.owner != Some(empire)
            || site.island != island
            || site.citizens.is_empty()
            || site.position.unsigned_distance_to(position) > world.config.chore_distance
        {
            continue;
        }
        for (slot, citizen) in site.citizens.iter().enumerate() {
            match citizen.mob.and_then(|id| world.mob(id)) {
                None => {
                    free.get_or_insert(Candidate::Free(site.id, slot));
                }
                Some(mob) if mob.fighting || mob.worked_at(world.hour) => {}
                Some(mob) if mob.kind == MobKind::Worker(role) && mob.despawn_ready => {
                    idle.get_or_insert(Candidate::Idle(mob.id));
                }
                Some(mob) if mob.kind == MobKind::Citizen => {
                    wandering.get_or_insert(Candidate::Wandering(mob.id, site.id, slot));
                }
                Some(_) => {}
            }
        }
        if idle.is_some() {
            break;
        }
    }

    let id = match idle.or(free).or(wandering)? {
        Candidate::Idle(id) => {
            let mob = world.mob_mut(id)?;
            mob.room = room;
            mob.despawn_ready = false;
            id
        }
        Candidate::Free(home, slot) => world.spawn_mob(
            Mob::worker(empire, role, room).with_citizen(CitizenRef { home, slot }),
        ),
        Candidate::Wandering(old, home, slot) => {
            world.despawn_mob(old);
            world.spawn_mob(
                Mob::worker(empire, role, room).with_citizen(CitizenRef { home, slot }),
            )
        }
    };

    debug!("Placed {} {} for {} at {}", role, id.0, chore, location);
    world.emit(WorkforceEvent::WorkerPlaced {
        empire,
        worker: id,
        chore,
        location,
    });
    Some(id)
}

/// Marks `worker` busy for this cycle and bills its food.
pub fn charge_workforce(
    world: &mut ChoreWorld,
    empire: EmpireId,
    worker: MobId,
    chore: Chore,
    location: ChoreLocation,
) {
    let hour = world.hour;
    let food = world.config.food_per_worker;
    let island = world.island_of(location);

    if let Some(mob) = world.mob_mut(worker) {
        mob.last_active = Some(hour);
        mob.despawn_ready = false;
    }
    if let Some(emp) = world.empire_mut(empire) {
        emp.workforce.where_log.push(worker, chore, location);
        if let Some(island) = island {
            emp.workforce.needs.add_demand(island, food);
        }
    }
}

/// The worker finished; it may be despawned once idle long enough.
pub fn release_worker(world: &mut ChoreWorld, worker: MobId) {
    if let Some(mob) = world.mob_mut(worker) {
        mob.despawn_ready = true;
    }
}

fn retire(world: &mut ChoreWorld, workers: Vec<MobId>) -> usize {
    let mut removed = 0;
    for id in workers {
        let Some(mob) = world.mob_mut(id) else {
            continue;
        };
        mob.despawn_ready = true;
        if !mob.fighting {
            world.despawn_mob(id);
            removed += 1;
        }
    }
    removed
}

/// Sends home every worker the empire has doing `chore`.
pub fn deactivate_workforce(world: &mut ChoreWorld, empire: EmpireId, chore: Chore) -> usize {
    let Some(role) = chore.worker_role() else {
        return 0;
    };
    let workers = world
        .mobs
        .values()
        .filter(|mob| mob.owner == Some(empire) && mob.role() == Some(role))
        .map(|mob| mob.id)
        .collect();
    retire(world, workers)
}

/// Sends home every workforce mob the empire has in one room.
pub fn deactivate_workforce_room(world: &mut ChoreWorld, empire: EmpireId, room: SiteId) -> usize {
    let workers = world
        .mobs_in_room(room)
        .filter(|mob| mob.owner == Some(empire) && mob.is_worker())
        .map(|mob| mob.id)
        .collect();
    retire(world, workers)
}

/// Removes finished workers that have been idle for long enough.
pub fn despawn_idle_workers(world: &mut ChoreWorld) -> usize {
    let hour = world.hour;
    let idle_for = world.config.worker_idle_despawn_hours;
    let idle: Vec<MobId> = world
        .mobs
        .values()
        .filter(|mob| {
            mob.is_worker()
                && mob.despawn_ready
                && !mob.fighting
                && hour.saturating_sub(mob.last_active.unwrap_or(0)) >= idle_for
        })
        .map(|mob| mob.id)
        .collect();

    for id in idle.iter() {
        world.despawn_mob(*id);
    }
    if !idle.is_empty() {
        debug!("Despawned {} idle workers", idle.len());
    }
    idle.len()
}
