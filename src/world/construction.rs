//! Completion hooks of the construction subsystem the workforce drives.

use bevy::prelude::*;

use crate::messages::workforce::WorkforceEvent;
use crate::world::site::{ConstructionState, Workplace};
use crate::world::{ChoreLocation, ChoreWorld, MobId};

fn release(world: &mut ChoreWorld, worker: MobId) {
    if let Some(mob) = world.mob_mut(worker) {
        mob.despawn_ready = true;
    }
}

pub fn finish_building(world: &mut ChoreWorld, worker: MobId, location: ChoreLocation) {
    let Some(workplace) = world.workplace_mut(location) else {
        return;
    };
    workplace.construction = ConstructionState::Complete;
    workplace.requirements.clear();
    workplace.damage = 0;
    release(world, worker);

    info!("Finished building {}", location);
    world.emit(WorkforceEvent::BuildingFinished { location });
}

pub fn finish_maintenance(world: &mut ChoreWorld, worker: MobId, location: ChoreLocation) {
    let Some(workplace) = world.workplace_mut(location) else {
        return;
    };
    workplace.requirements.clear();
    workplace.damage = 0;
    release(world, worker);

    debug!("Finished maintenance on {}", location);
    world.emit(WorkforceEvent::MaintenanceFinished { location });
}

/// Turns what was paid in into the refund list and starts taking it apart.
pub fn start_dismantle(world: &mut ChoreWorld, location: ChoreLocation) {
    let Some(workplace) = world.workplace_mut(location) else {
        return;
    };
    if workplace.is_dismantling() {
        return;
    }
    workplace.construction = ConstructionState::Dismantling;
    workplace.requirements = std::mem::take(&mut workplace.built_with).into();
    workplace.fire = None;

    info!("Started dismantling {}", location);
    world.emit(WorkforceEvent::DismantleStarted { location });
}

/// Removes the building or vehicle. The worker goes home right away.
pub fn finish_dismantle(world: &mut ChoreWorld, worker: MobId, location: ChoreLocation) {
    world.despawn_mob(worker);

    match location {
        ChoreLocation::Room(site) => {
            let Some(room) = world.site_mut(site) else {
                return;
            };
            room.has_building = false;
            room.requires_city = false;
            room.workplace = Workplace::default();
        }
        ChoreLocation::Vehicle(vehicle) => {
            if world.vehicles.remove(&vehicle).is_none() {
                return;
            }
        }
    }
    world.forget_delays(location);

    info!("Finished dismantling {}", location);
    world.emit(WorkforceEvent::DismantleFinished { location });
}
