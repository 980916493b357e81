//! The explicit simulation context the workforce scheduler runs against.
//!
//! Every entity lives in an ordered arena keyed by a small copyable id, so
//! iteration order is insertion order and a chore that removes an entity
//! only invalidates its id, never a reference held by the caller.

use core::fmt;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::economy::empire::{Empire, EmpireId};
use crate::messages::workforce::WorkforceEvent;
use crate::workforce::config::WorkforceConfig;

pub mod catalog;
pub mod construction;
pub mod interaction;
pub mod mob;
pub mod sector;
pub mod site;
pub mod vehicle;

pub use catalog::Catalog;
pub use mob::{Citizen, CitizenRef, Mob, MobKind, WorkerRole};
pub use sector::{Climate, CropInfo, SectorId, SectorProto};
pub use site::{
    ConstructionState, DepletionKind, GroundItem, MineDeposit, Requirement, RequirementKind,
    Site, SiteFunction, Workplace,
};
pub use vehicle::Vehicle;

/// Geographic partition used for storage and cap scoping
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct IslandId(pub u32);

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "island {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct SiteId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct VehicleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct MobId(pub u32);

/// A place that can host chores: a territory room or an owned vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum ChoreLocation {
    Room(SiteId),
    Vehicle(VehicleId),
}

impl fmt::Display for ChoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoreLocation::Room(site) => write!(f, "room {}", site.0),
            ChoreLocation::Vehicle(vehicle) => write!(f, "vehicle {}", vehicle.0),
        }
    }
}

#[derive(Resource)]
pub struct ChoreWorld {
    pub config: WorkforceConfig,
    pub catalog: Catalog,
    pub empires: BTreeMap<EmpireId, Empire>,
    pub sites: BTreeMap<SiteId, Site>,
    pub vehicles: BTreeMap<VehicleId, Vehicle>,
    pub mobs: BTreeMap<MobId, Mob>,
    /// Current simulated hour
    pub hour: u64,
    pub(crate) rng: StdRng,
    events: Vec<WorkforceEvent>,
    next_empire: u32,
    next_site: u32,
    next_vehicle: u32,
    next_mob: u32,
}

impl Default for ChoreWorld {
    fn default() -> Self {
        Self::new(WorkforceConfig::default(), Catalog::default())
    }
}

impl ChoreWorld {
    pub fn new(config: WorkforceConfig, catalog: Catalog) -> Self {
        let rng = StdRng::seed_from_u64(config.rng_seed);
        Self {
            config,
            catalog,
            empires: BTreeMap::new(),
            sites: BTreeMap::new(),
            vehicles: BTreeMap::new(),
            mobs: BTreeMap::new(),
            hour: 0,
            rng,
            events: Vec::new(),
            next_empire: 1,
            next_site: 1,
            next_vehicle: 1,
            next_mob: 1,
        }
    }

    /// Reseeds the roll generator (tests and replays)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn add_empire(&mut self, mut empire: Empire) -> EmpireId {
        let id = EmpireId(self.next_empire);
        self.next_empire += 1;
        empire.id = id;
        self.empires.insert(id, empire);
        id
    }

    pub fn add_site(&mut self, mut site: Site) -> SiteId {
        let id = SiteId(self.next_site);
        self.next_site += 1;
        site.id = id;
        self.sites.insert(id, site);
        id
    }

    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> VehicleId {
        let id = VehicleId(self.next_vehicle);
        self.next_vehicle += 1;
        vehicle.id = id;
        self.vehicles.insert(id, vehicle);
        id
    }

    pub fn spawn_mob(&mut self, mut mob: Mob) -> MobId {
        let id = MobId(self.next_mob);
        self.next_mob += 1;
        mob.id = id;
        if let Some(citizen) = mob.citizen
            && let Some(slot) = self
                .sites
                .get_mut(&citizen.home)
                .and_then(|site| site.citizens.get_mut(citizen.slot))
        {
            slot.mob = Some(id);
        }
        self.mobs.insert(id, mob);
        id
    }

    /// Removes a mob and clears the backlink from the citizen it was spawned from.
    pub fn despawn_mob(&mut self, id: MobId) -> Option<Mob> {
        let mob = self.mobs.remove(&id)?;
        if let Some(citizen) = mob.citizen
            && let Some(slot) = self
                .sites
                .get_mut(&citizen.home)
                .and_then(|site| site.citizens.get_mut(citizen.slot))
            && slot.mob == Some(id)
        {
            slot.mob = None;
        }
        Some(mob)
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.get(&id)
    }

    pub fn empire_mut(&mut self, id: EmpireId) -> Option<&mut Empire> {
        self.empires.get_mut(&id)
    }

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(&id)
    }

    pub fn site_mut(&mut self, id: SiteId) -> Option<&mut Site> {
        self.sites.get_mut(&id)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(&id)
    }

    pub fn mob(&self, id: MobId) -> Option<&Mob> {
        self.mobs.get(&id)
    }

    pub fn mob_mut(&mut self, id: MobId) -> Option<&mut Mob> {
        self.mobs.get_mut(&id)
    }

    pub fn workplace(&self, location: ChoreLocation) -> Option<&Workplace> {
        match location {
            ChoreLocation::Room(site) => self.sites.get(&site).map(|s| &s.workplace),
            ChoreLocation::Vehicle(vehicle) => self.vehicles.get(&vehicle).map(|v| &v.workplace),
        }
    }

    pub fn workplace_mut(&mut self, location: ChoreLocation) -> Option<&mut Workplace> {
        match location {
            ChoreLocation::Room(site) => self.sites.get_mut(&site).map(|s| &mut s.workplace),
            ChoreLocation::Vehicle(vehicle) => self
                .vehicles
                .get_mut(&vehicle)
                .map(|v| &mut v.workplace),
        }
    }

    /// The room a location's workers stand in
    pub fn room_of(&self, location: ChoreLocation) -> Option<SiteId> {
        match location {
            ChoreLocation::Room(site) => self.sites.contains_key(&site).then_some(site),
            ChoreLocation::Vehicle(vehicle) => self.vehicles.get(&vehicle).map(|v| v.room),
        }
    }

    pub fn island_of(&self, location: ChoreLocation) -> Option<IslandId> {
        self.room_of(location)
            .and_then(|room| self.sites.get(&room))
            .map(|site| site.island)
    }

    pub fn has_island(&self, island: IslandId) -> bool {
        self.sites.values().any(|site| site.island == island)
    }

    /// Snapshot of the rooms an empire owns, in insertion order
    pub fn territory(&self, empire: EmpireId) -> Vec<SiteId> {
        self.sites
            .values()
            .filter(|site| site.owner == Some(empire))
            .map(|site| site.id)
            .collect()
    }

    /// Snapshot of the vehicles an empire owns that are still in the world
    pub fn owned_vehicles(&self, empire: EmpireId) -> Vec<VehicleId> {
        self.vehicles
            .values()
            .filter(|vehicle| vehicle.owner == Some(empire) && !vehicle.extracted)
            .map(|vehicle| vehicle.id)
            .collect()
    }

    pub fn mobs_in_room(&self, room: SiteId) -> impl Iterator<Item = &Mob> {
        self.mobs.values().filter(move |mob| mob.room == room)
    }

    /// Drops every empire's backoff entries for a location that is gone or
    /// changed hands.
    pub fn forget_delays(&mut self, location: ChoreLocation) {
        for emp in self.empires.values_mut() {
            emp.workforce.delays.forget_location(location);
        }
    }

    /// Releases a room from its owner and sends the owner's workers there home.
    pub fn abandon_room(&mut self, site: SiteId) {
        let Some(owner) = self.sites.get(&site).and_then(|s| s.owner) else {
            return;
        };

        let workers: Vec<MobId> = self
            .mobs_in_room(site)
            .filter(|mob| mob.owner == Some(owner) && mob.is_worker())
            .map(|mob| mob.id)
            .collect();
        for worker in workers {
            self.despawn_mob(worker);
        }

        if let Some(room) = self.sites.get_mut(&site) {
            room.owner = None;
        }
        self.forget_delays(ChoreLocation::Room(site));
        info!("{} abandoned room {}", owner, site.0);
        self.emit(WorkforceEvent::RoomAbandoned {
            empire: owner,
            site,
        });
    }

    pub fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.random_range(range)
    }

    /// True once in `one_in` calls on average
    pub fn one_in(&mut self, one_in: u32) -> bool {
        one_in <= 1 || self.rng.random_range(0..one_in) == 0
    }

    pub(crate) fn emit(&mut self, event: WorkforceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[WorkforceEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<WorkforceEvent> {
        std::mem::take(&mut self.events)
    }
}
