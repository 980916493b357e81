//! Per-cycle resource cap tracking.
//!
//! The first question about a resource in a cycle scans the empire's storage,
//! shipping and ground items once; later questions reuse the cached tally and
//! the claims chores have made against it.

use std::collections::{BTreeMap, HashMap};

use crate::economy::empire::{Empire, EmpireId};
use crate::economy::goods::ResourceId;
use crate::economy::technology::Technology;
use crate::workforce::chore::Chore;
use crate::workforce::config::WorkforceConfig;
use crate::world::{ChoreLocation, ChoreWorld, IslandId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IslandTally {
    pub stored: u32,
    /// Promised by workers this cycle but not delivered yet
    pub claimed: u32,
}

impl IslandTally {
    pub fn count(&self) -> u32 {
        self.stored.saturating_add(self.claimed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerEntry {
    pub stored_total: u32,
    pub islands: BTreeMap<IslandId, IslandTally>,
}

impl TrackerEntry {
    /// Empire-wide stored plus claimed
    pub fn total(&self) -> u32 {
        let claimed: u32 = self.islands.values().map(|t| t.claimed).sum();
        self.stored_total.saturating_add(claimed)
    }

    pub fn island(&self, island: IslandId) -> u32 {
        self.islands.get(&island).map(IslandTally::count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CapTracker {
    entries: HashMap<ResourceId, TrackerEntry>,
    scans: u32,
}

impl CapTracker {
    pub fn entry(&self, vnum: ResourceId) -> Option<&TrackerEntry> {
        self.entries.get(&vnum)
    }

    /// How many storage scans this tracker has done
    pub fn scans(&self) -> u32 {
        self.scans
    }

    fn claim(&mut self, vnum: ResourceId, island: IslandId, qty: u32) {
        let tally = self
            .entries
            .entry(vnum)
            .or_default()
            .islands
            .entry(island)
            .or_default();
        tally.claimed = tally.claimed.saturating_add(qty);
    }
}

/// Tallies everything the empire holds of `vnum`, per island.
pub fn scan_resource(world: &ChoreWorld, empire: &Empire, vnum: ResourceId) -> TrackerEntry {
    let mut entry = TrackerEntry::default();
    let mut count = |island: IslandId, amount: u32| {
        if amount == 0 {
            return;
        }
        entry.stored_total = entry.stored_total.saturating_add(amount);
        let tally = entry.islands.entry(island).or_default();
        tally.stored = tally.stored.saturating_add(amount);
    };

    for (island, storage) in empire.storage.islands() {
        count(island, storage.get(vnum));
    }
    for shipment in empire.shipping.iter().filter(|s| s.vnum == vnum) {
        count(shipment.counted_island(), shipment.amount);
    }
    for site in world.sites.values() {
        for item in site.ground.iter() {
            if item.vnum == vnum && item.owner == Some(empire.id) {
                count(site.island, item.amount);
            }
        }
    }

    entry
}

/// The empire-wide ceiling for any one resource
pub fn global_cap(config: &WorkforceConfig, empire: &Empire) -> u32 {
    let per_member = if empire.has_tech(Technology::SkilledLabor) {
        config.max_chore_resource_skilled
    } else {
        config.max_chore_resource
    };
    per_member
        .saturating_mul(empire.members.max(1))
        .saturating_add(empire.workforce_cap_bonus)
}

fn ensure_entry(world: &mut ChoreWorld, empire: EmpireId, vnum: ResourceId) {
    let Some(emp) = world.empire(empire) else {
        return;
    };
    let cached = emp
        .workforce
        .tracker
        .as_ref()
        .is_some_and(|t| t.entries.contains_key(&vnum));
    if cached {
        return;
    }

    let scanned = scan_resource(world, emp, vnum);
    if let Some(emp) = world.empire_mut(empire) {
        let tracker = emp.workforce.tracker.get_or_insert_with(CapTracker::default);
        tracker.scans += 1;
        tracker.entries.insert(vnum, scanned);
    }
}

/// Whether `amount` more units of `vnum` produced at `location` would stay
/// within the empire's caps for that island.
pub fn can_gain_resource(
    world: &mut ChoreWorld,
    empire: EmpireId,
    location: ChoreLocation,
    chore: Chore,
    vnum: ResourceId,
    amount: u32,
) -> bool {
    let Some(island) = world.island_of(location) else {
        return false;
    };
    ensure_entry(world, empire, vnum);

    let Some(emp) = world.empire(empire) else {
        return false;
    };
    let Some(entry) = emp.workforce.tracker.as_ref().and_then(|t| t.entry(vnum)) else {
        return false;
    };

    let total = entry.total();
    let here = entry.island(island);

    if let Some(&limit) = emp.production_limits.get(&vnum)
        && total.saturating_add(amount) > limit
    {
        return false;
    }

    let global = global_cap(&world.config, emp);
    let island_override = emp
        .chore_settings
        .island_override(island, chore)
        .unwrap_or(u32::MAX);
    let ceiling = if total >= global {
        world.config.max_chore_resource_over_total.min(island_override)
    } else {
        global.min(island_override)
    };

    here.saturating_add(amount) <= ceiling
}

/// Records that a worker at `location` will deliver `qty` of `vnum`.
pub fn mark_resource_worker(
    world: &mut ChoreWorld,
    empire: EmpireId,
    location: ChoreLocation,
    vnum: ResourceId,
    qty: u32,
) {
    let Some(island) = world.island_of(location) else {
        return;
    };
    ensure_entry(world, empire, vnum);
    if let Some(emp) = world.empire_mut(empire) {
        emp.workforce
            .tracker
            .get_or_insert_with(CapTracker::default)
            .claim(vnum, island, qty);
    }
}
