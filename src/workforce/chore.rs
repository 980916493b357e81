use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::world::{IslandId, WorkerRole};

/// Every automated task the workforce knows about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum Chore {
    Building,
    Farming,
    Replanting,
    Chopping,
    Maintenance,
    Mining,
    Digging,
    Sawing,
    Scraping,
    Smelting,
    Weaving,
    AbandonDismantled,
    HerbGardening,
    FireBrigade,
    Trapping,
    Tanning,
    Shearing,
    Minting,
    DismantleMines,
    AbandonChopped,
    AbandonFarmed,
    Milling,
    Pressing,
    RepairVehicles,
    General,
    Fishing,
    BurnStumps,
    Prospecting,
    Production,
}

impl Chore {
    pub const ALL: [Chore; 29] = [
        Chore::Building,
        Chore::Farming,
        Chore::Replanting,
        Chore::Chopping,
        Chore::Maintenance,
        Chore::Mining,
        Chore::Digging,
        Chore::Sawing,
        Chore::Scraping,
        Chore::Smelting,
        Chore::Weaving,
        Chore::AbandonDismantled,
        Chore::HerbGardening,
        Chore::FireBrigade,
        Chore::Trapping,
        Chore::Tanning,
        Chore::Shearing,
        Chore::Minting,
        Chore::DismantleMines,
        Chore::AbandonChopped,
        Chore::AbandonFarmed,
        Chore::Milling,
        Chore::Pressing,
        Chore::RepairVehicles,
        Chore::General,
        Chore::Fishing,
        Chore::BurnStumps,
        Chore::Prospecting,
        Chore::Production,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Chore::Building => "building",
            Chore::Farming => "farming",
            Chore::Replanting => "replanting",
            Chore::Chopping => "chopping",
            Chore::Maintenance => "maintenance",
            Chore::Mining => "mining",
            Chore::Digging => "digging",
            Chore::Sawing => "sawing",
            Chore::Scraping => "scraping",
            Chore::Smelting => "smelting",
            Chore::Weaving => "weaving",
            Chore::AbandonDismantled => "abandon-dismantled",
            Chore::HerbGardening => "herb-gardening",
            Chore::FireBrigade => "fire-brigade",
            Chore::Trapping => "trapping",
            Chore::Tanning => "tanning",
            Chore::Shearing => "shearing",
            Chore::Minting => "minting",
            Chore::DismantleMines => "dismantle-mines",
            Chore::AbandonChopped => "abandon-chopped",
            Chore::AbandonFarmed => "abandon-farmed",
            Chore::Milling => "milling",
            Chore::Pressing => "pressing",
            Chore::RepairVehicles => "repair-vehicles",
            Chore::General => "general",
            Chore::Fishing => "fishing",
            Chore::BurnStumps => "burn-stumps",
            Chore::Prospecting => "prospecting",
            Chore::Production => "production",
        }
    }

    pub fn from_name(name: &str) -> Option<Chore> {
        Chore::ALL.into_iter().find(|chore| chore.name() == name)
    }

    /// Worker type that performs the chore; option chores have none
    pub fn worker_role(self) -> Option<WorkerRole> {
        let role = match self {
            Chore::Building | Chore::DismantleMines => WorkerRole::Builder,
            Chore::Farming => WorkerRole::Farmer,
            Chore::Chopping => WorkerRole::Feller,
            Chore::Maintenance | Chore::RepairVehicles => WorkerRole::Repairman,
            Chore::Mining => WorkerRole::Miner,
            Chore::Digging => WorkerRole::Digger,
            Chore::Sawing => WorkerRole::Sawyer,
            Chore::Scraping => WorkerRole::Scraper,
            Chore::Smelting => WorkerRole::Smelter,
            Chore::Weaving => WorkerRole::Weaver,
            Chore::HerbGardening => WorkerRole::Gardener,
            Chore::FireBrigade => WorkerRole::FireBrigade,
            Chore::Trapping => WorkerRole::Trapper,
            Chore::Tanning => WorkerRole::Tanner,
            Chore::Shearing => WorkerRole::Shearer,
            Chore::Minting => WorkerRole::CoinMaker,
            Chore::Milling => WorkerRole::Miller,
            Chore::Pressing => WorkerRole::Presser,
            Chore::General => WorkerRole::Crafter,
            Chore::Fishing => WorkerRole::Fisher,
            Chore::BurnStumps => WorkerRole::StumpBurner,
            Chore::Prospecting => WorkerRole::Prospector,
            Chore::Production => WorkerRole::Laborer,
            Chore::Replanting
            | Chore::AbandonDismantled
            | Chore::AbandonChopped
            | Chore::AbandonFarmed => return None,
        };
        Some(role)
    }

    /// Option chores toggle behavior of other chores and never get a worker
    pub fn is_option(self) -> bool {
        self.worker_role().is_none()
    }

    /// Chores a building's artisan may staff instead of the generic worker
    pub fn accepts_artisan(self) -> bool {
        matches!(
            self,
            Chore::General | Chore::Milling | Chore::Pressing | Chore::Smelting | Chore::Weaving
        )
    }
}

impl fmt::Display for Chore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-island switch for one chore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChoreSetting {
    #[default]
    Off,
    On,
    /// Enabled, capping the island at `n` units of each resource
    Limit(u32),
}

impl ChoreSetting {
    pub fn is_enabled(self) -> bool {
        !matches!(self, ChoreSetting::Off)
    }

    pub fn island_override(self) -> Option<u32> {
        match self {
            ChoreSetting::Limit(n) => Some(n),
            _ => None,
        }
    }
}

/// The per-island-per-chore table; unset entries are off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoreSettings {
    entries: BTreeMap<(IslandId, Chore), ChoreSetting>,
}

impl ChoreSettings {
    pub fn get(&self, island: IslandId, chore: Chore) -> ChoreSetting {
        self.entries
            .get(&(island, chore))
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&mut self, island: IslandId, chore: Chore, setting: ChoreSetting) {
        if setting == ChoreSetting::Off {
            self.entries.remove(&(island, chore));
        } else {
            self.entries.insert((island, chore), setting);
        }
    }

    pub fn is_enabled(&self, island: IslandId, chore: Chore) -> bool {
        self.get(island, chore).is_enabled()
    }

    pub fn island_override(&self, island: IslandId, chore: Chore) -> Option<u32> {
        self.get(island, chore).island_override()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IslandId, Chore, ChoreSetting)> + '_ {
        self.entries
            .iter()
            .map(|((island, chore), setting)| (*island, *chore, *setting))
    }
}
