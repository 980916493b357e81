use core::fmt;

use serde::{Deserialize, Serialize};

use crate::economy::empire::EmpireId;
use crate::world::interaction::Interaction;
use crate::world::{MobId, SiteId};

/// Job a spawned workforce mob performs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum WorkerRole {
    Builder,
    Farmer,
    Feller,
    Repairman,
    Miner,
    Digger,
    Sawyer,
    Scraper,
    Smelter,
    Weaver,
    Gardener,
    FireBrigade,
    Trapper,
    Tanner,
    Shearer,
    CoinMaker,
    Miller,
    Presser,
    Crafter,
    Fisher,
    StumpBurner,
    Prospector,
    Laborer,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerRole::Builder => "builder",
            WorkerRole::Farmer => "farmer",
            WorkerRole::Feller => "feller",
            WorkerRole::Repairman => "repairman",
            WorkerRole::Miner => "miner",
            WorkerRole::Digger => "digger",
            WorkerRole::Sawyer => "sawyer",
            WorkerRole::Scraper => "scraper",
            WorkerRole::Smelter => "smelter",
            WorkerRole::Weaver => "weaver",
            WorkerRole::Gardener => "gardener",
            WorkerRole::FireBrigade => "fire brigadier",
            WorkerRole::Trapper => "trapper",
            WorkerRole::Tanner => "tanner",
            WorkerRole::Shearer => "shearer",
            WorkerRole::CoinMaker => "coin maker",
            WorkerRole::Miller => "miller",
            WorkerRole::Presser => "presser",
            WorkerRole::Crafter => "crafter",
            WorkerRole::Fisher => "fisher",
            WorkerRole::StumpBurner => "stump burner",
            WorkerRole::Prospector => "prospector",
            WorkerRole::Laborer => "laborer",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobKind {
    /// A citizen walking around its home building
    Citizen,
    Worker(WorkerRole),
    Animal,
}

/// Points a spawned mob back at the citizen slot it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitizenRef {
    pub home: SiteId,
    pub slot: usize,
}

/// A resident of a building who can be called up as a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citizen {
    pub name: String,
    pub mob: Option<MobId>,
}

impl Citizen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mob: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mob {
    pub id: MobId,
    pub kind: MobKind,
    pub owner: Option<EmpireId>,
    pub room: SiteId,
    pub citizen: Option<CitizenRef>,
    /// Hour the mob last worked a chore
    pub last_active: Option<u64>,
    pub fighting: bool,
    pub incapacitated: bool,
    pub fed_upon: bool,
    /// Finished its task and may be despawned
    pub despawn_ready: bool,
    /// Shear interactions for animals
    pub interactions: Vec<Interaction>,
    pub shear_ready_at: u64,
}

impl Mob {
    fn base(kind: MobKind, owner: Option<EmpireId>, room: SiteId) -> Self {
        Self {
            id: MobId(0),
            kind,
            owner,
            room,
            citizen: None,
            last_active: None,
            fighting: false,
            incapacitated: false,
            fed_upon: false,
            despawn_ready: false,
            interactions: Vec::new(),
            shear_ready_at: 0,
        }
    }

    pub fn worker(owner: EmpireId, role: WorkerRole, room: SiteId) -> Self {
        Self::base(MobKind::Worker(role), Some(owner), room)
    }

    pub fn citizen(owner: EmpireId, room: SiteId) -> Self {
        Self::base(MobKind::Citizen, Some(owner), room)
    }

    pub fn animal(room: SiteId) -> Self {
        Self::base(MobKind::Animal, None, room)
    }

    pub fn with_citizen(mut self, citizen: CitizenRef) -> Self {
        self.citizen = Some(citizen);
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    pub fn role(&self) -> Option<WorkerRole> {
        match self.kind {
            MobKind::Worker(role) => Some(role),
            _ => None,
        }
    }

    pub fn is_worker(&self) -> bool {
        matches!(self.kind, MobKind::Worker(_))
    }

    /// Can take an order right now
    pub fn is_able(&self) -> bool {
        !self.fighting && !self.incapacitated && !self.fed_upon
    }

    pub fn worked_at(&self, hour: u64) -> bool {
        self.last_active == Some(hour)
    }
}
