use bevy::prelude::*;
use thiserror::Error;

use crate::economy::empire::EmpireId;
use crate::economy::goods::ResourceId;
use crate::workforce::chore::{Chore, ChoreSetting};
use crate::world::{ChoreLocation, IslandId, MobId, SectorId, SiteId};

/// Admin command: switch a chore on, off, or to a limit on one island.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetChoreSetting {
    pub empire: EmpireId,
    pub island: IslandId,
    pub chore: Chore,
    pub setting: ChoreSetting,
}

/// Admin command: set or clear an empire-wide production limit.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetProductionLimit {
    pub empire: EmpireId,
    pub resource: ResourceId,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCommand {
    ChoreSetting(SetChoreSetting),
    ProductionLimit(SetProductionLimit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkforceError {
    #[error("{0} does not exist")]
    UnknownEmpire(EmpireId),
    #[error("{0} does not exist")]
    UnknownIsland(IslandId),
    #[error("{0} can only be turned on or off")]
    NotLimitable(Chore),
    #[error("no object {0} to limit")]
    UnknownResource(ResourceId),
}

impl WorkforceError {
    pub fn describe(self) -> &'static str {
        match self {
            WorkforceError::UnknownEmpire(_) => "empire not found",
            WorkforceError::UnknownIsland(_) => "island not found",
            WorkforceError::NotLimitable(_) => "chore only accepts on or off",
            WorkforceError::UnknownResource(_) => "resource not found",
        }
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitCommandRejected {
    pub command: LimitCommand,
    pub reason: WorkforceError,
}

/// Things the workforce did that the rest of the game may react to
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkforceEvent {
    WorkerPlaced {
        empire: EmpireId,
        worker: MobId,
        chore: Chore,
        location: ChoreLocation,
    },
    BuildingFinished {
        location: ChoreLocation,
    },
    MaintenanceFinished {
        location: ChoreLocation,
    },
    DismantleStarted {
        location: ChoreLocation,
    },
    DismantleFinished {
        location: ChoreLocation,
    },
    FireExtinguished {
        location: ChoreLocation,
    },
    SectorChanged {
        site: SiteId,
        from: SectorId,
        to: SectorId,
    },
    MineFound {
        site: SiteId,
        ore: ResourceId,
        amount: u32,
    },
    RoomAbandoned {
        empire: EmpireId,
        site: SiteId,
    },
    ReportReady {
        empire: EmpireId,
        hour: u64,
    },
}
