use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::economy::goods::ResourceId;
use crate::economy::shipping::Shipment;
use crate::economy::storage::EmpireStorage;
use crate::economy::technology::{Technologies, Technology};
use crate::economy::treasury::Treasury;
use crate::workforce::chore::ChoreSettings;
use crate::workforce::state::EmpireWorkforce;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct EmpireId(pub u32);

impl fmt::Display for EmpireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "empire {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Empire {
    pub id: EmpireId,
    pub name: String,
    /// Active members; scales the per-resource cap
    pub members: u32,
    /// Hour of the last member activity
    pub last_activity: u64,
    pub allies: BTreeSet<EmpireId>,
    pub technologies: Technologies,
    pub treasury: Treasury,
    pub storage: EmpireStorage,
    pub shipping: Vec<Shipment>,
    /// Flat bonus added to the per-resource cap
    pub workforce_cap_bonus: u32,
    pub chore_settings: ChoreSettings,
    /// Empire-wide ceilings per resource
    pub production_limits: BTreeMap<ResourceId, u32>,
    pub workforce: EmpireWorkforce,
}

impl Empire {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EmpireId(0),
            name: name.into(),
            members: 1,
            last_activity: 0,
            allies: BTreeSet::new(),
            technologies: Technologies::new(),
            treasury: Treasury::default(),
            storage: EmpireStorage::default(),
            shipping: Vec::new(),
            workforce_cap_bonus: 0,
            chore_settings: ChoreSettings::default(),
            production_limits: BTreeMap::new(),
            workforce: EmpireWorkforce::default(),
        }
    }

    pub fn with_technology(mut self, tech: Technology) -> Self {
        self.technologies.unlock(tech);
        self
    }

    pub fn with_members(mut self, members: u32) -> Self {
        self.members = members;
        self
    }

    pub fn has_tech(&self, tech: Technology) -> bool {
        self.technologies.has(tech)
    }

    pub fn is_allied_with(&self, other: EmpireId) -> bool {
        self.allies.contains(&other)
    }
}
