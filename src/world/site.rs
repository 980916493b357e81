use std::collections::{BTreeMap, BTreeSet, VecDeque};

use hexx::Hex;
use serde::{Deserialize, Serialize};

use crate::economy::empire::EmpireId;
use crate::economy::goods::{ComponentKind, ResourceId};
use crate::world::interaction::{Interaction, InteractionKind, has_interaction};
use crate::world::mob::{Citizen, WorkerRole};
use crate::world::{IslandId, SectorId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstructionState {
    #[default]
    Complete,
    Incomplete,
    Dismantling,
}

/// What a resource requirement asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementKind {
    Object(ResourceId),
    Component(ComponentKind),
    /// Needs a player to perform an action; the workforce can't help
    Action(u32),
    Tool(u32),
    Currency,
    Pool(u32),
    Liquid(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub amount: u32,
}

impl Requirement {
    pub fn object(vnum: ResourceId, amount: u32) -> Self {
        Self {
            kind: RequirementKind::Object(vnum),
            amount,
        }
    }

    pub fn component(kind: ComponentKind, amount: u32) -> Self {
        Self {
            kind: RequirementKind::Component(kind),
            amount,
        }
    }

    /// Only object and component requirements can be paid from storage
    pub fn is_storable(&self) -> bool {
        matches!(
            self.kind,
            RequirementKind::Object(_) | RequirementKind::Component(_)
        )
    }
}

/// Building and vehicle functions that unlock workforce chores
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum SiteFunction {
    Mine,
    Mint,
    Stable,
    Mill,
    Press,
    Smelter,
    Tailor,
    LumberYard,
    Tannery,
    TrappersPost,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum DepletionKind {
    Dig,
    Fish,
    Pick,
    Trapping,
    Production,
}

/// The part of a room or vehicle the workforce builds, repairs and operates
#[derive(Debug, Clone, Default)]
pub struct Workplace {
    pub construction: ConstructionState,
    /// Remaining build, repair or refund list, worked front to back
    pub requirements: VecDeque<Requirement>,
    /// Objects paid in while building; becomes the refund list when dismantled
    pub built_with: Vec<Requirement>,
    pub damage: u32,
    /// Extinguish progress while burning
    pub fire: Option<u32>,
    pub functions: BTreeSet<SiteFunction>,
    pub interactions: Vec<Interaction>,
    pub depletion: BTreeMap<DepletionKind, u32>,
    /// Per-site overrides of the configured depletion limits
    pub depletion_limits: BTreeMap<DepletionKind, u32>,
    pub no_work: bool,
    pub no_dismantle: bool,
    /// Dedicated worker type that staffs this building
    pub artisan: Option<WorkerRole>,
}

impl Workplace {
    pub fn with_function(mut self, function: SiteFunction) -> Self {
        self.functions.insert(function);
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    pub fn with_artisan(mut self, role: WorkerRole) -> Self {
        self.artisan = Some(role);
        self
    }

    /// Starts construction with `requirements` still to be paid.
    pub fn under_construction(mut self, requirements: Vec<Requirement>) -> Self {
        self.construction = ConstructionState::Incomplete;
        self.built_with.clear();
        self.requirements = requirements.into();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.construction == ConstructionState::Complete
    }

    pub fn is_dismantling(&self) -> bool {
        self.construction == ConstructionState::Dismantling
    }

    pub fn is_burning(&self) -> bool {
        self.fire.is_some()
    }

    pub fn set_on_fire(&mut self) {
        self.fire.get_or_insert(0);
    }

    pub fn needs_maintenance(&self) -> bool {
        self.is_complete() && (self.damage > 0 || !self.requirements.is_empty())
    }

    pub fn has_function(&self, function: SiteFunction) -> bool {
        self.functions.contains(&function)
    }

    pub fn has_interaction(&self, kind: InteractionKind) -> bool {
        has_interaction(&self.interactions, kind)
    }

    pub fn depletion(&self, kind: DepletionKind) -> u32 {
        self.depletion.get(&kind).copied().unwrap_or(0)
    }

    pub fn add_depletion(&mut self, kind: DepletionKind, amount: u32) {
        *self.depletion.entry(kind).or_default() += amount;
    }
}

/// Ore deposit found by prospecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineDeposit {
    pub ore: ResourceId,
    pub remaining: u32,
    pub per_strike: u32,
}

/// Loose items lying in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundItem {
    pub vnum: ResourceId,
    pub amount: u32,
    pub owner: Option<EmpireId>,
}

/// A map room that can be claimed as territory
#[derive(Debug, Clone)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub island: IslandId,
    pub position: Hex,
    pub owner: Option<EmpireId>,
    pub sector: SectorId,
    pub has_building: bool,
    pub workplace: Workplace,
    pub requires_city: bool,
    pub in_city: bool,
    /// An adventure instance is loaded here
    pub instance_present: bool,
    pub citizens: Vec<Citizen>,
    pub mine: Option<MineDeposit>,
    pub prospected_by: Option<EmpireId>,
    pub chop_progress: u32,
    pub harvest_progress: i32,
    /// Hours until a replanted field can be harvested
    pub seed_hours: u32,
    pub ground: Vec<GroundItem>,
}

impl Site {
    pub fn new(name: impl Into<String>, island: IslandId, position: Hex, sector: SectorId) -> Self {
        Self {
            id: SiteId(0),
            name: name.into(),
            island,
            position,
            owner: None,
            sector,
            has_building: false,
            workplace: Workplace::default(),
            requires_city: false,
            in_city: false,
            instance_present: false,
            citizens: Vec::new(),
            mine: None,
            prospected_by: None,
            chop_progress: 0,
            harvest_progress: 0,
            seed_hours: 0,
            ground: Vec::new(),
        }
    }

    pub fn owned_by(mut self, empire: EmpireId) -> Self {
        self.owner = Some(empire);
        self
    }

    pub fn with_building(mut self, workplace: Workplace) -> Self {
        self.has_building = true;
        self.workplace = workplace;
        self
    }

    pub fn with_citizens(mut self, count: usize) -> Self {
        for i in 0..count {
            self.citizens.push(Citizen::new(format!("citizen {}", i + 1)));
        }
        self
    }

    pub fn with_mine(mut self, deposit: MineDeposit) -> Self {
        self.mine = Some(deposit);
        self
    }

    pub fn mine_remaining(&self) -> u32 {
        self.mine.map(|m| m.remaining).unwrap_or(0)
    }
}
