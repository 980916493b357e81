use std::collections::HashMap;

use crate::workforce::chore::Chore;
use crate::world::{ChoreLocation, MobId};

/// Why a chore did nothing this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum WorkforceProblem {
    NoWorkers,
    NoResources,
    Depleted,
    OverLimit,
    AdventureInstance,
    OutOfCity,
    Delayed,
}

impl WorkforceProblem {
    pub fn describe(&self) -> &'static str {
        match self {
            WorkforceProblem::NoWorkers => "no citizens available to work",
            WorkforceProblem::NoResources => "out of resources",
            WorkforceProblem::Depleted => "resources depleted",
            WorkforceProblem::OverLimit => "already has enough of the resource",
            WorkforceProblem::AdventureInstance => "an adventure is in the way",
            WorkforceProblem::OutOfCity => "must be in a city",
            WorkforceProblem::Delayed => "delayed after an earlier failure",
        }
    }

    /// Problems that put the chore on backoff
    pub fn delays(&self) -> bool {
        matches!(
            self,
            WorkforceProblem::NoWorkers
                | WorkforceProblem::NoResources
                | WorkforceProblem::Depleted
                | WorkforceProblem::OverLimit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemEntry {
    pub location: ChoreLocation,
    pub chore: Chore,
    pub problem: WorkforceProblem,
    pub count: u32,
}

/// "Why isn't my workforce working": one entry per (location, chore,
/// problem) per cycle, counting repeats.
#[derive(Debug, Clone, Default)]
pub struct ProblemLog {
    entries: Vec<ProblemEntry>,
    index: HashMap<(ChoreLocation, Chore, WorkforceProblem), usize>,
}

impl ProblemLog {
    pub fn log(&mut self, location: ChoreLocation, chore: Chore, problem: WorkforceProblem) {
        let key = (location, chore, problem);
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].count += 1;
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(ProblemEntry {
            location,
            chore,
            problem,
            count: 1,
        });
    }

    pub fn entries(&self) -> &[ProblemEntry] {
        &self.entries
    }

    pub fn count_for(
        &self,
        location: ChoreLocation,
        chore: Chore,
        problem: WorkforceProblem,
    ) -> u32 {
        self.index
            .get(&(location, chore, problem))
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    pub fn has(&self, location: ChoreLocation, chore: Chore, problem: WorkforceProblem) -> bool {
        self.count_for(location, chore, problem) > 0
    }

    pub fn at(&self, location: ChoreLocation) -> impl Iterator<Item = &ProblemEntry> {
        self.entries.iter().filter(move |e| e.location == location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhereEntry {
    pub worker: MobId,
    pub chore: Chore,
    pub location: ChoreLocation,
}

/// "Where is my workforce working" for the current cycle
#[derive(Debug, Clone, Default)]
pub struct WhereLog(pub Vec<WhereEntry>);

impl WhereLog {
    pub fn push(&mut self, worker: MobId, chore: Chore, location: ChoreLocation) {
        self.0.push(WhereEntry {
            worker,
            chore,
            location,
        });
    }

    pub fn entries(&self) -> &[WhereEntry] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
