use std::collections::BTreeMap;

use crate::workforce::chore::Chore;
use crate::workforce::problems::WorkforceProblem;
use crate::world::ChoreLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayEntry {
    pub remaining: u32,
    pub reason: WorkforceProblem,
}

/// Backoff for (location, chore) pairs that recently failed
#[derive(Debug, Clone, Default)]
pub struct DelayLedger {
    entries: BTreeMap<(ChoreLocation, Chore), DelayEntry>,
}

impl DelayLedger {
    /// Counts one cycle off an existing delay. Returns the blocking reason if
    /// the chore should sit this cycle out.
    pub fn consult(&mut self, location: ChoreLocation, chore: Chore) -> Option<WorkforceProblem> {
        let key = (location, chore);
        let entry = self.entries.get_mut(&key)?;
        let reason = entry.reason;
        entry.remaining = entry.remaining.saturating_sub(1);
        if entry.remaining == 0 {
            self.entries.remove(&key);
        }
        Some(reason)
    }

    pub fn mark(&mut self, location: ChoreLocation, chore: Chore, reason: WorkforceProblem, cycles: u32) {
        if cycles == 0 {
            return;
        }
        self.entries.insert(
            (location, chore),
            DelayEntry {
                remaining: cycles,
                reason,
            },
        );
    }

    /// Drops the delay once the chore succeeds. Returns true if one existed.
    pub fn clear(&mut self, location: ChoreLocation, chore: Chore) -> bool {
        self.entries.remove(&(location, chore)).is_some()
    }

    pub fn get(&self, location: ChoreLocation, chore: Chore) -> Option<&DelayEntry> {
        self.entries.get(&(location, chore))
    }

    /// Forgets every delay at a location that no longer exists or changed hands
    pub fn forget_location(&mut self, location: ChoreLocation) {
        self.entries.retain(|(loc, _), _| *loc != location);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SiteId;

    #[test]
    fn countdown_strictly_decreases_then_expires() {
        let mut ledger = DelayLedger::default();
        let here = ChoreLocation::Room(SiteId(3));
        ledger.mark(here, Chore::Mining, WorkforceProblem::OverLimit, 3);

        let mut seen = Vec::new();
        while let Some(reason) = ledger.consult(here, Chore::Mining) {
            assert_eq!(reason, WorkforceProblem::OverLimit);
            seen.push(ledger.get(here, Chore::Mining).map(|e| e.remaining));
        }
        assert_eq!(seen, vec![Some(2), Some(1), None]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn delays_are_keyed_by_location_and_chore() {
        let mut ledger = DelayLedger::default();
        let a = ChoreLocation::Room(SiteId(1));
        let b = ChoreLocation::Room(SiteId(2));
        ledger.mark(a, Chore::Chopping, WorkforceProblem::NoWorkers, 2);

        assert!(ledger.consult(b, Chore::Chopping).is_none());
        assert!(ledger.consult(a, Chore::Mining).is_none());
        assert!(ledger.clear(a, Chore::Chopping));
        assert!(!ledger.clear(a, Chore::Chopping));
    }

    #[test]
    fn zero_length_delay_is_ignored() {
        let mut ledger = DelayLedger::default();
        ledger.mark(ChoreLocation::Room(SiteId(1)), Chore::Fishing, WorkforceProblem::Depleted, 0);
        assert!(ledger.is_empty());
    }
}
