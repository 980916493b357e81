use std::collections::BTreeMap;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::economy::goods::ResourceId;
use crate::world::{ChoreLocation, ChoreWorld, MobId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum InteractionKind {
    Harvest,
    Chop,
    Dig,
    Fish,
    FindHerb,
    Trap,
    Shear,
    Scrape,
    Tan,
    Saw,
    Production,
    SkilledLabor,
}

/// One possible outcome of working a sector, building, vehicle, animal or item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub vnum: ResourceId,
    pub quantity: u32,
    /// Chance in percent, 0.0..=100.0
    pub percent: f64,
    /// Interactions sharing a code are mutually exclusive within one run
    #[serde(default)]
    pub exclusion: Option<char>,
}

impl Interaction {
    pub fn new(kind: InteractionKind, vnum: ResourceId, quantity: u32) -> Self {
        Self {
            kind,
            vnum,
            quantity,
            percent: 100.0,
            exclusion: None,
        }
    }

    pub fn with_percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    pub fn exclusive(mut self, code: char) -> Self {
        self.exclusion = Some(code);
        self
    }
}

pub fn has_interaction(list: &[Interaction], kind: InteractionKind) -> bool {
    list.iter().any(|interaction| interaction.kind == kind)
}

#[derive(Debug, Clone, Copy)]
struct ExclusionEntry {
    roll: f64,
    done: bool,
}

/// Tracks exclusion codes for a single interaction run. Each code rolls once;
/// every interaction in the code subtracts its share until one wins.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    entries: BTreeMap<char, ExclusionEntry>,
}

impl ExclusionSet {
    pub fn check(&mut self, rng: &mut impl Rng, code: Option<char>, percent: f64) -> bool {
        let Some(code) = code else {
            return rng.random_range(0.0..100.0) < percent;
        };

        let entry = self.entries.entry(code).or_insert_with(|| ExclusionEntry {
            roll: rng.random_range(0.0..100.0),
            done: false,
        });
        if entry.done {
            return false;
        }
        if entry.roll < percent {
            entry.done = true;
            true
        } else {
            entry.roll -= percent;
            false
        }
    }
}

/// Rolls every interaction of `kind` in `interactions` and hands each success
/// to `apply`. Returns true if any application succeeded.
pub fn run_interactions(
    world: &mut ChoreWorld,
    worker: MobId,
    location: ChoreLocation,
    interactions: &[Interaction],
    kind: InteractionKind,
    mut apply: impl FnMut(&mut ChoreWorld, &Interaction) -> bool,
) -> bool {
    let mut exclusion = ExclusionSet::default();
    let mut any = false;

    for interaction in interactions.iter().filter(|i| i.kind == kind) {
        if !exclusion.check(&mut world.rng, interaction.exclusion, interaction.percent) {
            continue;
        }
        if apply(world, interaction) {
            debug!(
                "Worker {} at {} got {}x {} from {:?}",
                worker.0, location, interaction.quantity, interaction.vnum, kind
            );
            any = true;
        }
    }

    any
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn certain_interactions_always_fire() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut set = ExclusionSet::default();
        for _ in 0..50 {
            assert!(set.check(&mut rng, None, 100.0));
        }
        assert!(!set.check(&mut rng, None, 0.0));
    }

    #[test]
    fn exclusion_code_fires_at_most_once() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let mut set = ExclusionSet::default();
            let hits = (0..4)
                .filter(|_| set.check(&mut rng, Some('a'), 25.0))
                .count();
            // four 25% shares of one roll: exactly one wins
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn separate_codes_roll_independently() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut set = ExclusionSet::default();
        assert!(set.check(&mut rng, Some('a'), 100.0));
        assert!(set.check(&mut rng, Some('b'), 100.0));
        assert!(!set.check(&mut rng, Some('a'), 100.0));
    }

    #[test]
    fn run_interactions_filters_by_kind() {
        let mut world = ChoreWorld::default();
        let list = vec![
            Interaction::new(InteractionKind::Fish, ResourceId(1), 1),
            Interaction::new(InteractionKind::Dig, ResourceId(2), 1),
            Interaction::new(InteractionKind::Fish, ResourceId(3), 2),
        ];

        let mut seen = Vec::new();
        let any = run_interactions(
            &mut world,
            MobId(1),
            ChoreLocation::Room(crate::world::SiteId(1)),
            &list,
            InteractionKind::Fish,
            |_, interaction| {
                seen.push(interaction.vnum);
                true
            },
        );

        assert!(any);
        assert_eq!(seen, vec![ResourceId(1), ResourceId(3)]);
    }

    #[test]
    fn run_interactions_reports_failed_applications() {
        let mut world = ChoreWorld::default();
        let list = vec![Interaction::new(InteractionKind::Chop, ResourceId(9), 1)];

        let any = run_interactions(
            &mut world,
            MobId(1),
            ChoreLocation::Room(crate::world::SiteId(1)),
            &list,
            InteractionKind::Chop,
            |_, _| false,
        );
        assert!(!any);
    }
}
