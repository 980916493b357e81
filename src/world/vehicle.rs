use std::collections::BTreeSet;

use crate::economy::empire::EmpireId;
use crate::world::sector::Climate;
use crate::world::site::Workplace;
use crate::world::{SiteId, VehicleId};

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub owner: Option<EmpireId>,
    /// Room the vehicle is parked in
    pub room: SiteId,
    /// Removed from the world but not yet freed
    pub extracted: bool,
    pub workplace: Workplace,
    /// Climates the vehicle can work in; empty means any
    pub climates: BTreeSet<Climate>,
    /// The owner turned its workforce off by hand
    pub player_disabled: bool,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, room: SiteId) -> Self {
        Self {
            id: VehicleId(0),
            name: name.into(),
            owner: None,
            room,
            extracted: false,
            workplace: Workplace::default(),
            climates: BTreeSet::new(),
            player_disabled: false,
        }
    }

    pub fn owned_by(mut self, empire: EmpireId) -> Self {
        self.owner = Some(empire);
        self
    }

    pub fn with_workplace(mut self, workplace: Workplace) -> Self {
        self.workplace = workplace;
        self
    }

    pub fn allowed_in(mut self, climate: Climate) -> Self {
        self.climates.insert(climate);
        self
    }

    pub fn works_in(&self, climate: Climate) -> bool {
        self.climates.is_empty() || self.climates.contains(&climate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_climate_list_allows_anything() {
        let wagon = Vehicle::new("wagon", SiteId(1));
        assert!(wagon.works_in(Climate::Arid));

        let sled = Vehicle::new("sled", SiteId(1)).allowed_in(Climate::Tundra);
        assert!(sled.works_in(Climate::Tundra));
        assert!(!sled.works_in(Climate::Tropical));
    }
}
