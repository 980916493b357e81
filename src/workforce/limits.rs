//! Administrative access to an empire's workforce: chore settings,
//! production limits and the player-facing logs.

use bevy::prelude::*;

use crate::economy::empire::{Empire, EmpireId};
use crate::economy::goods::ResourceId;
use crate::messages::workforce::WorkforceError;
use crate::workforce::allocator::deactivate_workforce;
use crate::workforce::chore::{Chore, ChoreSetting};
use crate::workforce::problems::{ProblemEntry, WhereEntry};
use crate::workforce::production_log::{ProductionLine, ProductionReport};
use crate::world::{ChoreWorld, IslandId};

impl ChoreWorld {
    fn known_empire(&self, empire: EmpireId) -> Result<&Empire, WorkforceError> {
        self.empire(empire).ok_or(WorkforceError::UnknownEmpire(empire))
    }

    pub fn chore_setting(
        &self,
        empire: EmpireId,
        island: IslandId,
        chore: Chore,
    ) -> Result<ChoreSetting, WorkforceError> {
        Ok(self.known_empire(empire)?.chore_settings.get(island, chore))
    }

    /// Switches a chore on one island. Turning a chore off sends home the
    /// empire's workers doing it.
    pub fn set_chore_setting(
        &mut self,
        empire: EmpireId,
        island: IslandId,
        chore: Chore,
        setting: ChoreSetting,
    ) -> Result<(), WorkforceError> {
        self.known_empire(empire)?;
        if !self.has_island(island) {
            return Err(WorkforceError::UnknownIsland(island));
        }
        if chore.is_option() && matches!(setting, ChoreSetting::Limit(_)) {
            return Err(WorkforceError::NotLimitable(chore));
        }

        if let Some(emp) = self.empire_mut(empire) {
            emp.chore_settings.set(island, chore, setting);
        }
        if setting == ChoreSetting::Off {
            let sent_home = deactivate_workforce(self, empire, chore);
            debug!("Turned off {} for {} on {}, sent {} home", chore, empire, island, sent_home);
        }
        Ok(())
    }

    pub fn production_limit(&self, empire: EmpireId, resource: ResourceId) -> Result<Option<u32>, WorkforceError> {
        Ok(self
            .known_empire(empire)?
            .production_limits
            .get(&resource)
            .copied())
    }

    /// Sets or, with `None`, clears the empire-wide ceiling for `resource`.
    pub fn set_production_limit(
        &mut self,
        empire: EmpireId,
        resource: ResourceId,
        limit: Option<u32>,
    ) -> Result<(), WorkforceError> {
        self.known_empire(empire)?;
        if self.catalog.object(resource).is_none() {
            return Err(WorkforceError::UnknownResource(resource));
        }
        if let Some(emp) = self.empire_mut(empire) {
            match limit {
                Some(limit) => emp.production_limits.insert(resource, limit),
                None => emp.production_limits.remove(&resource),
            };
        }
        Ok(())
    }

    /// Why the workforce didn't work last cycle
    pub fn problem_log(&self, empire: EmpireId) -> Result<&[ProblemEntry], WorkforceError> {
        Ok(self.known_empire(empire)?.workforce.problems.entries())
    }

    /// Who worked where last cycle
    pub fn where_log(&self, empire: EmpireId) -> Result<&[WhereEntry], WorkforceError> {
        Ok(self.known_empire(empire)?.workforce.where_log.entries())
    }

    /// What the workforce made since the last report
    pub fn production_log(&self, empire: EmpireId) -> Result<Vec<ProductionLine>, WorkforceError> {
        Ok(self.known_empire(empire)?.workforce.production.lines().collect())
    }

    pub fn reports(&self, empire: EmpireId) -> Result<Vec<&ProductionReport>, WorkforceError> {
        Ok(self.known_empire(empire)?.workforce.reports.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::world::WorkerRole;

    #[test]
    fn settings_round_trip_and_validate() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        spawn_test_site(&mut world, empire, IslandId(1), (0, 0));

        world
            .set_chore_setting(empire, IslandId(1), Chore::Mining, ChoreSetting::Limit(100))
            .unwrap();
        assert_eq!(
            world.chore_setting(empire, IslandId(1), Chore::Mining),
            Ok(ChoreSetting::Limit(100))
        );
        assert_eq!(
            world.chore_setting(empire, IslandId(1), Chore::Farming),
            Ok(ChoreSetting::Off)
        );

        assert_eq!(
            world.set_chore_setting(empire, IslandId(9), Chore::Mining, ChoreSetting::On),
            Err(WorkforceError::UnknownIsland(IslandId(9)))
        );
        assert_eq!(
            world.set_chore_setting(empire, IslandId(1), Chore::Replanting, ChoreSetting::Limit(5)),
            Err(WorkforceError::NotLimitable(Chore::Replanting))
        );
        assert_eq!(
            world.chore_setting(EmpireId(42), IslandId(1), Chore::Mining),
            Err(WorkforceError::UnknownEmpire(EmpireId(42)))
        );
    }

    #[test]
    fn turning_a_chore_off_sends_its_workers_home() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");
        let site = spawn_test_site(&mut world, empire, IslandId(1), (0, 0));
        let miner = spawn_test_worker(&mut world, empire, site, WorkerRole::Miner);
        let farmer = spawn_test_worker(&mut world, empire, site, WorkerRole::Farmer);
        enable_chore(&mut world, empire, IslandId(1), Chore::Mining);

        world
            .set_chore_setting(empire, IslandId(1), Chore::Mining, ChoreSetting::Off)
            .unwrap();

        assert!(world.mob(miner).is_none());
        assert!(world.mob(farmer).is_some());
    }

    #[test]
    fn production_limits_need_a_known_resource() {
        let mut world = create_test_world();
        let empire = spawn_test_empire(&mut world, "Aldmark");

        world.set_production_limit(empire, IRON_ORE, Some(50)).unwrap();
        assert_eq!(world.production_limit(empire, IRON_ORE), Ok(Some(50)));

        world.set_production_limit(empire, IRON_ORE, None).unwrap();
        assert_eq!(world.production_limit(empire, IRON_ORE), Ok(None));

        assert_eq!(
            world.set_production_limit(empire, ResourceId(999), Some(1)),
            Err(WorkforceError::UnknownResource(ResourceId(999)))
        );
    }
}
