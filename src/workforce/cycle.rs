//! The hourly workforce cycle.

use bevy::prelude::*;

use crate::economy::empire::EmpireId;
use crate::economy::technology::Technology;
use crate::messages::workforce::WorkforceEvent;
use crate::workforce::allocator::despawn_idle_workers;
use crate::workforce::dispatch::{process_room_chores, process_vehicle_chores};
use crate::workforce::production_log::ProductionKind;
use crate::world::ChoreWorld;

impl ChoreWorld {
    /// Advances the clock one hour and runs the workforce for it.
    pub fn run_cycle(&mut self) {
        let next = self.hour + 1;
        self.run_cycle_at(next);
    }

    /// Runs the workforce for `hour`. Empires are visited in id order, each
    /// one's rooms before its vehicles.
    pub fn run_cycle_at(&mut self, hour: u64) {
        self.hour = hour;

        let empires: Vec<EmpireId> = self.empires.keys().copied().collect();
        for empire in empires {
            self.run_empire_cycle(empire);
        }

        despawn_idle_workers(self);
    }

    /// Whether the empire takes part in this hour's cycle
    pub fn is_workforce_active(&self, empire: EmpireId) -> bool {
        self.empire(empire).is_some_and(|emp| {
            emp.has_tech(Technology::Workforce)
                && self.hour.saturating_sub(emp.last_activity) <= self.config.stale_after_hours
        })
    }

    fn run_empire_cycle(&mut self, empire: EmpireId) {
        if !self.is_workforce_active(empire) {
            return;
        }
        if let Some(emp) = self.empire_mut(empire) {
            emp.workforce.begin_cycle();
            emp.storage.sort_largest_first();
        }

        let rooms = self.territory(empire);
        let vehicles = self.owned_vehicles(empire);
        debug!(
            "Workforce cycle for {}: {} rooms, {} vehicles",
            empire,
            rooms.len(),
            vehicles.len()
        );
        for site in rooms {
            process_room_chores(self, empire, site);
        }
        for vehicle in vehicles {
            process_vehicle_chores(self, empire, vehicle);
        }

        let hour = self.hour;
        let report_due = hour % 24 == self.config.report_hour;
        let keep = self.config.report_history;
        let catalog = &self.catalog;
        let Some(emp) = self.empires.get_mut(&empire) else {
            return;
        };

        emp.workforce.end_cycle();
        let eaten = emp.workforce.needs.flush(&mut emp.storage, catalog);
        for (vnum, qty) in eaten {
            emp.workforce.production.add(ProductionKind::Consumed, vnum, qty);
        }

        if !report_due {
            return;
        }
        let report = emp.workforce.production.flush(hour);
        info!(
            "Workforce report for {}: {} lines",
            emp.name,
            report.lines.len()
        );
        emp.workforce.push_report(report, keep);
        self.emit(WorkforceEvent::ReportReady { empire, hour });
    }
}
