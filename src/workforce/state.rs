use std::collections::VecDeque;

use crate::workforce::delay::DelayLedger;
use crate::workforce::needs::WorkforceNeeds;
use crate::workforce::problems::{ProblemLog, WhereLog};
use crate::workforce::production_log::{ProductionLog, ProductionReport};
use crate::workforce::tracker::CapTracker;

/// Workforce bookkeeping carried by each empire
#[derive(Debug, Clone, Default)]
pub struct EmpireWorkforce {
    /// Exists only while a cycle runs
    pub tracker: Option<CapTracker>,
    pub delays: DelayLedger,
    pub problems: ProblemLog,
    pub where_log: WhereLog,
    pub production: ProductionLog,
    pub needs: WorkforceNeeds,
    pub reports: VecDeque<ProductionReport>,
}

impl EmpireWorkforce {
    /// Resets the per-cycle views before the empire's sites are visited.
    pub fn begin_cycle(&mut self) {
        self.tracker = None;
        self.problems.clear();
        self.where_log.clear();
    }

    pub fn end_cycle(&mut self) {
        self.tracker = None;
    }

    pub fn push_report(&mut self, report: ProductionReport, keep: usize) {
        self.reports.push_back(report);
        while self.reports.len() > keep {
            self.reports.pop_front();
        }
    }
}
