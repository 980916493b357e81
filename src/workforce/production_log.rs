use std::collections::BTreeMap;

use crate::economy::goods::ResourceId;
use crate::world::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum ProductionKind {
    Produced,
    Consumed,
    /// Coins struck from an object
    Minted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionLine {
    pub kind: ProductionKind,
    pub vnum: ResourceId,
    pub amount: u32,
}

/// Running totals of what the workforce made and used since the last report
#[derive(Debug, Clone, Default)]
pub struct ProductionLog {
    entries: BTreeMap<(ProductionKind, ResourceId), u32>,
}

impl ProductionLog {
    pub fn add(&mut self, kind: ProductionKind, vnum: ResourceId, amount: u32) {
        if amount > 0 {
            *self.entries.entry((kind, vnum)).or_default() += amount;
        }
    }

    pub fn amount(&self, kind: ProductionKind, vnum: ResourceId) -> u32 {
        self.entries.get(&(kind, vnum)).copied().unwrap_or(0)
    }

    pub fn lines(&self) -> impl Iterator<Item = ProductionLine> + '_ {
        self.entries
            .iter()
            .map(|(&(kind, vnum), &amount)| ProductionLine { kind, vnum, amount })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the log into a report stamped with `hour`
    pub fn flush(&mut self, hour: u64) -> ProductionReport {
        let lines = self.lines().collect();
        self.entries.clear();
        ProductionReport { hour, lines }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionReport {
    pub hour: u64,
    pub lines: Vec<ProductionLine>,
}

impl ProductionReport {
    pub fn render(&self, catalog: &Catalog) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                let name = catalog.object_name(line.vnum);
                match line.kind {
                    ProductionKind::Produced => format!("produced {}x {}", line.amount, name),
                    ProductionKind::Consumed => format!("used {}x {}", line.amount, name),
                    ProductionKind::Minted => format!("minted {} coins from {}", line.amount, name),
                }
            })
            .collect()
    }
}
