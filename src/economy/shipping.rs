use serde::{Deserialize, Serialize};

use crate::economy::goods::ResourceId;
use crate::world::IslandId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Waiting at the origin dock
    Queued,
    /// Loaded and on its way
    Shipped,
}

/// Goods moving between two of an empire's islands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub vnum: ResourceId,
    pub amount: u32,
    pub from_island: IslandId,
    pub to_island: IslandId,
    pub status: ShipmentStatus,
}

impl Shipment {
    /// Island the goods count against: the origin until they leave, the
    /// destination afterwards
    pub fn counted_island(&self) -> IslandId {
        match self.status {
            ShipmentStatus::Queued => self.from_island,
            ShipmentStatus::Shipped => self.to_island,
        }
    }
}
