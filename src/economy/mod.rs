//! Empire-level economic state: goods, storage, recipes, coin and tech.

pub mod empire;
pub mod goods;
pub mod recipe;
pub mod shipping;
pub mod storage;
pub mod technology;
pub mod treasury;

pub use empire::{Empire, EmpireId};
pub use goods::{ComponentKind, ObjectProto, ResourceId};
pub use recipe::{CraftKind, Recipe};
pub use shipping::{Shipment, ShipmentStatus};
pub use storage::{EmpireStorage, IslandStorage};
pub use technology::{Technologies, Technology};
pub use treasury::Treasury;
