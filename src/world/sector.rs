use serde::{Deserialize, Serialize};

use crate::world::interaction::{Interaction, InteractionKind, has_interaction};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct SectorId(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
pub enum Climate {
    #[default]
    Temperate,
    Arid,
    Tropical,
    Tundra,
    Mountain,
    Water,
}

/// Crop data for farmable sectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropInfo {
    pub name: String,
    /// Orchards take twice as long and are picked until depleted
    pub orchard: bool,
    /// Sector a fresh replanting turns the site into
    pub seeded: Option<SectorId>,
    /// Sector left behind when the field is not replanted
    pub fallow: SectorId,
}

/// Terrain type of a map room
#[derive(Debug, Clone)]
pub struct SectorProto {
    pub id: SectorId,
    pub name: String,
    pub climate: Climate,
    pub interactions: Vec<Interaction>,
    /// Sector left after a chopping pass
    pub chopped_into: Option<SectorId>,
    /// Sector left after burning stumps
    pub burns_into: Option<SectorId>,
    pub crop: Option<CropInfo>,
    pub mineable: bool,
}

impl SectorProto {
    pub fn new(id: SectorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            climate: Climate::default(),
            interactions: Vec::new(),
            chopped_into: None,
            burns_into: None,
            crop: None,
            mineable: false,
        }
    }

    pub fn with_climate(mut self, climate: Climate) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    pub fn chops_into(mut self, sector: SectorId) -> Self {
        self.chopped_into = Some(sector);
        self
    }

    pub fn burns_into(mut self, sector: SectorId) -> Self {
        self.burns_into = Some(sector);
        self
    }

    pub fn with_crop(mut self, crop: CropInfo) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn mineable(mut self) -> Self {
        self.mineable = true;
        self
    }

    pub fn is_choppable(&self) -> bool {
        self.chopped_into.is_some() && has_interaction(&self.interactions, InteractionKind::Chop)
    }

    pub fn has_stumps(&self) -> bool {
        self.burns_into.is_some()
    }

    pub fn is_crop(&self) -> bool {
        self.crop.is_some()
    }
}
