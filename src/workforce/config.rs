use std::{fs, io, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::world::DepletionKind;

pub const CONFIG_PATH: &str = "config/workforce.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read workforce config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse workforce config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for the chore scheduler
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceConfig {
    pub max_chore_resource: u32,
    pub max_chore_resource_skilled: u32,
    pub max_chore_resource_over_total: u32,
    pub max_coins: u64,
    pub chore_distance: u32,
    pub stale_after_hours: u64,
    pub report_hour: u64,
    pub report_history: usize,
    pub delay_min: u32,
    pub delay_max: u32,
    pub worker_idle_despawn_hours: u64,
    pub rng_seed: u64,
    pub fire_extinguish_value: u32,
    pub chop_timer: u32,
    pub harvest_timer: i32,
    pub seed_hours: u32,
    pub mining_chance: u32,
    pub mint_skip_chance: u32,
    pub shear_growth_hours: u64,
    pub common_depletion: u32,
    pub short_depletion: u32,
    pub garden_depletion: u32,
    pub food_per_worker: u32,
}

impl Default for WorkforceConfig {
    fn default() -> Self {
        Self {
            max_chore_resource: MAX_CHORE_RESOURCE,
            max_chore_resource_skilled: MAX_CHORE_RESOURCE_SKILLED,
            max_chore_resource_over_total: MAX_CHORE_RESOURCE_OVER_TOTAL,
            max_coins: MAX_COINS,
            chore_distance: CHORE_DISTANCE,
            stale_after_hours: STALE_AFTER_HOURS,
            report_hour: REPORT_HOUR,
            report_history: REPORT_HISTORY,
            delay_min: DELAY_MIN,
            delay_max: DELAY_MAX,
            worker_idle_despawn_hours: WORKER_IDLE_DESPAWN_HOURS,
            rng_seed: RNG_SEED,
            fire_extinguish_value: FIRE_EXTINGUISH_VALUE,
            chop_timer: CHOP_TIMER,
            harvest_timer: HARVEST_TIMER,
            seed_hours: SEED_HOURS,
            mining_chance: MINING_CHANCE,
            mint_skip_chance: MINT_SKIP_CHANCE,
            shear_growth_hours: SHEAR_GROWTH_HOURS,
            common_depletion: COMMON_DEPLETION,
            short_depletion: SHORT_DEPLETION,
            garden_depletion: GARDEN_DEPLETION,
            food_per_worker: FOOD_PER_WORKER,
        }
    }
}

impl WorkforceConfig {
    /// Reads `path`, falling back to defaults if it is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "Failed to load {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: WorkforceConfig = toml::from_str(raw)?;
        if config.delay_max < config.delay_min {
            warn!(
                "delay_max {} is below delay_min {}, using delay_min for both",
                config.delay_max, config.delay_min
            );
            config.delay_max = config.delay_min;
        }
        Ok(config)
    }

    /// Default depletion ceiling for a counter
    pub fn depletion_limit(&self, kind: DepletionKind) -> u32 {
        match kind {
            DepletionKind::Pick => self.garden_depletion,
            DepletionKind::Trapping => self.short_depletion,
            DepletionKind::Dig | DepletionKind::Fish | DepletionKind::Production => {
                self.common_depletion
            }
        }
    }
}
