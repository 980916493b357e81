//! Empire Workforce - an hourly NPC chore scheduler for player empires
//!
//! This library exposes the simulation context, the chore scheduler and the
//! Bevy plugins that drive it from the game clock.

use bevy::app::PluginGroup;

use crate::clock::ClockPlugin;
use crate::workforce::WorkforcePlugin;

pub mod clock;
pub mod constants;
pub mod economy;
pub mod messages;
pub mod workforce;
pub mod world;

pub use world::{ChoreLocation, ChoreWorld};

/// Plugin group for the headless workforce simulation
pub struct WorkforcePlugins;

impl PluginGroup for WorkforcePlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(ClockPlugin)
            .add(WorkforcePlugin)
    }
}

#[cfg(test)]
pub mod test_utils;
