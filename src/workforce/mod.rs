//! The workforce chore scheduler and its Bevy plugin.
//!
//! Each simulated hour every active empire walks its rooms and vehicles,
//! picks the chores each place can host, and staffs them with NPC workers
//! while keeping production under the empire's caps.

use bevy::prelude::*;

use crate::clock::ClockSet;
use crate::messages::{
    HourElapsed, LimitCommand, LimitCommandRejected, SetChoreSetting, SetProductionLimit,
    WorkforceEvent,
};
use crate::world::ChoreWorld;

pub mod allocator;
pub mod chore;
pub mod chores;
pub mod config;
pub mod cycle;
pub mod delay;
pub mod dispatch;
pub mod limits;
pub mod needs;
pub mod problems;
pub mod production_log;
pub mod state;
pub mod tracker;

pub use chore::{Chore, ChoreSetting};
pub use config::{CONFIG_PATH, ConfigError, WorkforceConfig};
pub use problems::{ProblemEntry, WhereEntry, WorkforceProblem};
pub use production_log::{ProductionKind, ProductionLine, ProductionReport};

/// System set for the workforce systems, ordered after the clock
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct WorkforceSet;

pub struct WorkforcePlugin;

impl Plugin for WorkforcePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ChoreWorld>() {
            let config = WorkforceConfig::load_or_default(CONFIG_PATH);
            app.insert_resource(ChoreWorld::new(config, Default::default()));
        }

        app.add_message::<HourElapsed>()
            .add_message::<SetChoreSetting>()
            .add_message::<SetProductionLimit>()
            .add_message::<LimitCommandRejected>()
            .add_message::<WorkforceEvent>();

        app.configure_sets(Update, WorkforceSet.after(ClockSet));

        // Admin commands land before the hour runs so they affect it
        app.add_systems(
            Update,
            (
                apply_chore_settings,
                apply_production_limits,
                run_chore_cycles,
            )
                .chain()
                .in_set(WorkforceSet),
        );
    }
}

fn apply_chore_settings(
    mut commands: MessageReader<SetChoreSetting>,
    mut world: ResMut<ChoreWorld>,
    mut rejected: MessageWriter<LimitCommandRejected>,
) {
    for cmd in commands.read() {
        if let Err(reason) = world.set_chore_setting(cmd.empire, cmd.island, cmd.chore, cmd.setting) {
            warn!("Rejected chore setting {:?}: {}", cmd, reason);
            rejected.write(LimitCommandRejected {
                command: LimitCommand::ChoreSetting(*cmd),
                reason,
            });
        }
    }
}

fn apply_production_limits(
    mut commands: MessageReader<SetProductionLimit>,
    mut world: ResMut<ChoreWorld>,
    mut rejected: MessageWriter<LimitCommandRejected>,
) {
    for cmd in commands.read() {
        if let Err(reason) = world.set_production_limit(cmd.empire, cmd.resource, cmd.limit) {
            warn!("Rejected production limit {:?}: {}", cmd, reason);
            rejected.write(LimitCommandRejected {
                command: LimitCommand::ProductionLimit(*cmd),
                reason,
            });
        }
    }
}

fn run_chore_cycles(
    mut hours: MessageReader<HourElapsed>,
    mut world: ResMut<ChoreWorld>,
    mut events: MessageWriter<WorkforceEvent>,
) {
    for elapsed in hours.read() {
        if elapsed.hour <= world.hour {
            debug!("Skipping hour {}, workforce already at {}", elapsed.hour, world.hour);
            continue;
        }
        world.run_cycle_at(elapsed.hour);
        events.write_batch(world.drain_events());
    }
}
