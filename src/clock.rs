use bevy::prelude::*;

use crate::messages::HourElapsed;

/// Simulated game time, counted in hours
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClock {
    pub hour: u64,
    pub paused: bool,
}

impl GameClock {
    pub fn starting_at(hour: u64) -> Self {
        Self {
            hour,
            paused: false,
        }
    }

    pub fn advance(&mut self) -> u64 {
        self.hour += 1;
        self.hour
    }

    pub fn day(&self) -> u64 {
        self.hour / 24
    }

    pub fn hour_of_day(&self) -> u64 {
        self.hour % 24
    }
}

/// Systems that move the clock forward; consumers of `HourElapsed` run after it.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct ClockSet;

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameClock>()
            .add_message::<HourElapsed>()
            .add_systems(Update, advance_clock.in_set(ClockSet));
    }
}

/// One simulated hour per update while the clock runs
pub fn advance_clock(mut clock: ResMut<GameClock>, mut hours: MessageWriter<HourElapsed>) {
    if clock.paused {
        return;
    }
    let hour = clock.advance();
    hours.write(HourElapsed { hour });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::drain_messages;

    #[test]
    fn clock_reports_day_and_hour() {
        let clock = GameClock::starting_at(50);
        assert_eq!(clock.day(), 2);
        assert_eq!(clock.hour_of_day(), 2);
    }

    #[test]
    fn each_update_is_one_hour() {
        let mut app = App::new();
        app.add_plugins(ClockPlugin);

        app.update();
        app.update();

        assert_eq!(app.world().resource::<GameClock>().hour, 2);
        let hours: Vec<u64> = drain_messages::<HourElapsed>(app.world_mut())
            .into_iter()
            .map(|m| m.hour)
            .collect();
        assert_eq!(hours, vec![1, 2]);
    }

    #[test]
    fn paused_clock_stands_still() {
        let mut app = App::new();
        app.add_plugins(ClockPlugin);
        app.world_mut().resource_mut::<GameClock>().paused = true;

        app.update();

        assert_eq!(app.world().resource::<GameClock>().hour, 0);
    }
}
