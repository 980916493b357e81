use bevy::prelude::*;

/// Sent once for every simulated hour that passes
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourElapsed {
    pub hour: u64,
}
