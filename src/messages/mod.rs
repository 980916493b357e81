pub mod clock;
pub mod workforce;

pub use clock::HourElapsed;
pub use workforce::{
    LimitCommand, LimitCommandRejected, SetChoreSetting, SetProductionLimit, WorkforceError,
    WorkforceEvent,
};
