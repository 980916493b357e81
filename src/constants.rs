//! Workforce tuning defaults
//!
//! Every value here seeds a field of `WorkforceConfig`; a TOML file can
//! override any of them.

// ============================================================================
// RESOURCE CAPS
// ============================================================================

/// Units of one resource an empire may hold per active member
pub const MAX_CHORE_RESOURCE: u32 = 125;

/// Per-member cap once the empire has skilled labor
pub const MAX_CHORE_RESOURCE_SKILLED: u32 = 200;

/// Island ceiling that still applies once the empire-wide total is over cap
pub const MAX_CHORE_RESOURCE_OVER_TOTAL: u32 = 25;

/// Coins an empire can mint up to
pub const MAX_COINS: u64 = 2_140_000_000;

// ============================================================================
// SCHEDULING
// ============================================================================

/// Hex distance searched for free citizens when placing a worker
pub const CHORE_DISTANCE: u32 = 4;

/// Empires idle for longer than this get no workforce (hours)
pub const STALE_AFTER_HOURS: u64 = 24 * 7 * 2;

/// Hour of the day the production log becomes a report
pub const REPORT_HOUR: u64 = 0;

/// Reports kept per empire
pub const REPORT_HISTORY: usize = 7;

/// Backoff length range after a failed chore (cycles)
pub const DELAY_MIN: u32 = 2;
pub const DELAY_MAX: u32 = 3;

/// Despawn-ready workers idle this long are removed (hours)
pub const WORKER_IDLE_DESPAWN_HOURS: u64 = 3;

/// Default seed for the scheduler's roll generator
pub const RNG_SEED: u64 = 0x5eed;

// ============================================================================
// CHORE TIMING
// ============================================================================

pub const FIRE_EXTINGUISH_VALUE: u32 = 20;
pub const CHOP_TIMER: u32 = 4;
pub const HARVEST_TIMER: i32 = 8;
pub const SEED_HOURS: u32 = 24;

/// Mining strikes land once in this many cycles
pub const MINING_CHANCE: u32 = 6;

/// Minting skips a cycle once in this many
pub const MINT_SKIP_CHANCE: u32 = 4;

/// Hours before a sheared animal can be sheared again
pub const SHEAR_GROWTH_HOURS: u64 = 24;

// ============================================================================
// DEPLETION
// ============================================================================

pub const COMMON_DEPLETION: u32 = 200;
pub const SHORT_DEPLETION: u32 = 15;
pub const GARDEN_DEPLETION: u32 = 40;

// ============================================================================
// NEEDS
// ============================================================================

/// Food units one charged worker eats per cycle
pub const FOOD_PER_WORKER: u32 = 1;
