//! Player identity, match records, and aggregate stats.

pub mod profile;
pub mod stats;

pub use profile::PlayerProfile;
pub use stats::{GameMode, GameRecord, PlayerStats, ResultHistory, RECENT_RESULTS_CAP};
