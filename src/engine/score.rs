//! Score bookkeeping and bonus math.
//!
//! The base score accrues per move; the two bonuses exist only once
//! the game finishes. All values are integers and divisions floor.

use serde::{Deserialize, Serialize};

/// Points for landing a card on a foundation.
pub const FOUNDATION_POINTS: i64 = 100;
/// Points for revealing a face-down tableau card.
pub const UNCOVER_POINTS: i64 = 20;
/// Points for emptying a tableau column.
pub const COLUMN_CLEAR_POINTS: i64 = 50;
/// Move count at or beyond which the efficiency bonus bottoms out.
pub const EFFICIENCY_MOVE_LIMIT: i64 = 200;
/// Points per move under the efficiency limit.
pub const EFFICIENCY_POINTS_PER_MOVE: i64 = 5;

/// Itemized score for one game.
///
/// `total` always equals `base + time_bonus + efficiency_bonus`; both
/// bonuses stay 0 until the game finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub time_bonus: i64,
    pub efficiency_bonus: i64,
    pub total: i64,
}

impl ScoreBreakdown {
    /// Assemble a breakdown, computing the total.
    #[must_use]
    pub const fn new(base: i64, time_bonus: i64, efficiency_bonus: i64) -> Self {
        Self {
            base,
            time_bonus,
            efficiency_bonus,
            total: base + time_bonus + efficiency_bonus,
        }
    }
}

/// Time bonus: the base score scaled by the fraction of the timer left.
///
/// Floors toward negative infinity; the base can be negative after
/// redeal penalties.
///
/// ## Panics
///
/// Panics if `duration_seconds` is zero.
#[must_use]
pub fn time_bonus(base_score: i64, remaining_seconds: i64, duration_seconds: i64) -> i64 {
    (base_score * remaining_seconds).div_euclid(duration_seconds)
}

/// Efficiency bonus: 5 points for every move under the 200-move limit.
#[must_use]
pub fn efficiency_bonus(move_count: u32) -> i64 {
    (EFFICIENCY_MOVE_LIMIT - i64::from(move_count)).max(0) * EFFICIENCY_POINTS_PER_MOVE
}
