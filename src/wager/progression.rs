//! Ranks, experience, rank trials, and stake unlocking.
//!
//! Players climb a four-rank ladder. Each rank unlocks more stake
//! tiers, and promotion is gated by a trial: a set of requirements
//! (fast clears, performance-index bars, win streaks) that wagered
//! runs tick off one by one. Experience accumulates separately and is
//! informational; trials alone decide promotion.
//!
//! All ladder and trial data is static configuration.

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::contract::WagerMode;

/// The table ladder, lowest to highest.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RankId {
    #[default]
    Mouse,
    Fox,
    Wolf,
    Dragon,
}

impl RankId {
    /// Every rank, lowest to highest.
    pub const LADDER: [RankId; 4] = [RankId::Mouse, RankId::Fox, RankId::Wolf, RankId::Dragon];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            RankId::Mouse => 0,
            RankId::Fox => 1,
            RankId::Wolf => 2,
            RankId::Dragon => 3,
        }
    }

    /// The next rank up, or `None` at the top of the ladder.
    #[must_use]
    pub const fn next(self) -> Option<RankId> {
        match self {
            RankId::Mouse => Some(RankId::Fox),
            RankId::Fox => Some(RankId::Wolf),
            RankId::Wolf => Some(RankId::Dragon),
            RankId::Dragon => None,
        }
    }
}

impl std::fmt::Display for RankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RankId::Mouse => "mouse",
            RankId::Fox => "fox",
            RankId::Wolf => "wolf",
            RankId::Dragon => "dragon",
        };
        write!(f, "{name}")
    }
}

/// Static definition of one rank.
#[derive(Clone, Copy, Debug)]
pub struct RankDef {
    pub id: RankId,
    pub label: &'static str,
    /// Stake tiers this rank adds on top of the ranks below it.
    pub unlocked_stake_tiers: &'static [i64],
    /// Cumulative experience where this rank sits, informational.
    pub xp_required: i64,
}

pub const RANKS: [RankDef; 4] = [
    RankDef { id: RankId::Mouse, label: "Mouse Table", unlocked_stake_tiers: &[10, 25, 50], xp_required: 0 },
    RankDef { id: RankId::Fox, label: "Fox Table", unlocked_stake_tiers: &[100], xp_required: 500 },
    RankDef { id: RankId::Wolf, label: "Wolf Table", unlocked_stake_tiers: &[250, 500], xp_required: 2000 },
    RankDef { id: RankId::Dragon, label: "Dragon Table", unlocked_stake_tiers: &[1000], xp_required: 5000 },
];

#[must_use]
pub const fn rank_def(rank: RankId) -> &'static RankDef {
    &RANKS[rank.index()]
}

/// Every stake tier available at a rank, cumulative and sorted.
#[must_use]
pub fn unlocked_stake_tiers(rank: RankId) -> Vec<i64> {
    let mut tiers: Vec<i64> = RANKS[..=rank.index()]
        .iter()
        .flat_map(|def| def.unlocked_stake_tiers.iter().copied())
        .collect();
    tiers.sort_unstable();
    tiers
}

#[must_use]
pub fn is_stake_unlocked(rank: RankId, stake: i64) -> bool {
    unlocked_stake_tiers(rank).contains(&stake)
}

/// What a single trial requirement asks of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialCondition {
    /// Clear the board in strictly under this many seconds.
    CompleteUnder { seconds: i64 },
    /// Reach this performance index, cleared or not.
    HitPi { threshold: i64 },
    /// Hold a profitable-wager streak at least this long.
    ConsecutiveWins { streak: u32 },
}

/// One requirement of a rank trial, met `count` times to satisfy it.
#[derive(Clone, Copy, Debug)]
pub struct TrialRequirement {
    /// Only runs in this mode advance the requirement.
    pub mode: WagerMode,
    pub condition: TrialCondition,
    pub count: u32,
}

/// The full trial gating one promotion.
#[derive(Clone, Copy, Debug)]
pub struct RankTrial {
    pub target: RankId,
    pub requirements: &'static [TrialRequirement],
}

pub const RANK_TRIALS: [RankTrial; 3] = [
    RankTrial {
        target: RankId::Fox,
        requirements: &[TrialRequirement {
            mode: WagerMode::ClassicClear,
            condition: TrialCondition::CompleteUnder { seconds: 240 },
            count: 2,
        }],
    },
    RankTrial {
        target: RankId::Wolf,
        requirements: &[TrialRequirement {
            mode: WagerMode::ClassicClear,
            condition: TrialCondition::HitPi { threshold: 8000 },
            count: 3,
        }],
    },
    RankTrial {
        target: RankId::Dragon,
        requirements: &[
            TrialRequirement {
                mode: WagerMode::ClassicClear,
                condition: TrialCondition::HitPi { threshold: 10_000 },
                count: 3,
            },
            TrialRequirement {
                mode: WagerMode::ClassicClear,
                condition: TrialCondition::ConsecutiveWins { streak: 3 },
                count: 1,
            },
        ],
    },
];

/// The trial for promoting out of `rank`, or `None` at the top.
#[must_use]
pub fn trial_for_next_rank(rank: RankId) -> Option<&'static RankTrial> {
    let next = rank.next()?;
    RANK_TRIALS.iter().find(|t| t.target == next)
}

/// Profitable-streak length where the coin bonus kicks in.
pub const STREAK_BONUS_THRESHOLD: u32 = 3;
/// Bonus rate applied to the payout once the streak is hot.
pub const STREAK_BONUS_MULTIPLIER: f64 = 0.1;

/// Bonus rate for a streak length: all or nothing.
#[must_use]
pub fn streak_bonus(win_streak: u32) -> f64 {
    if win_streak >= STREAK_BONUS_THRESHOLD {
        STREAK_BONUS_MULTIPLIER
    } else {
        0.0
    }
}

/// The facts about a finished wagered run that trials care about.
#[derive(Clone, Copy, Debug)]
pub struct TrialRunRecord {
    pub mode: WagerMode,
    pub completed: bool,
    pub time_seconds: i64,
    pub pi: i64,
    /// Whether the wager netted coins, `net_coins > 0`.
    pub profitable: bool,
}

/// A player's ladder state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgression {
    pub xp: i64,
    pub rank: RankId,
    /// Times each requirement of the active trial has been met, keyed
    /// by target rank and requirement index.
    #[serde(with = "trial_progress_serde")]
    pub trial_progress: FxHashMap<(RankId, usize), u32>,
    /// Consecutive profitable wagers; any other settlement resets it.
    pub win_streak: u32,
}

impl PlayerProgression {
    /// Fresh progression at the bottom of the ladder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_xp(mut self, xp: i64) -> Self {
        self.xp += xp;
        self
    }

    /// `(met, needed)` per requirement of the given trial.
    #[must_use]
    pub fn trial_progress_for(&self, trial: &RankTrial) -> Vec<(u32, u32)> {
        trial
            .requirements
            .iter()
            .enumerate()
            .map(|(index, req)| {
                let current = self.progress_count(trial.target, index);
                (current, req.count)
            })
            .collect()
    }

    /// Fold one settled wagered run into the ladder state.
    ///
    /// The win streak updates first, so a streak requirement sees the
    /// run it is part of. Requirements advance only in their own mode
    /// and never past their count. Completing every requirement of the
    /// active trial promotes immediately, one rank per run at most.
    #[must_use]
    pub fn record_run(mut self, run: &TrialRunRecord) -> Self {
        self.win_streak = if run.profitable { self.win_streak + 1 } else { 0 };

        let Some(trial) = trial_for_next_rank(self.rank) else {
            return self;
        };

        for (index, req) in trial.requirements.iter().enumerate() {
            if req.mode != run.mode {
                continue;
            }

            let met = match req.condition {
                TrialCondition::CompleteUnder { seconds } => {
                    run.completed && run.time_seconds < seconds
                }
                TrialCondition::HitPi { threshold } => run.pi >= threshold,
                TrialCondition::ConsecutiveWins { streak } => self.win_streak >= streak,
            };

            let current = self.progress_count(trial.target, index);
            if met && current < req.count {
                self.trial_progress.insert((trial.target, index), current + 1);
            }
        }

        let complete = trial
            .requirements
            .iter()
            .enumerate()
            .all(|(index, req)| self.progress_count(trial.target, index) >= req.count);

        if complete {
            if let Some(next) = self.rank.next() {
                info!("rank up: {} -> {}", self.rank, next);
                self.rank = next;
            }
        }

        self
    }

    fn progress_count(&self, target: RankId, index: usize) -> u32 {
        self.trial_progress.get(&(target, index)).copied().unwrap_or(0)
    }
}

/// Maps keyed by tuples do not survive JSON, so the trial progress
/// serializes as a sorted entry list.
mod trial_progress_serde {
    use rustc_hash::FxHashMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::RankId;

    pub fn serialize<S>(
        map: &FxHashMap<(RankId, usize), u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries: Vec<(RankId, usize, u32)> = map
            .iter()
            .map(|(&(rank, index), &count)| (rank, index, count))
            .collect();
        entries.sort_unstable();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<FxHashMap<(RankId, usize), u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(RankId, usize, u32)>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|(rank, index, count)| ((rank, index), count))
            .collect())
    }
}
