//! The wager economy: contracts, resolution, coins, ranks, and the
//! session layer that ties them to a finished game.

pub mod contract;
pub mod economy;
pub mod offers;
pub mod progression;
pub mod resolver;
pub mod session;

pub use contract::{
    find_contract, validate_builtin_contracts, Contract, ContractRules, ContractValidationError,
    OutcomeLabel, PayoutTable, StakeThresholds, WagerMode, ALL_CONTRACTS, CLASSIC_CLEAR_5MIN,
    DEFAULT_TIMER_SECONDS, SCORE_TARGET_5MIN,
};
pub use economy::{
    EconomyError, PlayerWallet, BANKRUPTCY_GRANT, BANKRUPTCY_THRESHOLD, DAILY_GRANT_COINS,
    PRACTICE_WIN_COINS, STARTING_COINS,
};
pub use offers::{offer_max_win, HomeOffer, HOME_OFFERS};
pub use progression::{
    is_stake_unlocked, rank_def, streak_bonus, trial_for_next_rank, unlocked_stake_tiers,
    PlayerProgression, RankDef, RankId, RankTrial, TrialCondition, TrialRequirement,
    TrialRunRecord, RANKS, RANK_TRIALS, STREAK_BONUS_MULTIPLIER, STREAK_BONUS_THRESHOLD,
};
pub use resolver::{resolve_wager, xp_for_outcome, RunSummary, WagerResult, HINT_PENALTY_PI};
pub use session::{
    begin_wager, build_run_summary, complete_wager, PiBreakdown, WagerSelection, WagerSettlement,
};
