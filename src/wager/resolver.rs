//! Wager resolution.
//!
//! [`resolve_wager`] is a pure function from a contract, a stake, and a
//! finished run to an outcome, a payout, and an experience award. The
//! same inputs always grade the same, so settlements can be replayed
//! and audited. Wallet and progression effects live a layer up in
//! [`super::session`].

use serde::{Deserialize, Serialize};

use super::contract::{Contract, OutcomeLabel, StakeThresholds, WagerMode};

/// Performance index charged per hint used during the run.
pub const HINT_PENALTY_PI: i64 = 400;

/// Experience awarded for an outcome. Even a failed wager teaches a
/// little.
#[must_use]
pub const fn xp_for_outcome(outcome: OutcomeLabel) -> i64 {
    match outcome {
        OutcomeLabel::Fail => 5,
        OutcomeLabel::Partial => 15,
        OutcomeLabel::Pass => 30,
        OutcomeLabel::Great => 50,
        OutcomeLabel::Exceptional => 100,
    }
}

/// What a finished run looked like, as the resolver needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// All four foundations complete.
    pub completed: bool,
    /// Final performance index, before hint penalties.
    pub pi: i64,
    pub time_ms: i64,
    pub hint_count: u32,
}

/// The resolver's verdict on one wagered run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerResult {
    pub outcome: OutcomeLabel,
    /// Gross coins returned to the player, stake included.
    pub payout_coins: i64,
    /// `payout_coins - stake`. Negative on a losing wager.
    pub net_coins: i64,
    pub xp: i64,
}

/// Grade a run against a contract at the given stake.
///
/// The hint penalty comes off the performance index first
/// (`adjusted = pi - hints * 400`). Under [`WagerMode::ClassicClear`]
/// an incomplete board caps the outcome at partial; under
/// [`WagerMode::ScoreTarget`] completion never matters. The payout is
/// `floor(stake * multiplier)` and the net is payout minus stake.
///
/// A non-positive stake resolves to a zero-coin fail rather than an
/// error, so callers can grade practice runs through the same path.
///
/// ## Panics
///
/// Panics if the contract defines no thresholds for `stake`. Stakes
/// come from [`Contract::stake_tiers`], so a miss is a programming
/// error, not player input.
#[must_use]
pub fn resolve_wager(contract: &Contract, stake: i64, run: RunSummary) -> WagerResult {
    if stake <= 0 {
        return WagerResult {
            outcome: OutcomeLabel::Fail,
            payout_coins: 0,
            net_coins: 0,
            xp: xp_for_outcome(OutcomeLabel::Fail),
        };
    }

    let Some(thresholds) = contract.thresholds_for(stake) else {
        panic!("no thresholds defined for stake {} in contract {}", stake, contract.id);
    };

    let adjusted_pi = run.pi - i64::from(run.hint_count) * HINT_PENALTY_PI;

    let outcome = match contract.mode {
        WagerMode::ClassicClear if !run.completed => {
            if adjusted_pi >= thresholds.partial {
                OutcomeLabel::Partial
            } else {
                OutcomeLabel::Fail
            }
        }
        WagerMode::ClassicClear | WagerMode::ScoreTarget => grade(adjusted_pi, thresholds),
    };

    let multiplier = contract.payouts.multiplier(outcome);
    let payout_coins = (stake as f64 * multiplier).floor() as i64;

    WagerResult {
        outcome,
        payout_coins,
        net_coins: payout_coins - stake,
        xp: xp_for_outcome(outcome),
    }
}

fn grade(adjusted_pi: i64, thresholds: &StakeThresholds) -> OutcomeLabel {
    if adjusted_pi >= thresholds.exceptional {
        OutcomeLabel::Exceptional
    } else if adjusted_pi >= thresholds.great {
        OutcomeLabel::Great
    } else if adjusted_pi >= thresholds.pass {
        OutcomeLabel::Pass
    } else if adjusted_pi >= thresholds.partial {
        OutcomeLabel::Partial
    } else {
        OutcomeLabel::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wager::contract::{CLASSIC_CLEAR_5MIN, SCORE_TARGET_5MIN};

    fn completed_run(pi: i64) -> RunSummary {
        RunSummary { completed: true, pi, time_ms: 200_000, hint_count: 0 }
    }

    #[test]
    fn test_pass_at_low_stake() {
        let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 10, completed_run(6000));
        assert_eq!(result.outcome, OutcomeLabel::Pass);
        assert_eq!(result.payout_coins, 14);
        assert_eq!(result.net_coins, 4);
        assert_eq!(result.xp, 30);
    }

    #[test]
    fn test_fail_below_partial() {
        let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 10, completed_run(2999));
        assert_eq!(result.outcome, OutcomeLabel::Fail);
        assert_eq!(result.payout_coins, 0);
        assert_eq!(result.net_coins, -10);
        assert_eq!(result.xp, 5);
    }

    #[test]
    fn test_every_boundary_is_inclusive() {
        let th = CLASSIC_CLEAR_5MIN.thresholds_for(50).unwrap();
        for (pi, expected) in [
            (th.partial, OutcomeLabel::Partial),
            (th.pass, OutcomeLabel::Pass),
            (th.great, OutcomeLabel::Great),
            (th.exceptional, OutcomeLabel::Exceptional),
        ] {
            let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 50, completed_run(pi));
            assert_eq!(result.outcome, expected, "pi {pi}");
            let below = resolve_wager(&CLASSIC_CLEAR_5MIN, 50, completed_run(pi - 1));
            assert!(below.outcome < expected, "pi {}", pi - 1);
        }
    }

    #[test]
    fn test_hint_penalty_degrades_outcome() {
        // 3400 at stake 10: one hint lands exactly on the partial bar
        // at 3000, a second drops below it.
        let mut run = completed_run(3400);
        run.hint_count = 1;
        assert_eq!(resolve_wager(&CLASSIC_CLEAR_5MIN, 10, run).outcome, OutcomeLabel::Partial);

        run.hint_count = 2;
        assert_eq!(resolve_wager(&CLASSIC_CLEAR_5MIN, 10, run).outcome, OutcomeLabel::Fail);
    }

    #[test]
    fn test_classic_clear_caps_incomplete_at_partial() {
        let run = RunSummary { completed: false, pi: 12_000, time_ms: 290_000, hint_count: 0 };
        let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 10, run);
        assert_eq!(result.outcome, OutcomeLabel::Partial);

        let weak = RunSummary { completed: false, pi: 1000, time_ms: 290_000, hint_count: 0 };
        assert_eq!(resolve_wager(&CLASSIC_CLEAR_5MIN, 10, weak).outcome, OutcomeLabel::Fail);
    }

    #[test]
    fn test_score_target_ignores_completion() {
        let run = RunSummary { completed: false, pi: 12_000, time_ms: 290_000, hint_count: 0 };
        let result = resolve_wager(&SCORE_TARGET_5MIN, 10, run);
        assert_eq!(result.outcome, OutcomeLabel::Exceptional);
        assert_eq!(result.xp, 100);
    }

    #[test]
    fn test_payout_floors_fractional_coins() {
        // 25 * 0.3 = 7.5 coins of partial payout.
        let run = RunSummary { completed: false, pi: 4000, time_ms: 100_000, hint_count: 0 };
        let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 25, run);
        assert_eq!(result.outcome, OutcomeLabel::Partial);
        assert_eq!(result.payout_coins, 7);
        assert_eq!(result.net_coins, -18);
    }

    #[test]
    fn test_zero_stake_resolves_to_coinless_fail() {
        let result = resolve_wager(&CLASSIC_CLEAR_5MIN, 0, completed_run(9000));
        assert_eq!(result.outcome, OutcomeLabel::Fail);
        assert_eq!(result.payout_coins, 0);
        assert_eq!(result.net_coins, 0);
        assert_eq!(result.xp, 5);
    }

    #[test]
    #[should_panic(expected = "no thresholds defined for stake 33")]
    fn test_unknown_stake_tier_panics() {
        let _ = resolve_wager(&CLASSIC_CLEAR_5MIN, 33, completed_run(6000));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let run = completed_run(8777);
        let a = resolve_wager(&SCORE_TARGET_5MIN, 250, run);
        let b = resolve_wager(&SCORE_TARGET_5MIN, 250, run);
        assert_eq!(a, b);
    }
}
