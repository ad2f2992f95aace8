//! Wager session orchestration.
//!
//! Glues the layers into one lifecycle: [`begin_wager`] escrows the
//! stake before the deal, the engine plays the match, and
//! [`complete_wager`] grades the final snapshot, applies the streak
//! bonus, credits the wallet, and folds the run into progression. The
//! functions stay pure state-in state-out, so hosts decide where the
//! results live.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::GameSnapshot;

use super::contract::Contract;
use super::economy::{EconomyError, PlayerWallet};
use super::progression::{streak_bonus, PlayerProgression, TrialRunRecord};
use super::resolver::{resolve_wager, RunSummary, WagerResult, HINT_PENALTY_PI};

/// A contract chosen at a stake, before the deal.
#[derive(Clone, Copy, Debug)]
pub struct WagerSelection<'a> {
    pub contract: &'a Contract,
    pub stake: i64,
}

/// How the run's performance index came together, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiBreakdown {
    pub base_score: i64,
    pub time_bonus: i64,
    pub efficiency_bonus: i64,
    pub hint_penalty: i64,
    pub adjusted_pi: i64,
}

/// Everything a settled wager produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerSettlement {
    pub result: WagerResult,
    pub streak_bonus_coins: i64,
    /// Gross coins credited: payout plus streak bonus.
    pub total_payout: i64,
    pub wallet: PlayerWallet,
    pub progression: PlayerProgression,
    pub run: RunSummary,
    pub pi_breakdown: PiBreakdown,
}

/// Escrow the stake before dealing. Refuses wagers the wallet cannot
/// cover; nothing else changes until settlement.
pub fn begin_wager(wallet: PlayerWallet, stake: i64) -> Result<PlayerWallet, EconomyError> {
    wallet.deduct_stake(stake)
}

/// Condense a final snapshot into what the resolver grades.
#[must_use]
pub fn build_run_summary(final_state: &GameSnapshot, hint_count: u32) -> RunSummary {
    RunSummary {
        completed: final_state.is_solved(),
        pi: final_state.score.total,
        time_ms: final_state.time_elapsed_seconds * 1000,
        hint_count,
    }
}

/// Settle a wagered match.
///
/// Grades the run, pays the streak bonus when the wager netted coins
/// (the bonus rate comes from the streak as it stood before this run),
/// credits the wallet with the gross total, then awards experience and
/// records the run for the active rank trial.
///
/// ## Panics
///
/// Panics if `selection.stake` has no threshold entry in the contract,
/// the same way [`resolve_wager`] does.
#[must_use]
pub fn complete_wager(
    selection: WagerSelection<'_>,
    final_state: &GameSnapshot,
    wallet: PlayerWallet,
    progression: PlayerProgression,
    hint_count: u32,
) -> WagerSettlement {
    let run = build_run_summary(final_state, hint_count);
    let result = resolve_wager(selection.contract, selection.stake, run);

    let bonus_rate = streak_bonus(progression.win_streak);
    let streak_bonus_coins = if result.net_coins > 0 {
        (result.payout_coins as f64 * bonus_rate).floor() as i64
    } else {
        0
    };
    let total_payout = result.payout_coins + streak_bonus_coins;

    let wallet = wallet.apply_wager_payout(total_payout);

    let progression = progression.add_xp(result.xp).record_run(&TrialRunRecord {
        mode: selection.contract.mode,
        completed: run.completed,
        time_seconds: final_state.time_elapsed_seconds,
        pi: run.pi,
        profitable: result.net_coins > 0,
    });

    let hint_penalty = i64::from(hint_count) * HINT_PENALTY_PI;
    let pi_breakdown = PiBreakdown {
        base_score: final_state.score.base,
        time_bonus: final_state.score.time_bonus,
        efficiency_bonus: final_state.score.efficiency_bonus,
        hint_penalty,
        adjusted_pi: run.pi - hint_penalty,
    };

    debug!(
        "settled {} at stake {}: {} for {} coins ({} bonus)",
        selection.contract.id, selection.stake, result.outcome, total_payout, streak_bonus_coins
    );

    WagerSettlement {
        result,
        streak_bonus_coins,
        total_payout,
        wallet,
        progression,
        run,
        pi_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardId, Rank, Suit};
    use crate::engine::{GamePhase, ScoreBreakdown};
    use crate::wager::contract::{OutcomeLabel, CLASSIC_CLEAR_5MIN};
    use im::Vector;

    fn full_foundation(suit: Suit) -> Vector<Card> {
        (1..=13)
            .map(|v| Card::new(CardId::new(suit, Rank::new(v)), true))
            .collect()
    }

    fn cleared_state(base: i64, time_bonus: i64, efficiency: i64, elapsed: i64) -> GameSnapshot {
        GameSnapshot {
            seed: "settlement-test".to_string(),
            phase: GamePhase::Finished,
            started_at_ms: Some(0),
            finished_at_ms: Some(elapsed * 1000),
            match_duration_seconds: 300,
            time_elapsed_seconds: elapsed,
            time_remaining_seconds: (300 - elapsed).max(0),
            score: ScoreBreakdown::new(base, time_bonus, efficiency),
            move_count: 90,
            column_clears: 7,
            stock: Vector::new(),
            waste: Vector::new(),
            foundations: [
                full_foundation(Suit::Hearts),
                full_foundation(Suit::Diamonds),
                full_foundation(Suit::Clubs),
                full_foundation(Suit::Spades),
            ],
            tableau: std::array::from_fn(|_| Vector::new()),
            last_move: None,
        }
    }

    #[test]
    fn test_begin_wager_escrows_stake() {
        let wallet = PlayerWallet::new();
        let after = begin_wager(wallet, 100).unwrap();
        assert_eq!(after.coins, 900);

        let poor = PlayerWallet { coins: 5, ..PlayerWallet::new() };
        assert!(begin_wager(poor, 100).is_err());
    }

    #[test]
    fn test_build_run_summary() {
        let state = cleared_state(5000, 1500, 1000, 180);
        let run = build_run_summary(&state, 2);
        assert!(run.completed);
        assert_eq!(run.pi, 7500);
        assert_eq!(run.time_ms, 180_000);
        assert_eq!(run.hint_count, 2);

        let mut unfinished = cleared_state(5000, 0, 0, 180);
        unfinished.foundations[0] = Vector::new();
        assert!(!build_run_summary(&unfinished, 0).completed);
    }

    #[test]
    fn test_complete_wager_credits_wallet_and_progression() {
        // Total 7500 is exactly the pass bar at stake 100.
        let state = cleared_state(5000, 1500, 1000, 180);
        let wallet = begin_wager(PlayerWallet::new(), 100).unwrap();

        let settlement = complete_wager(
            WagerSelection { contract: &CLASSIC_CLEAR_5MIN, stake: 100 },
            &state,
            wallet,
            PlayerProgression::new(),
            0,
        );

        assert_eq!(settlement.result.outcome, OutcomeLabel::Pass);
        assert_eq!(settlement.result.payout_coins, 140);
        assert_eq!(settlement.streak_bonus_coins, 0);
        assert_eq!(settlement.total_payout, 140);
        assert_eq!(settlement.wallet.coins, 1040);
        assert_eq!(settlement.progression.xp, 30);
        assert_eq!(settlement.progression.win_streak, 1);
    }

    #[test]
    fn test_streak_bonus_uses_streak_before_this_run() {
        let state = cleared_state(5000, 1500, 1000, 180);
        let wallet = begin_wager(PlayerWallet::new(), 100).unwrap();
        let hot = PlayerProgression { win_streak: 3, ..PlayerProgression::new() };

        let settlement = complete_wager(
            WagerSelection { contract: &CLASSIC_CLEAR_5MIN, stake: 100 },
            &state,
            wallet,
            hot,
            0,
        );

        // floor(140 * 0.1) on top of the 140 payout.
        assert_eq!(settlement.streak_bonus_coins, 14);
        assert_eq!(settlement.total_payout, 154);
        assert_eq!(settlement.wallet.coins, 1054);
        assert_eq!(settlement.progression.win_streak, 4);
    }

    #[test]
    fn test_no_streak_bonus_on_losing_wager() {
        // Partial at stake 100 pays 30 gross, a net loss.
        let state = cleared_state(3000, 1000, 500, 200);
        let wallet = begin_wager(PlayerWallet::new(), 100).unwrap();
        let hot = PlayerProgression { win_streak: 5, ..PlayerProgression::new() };

        let settlement = complete_wager(
            WagerSelection { contract: &CLASSIC_CLEAR_5MIN, stake: 100 },
            &state,
            wallet,
            hot,
            0,
        );

        assert_eq!(settlement.result.outcome, OutcomeLabel::Partial);
        assert!(settlement.result.net_coins < 0);
        assert_eq!(settlement.streak_bonus_coins, 0);
        assert_eq!(settlement.progression.win_streak, 0);
    }

    #[test]
    fn test_pi_breakdown_reports_hint_penalty() {
        let state = cleared_state(5000, 1500, 1000, 180);
        let wallet = PlayerWallet::new();

        let settlement = complete_wager(
            WagerSelection { contract: &CLASSIC_CLEAR_5MIN, stake: 100 },
            &state,
            wallet,
            PlayerProgression::new(),
            2,
        );

        assert_eq!(
            settlement.pi_breakdown,
            PiBreakdown {
                base_score: 5000,
                time_bonus: 1500,
                efficiency_bonus: 1000,
                hint_penalty: 800,
                adjusted_pi: 6700,
            }
        );
        // 6700 slips under the 7500 pass bar at stake 100.
        assert_eq!(settlement.result.outcome, OutcomeLabel::Partial);
    }
}
