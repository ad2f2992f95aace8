//! Wager contracts.
//!
//! A contract fixes everything negotiable about a wagered match before
//! it starts: the mode, the timer, the table rules, which stakes the
//! table accepts, the performance-index thresholds per stake, and the
//! payout multiplier per outcome. Contracts are static data; the
//! resolver in [`super::resolver`] grades runs against them.
//!
//! Thresholds scale with the stake so that larger bets demand stronger
//! play for the same outcome label.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::DrawMode;

/// What a wagered match is judged on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WagerMode {
    /// Clearing all four foundations is the headline goal; an
    /// unfinished board caps the outcome at partial.
    ClassicClear,
    /// Pure performance-index grading; clearing is not required.
    ScoreTarget,
}

/// Graded outcome of a wagered run, worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLabel {
    Fail,
    Partial,
    Pass,
    Great,
    Exceptional,
}

impl OutcomeLabel {
    /// All outcomes, worst to best.
    pub const ALL: [OutcomeLabel; 5] = [
        OutcomeLabel::Fail,
        OutcomeLabel::Partial,
        OutcomeLabel::Pass,
        OutcomeLabel::Great,
        OutcomeLabel::Exceptional,
    ];
}

impl std::fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutcomeLabel::Fail => "fail",
            OutcomeLabel::Partial => "partial",
            OutcomeLabel::Pass => "pass",
            OutcomeLabel::Great => "great",
            OutcomeLabel::Exceptional => "exceptional",
        };
        write!(f, "{label}")
    }
}

/// Table rules a contract imposes on the engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRules {
    pub undo_allowed: bool,
    pub hint_allowed: bool,
    pub draw_mode: DrawMode,
}

/// Performance-index cutoffs for one stake tier.
///
/// Strictly ascending: partial < pass < great < exceptional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeThresholds {
    pub partial: i64,
    pub pass: i64,
    pub great: i64,
    pub exceptional: i64,
}

/// Payout multipliers applied to the stake per outcome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoutTable {
    pub fail: f64,
    pub partial: f64,
    pub pass: f64,
    pub great: f64,
    pub exceptional: f64,
}

impl PayoutTable {
    #[must_use]
    pub const fn multiplier(&self, outcome: OutcomeLabel) -> f64 {
        match outcome {
            OutcomeLabel::Fail => self.fail,
            OutcomeLabel::Partial => self.partial,
            OutcomeLabel::Pass => self.pass,
            OutcomeLabel::Great => self.great,
            OutcomeLabel::Exceptional => self.exceptional,
        }
    }
}

/// A complete wager contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub mode: WagerMode,
    pub timer_seconds: i64,
    pub rules: ContractRules,
    /// Accepted stakes, sorted ascending.
    pub stake_tiers: Vec<i64>,
    /// Thresholds keyed by stake tier. Every tier must have an entry.
    pub thresholds: BTreeMap<i64, StakeThresholds>,
    pub payouts: PayoutTable,
}

impl Contract {
    /// Thresholds for an exact stake tier, if the contract defines one.
    #[must_use]
    pub fn thresholds_for(&self, stake: i64) -> Option<&StakeThresholds> {
        self.thresholds.get(&stake)
    }

    /// Check internal consistency, returning every problem found.
    ///
    /// An empty result means the contract is well formed.
    #[must_use]
    pub fn validate(&self) -> Vec<ContractValidationError> {
        let mut errors = Vec::new();

        if self.stake_tiers.is_empty() {
            errors.push(ContractValidationError {
                field: "stake_tiers",
                message: "must have at least one stake tier".to_string(),
            });
        }

        for (i, &tier) in self.stake_tiers.iter().enumerate() {
            if tier <= 0 {
                errors.push(ContractValidationError {
                    field: "stake_tiers",
                    message: format!("stake tier at index {i} must be positive"),
                });
            }
            if i > 0 && tier <= self.stake_tiers[i - 1] {
                errors.push(ContractValidationError {
                    field: "stake_tiers",
                    message: "stake tiers must be sorted ascending".to_string(),
                });
                break;
            }
        }

        for &tier in &self.stake_tiers {
            let Some(th) = self.thresholds.get(&tier) else {
                errors.push(ContractValidationError {
                    field: "thresholds",
                    message: format!("missing thresholds for stake {tier}"),
                });
                continue;
            };
            if th.partial >= th.pass {
                errors.push(ContractValidationError {
                    field: "thresholds",
                    message: format!(
                        "stake {tier}: partial ({}) must be < pass ({})",
                        th.partial, th.pass
                    ),
                });
            }
            if th.pass >= th.great {
                errors.push(ContractValidationError {
                    field: "thresholds",
                    message: format!(
                        "stake {tier}: pass ({}) must be < great ({})",
                        th.pass, th.great
                    ),
                });
            }
            if th.great >= th.exceptional {
                errors.push(ContractValidationError {
                    field: "thresholds",
                    message: format!(
                        "stake {tier}: great ({}) must be < exceptional ({})",
                        th.great, th.exceptional
                    ),
                });
            }
        }

        for outcome in OutcomeLabel::ALL {
            if self.payouts.multiplier(outcome) < 0.0 {
                errors.push(ContractValidationError {
                    field: "payouts",
                    message: format!("payout for {outcome} must be non-negative"),
                });
            }
        }

        if self.timer_seconds <= 0 {
            errors.push(ContractValidationError {
                field: "timer_seconds",
                message: "timer must be positive".to_string(),
            });
        }

        errors
    }
}

/// One problem found by [`Contract::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Timer shared by the starter contracts, 5:00.
pub const DEFAULT_TIMER_SECONDS: i64 = 300;

const DEFAULT_RULES: ContractRules = ContractRules {
    undo_allowed: true,
    hint_allowed: true,
    draw_mode: DrawMode::Three,
};

/// Five-minute classic clear table. Incomplete boards cap at partial.
pub static CLASSIC_CLEAR_5MIN: Lazy<Contract> = Lazy::new(|| Contract {
    id: "classic-clear-5".to_string(),
    mode: WagerMode::ClassicClear,
    timer_seconds: DEFAULT_TIMER_SECONDS,
    rules: DEFAULT_RULES,
    stake_tiers: vec![10, 25, 50, 100, 250, 500, 1000],
    thresholds: BTreeMap::from([
        (10, StakeThresholds { partial: 3000, pass: 6000, great: 8000, exceptional: 10_000 }),
        (25, StakeThresholds { partial: 3500, pass: 6500, great: 8500, exceptional: 10_500 }),
        (50, StakeThresholds { partial: 4000, pass: 7000, great: 9000, exceptional: 11_000 }),
        (100, StakeThresholds { partial: 4500, pass: 7500, great: 9500, exceptional: 11_500 }),
        (250, StakeThresholds { partial: 5000, pass: 8000, great: 10_000, exceptional: 12_000 }),
        (500, StakeThresholds { partial: 5500, pass: 8500, great: 10_500, exceptional: 12_500 }),
        (1000, StakeThresholds { partial: 6000, pass: 9000, great: 11_000, exceptional: 13_000 }),
    ]),
    payouts: PayoutTable { fail: 0.0, partial: 0.3, pass: 1.4, great: 2.0, exceptional: 2.8 },
});

/// Five-minute score target table. Lower pass bars, flatter payouts.
pub static SCORE_TARGET_5MIN: Lazy<Contract> = Lazy::new(|| Contract {
    id: "score-target-5".to_string(),
    mode: WagerMode::ScoreTarget,
    timer_seconds: DEFAULT_TIMER_SECONDS,
    rules: DEFAULT_RULES,
    stake_tiers: vec![10, 25, 50, 100, 250, 500, 1000],
    thresholds: BTreeMap::from([
        (10, StakeThresholds { partial: 3000, pass: 5500, great: 7500, exceptional: 9500 }),
        (25, StakeThresholds { partial: 3500, pass: 6000, great: 8000, exceptional: 10_000 }),
        (50, StakeThresholds { partial: 4000, pass: 6500, great: 8500, exceptional: 10_500 }),
        (100, StakeThresholds { partial: 4500, pass: 7000, great: 9000, exceptional: 11_000 }),
        (250, StakeThresholds { partial: 5000, pass: 7500, great: 9500, exceptional: 11_500 }),
        (500, StakeThresholds { partial: 5500, pass: 8000, great: 10_000, exceptional: 12_000 }),
        (1000, StakeThresholds { partial: 6000, pass: 8500, great: 10_500, exceptional: 12_500 }),
    ]),
    payouts: PayoutTable { fail: 0.0, partial: 0.5, pass: 1.3, great: 1.8, exceptional: 2.4 },
});

/// Every built-in contract.
pub static ALL_CONTRACTS: Lazy<Vec<&'static Contract>> =
    Lazy::new(|| vec![&*CLASSIC_CLEAR_5MIN, &*SCORE_TARGET_5MIN]);

/// Look up a built-in contract by id.
#[must_use]
pub fn find_contract(id: &str) -> Option<&'static Contract> {
    ALL_CONTRACTS.iter().find(|c| c.id == id).copied()
}

/// Validate every built-in contract, returning only the failures.
/// Meant for a startup assertion in hosts.
#[must_use]
pub fn validate_builtin_contracts() -> Vec<(String, Vec<ContractValidationError>)> {
    ALL_CONTRACTS
        .iter()
        .map(|c| (c.id.clone(), c.validate()))
        .filter(|(_, errors)| !errors.is_empty())
        .collect()
}
