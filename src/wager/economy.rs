//! Soft-currency wallet.
//!
//! Coins are a closed loop: stakes leave the wallet when a wager is
//! accepted, gross payouts come back at settlement, and two safety
//! valves (a daily grant and a bankruptcy bailout, each at most once
//! per calendar date) keep a cold streak from locking a player out of
//! the tables entirely.
//!
//! The wallet is a small `Copy` value and every mutation returns the
//! updated wallet instead of editing in place, so settlement code can
//! thread states through without aliasing surprises.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coins a fresh wallet starts with.
pub const STARTING_COINS: i64 = 1000;
/// Coins granted by the once-a-day login grant.
pub const DAILY_GRANT_COINS: i64 = 200;
/// Below this balance the wallet counts as bankrupt.
pub const BANKRUPTCY_THRESHOLD: i64 = 10;
/// Balance a bankruptcy bailout resets to.
pub const BANKRUPTCY_GRANT: i64 = 200;
/// Coins awarded for winning a practice (unwagered) game.
pub const PRACTICE_WIN_COINS: i64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EconomyError {
    #[error("cannot afford stake {stake} with {balance} coins")]
    InsufficientFunds { stake: i64, balance: i64 },
}

/// A player's coin balance plus the grant bookkeeping dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWallet {
    pub coins: i64,
    pub last_daily_grant: Option<NaiveDate>,
    pub last_bankruptcy: Option<NaiveDate>,
}

impl PlayerWallet {
    /// Fresh wallet with [`STARTING_COINS`] and no grant history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            coins: STARTING_COINS,
            last_daily_grant: None,
            last_bankruptcy: None,
        }
    }

    /// True when the wallet covers a positive stake.
    #[must_use]
    pub const fn can_afford_stake(self, stake: i64) -> bool {
        self.coins >= stake && stake > 0
    }

    /// True below [`BANKRUPTCY_THRESHOLD`].
    #[must_use]
    pub const fn is_bankrupt(self) -> bool {
        self.coins < BANKRUPTCY_THRESHOLD
    }

    /// Take the stake out of the wallet, or refuse the wager.
    pub fn deduct_stake(self, stake: i64) -> Result<Self, EconomyError> {
        if !self.can_afford_stake(stake) {
            return Err(EconomyError::InsufficientFunds { stake, balance: self.coins });
        }
        Ok(Self { coins: self.coins - stake, ..self })
    }

    #[must_use]
    pub fn add_coins(self, amount: i64) -> Self {
        Self { coins: self.coins + amount, ..self }
    }

    /// Credit a gross settlement payout. The stake already left the
    /// wallet when the wager was accepted, so nothing is re-deducted.
    #[must_use]
    pub fn apply_wager_payout(self, payout_coins: i64) -> Self {
        self.add_coins(payout_coins)
    }

    /// Apply the daily login grant, at most once per date.
    ///
    /// Returns the wallet and whether coins were granted.
    #[must_use]
    pub fn grant_daily_coins(self, today: NaiveDate) -> (Self, bool) {
        if self.last_daily_grant == Some(today) {
            return (self, false);
        }
        debug!("daily grant of {DAILY_GRANT_COINS} coins on {today}");
        (
            Self {
                coins: self.coins + DAILY_GRANT_COINS,
                last_daily_grant: Some(today),
                ..self
            },
            true,
        )
    }

    /// Bail out a bankrupt wallet, at most once per date.
    ///
    /// Resets the balance to [`BANKRUPTCY_GRANT`] when the wallet is
    /// bankrupt and has not been bailed out today. Returns the wallet
    /// and whether the bailout fired.
    #[must_use]
    pub fn check_bankruptcy(self, today: NaiveDate) -> (Self, bool) {
        if !self.is_bankrupt() {
            return (self, false);
        }
        if self.last_bankruptcy == Some(today) {
            return (self, false);
        }
        debug!("bankruptcy bailout to {BANKRUPTCY_GRANT} coins on {today}");
        (
            Self {
                coins: BANKRUPTCY_GRANT,
                last_bankruptcy: Some(today),
                ..self
            },
            true,
        )
    }
}

impl Default for PlayerWallet {
    fn default() -> Self {
        Self::new()
    }
}
