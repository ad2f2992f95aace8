//! Curated home-screen offers.
//!
//! An offer is a shortcut onto a built-in contract at a preset stake.
//! Six of them cover both modes at low, mid, and high stakes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::contract::find_contract;

/// One tile on the home screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeOffer {
    pub id: String,
    pub title: String,
    pub contract_id: String,
    pub stake: i64,
}

impl HomeOffer {
    fn new(id: &str, title: &str, contract_id: &str, stake: i64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            contract_id: contract_id.to_string(),
            stake,
        }
    }
}

pub static HOME_OFFERS: Lazy<Vec<HomeOffer>> = Lazy::new(|| {
    vec![
        HomeOffer::new("classic-low", "Classic Quick-start (Low Stake)", "classic-clear-5", 10),
        HomeOffer::new("classic-med", "Classic Pro (Med Stake)", "classic-clear-5", 100),
        HomeOffer::new("classic-high", "Classic Whale (High Stake)", "classic-clear-5", 500),
        HomeOffer::new("score-low", "Score Run (Low Stake)", "score-target-5", 25),
        HomeOffer::new("score-med", "Score Master (Med Stake)", "score-target-5", 250),
        HomeOffer::new("score-high", "Score Elite (High Stake)", "score-target-5", 1000),
    ]
});

/// Best-case winnings for an offer, `floor(stake * exceptional
/// multiplier)`. Unknown contracts advertise 0.
#[must_use]
pub fn offer_max_win(stake: i64, contract_id: &str) -> i64 {
    match find_contract(contract_id) {
        Some(contract) => (stake as f64 * contract.payouts.exceptional).floor() as i64,
        None => 0,
    }
}
