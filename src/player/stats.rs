//! Per-player match records and aggregate stats.
//!
//! A [`GameRecord`] captures one finished match, practice or wagered.
//! [`PlayerStats`] folds records into lifetime aggregates, and
//! [`ResultHistory`] keeps the recent records with the oldest evicted
//! past a cap. Both are plain values; storage is the host's problem.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::GameSnapshot;

/// Recent records kept per player before eviction.
pub const RECENT_RESULTS_CAP: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Practice,
    Wager,
}

/// One finished match. Wager fields stay `None` for practice games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: Uuid,
    pub player_id: Uuid,
    pub mode: GameMode,
    pub seed: String,
    pub started_at_ms: i64,
    pub finished_at_ms: i64,
    pub duration_seconds: i64,
    pub won: bool,
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_coins: Option<i64>,
}

impl GameRecord {
    /// Build a record from a final snapshot.
    #[must_use]
    pub fn from_snapshot(player_id: Uuid, mode: GameMode, snapshot: &GameSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            mode,
            seed: snapshot.seed.clone(),
            started_at_ms: snapshot.started_at_ms.unwrap_or(0),
            finished_at_ms: snapshot.finished_at_ms.unwrap_or(0),
            duration_seconds: snapshot.time_elapsed_seconds,
            won: snapshot.is_solved(),
            score: snapshot.score.total,
            move_count: Some(snapshot.move_count),
            contract_id: None,
            stake: None,
            payout_coins: None,
        }
    }

    /// Attach the wager details to a record.
    #[must_use]
    pub fn with_wager(mut self, contract_id: impl Into<String>, stake: i64, payout_coins: i64) -> Self {
        self.contract_id = Some(contract_id.into());
        self.stake = Some(stake);
        self.payout_coins = Some(payout_coins);
        self
    }
}

/// Lifetime aggregates for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: Uuid,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub best_score: Option<i64>,
    pub worst_score: Option<i64>,
    /// Fastest winning duration; losses never touch it.
    pub fastest_win_seconds: Option<i64>,
}

impl PlayerStats {
    #[must_use]
    pub const fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            games_played: 0,
            wins: 0,
            losses: 0,
            best_score: None,
            worst_score: None,
            fastest_win_seconds: None,
        }
    }

    /// Fold one record into the aggregates.
    #[must_use]
    pub fn record(mut self, record: &GameRecord) -> Self {
        self.games_played += 1;
        if record.won {
            self.wins += 1;
            if self
                .fastest_win_seconds
                .map_or(true, |fastest| record.duration_seconds < fastest)
            {
                self.fastest_win_seconds = Some(record.duration_seconds);
            }
        } else {
            self.losses += 1;
        }

        if self.best_score.map_or(true, |best| record.score > best) {
            self.best_score = Some(record.score);
        }
        if self.worst_score.map_or(true, |worst| record.score < worst) {
            self.worst_score = Some(record.score);
        }

        self
    }
}

/// Rolling window of recent records, newest last internally.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultHistory {
    results: Vec<GameRecord>,
}

impl ResultHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest past
    /// [`RECENT_RESULTS_CAP`].
    pub fn push(&mut self, record: GameRecord) {
        self.results.push(record);
        if self.results.len() > RECENT_RESULTS_CAP {
            self.results.remove(0);
        }
    }

    /// Up to `limit` records, latest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<GameRecord> {
        self.results.iter().rev().take(limit).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(won: bool, score: i64, duration: i64) -> GameRecord {
        GameRecord {
            id: Uuid::new_v4(),
            player_id: Uuid::nil(),
            mode: GameMode::Practice,
            seed: "stats-test".to_string(),
            started_at_ms: 0,
            finished_at_ms: duration * 1000,
            duration_seconds: duration,
            won,
            score,
            move_count: Some(80),
            contract_id: None,
            stake: None,
            payout_coins: None,
        }
    }

    #[test]
    fn test_stats_fold() {
        let stats = PlayerStats::new(Uuid::nil())
            .record(&record(true, 6200, 210))
            .record(&record(false, 900, 300))
            .record(&record(true, 4100, 150));

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.best_score, Some(6200));
        assert_eq!(stats.worst_score, Some(900));
        assert_eq!(stats.fastest_win_seconds, Some(150));
    }

    #[test]
    fn test_losses_never_touch_fastest_win() {
        let stats = PlayerStats::new(Uuid::nil()).record(&record(false, 2000, 10));
        assert_eq!(stats.fastest_win_seconds, None);

        let stats = stats.record(&record(true, 2000, 290));
        assert_eq!(stats.fastest_win_seconds, Some(290));

        // A faster loss changes nothing.
        let stats = stats.record(&record(false, 100, 20));
        assert_eq!(stats.fastest_win_seconds, Some(290));
    }

    #[test]
    fn test_single_game_sets_both_score_bounds() {
        let stats = PlayerStats::new(Uuid::nil()).record(&record(true, 5000, 100));
        assert_eq!(stats.best_score, Some(5000));
        assert_eq!(stats.worst_score, Some(5000));
    }

    #[test]
    fn test_history_caps_and_orders() {
        let mut history = ResultHistory::new();
        for i in 0..(RECENT_RESULTS_CAP + 25) {
            history.push(record(false, i as i64, 100));
        }
        assert_eq!(history.len(), RECENT_RESULTS_CAP);

        let recent = history.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].score, 224);
        assert_eq!(recent[1].score, 223);
        assert_eq!(recent[2].score, 222);

        // Oldest entries were evicted.
        let all = history.recent(usize::MAX);
        assert_eq!(all.last().unwrap().score, 25);
    }

    #[test]
    fn test_record_serde_omits_empty_wager_fields() {
        let practice = record(true, 1000, 60);
        let json = serde_json::to_string(&practice).unwrap();
        assert!(!json.contains("contractId"));
        assert!(!json.contains("stake"));

        let wagered = record(true, 1000, 60).with_wager("classic-clear-5", 100, 140);
        let json = serde_json::to_string(&wagered).unwrap();
        assert!(json.contains("\"contractId\":\"classic-clear-5\""));
        assert!(json.contains("\"payoutCoins\":140"));

        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wagered);
    }
}
