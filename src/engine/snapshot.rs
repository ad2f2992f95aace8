//! Immutable game snapshots.
//!
//! The engine owns the authoritative piles; every read hands out a
//! `GameSnapshot` backed by persistent vectors. Snapshots are
//! independent values that clone in O(1) and can never alias live
//! engine internals.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardId, PileRef, Suit};

use super::score::ScoreBreakdown;

/// Lifecycle phase of one engine instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Unstarted,
    Dealt,
    Finished,
}

/// Record of the most recent state-changing action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: PileRef,
    pub to: PileRef,
    /// Ids of the cards that moved, in pile order. Empty for a recycle.
    pub moved_cards: SmallVec<[CardId; 3]>,
    /// Tableau card revealed as a side effect, if any.
    pub uncovered: Option<CardId>,
    /// Base-score change this action caused.
    pub points_delta: i64,
    pub created_at_ms: i64,
}

/// Full, independent view of the game at one instant.
///
/// Timing fields are computed live from the injected clock while the
/// game is active and frozen once it finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: String,
    pub phase: GamePhase,
    pub started_at_ms: Option<i64>,
    pub finished_at_ms: Option<i64>,
    pub match_duration_seconds: i64,
    pub time_elapsed_seconds: i64,
    pub time_remaining_seconds: i64,
    pub score: ScoreBreakdown,
    pub move_count: u32,
    pub column_clears: u32,
    pub stock: Vector<Card>,
    pub waste: Vector<Card>,
    /// Foundation piles indexed by [`Suit::index`].
    pub foundations: [Vector<Card>; 4],
    pub tableau: [Vector<Card>; 7],
    pub last_move: Option<MoveRecord>,
}

impl GameSnapshot {
    /// Foundation pile for a suit.
    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &Vector<Card> {
        &self.foundations[suit.index()]
    }

    /// Tableau column by index.
    ///
    /// ## Panics
    ///
    /// Panics if `column > 6`.
    #[must_use]
    pub fn tableau_column(&self, column: usize) -> &Vector<Card> {
        &self.tableau[column]
    }

    /// True when every foundation holds all 13 cards of its suit.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.foundations.iter().all(|f| f.len() == 13)
    }

    /// Total cards across every pile. Always 52 once dealt.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.stock.len()
            + self.waste.len()
            + self.foundations.iter().map(Vector::len).sum::<usize>()
            + self.tableau.iter().map(Vector::len).sum::<usize>()
    }
}
