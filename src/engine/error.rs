//! Engine error types.

use thiserror::Error;

use crate::core::{CardId, PileRef};

/// Recoverable errors from engine operations.
///
/// Validation always runs before mutation, so a returned error means
/// the board is unchanged. Callers may probe speculative moves and
/// treat failures as denied actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game has not been dealt yet")]
    NotDealt,

    #[error("game is already finished")]
    Finished,

    #[error("cards cannot move directly from the stock; draw first")]
    MoveFromStock,

    #[error("{pile} is not a valid move destination")]
    InvalidDestination { pile: PileRef },

    #[error("no cards to move at {pile}")]
    EmptySource { pile: PileRef },

    #[error("tableau column {column} does not exist")]
    InvalidColumn { column: usize },

    #[error("position {position} is out of range for tableau column {column}")]
    InvalidPosition { column: usize, position: usize },

    #[error("cards at {pile} do not form a face-up descending alternating run")]
    BrokenRun { pile: PileRef },

    #[error("only a single card may move to {pile}")]
    SingleCardOnly { pile: PileRef },

    #[error("{card} cannot be placed on {pile}")]
    IllegalPlacement { card: CardId, pile: PileRef },
}
