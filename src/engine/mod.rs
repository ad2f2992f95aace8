//! Game engine: the Klondike state machine, its snapshots, scoring,
//! and the error table mutating operations report.

pub mod error;
pub mod game;
pub mod score;
pub mod snapshot;

pub use error::GameError;
pub use game::{DrawMode, EngineBuilder, KlondikeEngine};
pub use score::{
    ScoreBreakdown, COLUMN_CLEAR_POINTS, EFFICIENCY_MOVE_LIMIT, EFFICIENCY_POINTS_PER_MOVE,
    FOUNDATION_POINTS, UNCOVER_POINTS,
};
pub use snapshot::{GamePhase, GameSnapshot, MoveRecord};
