//! # klondike-wager
//!
//! A deterministic Klondike solitaire engine with a wager-resolution
//! economy layered on top.
//!
//! ## Design Principles
//!
//! 1. **Deterministic Replay**: The same seed string always deals the
//!    same board, and every downstream judgment (outcome, payout,
//!    promotion) is a pure function of recorded state. Any match can
//!    be re-run and audited.
//!
//! 2. **Validate, Then Mutate**: Mutating engine calls check the full
//!    legality table before touching a pile. An `Err` means nothing
//!    changed.
//!
//! 3. **Money Paths Are Pure**: Wallet, resolver, and progression
//!    functions map old state to new state with no hidden I/O. Hosts
//!    own storage and the clock.
//!
//! ## Architecture
//!
//! - **Persistent Piles**: Game piles are `im` vectors, so a full
//!   snapshot is O(1) structural sharing, cheap enough to take after
//!   every move.
//!
//! - **Injected Time**: The engine samples a [`core::Clock`] and never
//!   runs timers; tests drive a manual clock.
//!
//! - **Static Tables**: Contracts, ranks, trials, and offers are
//!   compiled-in configuration, validated in batch at startup.
//!
//! ## Modules
//!
//! - `core`: Cards, pile addressing, seeded shuffling, the clock
//! - `engine`: The Klondike state machine, snapshots, scoring, errors
//! - `wager`: Contracts, outcome resolution, coins, ranks, settlement
//! - `player`: Profiles, match records, aggregate stats
//! - `persist`: Storage-boundary encoding with default fallback

pub mod core;
pub mod engine;
pub mod persist;
pub mod player;
pub mod wager;

// Re-export commonly used types
pub use crate::core::{Card, CardColor, CardId, Clock, ManualClock, PileRef, Rank, Suit};

pub use crate::engine::{
    DrawMode, EngineBuilder, GameError, GamePhase, GameSnapshot, KlondikeEngine, MoveRecord,
    ScoreBreakdown,
};

pub use crate::wager::{
    begin_wager, complete_wager, find_contract, resolve_wager, Contract, EconomyError,
    HomeOffer, OutcomeLabel, PlayerProgression, PlayerWallet, RankId, RunSummary,
    WagerMode, WagerResult, WagerSelection, WagerSettlement,
};

pub use crate::player::{GameMode, GameRecord, PlayerProfile, PlayerStats, ResultHistory};
