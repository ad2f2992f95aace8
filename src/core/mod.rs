//! Core primitives: cards, pile addressing, seeded shuffling, time.
//!
//! Everything here is game-logic-free. The engine builds on these
//! types without them knowing anything about Klondike rules.

pub mod card;
pub mod clock;
pub mod pile;
pub mod rng;

pub use card::{Card, CardColor, CardId, Rank, Suit};
pub use clock::{Clock, ManualClock};
pub use pile::PileRef;
pub use rng::{generate_seed, DeckRng};
