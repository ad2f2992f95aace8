//! Deterministic deck generation from a seed string.
//!
//! ## Guarantees
//!
//! - **Deterministic**: identical seed produces a bit-identical deck
//!   ordering on every platform (fairness and replay guarantee).
//! - **Uniform keying**: the seed string is hashed with SHA-256 into
//!   the full 256-bit ChaCha8 key, so textual seeds of any length map
//!   evenly onto the generator's state space.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use super::card::{Card, CardId, Rank, Suit};

/// Seeded RNG that produces shuffled decks.
///
/// ```
/// use klondike_wager::core::DeckRng;
///
/// let deck_a = DeckRng::new("table-42").shuffled_deck();
/// let deck_b = DeckRng::new("table-42").shuffled_deck();
/// assert_eq!(deck_a, deck_b);
/// ```
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
}

impl DeckRng {
    /// Create an RNG keyed by a seed string.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self {
            inner: ChaCha8Rng::from_seed(key),
        }
    }

    /// Produce a full 52-card deck, shuffled, all cards face-down.
    ///
    /// Builds the canonical suit-major deck and applies a Fisher-Yates
    /// pass, swapping index `i` with a uniform pick from `0..=i` for
    /// `i` from 51 down to 1.
    #[must_use]
    pub fn shuffled_deck(&mut self) -> Vec<Card> {
        let mut deck: Vec<Card> = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for value in 1..=13 {
                deck.push(Card::new(CardId::new(suit, Rank::new(value)), false));
            }
        }

        for i in (1..deck.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            deck.swap(i, j);
        }
        deck
    }
}

/// Generate a fresh seed string for a new game.
///
/// Millisecond timestamp plus random noise. Hosts with server-issued
/// seeds can skip this and pass their own string.
#[must_use]
pub fn generate_seed() -> String {
    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let noise: u64 = rand::thread_rng().gen();
    format!("{now_ms}-{noise:x}")
}
