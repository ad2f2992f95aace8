//! Card identity: suits, ranks, and the 52-card id space.
//!
//! `CardId` packs a (suit, rank) pair into a single byte so piles stay
//! compact and identity is trivially copyable. Printable codes follow
//! the usual shorthand: `"AH"`, `"10S"`, `"KC"`.

use serde::{Deserialize, Serialize};

/// The four French suits, in canonical deck order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Red or black.
    #[must_use]
    pub const fn color(self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Clubs | Suit::Spades => CardColor::Black,
        }
    }

    /// One-letter code used in printable card codes.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    /// Canonical index 0-3.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    /// Inverse of [`Suit::index`].
    ///
    /// ## Panics
    ///
    /// Panics if `index > 3`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Suit::Hearts,
            1 => Suit::Diamonds,
            2 => Suit::Clubs,
            3 => Suit::Spades,
            _ => panic!("suit index out of range"),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Suit color, the alternation unit for tableau runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Black,
}

/// Card rank: Ace (1) through King (13).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Create a rank.
    ///
    /// ## Panics
    ///
    /// Panics if `value` is outside 1-13.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value >= 1 && value <= 13, "rank must be 1-13");
        Self(value)
    }

    /// Raw rank value, 1-13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// "A", "2".."10", "J", "Q", "K".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            13 => "K",
            _ => panic!("rank out of range"),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Compact identity for one of the 52 (suit, rank) pairs.
///
/// Ids are stable across games and seeds, so hosts can refer to cards
/// by id without holding pile references.
///
/// ```
/// use klondike_wager::core::{CardId, Rank, Suit};
///
/// let ten_of_spades = CardId::new(Suit::Spades, Rank::new(10));
/// assert_eq!(ten_of_spades.code(), "10S");
/// assert_eq!(CardId::from_code("10S"), Some(ten_of_spades));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(u8);

impl CardId {
    /// The id for a (suit, rank) pair.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit.index() as u8 * 13 + (rank.value() - 1))
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::from_index((self.0 / 13) as usize)
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank(self.0 % 13 + 1)
    }

    #[must_use]
    pub const fn color(self) -> CardColor {
        self.suit().color()
    }

    /// Printable code like `"AH"` or `"10S"`.
    #[must_use]
    pub fn code(self) -> String {
        format!("{}{}", self.rank().label(), self.suit().letter())
    }

    /// Parse a code produced by [`CardId::code`].
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() < 2 || !code.is_ascii() {
            return None;
        }
        let (rank_part, suit_part) = code.split_at(code.len() - 1);
        let suit = match suit_part {
            "H" => Suit::Hearts,
            "D" => Suit::Diamonds,
            "C" => Suit::Clubs,
            "S" => Suit::Spades,
            _ => return None,
        };
        let value = match rank_part {
            "A" => 1,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            other => other.parse::<u8>().ok().filter(|v| (2..=10).contains(v))?,
        };
        Some(Self::new(suit, Rank::new(value)))
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank().label(), self.suit().letter())
    }
}

/// A card in play.
///
/// `face_up` is the only mutable attribute and is flipped exclusively
/// by the engine's deal, draw, and reveal logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face_up: bool,
}

impl Card {
    /// Create a card with the given facing.
    #[must_use]
    pub const fn new(id: CardId, face_up: bool) -> Self {
        Self { id, face_up }
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.id.suit()
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        self.id.rank()
    }

    #[must_use]
    pub const fn color(self) -> CardColor {
        self.id.color()
    }

    /// Same card with the facing replaced.
    #[must_use]
    pub const fn facing(self, face_up: bool) -> Self {
        Self { id: self.id, face_up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_52_ids_unique() {
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for suit in Suit::ALL {
            for value in 1..=13 {
                let id = CardId::new(suit, Rank::new(value));
                assert!(ids.insert(id));
                assert!(codes.insert(id.code()));
                assert_eq!(id.suit(), suit);
                assert_eq!(id.rank().value(), value);
            }
        }
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn test_code_strings() {
        assert_eq!(CardId::new(Suit::Hearts, Rank::ACE).code(), "AH");
        assert_eq!(CardId::new(Suit::Spades, Rank::new(10)).code(), "10S");
        assert_eq!(CardId::new(Suit::Clubs, Rank::KING).code(), "KC");
        assert_eq!(CardId::new(Suit::Diamonds, Rank::new(12)).code(), "QD");
    }

    #[test]
    fn test_from_code_round_trip() {
        for suit in Suit::ALL {
            for value in 1..=13 {
                let id = CardId::new(suit, Rank::new(value));
                assert_eq!(CardId::from_code(&id.code()), Some(id));
            }
        }
    }

    #[test]
    fn test_from_code_rejects_garbage() {
        assert_eq!(CardId::from_code(""), None);
        assert_eq!(CardId::from_code("H"), None);
        assert_eq!(CardId::from_code("1H"), None);
        assert_eq!(CardId::from_code("11H"), None);
        assert_eq!(CardId::from_code("AX"), None);
        assert_eq!(CardId::from_code("0S"), None);
        assert_eq!(CardId::from_code("14C"), None);
    }

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Hearts.color(), CardColor::Red);
        assert_eq!(Suit::Diamonds.color(), CardColor::Red);
        assert_eq!(Suit::Clubs.color(), CardColor::Black);
        assert_eq!(Suit::Spades.color(), CardColor::Black);
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(Rank::ACE.label(), "A");
        assert_eq!(Rank::new(2).label(), "2");
        assert_eq!(Rank::new(10).label(), "10");
        assert_eq!(Rank::new(11).label(), "J");
        assert_eq!(Rank::new(12).label(), "Q");
        assert_eq!(Rank::KING.label(), "K");
    }

    #[test]
    #[should_panic(expected = "rank must be 1-13")]
    fn test_rank_zero_panics() {
        let _ = Rank::new(0);
    }

    #[test]
    #[should_panic(expected = "rank must be 1-13")]
    fn test_rank_fourteen_panics() {
        let _ = Rank::new(14);
    }

    #[test]
    fn test_card_facing() {
        let id = CardId::new(Suit::Hearts, Rank::new(7));
        let down = Card::new(id, false);
        let up = down.facing(true);
        assert!(!down.face_up);
        assert!(up.face_up);
        assert_eq!(up.id, id);
    }

    #[test]
    fn test_card_serde() {
        let card = Card::new(CardId::new(Suit::Spades, Rank::ACE), true);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
