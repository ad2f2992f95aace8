//! Pile addressing for move sources and destinations.

use serde::{Deserialize, Serialize};

use super::card::Suit;

/// Addresses one of the game's piles.
///
/// For a tableau move source, `position` selects the first card of a
/// multi-card run; `None` means the top card. Destinations ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "pile", rename_all = "lowercase")]
pub enum PileRef {
    Stock,
    Waste,
    Foundation {
        suit: Suit,
    },
    Tableau {
        column: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<usize>,
    },
}

impl PileRef {
    /// Foundation pile for `suit`.
    #[must_use]
    pub const fn foundation(suit: Suit) -> Self {
        Self::Foundation { suit }
    }

    /// Top card of tableau `column`.
    #[must_use]
    pub const fn tableau(column: usize) -> Self {
        Self::Tableau { column, position: None }
    }

    /// Run starting at `position` within tableau `column`.
    #[must_use]
    pub const fn tableau_at(column: usize, position: usize) -> Self {
        Self::Tableau { column, position: Some(position) }
    }
}

impl std::fmt::Display for PileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileRef::Stock => write!(f, "stock"),
            PileRef::Waste => write!(f, "waste"),
            PileRef::Foundation { suit } => write!(f, "foundation {suit}"),
            PileRef::Tableau { column, position: None } => write!(f, "tableau {column}"),
            PileRef::Tableau { column, position: Some(p) } => {
                write!(f, "tableau {column} at {p}")
            }
        }
    }
}
