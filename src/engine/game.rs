//! Klondike state machine.
//!
//! One engine instance per seed. `deal` (re)initializes everything and
//! can re-enter from any phase; the mutating operations apply only
//! while dealt; `finish` is idempotent and terminal. Every mutating
//! call validates the full legality table first and only then touches
//! the piles, so a returned error leaves the board untouched.
//!
//! ## Timing
//!
//! The engine samples the injected [`Clock`] on demand and never runs
//! timers of its own. A host loop polls [`KlondikeEngine::snapshot`]
//! and calls [`KlondikeEngine::finish`] when the match timer expires.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardId, Clock, DeckRng, PileRef, Rank, Suit};

use super::error::GameError;
use super::score::{
    self, ScoreBreakdown, COLUMN_CLEAR_POINTS, FOUNDATION_POINTS, UNCOVER_POINTS,
};
use super::snapshot::{GamePhase, GameSnapshot, MoveRecord};

/// How many cards one stock draw turns over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    One,
    #[default]
    Three,
}

impl DrawMode {
    /// Cards per draw.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }
}

/// Builder for a [`KlondikeEngine`].
///
/// ```
/// use klondike_wager::core::Clock;
/// use klondike_wager::engine::{DrawMode, EngineBuilder, GamePhase};
///
/// let (clock, control) = Clock::manual(1_000);
/// let mut engine = EngineBuilder::new("table-seed")
///     .draw_mode(DrawMode::One)
///     .clock(clock)
///     .build();
///
/// let snapshot = engine.deal();
/// assert_eq!(snapshot.phase, GamePhase::Dealt);
/// assert_eq!(snapshot.card_count(), 52);
///
/// control.advance(30_000);
/// assert_eq!(engine.snapshot().time_elapsed_seconds, 30);
/// ```
pub struct EngineBuilder {
    seed: String,
    draw_mode: DrawMode,
    match_duration_seconds: i64,
    redeal_penalty_points: i64,
    clock: Clock,
}

impl EngineBuilder {
    /// Start a builder for the given seed.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            draw_mode: DrawMode::Three,
            match_duration_seconds: 300,
            redeal_penalty_points: 0,
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn draw_mode(mut self, mode: DrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    /// Match timer length.
    ///
    /// ## Panics
    ///
    /// Panics if `seconds` is not positive.
    #[must_use]
    pub fn match_duration_seconds(mut self, seconds: i64) -> Self {
        assert!(seconds > 0, "match duration must be positive");
        self.match_duration_seconds = seconds;
        self
    }

    /// Points charged each time the waste recycles into the stock.
    /// Defaults to 0, where the built-in contracts leave it.
    #[must_use]
    pub fn redeal_penalty_points(mut self, points: i64) -> Self {
        self.redeal_penalty_points = points;
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the engine in the unstarted phase. Call `deal` to start.
    #[must_use]
    pub fn build(self) -> KlondikeEngine {
        KlondikeEngine {
            seed: self.seed,
            draw_mode: self.draw_mode,
            match_duration_seconds: self.match_duration_seconds,
            redeal_penalty_points: self.redeal_penalty_points,
            clock: self.clock,
            phase: GamePhase::Unstarted,
            started_at_ms: None,
            finished_at_ms: None,
            base_score: 0,
            time_bonus: 0,
            efficiency_bonus: 0,
            move_count: 0,
            column_clears: 0,
            last_move: None,
            stock: Vector::new(),
            waste: Vector::new(),
            foundations: std::array::from_fn(|_| Vector::new()),
            tableau: std::array::from_fn(|_| Vector::new()),
        }
    }
}

/// Deterministic Klondike engine.
///
/// Owns the authoritative piles. Hosts read through
/// [`KlondikeEngine::snapshot`] and mutate through `deal`,
/// `draw_from_stock`, `move_card`, and `finish`.
#[derive(Clone, Debug)]
pub struct KlondikeEngine {
    seed: String,
    draw_mode: DrawMode,
    match_duration_seconds: i64,
    redeal_penalty_points: i64,
    clock: Clock,

    phase: GamePhase,
    started_at_ms: Option<i64>,
    finished_at_ms: Option<i64>,
    base_score: i64,
    time_bonus: i64,
    efficiency_bonus: i64,
    move_count: u32,
    column_clears: u32,
    last_move: Option<MoveRecord>,

    stock: Vector<Card>,
    waste: Vector<Card>,
    foundations: [Vector<Card>; 4],
    tableau: [Vector<Card>; 7],
}

impl KlondikeEngine {
    /// The seed this engine deals from.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Deal a fresh board from this engine's seed.
    ///
    /// Allowed from any phase; resets scoring, counters, timers, and
    /// every pile. The same seed always deals the same board: seven
    /// tableau columns of sizes 1..=7 with only the last card of each
    /// face-up, and the remaining 24 cards face-down in the stock.
    pub fn deal(&mut self) -> GameSnapshot {
        self.started_at_ms = Some(self.clock.now_ms());
        self.finished_at_ms = None;
        self.base_score = 0;
        self.time_bonus = 0;
        self.efficiency_bonus = 0;
        self.move_count = 0;
        self.column_clears = 0;
        self.last_move = None;

        let deck = DeckRng::new(&self.seed).shuffled_deck();

        let mut next = 0usize;
        for (column, pile) in self.tableau.iter_mut().enumerate() {
            let count = column + 1;
            let mut fresh = Vector::new();
            for i in 0..count {
                fresh.push_back(deck[next].facing(i == count - 1));
                next += 1;
            }
            *pile = fresh;
        }

        self.stock = deck[next..].iter().map(|c| c.facing(false)).collect();
        self.waste = Vector::new();
        self.foundations = std::array::from_fn(|_| Vector::new());
        self.phase = GamePhase::Dealt;

        debug!("dealt seed {:?}: {} cards in stock", self.seed, self.stock.len());
        self.snapshot()
    }

    /// Turn up to [`DrawMode::count`] cards from the stock onto the
    /// waste, face-up, in pop order.
    ///
    /// With an empty stock and a non-empty waste this recycles: the
    /// waste reverses back into a face-down stock (unlimited passes)
    /// and the configured redeal penalty comes off the base score.
    /// With both piles empty the call is a no-op recording nothing.
    pub fn draw_from_stock(&mut self) -> Result<GameSnapshot, GameError> {
        self.require_active()?;

        let created_at_ms = self.clock.now_ms();

        if self.stock.is_empty() {
            if self.waste.is_empty() {
                return Ok(self.snapshot());
            }

            let mut recycled = Vector::new();
            for card in self.waste.iter().rev() {
                recycled.push_back(card.facing(false));
            }
            self.stock = recycled;
            self.waste = Vector::new();

            let mut points_delta = 0;
            if self.redeal_penalty_points != 0 {
                points_delta = -self.redeal_penalty_points.abs();
                self.base_score += points_delta;
            }

            self.record_move(
                PileRef::Stock,
                PileRef::Stock,
                SmallVec::new(),
                None,
                points_delta,
                created_at_ms,
            );
            return Ok(self.snapshot());
        }

        let draw_count = self.draw_mode.count().min(self.stock.len());
        let mut moved = SmallVec::new();
        for _ in 0..draw_count {
            if let Some(card) = self.stock.pop_back() {
                let card = card.facing(true);
                moved.push(card.id);
                self.waste.push_back(card);
            }
        }

        self.record_move(PileRef::Stock, PileRef::Waste, moved, None, 0, created_at_ms);
        Ok(self.snapshot())
    }

    /// Move a card or run from `from` to `to`.
    ///
    /// Validation covers the whole legality table before any pile
    /// changes. On success the scoring deltas apply (+100 per card
    /// landing on a foundation, +20 for uncovering a face-down tableau
    /// card, +50 for emptying a column) and a full clear finishes the
    /// game automatically.
    pub fn move_card(&mut self, from: PileRef, to: PileRef) -> Result<GameSnapshot, GameError> {
        self.require_active()?;

        let created_at_ms = self.clock.now_ms();
        let cards = self.peek_source(from)?;
        self.validate_move(&cards, from, to)?;

        self.remove_from_source(from, cards.len());
        self.push_to_destination(&cards, to);

        let mut points_delta = 0i64;
        let mut uncovered = None;

        if matches!(to, PileRef::Foundation { .. }) {
            points_delta += FOUNDATION_POINTS;
        }

        if let PileRef::Tableau { column, .. } = from {
            let pile = &mut self.tableau[column];
            if let Some(top) = pile.last().copied() {
                if !top.face_up {
                    let last = pile.len() - 1;
                    pile.set(last, top.facing(true));
                    uncovered = Some(top.id);
                    points_delta += UNCOVER_POINTS;
                }
            }
            if pile.is_empty() {
                points_delta += COLUMN_CLEAR_POINTS;
                self.column_clears += 1;
            }
        }

        self.base_score += points_delta;

        let moved = cards.iter().map(|c| c.id).collect();
        self.record_move(from, to, moved, uncovered, points_delta, created_at_ms);

        if self.is_solved() {
            self.finish_internal();
        }

        Ok(self.snapshot())
    }

    /// Finish the game, freezing the clock and computing both bonuses.
    ///
    /// Idempotent: repeat calls return the existing result. The time
    /// bonus is `floor(base * remaining / duration)`; the efficiency
    /// bonus is `max(0, 200 - moves) * 5`.
    pub fn finish(&mut self) -> Result<ScoreBreakdown, GameError> {
        if self.phase == GamePhase::Unstarted {
            return Err(GameError::NotDealt);
        }
        self.finish_internal();
        Ok(ScoreBreakdown::new(
            self.base_score,
            self.time_bonus,
            self.efficiency_bonus,
        ))
    }

    /// Every currently legal single-card move from the waste top or a
    /// tableau top onto its matching foundation.
    ///
    /// Read-only. Empty unless the game is active.
    #[must_use]
    pub fn auto_foundation_moves(&self) -> Vec<(PileRef, PileRef)> {
        if self.phase != GamePhase::Dealt {
            return Vec::new();
        }

        let mut moves = Vec::new();

        if let Some(card) = self.waste.last() {
            if self.can_place_on_foundation(*card, card.suit()) {
                moves.push((PileRef::Waste, PileRef::foundation(card.suit())));
            }
        }

        for (column, pile) in self.tableau.iter().enumerate() {
            let Some(top) = pile.last() else { continue };
            if !top.face_up {
                continue;
            }
            if self.can_place_on_foundation(*top, top.suit()) {
                moves.push((PileRef::tableau(column), PileRef::foundation(top.suit())));
            }
        }

        moves
    }

    /// True when all four foundations are complete.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.foundations.iter().all(|f| f.len() == 13)
    }

    /// Independent snapshot of the full game state.
    ///
    /// Piles share structure with the engine through persistent
    /// vectors, so this is cheap; the returned value can never mutate
    /// engine internals. Bonuses read as 0 until the game finishes.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let time_elapsed_seconds = self.time_elapsed_seconds();
        let time_remaining_seconds = self.time_remaining_seconds();
        let (time_bonus, efficiency_bonus) = match self.phase {
            GamePhase::Finished => (self.time_bonus, self.efficiency_bonus),
            _ => (0, 0),
        };

        GameSnapshot {
            seed: self.seed.clone(),
            phase: self.phase,
            started_at_ms: self.started_at_ms,
            finished_at_ms: self.finished_at_ms,
            match_duration_seconds: self.match_duration_seconds,
            time_elapsed_seconds,
            time_remaining_seconds,
            score: ScoreBreakdown::new(self.base_score, time_bonus, efficiency_bonus),
            move_count: self.move_count,
            column_clears: self.column_clears,
            stock: self.stock.clone(),
            waste: self.waste.clone(),
            foundations: self.foundations.clone(),
            tableau: self.tableau.clone(),
            last_move: self.last_move.clone(),
        }
    }

    // -------------------- internals --------------------

    fn require_active(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Unstarted => Err(GameError::NotDealt),
            GamePhase::Finished => Err(GameError::Finished),
            GamePhase::Dealt => Ok(()),
        }
    }

    fn finish_internal(&mut self) {
        if self.phase == GamePhase::Finished {
            return;
        }
        self.finished_at_ms = Some(self.clock.now_ms());
        self.phase = GamePhase::Finished;

        let remaining = self.time_remaining_seconds();
        self.time_bonus = score::time_bonus(self.base_score, remaining, self.match_duration_seconds);
        self.efficiency_bonus = score::efficiency_bonus(self.move_count);

        debug!(
            "finished seed {:?}: base {} time bonus {} efficiency bonus {}",
            self.seed, self.base_score, self.time_bonus, self.efficiency_bonus
        );
    }

    fn time_elapsed_seconds(&self) -> i64 {
        let Some(started) = self.started_at_ms else {
            return 0;
        };
        let end = self.finished_at_ms.unwrap_or_else(|| self.clock.now_ms());
        ((end - started) / 1000).max(0)
    }

    fn time_remaining_seconds(&self) -> i64 {
        (self.match_duration_seconds - self.time_elapsed_seconds())
            .clamp(0, self.match_duration_seconds)
    }

    fn record_move(
        &mut self,
        from: PileRef,
        to: PileRef,
        moved_cards: SmallVec<[CardId; 3]>,
        uncovered: Option<CardId>,
        points_delta: i64,
        created_at_ms: i64,
    ) {
        self.move_count += 1;
        self.last_move = Some(MoveRecord {
            from,
            to,
            moved_cards,
            uncovered,
            points_delta,
            created_at_ms,
        });
    }

    /// Resolve the cards a move would lift, without touching any pile.
    fn peek_source(&self, from: PileRef) -> Result<Vec<Card>, GameError> {
        match from {
            PileRef::Stock => Err(GameError::MoveFromStock),
            PileRef::Waste => match self.waste.last() {
                Some(card) => Ok(vec![*card]),
                None => Err(GameError::EmptySource { pile: from }),
            },
            PileRef::Foundation { suit } => match self.foundations[suit.index()].last() {
                Some(card) => Ok(vec![*card]),
                None => Err(GameError::EmptySource { pile: from }),
            },
            PileRef::Tableau { column, position } => {
                if column >= self.tableau.len() {
                    return Err(GameError::InvalidColumn { column });
                }
                let pile = &self.tableau[column];
                if pile.is_empty() {
                    return Err(GameError::EmptySource { pile: from });
                }
                let start = position.unwrap_or(pile.len() - 1);
                if start >= pile.len() {
                    return Err(GameError::InvalidPosition { column, position: start });
                }
                Ok(pile.iter().skip(start).copied().collect())
            }
        }
    }

    fn validate_move(&self, cards: &[Card], from: PileRef, to: PileRef) -> Result<(), GameError> {
        match to {
            PileRef::Foundation { .. } | PileRef::Tableau { .. } => {}
            PileRef::Stock | PileRef::Waste => {
                return Err(GameError::InvalidDestination { pile: to });
            }
        }

        if matches!(from, PileRef::Tableau { .. }) && !is_valid_run(cards) {
            return Err(GameError::BrokenRun { pile: from });
        }

        if let PileRef::Foundation { suit } = to {
            if cards.len() != 1 {
                return Err(GameError::SingleCardOnly { pile: to });
            }
            let card = cards[0];
            if !self.can_place_on_foundation(card, suit) {
                return Err(GameError::IllegalPlacement { card: card.id, pile: to });
            }
            return Ok(());
        }

        if let PileRef::Tableau { column, .. } = to {
            if column >= self.tableau.len() {
                return Err(GameError::InvalidColumn { column });
            }
            let lead = cards[0];
            if !self.can_place_on_tableau(lead, &self.tableau[column]) {
                return Err(GameError::IllegalPlacement { card: lead.id, pile: to });
            }
        }

        Ok(())
    }

    fn remove_from_source(&mut self, from: PileRef, count: usize) {
        match from {
            PileRef::Waste => {
                self.waste.pop_back();
            }
            PileRef::Foundation { suit } => {
                self.foundations[suit.index()].pop_back();
            }
            PileRef::Tableau { column, .. } => {
                // The lifted run always reaches the end of the pile.
                let pile = &mut self.tableau[column];
                let keep = pile.len() - count;
                pile.truncate(keep);
            }
            // peek_source rejects stock sources.
            PileRef::Stock => {}
        }
    }

    fn push_to_destination(&mut self, cards: &[Card], to: PileRef) {
        match to {
            PileRef::Tableau { column, .. } => {
                let pile = &mut self.tableau[column];
                for card in cards {
                    pile.push_back(card.facing(true));
                }
            }
            PileRef::Foundation { suit } => {
                let pile = &mut self.foundations[suit.index()];
                for card in cards {
                    pile.push_back(card.facing(true));
                }
            }
            // validate_move only admits tableau and foundation.
            PileRef::Stock | PileRef::Waste => {}
        }
    }

    fn can_place_on_foundation(&self, card: Card, suit: Suit) -> bool {
        if card.suit() != suit {
            return false;
        }
        match self.foundations[suit.index()].last() {
            None => card.rank() == Rank::ACE,
            Some(top) => card.rank().value() == top.rank().value() + 1,
        }
    }

    fn can_place_on_tableau(&self, lead: Card, pile: &Vector<Card>) -> bool {
        match pile.last() {
            None => lead.rank() == Rank::KING,
            Some(top) => {
                top.face_up
                    && lead.color() != top.color()
                    && lead.rank().value() + 1 == top.rank().value()
            }
        }
    }
}

/// A liftable run is face-up throughout, strictly descending by rank,
/// alternating in color.
fn is_valid_run(cards: &[Card]) -> bool {
    if cards.is_empty() {
        return false;
    }
    if cards.iter().any(|c| !c.face_up) {
        return false;
    }
    cards.windows(2).all(|pair| {
        pair[0].color() != pair[1].color()
            && pair[0].rank().value() == pair[1].rank().value() + 1
    })
}
