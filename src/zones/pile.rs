//! Per-side zones and the shared loot pile.
//!
//! Every card in a match sits in exactly one place: a side's draw pile, its
//! discard pile, its active slot, or the shared loot pile. Piles are
//! `im::Vector`s, so cloning a `ZoneState` to compute a pending result is O(1)
//! and the original stays untouched.
//!
//! Draw piles are ordered front-to-back: the front card is drawn next.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Shuffler;

/// One side's zones.
///
/// ## Usage
///
/// ```
/// use guardian_battles::cards::{Card, Faction, Rarity};
/// use guardian_battles::zones::ZoneState;
///
/// let mut zones = ZoneState::new(vec![
///     Card::new("1", "A", Faction::Highlanders, Rarity::Common),
///     Card::new("2", "B", Faction::Highlanders, Rarity::Common),
/// ]);
///
/// let drawn = zones.draw().unwrap();
/// assert_eq!(drawn.name, "A");
/// assert_eq!(zones.draw_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Undrawn cards, front = next.
    pub draw_pile: Vector<Card>,

    /// Won cards awaiting reshuffle. Order is kept for display only.
    pub discard_pile: Vector<Card>,

    /// Face-up card for the current round.
    pub active: Option<Card>,
}

impl ZoneState {
    /// Zones holding `deck` as the draw pile, in the given order.
    #[must_use]
    pub fn new(deck: impl IntoIterator<Item = Card>) -> Self {
        Self {
            draw_pile: deck.into_iter().collect(),
            discard_pile: Vector::new(),
            active: None,
        }
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Cards available for future rounds (draw + discard).
    #[must_use]
    pub fn reserve(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Every card held by this side, active included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reserve() + usize::from(self.active.is_some())
    }

    /// Whether both piles are empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.reserve() == 0
    }

    /// Remove and return the front card of the draw pile.
    pub fn draw(&mut self) -> Option<Card> {
        self.draw_pile.pop_front()
    }

    /// Refill an empty draw pile from the discard pile.
    ///
    /// Does nothing unless the draw pile is empty and the discard pile is not.
    /// Returns whether a reshuffle happened.
    pub fn reshuffle_if_empty<S: Shuffler>(&mut self, shuffler: &mut S) -> bool {
        if !self.draw_pile.is_empty() || self.discard_pile.is_empty() {
            return false;
        }
        let mut cards: Vec<Card> = std::mem::take(&mut self.discard_pile).into_iter().collect();
        shuffler.shuffle(&mut cards);
        self.draw_pile = Vector::from(cards);
        true
    }

    /// Append cards to the discard pile, in order.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    /// Take the active card out of its slot.
    pub fn take_active(&mut self) -> Option<Card> {
        self.active.take()
    }

    /// Iterate over every card: draw pile, discard pile, then active.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.active.iter())
    }
}

/// Cards held in escrow after tied rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootPile {
    cards: Vector<Card>,
}

impl LootPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a card, keeping insertion order.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Empty the pile, returning its cards in insertion order.
    pub fn take_all(&mut self) -> Vector<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
