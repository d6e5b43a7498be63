//! Shuffle and draw engine.
//!
//! Splits a catalog into two decks and promotes one card per side to active
//! at the start of each round, recycling discard piles into empty draw piles.
//! Every function here is pure over its zone inputs: it returns new zones and
//! only advances the shuffler.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::cards::Card;
use crate::core::{Shuffler, Side, SideMap};
use crate::zones::ZoneState;

/// Which side(s) could not produce an active card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exhaustion {
    Side(Side),
    Both,
}

impl Exhaustion {
    /// Collapse a list of exhausted sides. `None` when the list is empty.
    #[must_use]
    pub fn from_sides(sides: &[Side]) -> Option<Self> {
        match sides {
            [] => None,
            [side] => Some(Self::Side(*side)),
            _ => Some(Self::Both),
        }
    }

    /// Whether `side` ran out.
    #[must_use]
    pub fn includes(self, side: Side) -> bool {
        match self {
            Self::Side(s) => s == side,
            Self::Both => true,
        }
    }
}

/// Return `cards` in a new order chosen by `shuffler`.
#[must_use]
pub fn shuffle_deck<S: Shuffler>(mut cards: Vec<Card>, shuffler: &mut S) -> Vec<Card> {
    shuffler.shuffle(&mut cards);
    cards
}

/// Shuffle the catalog once and cut it in two.
///
/// The first deck takes the larger half when the count is odd, so the decks
/// hold `ceil(n/2)` and `floor(n/2)` cards.
///
/// ```
/// use guardian_battles::cards::CardCatalog;
/// use guardian_battles::core::KeepOrder;
/// use guardian_battles::rules::split_catalog;
///
/// let catalog = CardCatalog::roster();
/// let (a, b) = split_catalog(catalog.cards(), &mut KeepOrder);
/// assert_eq!(a.len() + b.len(), 54);
/// assert_eq!(a.len(), b.len());
/// ```
#[must_use]
pub fn split_catalog<S: Shuffler>(cards: &[Card], shuffler: &mut S) -> (Vec<Card>, Vec<Card>) {
    let mut first = shuffle_deck(cards.to_vec(), shuffler);
    let mid = first.len().div_ceil(2);
    let second = first.split_off(mid);
    (first, second)
}

/// Draw one active card per side for the next round.
///
/// Each side with an empty draw pile first reshuffles its discard pile into a
/// new draw pile. If either side still has nothing to draw, the whole draw
/// fails and the exhausted side(s) are reported; no partial result is ever
/// returned. An active card left over from a previous round goes to that
/// side's discard pile before drawing.
pub fn draw_next_round<S: Shuffler>(
    zones: &SideMap<ZoneState>,
    shuffler: &mut S,
) -> Result<SideMap<ZoneState>, Exhaustion> {
    let mut next = zones.clone();
    let mut exhausted: SmallVec<[Side; 2]> = SmallVec::new();

    for side in Side::BOTH {
        let state = &mut next[side];
        if let Some(stale) = state.take_active() {
            state.discard(Some(stale));
        }
        if state.reshuffle_if_empty(shuffler) {
            debug!(%side, cards = state.draw_count(), "reshuffled discard pile");
        }
        if state.draw_pile.is_empty() {
            exhausted.push(side);
        }
    }

    if let Some(exhaustion) = Exhaustion::from_sides(&exhausted) {
        debug!(?exhaustion, "draw failed");
        return Err(exhaustion);
    }

    for side in Side::BOTH {
        let state = &mut next[side];
        state.active = state.draw();
    }
    Ok(next)
}
