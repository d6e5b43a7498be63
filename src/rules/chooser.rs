//! Automated stat choice.

use smallvec::SmallVec;

use crate::cards::{Card, StatKey};

/// Picks a stat for an automated side.
pub trait StatChooser {
    /// Choose the stat to fight on, given the chooser's own active card.
    fn choose(&self, card: &Card) -> StatKey;
}

/// Chooses the card's highest stat.
///
/// Among equal maxima the first in canonical stat order wins.
///
/// ```
/// use guardian_battles::cards::{Card, Faction, Rarity, StatKey};
/// use guardian_battles::rules::{HighestStat, StatChooser};
///
/// let card = Card::new("1", "A", Faction::Keepers, Rarity::Common)
///     .with_stat(StatKey::Speed, 40)
///     .with_stat(StatKey::Hp, 12);
/// assert_eq!(HighestStat.choose(&card), StatKey::Speed);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighestStat;

impl HighestStat {
    /// Every stat tied for the maximum, in canonical order.
    #[must_use]
    pub fn candidates(card: &Card) -> SmallVec<[StatKey; 9]> {
        let best = card.stats.iter().map(|(_, v)| v).max().unwrap_or(0);
        card.stats
            .iter()
            .filter(|&(_, v)| v == best)
            .map(|(key, _)| key)
            .collect()
    }
}

impl StatChooser for HighestStat {
    fn choose(&self, card: &Card) -> StatKey {
        Self::candidates(card)
            .first()
            .copied()
            .unwrap_or(StatKey::ALL[0])
    }
}
