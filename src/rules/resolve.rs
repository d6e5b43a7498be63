//! Round resolution.
//!
//! Compares both active cards on the chosen stat and computes where every
//! card goes. Resolution never touches the live zones: it returns a
//! `Resolution` holding the next zones and loot, which the match commits
//! later.
//!
//! ## Transfer rules
//!
//! - Tie: player's active, then opponent's active, are appended to the loot.
//! - Win: the winner's discard gains its own active, the loser's active, then
//!   the whole loot pile, in that order. Loot is emptied.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, StatKey};
use crate::core::{MatchError, Side, SideMap};
use crate::zones::{LootPile, ZoneState};

/// Outcome of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    Won(Side),
    Tie,
}

impl RoundWinner {
    /// The winning side, if any.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Won(side) => Some(side),
            Self::Tie => None,
        }
    }

    #[must_use]
    pub fn is_tie(self) -> bool {
        self == Self::Tie
    }
}

impl std::fmt::Display for RoundWinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won(side) => write!(f, "{side}"),
            Self::Tie => f.write_str("tie"),
        }
    }
}

/// Computed, uncommitted result of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub stat: StatKey,
    pub winner: RoundWinner,
    /// The cards that were compared.
    pub revealed: SideMap<Card>,
    /// `stat` read from each revealed card.
    pub values: SideMap<u32>,
    /// Zones after the transfer. Both actives are empty.
    pub zones: SideMap<ZoneState>,
    pub loot: LootPile,
}

/// Resolve a round on `stat`.
///
/// Fails with `MissingActive` if either side has no active card.
///
/// ```
/// use guardian_battles::cards::{Card, Faction, Rarity, StatKey};
/// use guardian_battles::core::{Side, SideMap};
/// use guardian_battles::rules::{resolve_round, RoundWinner};
/// use guardian_battles::zones::{LootPile, ZoneState};
///
/// let mut zones = SideMap::<ZoneState>::default();
/// zones[Side::Player].active =
///     Some(Card::new("1", "A", Faction::Highlanders, Rarity::Common).with_stat(StatKey::Power, 10));
/// zones[Side::Opponent].active =
///     Some(Card::new("2", "B", Faction::Keepers, Rarity::Common).with_stat(StatKey::Power, 5));
///
/// let result = resolve_round(StatKey::Power, &zones, &LootPile::new()).unwrap();
/// assert_eq!(result.winner, RoundWinner::Won(Side::Player));
/// assert_eq!(result.zones[Side::Player].discard_count(), 2);
/// ```
pub fn resolve_round(
    stat: StatKey,
    zones: &SideMap<ZoneState>,
    loot: &LootPile,
) -> Result<Resolution, MatchError> {
    let mut next = zones.clone();
    let mut next_loot = loot.clone();

    let player = next[Side::Player]
        .take_active()
        .ok_or(MatchError::MissingActive(Side::Player))?;
    let opponent = next[Side::Opponent]
        .take_active()
        .ok_or(MatchError::MissingActive(Side::Opponent))?;

    let values = SideMap::from_pair(player.stat(stat), opponent.stat(stat));
    let revealed = SideMap::from_pair(player, opponent);

    let winner = match values[Side::Player].cmp(&values[Side::Opponent]) {
        Ordering::Equal => RoundWinner::Tie,
        Ordering::Greater => RoundWinner::Won(Side::Player),
        Ordering::Less => RoundWinner::Won(Side::Opponent),
    };

    match winner {
        RoundWinner::Tie => {
            for side in Side::BOTH {
                next_loot.push(revealed[side].clone());
            }
        }
        RoundWinner::Won(side) => {
            let won = [revealed[side].clone(), revealed[side.other()].clone()];
            let pile = &mut next[side];
            pile.discard(won);
            pile.discard(next_loot.take_all());
        }
    }

    Ok(Resolution {
        stat,
        winner,
        revealed,
        values,
        zones: next,
        loot: next_loot,
    })
}
