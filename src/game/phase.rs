//! Match phases, round reports, and the event log.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, StatKey};
use crate::core::{Side, SideMap};
use crate::rules::{Exhaustion, RoundWinner};

/// Where a match is in its round cycle.
///
/// ```text
/// AwaitingStart -> AwaitingChoice -> Revealing -> RoundResolved -> AwaitingChoice ...
///        |                                              |
///        +---------------------> GameOver <-------------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    AwaitingStart,
    AwaitingChoice,
    /// Transient: entered and left within a single `choose_stat` call.
    Revealing,
    RoundResolved,
    GameOver,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::GameOver
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// No cards to deal at start.
    EmptyCatalog,
    /// A side had no cards left after a round was committed.
    OutOfCards(Exhaustion),
    /// The draw engine could not produce a pair of active cards.
    DrawFailed(Exhaustion),
}

impl GameOverReason {
    /// Side(s) that ran out, if any.
    #[must_use]
    pub fn exhaustion(self) -> Option<Exhaustion> {
        match self {
            Self::EmptyCatalog => None,
            Self::OutOfCards(e) | Self::DrawFailed(e) => Some(e),
        }
    }
}

/// Final result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(Side),
    Draw,
}

impl MatchOutcome {
    /// The side left holding cards wins; everything else is a draw.
    #[must_use]
    pub fn from_reason(reason: GameOverReason) -> Self {
        match reason.exhaustion() {
            Some(Exhaustion::Side(loser)) => Self::Winner(loser.other()),
            Some(Exhaustion::Both) | None => Self::Draw,
        }
    }
}

/// Report of the most recently resolved round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// 1-based round number.
    pub round: u32,
    pub stat: StatKey,
    pub chosen_by: Side,
    pub cards: SideMap<Card>,
    pub values: SideMap<u32>,
    pub winner: RoundWinner,
}

/// Entry in a match's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new deal was made. `cards` is the per-side deck size.
    NewGame { cards: SideMap<usize> },
    /// First actives drawn.
    Started,
    /// A choice was accepted; the match entered `Revealing`.
    StatChosen { side: Side, stat: StatKey },
    /// Result computed; the match entered `RoundResolved`.
    Revealed {
        round: u32,
        values: SideMap<u32>,
        winner: RoundWinner,
    },
    /// Pending result applied to the live zones.
    RoundCommitted { round: u32, winner: RoundWinner },
    GameOver(GameOverReason),
}
