//! Display projection of a match.

use serde::{Deserialize, Serialize};

use super::phase::{GameOverReason, MatchOutcome, Phase, RoundSnapshot};
use crate::core::{Controller, Side, SideMap};

/// Counts for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub controller: Controller,
    pub draw: usize,
    pub discard: usize,
    pub has_active: bool,
}

impl SideView {
    /// Cards this side can still play (draw + discard).
    #[must_use]
    pub fn reserve(&self) -> usize {
        self.draw + self.discard
    }
}

/// Everything a presentation layer shows between actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub phase: Phase,
    pub turn: Side,
    pub round: u32,
    pub sides: SideMap<SideView>,
    pub loot: usize,
    pub last_round: Option<RoundSnapshot>,
    pub game_over: Option<GameOverReason>,
    pub outcome: Option<MatchOutcome>,
}

impl MatchView {
    /// Whether the engine is waiting on a human choice.
    #[must_use]
    pub fn awaiting_human(&self) -> bool {
        self.phase == Phase::AwaitingChoice && !self.sides[self.turn].controller.is_automated()
    }
}
