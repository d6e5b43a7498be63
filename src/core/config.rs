//! Match configuration.
//!
//! A match is configured at creation time by providing:
//! - an optional shuffle seed (entropy when absent)
//! - a `Controller` per side (human input or the built-in heuristic)
//! - whether `new_game` should immediately start the next match
//!
//! Configuration is plain serde data, so hosts can keep it in a JSON file.

use serde::{Deserialize, Serialize};

use super::side::{Side, SideMap};

/// Who submits the stat choice for a side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Choices arrive from outside the engine.
    #[default]
    Human,
    /// Choices are produced by the highest-stat heuristic.
    Heuristic,
}

impl Controller {
    /// Whether the engine can produce this side's choice on its own.
    #[must_use]
    pub const fn is_automated(self) -> bool {
        matches!(self, Controller::Heuristic)
    }
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Controller per side.
    pub controllers: SideMap<Controller>,

    /// Start the next match right away on `new_game`.
    pub auto_start: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            controllers: SideMap::from_pair(Controller::Human, Controller::Heuristic),
            auto_start: false,
        }
    }
}

impl MatchConfig {
    /// Create a new config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a controller for one side.
    #[must_use]
    pub fn with_controller(mut self, side: Side, controller: Controller) -> Self {
        self.controllers[side] = controller;
        self
    }

    /// Create a new config with auto start toggled.
    #[must_use]
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Controller for a side.
    #[must_use]
    pub fn controller(&self, side: Side) -> Controller {
        self.controllers[side]
    }
}
