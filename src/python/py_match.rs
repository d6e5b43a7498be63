//! Match bindings for Python.

use std::borrow::Cow;

use pyo3::prelude::*;

use crate::cards::{CardCatalog, CatalogProvider, JsonFileProvider};
use crate::core::{Controller, MatchConfig, Side};
use crate::game::Match;

use super::py_cards::PyCard;
use super::value_error;

/// Python wrapper for a match against the built-in heuristic.
///
/// Phases and sides are reported as strings; `view()` and `last_round()`
/// return JSON text for the presentation layer to decode.
#[pyclass(name = "Match")]
pub struct PyMatch {
    game: Match,
    catalog: CardCatalog,
}

#[pymethods]
impl PyMatch {
    /// Create a new match.
    ///
    /// # Arguments
    /// - seed: Shuffle seed (entropy when omitted)
    /// - catalog_path: Card content file (built-in roster when omitted)
    /// - opponent_human: Take opponent choices from Python too
    /// - auto_start: Start immediately on `new_game`
    #[new]
    #[pyo3(signature = (seed = None, catalog_path = None, opponent_human = false, auto_start = false))]
    fn new(
        seed: Option<u64>,
        catalog_path: Option<String>,
        opponent_human: bool,
        auto_start: bool,
    ) -> PyResult<Self> {
        let catalog = match catalog_path {
            Some(path) => JsonFileProvider::new(path).fetch().map_err(value_error)?,
            None => CardCatalog::roster(),
        };
        let opponent = if opponent_human {
            Controller::Human
        } else {
            Controller::Heuristic
        };
        let mut config = MatchConfig::default()
            .with_controller(Side::Opponent, opponent)
            .with_auto_start(auto_start);
        config.seed = seed;

        let game = Match::new(&catalog, config);
        Ok(Self { game, catalog })
    }

    fn start(&mut self) -> PyResult<String> {
        let phase = self.game.start().map_err(value_error)?;
        Ok(format!("{phase:?}"))
    }

    /// Submit a stat by name. Returns the round report as JSON.
    fn choose_stat(&mut self, stat: &str) -> PyResult<String> {
        let report = self.game.choose_stat_named(stat).map_err(value_error)?;
        serde_json::to_string(&report).map_err(value_error)
    }

    /// Heuristic stat for the current round, if it is the bot's turn.
    fn automated_choice(&self) -> Option<String> {
        self.game.automated_choice().map(|k| k.to_string())
    }

    fn submit_automated_choice(&mut self) -> PyResult<String> {
        let report = self.game.submit_automated_choice().map_err(value_error)?;
        serde_json::to_string(&report).map_err(value_error)
    }

    fn continue_round(&mut self) -> PyResult<String> {
        let phase = self.game.continue_round().map_err(value_error)?;
        Ok(format!("{phase:?}"))
    }

    fn new_game(&mut self) -> String {
        format!("{:?}", self.game.new_game(&self.catalog))
    }

    #[getter]
    fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }

    #[getter]
    fn turn(&self) -> String {
        self.game.turn().to_string()
    }

    #[getter]
    fn round(&self) -> u32 {
        self.game.round()
    }

    fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Active card for "player" or "opponent".
    fn active(&self, side: &str) -> PyResult<Option<PyCard>> {
        let side = parse_side(side)?;
        Ok(self.game.zones(side).active.clone().map(PyCard))
    }

    fn view(&self) -> PyResult<String> {
        serde_json::to_string(&self.game.view()).map_err(value_error)
    }

    fn last_round(&self) -> PyResult<Option<String>> {
        self.game
            .last_round()
            .map(|r| serde_json::to_string(r).map_err(value_error))
            .transpose()
    }

    fn to_bytes(&self) -> PyResult<Cow<'static, [u8]>> {
        Ok(Cow::Owned(self.game.to_bytes().map_err(value_error)?))
    }

    /// Restore a match saved with `to_bytes`, keeping this object's catalog.
    fn load_bytes(&mut self, data: &[u8]) -> PyResult<()> {
        self.game = Match::from_bytes(data).map_err(value_error)?;
        Ok(())
    }

    fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Match(phase={:?}, turn={}, round={})",
            self.game.phase(),
            self.game.turn(),
            self.game.round()
        )
    }
}

fn parse_side(side: &str) -> PyResult<Side> {
    match side {
        "player" => Ok(Side::Player),
        "opponent" => Ok(Side::Opponent),
        other => Err(value_error(format!("unknown side: {other}"))),
    }
}
