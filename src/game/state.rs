//! The match state machine.
//!
//! A `Match` owns both sides' zones, the shared loot pile, the shuffler, and
//! everything needed to report on or resume the game. It is mutated only
//! through the phase operations below; each one checks the phase first and
//! rejects misuse without touching state.
//!
//! ## Operations by phase
//!
//! | Phase            | Accepted operation                         |
//! |------------------|--------------------------------------------|
//! | `AwaitingStart`  | `start`                                    |
//! | `AwaitingChoice` | `choose_stat`, `submit_automated_choice`   |
//! | `RoundResolved`  | `continue_round`                           |
//! | any              | `new_game`                                 |
//!
//! The match is generic over its `Shuffler`, so tests can lay decks out
//! exactly with `KeepOrder` while production uses a seeded `GameRng`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::phase::{GameOverReason, MatchEvent, MatchOutcome, Phase, RoundSnapshot};
use super::view::{MatchView, SideView};
use crate::cards::{Card, CardCatalog, CardId, StatKey};
use crate::core::{Controller, GameRng, MatchConfig, MatchError, Shuffler, Side, SideMap};
use crate::rules::{
    draw_next_round, resolve_round, split_catalog, Exhaustion, HighestStat, Resolution,
    StatChooser,
};
use crate::zones::{LootPile, ZoneState};

/// A two-sided stat battle.
///
/// ## Example
///
/// ```
/// use guardian_battles::cards::CardCatalog;
/// use guardian_battles::core::MatchConfig;
/// use guardian_battles::game::{Match, Phase};
///
/// let catalog = CardCatalog::roster();
/// let mut game = Match::new(&catalog, MatchConfig::default().with_seed(7));
///
/// assert_eq!(game.start().unwrap(), Phase::AwaitingChoice);
/// let stat = "power".parse().unwrap();
/// let report = game.choose_stat(stat).unwrap();
/// assert_eq!(report.round, 1);
/// assert_eq!(game.phase(), Phase::RoundResolved);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match<S = GameRng> {
    zones: SideMap<ZoneState>,
    loot: LootPile,
    phase: Phase,
    turn: Side,
    round: u32,
    pending: Option<Resolution>,
    last_round: Option<RoundSnapshot>,
    game_over: Option<GameOverReason>,
    controllers: SideMap<Controller>,
    auto_start: bool,
    history: Vector<MatchEvent>,
    shuffler: S,
}

impl Match<GameRng> {
    /// Deal a new match from `catalog`, shuffling with a `GameRng` seeded
    /// from `config` (entropy when unset).
    #[must_use]
    pub fn new(catalog: &CardCatalog, config: MatchConfig) -> Self {
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Self::with_shuffler(catalog, config, rng)
    }
}

impl<S: Shuffler> Match<S> {
    /// Deal a new match from `catalog` with the given shuffler.
    ///
    /// `config.seed` is ignored; the shuffler is the only random source.
    #[must_use]
    pub fn with_shuffler(catalog: &CardCatalog, config: MatchConfig, mut shuffler: S) -> Self {
        let (player, opponent) = split_catalog(catalog.cards(), &mut shuffler);
        Self::from_decks(player, opponent, config, shuffler)
    }

    /// Begin the first round.
    ///
    /// Ends the match at once if there are no cards or the first draw fails.
    pub fn start(&mut self) -> Result<Phase, MatchError> {
        self.expect_phase(Phase::AwaitingStart)?;
        Ok(self.begin())
    }

    /// Submit the stat for the current round and resolve it.
    ///
    /// Passes through `Revealing` and leaves the match in `RoundResolved`
    /// with the result pending until `continue_round`.
    pub fn choose_stat(&mut self, stat: StatKey) -> Result<RoundSnapshot, MatchError> {
        self.expect_phase(Phase::AwaitingChoice)?;
        let resolution = resolve_round(stat, &self.zones, &self.loot)?;

        let side = self.turn;
        self.phase = Phase::Revealing;
        self.history.push_back(MatchEvent::StatChosen { side, stat });

        self.round += 1;
        let snapshot = RoundSnapshot {
            round: self.round,
            stat,
            chosen_by: side,
            cards: resolution.revealed.clone(),
            values: resolution.values.clone(),
            winner: resolution.winner,
        };
        debug!(
            round = self.round,
            %stat,
            chosen_by = %side,
            player = snapshot.values[Side::Player],
            opponent = snapshot.values[Side::Opponent],
            winner = %snapshot.winner,
            "round resolved"
        );
        self.history.push_back(MatchEvent::Revealed {
            round: self.round,
            values: snapshot.values.clone(),
            winner: snapshot.winner,
        });

        self.pending = Some(resolution);
        self.last_round = Some(snapshot.clone());
        self.phase = Phase::RoundResolved;
        Ok(snapshot)
    }

    /// `choose_stat` by stat name (case-insensitive).
    pub fn choose_stat_named(&mut self, name: &str) -> Result<RoundSnapshot, MatchError> {
        let stat = name.parse::<StatKey>().map_err(|err| {
            warn!(stat = name, "rejected unknown stat");
            err
        })?;
        self.choose_stat(stat)
    }

    /// Let the heuristic choose for the side whose turn it is.
    ///
    /// Fails with `NotAutomated` when that side is controlled by a human.
    pub fn submit_automated_choice(&mut self) -> Result<RoundSnapshot, MatchError> {
        self.expect_phase(Phase::AwaitingChoice)?;
        let side = self.turn;
        if !self.controllers[side].is_automated() {
            warn!(%side, "automated choice requested for human side");
            return Err(MatchError::NotAutomated(side));
        }
        let card = self.zones[side]
            .active
            .as_ref()
            .ok_or(MatchError::MissingActive(side))?;
        let stat = HighestStat.choose(card);
        self.choose_stat(stat)
    }

    /// Commit the pending round and deal the next one.
    ///
    /// The round winner takes the turn; a tie leaves it where it was. Ends
    /// the match if either side has no cards left.
    pub fn continue_round(&mut self) -> Result<Phase, MatchError> {
        self.expect_phase(Phase::RoundResolved)?;
        let Some(resolution) = self.pending.take() else {
            return Err(MatchError::WrongPhase {
                expected: Phase::RoundResolved,
                actual: self.phase,
            });
        };

        let winner = resolution.winner;
        self.zones = resolution.zones;
        self.loot = resolution.loot;
        self.history.push_back(MatchEvent::RoundCommitted {
            round: self.round,
            winner,
        });
        debug!(
            round = self.round,
            player = self.zones[Side::Player].reserve(),
            opponent = self.zones[Side::Opponent].reserve(),
            loot = self.loot.len(),
            "round committed"
        );

        let empty: SmallVec<[Side; 2]> = self
            .zones
            .iter()
            .filter(|(_, z)| z.is_exhausted())
            .map(|(side, _)| side)
            .collect();
        if let Some(exhaustion) = Exhaustion::from_sides(&empty) {
            self.finish(GameOverReason::OutOfCards(exhaustion));
            return Ok(self.phase);
        }

        match draw_next_round(&self.zones, &mut self.shuffler) {
            Ok(zones) => {
                self.zones = zones;
                if let Some(side) = winner.side() {
                    self.turn = side;
                }
                self.phase = Phase::AwaitingChoice;
            }
            Err(exhaustion) => self.finish(GameOverReason::DrawFailed(exhaustion)),
        }
        Ok(self.phase)
    }

    /// Throw away the current game and deal a fresh one from `catalog`.
    ///
    /// Controllers, `auto_start`, and the shuffler carry over; the shuffler
    /// keeps its position, so successive games differ. Starts immediately
    /// when `auto_start` is set.
    pub fn new_game(&mut self, catalog: &CardCatalog) -> Phase {
        let (player, opponent) = split_catalog(catalog.cards(), &mut self.shuffler);
        let (zones, history) = deal(player, opponent);

        self.zones = zones;
        self.loot = LootPile::new();
        self.phase = Phase::AwaitingStart;
        self.turn = Side::Player;
        self.round = 0;
        self.pending = None;
        self.last_round = None;
        self.game_over = None;
        self.history = history;

        if self.auto_start {
            self.begin()
        } else {
            self.phase
        }
    }

    fn begin(&mut self) -> Phase {
        if self.card_count() == 0 {
            self.finish(GameOverReason::EmptyCatalog);
            return self.phase;
        }
        match draw_next_round(&self.zones, &mut self.shuffler) {
            Ok(zones) => {
                self.zones = zones;
                self.phase = Phase::AwaitingChoice;
                self.history.push_back(MatchEvent::Started);
                info!(turn = %self.turn, "match started");
            }
            Err(exhaustion) => self.finish(GameOverReason::DrawFailed(exhaustion)),
        }
        self.phase
    }
}

impl<S> Match<S> {
    /// Build a match from pre-arranged decks, front card first.
    #[must_use]
    pub fn from_decks(
        player: Vec<Card>,
        opponent: Vec<Card>,
        config: MatchConfig,
        shuffler: S,
    ) -> Self {
        let (zones, history) = deal(player, opponent);
        Self {
            zones,
            loot: LootPile::new(),
            phase: Phase::AwaitingStart,
            turn: Side::Player,
            round: 0,
            pending: None,
            last_round: None,
            game_over: None,
            controllers: config.controllers,
            auto_start: config.auto_start,
            history,
            shuffler,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose choice governs the current round.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Rounds resolved so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn zones(&self, side: Side) -> &ZoneState {
        &self.zones[side]
    }

    #[must_use]
    pub fn loot(&self) -> &LootPile {
        &self.loot
    }

    /// Result computed by `choose_stat`, not yet committed.
    #[must_use]
    pub fn pending(&self) -> Option<&Resolution> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn last_round(&self) -> Option<&RoundSnapshot> {
        self.last_round.as_ref()
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Winner or draw, once the match is over.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.game_over.map(MatchOutcome::from_reason)
    }

    #[must_use]
    pub fn controller(&self, side: Side) -> Controller {
        self.controllers[side]
    }

    /// Events since the last deal, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MatchEvent> {
        &self.history
    }

    #[must_use]
    pub fn shuffler(&self) -> &S {
        &self.shuffler
    }

    /// Heuristic choice for the current round, if it is an automated side's
    /// turn to choose.
    #[must_use]
    pub fn automated_choice(&self) -> Option<StatKey> {
        if self.phase != Phase::AwaitingChoice || !self.controllers[self.turn].is_automated() {
            return None;
        }
        self.zones[self.turn]
            .active
            .as_ref()
            .map(|card| HighestStat.choose(card))
    }

    /// Cards in play across both sides and the loot pile.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.zones.iter().map(|(_, z)| z.total()).sum::<usize>() + self.loot.len()
    }

    /// Multiset of card ids across every zone and the loot pile.
    #[must_use]
    pub fn census(&self) -> FxHashMap<CardId, usize> {
        let mut counts = FxHashMap::default();
        let cards = self
            .zones
            .iter()
            .flat_map(|(_, z)| z.cards())
            .chain(self.loot.iter());
        for card in cards {
            *counts.entry(card.id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Read-only projection for display.
    #[must_use]
    pub fn view(&self) -> MatchView {
        MatchView {
            phase: self.phase,
            turn: self.turn,
            round: self.round,
            sides: self.zones.map(|side, z| SideView {
                controller: self.controllers[side],
                draw: z.draw_count(),
                discard: z.discard_count(),
                has_active: z.has_active(),
            }),
            loot: self.loot.len(),
            last_round: self.last_round.clone(),
            game_over: self.game_over,
            outcome: self.outcome(),
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MatchError> {
        if self.phase == expected {
            return Ok(());
        }
        warn!(?expected, actual = ?self.phase, "rejected operation in wrong phase");
        Err(MatchError::WrongPhase {
            expected,
            actual: self.phase,
        })
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.phase = Phase::GameOver;
        self.game_over = Some(reason);
        self.history.push_back(MatchEvent::GameOver(reason));
        info!(
            ?reason,
            rounds = self.round,
            outcome = ?MatchOutcome::from_reason(reason),
            "game over"
        );
    }
}

fn deal(player: Vec<Card>, opponent: Vec<Card>) -> (SideMap<ZoneState>, Vector<MatchEvent>) {
    let zones = SideMap::from_pair(ZoneState::new(player), ZoneState::new(opponent));
    let cards = zones.map(|_, z| z.total());
    info!(
        player = cards[Side::Player],
        opponent = cards[Side::Opponent],
        "dealt new game"
    );
    (zones, Vector::unit(MatchEvent::NewGame { cards }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Faction, Rarity, StatLine};
    use crate::core::KeepOrder;
    use crate::rules::RoundWinner;

    fn card(id: &str, power: u32) -> Card {
        Card::new(id, id, Faction::Highlanders, Rarity::Common)
            .with_stats(StatLine::default().with(StatKey::Hp, 1).with(StatKey::Power, power))
    }

    fn human_vs_bot() -> MatchConfig {
        MatchConfig::default()
    }

    fn started(player: Vec<Card>, opponent: Vec<Card>) -> Match<KeepOrder> {
        let mut game = Match::from_decks(player, opponent, human_vs_bot(), KeepOrder);
        game.start().unwrap();
        game
    }

    #[test]
    fn test_start_draws_actives() {
        let game = started(vec![card("1", 3), card("2", 3)], vec![card("3", 3)]);

        assert_eq!(game.phase(), Phase::AwaitingChoice);
        assert_eq!(game.turn(), Side::Player);
        assert!(game.zones(Side::Player).has_active());
        assert!(game.zones(Side::Opponent).has_active());
        assert_eq!(game.history().back(), Some(&MatchEvent::Started));
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut game = started(vec![card("1", 3)], vec![card("2", 3)]);
        let before = game.clone();

        let err = game.start().unwrap_err();

        assert_eq!(
            err,
            MatchError::WrongPhase {
                expected: Phase::AwaitingStart,
                actual: Phase::AwaitingChoice
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_empty_catalog_ends_immediately() {
        let mut game = Match::from_decks(vec![], vec![], human_vs_bot(), KeepOrder);
        assert_eq!(game.start().unwrap(), Phase::GameOver);
        assert_eq!(game.game_over_reason(), Some(GameOverReason::EmptyCatalog));
        assert_eq!(game.outcome(), Some(MatchOutcome::Draw));
        assert_eq!(game.round(), 0);
    }

    #[test]
    fn test_one_sided_deal_fails_draw() {
        let mut game = Match::from_decks(vec![card("1", 3)], vec![], human_vs_bot(), KeepOrder);
        assert_eq!(game.start().unwrap(), Phase::GameOver);
        assert_eq!(
            game.game_over_reason(),
            Some(GameOverReason::DrawFailed(Exhaustion::Side(Side::Opponent)))
        );
        assert_eq!(game.outcome(), Some(MatchOutcome::Winner(Side::Player)));
    }

    #[test]
    fn test_choose_records_snapshot_and_events() {
        let mut game = started(vec![card("1", 9), card("2", 1)], vec![card("3", 4), card("4", 1)]);

        let report = game.choose_stat(StatKey::Power).unwrap();

        assert_eq!(report.round, 1);
        assert_eq!(report.chosen_by, Side::Player);
        assert_eq!(report.values, SideMap::from_pair(9, 4));
        assert_eq!(report.winner, RoundWinner::Won(Side::Player));
        assert_eq!(game.last_round(), Some(&report));
        assert!(game.pending().is_some());

        let tail: Vec<_> = game.history().iter().skip(2).cloned().collect();
        assert_eq!(
            tail,
            vec![
                MatchEvent::StatChosen { side: Side::Player, stat: StatKey::Power },
                MatchEvent::Revealed {
                    round: 1,
                    values: SideMap::from_pair(9, 4),
                    winner: RoundWinner::Won(Side::Player),
                },
            ]
        );
    }

    #[test]
    fn test_pending_not_applied_until_continue() {
        let mut game = started(vec![card("1", 9), card("2", 1)], vec![card("3", 4), card("4", 1)]);
        game.choose_stat(StatKey::Power).unwrap();

        // Live zones still hold the revealed cards
        assert!(game.zones(Side::Player).has_active());
        assert_eq!(game.zones(Side::Player).discard_count(), 0);

        assert_eq!(game.continue_round().unwrap(), Phase::AwaitingChoice);
        assert!(game.pending().is_none());
        assert_eq!(game.zones(Side::Player).discard_count(), 2);
    }

    #[test]
    fn test_winner_takes_turn_and_tie_keeps_it() {
        let mut game = started(
            vec![card("1", 1), card("2", 5), card("3", 1)],
            vec![card("4", 2), card("5", 5), card("6", 1)],
        );

        game.choose_stat(StatKey::Power).unwrap();
        game.continue_round().unwrap();
        assert_eq!(game.turn(), Side::Opponent);

        // 5 vs 5 tie
        game.choose_stat(StatKey::Power).unwrap();
        game.continue_round().unwrap();
        assert_eq!(game.turn(), Side::Opponent);
        assert_eq!(game.loot().len(), 2);
    }

    #[test]
    fn test_wrong_phase_choice_is_noop() {
        let mut game = started(vec![card("1", 2)], vec![card("2", 1)]);
        game.choose_stat(StatKey::Power).unwrap();
        let before = game.clone();

        assert!(game.choose_stat(StatKey::Hp).is_err());
        assert!(game.choose_stat_named("speed").is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_unknown_stat_name() {
        let mut game = started(vec![card("1", 2)], vec![card("2", 1)]);
        let before = game.clone();

        assert_eq!(
            game.choose_stat_named("charisma"),
            Err(MatchError::UnknownStat("charisma".into()))
        );
        assert_eq!(game, before);

        assert!(game.choose_stat_named(" POWER ").is_ok());
    }

    #[test]
    fn test_automated_choice_only_for_bot_turn() {
        let mut game = started(
            vec![card("1", 1), card("2", 1)],
            vec![card("3", 9), card("4", 9)],
        );
        assert_eq!(game.automated_choice(), None);
        assert_eq!(game.submit_automated_choice(), Err(MatchError::NotAutomated(Side::Player)));

        game.choose_stat(StatKey::Power).unwrap();
        game.continue_round().unwrap();
        assert_eq!(game.turn(), Side::Opponent);
        assert_eq!(game.automated_choice(), Some(StatKey::Power));

        let report = game.submit_automated_choice().unwrap();
        assert_eq!(report.chosen_by, Side::Opponent);
        assert_eq!(report.stat, StatKey::Power);
    }

    #[test]
    fn test_continue_requires_resolved() {
        let mut game = started(vec![card("1", 2)], vec![card("2", 1)]);
        assert!(matches!(
            game.continue_round(),
            Err(MatchError::WrongPhase { expected: Phase::RoundResolved, .. })
        ));
    }

    #[test]
    fn test_new_game_resets() {
        let catalog = CardCatalog::new(vec![card("1", 2), card("2", 1), card("3", 5)]).unwrap();
        let mut game = Match::with_shuffler(&catalog, human_vs_bot(), KeepOrder);
        game.start().unwrap();
        game.choose_stat(StatKey::Power).unwrap();

        assert_eq!(game.new_game(&catalog), Phase::AwaitingStart);
        assert_eq!(game.round(), 0);
        assert!(game.last_round().is_none());
        assert!(game.pending().is_none());
        assert_eq!(game.card_count(), 3);
        assert_eq!(game.history().len(), 1);

        let mut auto = Match::with_shuffler(
            &catalog,
            human_vs_bot().with_auto_start(true),
            KeepOrder,
        );
        assert_eq!(auto.new_game(&catalog), Phase::AwaitingChoice);
    }

    #[test]
    fn test_census_counts_every_card() {
        let mut game = started(vec![card("1", 7), card("2", 1)], vec![card("3", 7), card("4", 1)]);
        game.choose_stat(StatKey::Power).unwrap();
        game.continue_round().unwrap();

        let census = game.census();
        assert_eq!(census.len(), 4);
        assert!(census.values().all(|&n| n == 1));
        assert_eq!(game.card_count(), 4);
    }

    #[test]
    fn test_view_projection() {
        let game = started(vec![card("1", 7), card("2", 1)], vec![card("3", 7)]);
        let view = game.view();

        assert_eq!(view.phase, Phase::AwaitingChoice);
        assert_eq!(view.sides[Side::Player].draw, 1);
        assert_eq!(view.sides[Side::Opponent].draw, 0);
        assert!(view.sides[Side::Opponent].has_active);
        assert_eq!(view.sides[Side::Opponent].controller, Controller::Heuristic);
        assert_eq!(view.loot, 0);
        assert!(view.outcome.is_none());
    }
}
