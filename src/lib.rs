//! # guardian-battles
//!
//! Match engine for a two-sided stat-comparison card battler.
//!
//! Two decks are dealt from a card catalog. Each round both sides reveal
//! their top card, one stat is chosen, and the higher value takes both cards
//! into its discard pile. Ties put the cards into a shared loot pile that the
//! next winner claims. A side that runs out of cards loses.
//!
//! ## Design Principles
//!
//! 1. **Pure rules, explicit commit**: Drawing and resolving return new zones;
//!    the `Match` decides when to apply them, so a result can be shown before
//!    it is committed.
//!
//! 2. **Injectable randomness**: Every shuffle goes through `Shuffler`. Real
//!    matches use a seeded `GameRng`; tests use `KeepOrder`.
//!
//! 3. **Resumable state**: A `Match` serializes losslessly (bincode or JSON),
//!    shuffler position included.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles are `im::Vector`s, so computing a
//!   pending round clones zones in O(1).
//!
//! - **Conservation**: Cards only move between zones. `Match::census` counts
//!   every card id across draw, discard, active, and loot.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG and shuffling, configuration, errors
//! - `cards`: Card records, stats, catalog, providers, built-in roster
//! - `zones`: Per-side draw/discard/active zones and the loot pile
//! - `rules`: Deal, draw, resolve, and the automated stat chooser
//! - `game`: The `Match` state machine, views, and snapshots
//!
//! ## Example
//!
//! ```
//! use guardian_battles::{CardCatalog, Match, MatchConfig, Phase};
//!
//! let catalog = CardCatalog::roster();
//! let mut game = Match::new(&catalog, MatchConfig::default().with_seed(1));
//! game.start().unwrap();
//!
//! while !game.is_over() && game.round() < 500 {
//!     match game.automated_choice() {
//!         Some(stat) => game.choose_stat(stat).unwrap(),
//!         None => game.choose_stat_named("power").unwrap(),
//!     };
//!     game.continue_round().unwrap();
//! }
//! assert!(game.is_over() || game.phase() == Phase::AwaitingChoice);
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod zones;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, Controller, GameRng, GameRngState, KeepOrder, MatchConfig, MatchError,
    Shuffler, Side, SideMap, SnapshotError,
};

pub use crate::cards::{
    Card, CardCatalog, CardId, CatalogProvider, CatalogQuery, Faction, Rarity, StatKey, StatLine,
};

pub use crate::zones::{LootPile, ZoneState};

pub use crate::rules::{Exhaustion, Resolution, RoundWinner};

pub use crate::game::{GameOverReason, Match, MatchEvent, MatchOutcome, MatchView, Phase, RoundSnapshot};
