//! Core engine types: sides, RNG and the shuffle seam, configuration, errors.
//!
//! These are the building blocks shared by the catalog, zone, rules and match
//! layers.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{Controller, MatchConfig};
pub use error::{CatalogError, MatchError, SnapshotError};
pub use rng::{GameRng, GameRngState, KeepOrder, Shuffler};
pub use side::{Side, SideMap};
