//! Card system: records, stats, catalog, providers.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card record with a nine-stat `StatLine`
//! - `StatKey`: The nine comparable stats
//! - `CardCatalog`: Ordered, id-unique card collection
//! - `CatalogProvider`: Where catalogs come from (built-in roster, JSON file,
//!   roster overlay, fallback)
//! - `CachedProvider`: Owned lazy cache around a provider

pub mod catalog;
pub mod definition;
pub mod generate;
pub mod provider;
pub mod roster;
pub mod stats;

pub use catalog::{CardCatalog, CatalogQuery};
pub use definition::{Ascension, Card, CardId, Faction, Rarity};
pub use generate::{synthesize_stats, StatSeed};
pub use provider::{
    CachedProvider, CatalogProvider, FallbackProvider, JsonFileProvider, OverlayRow, RosterOverlayProvider,
    RosterProvider, RowSource,
};
pub use stats::{StatKey, StatLine};
