//! Zone model for card locations.
//!
//! Each side owns a draw pile, a discard pile and an active slot; both sides
//! share one loot pile.
//!
//! ## Key Types
//!
//! - `ZoneState`: One side's draw/discard/active zones
//! - `LootPile`: Tied cards held for the next round's winner

pub mod pile;

pub use pile::{LootPile, ZoneState};
