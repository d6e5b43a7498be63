//! Round rules: dealing, drawing, resolving, and automated choice.
//!
//! All functions here are pure over zones: they take the current zones and
//! return the next ones, leaving the caller to decide when to commit.
//!
//! ## Key Types
//!
//! - `Resolution`: Uncommitted result of a round
//! - `RoundWinner`: A side, or a tie
//! - `Exhaustion`: Which side(s) could not draw
//! - `StatChooser`: Strategy for automated sides (`HighestStat`)

pub mod chooser;
pub mod draw;
pub mod resolve;

pub use chooser::{HighestStat, StatChooser};
pub use draw::{draw_next_round, shuffle_deck, split_catalog, Exhaustion};
pub use resolve::{resolve_round, Resolution, RoundWinner};
