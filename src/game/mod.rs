//! Match orchestration.
//!
//! ## Key Types
//!
//! - `Match`: The state machine driving a two-sided battle
//! - `Phase`: Where the match is in its round cycle
//! - `RoundSnapshot`: Report of the last resolved round
//! - `GameOverReason` / `MatchOutcome`: How and for whom the match ended
//! - `MatchEvent`: History entries, including the transient reveal step
//! - `MatchView`: Serializable projection for display

pub mod phase;
pub mod snapshot;
pub mod state;
pub mod view;

pub use phase::{GameOverReason, MatchEvent, MatchOutcome, Phase, RoundSnapshot};
pub use state::Match;
pub use view::{MatchView, SideView};
