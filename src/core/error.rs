//! Error types.
//!
//! - `MatchError`: misuse of the state machine (bad stat key, wrong phase).
//!   Rejected operations never mutate the match.
//! - `CatalogError`: the card catalog could not be built or fetched.
//! - `SnapshotError`: a match snapshot could not be encoded or decoded.

use thiserror::Error;

use super::side::Side;
use crate::game::Phase;

/// Rejected match operation. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("unknown stat key: {0:?}")]
    UnknownStat(String),
    #[error("operation requires phase {expected:?}, match is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("{0} has no automated controller")]
    NotAutomated(Side),
    #[error("{0} has no active card")]
    MissingActive(Side),
}

/// Failure to produce a card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate card id: {0}")]
    DuplicateId(String),
    #[error("catalog is empty")]
    Empty,
    #[error("provider failure: {0}")]
    Provider(String),
}

/// Failure to encode or decode a match snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("binary snapshot error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("json snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}
