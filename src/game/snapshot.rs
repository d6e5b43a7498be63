//! Match snapshots.
//!
//! A snapshot captures the whole match (zones, loot, phase, turn, pending
//! result, history, shuffler position) so a restored match continues exactly
//! where the saved one left off.
//!
//! - `to_bytes` / `from_bytes`: compact bincode encoding
//! - `to_json` / `from_json`: readable JSON encoding

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::state::Match;
use crate::core::SnapshotError;

impl<S: Serialize + DeserializeOwned> Match<S> {
    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a bincode snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
