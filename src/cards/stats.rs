//! The nine-stat vector every card carries.
//!
//! ## Keys
//!
//! `hp, prana, focus, stamina, strength, intelligence, defense, speed, power`,
//! always in that canonical order. Rounds compare exactly one key.
//!
//! A `StatLine` missing keys in its source data reads those keys as 0.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::MatchError;

/// One of the nine comparable stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Hp,
    Prana,
    Focus,
    Stamina,
    Strength,
    Intelligence,
    Defense,
    Speed,
    Power,
}

impl StatKey {
    /// All keys in canonical order.
    pub const ALL: [StatKey; 9] = [
        StatKey::Hp,
        StatKey::Prana,
        StatKey::Focus,
        StatKey::Stamina,
        StatKey::Strength,
        StatKey::Intelligence,
        StatKey::Defense,
        StatKey::Speed,
        StatKey::Power,
    ];

    /// Lowercase key name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Prana => "prana",
            StatKey::Focus => "focus",
            StatKey::Stamina => "stamina",
            StatKey::Strength => "strength",
            StatKey::Intelligence => "intelligence",
            StatKey::Defense => "defense",
            StatKey::Speed => "speed",
            StatKey::Power => "power",
        }
    }

    /// Position in canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKey {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        StatKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| MatchError::UnknownStat(s.to_string()))
    }
}

/// Nine stat values, one per `StatKey`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    pub hp: u32,
    pub prana: u32,
    pub focus: u32,
    pub stamina: u32,
    pub strength: u32,
    pub intelligence: u32,
    pub defense: u32,
    pub speed: u32,
    pub power: u32,
}

impl StatLine {
    /// Build from values in canonical order.
    #[must_use]
    pub const fn from_array(v: [u32; 9]) -> Self {
        Self {
            hp: v[0],
            prana: v[1],
            focus: v[2],
            stamina: v[3],
            strength: v[4],
            intelligence: v[5],
            defense: v[6],
            speed: v[7],
            power: v[8],
        }
    }

    /// Values in canonical order.
    #[must_use]
    pub const fn to_array(&self) -> [u32; 9] {
        [
            self.hp,
            self.prana,
            self.focus,
            self.stamina,
            self.strength,
            self.intelligence,
            self.defense,
            self.speed,
            self.power,
        ]
    }

    /// Read one stat.
    #[must_use]
    pub const fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Prana => self.prana,
            StatKey::Focus => self.focus,
            StatKey::Stamina => self.stamina,
            StatKey::Strength => self.strength,
            StatKey::Intelligence => self.intelligence,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::Power => self.power,
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, key: StatKey, value: u32) -> Self {
        *self.get_mut(key) = value;
        self
    }

    /// Mutable access to one stat.
    pub fn get_mut(&mut self, key: StatKey) -> &mut u32 {
        match key {
            StatKey::Hp => &mut self.hp,
            StatKey::Prana => &mut self.prana,
            StatKey::Focus => &mut self.focus,
            StatKey::Stamina => &mut self.stamina,
            StatKey::Strength => &mut self.strength,
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Defense => &mut self.defense,
            StatKey::Speed => &mut self.speed,
            StatKey::Power => &mut self.power,
        }
    }

    /// (key, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        StatKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Sum of all nine values.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.to_array().iter().sum()
    }
}
