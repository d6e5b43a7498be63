//! Card records - static card data.
//!
//! A `Card` is immutable once it enters a match: the engine only moves it
//! between piles and reads its stats.

use serde::{Deserialize, Serialize};

use super::stats::{StatKey, StatLine};

/// Opaque card identifier, unique within a catalog.
///
/// Ids are normalized on creation: upper-cased and left-padded with `0` to
/// eight characters, so `"1b"` and `"0000001B"` name the same card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Width ids are padded to.
    pub const WIDTH: usize = 8;

    /// Create a normalized card ID.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let upper = raw.as_ref().trim().to_uppercase();
        Self(format!("{:0>width$}", upper, width = Self::WIDTH))
    }

    /// Get the normalized id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Highlanders,
    Keepers,
}

/// Card rarity, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

/// Ascension rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ascension {
    #[default]
    Hero,
    Champion,
    Guardian,
}

impl Ascension {
    /// Parse an exact rank name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Hero" => Some(Ascension::Hero),
            "Champion" => Some(Ascension::Champion),
            "Guardian" => Some(Ascension::Guardian),
            _ => None,
        }
    }
}

/// Static card record.
///
/// ## Example
///
/// ```
/// use guardian_battles::cards::{Card, Faction, Rarity, StatKey};
///
/// let card = Card::new("1b", "Banshee of the Crypt", Faction::Keepers, Rarity::Rare)
///     .with_stat(StatKey::Power, 40);
///
/// assert_eq!(card.id.as_str(), "0000001B");
/// assert_eq!(card.stat(StatKey::Power), 40);
/// assert_eq!(card.stat(StatKey::Hp), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    pub faction: Faction,

    /// Free-text class ("Warrior", "Sharpshooter-Speed", ...).
    pub class: String,

    pub rarity: Rarity,

    /// Umbrella / hero-type tag.
    pub hero_type: String,

    #[serde(default)]
    pub ascension: Ascension,

    /// Attack-type tag.
    pub attack_type: String,

    /// Image path or URL, passed through for display.
    #[serde(default)]
    pub image: Option<String>,

    pub stats: StatLine,
}

impl Card {
    /// Create a card with empty tags and all stats at 0.
    #[must_use]
    pub fn new(id: impl AsRef<str>, name: impl Into<String>, faction: Faction, rarity: Rarity) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            faction,
            class: String::new(),
            rarity,
            hero_type: String::new(),
            ascension: Ascension::default(),
            attack_type: String::new(),
            image: None,
            stats: StatLine::default(),
        }
    }

    /// Set one stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, key: StatKey, value: u32) -> Self {
        self.stats = self.stats.with(key, value);
        self
    }

    /// Replace the whole stat line (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: StatLine) -> Self {
        self.stats = stats;
        self
    }

    /// Set class, hero type and attack type (builder pattern).
    #[must_use]
    pub fn with_tags(
        mut self,
        class: impl Into<String>,
        hero_type: impl Into<String>,
        attack_type: impl Into<String>,
    ) -> Self {
        self.class = class.into();
        self.hero_type = hero_type.into();
        self.attack_type = attack_type.into();
        self
    }

    /// Read one stat.
    #[must_use]
    pub fn stat(&self, key: StatKey) -> u32 {
        self.stats.get(key)
    }
}
