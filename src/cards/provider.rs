//! Catalog providers.
//!
//! The match engine consumes a `CardCatalog`; where it comes from is the
//! provider's business. Providers report failures as `CatalogError` and never
//! retry. `CachedProvider` holds a fetched catalog until it is invalidated.
//!
//! `RosterOverlayProvider` patches backing-store rows onto the built-in
//! roster, and `FallbackProvider` swaps in another provider (by default the
//! roster) when a fetch fails or comes back empty.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use super::catalog::CardCatalog;
use super::definition::{Ascension, Card, CardId, Faction, Rarity};
use super::generate::{synthesize_stats, StatSeed};
use super::roster::{ascension_for, roster_cards};
use super::stats::{StatKey, StatLine};
use crate::core::CatalogError;

/// Source of card catalogs.
pub trait CatalogProvider {
    /// Produce a fresh catalog.
    fn fetch(&self) -> Result<CardCatalog, CatalogError>;
}

/// The built-in roster.
#[derive(Clone, Copy, Debug, Default)]
pub struct RosterProvider;

impl CatalogProvider for RosterProvider {
    fn fetch(&self) -> Result<CardCatalog, CatalogError> {
        Ok(CardCatalog::roster())
    }
}

/// Known umbrella hero types.
pub const UMBRELLAS: [&str; 7] = [
    "Vanguard",
    "Swiftborn",
    "Caster",
    "Support",
    "Healer",
    "Hybrid",
    "Specialist",
];

/// Hero types the built-in roster weights its stats by.
pub const ROSTER_HERO_TYPES: [&str; 5] = ["Tank", "DPS", "Support", "Hybrid", "Specialist"];

/// Whether `hero_type` is an umbrella or a roster hero type.
#[must_use]
pub fn is_known_hero_type(hero_type: &str) -> bool {
    UMBRELLAS.contains(&hero_type) || ROSTER_HERO_TYPES.contains(&hero_type)
}

/// Keyword families checked in order; first hit wins.
const UMBRELLA_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Vanguard",
        &[
            "tank", "guardian", "juggernaut", "brute", "warrior", "fighter", "barbarian", "paladin",
            "crusader", "holy knight", "holyknight", "monk", "martial",
        ],
    ),
    (
        "Swiftborn",
        &["archer", "ranger", "hunter", "assassin", "rogue", "thief", "skirmisher", "scout", "speedster"],
    ),
    ("Healer", &["healer", "cleric", "priest", "sage", "medic", "mender", "restorer"]),
    (
        "Support",
        &[
            "bard", "tactician", "engineer", "trap", "trickster", "controller", "warden", "keeper",
            "alchemist", "herbalist",
        ],
    ),
    (
        "Caster",
        &[
            "mage", "wizard", "sorcerer", "elementalist", "necromancer", "conjurer", "shaman", "druid",
            "enchanter", "illusionist", "morpher", "summoner",
        ],
    ),
    (
        "Hybrid",
        &[
            "battle-mage", "battle mage", "battlemage", "spellblade", "death knight", "deathknight",
            "dark paladin", "mystic knight", "rune knight", "magical ranger",
        ],
    ),
];

/// Best-effort umbrella for a class name. Falls back to `Specialist`.
#[must_use]
pub fn umbrella_for_class(class: &str) -> &'static str {
    let lower = class.to_lowercase();
    UMBRELLA_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(*w)))
        .map_or("Specialist", |&(umbrella, _)| umbrella)
}

/// One row of the flat content file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    id: String,
    name: String,
    faction: Faction,
    class: String,
    rarity: Rarity,
    #[serde(default)]
    hero_type: Option<String>,
    #[serde(default)]
    ascension_rank: Option<String>,
    #[serde(default)]
    attack_type: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    hp: Option<f64>,
    #[serde(default)]
    prana: Option<f64>,
    #[serde(default)]
    focus: Option<f64>,
    #[serde(default)]
    stamina: Option<f64>,
    #[serde(default)]
    strength: Option<f64>,
    #[serde(default)]
    intelligence: Option<f64>,
    #[serde(default)]
    defense: Option<f64>,
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    power: Option<f64>,
}

impl RawCard {
    fn raw_stat(&self, key: StatKey) -> Option<f64> {
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

    /// Umbrella and ascension from legacy and explicit fields.
    fn type_and_ascension(&self) -> (String, Ascension) {
        let legacy = self.hero_type.as_deref();
        let ascension = self
            .ascension_rank
            .as_deref()
            .and_then(Ascension::from_name)
            .or_else(|| legacy.and_then(Ascension::from_name))
            .unwrap_or_default();
        let umbrella = match legacy {
            Some(h) if UMBRELLAS.contains(&h) => h.to_string(),
            _ => umbrella_for_class(&self.class).to_string(),
        };
        (umbrella, ascension)
    }

    fn into_card(self, index: usize) -> Card {
        let (umbrella, ascension) = self.type_and_ascension();
        let weight_type = self.hero_type.as_deref().unwrap_or(&umbrella);
        let synthesized = synthesize_stats(
            StatSeed {
                id: &self.id,
                name: &self.name,
                faction: self.faction,
                rarity: self.rarity,
                hero_type: weight_type,
            },
            index,
        );

        let mut stats = StatLine::default();
        for key in StatKey::ALL {
            *stats.get_mut(key) = match self.raw_stat(key) {
                Some(v) if v.is_finite() && v >= 0.0 => v.round() as u32,
                other => {
                    if other.is_some() {
                        warn!(card = %self.id, stat = %key, "unusable stat value, synthesizing");
                    }
                    synthesized.get(key)
                }
            };
        }

        let mut card = Card::new(&self.id, self.name, self.faction, self.rarity)
            .with_tags(self.class, umbrella, self.attack_type)
            .with_stats(stats);
        card.ascension = ascension;
        card.image = self.image;
        card
    }
}

/// Parse a flat content-file JSON array into a catalog.
pub fn parse_str(json: &str) -> Result<CardCatalog, CatalogError> {
    let rows: Vec<RawCard> = serde_json::from_str(json)?;
    let cards = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_card(i))
        .collect();
    CardCatalog::non_empty(cards)
}

/// Reads the flat JSON content file.
#[derive(Clone, Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for JsonFileProvider {
    fn fetch(&self) -> Result<CardCatalog, CatalogError> {
        let json = std::fs::read_to_string(&self.path)?;
        let catalog = parse_str(&json)?;
        debug!(path = %self.path.display(), cards = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }
}

/// Backing store of per-card override rows.
pub trait RowSource {
    fn fetch_rows(&self) -> Result<Vec<OverlayRow>, CatalogError>;
}

/// Row ids arrive as strings or bare numbers.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn card_id(&self) -> CardId {
        match self {
            RawId::Text(s) => CardId::new(s),
            RawId::Number(n) => CardId::new(n.to_string()),
        }
    }
}

/// Override row for one roster card. Every field but the id is optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRow {
    id: RawId,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub rarity: Option<Rarity>,
    #[serde(default, alias = "hero_type")]
    pub hero_type: Option<String>,
    #[serde(default, alias = "attack_type")]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub faction: Option<Faction>,
    #[serde(default)]
    hp: Option<f64>,
    #[serde(default)]
    prana: Option<f64>,
    #[serde(default)]
    focus: Option<f64>,
    #[serde(default)]
    stamina: Option<f64>,
    #[serde(default)]
    strength: Option<f64>,
    #[serde(default)]
    intelligence: Option<f64>,
    #[serde(default)]
    defense: Option<f64>,
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    power: Option<f64>,
}

impl OverlayRow {
    /// Normalized id of the card this row patches.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.id.card_id()
    }

    fn raw_stat(&self, key: StatKey) -> Option<f64> {
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

    /// Patch `card` in place. Unusable stat values keep the card's own.
    fn apply(self, card: &mut Card) {
        for key in StatKey::ALL {
            match self.raw_stat(key) {
                Some(v) if v.is_finite() && v >= 0.0 => {
                    *card.stats.get_mut(key) = v.round() as u32;
                }
                Some(_) => {
                    warn!(card = %card.id, stat = %key, "unusable override, keeping roster value");
                }
                None => {}
            }
        }
        if let Some(class) = self.class {
            card.ascension = ascension_for(&class);
            card.class = class;
        }
        if let Some(rarity) = self.rarity {
            card.rarity = rarity;
        }
        if let Some(hero_type) = self.hero_type {
            card.hero_type = hero_type;
        }
        if let Some(attack_type) = self.attack_type {
            card.attack_type = attack_type;
        }
        if let Some(faction) = self.faction {
            card.faction = faction;
        }
    }
}

/// Parse a JSON array of override rows.
pub fn parse_rows(json: &str) -> Result<Vec<OverlayRow>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

impl RowSource for JsonFileProvider {
    fn fetch_rows(&self) -> Result<Vec<OverlayRow>, CatalogError> {
        let json = std::fs::read_to_string(&self.path)?;
        parse_rows(&json)
    }
}

/// The built-in roster with backing-store rows patched on top.
///
/// Rows are matched by normalized id; a later row for the same id wins.
/// Stats are synthesized from the roster entry first, so a row only replaces
/// the values it carries. Rows for ids outside the roster are ignored. The
/// result keeps roster order. No rows at all is `CatalogError::Empty`.
#[derive(Clone, Debug)]
pub struct RosterOverlayProvider<R> {
    rows: R,
}

impl<R: RowSource> RosterOverlayProvider<R> {
    #[must_use]
    pub fn new(rows: R) -> Self {
        Self { rows }
    }

    /// The wrapped row source.
    #[must_use]
    pub fn rows(&self) -> &R {
        &self.rows
    }
}

impl<R: RowSource> CatalogProvider for RosterOverlayProvider<R> {
    fn fetch(&self) -> Result<CardCatalog, CatalogError> {
        let rows = self.rows.fetch_rows()?;
        if rows.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id: FxHashMap<CardId, OverlayRow> = FxHashMap::default();
        for row in rows {
            by_id.insert(row.card_id(), row);
        }

        let mut cards = roster_cards();
        let mut applied = 0usize;
        for card in &mut cards {
            if let Some(row) = by_id.remove(&card.id) {
                row.apply(card);
                applied += 1;
            }
        }
        if !by_id.is_empty() {
            debug!(ignored = by_id.len(), "override rows outside the roster");
        }
        debug!(applied, "roster overlay built");
        CardCatalog::new(cards)
    }
}

/// Tries `primary`; on failure or an empty catalog, logs and asks `fallback`.
#[derive(Clone, Debug)]
pub struct FallbackProvider<P, F = RosterProvider> {
    primary: P,
    fallback: F,
}

impl<P: CatalogProvider, F: CatalogProvider> FallbackProvider<P, F> {
    #[must_use]
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: CatalogProvider> FallbackProvider<P> {
    /// Fall back to the built-in roster.
    #[must_use]
    pub fn or_roster(primary: P) -> Self {
        Self::new(primary, RosterProvider)
    }
}

impl<P: CatalogProvider, F: CatalogProvider> CatalogProvider for FallbackProvider<P, F> {
    fn fetch(&self) -> Result<CardCatalog, CatalogError> {
        match self.primary.fetch() {
            Ok(catalog) if !catalog.is_empty() => Ok(catalog),
            Ok(_) => {
                warn!("catalog fetch returned no cards, using fallback");
                self.fallback.fetch()
            }
            Err(error) => {
                warn!(%error, "catalog fetch failed, using fallback");
                self.fallback.fetch()
            }
        }
    }
}

/// Lazily fetched, explicitly invalidated catalog cache.
///
/// Owned by whoever needs the catalog; there is no process-wide cache.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    cached: Option<CardCatalog>,
}

impl<P: CatalogProvider> CachedProvider<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self { inner, cached: None }
    }

    /// The cached catalog, fetching it on first use.
    ///
    /// A failed fetch leaves the cache empty so the next call tries again.
    pub fn catalog(&mut self) -> Result<&CardCatalog, CatalogError> {
        let catalog = match self.cached.take() {
            Some(catalog) => catalog,
            None => {
                let catalog = self.inner.fetch()?;
                debug!(cards = catalog.len(), "catalog cache filled");
                catalog
            }
        };
        Ok(self.cached.insert(catalog))
    }

    /// Drop the cached catalog.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("catalog cache invalidated");
        }
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// The wrapped provider.
    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::CardId;
    use std::cell::Cell;

    const SAMPLE: &str = r#"[
        {"id": "1", "name": "Highlands Stable Boy", "faction": "Highlanders",
         "class": "Warrior-Fighter", "rarity": "Common", "heroType": "Hero",
         "attackType": "physical",
         "hp": 40, "prana": 20, "focus": 20, "stamina": 38, "strength": 36,
         "intelligence": 20, "defense": 40, "speed": 26, "power": 30},
        {"id": "1b", "name": "Banshee of the Crypt", "faction": "Keepers",
         "class": "Support", "rarity": "Rare", "heroType": "Support",
         "ascensionRank": "Champion", "attackType": "support",
         "power": 55}
    ]"#;

    #[test]
    fn test_umbrella_for_class() {
        assert_eq!(umbrella_for_class("Warrior-Balanced"), "Vanguard");
        assert_eq!(umbrella_for_class("Sharpshooter"), "Specialist");
        assert_eq!(umbrella_for_class("Highland Archer"), "Swiftborn");
        assert_eq!(umbrella_for_class("Healer"), "Healer");
        assert_eq!(umbrella_for_class("Mage"), "Caster");
        assert_eq!(umbrella_for_class("Bard"), "Support");
    }

    #[test]
    fn test_parse_flat_rows() {
        let catalog = parse_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let boy = catalog.get(&CardId::new("1")).unwrap();
        assert_eq!(boy.hero_type, "Vanguard");
        assert_eq!(boy.ascension, Ascension::Hero);
        assert_eq!(boy.stat(StatKey::Defense), 40);

        let banshee = catalog.get(&CardId::new("0000001B")).unwrap();
        assert_eq!(banshee.hero_type, "Support");
        assert_eq!(banshee.ascension, Ascension::Champion);
        assert_eq!(banshee.stat(StatKey::Power), 55);
        // Missing stats come from synthesis, never zero
        assert!(banshee.stat(StatKey::Hp) >= crate::cards::generate::STAT_FLOOR);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_str("[]"), Err(CatalogError::Empty)));
        assert!(matches!(parse_str("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let provider = JsonFileProvider::new("/definitely/not/here/cards.json");
        assert!(matches!(provider.fetch(), Err(CatalogError::Io(_))));
    }

    struct CountingProvider {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CatalogProvider for CountingProvider {
        fn fetch(&self) -> Result<CardCatalog, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(CatalogError::Provider("offline".into()))
            } else {
                Ok(CardCatalog::roster())
            }
        }
    }

    #[test]
    fn test_cache_fetches_once_until_invalidated() {
        let mut cache = CachedProvider::new(CountingProvider {
            calls: Cell::new(0),
            fail: false,
        });

        assert!(!cache.is_cached());
        assert_eq!(cache.catalog().unwrap().len(), 54);
        assert_eq!(cache.catalog().unwrap().len(), 54);
        assert_eq!(cache.inner().calls.get(), 1);

        cache.invalidate();
        assert!(!cache.is_cached());
        cache.catalog().unwrap();
        assert_eq!(cache.inner().calls.get(), 2);
    }

    struct StaticRows(&'static str);

    impl RowSource for StaticRows {
        fn fetch_rows(&self) -> Result<Vec<OverlayRow>, CatalogError> {
            parse_rows(self.0)
        }
    }

    #[test]
    fn test_overlay_replaces_carried_fields_only() {
        let provider = RosterOverlayProvider::new(StaticRows(
            r#"[{"id": 1, "power": 99, "class": "Paladin", "hero_type": "Vanguard"}]"#,
        ));
        let catalog = provider.fetch().unwrap();
        let roster = CardCatalog::roster();
        assert_eq!(catalog.len(), 54);

        let patched = catalog.get(&CardId::new("1")).unwrap();
        let original = roster.get(&CardId::new("1")).unwrap();
        assert_eq!(patched.stat(StatKey::Power), 99);
        assert_eq!(patched.stat(StatKey::Hp), original.stat(StatKey::Hp));
        assert_eq!(patched.class, "Paladin");
        assert_eq!(patched.hero_type, "Vanguard");
        assert_eq!(patched.rarity, original.rarity);

        // Untouched cards and ordering come straight from the roster
        let ids: Vec<_> = catalog.iter().map(|c| c.id.clone()).collect();
        let roster_ids: Vec<_> = roster.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, roster_ids);
        assert_eq!(catalog.get(&CardId::new("2")), roster.get(&CardId::new("2")));
    }

    #[test]
    fn test_overlay_class_sets_rank() {
        let provider = RosterOverlayProvider::new(StaticRows(r#"[{"id": "0c", "class": "Guardian"}]"#));
        let catalog = provider.fetch().unwrap();
        let pope = catalog.get(&CardId::new("C")).unwrap();
        assert_eq!(pope.ascension, Ascension::Guardian);
    }

    #[test]
    fn test_overlay_ignores_unknown_ids_and_bad_values() {
        let provider = RosterOverlayProvider::new(StaticRows(
            r#"[{"id": "FFFF", "power": 1}, {"id": "00000002", "hp": -5}]"#,
        ));
        let catalog = provider.fetch().unwrap();
        assert_eq!(catalog.len(), 54);
        assert!(!catalog.contains(&CardId::new("FFFF")));

        let roster = CardCatalog::roster();
        assert_eq!(catalog.get(&CardId::new("2")), roster.get(&CardId::new("2")));
    }

    #[test]
    fn test_overlay_without_rows_is_empty() {
        let provider = RosterOverlayProvider::new(StaticRows("[]"));
        assert!(matches!(provider.fetch(), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_fallback_to_roster() {
        let empty = FallbackProvider::or_roster(RosterOverlayProvider::new(StaticRows("[]")));
        assert_eq!(empty.fetch().unwrap().cards(), CardCatalog::roster().cards());

        let broken = FallbackProvider::or_roster(RosterOverlayProvider::new(StaticRows("{")));
        assert_eq!(broken.fetch().unwrap().len(), 54);

        let healthy = FallbackProvider::or_roster(RosterOverlayProvider::new(StaticRows(
            r#"[{"id": "1", "speed": 77}]"#,
        )));
        let catalog = healthy.fetch().unwrap();
        assert_eq!(catalog.get(&CardId::new("1")).unwrap().stat(StatKey::Speed), 77);
    }

    #[test]
    fn test_fallback_uses_second_provider() {
        let provider = FallbackProvider::new(
            CountingProvider {
                calls: Cell::new(0),
                fail: true,
            },
            RosterProvider,
        );
        assert_eq!(provider.fetch().unwrap().len(), 54);
    }

    #[test]
    fn test_cache_does_not_keep_failures() {
        let mut cache = CachedProvider::new(CountingProvider {
            calls: Cell::new(0),
            fail: true,
        });

        assert!(matches!(cache.catalog(), Err(CatalogError::Provider(msg)) if msg == "offline"));
        assert!(cache.catalog().is_err());
        assert_eq!(cache.inner().calls.get(), 2);
        assert!(!cache.is_cached());
    }
}
