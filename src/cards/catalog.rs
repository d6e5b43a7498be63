//! Card catalog for lookup and filtering.
//!
//! The `CardCatalog` is the read-only input a match is built from: an ordered
//! collection of cards with unique ids. It provides lookup by `CardId`,
//! ordered iteration, and query-based filtering and sampling.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::definition::{Ascension, Card, CardId, Faction, Rarity};
use super::provider::is_known_hero_type;
use crate::core::{CatalogError, Shuffler};

/// Ordered, id-unique collection of cards.
///
/// ## Example
///
/// ```
/// use guardian_battles::cards::{Card, CardCatalog, CardId, Faction, Rarity};
///
/// let catalog = CardCatalog::new(vec![
///     Card::new("1", "Highlands Stable Boy", Faction::Highlanders, Rarity::Common),
///     Card::new("11", "Skeleton Remains of the Crypt", Faction::Keepers, Rarity::Common),
/// ])
/// .unwrap();
///
/// let found = catalog.get(&CardId::new("11")).unwrap();
/// assert_eq!(found.name, "Skeleton Remains of the Crypt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(card.id.to_string()));
            }
        }
        Ok(Self { cards, index })
    }

    /// Build a catalog, failing if it would be empty.
    pub fn non_empty(cards: Vec<Card>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        Self::new(cards)
    }

    /// The built-in roster with synthesized stats.
    #[must_use]
    pub fn roster() -> Self {
        let cards = super::roster::roster_cards();
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { cards, index }
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is present.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards matching every filter of `query`, in catalog order.
    ///
    /// The query limit is not applied here; see `sample`.
    pub fn query<'a>(&'a self, query: &'a CatalogQuery) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| query.matches(c))
    }

    /// Shuffle the matching cards and keep at most `query.limit()` of them.
    #[must_use]
    pub fn sample<S: Shuffler>(&self, query: &CatalogQuery, shuffler: &mut S) -> Vec<Card> {
        let mut picked: Vec<Card> = self.query(query).cloned().collect();
        shuffler.shuffle(&mut picked);
        picked.truncate(query.limit());
        picked
    }

    /// Sub-catalog of the matching cards.
    #[must_use]
    pub fn filtered(&self, query: &CatalogQuery) -> Self {
        let cards: Vec<Card> = self.query(query).cloned().collect();
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { cards, index }
    }
}

/// Catalog filter.
///
/// Class and name match case-insensitively as substrings; enum filters match
/// exactly. A hero type filters only when it is a known umbrella or roster
/// hero type, and an unknown ascension name deserializes to no filter.
/// Empty query matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub faction: Option<Faction>,
    pub rarity: Option<Rarity>,
    pub class: Option<String>,
    pub name: Option<String>,
    pub hero_type: Option<String>,
    #[serde(deserialize_with = "lenient_ascension")]
    pub ascension: Option<Ascension>,
    pub limit: Option<usize>,
}

fn lenient_ascension<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Ascension>, D::Error> {
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(Ascension::from_name))
}

impl CatalogQuery {
    /// Default sample size.
    pub const DEFAULT_LIMIT: usize = 20;
    /// Largest allowed sample size.
    pub const MAX_LIMIT: usize = 60;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_hero_type(mut self, hero_type: impl Into<String>) -> Self {
        self.hero_type = Some(hero_type.into());
        self
    }

    #[must_use]
    pub fn with_ascension(mut self, ascension: Ascension) -> Self {
        self.ascension = Some(ascension);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sample size, capped at `MAX_LIMIT`. Unset or zero means `DEFAULT_LIMIT`.
    #[must_use]
    pub fn limit(&self) -> usize {
        match self.limit {
            None | Some(0) => Self::DEFAULT_LIMIT,
            Some(n) => n.min(Self::MAX_LIMIT),
        }
    }

    /// Whether a card passes every filter.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.faction.map_or(true, |f| card.faction == f)
            && self.rarity.map_or(true, |r| card.rarity == r)
            && self.ascension.map_or(true, |a| card.ascension == a)
            && self.class.as_deref().map_or(true, |c| contains_ci(&card.class, c))
            && self.name.as_deref().map_or(true, |n| contains_ci(&card.name, n))
            && self
                .hero_type
                .as_deref()
                .filter(|h| is_known_hero_type(h))
                .map_or(true, |h| card.hero_type == h)
    }
}
