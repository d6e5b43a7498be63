//! Catalog loading, filtering, and caching.

use std::fs;
use std::path::PathBuf;

use guardian_battles::cards::provider::parse_str;
use guardian_battles::cards::{
    Ascension, CachedProvider, CardCatalog, CardId, CatalogProvider, CatalogQuery, Faction,
    FallbackProvider, JsonFileProvider, Rarity, RosterOverlayProvider, RosterProvider, StatKey,
};
use guardian_battles::core::{CatalogError, GameRng, KeepOrder, MatchConfig, Side};
use guardian_battles::game::{Match, Phase};

const CONTENT: &str = r#"[
    {"id": "101", "name": "Highland Archer", "faction": "Highlanders",
     "class": "Archer", "rarity": "Uncommon", "attackType": "ranged",
     "hp": 30, "prana": 25, "focus": 33, "stamina": 28, "strength": 31,
     "intelligence": 24, "defense": 22, "speed": 48, "power": 44},
    {"id": "102", "name": "Crypt Keeper", "faction": "Keepers",
     "class": "Necromancer", "rarity": "Legendary", "heroType": "Guardian",
     "attackType": "magical",
     "hp": 35, "prana": 50, "focus": 41, "stamina": 27, "strength": 18,
     "intelligence": 55, "defense": 29, "speed": 25, "power": 50},
    {"id": "103", "name": "Herbalist", "faction": "Keepers",
     "class": "Healer", "rarity": "Common", "attackType": "support",
     "hp": -4, "power": 12}
]"#;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("guardian-battles-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_content_file_rows_normalized() {
    let catalog = parse_str(CONTENT).unwrap();
    assert_eq!(catalog.len(), 3);

    let archer = catalog.get(&CardId::new("101")).unwrap();
    assert_eq!(archer.id.as_str(), "00000101");
    assert_eq!(archer.hero_type, "Swiftborn");
    assert_eq!(archer.stat(StatKey::Speed), 48);

    let keeper = catalog.get(&CardId::new("102")).unwrap();
    assert_eq!(keeper.ascension, Ascension::Guardian);
    assert_eq!(keeper.hero_type, "Caster");

    // Negative and missing stats are replaced; explicit ones kept
    let herbalist = catalog.get(&CardId::new("103")).unwrap();
    assert_eq!(herbalist.hero_type, "Healer");
    assert_eq!(herbalist.stat(StatKey::Power), 12);
    assert!(herbalist.stat(StatKey::Hp) > 0);
    assert!(herbalist.stat(StatKey::Focus) > 0);
}

#[test]
fn test_duplicate_ids_after_normalization() {
    let json = r#"[
        {"id": "7", "name": "A", "faction": "Keepers", "class": "Mage", "rarity": "Common"},
        {"id": "0007", "name": "B", "faction": "Keepers", "class": "Mage", "rarity": "Common"}
    ]"#;
    assert!(matches!(parse_str(json), Err(CatalogError::DuplicateId(id)) if id == "00000007"));
}

#[test]
fn test_json_file_provider() {
    let path = temp_file("cards.json", CONTENT);
    let provider = JsonFileProvider::new(&path);

    let catalog = provider.fetch().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(provider.path(), path.as_path());

    fs::remove_file(&path).unwrap();
    assert!(matches!(provider.fetch(), Err(CatalogError::Io(_))));
}

#[test]
fn test_bad_content_file() {
    let path = temp_file("broken.json", "[{\"id\": 1}]");
    let result = JsonFileProvider::new(&path).fetch();
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn test_cached_file_provider_refetches_after_invalidate() {
    let path = temp_file("cached.json", CONTENT);
    let mut cache = CachedProvider::new(JsonFileProvider::new(&path));

    assert_eq!(cache.catalog().unwrap().len(), 3);

    // Cached copy survives the file disappearing
    fs::remove_file(&path).unwrap();
    assert_eq!(cache.catalog().unwrap().len(), 3);

    cache.invalidate();
    assert!(matches!(cache.catalog(), Err(CatalogError::Io(_))));
}

#[test]
fn test_overlay_file_with_roster_fallback() {
    let path = temp_file(
        "overlay.json",
        r#"[{"id": "0000000c", "power": 80, "rarity": "Mythic", "attack_type": "Holy"},
            {"id": 999, "power": 1}]"#,
    );
    let provider = FallbackProvider::or_roster(RosterOverlayProvider::new(JsonFileProvider::new(&path)));

    let catalog = provider.fetch().unwrap();
    assert_eq!(catalog.len(), 54);
    let pope = catalog.get(&CardId::new("c")).unwrap();
    assert_eq!(pope.stat(StatKey::Power), 80);
    assert_eq!(pope.rarity, Rarity::Mythic);
    assert_eq!(pope.attack_type, "Holy");
    assert_eq!(pope.ascension, Ascension::Hero);
    assert!(!catalog.contains(&CardId::new("999")));

    // The store going away falls back to the plain roster
    fs::remove_file(&path).unwrap();
    let fallback = provider.fetch().unwrap();
    assert_eq!(fallback.cards(), CardCatalog::roster().cards());
}

#[test]
fn test_roster_provider_and_queries() {
    let catalog = RosterProvider.fetch().unwrap();
    assert_eq!(catalog.len(), 54);

    let highlanders = CatalogQuery::new().with_faction(Faction::Highlanders);
    assert_eq!(catalog.query(&highlanders).count(), 27);
    assert!(catalog.query(&highlanders).all(|c| c.faction == Faction::Highlanders));

    let mythic = CatalogQuery::new().with_rarity(Rarity::Mythic);
    assert!(catalog.query(&mythic).all(|c| c.ascension == Ascension::Guardian));

    let sample = catalog.sample(&CatalogQuery::new(), &mut GameRng::new(3));
    assert_eq!(sample.len(), 20);

    let everything = catalog.sample(&CatalogQuery::new().with_limit(1_000), &mut KeepOrder);
    assert_eq!(everything.len(), 54);
    assert_eq!(everything.as_slice(), catalog.cards());
}

#[test]
fn test_query_from_json() {
    let query: CatalogQuery =
        serde_json::from_str(r#"{"faction": "Keepers", "limit": 5}"#).unwrap();
    assert_eq!(query.faction, Some(Faction::Keepers));
    assert_eq!(query.limit(), 5);
    assert!(query.class.is_none());
}

#[test]
fn test_filtered_catalog_drives_a_match() {
    let catalog = CardCatalog::roster()
        .filtered(&CatalogQuery::new().with_faction(Faction::Keepers));
    assert_eq!(catalog.len(), 27);

    let mut game = Match::new(&catalog, MatchConfig::default().with_seed(8));
    assert_eq!(game.start().unwrap(), Phase::AwaitingChoice);
    assert_eq!(game.zones(Side::Player).total(), 14);
    assert_eq!(game.zones(Side::Opponent).total(), 13);
}

#[test]
fn test_config_from_json() {
    let config: MatchConfig = serde_json::from_str(r#"{"seed": 12, "auto_start": true}"#).unwrap();
    assert_eq!(config.seed, Some(12));
    assert!(config.auto_start);
    assert_eq!(config, MatchConfig::default().with_seed(12).with_auto_start(true));
}
