//! The built-in card roster.
//!
//! Fifty-four canonical cards across both factions. Stats are not stored; they
//! are synthesized from rarity, hero type and faction when the catalog is built.

use super::definition::{Ascension, Card, Faction, Rarity};
use super::definition::Rarity::{Common, Epic, Legendary, Mythic, Rare, Uncommon};
use super::generate::{synthesize_stats, StatSeed};

const H: Faction = Faction::Highlanders;
const K: Faction = Faction::Keepers;

/// (id, name, faction, class, rarity, hero type, attack type)
type RosterRow = (&'static str, &'static str, Faction, &'static str, Rarity, &'static str, &'static str);

const ROSTER: &[RosterRow] = &[
    ("00000001", "Highlands Stable Boy", H, "Warrior", Common, "Tank", "Physical"),
    ("00000002", "Highlands Stable Master", H, "Warrior", Uncommon, "Tank", "Physical"),
    ("00000003", "Highlands Horseman", H, "Warrior", Rare, "DPS", "Physical"),
    ("00000004", "Highlands Master Horseman", H, "Warrior", Epic, "Hybrid", "Physical"),
    ("00000005", "Highlands Student", H, "Mage", Common, "DPS", "Magical"),
    ("00000006", "Highlands Academic", H, "Mage", Uncommon, "DPS", "Magical"),
    ("00000007", "Highlands Professor", H, "Mage", Rare, "Specialist", "Magical"),
    ("00000008", "Highlands Scholar", H, "Healer", Common, "Support", "Divine"),
    ("00000009", "Highlands Medic", H, "Healer", Uncommon, "Support", "Divine"),
    ("0000000A", "Highlands Surgeon", H, "Healer", Rare, "Support", "Divine"),
    ("0000000B", "Highlands Priest", H, "Healer", Epic, "Support", "Divine"),
    ("0000000C", "Highlands Pope", H, "Healer", Legendary, "Support", "Divine"),
    ("0000000D", "Highlands Slinger", H, "Sharpshooter", Common, "DPS", "Physical"),
    ("0000000E", "Highlands Archer", H, "Sharpshooter", Uncommon, "DPS", "Physical"),
    ("0000000F", "Highlands Hitman", H, "Sharpshooter", Rare, "DPS", "Physical"),
    ("00000010", "Highlands Spy", H, "Sharpshooter", Epic, "Specialist", "Mental"),
    ("00000021", "Highlands Commander", H, "Champion", Legendary, "Hybrid", "Physical"),
    ("00000022", "Highlands Mentalist", H, "Champion", Legendary, "Specialist", "Mental"),
    ("00000023", "Highlands Forrester", H, "Champion", Legendary, "Hybrid", "Elemental"),
    ("00000024", "Heathcliff - King of the Highlands", H, "Guardian", Mythic, "Hybrid", "Physical"),
    ("00000025", "Doogen Howzit - Chief Doctor of the Highlands", H, "Guardian", Mythic, "Support", "Divine"),
    ("00000026", "Elijah Forester - The High Priest of the Highlands", H, "Guardian", Mythic, "Support", "Divine"),
    ("00000027", "Supreme Knight of the Highlands - Sir Caerlon Saddler", H, "Guardian", Mythic, "Tank", "Physical"),
    ("00000028", "Brick “Ironshoe” Davidson - The Grand Equestrian of the Highlands", H, "Guardian", Mythic, "DPS", "Physical"),
    ("00000029", "Edward McCallister - Dean of the Highlands", H, "Guardian", Mythic, "Specialist", "Mental"),
    ("0000002A", "Marshall Westborough - Scout of the Highlands", H, "Guardian", Mythic, "DPS", "Physical"),
    ("0000002B", "Unknown of the Highlands", H, "Guardian", Mythic, "Hybrid", "Elemental"),
    ("00000011", "Skeleton Remains of the Crypt", K, "Warrior", Common, "Tank", "Physical"),
    ("00000012", "Bone Marrow of the Crypt", K, "Warrior", Uncommon, "Tank", "Physical"),
    ("00000013", "Bone Soldier of the Crypt", K, "Warrior", Rare, "DPS", "Physical"),
    ("00000014", "Bone General of the Crypt", K, "Warrior", Epic, "Hybrid", "Physical"),
    ("00000015", "Skeleton Occultist of the Crypt", K, "Mage", Common, "DPS", "Magical"),
    ("00000016", "Bone Lich of the Crypt", K, "Mage", Uncommon, "Specialist", "Magical"),
    ("00000017", "Cabalist of the Crypt", K, "Mage", Rare, "Specialist", "Mental"),
    ("00000018", "Necromancer of the Crypt", K, "Mage", Epic, "Specialist", "Magical"),
    ("00000019", "Apparition of the Crypt", K, "Support", Common, "Support", "Mental"),
    ("0000001A", "Poltergeist of the Crypt", K, "Support", Uncommon, "Support", "Mental"),
    ("0000001B", "Banshee of the Crypt", K, "Support", Rare, "Support", "Mental"),
    ("0000001C", "Tainted of the Crypt", K, "Sharpshooter", Common, "DPS", "Poison"),
    ("0000001D", "Vampire of the Crypt", K, "Sharpshooter", Uncommon, "DPS", "Physical"),
    ("0000001E", "Vampire Lord of the Crypt", K, "Sharpshooter", Rare, "DPS", "Physical"),
    ("0000001F", "Werewolf of the Crypt", K, "Sharpshooter", Uncommon, "DPS", "Physical"),
    ("00000020", "Lycanthrope of the Crypt", K, "Sharpshooter", Rare, "DPS", "Physical"),
    ("0000002C", "Skeleton Prince of the Crypt", K, "Champion", Legendary, "Hybrid", "Physical"),
    ("0000002D", "Skull Magician of the Crypt (redone correctly)", K, "Champion", Legendary, "Specialist", "Magical"),
    ("0000002E", "Bone Archer of the Crypt", K, "Champion", Legendary, "DPS", "Physical"),
    ("0000002F", "Charles Jameson - Skeleton King of the Crypt", K, "Guardian", Mythic, "Hybrid", "Physical"),
    ("00000030", "Furusiyya – The Bone General of the Crypt", K, "Guardian", Mythic, "Tank", "Physical"),
    ("00000031", "Mekubbal – The Skeletal Cabalist of the Crypt", K, "Guardian", Mythic, "Specialist", "Mental"),
    ("00000032", "Soriben – The Skeletal Necromancer of the Crypt", K, "Guardian", Mythic, "Specialist", "Magical"),
    ("00000033", "Bram – Vampire Lord of the Crypt", K, "Guardian", Mythic, "DPS", "Physical"),
    ("00000034", "Jay Cub – The Frenzied Lycanthrope of the Crypt", K, "Guardian", Mythic, "DPS", "Physical"),
    ("00000035", "Caroline McNancy – The Hallowed Banshee of the Crypt", K, "Guardian", Mythic, "Support", "Mental"),
    ("00000036", "Simon Peter - The Exalted Reborn of the Crypt", K, "Guardian", Mythic, "Hybrid", "Divine"),
];

/// Number of cards in the built-in roster.
pub const ROSTER_SIZE: usize = 54;

/// Rank named by a roster class; every other class is a plain hero.
pub(crate) fn ascension_for(class: &str) -> Ascension {
    Ascension::from_name(class).unwrap_or_default()
}

/// Build every roster card with synthesized stats, in roster order.
#[must_use]
pub fn roster_cards() -> Vec<Card> {
    ROSTER
        .iter()
        .enumerate()
        .map(|(index, &(id, name, faction, class, rarity, hero_type, attack_type))| {
            let stats = synthesize_stats(
                StatSeed {
                    id,
                    name,
                    faction,
                    rarity,
                    hero_type,
                },
                index,
            );
            let mut card = Card::new(id, name, faction, rarity)
                .with_tags(class, hero_type, attack_type)
                .with_stats(stats);
            card.ascension = ascension_for(class);
            card.image = Some(format!("/images/{}.png", card.id));
            card
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::generate::budget;

    #[test]
    fn test_roster_size() {
        assert_eq!(ROSTER.len(), ROSTER_SIZE);
        assert_eq!(roster_cards().len(), ROSTER_SIZE);
    }

    #[test]
    fn test_roster_ids_unique() {
        let mut ids: Vec<_> = roster_cards().into_iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ROSTER_SIZE);
    }

    #[test]
    fn test_factions_split() {
        let cards = roster_cards();
        let highlanders = cards.iter().filter(|c| c.faction == Faction::Highlanders).count();
        assert_eq!(highlanders, 27);
        assert_eq!(cards.len() - highlanders, 27);
    }

    #[test]
    fn test_known_roster_stats() {
        let cards = roster_cards();
        let stats = |id: &str| {
            cards
                .iter()
                .find(|c| c.id.as_str() == id)
                .map(|c| c.stats.to_array())
        };
        assert_eq!(stats("00000001"), Some([45, 16, 14, 40, 29, 16, 43, 24, 43]));
        assert_eq!(stats("0000000C"), Some([33, 57, 46, 36, 22, 59, 34, 19, 24]));
        assert_eq!(stats("0000001B"), Some([31, 54, 43, 29, 17, 54, 28, 18, 26]));
        assert_eq!(stats("00000028"), Some([31, 18, 18, 38, 71, 18, 27, 59, 65]));
    }

    #[test]
    fn test_stats_match_budget() {
        for card in roster_cards() {
            assert_eq!(card.stats.total(), budget(card.rarity), "{}", card.name);
        }
    }

    #[test]
    fn test_ascension_and_image() {
        let cards = roster_cards();
        let pope = cards.iter().find(|c| c.name == "Highlands Pope").unwrap();
        assert_eq!(pope.rarity, Rarity::Legendary);
        assert_eq!(pope.ascension, Ascension::Hero);
        assert_eq!(pope.image.as_deref(), Some("/images/0000000C.png"));

        let commander = cards.iter().find(|c| c.name == "Highlands Commander").unwrap();
        assert_eq!(commander.ascension, Ascension::Champion);
        let king = cards.iter().find(|c| c.id.as_str() == "00000024").unwrap();
        assert_eq!(king.ascension, Ascension::Guardian);
    }
}
