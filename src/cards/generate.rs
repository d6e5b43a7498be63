//! Deterministic stat synthesis for cards whose data lacks stats.
//!
//! Each card gets a rarity budget spread over the nine stats by hero-type
//! weights, nudged by a faction bump and a small hash-seeded noise, floored at
//! `STAT_FLOOR`, then rebalanced so the line sums exactly to the budget.
//! The same (card, index) pair always yields the same line.

use super::definition::{Faction, Rarity};
use super::stats::{StatKey, StatLine};

/// No synthesized stat drops below this.
pub const STAT_FLOOR: u32 = 10;

/// Noise is drawn from `-NOISE..=NOISE + 1`.
const NOISE: i64 = 3;

/// Total stat budget for a rarity.
#[must_use]
pub const fn budget(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 270,
        Rarity::Uncommon => 285,
        Rarity::Rare => 300,
        Rarity::Epic => 315,
        Rarity::Legendary => 330,
        Rarity::Mythic => 345,
    }
}

/// Budget share per stat (canonical order) for a hero type.
#[must_use]
pub fn weights(hero_type: &str) -> [f64; 9] {
    match hero_type {
        "Tank" => [0.16, 0.06, 0.05, 0.14, 0.10, 0.06, 0.16, 0.10, 0.17],
        "DPS" => [0.08, 0.05, 0.05, 0.10, 0.20, 0.06, 0.08, 0.18, 0.20],
        "Support" => [0.10, 0.18, 0.14, 0.10, 0.06, 0.18, 0.10, 0.06, 0.08],
        "Hybrid" => [0.12, 0.10, 0.10, 0.12, 0.12, 0.12, 0.12, 0.10, 0.10],
        "Specialist" => [0.08, 0.10, 0.12, 0.10, 0.12, 0.18, 0.10, 0.08, 0.12],
        _ => [0.11, 0.10, 0.10, 0.11, 0.11, 0.11, 0.11, 0.10, 0.15],
    }
}

fn faction_bump(faction: Faction, key: StatKey) -> i64 {
    use StatKey::*;
    match (faction, key) {
        (Faction::Highlanders, Hp | Strength | Stamina | Defense) => 2,
        (Faction::Keepers, Intelligence | Focus | Power) => 2,
        _ => 0,
    }
}

/// FNV-1a-shaped hash over UTF-16 code units.
///
/// The multiply runs in `f64` on the signed mix and is reduced mod 2^32, so
/// once the product passes 2^53 its low bits are rounded away. Every stored
/// stat line depends on this exact arithmetic; it is not plain FNV-1a.
fn string_hash(s: &str) -> u32 {
    s.encode_utf16().fold(2_166_136_261u32, |h, unit| {
        let mixed = (h ^ u32::from(unit)) as i32;
        wrap_u32(f64::from(mixed) * 16_777_619.0)
    })
}

/// Integer-valued `f64` reduced mod 2^32.
fn wrap_u32(x: f64) -> u32 {
    x as i64 as u32
}

/// One LCG step mapped onto `min..=max + 1`.
///
/// The top value only comes up when the step lands on `0xFFFF_FFxx`.
fn noise(seed: u32, min: i64, max: i64) -> i64 {
    let x = (seed ^ 0x9E37_79B9).wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    let t = f64::from(x >> 8) / f64::from(0x00FF_FFFFu32);
    let span = (max - min + 1) as f64;
    (min as f64 + t * span).floor() as i64
}

/// What synthesis needs to know about a card.
#[derive(Clone, Copy, Debug)]
pub struct StatSeed<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub faction: Faction,
    pub rarity: Rarity,
    pub hero_type: &'a str,
}

/// Synthesize the stat line for a card at `index` in its roster.
#[must_use]
pub fn synthesize_stats(card: StatSeed<'_>, index: usize) -> StatLine {
    let budget = i64::from(budget(card.rarity));
    let w = weights(card.hero_type);
    let seed = string_hash(&format!("{}{}", card.id, card.name)).wrapping_add((index as u32).wrapping_mul(17));

    let mut values = [0i64; 9];
    let mut remain = budget;
    for (i, key) in StatKey::ALL.into_iter().enumerate() {
        let base = (w[i] * budget as f64).round() as i64;
        let jitter = noise(seed.wrapping_add((i as u32).wrapping_mul(97)), -NOISE, NOISE);
        let value = (base + jitter + faction_bump(card.faction, key)).max(i64::from(STAT_FLOOR));
        values[i] = value;
        remain -= value;
    }

    // Rebalance to the exact budget, never dipping below the floor.
    let mut i = 0usize;
    while remain > 0 {
        values[i % 9] += 1;
        remain -= 1;
        i += 1;
    }
    let mut guard = 0usize;
    while remain < 0 && guard < 9 * budget as usize {
        let j = i % 9;
        i += 1;
        guard += 1;
        if values[j] > i64::from(STAT_FLOOR) {
            values[j] -= 1;
            remain += 1;
        }
    }

    StatLine::from_array(values.map(|v| v as u32))
}
