//! Kill rewards: item drops, boss guaranteed drops, currency and socket orbs.

use rand::Rng;
use std::collections::BTreeMap;

use super::generation::{generate_item, generate_item_by_base_id};
use super::types::{CurrencyType, Item, ItemRarity};
use crate::catalog::Catalog;
use crate::combat::types::{Monster, MonsterRarity};
use crate::core::constants::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LootResult {
    pub items: Vec<Item>,
    pub currency: BTreeMap<CurrencyType, u32>,
    pub experience: f64,
}

pub fn item_drop_chance(rarity: MonsterRarity) -> f64 {
    match rarity {
        MonsterRarity::Boss => ITEM_DROP_CHANCE_BOSS,
        MonsterRarity::Rare => ITEM_DROP_CHANCE_RARE,
        MonsterRarity::Magic => ITEM_DROP_CHANCE_MAGIC,
        MonsterRarity::Normal => ITEM_DROP_CHANCE_NORMAL,
    }
}

/// Extra item levels on drops from tougher monsters.
pub fn item_level_bonus(rarity: MonsterRarity) -> u32 {
    match rarity {
        MonsterRarity::Normal => 0,
        MonsterRarity::Magic => 1,
        MonsterRarity::Rare | MonsterRarity::Boss => 2,
    }
}

/// One currency roll: `10% * loot_bonus` to drop anything, then weighted.
pub fn roll_currency_drop(
    catalog: &Catalog,
    loot_bonus: f64,
    rng: &mut impl Rng,
) -> Option<CurrencyType> {
    if rng.gen::<f64>() > CURRENCY_DROP_CHANCE * loot_bonus {
        return None;
    }
    let mut roll = rng.gen::<f64>() * catalog.total_currency_weight();
    for currency in catalog.currencies() {
        roll -= currency.drop_weight;
        if roll <= 0.0 {
            return Some(currency.id);
        }
    }
    Some(CurrencyType::Transmutation)
}

pub fn socket_orb_chance(monster: &Monster) -> f64 {
    let base = if monster.level <= 10 {
        SOCKET_ORB_CHANCE_TIER_1
    } else if monster.level <= 20 {
        SOCKET_ORB_CHANCE_TIER_2
    } else {
        SOCKET_ORB_CHANCE_TIER_3
    };
    let rarity = match monster.rarity {
        MonsterRarity::Boss => 3.0,
        MonsterRarity::Rare => 1.8,
        MonsterRarity::Magic => 1.3,
        MonsterRarity::Normal => 1.0,
    };
    base * monster.loot_bonus * rarity
}

/// Everything `monster` leaves behind. Experience is the spawn-time reward.
pub fn generate_loot(catalog: &Catalog, monster: &Monster, rng: &mut impl Rng) -> LootResult {
    let mut result = LootResult {
        experience: monster.experience_reward,
        ..Default::default()
    };
    let bonus = item_level_bonus(monster.rarity);

    if rng.gen::<f64>() < item_drop_chance(monster.rarity) * monster.loot_bonus {
        if let Some(item) =
            generate_item(catalog, monster.level, monster.loot_bonus, None, bonus, rng)
        {
            result.items.push(item);
        }
    }

    if monster.is_boss() {
        if let Some(boss) = catalog.boss(&monster.definition_id) {
            for base_id in &boss.guaranteed_drops {
                if let Some(item) =
                    generate_item_by_base_id(catalog, base_id, monster.level, None, bonus, rng)
                {
                    result.items.push(item);
                }
            }
        }
    }

    let rolls = if monster.is_boss() {
        CURRENCY_ROLLS_BOSS
    } else {
        CURRENCY_ROLLS_DEFAULT
    };
    for _ in 0..rolls {
        if let Some(currency) = roll_currency_drop(catalog, monster.loot_bonus, rng) {
            *result.currency.entry(currency).or_insert(0) += 1;
        }
    }

    if rng.gen::<f64>() < socket_orb_chance(monster) {
        *result.currency.entry(CurrencyType::SocketOrb).or_insert(0) += 1;
    }

    result
}

/// Vendor price of an item, `None` for normal items.
pub fn sell_reward(rarity: ItemRarity) -> Option<(CurrencyType, u32)> {
    match rarity {
        ItemRarity::Normal => None,
        ItemRarity::Magic => Some((CurrencyType::Transmutation, 1)),
        ItemRarity::Rare => Some((CurrencyType::Alteration, 2)),
        ItemRarity::Unique => Some((CurrencyType::Alchemy, 1)),
    }
}
