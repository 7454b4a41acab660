//! Item rolling: base selection, rarity, affix budget fill and stat folding.

use rand::Rng;

use super::types::{Affix, AffixKind, EquipmentSlot, Item, ItemRarity};
use crate::catalog::{AffixDefinition, AffixTier, Catalog, ItemBase};
use crate::character::stats::{add_stat, StatKey, StatMap};
use crate::core::constants::*;
use crate::utils::random_uuid;

/// Uniform value in a tier range. Fractional bounds round to one decimal,
/// whole bounds give an integer in `[min, max]`.
pub fn roll_tier_value(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    let has_decimals = min.fract() != 0.0 || max.fract() != 0.0;
    if has_decimals {
        let value = min + rng.gen::<f64>() * (max - min);
        (value * 10.0).round() / 10.0
    } else {
        (min + rng.gen::<f64>() * (max - min + 1.0)).floor()
    }
}

/// Base stats with every ranged stat rolled for this instance.
pub fn roll_base_stats(base: &ItemBase, rng: &mut impl Rng) -> StatMap {
    let mut rolled = base.base_stats.clone();
    for (&key, range) in &base.base_stat_ranges {
        rolled.insert(key, roll_tier_value(range.min, range.max, rng));
    }
    rolled
}

/// Highest tier unlocked at `item_level`.
pub fn select_tier(definition: &AffixDefinition, item_level: u32) -> Option<&AffixTier> {
    definition
        .tiers
        .iter()
        .filter(|t| t.required_item_level <= item_level)
        .last()
}

/// Rolls one affix of `kind`, skipping definitions already on the item.
pub fn roll_affix(
    catalog: &Catalog,
    kind: AffixKind,
    base: &ItemBase,
    slot: EquipmentSlot,
    item_level: u32,
    existing: &[String],
    rng: &mut impl Rng,
) -> Option<Affix> {
    let applicable: Vec<&AffixDefinition> = catalog
        .affixes()
        .iter()
        .filter(|a| a.applies_to(kind, slot, base) && !existing.contains(&a.id))
        .collect();
    if applicable.is_empty() {
        return None;
    }

    let definition = applicable[rng.gen_range(0..applicable.len())];
    let tier = select_tier(definition, item_level)?;
    let value = roll_tier_value(tier.min_value, tier.max_value, rng);

    let secondary_value = definition.secondary_stat_key.and_then(|_| {
        if definition.use_primary_value_for_secondary {
            Some(value)
        } else {
            match (tier.secondary_min_value, tier.secondary_max_value) {
                (Some(min), Some(max)) => Some(roll_tier_value(min, max, rng)),
                _ => None,
            }
        }
    });
    let tertiary_value = definition.tertiary_stat_key.and_then(|_| {
        if definition.use_primary_value_for_tertiary {
            Some(value)
        } else {
            match (tier.tertiary_min_value, tier.tertiary_max_value) {
                (Some(min), Some(max)) => Some(roll_tier_value(min, max, rng)),
                _ => None,
            }
        }
    });

    Some(Affix {
        definition_id: definition.id.clone(),
        tier: tier.tier,
        value,
        secondary_value,
        tertiary_value,
    })
}

#[derive(Debug, Default)]
struct AffixRoll {
    prefixes: Vec<Affix>,
    suffixes: Vec<Affix>,
    existing: Vec<String>,
}

impl AffixRoll {
    fn total(&self) -> usize {
        self.prefixes.len() + self.suffixes.len()
    }

    fn has_room(&self, kind: AffixKind) -> bool {
        match kind {
            AffixKind::Prefix => self.prefixes.len() < MAX_AFFIXES_PER_KIND,
            AffixKind::Suffix => self.suffixes.len() < MAX_AFFIXES_PER_KIND,
        }
    }

    fn try_add(
        &mut self,
        kind: AffixKind,
        catalog: &Catalog,
        base: &ItemBase,
        slot: EquipmentSlot,
        item_level: u32,
        rng: &mut impl Rng,
    ) -> bool {
        if !self.has_room(kind) {
            return false;
        }
        let Some(affix) = roll_affix(catalog, kind, base, slot, item_level, &self.existing, rng)
        else {
            return false;
        };
        self.existing.push(affix.definition_id.clone());
        match kind {
            AffixKind::Prefix => self.prefixes.push(affix),
            AffixKind::Suffix => self.suffixes.push(affix),
        }
        true
    }
}

/// Fills an item's affixes up to a random count within the rarity budget.
pub fn roll_affixes_for_rarity(
    catalog: &Catalog,
    rarity: ItemRarity,
    base: &ItemBase,
    slot: EquipmentSlot,
    item_level: u32,
    rng: &mut impl Rng,
) -> (Vec<Affix>, Vec<Affix>) {
    let (min_affixes, max_affixes) = rarity.affix_budget();
    let mut roll = AffixRoll::default();
    if max_affixes == 0 {
        return (roll.prefixes, roll.suffixes);
    }

    let target = rng.gen_range(min_affixes..=max_affixes);
    let mut attempts = 0;
    while roll.total() < target && attempts < AFFIX_FILL_ATTEMPTS {
        attempts += 1;
        let can_prefix = roll.has_room(AffixKind::Prefix);
        let can_suffix = roll.has_room(AffixKind::Suffix);
        if !can_prefix && !can_suffix {
            break;
        }
        let first = if can_prefix && can_suffix {
            if rng.gen_bool(0.5) {
                AffixKind::Prefix
            } else {
                AffixKind::Suffix
            }
        } else if can_prefix {
            AffixKind::Prefix
        } else {
            AffixKind::Suffix
        };
        if roll.try_add(first, catalog, base, slot, item_level, rng) {
            continue;
        }
        if roll.try_add(first.other(), catalog, base, slot, item_level, rng) {
            continue;
        }
        break;
    }

    // Force the rarity minimum while either kind still has candidates.
    let mut progressed = true;
    while roll.total() < min_affixes && progressed {
        progressed = roll.try_add(AffixKind::Prefix, catalog, base, slot, item_level, rng);
        if roll.total() >= min_affixes {
            break;
        }
        progressed |= roll.try_add(AffixKind::Suffix, catalog, base, slot, item_level, rng);
    }

    (roll.prefixes, roll.suffixes)
}

/// Sums base stats and affix values, then applies local increased
/// armor/evasion/energy shield to the item's own defenses.
pub fn compute_item_stats(
    catalog: &Catalog,
    base_stats: &StatMap,
    prefixes: &[Affix],
    suffixes: &[Affix],
) -> StatMap {
    let mut stats = base_stats.clone();
    for affix in prefixes.iter().chain(suffixes) {
        let Some(definition) = catalog.affix(&affix.definition_id) else {
            continue;
        };
        add_stat(&mut stats, definition.stat_key, affix.value);
        if let (Some(key), Some(value)) = (definition.secondary_stat_key, affix.secondary_value) {
            add_stat(&mut stats, key, value);
        }
        if let (Some(key), Some(value)) = (definition.tertiary_stat_key, affix.tertiary_value) {
            add_stat(&mut stats, key, value);
        }
    }

    for (flat, increased) in [
        (StatKey::Armor, StatKey::IncreasedArmor),
        (StatKey::Evasion, StatKey::IncreasedEvasion),
        (StatKey::EnergyShield, StatKey::IncreasedEnergyShield),
    ] {
        let base = stats.get(&flat).copied().unwrap_or(0.0);
        let inc = stats.get(&increased).copied().unwrap_or(0.0);
        if base > 0.0 && inc != 0.0 {
            stats.insert(flat, (base * (1.0 + inc / 100.0)).floor());
        }
    }
    stats
}

/// Picks a base no higher than `monster_level`, favoring bases near it.
pub fn select_base<'a>(
    catalog: &'a Catalog,
    monster_level: u32,
    rng: &mut impl Rng,
) -> Option<&'a ItemBase> {
    let available: Vec<&ItemBase> = catalog
        .item_bases()
        .iter()
        .filter(|b| b.drop_level <= monster_level)
        .collect();
    let first = *available.first()?;

    let sigma = BASE_SIGMA_MIN.max(monster_level as f64 * BASE_SIGMA_PER_LEVEL);
    let weights: Vec<f64> = available
        .iter()
        .map(|b| {
            let delta = monster_level as f64 - b.drop_level as f64;
            BASE_WEIGHT_FLOOR + (-(delta * delta) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    let mut roll = rng.gen::<f64>() * total;
    for (base, weight) in available.iter().zip(&weights) {
        roll -= weight;
        if roll <= 0.0 {
            return Some(base);
        }
    }
    Some(first)
}

/// One roll in `[0, 100)`: rare first, then magic, else normal.
pub fn roll_item_rarity(loot_bonus: f64, rng: &mut impl Rng) -> ItemRarity {
    let roll = rng.gen::<f64>() * 100.0;
    if roll < ITEM_RARE_CHANCE_PERCENT * loot_bonus {
        ItemRarity::Rare
    } else if roll < ITEM_MAGIC_CHANCE_PERCENT * loot_bonus {
        ItemRarity::Magic
    } else {
        ItemRarity::Normal
    }
}

/// Ring bases land in either ring slot.
pub fn roll_slot(base: &ItemBase, rng: &mut impl Rng) -> EquipmentSlot {
    if base.slot == EquipmentSlot::Ring1 && rng.gen_bool(0.5) {
        EquipmentSlot::Ring2
    } else {
        base.slot
    }
}

/// Rolls a complete item on a fixed base.
pub fn build_item(
    catalog: &Catalog,
    base: &ItemBase,
    rarity: ItemRarity,
    item_level: u32,
    rng: &mut impl Rng,
) -> Item {
    let slot = roll_slot(base, rng);
    let (prefixes, suffixes) =
        roll_affixes_for_rarity(catalog, rarity, base, slot, item_level, rng);
    let rolled_base_stats = roll_base_stats(base, rng);
    let stats = compute_item_stats(catalog, &rolled_base_stats, &prefixes, &suffixes);
    Item {
        id: random_uuid(rng),
        base_id: base.id.clone(),
        name: base.name.clone(),
        slot,
        item_level,
        rarity,
        rolled_base_stats,
        prefixes,
        suffixes,
        stats,
    }
}

/// A random drop for a monster of `monster_level`. `None` when no base
/// drops that low.
pub fn generate_item(
    catalog: &Catalog,
    monster_level: u32,
    loot_bonus: f64,
    forced_rarity: Option<ItemRarity>,
    item_level_bonus: u32,
    rng: &mut impl Rng,
) -> Option<Item> {
    let base = select_base(catalog, monster_level, rng)?;
    let rarity = forced_rarity.unwrap_or_else(|| roll_item_rarity(loot_bonus, rng));
    let item_level = (monster_level + item_level_bonus).max(1);
    Some(build_item(catalog, base, rarity, item_level, rng))
}

/// A drop on a named base, magic or (30%) rare unless forced.
pub fn generate_item_by_base_id(
    catalog: &Catalog,
    base_id: &str,
    monster_level: u32,
    forced_rarity: Option<ItemRarity>,
    item_level_bonus: u32,
    rng: &mut impl Rng,
) -> Option<Item> {
    let base = catalog.item_base(base_id)?;
    let rarity = forced_rarity.unwrap_or_else(|| {
        if rng.gen::<f64>() < GUARANTEED_DROP_RARE_CHANCE {
            ItemRarity::Rare
        } else {
            ItemRarity::Magic
        }
    });
    let item_level = (monster_level + item_level_bonus).max(1);
    Some(build_item(catalog, base, rarity, item_level, rng))
}
