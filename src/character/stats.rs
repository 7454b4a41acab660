//! Player stat blocks and the stat aggregator.
//!
//! `PlayerStats` is the flat record every bonus feeds into. Items carry a
//! sparse [`StatMap`] instead, which is folded into the player's base stats by
//! [`compute_effective_stats`] together with the attribute-derived bonuses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::player::Player;
use crate::core::constants::*;

/// Every numeric stat an item, affix or player record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Strength,
    Dexterity,
    Intelligence,
    PhysicalDamageMin,
    PhysicalDamageMax,
    FireDamageMin,
    FireDamageMax,
    ColdDamageMin,
    ColdDamageMax,
    LightningDamageMin,
    LightningDamageMax,
    /// Base attacks per second. On items this is a legacy key and counts as
    /// increased attack speed.
    AttackSpeed,
    IncreasedAttackSpeed,
    CriticalChance,
    CriticalMultiplier,
    IncreasedPhysicalDamage,
    IncreasedFireDamage,
    IncreasedColdDamage,
    IncreasedLightningDamage,
    Accuracy,
    MaxLife,
    MaxMana,
    EnergyShield,
    IncreasedEnergyShield,
    Armor,
    IncreasedArmor,
    Evasion,
    IncreasedEvasion,
    BlockChance,
    FireResistance,
    ColdResistance,
    LightningResistance,
    ChaosResistance,
    LifeRegeneration,
    ManaRegeneration,
}

/// Sparse stat contributions (item base stats, rolled affixes).
pub type StatMap = BTreeMap<StatKey, f64>;

/// Adds `value` to `key` in a sparse stat map.
pub fn add_stat(map: &mut StatMap, key: StatKey, value: f64) {
    *map.entry(key).or_insert(0.0) += value;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub strength: f64,
    pub dexterity: f64,
    pub intelligence: f64,

    pub physical_damage_min: f64,
    pub physical_damage_max: f64,
    pub fire_damage_min: f64,
    pub fire_damage_max: f64,
    pub cold_damage_min: f64,
    pub cold_damage_max: f64,
    pub lightning_damage_min: f64,
    pub lightning_damage_max: f64,
    pub attack_speed: f64,
    pub increased_attack_speed: f64,
    pub critical_chance: f64,
    /// Percent, 150 = 1.5x on crit.
    pub critical_multiplier: f64,
    pub increased_physical_damage: f64,
    pub increased_fire_damage: f64,
    pub increased_cold_damage: f64,
    pub increased_lightning_damage: f64,
    pub accuracy: f64,

    pub max_life: f64,
    pub max_mana: f64,
    pub energy_shield: f64,
    pub increased_energy_shield: f64,
    pub armor: f64,
    pub increased_armor: f64,
    pub evasion: f64,
    pub increased_evasion: f64,
    pub block_chance: f64,
    pub fire_resistance: f64,
    pub cold_resistance: f64,
    pub lightning_resistance: f64,
    pub chaos_resistance: f64,
    pub life_regeneration: f64,
    pub mana_regeneration: f64,
}

impl Default for PlayerStats {
    /// Starting character: ~5 DPS with no gear, flasks needed to sustain.
    fn default() -> Self {
        Self {
            strength: 10.0,
            dexterity: 10.0,
            intelligence: 10.0,
            physical_damage_min: 4.0,
            physical_damage_max: 7.0,
            fire_damage_min: 0.0,
            fire_damage_max: 0.0,
            cold_damage_min: 0.0,
            cold_damage_max: 0.0,
            lightning_damage_min: 0.0,
            lightning_damage_max: 0.0,
            attack_speed: 1.0,
            increased_attack_speed: 0.0,
            critical_chance: 5.0,
            critical_multiplier: 150.0,
            increased_physical_damage: 0.0,
            increased_fire_damage: 0.0,
            increased_cold_damage: 0.0,
            increased_lightning_damage: 0.0,
            accuracy: 100.0,
            max_life: 80.0,
            max_mana: 40.0,
            energy_shield: 0.0,
            increased_energy_shield: 0.0,
            armor: 0.0,
            increased_armor: 0.0,
            evasion: 0.0,
            increased_evasion: 0.0,
            block_chance: 0.0,
            fire_resistance: 0.0,
            cold_resistance: 0.0,
            lightning_resistance: 0.0,
            chaos_resistance: 0.0,
            life_regeneration: 1.0,
            mana_regeneration: 2.0,
        }
    }
}

impl PlayerStats {
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Dexterity => self.dexterity,
            StatKey::Intelligence => self.intelligence,
            StatKey::PhysicalDamageMin => self.physical_damage_min,
            StatKey::PhysicalDamageMax => self.physical_damage_max,
            StatKey::FireDamageMin => self.fire_damage_min,
            StatKey::FireDamageMax => self.fire_damage_max,
            StatKey::ColdDamageMin => self.cold_damage_min,
            StatKey::ColdDamageMax => self.cold_damage_max,
            StatKey::LightningDamageMin => self.lightning_damage_min,
            StatKey::LightningDamageMax => self.lightning_damage_max,
            StatKey::AttackSpeed => self.attack_speed,
            StatKey::IncreasedAttackSpeed => self.increased_attack_speed,
            StatKey::CriticalChance => self.critical_chance,
            StatKey::CriticalMultiplier => self.critical_multiplier,
            StatKey::IncreasedPhysicalDamage => self.increased_physical_damage,
            StatKey::IncreasedFireDamage => self.increased_fire_damage,
            StatKey::IncreasedColdDamage => self.increased_cold_damage,
            StatKey::IncreasedLightningDamage => self.increased_lightning_damage,
            StatKey::Accuracy => self.accuracy,
            StatKey::MaxLife => self.max_life,
            StatKey::MaxMana => self.max_mana,
            StatKey::EnergyShield => self.energy_shield,
            StatKey::IncreasedEnergyShield => self.increased_energy_shield,
            StatKey::Armor => self.armor,
            StatKey::IncreasedArmor => self.increased_armor,
            StatKey::Evasion => self.evasion,
            StatKey::IncreasedEvasion => self.increased_evasion,
            StatKey::BlockChance => self.block_chance,
            StatKey::FireResistance => self.fire_resistance,
            StatKey::ColdResistance => self.cold_resistance,
            StatKey::LightningResistance => self.lightning_resistance,
            StatKey::ChaosResistance => self.chaos_resistance,
            StatKey::LifeRegeneration => self.life_regeneration,
            StatKey::ManaRegeneration => self.mana_regeneration,
        }
    }

    fn get_mut(&mut self, key: StatKey) -> &mut f64 {
        match key {
            StatKey::Strength => &mut self.strength,
            StatKey::Dexterity => &mut self.dexterity,
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::PhysicalDamageMin => &mut self.physical_damage_min,
            StatKey::PhysicalDamageMax => &mut self.physical_damage_max,
            StatKey::FireDamageMin => &mut self.fire_damage_min,
            StatKey::FireDamageMax => &mut self.fire_damage_max,
            StatKey::ColdDamageMin => &mut self.cold_damage_min,
            StatKey::ColdDamageMax => &mut self.cold_damage_max,
            StatKey::LightningDamageMin => &mut self.lightning_damage_min,
            StatKey::LightningDamageMax => &mut self.lightning_damage_max,
            StatKey::AttackSpeed => &mut self.attack_speed,
            StatKey::IncreasedAttackSpeed => &mut self.increased_attack_speed,
            StatKey::CriticalChance => &mut self.critical_chance,
            StatKey::CriticalMultiplier => &mut self.critical_multiplier,
            StatKey::IncreasedPhysicalDamage => &mut self.increased_physical_damage,
            StatKey::IncreasedFireDamage => &mut self.increased_fire_damage,
            StatKey::IncreasedColdDamage => &mut self.increased_cold_damage,
            StatKey::IncreasedLightningDamage => &mut self.increased_lightning_damage,
            StatKey::Accuracy => &mut self.accuracy,
            StatKey::MaxLife => &mut self.max_life,
            StatKey::MaxMana => &mut self.max_mana,
            StatKey::EnergyShield => &mut self.energy_shield,
            StatKey::IncreasedEnergyShield => &mut self.increased_energy_shield,
            StatKey::Armor => &mut self.armor,
            StatKey::IncreasedArmor => &mut self.increased_armor,
            StatKey::Evasion => &mut self.evasion,
            StatKey::IncreasedEvasion => &mut self.increased_evasion,
            StatKey::BlockChance => &mut self.block_chance,
            StatKey::FireResistance => &mut self.fire_resistance,
            StatKey::ColdResistance => &mut self.cold_resistance,
            StatKey::LightningResistance => &mut self.lightning_resistance,
            StatKey::ChaosResistance => &mut self.chaos_resistance,
            StatKey::LifeRegeneration => &mut self.life_regeneration,
            StatKey::ManaRegeneration => &mut self.mana_regeneration,
        }
    }

    pub fn add(&mut self, key: StatKey, value: f64) {
        *self.get_mut(key) += value;
    }

    /// Adds an item's stat map. Flat `AttackSpeed` on an item is an old save
    /// format and lands in the percentage bucket.
    pub fn add_item_stats(&mut self, stats: &StatMap) {
        for (&key, &value) in stats {
            match key {
                StatKey::AttackSpeed => self.increased_attack_speed += value,
                _ => self.add(key, value),
            }
        }
    }
}

/// Combat numbers after gear and attributes are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStats {
    /// Raw stats with gear and attribute bonuses folded in.
    pub stats: PlayerStats,
    /// Attacks per second after increased attack speed.
    pub attack_speed: f64,
    /// Sum of the average hit of each damage type, before crits.
    pub average_hit: f64,
    /// `average_hit` weighted by crit chance and multiplier.
    pub effective_hit: f64,
    pub dps: f64,
    pub effective_hp: f64,
}

impl EffectiveStats {
    pub fn max_life(&self) -> f64 {
        self.stats.max_life
    }

    pub fn max_mana(&self) -> f64 {
        self.stats.max_mana
    }
}

/// Expected multiplier from crits: `1 + chance * (multiplier - 100%)`.
pub fn effective_crit_multiplier(crit_chance: f64, crit_multiplier: f64) -> f64 {
    1.0 + (crit_chance / 100.0) * ((crit_multiplier - 100.0) / 100.0)
}

/// Computes effective stats from base stats and every equipped item.
///
/// Pure: no RNG, no mutation. Called from every tick and every render.
pub fn compute_effective_stats(player: &Player) -> EffectiveStats {
    let mut stats = player.stats.clone();

    for item in player.equipment.iter_equipped() {
        stats.add_item_stats(&item.stats);
    }

    // Strength: +2 life and +2% physical per 10
    let str_steps = (stats.strength / ATTRIBUTE_STEP_STRENGTH).floor();
    stats.max_life += str_steps * LIFE_PER_STRENGTH_STEP;
    stats.increased_physical_damage += str_steps * PHYS_PERCENT_PER_STRENGTH_STEP;

    // Dexterity: +2 accuracy per point, evasion multiplied by 2% per 5
    stats.accuracy += stats.dexterity * ACCURACY_PER_DEXTERITY;
    let dex_evasion_bonus =
        (stats.dexterity / ATTRIBUTE_STEP_DEXTERITY).floor() * EVASION_PERCENT_PER_DEXTERITY_STEP;
    stats.evasion = (stats.evasion * (1.0 + dex_evasion_bonus / 100.0)).floor();

    // Intelligence: +2 mana and +2% to each element per 10
    let int_steps = (stats.intelligence / ATTRIBUTE_STEP_INTELLIGENCE).floor();
    stats.max_mana += int_steps * MANA_PER_INTELLIGENCE_STEP;
    let elemental_bonus = int_steps * ELEMENTAL_PERCENT_PER_INTELLIGENCE_STEP;
    stats.increased_fire_damage += elemental_bonus;
    stats.increased_cold_damage += elemental_bonus;
    stats.increased_lightning_damage += elemental_bonus;

    let average_hit = damage_component(
        stats.physical_damage_min,
        stats.physical_damage_max,
        stats.increased_physical_damage,
    ) + damage_component(stats.fire_damage_min, stats.fire_damage_max, stats.increased_fire_damage)
        + damage_component(stats.cold_damage_min, stats.cold_damage_max, stats.increased_cold_damage)
        + damage_component(
            stats.lightning_damage_min,
            stats.lightning_damage_max,
            stats.increased_lightning_damage,
        );

    let crit = effective_crit_multiplier(stats.critical_chance, stats.critical_multiplier);
    let effective_hit = average_hit * crit;
    let attack_speed = stats.attack_speed * (1.0 + stats.increased_attack_speed / 100.0);
    let dps = effective_hit * attack_speed;
    let effective_hp = stats.max_life;

    EffectiveStats {
        stats,
        attack_speed,
        average_hit,
        effective_hit,
        dps,
        effective_hp,
    }
}

fn damage_component(min: f64, max: f64, increased: f64) -> f64 {
    (min + max) / 2.0 * (1.0 + increased / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{EquipmentSlot, Item, ItemRarity};
    use uuid::Uuid;

    fn item_with(slot: EquipmentSlot, stats: &[(StatKey, f64)]) -> Item {
        Item {
            id: Uuid::nil(),
            base_id: "test".to_string(),
            name: "Test Item".to_string(),
            slot,
            item_level: 1,
            rarity: ItemRarity::Normal,
            rolled_base_stats: StatMap::new(),
            prefixes: vec![],
            suffixes: vec![],
            stats: stats.iter().copied().collect(),
        }
    }

    #[test]
    fn test_default_player_dps() {
        let player = Player::new("Test");
        let eff = compute_effective_stats(&player);

        // 10 STR -> +2 life, +2% phys; 10 INT -> +2 mana
        assert_eq!(eff.stats.max_life, 82.0);
        assert_eq!(eff.stats.max_mana, 42.0);
        assert_eq!(eff.stats.accuracy, 120.0);
        assert!((eff.average_hit - 5.5 * 1.02).abs() < 1e-9);
        let crit = 1.0 + 0.05 * 0.5;
        assert!((eff.dps - 5.5 * 1.02 * crit).abs() < 1e-9);
    }

    #[test]
    fn test_aggregation_is_pure() {
        let mut player = Player::new("Test");
        let helmet = item_with(EquipmentSlot::Helmet, &[(StatKey::MaxLife, 20.0)]);
        player.equipment.set(EquipmentSlot::Helmet, Some(helmet));
        let first = compute_effective_stats(&player);
        let second = compute_effective_stats(&player);
        assert_eq!(first, second);
        assert_eq!(player.stats.max_life, 80.0);
    }

    #[test]
    fn test_legacy_item_attack_speed_is_percentage() {
        let mut player = Player::new("Test");
        player.equipment.set(
            EquipmentSlot::Weapon,
            Some(item_with(EquipmentSlot::Weapon, &[(StatKey::AttackSpeed, 20.0)])),
        );
        let eff = compute_effective_stats(&player);
        assert_eq!(eff.stats.attack_speed, 1.0);
        assert!((eff.attack_speed - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_dexterity_multiplies_evasion() {
        let mut player = Player::new("Test");
        player.stats.evasion = 100.0;
        player.stats.dexterity = 25.0;
        let eff = compute_effective_stats(&player);
        // 25 DEX -> 5 steps -> +10% more evasion
        assert_eq!(eff.stats.evasion, 110.0);
        assert_eq!(eff.stats.accuracy, 150.0);
    }

    #[test]
    fn test_intelligence_boosts_all_elements() {
        let mut player = Player::new("Test");
        player.stats.intelligence = 30.0;
        let eff = compute_effective_stats(&player);
        assert_eq!(eff.stats.increased_fire_damage, 6.0);
        assert_eq!(eff.stats.increased_cold_damage, 6.0);
        assert_eq!(eff.stats.increased_lightning_damage, 6.0);
        assert_eq!(eff.stats.max_mana, 46.0);
    }

    #[test]
    fn test_effective_crit_multiplier() {
        assert!((effective_crit_multiplier(0.0, 150.0) - 1.0).abs() < 1e-9);
        assert!((effective_crit_multiplier(100.0, 200.0) - 2.0).abs() < 1e-9);
    }
}
