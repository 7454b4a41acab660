//! Static definitions the engine reads by string id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::character::stats::{StatKey, StatMap};
use crate::combat::types::DamageType;
use crate::items::types::{AffixKind, CurrencyType, EquipmentSlot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterDefinition {
    pub id: String,
    pub name: String,
    pub base_life: f64,
    pub base_damage: f64,
    pub attack_speed: f64,
    pub damage_type: DamageType,
    pub experience_reward: f64,
    /// Drop-rate multiplier.
    pub loot_bonus: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BossSkillType {
    Slam,
    Cleave,
    Projectile,
    Aoe,
    Buff,
    Summon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Multiplier on the boss's base damage.
    pub damage_multiplier: f64,
    pub cooldown: f64,
    pub skill_type: BossSkillType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossDefinition {
    #[serde(flatten)]
    pub monster: MonsterDefinition,
    #[serde(default)]
    pub title: String,
    /// Item base ids dropped on every kill.
    #[serde(default)]
    pub guaranteed_drops: Vec<String>,
    #[serde(default)]
    pub skills: Vec<BossSkill>,
}

impl BossDefinition {
    pub fn id(&self) -> &str {
        &self.monster.id
    }

    pub fn skill(&self, skill_id: &str) -> Option<&BossSkill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillType {
    Attack,
    Spell,
    Buff,
    Aura,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillTargeting {
    Single,
    Aoe,
    #[serde(rename = "self")]
    SelfCast,
    Cone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    pub targeting: SkillTargeting,

    /// Multiplier on weapon damage, 1.0 = 100%. Spells use 0.
    pub damage_multiplier: f64,
    pub damage_type: DamageType,
    #[serde(default)]
    pub added_damage_min: f64,
    #[serde(default)]
    pub added_damage_max: f64,

    pub mana_cost: f64,
    pub cooldown: f64,

    #[serde(default)]
    pub aoe_radius: Option<u32>,
    #[serde(default)]
    pub number_of_hits: Option<u32>,
    #[serde(default)]
    pub crit_bonus_chance: Option<f64>,
    #[serde(default)]
    pub lifesteal_percent: Option<f64>,
    #[serde(default)]
    pub double_damage_chance: Option<f64>,

    // Per-gem-level overrides, index 0 is gem level 1.
    #[serde(default)]
    pub gem_total_experience_by_level: Vec<f64>,
    #[serde(default)]
    pub required_character_level_by_gem_level: Vec<u32>,
    #[serde(default)]
    pub mana_cost_by_level: Vec<f64>,
    #[serde(default)]
    pub damage_multiplier_by_level: Vec<f64>,
    #[serde(default)]
    pub double_damage_chance_by_level: Vec<f64>,

    pub required_level: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportGemDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required_level: u32,
    pub cost_currency: CurrencyType,
    pub cost_amount: u32,
    pub compatible_skill_types: Vec<SkillType>,

    pub gem_total_experience_by_level: Vec<f64>,
    pub required_character_level_by_gem_level: Vec<u32>,

    /// 0.2 = 20% more damage.
    pub more_damage_multiplier: Option<f64>,
    /// 0.9 = 10% shorter cooldown.
    pub cooldown_multiplier: Option<f64>,
    /// 1.2 = 20% higher mana cost.
    pub mana_multiplier: Option<f64>,
    pub added_damage_min: Option<f64>,
    pub added_damage_max: Option<f64>,
    pub added_hits: Option<u32>,
    pub attack_speed_more_percent: Option<f64>,
    pub attack_speed_more_percent_by_level: Vec<f64>,
    pub second_hit_less_damage_percent: Option<f64>,
    pub second_hit_less_damage_percent_by_level: Vec<f64>,
    pub physical_as_extra_fire_percent: Option<f64>,
    pub physical_as_extra_fire_percent_by_level: Vec<f64>,
    pub chance_to_bleed_percent: Option<f64>,
    pub chance_to_bleed_percent_by_level: Vec<f64>,
    pub more_bleeding_damage_percent: Option<f64>,
    pub more_bleeding_damage_percent_by_level: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseTag {
    BodyArmorStrength,
    BodyArmorDexterity,
    BodyArmorIntelligence,
    BodyArmorStrengthDexterity,
    BodyArmorStrengthIntelligence,
    BodyArmorDexterityIntelligence,
    BodyArmorStrengthDexterityIntelligence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub base_stats: StatMap,
    /// Stats rolled per instance, overriding `base_stats`.
    #[serde(default)]
    pub base_stat_ranges: BTreeMap<StatKey, StatRange>,
    pub required_level: u32,
    #[serde(default)]
    pub required_strength: u32,
    #[serde(default)]
    pub required_dexterity: u32,
    #[serde(default)]
    pub required_intelligence: u32,
    pub drop_level: u32,
    #[serde(default)]
    pub base_tags: Vec<BaseTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffixTier {
    pub tier: u32,
    pub min_value: f64,
    pub max_value: f64,
    pub required_item_level: u32,
    #[serde(default)]
    pub secondary_min_value: Option<f64>,
    #[serde(default)]
    pub secondary_max_value: Option<f64>,
    #[serde(default)]
    pub tertiary_min_value: Option<f64>,
    #[serde(default)]
    pub tertiary_max_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffixDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AffixKind,
    pub stat_key: StatKey,
    #[serde(default)]
    pub secondary_stat_key: Option<StatKey>,
    #[serde(default)]
    pub tertiary_stat_key: Option<StatKey>,
    #[serde(default)]
    pub use_primary_value_for_secondary: bool,
    #[serde(default)]
    pub use_primary_value_for_tertiary: bool,
    /// Ordered by ascending `required_item_level`.
    pub tiers: Vec<AffixTier>,
    #[serde(default)]
    pub is_percentage: bool,
    pub applicable_slots: Vec<EquipmentSlot>,
    /// When set, the base must carry at least one of these tags.
    #[serde(default)]
    pub required_base_tags_any: Option<Vec<BaseTag>>,
}

impl AffixDefinition {
    pub fn applies_to(&self, kind: AffixKind, slot: EquipmentSlot, base: &ItemBase) -> bool {
        self.kind == kind
            && self.applicable_slots.contains(&slot)
            && self
                .required_base_tags_any
                .as_ref()
                .map_or(true, |tags| tags.iter().any(|t| base.base_tags.contains(t)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub world_id: u32,
    pub order: u32,
    pub monster_level: u32,
    /// Boss of this map unlocks the map that names it here.
    #[serde(default)]
    pub required_map_id: Option<String>,
    pub monster_pool: Vec<String>,
    pub kills_required: u32,
    pub boss_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub biome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDefinition {
    pub id: CurrencyType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Higher is more common.
    pub drop_weight: f64,
}
