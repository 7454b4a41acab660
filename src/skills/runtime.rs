//! Skill Resolver: a gem's effective numbers at its level with its supports.

use crate::catalog::{Catalog, SkillDefinition, SupportGemDefinition};
use crate::character::player::{PlayerSkill, PlayerSupportGem};
use crate::character::stats::EffectiveStats;

/// Resolved numbers for one use of a skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRuntimeStats<'a> {
    pub mana_cost: f64,
    pub cooldown: f64,
    pub damage_multiplier: f64,
    pub added_damage_min: f64,
    pub added_damage_max: f64,
    /// One entry per hit. The sum scales the whole use.
    pub hit_damage_multipliers: Vec<f64>,
    pub aoe_radius: usize,
    pub double_damage_chance: Option<f64>,
    pub crit_bonus_chance: Option<f64>,
    pub lifesteal_percent: Option<f64>,
    pub physical_as_extra_fire_percent: f64,
    pub chance_to_bleed_percent: f64,
    pub more_bleeding_damage_percent: f64,
    /// Compatible supports that were applied, in socket order.
    pub supports: Vec<&'a SupportGemDefinition>,
}

impl SkillRuntimeStats<'_> {
    pub fn number_of_hits(&self) -> usize {
        self.hit_damage_multipliers.len()
    }

    pub fn total_hit_multiplier(&self) -> f64 {
        self.hit_damage_multipliers.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillDamageEstimate {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Per-level value at `level`, clamped to the table, or `base` without one.
pub fn leveled_value(base: f64, by_level: &[f64], level: u32) -> f64 {
    if by_level.is_empty() {
        return base;
    }
    let index = (level.max(1) as usize - 1).min(by_level.len() - 1);
    by_level[index]
}

fn leveled_option(base: Option<f64>, by_level: &[f64], level: u32) -> Option<f64> {
    if by_level.is_empty() {
        base
    } else {
        Some(leveled_value(0.0, by_level, level))
    }
}

/// Supports socketed on `skill` whose definitions exist, paired with their level.
pub fn socketed_supports<'a>(
    skill: &PlayerSkill,
    owned: &[PlayerSupportGem],
    catalog: &'a Catalog,
) -> Vec<(&'a SupportGemDefinition, u32)> {
    skill
        .socketed_support_ids
        .iter()
        .filter_map(|id| owned.iter().find(|g| g.instance_id == *id))
        .filter_map(|gem| catalog.support_gem(&gem.definition_id).map(|def| (def, gem.level)))
        .collect()
}

pub fn get_skill_runtime_stats<'a>(
    definition: &SkillDefinition,
    skill: &PlayerSkill,
    owned: &[PlayerSupportGem],
    catalog: &'a Catalog,
) -> SkillRuntimeStats<'a> {
    let level = skill.level.max(1);
    let mut mana_cost = leveled_value(definition.mana_cost, &definition.mana_cost_by_level, level);
    let mut cooldown = definition.cooldown;
    let mut damage_multiplier = leveled_value(
        definition.damage_multiplier,
        &definition.damage_multiplier_by_level,
        level,
    );
    let mut added_damage_min = definition.added_damage_min;
    let mut added_damage_max = definition.added_damage_max;
    let base_hits = definition.number_of_hits.unwrap_or(1).max(1) as usize;
    let mut hit_damage_multipliers = vec![1.0; base_hits];
    let double_damage_chance = leveled_value(
        definition.double_damage_chance.unwrap_or(0.0),
        &definition.double_damage_chance_by_level,
        level,
    );
    let mut physical_as_extra_fire_percent = 0.0;
    let mut chance_to_bleed_percent = 0.0;
    let mut more_bleeding_damage_percent = 0.0;
    let mut supports = Vec::new();

    for (support, support_level) in socketed_supports(skill, owned, catalog) {
        if !support.compatible_skill_types.contains(&definition.skill_type) {
            continue;
        }
        if let Some(more) = support.more_damage_multiplier {
            damage_multiplier *= 1.0 + more;
        }
        if let Some(multiplier) = support.cooldown_multiplier {
            cooldown *= multiplier;
        }
        if let Some(more) = leveled_option(
            support.attack_speed_more_percent,
            &support.attack_speed_more_percent_by_level,
            support_level,
        ) {
            cooldown /= 1.0 + more / 100.0;
        }
        if let Some(multiplier) = support.mana_multiplier {
            mana_cost *= multiplier;
        }
        added_damage_min += support.added_damage_min.unwrap_or(0.0);
        added_damage_max += support.added_damage_max.unwrap_or(0.0);
        for _ in 0..support.added_hits.unwrap_or(0) {
            hit_damage_multipliers.push(1.0);
        }
        if let Some(less) = leveled_option(
            support.second_hit_less_damage_percent,
            &support.second_hit_less_damage_percent_by_level,
            support_level,
        ) {
            if let Some(second) = hit_damage_multipliers.get_mut(1) {
                *second *= (1.0 - less / 100.0).max(0.0);
            }
        }
        physical_as_extra_fire_percent += leveled_option(
            support.physical_as_extra_fire_percent,
            &support.physical_as_extra_fire_percent_by_level,
            support_level,
        )
        .unwrap_or(0.0);
        chance_to_bleed_percent += leveled_option(
            support.chance_to_bleed_percent,
            &support.chance_to_bleed_percent_by_level,
            support_level,
        )
        .unwrap_or(0.0);
        more_bleeding_damage_percent += leveled_option(
            support.more_bleeding_damage_percent,
            &support.more_bleeding_damage_percent_by_level,
            support_level,
        )
        .unwrap_or(0.0);
        supports.push(support);
    }

    SkillRuntimeStats {
        mana_cost: mana_cost.round().max(0.0),
        cooldown: cooldown.max(0.0),
        damage_multiplier,
        added_damage_min,
        added_damage_max,
        hit_damage_multipliers,
        aoe_radius: definition.aoe_radius.unwrap_or(1).max(1) as usize,
        double_damage_chance: (double_damage_chance > 0.0).then_some(double_damage_chance),
        crit_bonus_chance: definition.crit_bonus_chance,
        lifesteal_percent: definition.lifesteal_percent,
        physical_as_extra_fire_percent,
        chance_to_bleed_percent,
        more_bleeding_damage_percent,
        supports,
    }
}

/// Min, max and average damage of one use against an unmitigated target.
/// Pure, for display.
pub fn estimate_skill_damage_range(
    effective: &EffectiveStats,
    runtime: &SkillRuntimeStats<'_>,
) -> SkillDamageEstimate {
    let s = &effective.stats;
    let phys = 1.0 + s.increased_physical_damage / 100.0;
    let fire = 1.0 + s.increased_fire_damage / 100.0;
    let cold = 1.0 + s.increased_cold_damage / 100.0;
    let lightning = 1.0 + s.increased_lightning_damage / 100.0;

    let phys_min = s.physical_damage_min * phys;
    let phys_max = s.physical_damage_max * phys;
    let base_min = phys_min + s.fire_damage_min * fire + s.cold_damage_min * cold
        + s.lightning_damage_min * lightning;
    let base_max = phys_max + s.fire_damage_max * fire + s.cold_damage_max * cold
        + s.lightning_damage_max * lightning;

    let extra_fire = runtime.physical_as_extra_fire_percent / 100.0 * fire;
    let multiplier = runtime.damage_multiplier;
    let weapon_min = base_min * multiplier + phys_min * multiplier * extra_fire;
    let weapon_max = base_max * multiplier + phys_max * multiplier * extra_fire;

    let hits = runtime.total_hit_multiplier();
    let min = ((weapon_min + runtime.added_damage_min) * hits).max(0.0);
    let max = ((weapon_max + runtime.added_damage_max) * hits).max(0.0);
    SkillDamageEstimate {
        min,
        max,
        avg: (min + max) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::player::Player;
    use crate::character::stats::compute_effective_stats;
    use uuid::Uuid;

    fn with_support(
        catalog: &Catalog,
        skill_id: &str,
        support_id: &str,
    ) -> (PlayerSkill, Vec<PlayerSupportGem>) {
        let gem = PlayerSupportGem {
            instance_id: Uuid::from_u128(7),
            definition_id: support_id.to_string(),
            level: 1,
            experience: 0.0,
        };
        assert!(catalog.support_gem(support_id).is_some());
        let mut skill = PlayerSkill::new(skill_id);
        skill.socketed_support_ids.push(gem.instance_id);
        (skill, vec![gem])
    }

    #[test]
    fn test_leveled_value_clamps() {
        assert_eq!(leveled_value(5.0, &[], 3), 5.0);
        assert_eq!(leveled_value(5.0, &[1.0, 2.0], 0), 1.0);
        assert_eq!(leveled_value(5.0, &[1.0, 2.0], 2), 2.0);
        assert_eq!(leveled_value(5.0, &[1.0, 2.0], 10), 2.0);
    }

    #[test]
    fn test_plain_skill_uses_definition() {
        let catalog = Catalog::builtin();
        let def = catalog.skill("doubleStrike").unwrap();
        let skill = PlayerSkill::new("doubleStrike");
        let runtime = get_skill_runtime_stats(def, &skill, &[], &catalog);
        assert_eq!(runtime.mana_cost, 6.0);
        assert_eq!(runtime.cooldown, 1.5);
        assert_eq!(runtime.hit_damage_multipliers, vec![1.0, 1.0]);
        assert_eq!(runtime.aoe_radius, 1);
        assert!(runtime.supports.is_empty());
    }

    #[test]
    fn test_multistrike_adds_weaker_second_hit() {
        let catalog = Catalog::builtin();
        let def = catalog.skill("heavyStrike").unwrap();
        let (skill, gems) = with_support(&catalog, "heavyStrike", "multistrike");
        let runtime = get_skill_runtime_stats(def, &skill, &gems, &catalog);
        assert_eq!(runtime.number_of_hits(), 2);
        assert!((runtime.hit_damage_multipliers[1] - 0.7).abs() < 1e-9);
        assert!((runtime.total_hit_multiplier() - 1.7).abs() < 1e-9);
        // 8 * 1.4 = 11.2
        assert_eq!(runtime.mana_cost, 11.0);
    }

    #[test]
    fn test_faster_attacks_divides_cooldown() {
        let catalog = Catalog::builtin();
        let def = catalog.skill("heavyStrike").unwrap();
        let (skill, gems) = with_support(&catalog, "heavyStrike", "fasterAttacks");
        let runtime = get_skill_runtime_stats(def, &skill, &gems, &catalog);
        assert!((runtime.cooldown - 2.0 / 1.2).abs() < 1e-9);
        assert_eq!(runtime.supports.len(), 1);
    }

    #[test]
    fn test_incompatible_support_ignored() {
        let catalog = Catalog::builtin();
        let def = catalog.skill("fireball").unwrap();
        let (skill, gems) = with_support(&catalog, "fireball", "meleePhysicalDamage");
        let runtime = get_skill_runtime_stats(def, &skill, &gems, &catalog);
        assert!(runtime.supports.is_empty());
        assert_eq!(runtime.mana_cost, 18.0);
    }

    #[test]
    fn test_estimate_strike_matches_weapon_range() {
        let catalog = Catalog::builtin();
        let player = Player::new("Test");
        let effective = compute_effective_stats(&player);
        let def = catalog.skill("defaultAttack").unwrap();
        let skill = PlayerSkill::new("defaultAttack");
        let runtime = get_skill_runtime_stats(def, &skill, &[], &catalog);
        let estimate = estimate_skill_damage_range(&effective, &runtime);
        assert!((estimate.min - 4.0 * 1.02).abs() < 1e-9);
        assert!((estimate.max - 7.0 * 1.02).abs() < 1e-9);
        assert!(estimate.min <= estimate.avg && estimate.avg <= estimate.max);
    }
}
