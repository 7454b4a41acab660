//! Hit resolution between the player and monsters.

use rand::Rng;

use super::types::DamageType;
use crate::character::stats::EffectiveStats;
use crate::core::constants::*;

/// Percent chance that an attack with `accuracy` lands against `evasion`.
/// Zero evasion is always hit.
pub fn hit_chance(accuracy: f64, evasion: f64) -> f64 {
    if evasion <= 0.0 {
        return MAX_HIT_CHANCE_PERCENT;
    }
    let chance = accuracy / (accuracy + evasion / EVASION_DIVISOR) * 100.0;
    chance.clamp(MIN_HIT_CHANCE_PERCENT, MAX_HIT_CHANCE_PERCENT)
}

pub fn monster_accuracy(level: u32) -> f64 {
    MONSTER_BASE_ACCURACY + MONSTER_ACCURACY_PER_LEVEL * level as f64
}

/// Fraction of a physical hit removed by armor.
pub fn armor_reduction(armor: f64, monster_level: u32) -> f64 {
    let denominator = armor + ARMOR_PER_MONSTER_LEVEL * monster_level as f64;
    if armor <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }
    armor / denominator
}

/// Fraction of an elemental hit removed by resistance, capped at 75%.
pub fn resistance_reduction(resistance: f64) -> f64 {
    resistance.min(MAX_RESISTANCE_PERCENT).max(0.0) / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Evaded,
    Blocked,
    Hit(f64),
}

/// Resolves one monster attack (basic or boss skill) against the player.
pub fn resolve_monster_hit(
    monster_level: u32,
    base_damage: f64,
    damage_type: DamageType,
    player: &EffectiveStats,
    rng: &mut impl Rng,
) -> HitOutcome {
    let stats = &player.stats;
    let chance = hit_chance(monster_accuracy(monster_level), stats.evasion);
    if rng.gen::<f64>() * 100.0 > chance {
        return HitOutcome::Evaded;
    }

    if damage_type == DamageType::Physical
        && stats.block_chance > 0.0
        && rng.gen::<f64>() * 100.0 < stats.block_chance
    {
        return HitOutcome::Blocked;
    }

    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
    let mut damage = base_damage * variance;
    damage *= 1.0
        - match damage_type {
            DamageType::Physical => armor_reduction(stats.armor, monster_level),
            DamageType::Fire => resistance_reduction(stats.fire_resistance),
            DamageType::Cold => resistance_reduction(stats.cold_resistance),
            DamageType::Lightning => resistance_reduction(stats.lightning_resistance),
        };

    HitOutcome::Hit(damage.round().max(1.0))
}

/// One weapon swing before skill modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponRoll {
    /// Floored total across all damage types.
    pub damage: f64,
    /// The physical share, after increased damage and crit.
    pub physical: f64,
    pub is_crit: bool,
}

fn roll_between(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    if max <= min {
        return min;
    }
    min + rng.gen::<f64>() * (max - min)
}

pub fn roll_weapon_damage(player: &EffectiveStats, rng: &mut impl Rng) -> WeaponRoll {
    let s = &player.stats;
    let mut physical = roll_between(s.physical_damage_min, s.physical_damage_max, rng)
        * (1.0 + s.increased_physical_damage / 100.0);
    let fire = roll_between(s.fire_damage_min, s.fire_damage_max, rng)
        * (1.0 + s.increased_fire_damage / 100.0);
    let cold = roll_between(s.cold_damage_min, s.cold_damage_max, rng)
        * (1.0 + s.increased_cold_damage / 100.0);
    let lightning = roll_between(s.lightning_damage_min, s.lightning_damage_max, rng)
        * (1.0 + s.increased_lightning_damage / 100.0);
    let mut total = physical + fire + cold + lightning;

    let is_crit = rng.gen::<f64>() * 100.0 < s.critical_chance;
    if is_crit {
        total *= s.critical_multiplier / 100.0;
        physical *= s.critical_multiplier / 100.0;
    }

    WeaponRoll {
        damage: total.floor().max(0.0),
        physical: physical.max(0.0),
        is_crit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::player::Player;
    use crate::character::stats::compute_effective_stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn base_stats() -> EffectiveStats {
        compute_effective_stats(&Player::new("Test"))
    }

    #[test]
    fn test_hit_chance_bounds() {
        assert_eq!(hit_chance(110.0, 0.0), 100.0);
        assert_eq!(hit_chance(110.0, -5.0), 100.0);
        assert_eq!(hit_chance(110.0, 1_000_000.0), 5.0);
        // 110 / (110 + 110) = 50%
        assert!((hit_chance(110.0, 440.0) - 50.0).abs() < 1e-9);
        for evasion in [1.0, 10.0, 100.0, 1000.0, 1e5] {
            let chance = hit_chance(120.0, evasion);
            assert!((5.0..=100.0).contains(&chance));
        }
    }

    #[test]
    fn test_armor_reduction() {
        assert_eq!(armor_reduction(0.0, 5), 0.0);
        assert!((armor_reduction(50.0, 5) - 0.5).abs() < 1e-9);
        assert_eq!(armor_reduction(0.0, 0), 0.0);
    }

    #[test]
    fn test_resistance_cap() {
        assert_eq!(resistance_reduction(90.0), 0.75);
        assert_eq!(resistance_reduction(30.0), 0.30);
        assert_eq!(resistance_reduction(-20.0), 0.0);
    }

    #[test]
    fn test_unarmored_hit_stays_in_variance() {
        let stats = base_stats();
        let mut rng = test_rng();
        for _ in 0..500 {
            match resolve_monster_hit(1, 10.0, DamageType::Physical, &stats, &mut rng) {
                HitOutcome::Hit(damage) => assert!((8.0..=12.0).contains(&damage), "{}", damage),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_hits_deal_at_least_one() {
        let mut stats = base_stats();
        stats.stats.armor = 1e9;
        stats.stats.fire_resistance = 75.0;
        let mut rng = test_rng();
        for _ in 0..100 {
            assert_eq!(
                resolve_monster_hit(1, 0.5, DamageType::Physical, &stats, &mut rng),
                HitOutcome::Hit(1.0)
            );
        }
    }

    #[test]
    fn test_block_only_stops_physical() {
        let mut stats = base_stats();
        stats.stats.block_chance = 100.0;
        let mut rng = test_rng();
        assert_eq!(
            resolve_monster_hit(1, 10.0, DamageType::Physical, &stats, &mut rng),
            HitOutcome::Blocked
        );
        assert!(matches!(
            resolve_monster_hit(1, 10.0, DamageType::Cold, &stats, &mut rng),
            HitOutcome::Hit(_)
        ));
    }

    #[test]
    fn test_weapon_roll_range() {
        let stats = base_stats();
        let mut rng = test_rng();
        for _ in 0..1000 {
            let roll = roll_weapon_damage(&stats, &mut rng);
            let max = if roll.is_crit { 7.14 * 1.5 } else { 7.14 };
            assert!(roll.damage >= 4.0 && roll.damage <= max, "{:?}", roll);
            assert!(roll.physical >= roll.damage);
        }
    }
}
