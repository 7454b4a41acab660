//! Monster Factory and arena helpers.

use rand::Rng;
use std::cmp::Ordering;

use super::types::{BossSkillState, Monster, MonsterRarity};
use crate::catalog::{Catalog, MonsterDefinition};
use crate::core::constants::*;
use crate::utils::random_uuid;

struct ScaledStats {
    max_life: f64,
    damage: f64,
    experience_reward: f64,
}

fn scale_for_level(definition: &MonsterDefinition, level: u32) -> ScaledStats {
    let multiplier = MONSTER_LEVEL_GROWTH.powi(level as i32 - 1);
    ScaledStats {
        max_life: (definition.base_life * multiplier).floor(),
        damage: (definition.base_damage * multiplier).floor(),
        experience_reward: (definition.experience_reward * multiplier).floor(),
    }
}

/// 2% rare, 8% magic, otherwise normal.
pub fn roll_monster_rarity(rng: &mut impl Rng) -> MonsterRarity {
    let roll = rng.gen::<f64>() * 100.0;
    if roll < MONSTER_RARE_CHANCE_PERCENT {
        MonsterRarity::Rare
    } else if roll < MONSTER_MAGIC_CHANCE_PERCENT {
        MonsterRarity::Magic
    } else {
        MonsterRarity::Normal
    }
}

/// Instantiates a monster, `None` for an unknown definition.
pub fn spawn_monster(
    catalog: &Catalog,
    definition_id: &str,
    level: u32,
    position_index: usize,
    forced_rarity: Option<MonsterRarity>,
    rng: &mut impl Rng,
) -> Option<Monster> {
    let definition = catalog.monster(definition_id)?;
    let rarity = forced_rarity.unwrap_or_else(|| roll_monster_rarity(rng));
    let multipliers = rarity.multipliers();
    let scaled = scale_for_level(definition, level);
    let max_life = (scaled.max_life * multipliers.life).floor();

    let name = match rarity {
        MonsterRarity::Normal => definition.name.clone(),
        _ => format!("{} {}", rarity.name(), definition.name),
    };

    Some(Monster {
        id: random_uuid(rng),
        definition_id: definition.id.clone(),
        name,
        level,
        rarity,
        max_life,
        current_life: max_life,
        damage: (scaled.damage * multipliers.damage).floor(),
        attack_speed: definition.attack_speed,
        damage_type: definition.damage_type,
        experience_reward: (scaled.experience_reward * multipliers.experience).floor(),
        loot_bonus: definition.loot_bonus * multipliers.loot,
        position_index,
        distance: SPAWN_DISTANCE,
        move_speed: BASE_MOVE_SPEED * rarity.move_speed_multiplier(),
        attack_cooldown: 0.0,
        bleed_dps: 0.0,
        bleed_remaining_duration: 0.0,
        skill_states: Vec::new(),
    })
}

/// Instantiates a map boss at the center position. Boss definitions are
/// tuned directly, so only level scaling applies.
pub fn spawn_boss(
    catalog: &Catalog,
    boss_id: &str,
    map_level: u32,
    rng: &mut impl Rng,
) -> Option<Monster> {
    let boss = catalog.boss(boss_id)?;
    let scaled = scale_for_level(&boss.monster, map_level);
    Some(Monster {
        id: random_uuid(rng),
        definition_id: boss.id().to_string(),
        name: boss.monster.name.clone(),
        level: map_level,
        rarity: MonsterRarity::Boss,
        max_life: scaled.max_life,
        current_life: scaled.max_life,
        damage: scaled.damage,
        attack_speed: boss.monster.attack_speed,
        damage_type: boss.monster.damage_type,
        experience_reward: scaled.experience_reward,
        loot_bonus: boss.monster.loot_bonus,
        position_index: 0,
        distance: SPAWN_DISTANCE,
        move_speed: BASE_MOVE_SPEED * MonsterRarity::Boss.move_speed_multiplier(),
        attack_cooldown: 0.0,
        bleed_dps: 0.0,
        bleed_remaining_duration: 0.0,
        skill_states: boss
            .skills
            .iter()
            .map(|s| BossSkillState {
                skill_id: s.id.clone(),
                current_cooldown: 0.0,
            })
            .collect(),
    })
}

/// A random monster from the map's pool at the map's level.
pub fn spawn_map_monster(
    catalog: &Catalog,
    map_id: &str,
    position_index: usize,
    rng: &mut impl Rng,
) -> Option<Monster> {
    let map = catalog.map(map_id)?;
    if map.monster_pool.is_empty() {
        return None;
    }
    let monster_id = &map.monster_pool[rng.gen_range(0..map.monster_pool.len())];
    spawn_monster(catalog, monster_id, map.monster_level, position_index, None, rng)
}

/// Lowest arena position not taken, or the roster length once all are.
pub fn next_position_index(monsters: &[Monster]) -> usize {
    (0..ARENA_POSITIONS)
        .find(|i| monsters.iter().all(|m| m.position_index != *i))
        .unwrap_or(monsters.len())
}

fn by_priority(a: &Monster, b: &Monster) -> Ordering {
    b.rarity
        .priority()
        .cmp(&a.rarity.priority())
        .then(a.current_life.total_cmp(&b.current_life))
}

/// Roster indices of live monsters in melee range, best target first.
pub fn targets_in_range(monsters: &[Monster]) -> Vec<usize> {
    let mut indices: Vec<usize> = monsters
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_alive() && m.is_in_melee_range())
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| by_priority(&monsters[a], &monsters[b]));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::test_support::monster_in_range;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_level_one_normal_matches_definition() {
        let catalog = Catalog::builtin();
        let mut rng = test_rng();
        let rarity = Some(MonsterRarity::Normal);
        let m = spawn_monster(&catalog, "drownedZombie", 1, 2, rarity, &mut rng).unwrap();
        assert_eq!(m.max_life, 22.0);
        assert_eq!(m.current_life, 22.0);
        assert_eq!(m.experience_reward, 25.0);
        assert_eq!(m.name, "Drowned Zombie");
        assert_eq!(m.position_index, 2);
        assert_eq!(m.distance, SPAWN_DISTANCE);
        assert_eq!(m.move_speed, 35.0);
    }

    #[test]
    fn test_rarity_and_level_scaling() {
        let catalog = Catalog::builtin();
        let mut rng = test_rng();
        let m = spawn_monster(&catalog, "seaCrab", 3, 0, Some(MonsterRarity::Rare), &mut rng)
            .unwrap();
        // floor(28 * 1.21) = 33, * 4
        assert_eq!(m.max_life, 132.0);
        // floor(2 * 1.21) = 2, * 1.6
        assert_eq!(m.damage, 3.0);
        assert_eq!(m.loot_bonus, 4.0);
        assert_eq!(m.name, "Rare Sea Crab");
        assert!((m.move_speed - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_definitions_spawn_nothing() {
        let catalog = Catalog::builtin();
        let mut rng = test_rng();
        assert!(spawn_monster(&catalog, "dragon", 1, 0, None, &mut rng).is_none());
        assert!(spawn_boss(&catalog, "dragon", 1, &mut rng).is_none());
        assert!(spawn_map_monster(&catalog, "moon", 0, &mut rng).is_none());
    }

    #[test]
    fn test_boss_has_skill_states() {
        let catalog = Catalog::builtin();
        let mut rng = test_rng();
        let boss = spawn_boss(&catalog, "drownedCaptain", 1, &mut rng).unwrap();
        assert!(boss.is_boss());
        assert_eq!(boss.max_life, 250.0);
        assert_eq!(boss.position_index, 0);
        assert_eq!(boss.skill_states.len(), 2);
        assert!(boss.skill_states.iter().all(|s| s.current_cooldown == 0.0));
    }

    #[test]
    fn test_rarity_roll_distribution() {
        let mut rng = test_rng();
        let mut rare = 0;
        let mut magic = 0;
        for _ in 0..20_000 {
            match roll_monster_rarity(&mut rng) {
                MonsterRarity::Rare => rare += 1,
                MonsterRarity::Magic => magic += 1,
                _ => {}
            }
        }
        assert!((250..550).contains(&rare), "rare {}", rare);
        assert!((1300..1900).contains(&magic), "magic {}", magic);
    }

    #[test]
    fn test_next_position_fills_gaps() {
        assert_eq!(next_position_index(&[]), 0);
        let mut a = monster_in_range(10.0, 1.0);
        let mut b = monster_in_range(10.0, 1.0);
        a.position_index = 0;
        b.position_index = 2;
        assert_eq!(next_position_index(&[a.clone(), b]), 1);

        let full: Vec<Monster> = (0..ARENA_POSITIONS)
            .map(|i| {
                let mut m = a.clone();
                m.position_index = i;
                m
            })
            .collect();
        assert_eq!(next_position_index(&full), ARENA_POSITIONS);
    }

    #[test]
    fn test_targets_in_range_prefer_rarity_then_low_life() {
        let mut normal_low = monster_in_range(5.0, 1.0);
        normal_low.current_life = 2.0;
        let mut magic_high = monster_in_range(50.0, 1.0);
        magic_high.rarity = MonsterRarity::Magic;
        let mut rare_far = monster_in_range(50.0, 1.0);
        rare_far.rarity = MonsterRarity::Rare;
        rare_far.distance = 50.0;
        let mut magic_low = monster_in_range(50.0, 1.0);
        magic_low.rarity = MonsterRarity::Magic;
        magic_low.current_life = 10.0;

        let roster = vec![normal_low, magic_high, rare_far, magic_low];
        assert_eq!(targets_in_range(&roster), vec![3, 1, 0]);
        assert!(targets_in_range(&[]).is_empty());
    }
}
