//! The combat tick: one fixed step of spawning, movement, attacks, damage
//! over time, flasks, regeneration and death resolution.
//!
//! A tick works on copies of the player, the roster and the map ledger and
//! commits them together at the end. Player death is the exception: only the
//! respawned player is kept and the arena is abandoned.

use rand::Rng;

use super::combat_log::{CombatLog, LogKind};
use super::constants::*;
use super::game::Game;
use crate::catalog::{Catalog, MapDefinition, SkillDefinition};
use crate::character::player::Player;
use crate::character::progression::apply_level_ups;
use crate::character::stats::{compute_effective_stats, EffectiveStats};
use crate::combat::math::{resolve_monster_hit, roll_weapon_damage, HitOutcome};
use crate::combat::spawn::{
    next_position_index, spawn_boss, spawn_map_monster, targets_in_range,
};
use crate::combat::types::{Monster, MonsterRarity};
use crate::items::drops::generate_loot;
use crate::items::types::ItemRarity;
use crate::skills::runtime::{get_skill_runtime_stats, SkillRuntimeStats};
use crate::zones::MapTracker;

/// Something worth reacting to that happened inside a tick. The combat log
/// carries the same story as text.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Arena ───────────────────────────────────────────────────
    MonsterSpawned {
        name: String,
        rarity: MonsterRarity,
        position_index: usize,
    },
    BossReady,
    BossSpawned {
        name: String,
    },

    // ── Combat ──────────────────────────────────────────────────
    /// The player acted. `skill_id` is `None` for a bare weapon hit.
    PlayerAttack {
        skill_id: Option<String>,
        targets: usize,
        damage: f64,
    },
    MonsterDefeated {
        name: String,
        rarity: MonsterRarity,
        experience: f64,
    },
    BossDefeated {
        name: String,
        experience: f64,
    },
    PlayerDied,

    // ── Rewards ─────────────────────────────────────────────────
    LevelUp {
        level: u32,
    },
    ItemFound {
        name: String,
        rarity: ItemRarity,
        /// False when the inventory was full and the item was lost.
        stored: bool,
    },
    MapUnlocked {
        map_id: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<TickEvent>,
    /// Life the player lost to monster hits this tick.
    pub damage_taken: f64,
    pub player_died: bool,
}

impl TickOutcome {
    pub fn kills(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    TickEvent::MonsterDefeated { .. } | TickEvent::BossDefeated { .. }
                )
            })
            .count()
    }
}

/// Damage and bleeds the player's action queued against roster indices.
struct PlayerAction {
    damage: Vec<f64>,
    bleeds: Vec<Option<f64>>,
}

impl PlayerAction {
    fn none(roster_len: usize) -> Self {
        Self {
            damage: vec![0.0; roster_len],
            bleeds: vec![None; roster_len],
        }
    }
}

impl Game {
    /// Advances combat by `delta_time` seconds. A no-op unless fighting in a
    /// map, and for non-positive or non-finite steps.
    pub fn tick(&mut self, delta_time: f64, rng: &mut impl Rng) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.state.is_fighting() || !delta_time.is_finite() || delta_time <= 0.0 {
            return outcome;
        }

        let catalog = &self.catalog;
        let config = &self.config;
        let state = &mut self.state;
        let Some(map) = state.current_map_id.as_deref().and_then(|id| catalog.map(id)) else {
            tracing::warn!(map = ?state.current_map_id, "fighting in an unknown map");
            return outcome;
        };

        let effective = compute_effective_stats(&state.player);
        let mut player = state.player.clone();
        let mut monsters = state.monsters.clone();
        let mut maps = state.maps.clone();
        let mut is_boss_fight = state.is_boss_fight;
        let mut boss_ready = state.boss_ready;
        let mut spawn_timer = state.spawn_timer - delta_time;
        let mut attack_cooldown = state.player_attack_cooldown;
        let log = &mut state.log;

        // ── Spawning ────────────────────────────────────────────
        let force_spawn = monsters.is_empty() && !is_boss_fight && !boss_ready;
        let progress = maps.progress_mut(&map.id);
        progress.boss_defeated = false;
        if !is_boss_fight && !boss_ready && progress.boss_condition_met(map) {
            boss_ready = true;
            announce_boss_ready(map, log, &mut outcome);
        }
        if boss_ready && !is_boss_fight && progress.auto_boss_enabled() {
            if let Some(boss) = spawn_boss(catalog, &map.boss_id, map.monster_level, rng) {
                log.add(LogKind::MonsterDeath, format!("BOSS APPROACHING: {}!", boss.name));
                tracing::info!(boss = %boss.name, "auto boss spawn");
                outcome.events.push(TickEvent::BossSpawned {
                    name: boss.name.clone(),
                });
                monsters = vec![boss];
                is_boss_fight = true;
                boss_ready = false;
            }
        }
        if !is_boss_fight
            && !boss_ready
            && monsters.len() < config.max_monsters
            && (spawn_timer <= 0.0 || force_spawn)
        {
            let position_index = next_position_index(&monsters);
            match spawn_map_monster(catalog, &map.id, position_index, rng) {
                Some(monster) => {
                    tracing::debug!(monster = %monster.name, position_index, "spawned");
                    outcome.events.push(TickEvent::MonsterSpawned {
                        name: monster.name.clone(),
                        rarity: monster.rarity,
                        position_index,
                    });
                    monsters.push(monster);
                }
                None => tracing::warn!(map = %map.id, "map pool produced no monster"),
            }
            spawn_timer = config.spawn_interval_secs;
        }

        // ── Movement and cooldowns ──────────────────────────────
        for monster in &mut monsters {
            monster.walk(delta_time);
            monster.decay_cooldowns(delta_time);
        }
        for skill in player.skills.iter_mut().flatten() {
            skill.current_cooldown = (skill.current_cooldown - delta_time).max(0.0);
        }
        attack_cooldown = (attack_cooldown - delta_time).max(0.0);

        // ── Player action ───────────────────────────────────────
        let targets = targets_in_range(&monsters);
        let action = if !targets.is_empty() && attack_cooldown <= 0.0 {
            attack_cooldown = attack_interval(effective.attack_speed);
            player_action(
                catalog,
                &mut player,
                &effective,
                &targets,
                monsters.len(),
                log,
                &mut outcome,
                rng,
            )
        } else {
            PlayerAction::none(monsters.len())
        };

        // ── Monsters: damage taken, bleeds, attacks ─────────────
        let mut incoming = 0.0;
        for (index, monster) in monsters.iter_mut().enumerate() {
            let in_range = monster.is_in_melee_range();
            monster.current_life -= action.damage[index];
            if let Some(dps) = action.bleeds[index] {
                monster.apply_bleed(dps, BLEED_DURATION_SECONDS);
            }
            if monster.is_alive() {
                monster.tick_bleed(delta_time);
            }
            if monster.is_alive() && in_range {
                incoming += monster_attacks(catalog, monster, &effective, log, rng);
            }
        }
        if incoming > 0.0 {
            player.current_life -= incoming;
            outcome.damage_taken = incoming;
        }

        // ── Flasks and regeneration ─────────────────────────────
        tick_flasks(&mut player, &effective, delta_time);
        player.heal(effective.stats.life_regeneration * delta_time, &effective);
        player.restore_mana(effective.stats.mana_regeneration * delta_time, &effective);

        // ── Deaths ──────────────────────────────────────────────
        let (survivors, dead): (Vec<Monster>, Vec<Monster>) =
            monsters.into_iter().partition(Monster::is_alive);
        for monster in dead {
            resolve_kill(catalog, map, &mut player, &mut maps, &monster, log, &mut outcome, rng);
            if monster.is_boss() {
                is_boss_fight = false;
                spawn_timer = config.boss_respawn_delay_secs;
            }
        }
        if !is_boss_fight && !boss_ready && maps.progress_mut(&map.id).boss_condition_met(map) {
            boss_ready = true;
            announce_boss_ready(map, log, &mut outcome);
        }

        if player.is_dead() {
            player.restore_full(&effective);
            for flask in player.flasks.iter_mut().flatten() {
                flask.refill();
            }
            log.add(LogKind::PlayerDeath, "You died! Respawning...");
            tracing::info!(map = %map.id, level = player.level, "player died");
            outcome.events.push(TickEvent::PlayerDied);
            outcome.player_died = true;
            state.player = player;
            state.return_to_town();
            return outcome;
        }

        player.clamp_resources(&effective);
        state.player = player;
        state.monsters = survivors;
        state.maps = maps;
        state.is_boss_fight = is_boss_fight;
        state.boss_ready = boss_ready;
        state.spawn_timer = spawn_timer;
        state.player_attack_cooldown = attack_cooldown;
        state.total_play_time += delta_time;
        outcome
    }
}

fn announce_boss_ready(map: &MapDefinition, log: &mut CombatLog, outcome: &mut TickOutcome) {
    log.add(LogKind::Notice, "BOSS READY! Challenge the boss when you are ready.");
    tracing::info!(map = %map.id, "boss ready");
    outcome.events.push(TickEvent::BossReady);
}

fn attack_interval(attacks_per_second: f64) -> f64 {
    if attacks_per_second > 0.0 {
        1.0 / attacks_per_second
    } else {
        1.0
    }
}

/// First usable non-Strike skill in bar order, else Strike if usable.
fn choose_skill<'a>(
    catalog: &'a Catalog,
    player: &Player,
) -> Option<(usize, &'a SkillDefinition, SkillRuntimeStats<'a>)> {
    let mut fallback = None;
    for (slot, skill) in player.skills.iter().enumerate() {
        let Some(skill) = skill else { continue };
        if !skill.is_active || skill.current_cooldown > 0.0 {
            continue;
        }
        let Some(definition) = catalog.skill(&skill.definition_id) else {
            continue;
        };
        let runtime = get_skill_runtime_stats(definition, skill, &player.support_gems, catalog);
        if runtime.mana_cost > player.current_mana {
            continue;
        }
        if definition.id != DEFAULT_ATTACK_SKILL_ID {
            return Some((slot, definition, runtime));
        }
        if fallback.is_none() {
            fallback = Some((slot, definition, runtime));
        }
    }
    fallback
}

#[allow(clippy::too_many_arguments)]
fn player_action(
    catalog: &Catalog,
    player: &mut Player,
    effective: &EffectiveStats,
    targets: &[usize],
    roster_len: usize,
    log: &mut CombatLog,
    outcome: &mut TickOutcome,
    rng: &mut impl Rng,
) -> PlayerAction {
    let mut action = PlayerAction::none(roster_len);
    let roll = roll_weapon_damage(effective, rng);

    let Some((slot, definition, runtime)) = choose_skill(catalog, player) else {
        let damage = roll.damage.round();
        action.damage[targets[0]] += damage;
        outcome.events.push(TickEvent::PlayerAttack {
            skill_id: None,
            targets: 1,
            damage,
        });
        return action;
    };
    tracing::debug!(skill = %definition.id, slot, "skill selected");

    let stats = &effective.stats;
    let mut damage = roll.damage * runtime.damage_multiplier;
    if runtime.physical_as_extra_fire_percent > 0.0 {
        damage += roll.physical
            * runtime.damage_multiplier
            * (runtime.physical_as_extra_fire_percent / 100.0)
            * (1.0 + stats.increased_fire_damage / 100.0);
    }
    if runtime.added_damage_max > 0.0 || runtime.added_damage_min > 0.0 {
        damage += runtime.added_damage_min
            + rng.gen::<f64>() * (runtime.added_damage_max - runtime.added_damage_min);
    }
    if let Some(bonus) = runtime.crit_bonus_chance {
        if !roll.is_crit && rng.gen::<f64>() * 100.0 < bonus {
            damage *= stats.critical_multiplier / 100.0;
        }
    }

    let hits = runtime.total_hit_multiplier();
    damage *= hits;
    let mut physical = roll.physical * runtime.damage_multiplier * hits;
    let double_damage = runtime
        .double_damage_chance
        .is_some_and(|chance| rng.gen::<f64>() * 100.0 < chance);
    if double_damage {
        damage *= 2.0;
        physical *= 2.0;
    }

    let per_target = damage.round();
    let hit_targets: Vec<usize> = targets.iter().copied().take(runtime.aoe_radius).collect();
    let mut lifesteal = 0.0;
    for &index in &hit_targets {
        action.damage[index] += per_target;

        if runtime.chance_to_bleed_percent > 0.0
            && physical > 0.0
            && rng.gen::<f64>() * 100.0 < runtime.chance_to_bleed_percent
        {
            let total = physical
                * (BLEED_DAMAGE_PERCENT / 100.0)
                * (1.0 + runtime.more_bleeding_damage_percent / 100.0);
            let dps = total / BLEED_DURATION_SECONDS;
            let pending = &mut action.bleeds[index];
            if pending.map_or(true, |current| dps > current) {
                *pending = Some(dps);
            }
        }

        if let Some(percent) = runtime.lifesteal_percent {
            lifesteal += (per_target * percent / 100.0).round();
        }
    }

    player.current_mana = (player.current_mana - runtime.mana_cost).max(0.0);
    if let Some(skill) = player.skills[slot].as_mut() {
        skill.current_cooldown = runtime.cooldown;
    }

    let total = per_target * hit_targets.len() as f64;
    if definition.id != DEFAULT_ATTACK_SKILL_ID && !hit_targets.is_empty() {
        let message = if hit_targets.len() > 1 {
            format!("{} hits {} enemies!", definition.name, hit_targets.len())
        } else {
            format!("{}!", definition.name)
        };
        log.add_value(LogKind::PlayerHit, message, total);
    }
    if roll.is_crit {
        log.add_value(LogKind::PlayerCrit, "Critical hit!", total);
    }
    if double_damage {
        log.add(LogKind::PlayerCrit, "Double Damage!");
    }
    if lifesteal > 0.0 {
        player.heal(lifesteal, effective);
        log.add_value(
            LogKind::PlayerHit,
            format!("Lifesteal heals for {}!", lifesteal),
            lifesteal,
        );
    }

    outcome.events.push(TickEvent::PlayerAttack {
        skill_id: Some(definition.id.clone()),
        targets: hit_targets.len(),
        damage: total,
    });
    action
}

/// Basic attack plus boss skills for one monster in melee range. Returns the
/// damage that landed.
fn monster_attacks(
    catalog: &Catalog,
    monster: &mut Monster,
    effective: &EffectiveStats,
    log: &mut CombatLog,
    rng: &mut impl Rng,
) -> f64 {
    let mut landed = 0.0;
    if monster.attack_cooldown <= 0.0 {
        let hit = resolve_monster_hit(
            monster.level,
            monster.damage,
            monster.damage_type,
            effective,
            rng,
        );
        match hit {
            HitOutcome::Evaded => {
                log.add(LogKind::Evade, format!("Evaded {}'s attack!", monster.name))
            }
            HitOutcome::Blocked => {
                log.add(LogKind::Block, format!("Blocked {}'s attack!", monster.name))
            }
            HitOutcome::Hit(damage) => landed += damage,
        }
        monster.attack_cooldown = attack_interval(monster.attack_speed);
    }

    if !monster.is_boss() {
        return landed;
    }
    let Some(boss) = catalog.boss(&monster.definition_id) else {
        return landed;
    };
    let (level, base_damage, damage_type) = (monster.level, monster.damage, monster.damage_type);
    for skill_state in &mut monster.skill_states {
        if skill_state.current_cooldown > 0.0 {
            continue;
        }
        let Some(skill) = boss.skill(&skill_state.skill_id) else {
            continue;
        };
        let damage = base_damage * skill.damage_multiplier;
        match resolve_monster_hit(level, damage, damage_type, effective, rng) {
            HitOutcome::Evaded => log.add(LogKind::Evade, format!("Evaded {}!", skill.name)),
            HitOutcome::Blocked => log.add(LogKind::Block, format!("Blocked {}!", skill.name)),
            HitOutcome::Hit(damage) => {
                landed += damage;
                log.add_value(
                    LogKind::MonsterHit,
                    format!("{} uses {}!", monster.name, skill.name),
                    damage,
                );
            }
        }
        skill_state.current_cooldown = skill.cooldown;
    }
    landed
}

/// Restores from active flasks, then drinks one life and one mana flask if
/// the matching resource is below the threshold.
fn tick_flasks(player: &mut Player, effective: &EffectiveStats, delta_time: f64) {
    let (mut life, mut mana) = (0.0, 0.0);
    for flask in player.flasks.iter_mut().flatten() {
        let (l, m) = flask.tick(delta_time);
        if flask.flask_type.restores_life() {
            life += l;
        }
        if flask.flask_type.restores_mana() {
            mana += m;
        }
    }
    player.heal(life, effective);
    player.restore_mana(mana, effective);

    if player.life_percent(effective) < FLASK_AUTO_USE_THRESHOLD {
        if let Some(flask) = player
            .flasks
            .iter_mut()
            .flatten()
            .find(|f| f.flask_type.restores_life() && f.can_use())
        {
            flask.activate();
            tracing::debug!(flask = %flask.name, "auto-used");
        }
    }
    if player.mana_percent(effective) < FLASK_AUTO_USE_THRESHOLD {
        if let Some(flask) = player
            .flasks
            .iter_mut()
            .flatten()
            .find(|f| f.flask_type.restores_mana() && f.can_use())
        {
            flask.activate();
            tracing::debug!(flask = %flask.name, "auto-used");
        }
    }
}

/// Pays out one dead monster: experience, gem experience, flask charges,
/// level-ups, items, currency and the map ledger.
#[allow(clippy::too_many_arguments)]
fn resolve_kill(
    catalog: &Catalog,
    map: &MapDefinition,
    player: &mut Player,
    maps: &mut MapTracker,
    monster: &Monster,
    log: &mut CombatLog,
    outcome: &mut TickOutcome,
    rng: &mut impl Rng,
) {
    let loot = generate_loot(catalog, monster, rng);

    player.experience += loot.experience;
    player.grant_gem_experience(loot.experience);
    for flask in player.flasks.iter_mut().flatten() {
        flask.add_charges(flask.charges_on_kill);
    }
    for level in apply_level_ups(player) {
        log.add_value(LogKind::LevelUp, format!("Level up! Now level {}", level), level as f64);
        tracing::info!(level, "character level up");
        outcome.events.push(TickEvent::LevelUp { level });
    }

    for item in loot.items {
        let name = item.name.clone();
        let rarity = item.rarity;
        let item_level = item.item_level;
        let stored = player.store_item(item).is_ok();
        if stored {
            log.add_value(LogKind::Loot, format!("Found: {}", name), item_level as f64);
        } else {
            log.add(LogKind::Loot, format!("Inventory full! {} was left behind.", name));
        }
        outcome.events.push(TickEvent::ItemFound {
            name,
            rarity,
            stored,
        });
    }
    for (currency, amount) in loot.currency {
        player.add_currency(currency, amount);
        log.add_value(
            LogKind::Loot,
            format!("Found {}x {}", amount, currency.name()),
            amount as f64,
        );
    }

    if monster.is_boss() {
        log.add_value(
            LogKind::MonsterDeath,
            format!("BOSS DEFEATED: {}!", monster.name),
            loot.experience,
        );
        tracing::info!(boss = %monster.name, map = %map.id, "boss defeated");
        outcome.events.push(TickEvent::BossDefeated {
            name: monster.name.clone(),
            experience: loot.experience,
        });
        if let Some(next_id) = maps.record_boss_kill(catalog, &map.id) {
            let name = catalog.map(&next_id).map_or(next_id.as_str(), |m| m.name.as_str());
            log.add(LogKind::Loot, format!("Unlocked new area: {}!", name));
            tracing::info!(map = %next_id, "map unlocked");
            outcome.events.push(TickEvent::MapUnlocked { map_id: next_id });
        }
    } else {
        maps.record_kill(&map.id);
        log.add_value(
            LogKind::MonsterDeath,
            format!("{} defeated!", monster.name),
            loot.experience,
        );
        outcome.events.push(TickEvent::MonsterDefeated {
            name: monster.name.clone(),
            rarity: monster.rarity,
            experience: loot.experience,
        });
    }
}
