//! Simulation runner. Every run plays the real engine through its public
//! intents; statistics are read back from tick events.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use uuid::Uuid;

use super::config::SimConfig;
use super::report::SimReport;
use crate::catalog::Catalog;
use crate::core::constants::SKILL_BAR_SIZE;
use crate::core::{Game, TickEvent, TickOutcome};
use crate::items::types::Item;

/// Seconds between routine gem level-up attempts.
const GEM_CHECK_INTERVAL_SECS: f64 = 30.0;

/// Outcome of one simulated character.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_map_id: String,
    pub maps_unlocked: usize,
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub total_deaths: u64,
    pub items_found: u64,
    pub items_lost: u64,
    pub items_equipped: u64,
    pub final_currency: u32,
    /// Estimated average hit of the strongest bar skill at the end of the run.
    pub best_skill_damage: f64,
    pub seconds_played: f64,
    pub reached_target: bool,
    /// Game second at which each character level was reached.
    pub level_up_seconds: Vec<(u32, f64)>,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let catalog = Catalog::builtin();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &catalog, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {}, Level {}, Kills {}, Boss Kills {}, Deaths {}",
                run_idx + 1,
                config.num_runs,
                run.final_map_id,
                run.final_level,
                run.total_kills,
                run.total_boss_kills,
                run.total_deaths
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config.max_seconds_per_run)
}

/// Tallies tick events for one run.
#[derive(Default)]
struct SimStats {
    total_kills: u64,
    total_boss_kills: u64,
    total_deaths: u64,
    items_found: u64,
    items_lost: u64,
    level_up_seconds: Vec<(u32, f64)>,
}

impl SimStats {
    fn process_tick(&mut self, outcome: &TickOutcome, now: f64) {
        for event in &outcome.events {
            match event {
                TickEvent::MonsterDefeated { .. } => self.total_kills += 1,
                TickEvent::BossDefeated { .. } => {
                    self.total_kills += 1;
                    self.total_boss_kills += 1;
                }
                TickEvent::PlayerDied => self.total_deaths += 1,
                TickEvent::LevelUp { level } => self.level_up_seconds.push((*level, now)),
                TickEvent::ItemFound { stored, .. } => {
                    self.items_found += 1;
                    if !stored {
                        self.items_lost += 1;
                    }
                }
                _ => {}
            }
        }
    }
}

fn simulate_single_run(config: &SimConfig, catalog: &Catalog, rng: &mut impl Rng) -> RunStats {
    let mut game = Game::new(catalog.clone(), config.engine.clone());
    let dt = game.config().tick_delta_secs();
    let max_ticks = config.max_ticks_per_run();

    let mut stats = SimStats::default();
    let mut items_equipped = 0;
    let mut next_gem_check = GEM_CHECK_INTERVAL_SECS;
    let mut ticks: u64 = 0;
    let mut reached_target = false;

    let start = game.config().starting_map_id.clone();
    if game.select_map(&start, rng).is_err() {
        tracing::warn!(map = %start, "starting map unavailable, using the deepest open map");
    }

    while ticks < max_ticks {
        if !game.state.is_fighting() {
            let Some(map_id) = deepest_unlocked_map(&game) else {
                tracing::warn!("no map unlocked, ending run");
                break;
            };
            if game.select_map(&map_id, rng).is_err() {
                break;
            }
        }
        if game.state.boss_ready && !game.state.is_boss_fight {
            let _ = game.start_boss_fight(rng);
        }

        let outcome = game.tick(dt, rng);
        ticks += 1;
        let now = ticks as f64 * dt;
        stats.process_tick(&outcome, now);

        let found_item = outcome
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::ItemFound { stored: true, .. }));
        if found_item && config.auto_equip {
            items_equipped += equip_upgrades(&mut game);
        }
        if !game.state.player.has_inventory_space() {
            sell_inventory(&mut game);
        }

        let leveled = outcome.events.iter().any(|e| matches!(e, TickEvent::LevelUp { .. }));
        if leveled || now >= next_gem_check {
            level_gems(&mut game);
            next_gem_check = now + GEM_CHECK_INTERVAL_SECS;
        }

        if outcome.events.iter().any(|e| matches!(e, TickEvent::MapUnlocked { .. })) {
            // Move on to the new map right away.
            game.stop_farming();
        }

        if let Some(target) = &config.target_map_id {
            if game.state.maps.is_unlocked(target) {
                reached_target = true;
                break;
            }
        }
    }

    let player = &game.state.player;
    RunStats {
        final_level: player.level,
        final_map_id: deepest_unlocked_map(&game).unwrap_or_default(),
        maps_unlocked: game.state.maps.unlocked_map_ids().len(),
        total_kills: stats.total_kills,
        total_boss_kills: stats.total_boss_kills,
        total_deaths: stats.total_deaths,
        items_found: stats.items_found,
        items_lost: stats.items_lost,
        items_equipped,
        final_currency: player.currency.values().sum(),
        best_skill_damage: best_skill_damage(&game),
        seconds_played: ticks as f64 * dt,
        reached_target,
        level_up_seconds: stats.level_up_seconds,
    }
}

fn deepest_unlocked_map(game: &Game) -> Option<String> {
    game.state
        .maps
        .unlocked_map_ids()
        .iter()
        .filter_map(|id| game.catalog().map(id))
        .max_by_key(|map| map.order)
        .map(|map| map.id.clone())
}

fn best_skill_damage(game: &Game) -> f64 {
    (0..SKILL_BAR_SIZE)
        .filter_map(|slot| game.skill_damage_estimate(slot))
        .map(|estimate| estimate.avg)
        .fold(0.0, f64::max)
}

fn item_score(item: &Item) -> f64 {
    item.item_level as f64 + item.affix_count() as f64 * 2.0
}

/// Wears every inventory item that beats the one in its slot. Returns how
/// many were equipped.
fn equip_upgrades(game: &mut Game) -> u64 {
    let candidates: Vec<(Uuid, f64)> = game
        .state
        .player
        .inventory
        .iter()
        .map(|item| (item.id, item_score(item)))
        .collect();

    let mut equipped = 0;
    for (item_id, score) in candidates {
        let Some(slot) = game
            .state
            .player
            .inventory
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| item.slot)
        else {
            continue;
        };
        let worn = game.state.player.equipment.get(slot).as_ref().map(item_score);
        if worn.map_or(true, |worn| score > worn) && game.equip_item(item_id, Some(slot)).is_ok() {
            equipped += 1;
        }
    }
    equipped
}

fn sell_inventory(game: &mut Game) {
    let ids: Vec<Uuid> = game.state.player.inventory.iter().map(|item| item.id).collect();
    for item_id in ids {
        let _ = game.sell_item(item_id);
    }
}

/// Levels every bar gem as far as experience and character level allow.
fn level_gems(game: &mut Game) {
    for slot in 0..SKILL_BAR_SIZE {
        if game.state.player.skills[slot].is_none() {
            continue;
        }
        while game.level_up_skill_gem(slot).is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(12345),
            max_seconds_per_run: 300.0,
            verbosity: 0,
            ..Default::default()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let stats = simulate_single_run(&config, &Catalog::builtin(), &mut rng);

        assert!(stats.total_kills > 0);
        assert!(stats.seconds_played > 299.0);
        assert!(stats.final_level >= 1);
        assert!(stats.best_skill_damage > 0.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 2,
            seed: Some(42),
            max_seconds_per_run: 120.0,
            verbosity: 0,
            ..Default::default()
        };

        let first = run_simulation(&config);
        let second = run_simulation(&config);
        assert_eq!(first.num_runs, 2);
        assert_eq!(first.avg_total_kills, second.avg_total_kills);
        assert_eq!(first.avg_final_level, second.avg_final_level);
    }

    #[test]
    fn test_stats_count_events() {
        let mut stats = SimStats::default();
        let outcome = TickOutcome {
            events: vec![
                TickEvent::BossDefeated {
                    name: "Boss".into(),
                    experience: 10.0,
                },
                TickEvent::PlayerDied,
                TickEvent::ItemFound {
                    name: "Sword".into(),
                    rarity: crate::items::types::ItemRarity::Magic,
                    stored: false,
                },
                TickEvent::LevelUp { level: 2 },
            ],
            ..Default::default()
        };
        stats.process_tick(&outcome, 5.0);
        assert_eq!(stats.total_kills, 1);
        assert_eq!(stats.total_boss_kills, 1);
        assert_eq!(stats.total_deaths, 1);
        assert_eq!(stats.items_lost, 1);
        assert_eq!(stats.level_up_seconds, vec![(2, 5.0)]);
    }
}
