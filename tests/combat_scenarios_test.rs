//! Integration test: end-to-end combat scenarios through the public engine.
//!
//! Every scenario drives `Game::tick` and the intents the way a host would,
//! then inspects the committed state and the combat log.

use exile::combat::math::{hit_chance, monster_accuracy, resolve_monster_hit, HitOutcome};
use exile::combat::spawn::spawn_map_monster;
use exile::combat::types::{DamageType, Monster, MonsterRarity};
use exile::core::{CombatState, LogKind};
use exile::character::player::Player;
use exile::character::stats::compute_effective_stats;
use exile::{Catalog, EngineConfig, Game, TickEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DT: f64 = 0.1;

fn fighting_game(catalog: Catalog, rng: &mut ChaCha8Rng) -> Game {
    let mut game = Game::new(catalog, EngineConfig::default());
    game.select_map("twilightBeach", rng).expect("first map is open");
    game.state.monsters.clear();
    game.state.spawn_timer = 1e9;
    game
}

/// A normal monster from the first map, already in melee range.
fn adjacent_monster(game: &Game, rng: &mut ChaCha8Rng) -> Monster {
    let mut monster =
        spawn_map_monster(game.catalog(), "twilightBeach", 0, rng).expect("pool is not empty");
    monster.rarity = MonsterRarity::Normal;
    monster.distance = 0.0;
    monster
}

// =========================================================================
// Basic kill loop
// =========================================================================

#[test]
fn test_kill_loop_pays_exact_experience() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut game = fighting_game(Catalog::builtin(), &mut rng);
    let mut monster = adjacent_monster(&game, &mut rng);
    monster.max_life = 22.0;
    monster.current_life = 22.0;
    monster.experience_reward = 25.0;
    game.state.monsters.push(monster);

    let mut killed = false;
    for _ in 0..600 {
        let outcome = game.tick(DT, &mut rng);
        assert!(!outcome.player_died, "a level 1 monster should not win");
        if outcome.kills() > 0 {
            killed = true;
            break;
        }
    }

    assert!(killed, "monster should die within a minute");
    assert!(game.state.monsters.is_empty());
    assert_eq!(game.state.player.experience, 25.0);
    assert!(game
        .state
        .log
        .iter()
        .any(|entry| entry.kind == LogKind::MonsterDeath));
}

// =========================================================================
// Evasion
// =========================================================================

#[test]
fn test_evasion_floor_evades_about_95_percent() {
    let mut player = Player::new("Dodger");
    player.stats.evasion = 1_000_000.0;
    let effective = compute_effective_stats(&player);
    assert_eq!(hit_chance(monster_accuracy(1), effective.stats.evasion), 5.0);

    let mut rng = ChaCha8Rng::seed_from_u64(95);
    let trials = 20_000;
    let evaded = (0..trials)
        .filter(|_| {
            resolve_monster_hit(1, 10.0, DamageType::Physical, &effective, &mut rng)
                == HitOutcome::Evaded
        })
        .count();
    let rate = evaded as f64 / trials as f64;
    assert!((0.93..=0.97).contains(&rate), "evade rate {rate}");
}

// =========================================================================
// Boss gating
// =========================================================================

#[test]
fn test_boss_gating_after_ten_kills() {
    let mut data = Catalog::builtin().data().clone();
    for map in &mut data.maps {
        if map.id == "twilightBeach" {
            map.kills_required = 10;
        }
    }
    let catalog = Catalog::new(data).expect("edited catalog stays valid");

    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let mut game = fighting_game(catalog, &mut rng);

    for kill in 1..=10 {
        let mut monster = adjacent_monster(&game, &mut rng);
        monster.current_life = 1.0;
        game.state.monsters = vec![monster];
        let outcome = game.tick(DT, &mut rng);
        assert_eq!(outcome.kills(), 1, "kill {kill}");
        if kill < 10 {
            assert!(!game.state.boss_ready, "ready too early at kill {kill}");
        }
    }
    assert!(game.state.boss_ready);

    // The arena stays empty while the boss waits.
    game.state.spawn_timer = 0.0;
    for _ in 0..100 {
        let outcome = game.tick(DT, &mut rng);
        assert!(!outcome
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::MonsterSpawned { .. })));
    }
    assert!(game.state.monsters.is_empty());

    game.start_boss_fight(&mut rng).expect("boss is ready");
    assert!(game.state.is_boss_fight);
    assert_eq!(game.state.monsters.len(), 1);
    assert!(game.state.monsters[0].is_boss());
}

// =========================================================================
// Bleed
// =========================================================================

#[test]
fn test_bleeds_do_not_stack_in_either_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let game = Game::with_defaults();
    for (first, second) in [(5.0, 8.0), (8.0, 5.0)] {
        let mut monster = adjacent_monster(&game, &mut rng);
        monster.apply_bleed(first, 5.0);
        monster.apply_bleed(second, 5.0);
        assert_eq!(monster.bleed_dps, 8.0);
        let dealt = monster.tick_bleed(1.0);
        assert!((dealt - 8.0).abs() < 1e-9, "dealt {dealt}");
    }
}

// =========================================================================
// Death and respawn
// =========================================================================

#[test]
fn test_respawn_on_death() {
    let mut rng = ChaCha8Rng::seed_from_u64(66);
    let mut game = fighting_game(Catalog::builtin(), &mut rng);
    let mut brute = adjacent_monster(&game, &mut rng);
    brute.max_life = 1e9;
    brute.current_life = 1e9;
    brute.damage = 1e6;
    brute.attack_cooldown = 0.0;
    game.state.monsters.push(brute);
    for flask in game.state.player.flasks.iter_mut().flatten() {
        flask.current_charges = 0;
    }

    let outcome = game.tick(DT, &mut rng);
    assert!(outcome.player_died);

    let effective = game.effective_stats();
    let player = &game.state.player;
    assert_eq!(player.current_life, effective.max_life());
    assert_eq!(player.current_mana, effective.max_mana());
    for flask in player.flasks.iter().flatten() {
        assert_eq!(flask.current_charges, flask.max_charges);
        assert!(!flask.is_active);
    }
    assert_eq!(game.state.combat_state, CombatState::Idle);
    assert_eq!(game.state.current_map_id, None);
    assert!(game.state.monsters.is_empty());

    // Nothing happens until a map is chosen again.
    assert!(game.tick(DT, &mut rng).events.is_empty());
}

// =========================================================================
// Resource clamping
// =========================================================================

#[test]
fn test_resources_clamped_across_delta_spikes() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut game = Game::with_defaults();
    game.select_map("twilightBeach", &mut rng).expect("first map is open");

    let steps = [0.1, 0.1, 5.0, 0.1, 30.0, 0.05, 120.0, 0.1];
    for round in 0..50 {
        for &dt in &steps {
            if !game.state.is_fighting() {
                game.select_map("twilightBeach", &mut rng).expect("first map is open");
            }
            game.tick(dt, &mut rng);
            let effective = game.effective_stats();
            let player = &game.state.player;
            assert!(
                (0.0..=effective.max_life()).contains(&player.current_life),
                "life {} out of bounds in round {round}",
                player.current_life
            );
            assert!(
                (0.0..=effective.max_mana()).contains(&player.current_mana),
                "mana {} out of bounds in round {round}",
                player.current_mana
            );
        }
    }
}
