//! Integration test: item generation limits, stat aggregation and the
//! character/map progression ledgers.

use exile::character::player::Player;
use exile::character::progression::{apply_level_ups, experience_for_level};
use exile::character::stats::compute_effective_stats;
use exile::items::generation::{build_item, select_tier};
use exile::items::types::ItemRarity;
use exile::zones::MapTracker;
use exile::{Catalog, Game, TickEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =========================================================================
// Affix tiers
// =========================================================================

#[test]
fn test_tier_selection_is_monotonic_in_item_level() {
    let catalog = Catalog::builtin();
    for affix in catalog.affixes() {
        let mut previous = 0;
        for item_level in 1..=100 {
            if let Some(tier) = select_tier(affix, item_level) {
                assert!(
                    tier.required_item_level <= item_level,
                    "{} tier {} needs ilvl {}",
                    affix.id,
                    tier.tier,
                    tier.required_item_level
                );
                assert!(
                    tier.tier >= previous,
                    "{} tier went down at ilvl {}",
                    affix.id,
                    item_level
                );
                previous = tier.tier;
            }
        }
    }
}

// =========================================================================
// Loot budget
// =========================================================================

#[test]
fn test_generated_items_respect_affix_budget() {
    let catalog = Catalog::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(31337);
    for base in catalog.item_bases() {
        for rarity in [ItemRarity::Normal, ItemRarity::Magic, ItemRarity::Rare] {
            for item_level in [1, 10, 40, 80] {
                let item = build_item(&catalog, base, rarity, item_level, &mut rng);
                let (_, max) = rarity.affix_budget();
                assert!(item.affix_count() <= max, "{} {:?}", base.id, rarity);
                assert!(item.prefixes.len() <= 3);
                assert!(item.suffixes.len() <= 3);
                if rarity == ItemRarity::Normal {
                    assert_eq!(item.affix_count(), 0);
                }
            }
        }
    }
}

// =========================================================================
// Stat aggregation
// =========================================================================

#[test]
fn test_stat_aggregation_is_pure() {
    let catalog = Catalog::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut player = Player::starter("Exile", &catalog);
    let base = catalog.item_base("rustySword").expect("builtin base");
    let sword = build_item(&catalog, base, ItemRarity::Rare, 10, &mut rng);
    player.equipment.replace(sword.slot, sword);

    let first = compute_effective_stats(&player);
    let second = compute_effective_stats(&player);
    assert_eq!(first, second);
}

// =========================================================================
// Character levels
// =========================================================================

#[test]
fn test_level_up_keeps_overflow_experience() {
    let mut player = Player::new("Exile");
    let needed = player.experience_to_next_level;
    player.experience = needed + 75.0;

    let levels = apply_level_ups(&mut player);
    assert_eq!(levels, vec![2]);
    assert_eq!(player.experience, 75.0);
    assert_eq!(player.experience_to_next_level, experience_for_level(2));
}

#[test]
fn test_large_reward_crosses_several_levels() {
    let mut player = Player::new("Exile");
    player.experience = experience_for_level(1) + experience_for_level(2) + 10.0;
    let levels = apply_level_ups(&mut player);
    assert_eq!(levels, vec![2, 3]);
    assert_eq!(player.level, 3);
    assert!((player.experience - 10.0).abs() < 1e-9);
}

// =========================================================================
// Map ledger
// =========================================================================

#[test]
fn test_only_entry_map_starts_unlocked() {
    let catalog = Catalog::builtin();
    let tracker = MapTracker::new(&catalog);
    assert!(tracker.is_unlocked("twilightBeach"));
    assert!(!tracker.is_unlocked("tidalCaves"));
    assert!(!tracker.is_unlocked("shipwreckGraveyard"));
}

#[test]
fn test_boss_clears_open_the_chain() {
    let catalog = Catalog::builtin();
    let mut tracker = MapTracker::new(&catalog);
    assert_eq!(
        tracker.record_boss_kill(&catalog, "twilightBeach").as_deref(),
        Some("tidalCaves")
    );
    // A second clear does not unlock anything new.
    assert_eq!(tracker.record_boss_kill(&catalog, "twilightBeach"), None);
    assert_eq!(
        tracker.record_boss_kill(&catalog, "tidalCaves").as_deref(),
        Some("shipwreckGraveyard")
    );
    assert_eq!(tracker.progress("twilightBeach").map(|p| p.times_cleared), Some(2));
}

// =========================================================================
// Long run
// =========================================================================

#[test]
fn test_long_session_makes_progress() {
    let mut rng = ChaCha8Rng::seed_from_u64(4242);
    let mut game = Game::with_defaults();
    let dt = game.config().tick_delta_secs();
    let mut kills = 0;
    let mut levels = 0;

    for _ in 0..(15 * 60 * game.config().tick_rate_hz) {
        if !game.state.is_fighting() {
            game.select_map("twilightBeach", &mut rng).expect("first map is open");
        }
        let outcome = game.tick(dt, &mut rng);
        kills += outcome.kills();
        levels += outcome
            .events
            .iter()
            .filter(|e| matches!(e, TickEvent::LevelUp { .. }))
            .count();
    }

    assert!(kills > 20, "only {kills} kills in fifteen minutes");
    assert_eq!(game.state.player.level as usize, 1 + levels);
    assert!(game.state.log.len() <= game.config().log_capacity);
}
