//! Inbound intents. Each one is a discrete transition outside the tick that
//! either applies completely or is rejected with an [`ActionError`].

use rand::Rng;
use uuid::Uuid;

use super::combat_log::LogKind;
use super::constants::*;
use super::error::ActionError;
use super::game::Game;
use super::game_state::{CombatState, GameState};
use crate::catalog::Catalog;
use crate::character::player::{PlayerSkill, PlayerSupportGem};
use crate::character::stats::compute_effective_stats;
use crate::combat::spawn::{spawn_boss, spawn_map_monster};
use crate::items::drops::sell_reward;
use crate::items::types::{CurrencyType, EquipmentSlot};
use crate::skills::gems::GemLevelCheck;
use crate::utils::random_uuid;

fn skill_slot(state: &GameState, slot: usize) -> Result<&PlayerSkill, ActionError> {
    state
        .player
        .skills
        .get(slot)
        .ok_or(ActionError::InvalidSkillSlot(slot))?
        .as_ref()
        .ok_or(ActionError::EmptySkillSlot)
}

fn skill_name<'a>(catalog: &'a Catalog, skill: &'a PlayerSkill) -> &'a str {
    catalog
        .skill(&skill.definition_id)
        .map_or(skill.definition_id.as_str(), |s| s.name.as_str())
}

impl Game {
    // ── Maps and bosses ─────────────────────────────────────────

    /// Enters an unlocked map and starts fighting with one monster already
    /// in the arena.
    pub fn select_map(&mut self, map_id: &str, rng: &mut impl Rng) -> Result<(), ActionError> {
        self.attempt(|game| {
            let map = game
                .catalog()
                .map(map_id)
                .ok_or_else(|| ActionError::UnknownDefinition(map_id.to_string()))?;
            if !game.state.maps.is_unlocked(map_id) {
                return Err(ActionError::MapLocked(map.name.clone()));
            }
            let name = map.name.clone();
            let first = spawn_map_monster(game.catalog(), map_id, 0, rng);
            let spawn_interval = game.config().spawn_interval_secs;

            let state = &mut game.state;
            state.maps.progress_mut(map_id);
            state.current_map_id = Some(map_id.to_string());
            state.combat_state = CombatState::Fighting;
            state.monsters = first.into_iter().collect();
            state.is_boss_fight = false;
            state.boss_ready = false;
            state.spawn_timer = spawn_interval;
            state.player_attack_cooldown = 0.0;
            state.log.add(LogKind::Notice, format!("Entered {}", name));
            tracing::info!(map = %map_id, "entered map");
            Ok(())
        })
    }

    pub fn stop_farming(&mut self) {
        self.state.return_to_town();
        self.state.log.add(LogKind::Notice, "Returned to town");
        tracing::info!("returned to town");
    }

    /// Replaces the roster with the current map's boss.
    pub fn start_boss_fight(&mut self, rng: &mut impl Rng) -> Result<(), ActionError> {
        self.attempt(|game| {
            let map_id = game.state.current_map_id.clone().ok_or(ActionError::NotInMap)?;
            if !game.state.boss_ready {
                return Err(ActionError::BossNotReady);
            }
            let map = game
                .catalog()
                .map(&map_id)
                .ok_or_else(|| ActionError::UnknownDefinition(map_id.clone()))?;
            let boss = spawn_boss(game.catalog(), &map.boss_id, map.monster_level, rng)
                .ok_or_else(|| ActionError::UnknownDefinition(map.boss_id.clone()))?;

            let state = &mut game.state;
            state
                .log
                .add(LogKind::MonsterDeath, format!("BOSS FIGHT STARTED: {}!", boss.name));
            tracing::info!(boss = %boss.name, "boss fight started");
            state.monsters = vec![boss];
            state.is_boss_fight = true;
            state.boss_ready = false;
            Ok(())
        })
    }

    pub fn toggle_auto_boss_spawn(&mut self) -> Result<(), ActionError> {
        self.attempt(|game| {
            let map_id = game.state.current_map_id.clone().ok_or(ActionError::NotInMap)?;
            let enabled = game.state.maps.toggle_auto_boss_spawn(&map_id)?;
            let label = if enabled { "ON" } else { "OFF" };
            game.state
                .log
                .add(LogKind::Notice, format!("Auto boss spawn: {}", label));
            Ok(())
        })
    }

    // ── Items ───────────────────────────────────────────────────

    /// Equips an inventory item into `slot` (its own slot when `None`). The
    /// previously worn item goes back to the inventory.
    pub fn equip_item(
        &mut self,
        item_id: Uuid,
        slot: Option<EquipmentSlot>,
    ) -> Result<(), ActionError> {
        self.attempt(|game| {
            let player = &mut game.state.player;
            let item = player
                .inventory
                .iter()
                .find(|i| i.id == item_id)
                .ok_or_else(|| ActionError::NotFound(item_id.to_string()))?;
            let target = slot.unwrap_or(item.slot);
            if !item.slot.fits(target) {
                return Err(ActionError::IncompatibleSlot {
                    item: item.name.clone(),
                    slot: target,
                });
            }

            let Some(item) = player.take_inventory_item(item_id) else {
                return Err(ActionError::NotFound(item_id.to_string()));
            };
            if let Some(previous) = player.equipment.replace(target, item) {
                player.inventory.push(previous);
            }
            let effective = compute_effective_stats(player);
            player.clamp_resources(&effective);
            Ok(())
        })
    }

    pub fn unequip_item(&mut self, slot: EquipmentSlot) -> Result<(), ActionError> {
        self.attempt(|game| {
            let player = &mut game.state.player;
            if player.equipment.get(slot).is_none() {
                return Err(ActionError::NotFound(slot.name().to_string()));
            }
            if !player.has_inventory_space() {
                return Err(ActionError::InventoryFull);
            }
            if let Some(item) = player.equipment.take(slot) {
                player.inventory.push(item);
            }
            let effective = compute_effective_stats(player);
            player.clamp_resources(&effective);
            Ok(())
        })
    }

    pub fn sell_item(&mut self, item_id: Uuid) -> Result<(), ActionError> {
        self.attempt(|game| {
            let state = &mut game.state;
            let item = state
                .player
                .take_inventory_item(item_id)
                .ok_or_else(|| ActionError::NotFound(item_id.to_string()))?;
            match sell_reward(item.rarity) {
                Some((currency, amount)) => {
                    state.player.add_currency(currency, amount);
                    state.log.add_value(
                        LogKind::Loot,
                        format!("Sold {} for {}x {}", item.name, amount, currency.name()),
                        amount as f64,
                    );
                }
                None => state.log.add(LogKind::Loot, format!("Sold {}", item.name)),
            }
            Ok(())
        })
    }

    // ── Skills ──────────────────────────────────────────────────

    /// Learns a skill into the first free bar slot, or the inactive pool.
    pub fn buy_skill(&mut self, skill_id: &str) -> Result<(), ActionError> {
        self.attempt(|game| {
            let definition = game
                .catalog()
                .skill(skill_id)
                .ok_or_else(|| ActionError::UnknownDefinition(skill_id.to_string()))?;
            let name = definition.name.clone();
            let player = &game.state.player;
            if definition.id == DEFAULT_ATTACK_SKILL_ID || player.knows_skill(skill_id) {
                return Err(ActionError::AlreadyKnown(name));
            }
            if definition.required_level > player.level {
                return Err(ActionError::LevelRequirement {
                    required: definition.required_level,
                    current: player.level,
                });
            }
            if !game
                .catalog()
                .buyable_skills(player.level)
                .any(|s| s.id == skill_id)
            {
                return Err(ActionError::NotPurchasable(name));
            }
            let (currency, price) = Catalog::skill_price(definition);

            let state = &mut game.state;
            state.player.spend_currency(currency, price)?;
            let learned = PlayerSkill::new(skill_id);
            match state.player.first_empty_skill_slot() {
                Some(slot) => {
                    state.player.skills[slot] = Some(learned);
                    state.log.add(LogKind::SkillUse, format!("Learned {}!", name));
                }
                None => {
                    state.player.inactive_skills.push(learned);
                    state
                        .log
                        .add(LogKind::SkillUse, format!("Learned {} (stored as inactive).", name));
                }
            }
            Ok(())
        })
    }

    /// Moves a bar skill into the inactive pool.
    pub fn remove_equipped_skill(&mut self, slot: usize) -> Result<(), ActionError> {
        self.attempt(|game| {
            let skill = skill_slot(&game.state, slot)?;
            let name = skill_name(game.catalog(), skill).to_string();
            let state = &mut game.state;
            if let Some(skill) = state.player.skills[slot].take() {
                state.player.inactive_skills.push(skill);
            }
            state
                .log
                .add(LogKind::SkillUse, format!("Removed {} from skill bar.", name));
            Ok(())
        })
    }

    pub fn equip_inactive_skill(&mut self, skill_id: &str) -> Result<(), ActionError> {
        self.attempt(|game| {
            let player = &game.state.player;
            let index = player
                .inactive_skills
                .iter()
                .position(|s| s.definition_id == skill_id)
                .ok_or_else(|| ActionError::NotFound(skill_id.to_string()))?;
            let slot = player.first_empty_skill_slot().ok_or(ActionError::SkillBarFull)?;
            let name = skill_name(game.catalog(), &player.inactive_skills[index]).to_string();

            let state = &mut game.state;
            let skill = state.player.inactive_skills.remove(index);
            state.player.skills[slot] = Some(skill);
            state.log.add(
                LogKind::SkillUse,
                format!("Equipped {} to slot {}.", name, slot + 1),
            );
            Ok(())
        })
    }

    /// Swaps two skill-bar slots, either of which may be empty.
    pub fn move_skill_slot(&mut self, from: usize, to: usize) -> Result<(), ActionError> {
        self.attempt(|game| {
            for slot in [from, to] {
                if slot >= SKILL_BAR_SIZE {
                    return Err(ActionError::InvalidSkillSlot(slot));
                }
            }
            game.state.player.skills.swap(from, to);
            Ok(())
        })
    }

    /// Flips whether the tick may pick the skill in `slot`.
    pub fn toggle_skill_auto_use(&mut self, slot: usize) -> Result<(), ActionError> {
        self.attempt(|game| {
            skill_slot(&game.state, slot)?;
            let catalog = &game.catalog;
            let state = &mut game.state;
            let Some(skill) = state.player.skills[slot].as_mut() else {
                return Err(ActionError::EmptySkillSlot);
            };
            skill.is_active = !skill.is_active;
            let label = if skill.is_active { "ON" } else { "OFF" };
            let message = format!("{} auto-use: {}", skill_name(catalog, skill), label);
            state.log.add(LogKind::Notice, message);
            Ok(())
        })
    }

    // ── Gems ────────────────────────────────────────────────────

    pub fn level_up_skill_gem(&mut self, slot: usize) -> Result<(), ActionError> {
        self.attempt(|game| {
            let skill = skill_slot(&game.state, slot)?;
            let next_level = skill_level_check(game.catalog(), skill, game.state.player.level)?;
            let catalog = &game.catalog;
            let state = &mut game.state;
            if let Some(skill) = state.player.skills[slot].as_mut() {
                skill.level = next_level;
                let name = skill_name(catalog, skill);
                let message = format!("{} reached level {}!", name, next_level);
                state.log.add_value(LogKind::LevelUp, message, next_level as f64);
            }
            Ok(())
        })
    }

    pub fn level_up_inactive_skill_gem(&mut self, skill_id: &str) -> Result<(), ActionError> {
        self.attempt(|game| {
            let player = &game.state.player;
            let index = player
                .inactive_skills
                .iter()
                .position(|s| s.definition_id == skill_id)
                .ok_or_else(|| ActionError::NotFound(skill_id.to_string()))?;
            let next_level =
                skill_level_check(game.catalog(), &player.inactive_skills[index], player.level)?;
            let catalog = &game.catalog;
            let state = &mut game.state;
            let skill = &mut state.player.inactive_skills[index];
            skill.level = next_level;
            let message = format!("{} reached level {}!", skill_name(catalog, skill), next_level);
            state.log.add_value(LogKind::LevelUp, message, next_level as f64);
            Ok(())
        })
    }

    pub fn level_up_support_gem(&mut self, instance_id: Uuid) -> Result<(), ActionError> {
        self.attempt(|game| {
            let player = &game.state.player;
            let gem = player
                .support_gem(instance_id)
                .ok_or_else(|| ActionError::NotFound(instance_id.to_string()))?;
            let definition = game
                .catalog()
                .support_gem(&gem.definition_id)
                .ok_or_else(|| ActionError::UnknownDefinition(gem.definition_id.clone()))?;
            let next_level = GemLevelCheck {
                name: &definition.name,
                level: gem.level,
                experience: gem.experience,
                experience_table: &definition.gem_total_experience_by_level,
                base_required_level: definition.required_level,
                required_level_table: &definition.required_character_level_by_gem_level,
            }
            .next_level(player.level)?;
            let name = definition.name.clone();

            let state = &mut game.state;
            if let Some(gem) = state.player.support_gem_mut(instance_id) {
                gem.level = next_level;
            }
            state.log.add_value(
                LogKind::LevelUp,
                format!("{} reached level {}!", name, next_level),
                next_level as f64,
            );
            Ok(())
        })
    }

    /// Buys a new support gem instance. Several copies may be owned.
    pub fn buy_support_gem(
        &mut self,
        support_id: &str,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        self.attempt(|game| {
            let definition = game
                .catalog()
                .support_gem(support_id)
                .ok_or_else(|| ActionError::UnknownDefinition(support_id.to_string()))?;
            let player = &game.state.player;
            if definition.required_level > player.level {
                return Err(ActionError::LevelRequirement {
                    required: definition.required_level,
                    current: player.level,
                });
            }
            let (currency, cost, name) = (
                definition.cost_currency,
                definition.cost_amount,
                definition.name.clone(),
            );

            let state = &mut game.state;
            state.player.spend_currency(currency, cost)?;
            state.player.support_gems.push(PlayerSupportGem {
                instance_id: random_uuid(rng),
                definition_id: support_id.to_string(),
                level: 1,
                experience: 0.0,
            });
            state.log.add(LogKind::SkillUse, format!("Bought {}.", name));
            Ok(())
        })
    }

    /// Spends a Socket Orb on one more support socket for a bar skill.
    pub fn add_skill_socket(&mut self, slot: usize) -> Result<(), ActionError> {
        self.attempt(|game| {
            let skill = skill_slot(&game.state, slot)?;
            let name = skill_name(game.catalog(), skill).to_string();
            if skill.max_support_sockets >= MAX_SUPPORT_SOCKETS {
                return Err(ActionError::SocketLimit(name));
            }
            let state = &mut game.state;
            state.player.spend_currency(CurrencyType::SocketOrb, 1)?;
            if let Some(skill) = state.player.skills[slot].as_mut() {
                skill.max_support_sockets += 1;
            }
            state
                .log
                .add(LogKind::SkillUse, format!("Added a socket to {}.", name));
            Ok(())
        })
    }

    /// Links a free owned copy of `support_id` to the skill in `slot`.
    pub fn link_support_gem(&mut self, slot: usize, support_id: &str) -> Result<(), ActionError> {
        self.attempt(|game| {
            let skill = skill_slot(&game.state, slot)?;
            let support = game
                .catalog()
                .support_gem(support_id)
                .ok_or_else(|| ActionError::UnknownDefinition(support_id.to_string()))?;
            let definition = game
                .catalog()
                .skill(&skill.definition_id)
                .ok_or_else(|| ActionError::UnknownDefinition(skill.definition_id.clone()))?;
            if !support.compatible_skill_types.contains(&definition.skill_type) {
                return Err(ActionError::IncompatibleSupport {
                    support: support.name.clone(),
                    skill: definition.name.clone(),
                });
            }
            let player = &game.state.player;
            if player
                .supports_for(skill)
                .iter()
                .any(|g| g.definition_id == support_id)
            {
                return Err(ActionError::SupportAlreadyLinked(support.name.clone()));
            }
            if !skill.has_free_socket() {
                return Err(ActionError::NoFreeSocket(definition.name.clone()));
            }
            let linked = player.linked_support_ids();
            let instance_id = player
                .support_gems
                .iter()
                .find(|g| g.definition_id == support_id && !linked.contains(&g.instance_id))
                .map(|g| g.instance_id)
                .ok_or_else(|| ActionError::NoFreeSupportGem(support.name.clone()))?;
            let message = format!("Linked {} to {}.", support.name, definition.name);

            let state = &mut game.state;
            if let Some(skill) = state.player.skills[slot].as_mut() {
                skill.socketed_support_ids.push(instance_id);
            }
            state.log.add(LogKind::SkillUse, message);
            Ok(())
        })
    }

    pub fn unlink_support_gem(&mut self, slot: usize, support_id: &str) -> Result<(), ActionError> {
        self.attempt(|game| {
            let skill = skill_slot(&game.state, slot)?;
            let instance_id = game
                .state
                .player
                .supports_for(skill)
                .iter()
                .find(|g| g.definition_id == support_id)
                .map(|g| g.instance_id)
                .ok_or_else(|| ActionError::NotFound(support_id.to_string()))?;
            let support_name = game
                .catalog()
                .support_gem(support_id)
                .map_or(support_id, |s| s.name.as_str())
                .to_string();
            let target = skill_name(game.catalog(), skill);
            let message = format!("Removed {} from {}.", support_name, target);

            let state = &mut game.state;
            if let Some(skill) = state.player.skills[slot].as_mut() {
                skill.socketed_support_ids.retain(|id| *id != instance_id);
            }
            state.log.add(LogKind::SkillUse, message);
            Ok(())
        })
    }

    /// Unlinks `support_id` from the skill if linked, links it otherwise.
    pub fn toggle_support_gem_socket(
        &mut self,
        slot: usize,
        support_id: &str,
    ) -> Result<(), ActionError> {
        let linked = skill_slot(&self.state, slot).is_ok_and(|skill| {
            self.state
                .player
                .supports_for(skill)
                .iter()
                .any(|g| g.definition_id == support_id)
        });
        if linked {
            self.unlink_support_gem(slot, support_id)
        } else {
            self.link_support_gem(slot, support_id)
        }
    }

    // ── Housekeeping ────────────────────────────────────────────

    pub fn clear_log(&mut self) {
        self.state.log.clear();
    }

    /// Starts over with a fresh character and map ledger.
    pub fn reset_game(&mut self) {
        self.state = GameState::new(self.catalog(), self.config());
        tracing::info!("game reset");
    }
}

fn skill_level_check(
    catalog: &Catalog,
    skill: &PlayerSkill,
    character_level: u32,
) -> Result<u32, ActionError> {
    let definition = catalog
        .skill(&skill.definition_id)
        .ok_or_else(|| ActionError::UnknownDefinition(skill.definition_id.clone()))?;
    GemLevelCheck {
        name: &definition.name,
        level: skill.level,
        experience: skill.experience,
        experience_table: &definition.gem_total_experience_by_level,
        base_required_level: definition.required_level,
        required_level_table: &definition.required_character_level_by_gem_level,
    }
    .next_level(character_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::generate_item_by_base_id;
    use crate::items::types::{Item, ItemRarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sword(game: &Game, rng: &mut ChaCha8Rng) -> Item {
        generate_item_by_base_id(game.catalog(), "rustySword", 1, Some(ItemRarity::Magic), 0, rng)
            .unwrap()
    }

    fn notices(game: &Game) -> Vec<String> {
        game.state
            .log
            .iter()
            .filter(|e| e.kind == LogKind::Notice)
            .map(|e| e.message.clone())
            .collect()
    }

    #[test]
    fn test_select_map_starts_fighting() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        game.select_map("twilightBeach", &mut rng).unwrap();
        assert!(game.state.is_fighting());
        assert_eq!(game.state.monsters.len(), 1);
        assert_eq!(game.state.monsters[0].position_index, 0);
        assert_eq!(notices(&game), vec!["Entered Twilight Beach".to_string()]);
    }

    #[test]
    fn test_locked_map_rejected_with_notice() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        let err = game.select_map("tidalCaves", &mut rng).unwrap_err();
        assert_eq!(err, ActionError::MapLocked("Tidal Caves".to_string()));
        assert!(!game.state.is_fighting());
        assert_eq!(notices(&game), vec!["Tidal Caves is locked.".to_string()]);
    }

    #[test]
    fn test_unknown_ids_are_silent() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        let before = game.state.clone();
        assert!(game.select_map("nowhere", &mut rng).is_err());
        assert!(game.buy_skill("nothing").is_err());
        assert!(game.sell_item(Uuid::nil()).is_err());
        assert!(game.equip_item(Uuid::nil(), None).is_err());
        assert_eq!(game.state, before);
    }

    #[test]
    fn test_boss_fight_requires_ready() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        assert_eq!(game.start_boss_fight(&mut rng), Err(ActionError::NotInMap));
        game.select_map("twilightBeach", &mut rng).unwrap();
        assert_eq!(game.start_boss_fight(&mut rng), Err(ActionError::BossNotReady));
        assert!(!game.state.is_boss_fight);

        game.state.boss_ready = true;
        game.start_boss_fight(&mut rng).unwrap();
        assert!(game.state.is_boss_fight);
        assert!(!game.state.boss_ready);
        assert_eq!(game.state.monsters.len(), 1);
        assert!(game.state.monsters[0].is_boss());
    }

    #[test]
    fn test_auto_boss_needs_a_clear() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        game.select_map("twilightBeach", &mut rng).unwrap();
        assert_eq!(game.toggle_auto_boss_spawn(), Err(ActionError::AutoBossLocked));

        game.state.maps.progress_mut("twilightBeach").times_cleared = 1;
        game.toggle_auto_boss_spawn().unwrap();
        assert!(game.state.current_map_progress().unwrap().auto_boss_spawn);
    }

    #[test]
    fn test_stop_farming_clears_arena() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut game = Game::with_defaults();
        game.select_map("twilightBeach", &mut rng).unwrap();
        game.stop_farming();
        assert!(!game.state.is_fighting());
        assert!(game.state.monsters.is_empty());
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut game = Game::with_defaults();
        let first = sword(&game, &mut rng);
        let second = sword(&game, &mut rng);
        let (first_id, second_id) = (first.id, second.id);
        game.state.player.inventory.extend([first, second]);

        game.equip_item(first_id, None).unwrap();
        game.equip_item(second_id, None).unwrap();
        let worn = game.state.player.equipment.get(EquipmentSlot::Weapon).as_ref().unwrap();
        assert_eq!(worn.id, second_id);
        assert_eq!(game.state.player.inventory.len(), 1);
        assert_eq!(game.state.player.inventory[0].id, first_id);
    }

    #[test]
    fn test_equip_rejects_wrong_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut game = Game::with_defaults();
        let item = sword(&game, &mut rng);
        let id = item.id;
        game.state.player.inventory.push(item);

        let err = game.equip_item(id, Some(EquipmentSlot::Helmet)).unwrap_err();
        assert!(matches!(err, ActionError::IncompatibleSlot { .. }));
        assert_eq!(game.state.player.inventory.len(), 1);
        assert!(game.state.player.equipment.get(EquipmentSlot::Helmet).is_none());
    }

    #[test]
    fn test_unequip_needs_inventory_space() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut game = Game::with_defaults();
        let item = sword(&game, &mut rng);
        let id = item.id;
        game.state.player.inventory.push(item);
        game.equip_item(id, None).unwrap();

        game.state.player.inventory_size = 0;
        assert_eq!(
            game.unequip_item(EquipmentSlot::Weapon),
            Err(ActionError::InventoryFull)
        );
        game.state.player.inventory_size = 10;
        game.unequip_item(EquipmentSlot::Weapon).unwrap();
        assert!(game.state.player.equipment.get(EquipmentSlot::Weapon).is_none());
        assert_eq!(game.state.player.inventory.len(), 1);
    }

    #[test]
    fn test_sell_magic_item_pays_transmutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut game = Game::with_defaults();
        let item = sword(&game, &mut rng);
        let id = item.id;
        game.state.player.inventory.push(item);
        let before = game.state.player.currency_amount(CurrencyType::Transmutation);

        game.sell_item(id).unwrap();
        assert!(game.state.player.inventory.is_empty());
        assert_eq!(
            game.state.player.currency_amount(CurrencyType::Transmutation),
            before + 1
        );
    }

    #[test]
    fn test_buy_skill_checks() {
        let mut game = Game::with_defaults();
        assert!(matches!(
            game.buy_skill("heavyStrike"),
            Err(ActionError::AlreadyKnown(_))
        ));
        assert!(matches!(
            game.buy_skill("cleave"),
            Err(ActionError::LevelRequirement { required: 3, current: 1 })
        ));

        game.state.player.level = 3;
        game.buy_skill("cleave").unwrap();
        assert_eq!(
            game.state.player.skills[3].as_ref().map(|s| s.definition_id.as_str()),
            Some("cleave")
        );
        assert_eq!(game.state.player.currency_amount(CurrencyType::Transmutation), 2);

        game.state.player.currency.insert(CurrencyType::Transmutation, 0);
        let before = game.state.player.clone();
        assert!(matches!(
            game.buy_skill("viciousStrike"),
            Err(ActionError::InsufficientCurrency { .. })
        ));
        assert_eq!(game.state.player, before);
    }

    #[test]
    fn test_buy_skill_with_full_bar_goes_inactive() {
        let mut game = Game::with_defaults();
        game.state.player.level = 10;
        game.state.player.currency.insert(CurrencyType::Transmutation, 100);
        for id in ["cleave", "groundSlam", "moltenStrike", "glacialHammer"] {
            game.buy_skill(id).unwrap();
        }
        assert_eq!(game.state.player.inactive_skills.len(), 1);
        assert_eq!(game.state.player.inactive_skills[0].definition_id, "glacialHammer");
    }

    #[test]
    fn test_strike_can_leave_the_bar() {
        let mut game = Game::with_defaults();
        game.remove_equipped_skill(0).unwrap();
        assert!(game.state.player.skills[0].is_none());
        assert!(game.state.player.knows_skill(DEFAULT_ATTACK_SKILL_ID));
        assert_eq!(
            game.state.player.inactive_skills[0].definition_id,
            DEFAULT_ATTACK_SKILL_ID
        );
        assert_eq!(game.remove_equipped_skill(0), Err(ActionError::EmptySkillSlot));

        game.equip_inactive_skill(DEFAULT_ATTACK_SKILL_ID).unwrap();
        assert!(game.state.player.skills[0].is_some());
    }

    #[test]
    fn test_skill_bar_management() {
        let mut game = Game::with_defaults();
        game.remove_equipped_skill(1).unwrap();
        assert!(game.state.player.skills[1].is_none());
        assert_eq!(game.state.player.inactive_skills.len(), 1);

        game.equip_inactive_skill("heavyStrike").unwrap();
        assert!(game.state.player.inactive_skills.is_empty());
        assert_eq!(
            game.state.player.skills[1].as_ref().map(|s| s.definition_id.as_str()),
            Some("heavyStrike")
        );

        game.move_skill_slot(0, 5).unwrap();
        assert!(game.state.player.skills[0].is_none());
        assert!(game.state.player.skills[5].is_some());
        assert_eq!(
            game.move_skill_slot(0, SKILL_BAR_SIZE),
            Err(ActionError::InvalidSkillSlot(SKILL_BAR_SIZE))
        );
    }

    #[test]
    fn test_toggle_skill_auto_use() {
        let mut game = Game::with_defaults();
        game.toggle_skill_auto_use(1).unwrap();
        assert!(!game.state.player.skills[1].as_ref().unwrap().is_active);
        assert_eq!(notices(&game), vec!["Heavy Strike auto-use: OFF".to_string()]);
        assert_eq!(game.toggle_skill_auto_use(4), Err(ActionError::EmptySkillSlot));
    }

    #[test]
    fn test_skill_gem_level_up_gates() {
        let mut game = Game::with_defaults();
        game.state.player.skills[1].as_mut().unwrap().experience = 20_000.0;
        assert!(matches!(
            game.level_up_skill_gem(1),
            Err(ActionError::LevelRequirement { required: 2, current: 1 })
        ));

        game.state.player.level = 2;
        game.state.player.skills[1].as_mut().unwrap().experience = 0.0;
        assert!(matches!(
            game.level_up_skill_gem(1),
            Err(ActionError::NotEnoughGemExperience { next_level: 2, .. })
        ));

        game.state.player.skills[1].as_mut().unwrap().experience = 20_000.0;
        game.level_up_skill_gem(1).unwrap();
        assert_eq!(game.state.player.skills[1].as_ref().unwrap().level, 2);
    }

    #[test]
    fn test_support_gem_linking() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut game = Game::with_defaults();
        game.buy_support_gem("meleePhysicalDamage", &mut rng).unwrap();
        assert_eq!(game.state.player.support_gems.len(), 1);

        game.link_support_gem(0, "meleePhysicalDamage").unwrap();
        assert!(matches!(
            game.link_support_gem(0, "meleePhysicalDamage"),
            Err(ActionError::SupportAlreadyLinked(_))
        ));
        assert!(matches!(
            game.link_support_gem(1, "meleePhysicalDamage"),
            Err(ActionError::NoFreeSupportGem(_))
        ));

        game.toggle_support_gem_socket(0, "meleePhysicalDamage").unwrap();
        assert!(game.state.player.skills[0]
            .as_ref()
            .unwrap()
            .socketed_support_ids
            .is_empty());
        game.link_support_gem(1, "meleePhysicalDamage").unwrap();
    }

    #[test]
    fn test_spell_support_rejected_on_attack() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut game = Game::with_defaults();
        game.state.player.level = 6;
        game.buy_support_gem("swiftCasting", &mut rng).unwrap();
        assert!(matches!(
            game.link_support_gem(0, "swiftCasting"),
            Err(ActionError::IncompatibleSupport { .. })
        ));
    }

    #[test]
    fn test_add_socket_costs_socket_orb() {
        let mut game = Game::with_defaults();
        assert!(matches!(
            game.add_skill_socket(0),
            Err(ActionError::InsufficientCurrency { .. })
        ));
        game.state.player.add_currency(CurrencyType::SocketOrb, 1);
        game.add_skill_socket(0).unwrap();
        assert_eq!(
            game.state.player.skills[0].as_ref().unwrap().max_support_sockets,
            STARTING_SUPPORT_SOCKETS + 1
        );
        assert_eq!(game.state.player.currency_amount(CurrencyType::SocketOrb), 0);
    }

    #[test]
    fn test_reset_game_starts_over() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut game = Game::with_defaults();
        game.select_map("twilightBeach", &mut rng).unwrap();
        game.state.player.level = 9;
        game.reset_game();
        assert_eq!(game.state.player.level, 1);
        assert!(!game.state.is_fighting());
        assert!(game.state.log.is_empty());
    }
}
