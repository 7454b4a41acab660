use serde::{Deserialize, Serialize};

use super::combat_log::CombatLog;
use super::config::EngineConfig;
use super::constants::STARTING_PLAYER_NAME;
use crate::catalog::Catalog;
use crate::character::player::Player;
use crate::combat::types::Monster;
use crate::zones::{MapProgress, MapTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatState {
    #[default]
    Idle,
    Fighting,
}

/// Everything the host renders: the character, the arena and the map ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub combat_state: CombatState,
    pub current_map_id: Option<String>,
    pub is_boss_fight: bool,
    pub boss_ready: bool,
    /// Seconds until the next normal spawn.
    pub spawn_timer: f64,
    /// Seconds until the player may act again.
    pub player_attack_cooldown: f64,
    pub maps: MapTracker,
    pub log: CombatLog,
    /// Seconds of committed fighting.
    pub total_play_time: f64,
}

impl GameState {
    pub fn new(catalog: &Catalog, config: &EngineConfig) -> Self {
        let mut player = Player::starter(STARTING_PLAYER_NAME, catalog);
        player.inventory_size = config.inventory_size;
        Self {
            player,
            monsters: Vec::new(),
            combat_state: CombatState::Idle,
            current_map_id: None,
            is_boss_fight: false,
            boss_ready: false,
            spawn_timer: 0.0,
            player_attack_cooldown: 0.0,
            maps: MapTracker::new(catalog),
            log: CombatLog::new(config.log_capacity),
            total_play_time: 0.0,
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.combat_state == CombatState::Fighting && self.current_map_id.is_some()
    }

    /// Progress of the map currently being farmed.
    pub fn current_map_progress(&self) -> Option<&MapProgress> {
        self.current_map_id
            .as_deref()
            .and_then(|id| self.maps.progress(id))
    }

    /// Leaves the arena: roster cleared and every combat flag reset.
    pub fn return_to_town(&mut self) {
        self.combat_state = CombatState::Idle;
        self.current_map_id = None;
        self.monsters.clear();
        self.is_boss_fight = false;
        self.boss_ready = false;
        self.spawn_timer = 0.0;
        self.player_attack_cooldown = 0.0;
    }
}
