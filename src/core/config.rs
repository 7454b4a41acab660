//! Runtime engine knobs. Balancing numbers that never change at runtime live
//! in [`crate::core::constants`].

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between normal monster spawns.
    pub spawn_interval_secs: f64,
    /// Normal monsters alive at once (boss fights ignore this).
    pub max_monsters: usize,
    /// Spawn timer after a boss kill.
    pub boss_respawn_delay_secs: f64,
    pub log_capacity: usize,
    pub inventory_size: usize,
    /// Rate the host should call `Game::tick` at.
    pub tick_rate_hz: u32,
    pub starting_map_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_interval_secs: DEFAULT_SPAWN_INTERVAL_SECONDS,
            max_monsters: MAX_MONSTERS,
            boss_respawn_delay_secs: BOSS_RESPAWN_DELAY_SECONDS,
            log_capacity: COMBAT_LOG_CAPACITY,
            inventory_size: DEFAULT_INVENTORY_SIZE,
            tick_rate_hz: TICK_RATE_HZ,
            starting_map_id: "twilightBeach".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses a config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval_secs.is_finite() && self.spawn_interval_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "spawn_interval_secs",
                reason: format!("must be positive, got {}", self.spawn_interval_secs),
            });
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate_hz",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "log_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Fixed timestep matching `tick_rate_hz`.
    pub fn tick_delta_secs(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }
}
