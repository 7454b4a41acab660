//! Simulation configuration.

use crate::core::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated characters
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Game seconds each run may play before it is cut off
    pub max_seconds_per_run: f64,

    /// Stop a run early once this map is unlocked
    pub target_map_id: Option<String>,

    /// Equip drops that beat what is worn
    pub auto_equip: bool,

    /// Engine knobs every run starts from
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_seconds_per_run: 3600.0,
            target_map_id: None,
            auto_equip: true,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A short sanity pass: a few characters for ten minutes each.
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            max_seconds_per_run: 600.0,
            ..Default::default()
        }
    }

    /// How long it takes to open `map_id`.
    pub fn time_to_unlock(map_id: impl Into<String>, num_runs: u32) -> Self {
        Self {
            num_runs,
            target_map_id: Some(map_id.into()),
            ..Default::default()
        }
    }

    /// Ticks a run may take at the configured tick rate.
    pub fn max_ticks_per_run(&self) -> u64 {
        (self.max_seconds_per_run * self.engine.tick_rate_hz as f64).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_ticks_follow_tick_rate() {
        let config = SimConfig {
            max_seconds_per_run: 60.0,
            ..Default::default()
        };
        assert_eq!(config.max_ticks_per_run(), 600);
    }

    #[test]
    fn test_time_to_unlock_preset() {
        let config = SimConfig::time_to_unlock("tidalCaves", 5);
        assert_eq!(config.num_runs, 5);
        assert_eq!(config.target_map_id.as_deref(), Some("tidalCaves"));
    }
}
