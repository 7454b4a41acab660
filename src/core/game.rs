//! The engine facade: state plus the catalog and config it runs against.

use super::combat_log::LogKind;
use super::config::EngineConfig;
use super::error::ActionError;
use super::game_state::GameState;
use crate::catalog::Catalog;
use crate::character::stats::{compute_effective_stats, EffectiveStats};
use crate::skills::runtime::{
    estimate_skill_damage_range, get_skill_runtime_stats, SkillDamageEstimate,
};

/// Single writer of a [`GameState`]. Ticks and intents all go through here.
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub(crate) catalog: Catalog,
    pub(crate) config: EngineConfig,
}

impl Game {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let state = GameState::new(&catalog, &config);
        Self {
            state,
            catalog,
            config,
        }
    }

    /// Built-in content with default knobs.
    pub fn with_defaults() -> Self {
        Self::new(Catalog::builtin(), EngineConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn effective_stats(&self) -> EffectiveStats {
        compute_effective_stats(&self.state.player)
    }

    /// Damage range of one use of the bar skill in `slot`, supports included.
    pub fn skill_damage_estimate(&self, slot: usize) -> Option<SkillDamageEstimate> {
        let player = &self.state.player;
        let skill = player.skills.get(slot)?.as_ref()?;
        let definition = self.catalog.skill(&skill.definition_id)?;
        let runtime =
            get_skill_runtime_stats(definition, skill, &player.support_gems, &self.catalog);
        Some(estimate_skill_damage_range(&self.effective_stats(), &runtime))
    }

    /// Runs an intent, narrating a user-facing rejection as a `Notice`.
    /// Intents validate before they mutate, so a rejection leaves the state
    /// untouched apart from that log line.
    pub(crate) fn attempt<T>(
        &mut self,
        intent: impl FnOnce(&mut Self) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        let result = intent(self);
        if let Err(err) = &result {
            if err.is_silent() {
                tracing::debug!(error = %err, "intent ignored");
            } else {
                self.state.log.add(LogKind::Notice, err.to_string());
            }
        }
        result
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_damage_estimate_per_slot() {
        let game = Game::with_defaults();
        let strike = game.skill_damage_estimate(0).unwrap();
        let heavy = game.skill_damage_estimate(1).unwrap();
        assert!(strike.min > 0.0 && strike.min < strike.max);
        assert!(heavy.min > strike.min);
        assert!(heavy.max > strike.max);
        assert!(heavy.min <= heavy.avg && heavy.avg <= heavy.max);
        assert!(game.skill_damage_estimate(3).is_none());
        assert!(game.skill_damage_estimate(99).is_none());
    }
}
